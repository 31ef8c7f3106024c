use crate::Result;
use camino::Utf8Path;
use ohno::{IntoAppError, bail};
use serde::Deserialize;
use std::fs;
use std::io;

/// Name of the token file looked up in the working directory.
pub const DEFAULT_TOKEN_FILE: &str = "github_token.json";

const LOG_TARGET: &str = "     token";

#[derive(Debug, Deserialize)]
struct TokenFile {
    token: String,
}

/// Find the GitHub token used to authenticate API requests.
///
/// `token_file` is a JSON document with a `token` field and wins when it exists.
/// Otherwise `fallback` (the `GITHUB_TOKEN` environment variable or `--github-token`)
/// is used.
///
/// # Errors
///
/// Returns an error if the token file is unreadable or malformed, or if no token
/// is available from either source.
pub fn discover_token(token_file: &Utf8Path, fallback: Option<&str>) -> Result<String> {
    match fs::read_to_string(token_file) {
        Ok(text) => {
            let parsed: TokenFile = serde_json::from_str(&text).into_app_err_with(|| format!("parsing token file '{token_file}'"))?;
            let token = parsed.token.trim();
            if token.is_empty() {
                bail!("token file '{token_file}' holds an empty token");
            }

            log::debug!(target: LOG_TARGET, "Using GitHub token from '{token_file}'");
            return Ok(token.to_string());
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).into_app_err_with(|| format!("reading token file '{token_file}'")),
    }

    match fallback.map(str::trim) {
        Some(token) if !token.is_empty() => {
            log::debug!(target: LOG_TARGET, "Using GitHub token from the environment");
            Ok(token.to_string())
        }
        _ => bail!("no GitHub token found: create '{token_file}' holding {{\"token\": \"...\"}} or set GITHUB_TOKEN"),
    }
}
