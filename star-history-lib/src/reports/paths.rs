//! Derivation of output file names.

use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::bail;

/// Extension a chart file must carry.
pub const CHART_EXTENSION: &str = "html";

/// Insert `_{suffix}` between a path's stem and its extension.
///
/// `stars.csv` with suffix `daily` becomes `stars_daily.csv`.
#[must_use]
pub fn add_suffix(path: &Utf8Path, suffix: &str) -> Utf8PathBuf {
    let stem = path.file_stem().unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}_{suffix}.{ext}"),
        None => format!("{stem}_{suffix}"),
    };
    path.with_file_name(file_name)
}

/// Swap a path's extension for `ext` (given without the leading dot).
#[must_use]
pub fn replace_extension(path: &Utf8Path, ext: &str) -> Utf8PathBuf {
    path.with_extension(ext)
}

/// Reject chart paths that do not end in `.html`.
pub fn validate_chart_path(path: &Utf8Path) -> Result<()> {
    if path.extension() != Some(CHART_EXTENSION) {
        bail!("chart path '{path}' must be an HTML file ending in '.{CHART_EXTENSION}'");
    }

    Ok(())
}
