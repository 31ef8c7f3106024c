//! Pagination metadata carried by the `Link` response header.
//!
//! GitHub describes paged listings with a header such as:
//!
//! ```text
//! <https://api.github.com/repositories/1/stargazers?page=2>; rel="next",
//! <https://api.github.com/repositories/1/stargazers?page=231>; rel="last"
//! ```

use crate::Result;
use ohno::{IntoAppError, app_err, bail};
use regex::Regex;
use std::sync::LazyLock;

static PAGE_PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[?&]page=(\d+)").expect("page parameter regex is valid"));

/// Extract the number of the final page from a `Link` header value.
///
/// The entry whose relation is `last` is preferred. Headers that lack a `last`
/// relation fall back to the final `page=` parameter found anywhere in the value.
pub fn extract_last_page_num(link: &str) -> Result<u32> {
    let last_entry = link
        .split(',')
        .find(|entry| entry.split(';').skip(1).any(|param| is_last_relation(param.trim())));

    let haystack = last_entry.unwrap_or_else(|| {
        log::debug!(target: super::LOG_TARGET, "Link header has no rel=\"last\" entry, using the final page parameter");
        link
    });

    let captures = PAGE_PARAM
        .captures_iter(haystack)
        .last()
        .ok_or_else(|| app_err!("no page number found in pagination header '{link}'"))?;

    let page_num = captures[1]
        .parse::<u32>()
        .into_app_err_with(|| format!("page number in pagination header '{link}' is out of range"))?;

    if page_num == 0 {
        bail!("pagination header '{link}' reports a last page of 0");
    }

    Ok(page_num)
}

fn is_last_relation(param: &str) -> bool {
    param
        .strip_prefix("rel=")
        .is_some_and(|rel| rel.trim_matches('"').split_whitespace().any(|r| r == "last"))
}
