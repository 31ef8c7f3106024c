use super::client::Client;
use super::link::extract_last_page_num;
use super::rate_limit::RateLimitPolicy;
use super::{LOG_TARGET, Progress, RepoSpec};
use crate::Result;
use crate::series::StarEvent;
use chrono::Utc;
use core::time::Duration;
use ohno::{EnrichableExt, IntoAppError, app_err};
use reqwest::header::LINK;

/// Largest page size GitHub accepts for the stargazer listing.
pub const MAX_PER_PAGE: u8 = 100;

/// Walks every page of a repository's stargazer listing, one page at a time.
#[derive(Debug, Clone)]
pub struct StargazerWalker {
    client: Client,
    per_page: u8,
    policy: RateLimitPolicy,
}

impl StargazerWalker {
    #[must_use]
    pub fn new(client: Client, per_page: u8, policy: RateLimitPolicy) -> Self {
        Self {
            client,
            per_page: per_page.clamp(1, MAX_PER_PAGE),
            policy,
        }
    }

    /// Fetch every star event of `repo`, in the order the API returns them.
    ///
    /// The first request only discovers the number of pages. Each page is then
    /// fetched in increasing order, preceded by a rate-limit query whose result is
    /// reported to `progress` and may pause the walk until the quota resets.
    pub async fn fetch_stars(&self, repo: &RepoSpec, progress: &dyn Progress) -> Result<Vec<StarEvent>> {
        let end_point = format!("/repos/{}/{}/stargazers", repo.owner(), repo.repo());

        progress.set_phase("Probing");
        let last_page_num = self.discover_last_page(&end_point, repo).await?;
        log::info!(target: LOG_TARGET, "Repository '{repo}' has {last_page_num} page(s) of stargazers");

        progress.set_phase("Fetching");
        let mut stars = Vec::new();

        for page_num in 1..=last_page_num {
            let rate = self
                .client
                .rate_limit()
                .await
                .map_err(|e| e.enrich_with(|| format!("checking rate limit before page {page_num} of '{repo}'")))?;

            log::info!(target: LOG_TARGET, "{page_num} / {last_page_num}: {rate}");
            progress.set_position(u64::from(page_num), u64::from(last_page_num), &rate.to_string());

            let wait = self.policy.wait_duration(&rate, Utc::now());
            if wait > Duration::ZERO {
                let message = format!("GitHub rate limit nearly exhausted ({rate}), waiting {}s", wait.as_secs());
                log::warn!(target: LOG_TARGET, "{message}");
                if !log::log_enabled!(log::Level::Warn) {
                    progress.println(&message);
                }
                tokio::time::sleep(wait).await;
            }

            let page = self
                .fetch_page(&end_point, page_num)
                .await
                .map_err(|e| e.enrich_with(|| format!("fetching page {page_num} of {last_page_num} of stargazers for '{repo}'")))?;

            log::debug!(target: LOG_TARGET, "Page {page_num} of '{repo}' returned {} star(s)", page.len());
            stars.extend(page);
        }

        log::info!(target: LOG_TARGET, "Fetched {} star(s) for '{repo}'", stars.len());
        Ok(stars)
    }

    async fn discover_last_page(&self, end_point: &str, repo: &RepoSpec) -> Result<u32> {
        let resp = self
            .client
            .get(end_point, &[("per_page", self.per_page.to_string())])
            .await
            .map_err(|e| e.enrich_with(|| format!("probing stargazers of '{repo}'")))?;

        let link = resp
            .headers()
            .get(LINK)
            .ok_or_else(|| app_err!("response for the stargazers of '{repo}' has no pagination header"))?
            .to_str()
            .into_app_err_with(|| format!("pagination header for '{repo}' is not valid text"))?;

        extract_last_page_num(link)
    }

    async fn fetch_page(&self, end_point: &str, page_num: u32) -> Result<Vec<StarEvent>> {
        let query = [("per_page", self.per_page.to_string()), ("page", page_num.to_string())];
        let resp = self.client.get(end_point, &query).await?;
        resp.json().await.into_app_err("parsing stargazer records")
    }
}
