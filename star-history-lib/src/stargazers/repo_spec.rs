use crate::Result;
use core::fmt::{Display, Formatter};
use ohno::{IntoAppError, bail};
use std::sync::Arc;
use url::Url;

const WEB_BASE_URL: &str = "https://github.com";

/// Identifies a repository by owner and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoSpec {
    owner: Arc<str>,
    repo: Arc<str>,
}

impl RepoSpec {
    pub fn new(owner: &str, repo: &str) -> Result<Self> {
        let owner = owner.trim();
        let repo = repo.trim().trim_end_matches(".git");

        if owner.is_empty() || repo.is_empty() {
            bail!("invalid repository: empty owner or repo name in '{owner}/{repo}'");
        }

        if owner.contains('/') || repo.contains('/') {
            bail!("invalid repository: owner and repo names cannot contain '/' ('{owner}/{repo}')");
        }

        Ok(Self {
            owner: Arc::from(owner),
            repo: Arc::from(repo),
        })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// The repository's web page.
    pub fn url(&self) -> Result<Url> {
        Url::parse(&format!("{WEB_BASE_URL}/{}/{}", self.owner, self.repo)).into_app_err_with(|| format!("building URL for repository '{self}'"))
    }
}

impl Display for RepoSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
