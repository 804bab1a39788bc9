use super::organization::initial;
use serde::Deserialize;

/// A contributor to a repository.
#[derive(Debug, Deserialize)]
pub struct Contributor {
    pub id: Option<u64>,
    /// Anonymous contributors has no login.
    pub login: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub contributions: u64,
}

impl Contributor {
    pub fn name(&self) -> &str {
        self.login.as_deref().unwrap_or("anonymous")
    }
    pub fn initial(&self) -> String {
        initial(self.name())
    }
}
