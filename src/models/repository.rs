use super::organization::initial;
use crate::ago::ago;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A repository, as returned both by the repository search and by
/// the single repository endpoint.
#[derive(Debug, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub description: Option<String>,
    pub visibility: Option<String>,
    pub language: Option<String>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license: Option<License>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub open_issues_count: u64,
    pub default_branch: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct Owner {
    pub login: String,
    pub avatar_url: String,
}

#[derive(Debug, Deserialize)]
pub struct License {
    pub name: String,
}

impl Repository {
    pub fn visibility(&self) -> &str {
        self.visibility.as_deref().unwrap_or("public")
    }
    pub fn homepage_url(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|h| !h.trim().is_empty())
    }
    pub fn has_topics(&self) -> bool {
        !self.topics.is_empty()
    }
    pub fn license_name(&self) -> Option<&str> {
        self.license.as_ref().map(|l| l.name.as_str())
    }
    pub fn updated_ago(&self) -> String {
        ago(self.updated_at)
    }
}

impl Owner {
    pub fn initial(&self) -> String {
        initial(&self.login)
    }
}

#[cfg(test)]
mod test {
    use super::Repository;

    const DATA: &str = r#"{
        "id": 1296269,
        "name": "Hello-World",
        "full_name": "octocat/Hello-World",
        "owner": {
            "login": "octocat",
            "id": 1,
            "avatar_url": "https://github.com/images/error/octocat_happy.gif"
        },
        "private": false,
        "description": "This your first repo!",
        "language": null,
        "homepage": "",
        "topics": ["octocat", "atom"],
        "license": {"key": "mit", "name": "MIT License"},
        "stargazers_count": 80,
        "forks_count": 9,
        "open_issues_count": 0,
        "default_branch": "master",
        "visibility": "public",
        "updated_at": "2011-01-26T19:14:43Z"
    }"#;

    #[test]
    fn parse_repository() {
        let repo: Repository = serde_json::from_str(DATA).unwrap();
        assert_eq!(repo.full_name, "octocat/Hello-World");
        assert_eq!(repo.default_branch, "master");
        assert_eq!(repo.license_name(), Some("MIT License"));
        assert_eq!(repo.homepage_url(), None);
        assert!(repo.has_topics());
        assert_eq!(repo.owner.initial(), "O");
        assert!(repo.updated_ago().ends_with(" years ago"));
    }
}
