use super::organization::initial;
use crate::ago::ago;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A commit, as listed by the repository commits endpoint.
#[derive(Debug, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitData,
    /// The GitHub user matching the commit author, if any.
    pub author: Option<Account>,
}

#[derive(Debug, Deserialize)]
pub struct CommitData {
    pub message: String,
    pub author: Option<Signature>,
    pub verification: Option<Verification>,
}

#[derive(Debug, Deserialize)]
pub struct Signature {
    pub name: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct Verification {
    pub verified: bool,
}

#[derive(Debug, Deserialize)]
pub struct Account {
    pub login: String,
    pub avatar_url: String,
}

impl Commit {
    /// The first line of the commit message.
    pub fn summary(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("")
    }
    pub fn is_verified(&self) -> bool {
        self.commit.verification.as_ref().is_some_and(|v| v.verified)
    }
    /// Who made the commit, preferably as a GitHub login.
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .map(|a| a.login.as_str())
            .or_else(|| self.commit.author.as_ref()?.name.as_deref())
            .unwrap_or("someone")
    }
    pub fn committed_ago(&self) -> Option<String> {
        self.commit.author.as_ref()?.date.map(ago)
    }
}

impl Account {
    pub fn initial(&self) -> String {
        initial(&self.login)
    }
}

/// One page of commits, and whether there are more to see.
#[derive(Debug, Default)]
pub struct CommitPage {
    pub commits: Vec<Commit>,
    pub has_more: bool,
}

#[cfg(test)]
mod test {
    use super::Commit;

    #[test]
    fn parse_commit() {
        let data = r#"{
            "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "commit": {
                "author": {
                    "name": "Monalisa Octocat",
                    "email": "support@github.com",
                    "date": "2011-04-14T16:00:49Z"
                },
                "message": "Fix all the bugs\n\nAnd then some.",
                "verification": {"verified": true, "reason": "valid"}
            },
            "author": {"login": "octocat", "avatar_url": "https://github.com/images/error/octocat_happy.gif"}
        }"#;
        let commit: Commit = serde_json::from_str(data).unwrap();
        assert_eq!(commit.summary(), "Fix all the bugs");
        assert!(commit.is_verified());
        assert_eq!(commit.author_name(), "octocat");
        assert!(commit.committed_ago().is_some());
    }

    #[test]
    fn parse_anonymous_commit() {
        let data = r#"{
            "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e",
            "commit": {
                "author": {"name": "Rasmus Kaj", "date": null},
                "message": "Initial import"
            },
            "author": null
        }"#;
        let commit: Commit = serde_json::from_str(data).unwrap();
        assert!(!commit.is_verified());
        assert_eq!(commit.author_name(), "Rasmus Kaj");
        assert_eq!(commit.committed_ago(), None);
    }
}
