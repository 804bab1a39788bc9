use serde::Deserialize;

/// An organization as found by the user search.
#[derive(Debug, Deserialize)]
pub struct OrgSummary {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
}

impl OrgSummary {
    /// Fallback shown when the avatar can't be loaded.
    pub fn initial(&self) -> String {
        initial(&self.login)
    }
}

/// Full details of an organization.
#[derive(Debug, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub login: String,
    pub avatar_url: String,
    pub description: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    pub location: Option<String>,
    pub blog: Option<String>,
    pub twitter_username: Option<String>,
    pub email: Option<String>,
    pub html_url: String,
}

impl Organization {
    pub fn initial(&self) -> String {
        initial(&self.login)
    }

    /// The blog url, if the organization has one.
    ///
    /// GitHub reports a missing blog as an empty string, and does
    /// not require a scheme, so "example.com" is a valid blog.
    pub fn blog_url(&self) -> Option<String> {
        let blog = self.blog.as_deref().map(str::trim).unwrap_or("");
        if blog.is_empty() {
            None
        } else if blog.starts_with("http://") || blog.starts_with("https://")
        {
            Some(blog.to_string())
        } else {
            Some(format!("https://{blog}"))
        }
    }

    pub fn twitter(&self) -> Option<&str> {
        self.twitter_username.as_deref().filter(|t| !t.is_empty())
    }

    pub fn mail(&self) -> Option<&str> {
        self.email.as_deref().filter(|e| !e.is_empty())
    }
}

pub(crate) fn initial(login: &str) -> String {
    login
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use super::Organization;

    fn org(blog: Option<&str>) -> Organization {
        Organization {
            id: 1,
            login: "krats".into(),
            avatar_url: String::new(),
            description: None,
            name: None,
            public_repos: 0,
            followers: 0,
            location: None,
            blog: blog.map(Into::into),
            twitter_username: Some(String::new()),
            email: None,
            html_url: "https://github.com/krats".into(),
        }
    }

    #[test]
    fn blog_missing() {
        assert_eq!(org(None).blog_url(), None);
        assert_eq!(org(Some("")).blog_url(), None);
    }

    #[test]
    fn blog_without_scheme() {
        assert_eq!(
            org(Some("krats.se")).blog_url().as_deref(),
            Some("https://krats.se")
        );
    }

    #[test]
    fn blog_with_scheme() {
        assert_eq!(
            org(Some("http://krats.se/")).blog_url().as_deref(),
            Some("http://krats.se/")
        );
    }

    #[test]
    fn empty_twitter_is_none() {
        assert_eq!(org(None).twitter(), None);
    }

    #[test]
    fn parse_organization() {
        let data = r#"{
            "login": "github",
            "id": 1,
            "avatar_url": "https://github.com/images/error/octocat_happy.gif",
            "description": "A great organization",
            "name": "github",
            "blog": "https://github.com/blog",
            "location": "San Francisco",
            "email": "octocat@github.com",
            "twitter_username": "github",
            "public_repos": 2,
            "followers": 20,
            "html_url": "https://github.com/octocat",
            "type": "Organization"
        }"#;
        let org: Organization = serde_json::from_str(data).unwrap();
        assert_eq!(org.login, "github");
        assert_eq!(org.public_repos, 2);
        assert_eq!(org.twitter(), Some("github"));
        assert_eq!(org.initial(), "G");
    }
}
