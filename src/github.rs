//! A small client for the parts of the GitHub REST API we show.
use crate::models::{
    Commit, CommitPage, Contributor, OrgSummary, Organization, Readme,
    Repository, SearchResult,
};
use reqwest::header::{
    ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

/// Number of commits shown per page of a repository view.
pub const COMMITS_PER_PAGE: u32 = 6;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Not found")]
    NotFound,
    #[error("Rate limit exceeded")]
    RateLimited,
    #[error("Unprocessable request: {0}")]
    Unprocessable(String),
    #[error("GitHub says {status}: {message}")]
    Api { status: StatusCode, message: String },
    #[error("Unexpected content: {0}")]
    BadContent(String),
}

/// Parameters for a GitHub search.
#[derive(Debug, Serialize)]
pub struct Search<'a> {
    pub q: &'a str,
    pub sort: &'a str,
    pub order: &'a str,
    pub per_page: u32,
    pub page: u32,
}

#[derive(Serialize)]
struct Markdown<'a> {
    text: &'a str,
    mode: &'static str,
    context: String,
}

#[derive(clap::Parser)]
pub struct GithubOpt {
    /// Base url of the GitHub REST API.
    #[clap(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    github_api: String,

    /// Token for authenticated api access (with higher rate limits).
    #[clap(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    github_token: Option<String>,
}

impl GithubOpt {
    pub fn client(&self) -> Result<Github, Error> {
        Github::new(&self.github_api, self.github_token.as_deref())
    }
}

#[derive(Clone, Debug)]
pub struct Github {
    client: Client,
    base: String,
}

impl Github {
    pub fn new(base: &str, token: Option<&str>) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static("2022-11-28"),
        );
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| Error::BadContent("token".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;
        Ok(Github {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{}", self.base, path))
    }

    #[instrument(skip(self), err)]
    pub async fn search_organizations(
        &self,
        search: &Search<'_>,
    ) -> Result<SearchResult<OrgSummary>, Error> {
        self.json(self.get("/search/users").query(search)).await
    }

    #[instrument(skip(self), err)]
    pub async fn search_repositories(
        &self,
        search: &Search<'_>,
    ) -> Result<SearchResult<Repository>, Error> {
        self.json(self.get("/search/repositories").query(search)).await
    }

    #[instrument(skip(self), err)]
    pub async fn organization(&self, org: &str) -> Result<Organization, Error> {
        self.json(self.get(&format!("/orgs/{org}"))).await
    }

    #[instrument(skip(self), err)]
    pub async fn repository(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Repository, Error> {
        self.json(self.get(&format!("/repos/{owner}/{repo}"))).await
    }

    #[instrument(skip(self), err)]
    pub async fn contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Contributor>, Error> {
        let resp = self
            .send(self.get(&format!("/repos/{owner}/{repo}/contributors")))
            .await?;
        // An empty repository has no contributors, and no content.
        if resp.status() == StatusCode::NO_CONTENT {
            return Ok(vec![]);
        }
        Ok(resp.json().await?)
    }

    #[instrument(skip(self), err)]
    pub async fn commits(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
    ) -> Result<CommitPage, Error> {
        let resp = self
            .send(
                self.get(&format!("/repos/{owner}/{repo}/commits"))
                    .query(&[("per_page", COMMITS_PER_PAGE), ("page", page)]),
            )
            .await?;
        let has_more = resp
            .headers()
            .get(LINK)
            .and_then(|link| link.to_str().ok())
            .is_some_and(has_next_link);
        let commits = resp.json::<Vec<Commit>>().await?;
        Ok(CommitPage { commits, has_more })
    }

    #[instrument(skip(self), err)]
    pub async fn readme(&self, owner: &str, repo: &str) -> Result<Readme, Error> {
        self.json(self.get(&format!("/repos/{owner}/{repo}/readme")))
            .await
    }

    /// Render github-flavored markdown to html.
    ///
    /// The context repository is used to link issue references and
    /// such in the text.
    #[instrument(skip(self, text), err)]
    pub async fn render_markdown(
        &self,
        text: &str,
        owner: &str,
        repo: &str,
    ) -> Result<String, Error> {
        let body = Markdown {
            text,
            mode: "gfm",
            context: format!("{owner}/{repo}"),
        };
        let resp = self
            .send(
                self.client
                    .post(format!("{}/markdown", self.base))
                    .json(&body),
            )
            .await?;
        Ok(resp.text().await?)
    }

    async fn json<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<T, Error> {
        Ok(self.send(req).await?.json().await?)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, Error> {
        let resp = req.send().await?;
        let status = resp.status();
        debug!("Got {} from {}", status, resp.url());
        if status.is_success() {
            return Ok(resp);
        }
        let rate_exhausted = resp
            .headers()
            .get("x-ratelimit-remaining")
            .is_some_and(|v| v.as_bytes() == b"0");
        let message = resp.text().await.unwrap_or_default();
        Err(match status {
            StatusCode::NOT_FOUND => Error::NotFound,
            StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
            StatusCode::FORBIDDEN if rate_exhausted => Error::RateLimited,
            StatusCode::UNPROCESSABLE_ENTITY => Error::Unprocessable(message),
            status => Error::Api { status, message },
        })
    }
}

const USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Check if a `Link` header value has a `rel="next"` part.
fn has_next_link(link: &str) -> bool {
    link.split(',').any(|part| {
        part.split(';')
            .skip(1)
            .any(|param| param.trim() == "rel=\"next\"")
    })
}
