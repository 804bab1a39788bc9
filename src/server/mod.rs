mod error;
pub mod filter;
mod organizations;
pub mod paginator;
pub mod query;
pub mod readme;
mod repository;

use self::error::{ViewError, for_rejection};
pub use self::filter::FilterMenu;
pub use self::paginator::{Paginator, PrevNext};
pub use self::readme::SafeHtml;
use crate::github::{Github, GithubOpt};
use chrono::{Duration, Utc};
use mime::TEXT_PLAIN;
use regex::Regex;
use std::net::SocketAddr;
use std::sync::{Arc, LazyLock};
use tracing::info;
use warp::filters::BoxedFilter;
use warp::http::header::{CONTENT_TYPE, EXPIRES, LOCATION};
use warp::http::response::Builder;
use warp::http::status::StatusCode;
use warp::path::Tail;
use warp::reply::Response;
use warp::{self, Filter, Rejection, Reply};

pub const APP_NAME: &str = "GitXplorer";
pub const APP_DESCRIPTION: &str = "Explore GitHub repositories with ease.";

#[derive(clap::Parser)]
#[clap(about, version)]
pub struct Args {
    #[clap(flatten)]
    github: GithubOpt,

    /// Address to listen on.
    #[clap(long, env = "GITXPLORER_BIND", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Public url of the site, used for canonical links.
    #[clap(long, env = "BASE_URL", default_value = "http://localhost:3000")]
    base_url: String,
}

impl Args {
    pub async fn run(self) -> anyhow::Result<()> {
        let app = App {
            github: self.github.client()?,
            base_url: self.base_url.trim_end_matches('/').into(),
        };
        info!("Listening on http://{}", self.bind);
        warp::serve(routes(app)).run(self.bind).await;
        Ok(())
    }
}

/// What the handlers need to know.
#[derive(Clone)]
pub struct App {
    github: Github,
    base_url: Arc<str>,
}

impl App {
    fn meta(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        path: &str,
    ) -> PageMeta {
        PageMeta {
            title: title.map(Into::into),
            description: description
                .filter(|d| !d.is_empty())
                .unwrap_or(APP_DESCRIPTION)
                .into(),
            canonical: Some(format!("{}{}", self.base_url, path)),
        }
    }
}

/// Title, description and canonical url of a page.
pub struct PageMeta {
    pub title: Option<String>,
    pub description: String,
    pub canonical: Option<String>,
}

impl PageMeta {
    pub fn error(title: &str) -> Self {
        PageMeta {
            title: Some(title.into()),
            description: APP_DESCRIPTION.into(),
            canonical: None,
        }
    }
    pub fn full_title(&self) -> String {
        match &self.title {
            Some(title) => format!("{title} | {APP_NAME}"),
            None => APP_NAME.into(),
        }
    }
}

type AppFilter = BoxedFilter<(App,)>;

/// Get or head - a filter matching GET and HEAD requests only.
fn goh() -> BoxedFilter<()> {
    use warp::{get, head};
    get().or(head()).unify().boxed()
}

pub fn routes(
    app: App,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let s: AppFilter = warp::any().map(move || app.clone()).boxed();
    let s = move || s.clone();
    use warp::{path, path::end, path::param, path::tail};
    warp::any()
        .and(path("s").and(tail()).and(goh()).then(static_file).map(wrap))
        .or(path("robots.txt")
            .and(end())
            .and(goh())
            .then(robots_txt)
            .map(wrap))
        .or(path("favicon.ico")
            .and(end())
            .and(goh())
            .then(favicon)
            .map(wrap))
        .or(end()
            .and(goh())
            .and(raw_query())
            .and(s())
            .then(organizations::list_organizations)
            .map(wrap))
        .or(param()
            .and(end())
            .and(goh())
            .and(raw_query())
            .and(s())
            .then(organizations::one_organization)
            .map(wrap))
        .or(param()
            .and(param())
            .and(end())
            .and(goh())
            .and(raw_query())
            .and(s())
            .then(repository::one_repository)
            .map(wrap))
        .recover(for_rejection)
}

/// The raw query string of a request, empty if there is none.
fn raw_query() -> BoxedFilter<(String,)> {
    use warp::query::raw;
    raw().or(warp::any().map(String::new)).unify().boxed()
}

type Result<T, E = ViewError> = std::result::Result<T, E>;

fn wrap(result: Result<impl Reply>) -> Response {
    match result {
        Ok(reply) => reply.into_response(),
        Err(err) => err.into_response(),
    }
}

/// Check that a path segment is a plausible GitHub login or
/// repository name, before asking GitHub about it.
fn valid_name(name: &str) -> bool {
    static NAME: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]{1,100}$").unwrap());
    name != "." && name != ".." && NAME.is_match(name)
}

/// Handler for static files.
/// Create a response from the file data with a correct content type
/// and a far expires header (or a 404 if the file does not exist).
async fn static_file(name: Tail) -> Result<impl Reply> {
    use crate::templates::statics::StaticFile;
    if let Some(data) = StaticFile::get(name.as_str()) {
        let far_expires = Utc::now() + Duration::days(180);
        Ok(Builder::new()
            .header(CONTENT_TYPE, data.mime.as_ref())
            .header(EXPIRES, far_expires.to_rfc2822())
            .body(data.content))
    } else {
        info!("Static file {:?} not found", name);
        Err(ViewError::NotFound)
    }
}

async fn robots_txt() -> Result<impl Reply> {
    Ok(Builder::new()
        .header(CONTENT_TYPE, TEXT_PLAIN.as_ref())
        .body("User-agent: *\nAllow: /\n"))
}

async fn favicon() -> Result<impl Reply> {
    use crate::templates::statics::logo_svg;
    redirect(&format!("/s/{}", logo_svg.name))
}

fn redirect(url: &str) -> Result<Response> {
    let msg = format!("Try {url:?}");
    Ok(Builder::new()
        .status(StatusCode::PERMANENT_REDIRECT)
        .header(LOCATION, url)
        .body(msg.into())
        .map_err(|e| {
            tracing::error!("Failed to build redirect: {e}");
            ViewError::Err("Bad redirect")
        })?)
}
