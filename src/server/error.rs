use super::PageMeta;
use crate::github;
use crate::templates::{RenderError, RenderRucte, error_html, notfound_html};
use tracing::{error, warn};
use warp::http::response::Builder;
use warp::http::status::StatusCode;
use warp::reply::Response;
use warp::{self, Rejection, Reply};

#[derive(Debug)]
pub enum ViewError {
    /// 404
    NotFound,
    /// 503
    ServiceUnavailable,
    /// 500
    Err(&'static str),
}

impl Reply for ViewError {
    fn into_response(self) -> Response {
        match self {
            ViewError::NotFound => {
                let code = StatusCode::NOT_FOUND;
                let meta = PageMeta::error("Not Found");
                Builder::new()
                    .status(code)
                    .html(|o| notfound_html(o, &meta, code))
                    .unwrap_or_else(|e| fallback(code, e))
            }
            ViewError::ServiceUnavailable => error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "GitHub needs a break",
                "We have asked GitHub too many questions for now. \
                 Please try again in a little while.",
            ),
            ViewError::Err(msg) => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                msg,
                "Something went wrong. \
                 The problem has been noted in the server log. \
                 Maybe try again in a moment, or go back to the \
                 <a href='/'>front page</a>?",
            ),
        }
    }
}

fn error_response(code: StatusCode, message: &str, detail: &str) -> Response {
    let meta = PageMeta::error(message);
    Builder::new()
        .status(code)
        .html(|o| error_html(o, &meta, code, message, detail))
        .unwrap_or_else(|e| fallback(code, e))
}

/// A plain response for when even the error page fails to render.
fn fallback(code: StatusCode, err: RenderError) -> Response {
    error!("Failed to render error page: {err}");
    let mut response = Response::new(code.to_string().into());
    *response.status_mut() = code;
    response
}

impl From<RenderError> for ViewError {
    fn from(e: RenderError) -> Self {
        error!("Rendering error: {}\n    {:?}", e, e);
        ViewError::Err("Rendering failed")
    }
}

impl From<github::Error> for ViewError {
    fn from(e: github::Error) -> Self {
        match e {
            github::Error::NotFound => ViewError::NotFound,
            github::Error::Unprocessable(msg) => {
                warn!("GitHub could not process request: {msg}");
                ViewError::NotFound
            }
            github::Error::RateLimited => {
                warn!("GitHub rate limit exceeded");
                ViewError::ServiceUnavailable
            }
            e => {
                error!("GitHub error: {}\n    {:?}", e, e);
                ViewError::Err("Failed to talk to GitHub")
            }
        }
    }
}

/// Create custom errors for warp rejections.
///
/// Currently only handles 404, as there is no way of getting any
/// details out of the other build-in rejections in warp.
pub async fn for_rejection(err: Rejection) -> Result<Response, Rejection> {
    if err.is_not_found() {
        Ok(ViewError::NotFound.into_response())
    } else {
        Err(err)
    }
}

#[cfg(test)]
mod test {
    use super::ViewError;
    use crate::github;
    use warp::Reply;
    use warp::http::StatusCode;

    #[test]
    fn github_not_found() {
        let response = ViewError::from(github::Error::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn github_beyond_search_window() {
        let err = github::Error::Unprocessable(
            "Only the first 1000 search results are available".into(),
        );
        let response = ViewError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn github_rate_limited() {
        let response = ViewError::from(github::Error::RateLimited).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn github_failure() {
        let err = github::Error::BadContent("garbage".into());
        let response = ViewError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
