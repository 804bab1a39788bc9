use super::filter::page;
use super::query::Query;
use super::readme::{SafeHtml, raw_base, readme_text, rewrite_relative_links};
use super::{App, PrevNext, Result, ViewError, valid_name};
use crate::github::{self, Github};
use crate::models::{CommitPage, Readme, Repository};
use crate::templates::{RenderRucte, repository_html};
use tracing::{instrument, warn};
use warp::http::response::Builder;
use warp::reply::Response;

/// A repository with its latest commits, readme and contributors.
///
/// Only the repository itself is required, if any of the other
/// parts fails the page is shown without it.
#[instrument(skip(app))]
pub async fn one_repository(
    owner: String,
    name: String,
    query: String,
    app: App,
) -> Result<Response> {
    if !valid_name(&owner) || !valid_name(&name) {
        return Err(ViewError::NotFound);
    }
    let query = Query::parse(&query);
    let page = page(&query);
    let gh = &app.github;
    let (repo, contributors, commits, readme) = tokio::join!(
        gh.repository(&owner, &name),
        gh.contributors(&owner, &name),
        gh.commits(&owner, &name, page),
        gh.readme(&owner, &name),
    );
    let repo = repo?;
    let contributors = contributors.unwrap_or_else(|e| {
        warn!("No contributors for {}: {e}", repo.full_name);
        vec![]
    });
    let commits = commits.unwrap_or_else(|e| {
        warn!("No commits for {}: {e}", repo.full_name);
        CommitPage::default()
    });
    let readme = match readme {
        Ok(readme) => render_readme(gh, &repo, &readme).await,
        Err(github::Error::NotFound) => None,
        Err(e) => {
            warn!("No readme for {}: {e}", repo.full_name);
            None
        }
    };

    let path = format!("/{owner}/{name}");
    let commit_pages = PrevNext::new(page, commits.has_more, &path, &query);
    let meta = app.meta(
        Some(&repo.full_name),
        repo.description.as_deref(),
        &format!("/{}", repo.full_name),
    );
    let readme = readme.as_deref().map(SafeHtml::parse);
    Ok(Builder::new().html(|o| {
        repository_html(
            o,
            &meta,
            &repo,
            &commits.commits,
            &commit_pages,
            readme.as_ref(),
            &contributors,
        )
    })?)
}

/// Render a readme to html, with links relative to the repository
/// made absolute.
///
/// The result is not yet sanitized.
async fn render_readme(
    gh: &Github,
    repo: &Repository,
    readme: &Readme,
) -> Option<String> {
    let rendered = match readme_text(readme) {
        Ok(text) => {
            gh.render_markdown(&text, &repo.owner.login, &repo.name).await
        }
        Err(e) => Err(e),
    };
    match rendered {
        Ok(html) => {
            let base =
                raw_base(&repo.owner.login, &repo.name, &repo.default_branch);
            Some(rewrite_relative_links(&html, &base))
        }
        Err(e) => {
            warn!("Failed to render readme of {}: {e}", repo.full_name);
            None
        }
    }
}
