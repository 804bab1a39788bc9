use super::filter::{FilterState, ORGANIZATIONS, REPOSITORIES};
use super::query::Query;
use super::{App, FilterMenu, Paginator, Result, ViewError, valid_name};
use crate::templates::{RenderRucte, organization_html, organizations_html};
use tracing::{debug, instrument, warn};
use warp::http::response::Builder;
use warp::reply::Response;

/// The front page; a searchable list of organizations.
#[instrument(skip(app))]
pub async fn list_organizations(
    query: String,
    app: App,
) -> Result<Response> {
    let query = Query::parse(&query);
    let filter = FilterState::from_query(&query, &ORGANIZATIONS);
    let text = filter.search_text("type:org");
    let search = filter.search(&text);
    let found = app.github.search_organizations(&search).await?;
    debug!("Found {} organizations", found.total_count);
    if found.incomplete_results {
        warn!("Organization search for {text:?} timed out, showing partial result");
    }

    let pages = Paginator::new(
        filter.page,
        found.total_pages(filter.per_page),
        "/",
        &query,
    );
    let menu = FilterMenu {
        path: "/",
        query: &query,
        filter: &filter,
        listing: &ORGANIZATIONS,
    };
    let meta = app.meta(None, None, "/");
    Ok(Builder::new()
        .html(|o| organizations_html(o, &meta, &menu, &found.items, &pages))?)
}

/// An organization profile with a searchable list of its repositories.
#[instrument(skip(app))]
pub async fn one_organization(
    org: String,
    query: String,
    app: App,
) -> Result<Response> {
    if !valid_name(&org) {
        return Err(ViewError::NotFound);
    }
    let query = Query::parse(&query);
    let filter = FilterState::from_query(&query, &REPOSITORIES);
    let text = filter.search_text(&format!("org:{org}"));
    let search = filter.search(&text);
    let (organization, repos) = tokio::try_join!(
        app.github.organization(&org),
        app.github.search_repositories(&search),
    )?;

    let path = format!("/{org}");
    let pages = Paginator::new(
        filter.page,
        repos.total_pages(filter.per_page),
        &path,
        &query,
    );
    let menu = FilterMenu {
        path: &path,
        query: &query,
        filter: &filter,
        listing: &REPOSITORIES,
    };
    let meta = app.meta(
        Some(&organization.login),
        organization.description.as_deref(),
        &format!("/{}", organization.login),
    );
    Ok(Builder::new().html(|o| {
        organization_html(o, &meta, &organization, &menu, &repos.items, &pages)
    })?)
}
