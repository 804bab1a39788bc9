//! The search, sort and order parameters of a listing.
use super::query::Query;
use crate::github::Search;
use crate::templates::ToHtml;
use std::io::{self, Write};

/// Page size used when the query does not say otherwise.
pub const DEFAULT_PER_PAGE: u32 = 12;
/// GitHub does not deliver more than this many hits per page.
pub const MAX_PER_PAGE: u32 = 100;

/// A kind of listing, with the sort orders GitHub supports for it.
#[derive(Debug)]
pub struct Listing {
    pub sort_options: &'static [&'static str],
    pub placeholder: &'static str,
}

pub const ORGANIZATIONS: Listing = Listing {
    sort_options: &["followers", "repositories", "joined"],
    placeholder: "Search organizations",
};

pub const REPOSITORIES: Listing = Listing {
    sort_options: &["stars", "forks", "help-wanted-issues", "updated"],
    placeholder: "Search repositories",
};

impl Listing {
    fn default_sort(&self) -> &'static str {
        self.sort_options[0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Asc => "asc",
            Order::Desc => "desc",
        }
    }
    fn label(self) -> &'static str {
        match self {
            Order::Asc => "Ascending",
            Order::Desc => "Descending",
        }
    }
}

/// The filter state of a listing, with defaults applied.
#[derive(Debug, PartialEq, Eq)]
pub struct FilterState {
    pub q: String,
    pub sort: &'static str,
    pub order: Order,
    pub per_page: u32,
    pub page: u32,
}

impl FilterState {
    /// Read the filter from a query, falling back to defaults for
    /// anything missing or malformed.
    pub fn from_query(query: &Query, listing: &Listing) -> Self {
        let sort = query
            .get("sort")
            .and_then(|s| listing.sort_options.iter().find(|o| **o == s))
            .copied()
            .unwrap_or_else(|| listing.default_sort());
        let order = match query.get("order") {
            Some("asc") => Order::Asc,
            _ => Order::Desc,
        };
        let per_page = positive(query.get("per_page"))
            .unwrap_or(DEFAULT_PER_PAGE)
            .min(MAX_PER_PAGE);
        FilterState {
            q: query.get("q").unwrap_or("").trim().to_string(),
            sort,
            order,
            per_page,
            page: page(query),
        }
    }

    /// The full GitHub search string; the user query with `qualifier`
    /// added.
    pub fn search_text(&self, qualifier: &str) -> String {
        if self.q.is_empty() {
            qualifier.to_string()
        } else {
            format!("{} {}", self.q, qualifier)
        }
    }

    pub fn search<'a>(&'a self, text: &'a str) -> Search<'a> {
        Search {
            q: text,
            sort: self.sort,
            order: self.order.as_str(),
            per_page: self.per_page,
            page: self.page,
        }
    }
}

/// The current page number of a query, one-based.
pub fn page(query: &Query) -> u32 {
    positive(query.get("page")).unwrap_or(1)
}

fn positive(value: Option<&str>) -> Option<u32> {
    value?.trim().parse().ok().filter(|n| *n > 0)
}

/// The search form and sort / order links for a listing.
pub struct FilterMenu<'a> {
    pub path: &'a str,
    pub query: &'a Query,
    pub filter: &'a FilterState,
    pub listing: &'a Listing,
}

impl ToHtml for FilterMenu<'_> {
    fn to_html(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"<form class=\"filter\" method=\"get\" action=\"")?;
        self.path.to_html(out)?;
        out.write_all(b"\"><input type=\"search\" name=\"q\" placeholder=\"")?;
        self.listing.placeholder.to_html(out)?;
        out.write_all(b"\" value=\"")?;
        self.filter.q.to_html(out)?;
        out.write_all(b"\">")?;
        // Keep the other filters, but not the page, on a new search.
        for key in ["sort", "order", "per_page"] {
            if let Some(value) = self.query.get(key) {
                write!(out, "<input type=\"hidden\" name=\"{key}\" value=\"")?;
                value.to_html(out)?;
                out.write_all(b"\">")?;
            }
        }
        out.write_all(b"<button type=\"submit\">Search</button></form>")?;

        out.write_all(b"<p class=\"sort\"><span>Sort by</span>")?;
        for option in self.listing.sort_options {
            self.choice(out, "sort", option, option, *option == self.filter.sort)?;
        }
        out.write_all(b"<span>Order by</span>")?;
        for order in [Order::Desc, Order::Asc] {
            self.choice(
                out,
                "order",
                order.as_str(),
                order.label(),
                order == self.filter.order,
            )?;
        }
        out.write_all(b"</p>")
    }
}

impl FilterMenu<'_> {
    fn choice(
        &self,
        out: &mut dyn Write,
        key: &str,
        value: &str,
        label: &str,
        current: bool,
    ) -> io::Result<()> {
        if current {
            out.write_all(b"<b>")?;
            label.to_html(out)?;
            out.write_all(b"</b>")
        } else {
            out.write_all(b"<a href=\"")?;
            self.query.href(self.path, &[(key, Some(value))]).to_html(out)?;
            out.write_all(b"\">")?;
            label.to_html(out)?;
            out.write_all(b"</a>")
        }
    }
}
