use super::query::Query;
use crate::templates::ToHtml;
use std::io::{self, Write};

/// GitHub search never delivers more than 1000 hits, so there is no
/// point in linking to pages far beyond that.
pub const MAX_PAGES: u32 = 80;
/// Number of consecutive page links around the current page.
const WINDOW: u32 = 3;

/// A previous or next link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub enabled: bool,
    pub target: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page { number: u32, active: bool },
    Ellipsis,
}

/// The page links to show for a current page of a listing.
#[derive(Debug, PartialEq, Eq)]
pub struct PaginationWindow {
    pub previous: Step,
    pub links: Vec<PageLink>,
    pub next: Step,
}

impl PaginationWindow {
    pub fn compute(page: u32, total_pages: u32) -> Self {
        let page = page.max(1);
        let total = total_pages.min(MAX_PAGES);
        let link = |number| PageLink::Page {
            number,
            active: number == page,
        };

        let mut links = Vec::with_capacity(WINDOW as usize + 4);
        if page > 2 && total > 3 {
            links.push(link(1));
        }
        if page > 3 && total > 4 {
            links.push(PageLink::Ellipsis);
        }
        let start = if page == total {
            page.saturating_sub(WINDOW - 1)
        } else if page > 1 {
            page - 1
        } else {
            page
        };
        links.extend(
            (start..start.saturating_add(WINDOW))
                .filter(|n| (1..=total).contains(n))
                .map(link),
        );
        if page.saturating_add(2) < total && total > 4 {
            links.push(PageLink::Ellipsis);
        }
        if page.saturating_add(1) < total && total > 3 {
            links.push(link(total));
        }

        PaginationWindow {
            previous: Step {
                enabled: page > 1,
                target: page - 1,
            },
            links,
            next: Step {
                enabled: page < total,
                target: page.saturating_add(1),
            },
        }
    }

    /// The page numbers linked, ignoring ellipses.
    #[cfg(test)]
    pub fn numbers(&self) -> Vec<u32> {
        self.links
            .iter()
            .filter_map(|link| match link {
                PageLink::Page { number, .. } => Some(*number),
                PageLink::Ellipsis => None,
            })
            .collect()
    }
}

/// Page links for a listing, keeping the filters of the current query.
#[derive(Debug)]
pub struct Paginator {
    window: PaginationWindow,
    path: String,
    query: Query,
}

impl Paginator {
    pub fn new(page: u32, total_pages: u32, path: &str, query: &Query) -> Self {
        Paginator {
            window: PaginationWindow::compute(page, total_pages),
            path: path.to_string(),
            query: query.clone(),
        }
    }
}

impl ToHtml for Paginator {
    fn to_html(&self, out: &mut dyn Write) -> io::Result<()> {
        let href = |p: u32| {
            let p = p.to_string();
            self.query.href(&self.path, &[("page", Some(p.as_str()))])
        };
        out.write_all(b"<nav class=\"pages\" aria-label=\"pagination\">")?;
        step(out, &self.window.previous, "prev", "‹ Previous", href)?;
        for link in &self.window.links {
            match *link {
                PageLink::Page { number, active } => {
                    out.write_all(b"<a href=\"")?;
                    href(number).to_html(out)?;
                    if active {
                        out.write_all(b"\" class=\"active\" aria-current=\"page")?;
                    }
                    write!(out, "\">{number}</a>")?;
                }
                PageLink::Ellipsis => {
                    out.write_all("<span class=\"ellipsis\">…</span>".as_bytes())?;
                }
            }
        }
        step(out, &self.window.next, "next", "Next ›", href)?;
        out.write_all(b"</nav>")
    }
}

/// Previous / next links for lists where the total size is unknown.
#[derive(Debug)]
pub struct PrevNext {
    page: u32,
    has_more: bool,
    path: String,
    query: Query,
}

impl PrevNext {
    pub fn new(page: u32, has_more: bool, path: &str, query: &Query) -> Self {
        PrevNext {
            page: page.max(1),
            has_more,
            path: path.to_string(),
            query: query.clone(),
        }
    }
}

impl ToHtml for PrevNext {
    fn to_html(&self, out: &mut dyn Write) -> io::Result<()> {
        let href = |p: u32| {
            let p = p.to_string();
            self.query.href(&self.path, &[("page", Some(p.as_str()))])
        };
        let previous = Step {
            enabled: self.page > 1,
            target: self.page - 1,
        };
        let next = Step {
            enabled: self.has_more,
            target: self.page.saturating_add(1),
        };
        out.write_all(b"<nav class=\"pages\" aria-label=\"pagination\">")?;
        step(out, &previous, "prev", "‹ Previous", href)?;
        step(out, &next, "next", "Next ›", href)?;
        out.write_all(b"</nav>")
    }
}

fn step(
    out: &mut dyn Write,
    step: &Step,
    rel: &str,
    label: &str,
    href: impl Fn(u32) -> String,
) -> io::Result<()> {
    if step.enabled {
        out.write_all(b"<a href=\"")?;
        href(step.target).to_html(out)?;
        write!(out, "\" rel=\"{rel}\">{label}</a>")
    } else {
        write!(out, "<span class=\"disabled\">{label}</span>")
    }
}
