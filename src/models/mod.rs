//! Data as delivered by the GitHub REST API.
//!
//! Only the fields actually shown by the views are deserialized.
use serde::Deserialize;

mod commit;
mod contributor;
mod organization;
mod repository;

pub use self::commit::{Commit, CommitPage};
pub use self::contributor::Contributor;
pub use self::organization::{OrgSummary, Organization};
pub use self::repository::Repository;

/// The envelope of a GitHub search response.
#[derive(Debug, Deserialize)]
pub struct SearchResult<T> {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<T>,
}

impl<T> SearchResult<T> {
    /// Number of pages needed to show all hits, `per_page` at a time.
    pub fn total_pages(&self, per_page: u32) -> u32 {
        let per_page = u64::from(per_page.max(1));
        u32::try_from(self.total_count.div_ceil(per_page)).unwrap_or(u32::MAX)
    }
}

/// A readme file, as returned by the contents api.
#[derive(Debug, Deserialize)]
pub struct Readme {
    pub name: String,
    pub content: String,
    pub encoding: String,
}

#[cfg(test)]
mod test {
    use super::{OrgSummary, SearchResult};

    #[test]
    fn total_pages() {
        let result = SearchResult::<OrgSummary> {
            total_count: 25,
            incomplete_results: false,
            items: vec![],
        };
        assert_eq!(result.total_pages(12), 3);
        assert_eq!(result.total_pages(25), 1);
        assert_eq!(result.total_pages(0), 25);
    }

    #[test]
    fn total_pages_empty() {
        let result = SearchResult::<OrgSummary> {
            total_count: 0,
            incomplete_results: false,
            items: vec![],
        };
        assert_eq!(result.total_pages(12), 0);
    }

    #[test]
    fn parse_search_result() {
        let data = r#"{
            "total_count": 2,
            "incomplete_results": false,
            "items": [
                {"login": "rust-lang", "id": 5430905, "avatar_url": "https://avatars.githubusercontent.com/u/5430905?v=4", "type": "Organization"},
                {"login": "tokio-rs", "id": 20248544, "avatar_url": "https://avatars.githubusercontent.com/u/20248544?v=4", "type": "Organization"}
            ]
        }"#;
        let result: SearchResult<OrgSummary> =
            serde_json::from_str(data).unwrap();
        assert_eq!(result.total_count, 2);
        assert_eq!(result.items[1].login, "tokio-rs");
        assert_eq!(result.items[0].initial(), "R");
    }
}
