//! Canonical query strings for links between listing pages.
use std::collections::BTreeMap;

const PAGE: &str = "page";

/// The query parameters of a request.
///
/// Empty values are never stored, and keys are kept sorted, so the
/// query string produced for a given set of parameters is stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(BTreeMap<String, String>);

impl Query {
    /// Collect query pairs, as delivered by warp.
    ///
    /// If a key is repeated, the last value wins.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut query = Query::default();
        for (key, value) in pairs {
            query.set(key.into(), Some(value.into()));
        }
        query
    }

    /// Parse a raw (url encoded) query string.
    pub fn parse(raw: &str) -> Self {
        Query::from_pairs(
            raw.split('&')
                .filter(|part| !part.is_empty())
                .map(|part| part.split_once('=').unwrap_or((part, "")))
                .map(|(k, v)| (decode(k), decode(v))),
        )
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn set(&mut self, key: String, value: Option<String>) {
        match value {
            Some(value) if !value.is_empty() => {
                self.0.insert(key, value);
            }
            _ => {
                self.0.remove(&key);
            }
        }
    }

    /// Apply `changes` to this query and return the result.
    ///
    /// A change to `None` or an empty value removes the key.
    /// Changing anything but the page resets the page (to the first),
    /// unless the changes also give a new page.
    pub fn with(&self, changes: &[(&str, Option<&str>)]) -> Query {
        let mut result = self.clone();
        if changes.iter().any(|(key, _)| *key != PAGE) {
            result.0.remove(PAGE);
        }
        for (key, value) in changes {
            result.set((*key).to_string(), value.map(str::to_string));
        }
        result
    }

    /// Get the query string resulting from applying `changes`.
    pub fn reconcile(&self, changes: &[(&str, Option<&str>)]) -> String {
        self.with(changes).to_string()
    }

    /// A link to `path` with `changes` applied to this query.
    pub fn href(&self, path: &str, changes: &[(&str, Option<&str>)]) -> String {
        let query = self.reconcile(changes);
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{query}")
        }
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, out: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                out.write_str("&")?;
            }
            write!(
                out,
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value),
            )?;
        }
        Ok(())
    }
}

fn decode(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    match urlencoding::decode(&raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw,
    }
}

#[cfg(test)]
mod test {
    use super::Query;

    fn query(pairs: &[(&str, &str)]) -> Query {
        Query::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn sort_change_resets_page() {
        let current = query(&[("q", "foo"), ("page", "3")]);
        assert_eq!(current.reconcile(&[("sort", Some("stars"))]), "q=foo&sort=stars");
    }

    #[test]
    fn page_change_keeps_filters() {
        let current = query(&[("q", "foo"), ("sort", "forks"), ("page", "3")]);
        assert_eq!(
            current.reconcile(&[("page", Some("4"))]),
            "page=4&q=foo&sort=forks",
        );
    }

    #[test]
    fn page_replaced() {
        assert_eq!(
            query(&[("page", "2")]).reconcile(&[("page", Some("5"))]),
            "page=5",
        );
    }

    #[test]
    fn explicit_page_survives_other_changes() {
        let current = query(&[("order", "asc"), ("page", "2")]);
        assert_eq!(
            current.reconcile(&[("order", Some("desc")), ("page", Some("7"))]),
            "order=desc&page=7",
        );
    }

    #[test]
    fn empty_and_none_values_dropped() {
        let current = query(&[("q", ""), ("sort", "stars"), ("order", "asc")]);
        assert_eq!(
            current.reconcile(&[("sort", None), ("per_page", Some(""))]),
            "order=asc",
        );
    }

    #[test]
    fn nothing_left() {
        assert_eq!(query(&[]).reconcile(&[("q", Some(""))]), "");
        assert_eq!(query(&[("q", "x")]).href("/rust-lang", &[("q", None)]), "/rust-lang");
    }

    #[test]
    fn href() {
        let current = query(&[("q", "web server")]);
        assert_eq!(
            current.href("/tokio-rs", &[("page", Some("2"))]),
            "/tokio-rs?page=2&q=web%20server",
        );
    }

    #[test]
    fn last_value_wins() {
        let current = query(&[("page", "2"), ("page", "9")]);
        assert_eq!(current.get("page"), Some("9"));
    }

    #[test]
    fn encoding_round_trips() {
        let current = query(&[("q", "a&b=c d+e/ö")]);
        let encoded = current.to_string();
        assert_eq!(encoded, "q=a%26b%3Dc%20d%2Be%2F%C3%B6");
        assert_eq!(Query::parse(&encoded), current);
    }

    #[test]
    fn parse_form_encoding() {
        let parsed = Query::parse("q=hello+world&sort=&page=2&flag");
        assert_eq!(parsed.get("q"), Some("hello world"));
        assert_eq!(parsed.get("sort"), None);
        assert_eq!(parsed.get("flag"), None);
        assert_eq!(parsed.get("page"), Some("2"));
    }

    #[test]
    fn reconcile_is_idempotent() {
        let current = query(&[("q", "foo"), ("order", "asc"), ("page", "3")]);
        let changes = [("sort", Some("updated"))];
        let once = current.reconcile(&changes);
        let twice = Query::parse(&once).reconcile(&changes);
        assert_eq!(once, twice);

        let changes = [("page", Some("4"))];
        let once = current.reconcile(&changes);
        let twice = Query::parse(&once).reconcile(&changes);
        assert_eq!(once, twice);
    }
}
