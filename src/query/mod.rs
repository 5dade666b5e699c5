//! Query string construction for the legacy `search?p=` endpoint.

mod codes;

pub use codes::{LookupError, OutputFormat, PublicationStyle};

pub const DEFAULT_ROOT: &str = "http://inspirehep.net/search";

/// Prefix the service uses for an author filter (`f a <name>`).
const AUTHOR_FILTER: &str = "f+a+";

/// Optional search parameters. Each field is appended only when set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Sort field (`sf`).
    pub sort: Option<String>,
    /// Sort order (`so`), e.g. `a` or `d`.
    pub order: Option<String>,
    /// Number of records (`rg`).
    pub count: Option<u32>,
    /// Offset of the first record (`jec`).
    pub start: Option<u32>,
}

impl QueryOptions {
    /// Render as `&sf=..&so=..&rg=..&jec=..`, always in that order.
    pub fn to_query_suffix(&self) -> String {
        let mut out = String::new();
        if let Some(sort) = &self.sort {
            out.push_str(&format!("&sf={sort}"));
        }
        if let Some(order) = &self.order {
            out.push_str(&format!("&so={order}"));
        }
        if let Some(count) = self.count {
            out.push_str(&format!("&rg={count}"));
        }
        if let Some(start) = self.start {
            out.push_str(&format!("&jec={start}"));
        }
        out
    }
}

/// Service word separator: spaces become `+`.
pub fn plus_encode(term: &str) -> String {
    term.replace(' ', "+")
}

/// Search term selecting every record by `name` as author.
pub fn author_term(name: &str) -> String {
    format!("{AUTHOR_FILTER}{}", plus_encode(name).to_lowercase())
}

pub fn build_query(
    root: &str,
    search_term: &str,
    format: OutputFormat,
    style: PublicationStyle,
    options: &QueryOptions,
) -> String {
    format!(
        "{root}?p={}&of={}{}&em=B{}",
        plus_encode(search_term),
        format.code(),
        style.code(),
        options.to_query_suffix()
    )
}
