//! Client for the inspirehep.net search endpoint, plus citation-key
//! extraction for building bibliographies from LaTeX sources.

pub mod cite;
pub mod client;
pub mod query;

pub use cite::CitationSet;
pub use client::{BodyMode, ClientConfig, InspireClient, InspireError, Transport, TransportError};
pub use query::{LookupError, OutputFormat, PublicationStyle, QueryOptions};

pub const USER_AGENT: &str = concat!("inspire/", env!("CARGO_PKG_VERSION"));
