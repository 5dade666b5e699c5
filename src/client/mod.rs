pub mod html;
pub mod transport;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

pub use html::BodyMode;
pub use transport::{HttpTransport, Transport, TransportError};

use crate::cite::{self, CitationSet};
use crate::query::{
    self, LookupError, OutputFormat, PublicationStyle, QueryOptions, DEFAULT_ROOT,
};

#[derive(Debug, thiserror::Error)]
pub enum InspireError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("cannot read {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub output_format: OutputFormat,
    /// Search endpoint, without the `?p=` query.
    pub root: String,
    /// Rendering of `publication_list` responses.
    pub publication_body: BodyMode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            root: DEFAULT_ROOT.to_string(),
            publication_body: BodyMode::default(),
        }
    }
}

/// Client for the inspirehep.net legacy search endpoint.
///
/// Owns the citation keys collected from LaTeX sources; one instance per
/// document, not shared across tasks.
pub struct InspireClient<T = HttpTransport> {
    transport: T,
    config: ClientConfig,
    citations: CitationSet,
}

impl InspireClient<HttpTransport> {
    pub fn new(config: ClientConfig) -> Result<Self, InspireError> {
        Ok(Self::with_transport(HttpTransport::new()?, config))
    }
}

impl<T: Transport> InspireClient<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            citations: CitationSet::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn citations(&self) -> &CitationSet {
        &self.citations
    }

    /// Replaces the collected keys wholesale. Duplicates are dropped.
    pub fn set_citations<S: AsRef<str>>(&mut self, keys: impl IntoIterator<Item = S>) {
        self.citations = keys.into_iter().collect();
    }

    /// Free-text search; returns the response body unchanged.
    pub async fn search(
        &self,
        term: &str,
        style: PublicationStyle,
        options: &QueryOptions,
    ) -> Result<String, InspireError> {
        let url = query::build_query(
            &self.config.root,
            term,
            self.config.output_format,
            style,
            options,
        );
        info!(term, %style, "search");
        Ok(self.transport.get(&url).await?)
    }

    /// All records authored by `name`, rendered per `publication_body`.
    pub async fn publication_list(
        &self,
        name: &str,
        style: PublicationStyle,
        options: &QueryOptions,
    ) -> Result<String, InspireError> {
        let url = query::build_query(
            &self.config.root,
            &query::author_term(name),
            self.config.output_format,
            style,
            options,
        );
        info!(name, %style, body = %self.config.publication_body, "publication list");
        let body = self.transport.get(&url).await?;
        Ok(html::render(body, self.config.publication_body))
    }

    /// One record addressed by its citation key, as plain text.
    pub async fn get_citation(
        &self,
        key: &str,
        style: PublicationStyle,
    ) -> Result<String, InspireError> {
        let url = query::build_query(
            &self.config.root,
            key,
            OutputFormat::Html,
            style,
            &QueryOptions::default(),
        );
        debug!(key, %style, "fetching citation");
        let body = self.transport.get(&url).await?;
        Ok(html::extract_text(&body))
    }

    /// Every collected key in order, concatenated. Stops at the first failure.
    pub async fn generate_bibliography(
        &self,
        style: PublicationStyle,
    ) -> Result<String, InspireError> {
        let mut bibliography = String::new();
        for key in &self.citations {
            bibliography.push_str(&self.get_citation(key, style).await?);
        }
        info!(keys = self.citations.len(), %style, "bibliography generated");
        Ok(bibliography)
    }

    /// Merges citation keys found in `text`. Returns how many were new.
    pub fn find_cite(&mut self, text: &str) -> usize {
        cite::find_cite(&mut self.citations, text)
    }

    pub fn load_citations_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, InspireError> {
        let path = path.as_ref();
        let not_found = |source| InspireError::NotFound {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(not_found)?;
        let added =
            cite::parse_document(&mut self.citations, BufReader::new(file)).map_err(not_found)?;

        info!(
            path = %path.display(),
            added,
            total = self.citations.len(),
            "citations loaded"
        );
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Write;

    use super::*;
    use crate::cite::SAMPLE_CITES;

    const TEST_STRING: &str = r#"@article{Perry:2019bqg,
      author         = "Perry, Anastasia and Sun, Ranbel and Hughes, Ciaran and
                        Isaacson, Joshua and Turner, Jessica",
      title          = "{Quantum Computing as a High School Module}",
      year           = "2019",
      eprint         = "1905.00282",
      archivePrefix  = "arXiv",
      primaryClass   = "physics.ed-ph",
      reportNumber   = "FERMILAB-FN-1077-T",
      SLACcitation   = "%%CITATION = ARXIV:1905.00282;%%"
}"#;

    /// Records every requested URL and answers with a fixed reply.
    struct RecordingTransport {
        calls: RefCell<Vec<String>>,
        reply: fn(&str) -> Result<String, TransportError>,
    }

    impl RecordingTransport {
        fn new(reply: fn(&str) -> Result<String, TransportError>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                reply,
            }
        }

        fn returning_test_string() -> Self {
            Self::new(|_| Ok(TEST_STRING.to_string()))
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Transport for RecordingTransport {
        async fn get(&self, url: &str) -> Result<String, TransportError> {
            self.calls.borrow_mut().push(url.to_string());
            (self.reply)(url)
        }
    }

    fn client(transport: RecordingTransport) -> InspireClient<RecordingTransport> {
        InspireClient::with_transport(transport, ClientConfig::default())
    }

    #[tokio::test]
    async fn search_returns_body_and_builds_query() {
        let c = client(RecordingTransport::returning_test_string());

        let result = c
            .search(
                "f eprint 1905.00282",
                PublicationStyle::Bibtex,
                &QueryOptions::default(),
            )
            .await
            .unwrap();

        assert_eq!(result, TEST_STRING);
        assert_eq!(
            c.transport.calls(),
            ["http://inspirehep.net/search?p=f+eprint+1905.00282&of=hx&em=B"]
        );
    }

    #[tokio::test]
    async fn search_uses_configured_format_and_options() {
        let config = ClientConfig {
            output_format: OutputFormat::Xml,
            ..Default::default()
        };
        let c = InspireClient::with_transport(RecordingTransport::returning_test_string(), config);
        let options = QueryOptions {
            sort: Some("year".into()),
            count: Some(5),
            ..Default::default()
        };

        c.search("t quantum", PublicationStyle::LatexEu, &options)
            .await
            .unwrap();

        assert_eq!(
            c.transport.calls(),
            ["http://inspirehep.net/search?p=t+quantum&of=xlxe&em=B&sf=year&rg=5"]
        );
    }

    #[tokio::test]
    async fn publication_list_queries_author() {
        let c = client(RecordingTransport::returning_test_string());

        let result = c
            .publication_list("foo bar", PublicationStyle::Bibtex, &QueryOptions::default())
            .await
            .unwrap();

        assert_eq!(result, TEST_STRING);
        assert_eq!(
            c.transport.calls(),
            ["http://inspirehep.net/search?p=f+a+foo+bar&of=hx&em=B"]
        );
    }

    #[tokio::test]
    async fn publication_list_raw_mode_keeps_markup() {
        let config = ClientConfig {
            publication_body: BodyMode::Raw,
            ..Default::default()
        };
        let c = InspireClient::with_transport(
            RecordingTransport::new(|_| Ok("<pre>entry</pre>".into())),
            config,
        );

        let result = c
            .publication_list("Foo", PublicationStyle::CvLatex, &QueryOptions::default())
            .await
            .unwrap();

        assert_eq!(result, "<pre>entry</pre>");
        assert_eq!(
            c.transport.calls(),
            ["http://inspirehep.net/search?p=f+a+foo&of=hlcv&em=B"]
        );
    }

    #[tokio::test]
    async fn publication_list_text_mode_strips_markup() {
        let c = client(RecordingTransport::new(|_| {
            Ok("<html><body><pre>entry</pre></body></html>".into())
        }));

        let result = c
            .publication_list("foo", PublicationStyle::CvText, &QueryOptions::default())
            .await
            .unwrap();

        assert_eq!(result, "entry");
    }

    #[tokio::test]
    async fn get_citation_addresses_key() {
        let c = client(RecordingTransport::returning_test_string());

        let result = c.get_citation("foo", PublicationStyle::Bibtex).await.unwrap();

        assert_eq!(result, TEST_STRING);
        assert_eq!(
            c.transport.calls(),
            ["http://inspirehep.net/search?p=foo&of=hx&em=B"]
        );
    }

    #[tokio::test]
    async fn get_citation_always_requests_html() {
        let config = ClientConfig {
            output_format: OutputFormat::Text,
            ..Default::default()
        };
        let c = InspireClient::with_transport(RecordingTransport::returning_test_string(), config);

        c.get_citation("Perry:2019bqg", PublicationStyle::LatexUs)
            .await
            .unwrap();

        assert_eq!(
            c.transport.calls(),
            ["http://inspirehep.net/search?p=Perry:2019bqg&of=hlxu&em=B"]
        );
    }

    #[tokio::test]
    async fn generate_bibliography_fetches_each_key_in_order() {
        let mut c = client(RecordingTransport::returning_test_string());
        c.set_citations(["key1", "key2"]);

        let result = c
            .generate_bibliography(PublicationStyle::Bibtex)
            .await
            .unwrap();

        assert_eq!(result, [TEST_STRING, TEST_STRING].concat());
        assert_eq!(
            c.transport.calls(),
            [
                "http://inspirehep.net/search?p=key1&of=hx&em=B",
                "http://inspirehep.net/search?p=key2&of=hx&em=B",
            ]
        );
    }

    #[tokio::test]
    async fn generate_bibliography_concatenates_without_separator() {
        let mut c = client(RecordingTransport::new(|url| {
            let key = url
                .split("?p=")
                .nth(1)
                .and_then(|rest| rest.split('&').next())
                .unwrap_or_default();
            Ok(format!("[{key}]"))
        }));
        c.set_citations(["b", "a", "b", "c"]);

        let result = c
            .generate_bibliography(PublicationStyle::LatexEu)
            .await
            .unwrap();

        assert_eq!(result, "[b][a][c]");
        assert_eq!(c.transport.calls().len(), 3);
    }

    #[tokio::test]
    async fn generate_bibliography_fails_fast() {
        let mut c = client(RecordingTransport::new(|url| {
            if url.contains("p=bad&") {
                Err(TransportError::Status(500))
            } else {
                Ok("ok".into())
            }
        }));
        c.set_citations(["good", "bad", "never"]);

        let err = c
            .generate_bibliography(PublicationStyle::Bibtex)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            InspireError::Transport(TransportError::Status(500))
        ));
        assert_eq!(c.transport.calls().len(), 2);
    }

    #[tokio::test]
    async fn generate_bibliography_with_no_keys_is_empty() {
        let c = client(RecordingTransport::returning_test_string());

        let result = c
            .generate_bibliography(PublicationStyle::Bibtex)
            .await
            .unwrap();

        assert!(result.is_empty());
        assert!(c.transport.calls().is_empty());
    }

    #[test]
    fn find_cite_accumulates_across_calls() {
        let mut c = client(RecordingTransport::returning_test_string());

        assert_eq!(c.find_cite(SAMPLE_CITES), 10);
        assert_eq!(c.find_cite(SAMPLE_CITES), 0);
        assert_eq!(c.find_cite(r"\cite{key11, key1}"), 1);
        assert_eq!(c.citations().len(), 11);
    }

    #[test]
    fn load_from_file_matches_direct_extraction() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CITES.as_bytes()).unwrap();

        let mut from_file = client(RecordingTransport::returning_test_string());
        let added = from_file.load_citations_from_file(file.path()).unwrap();

        let mut direct = client(RecordingTransport::returning_test_string());
        direct.find_cite(SAMPLE_CITES);

        assert_eq!(added, 10);
        assert_eq!(from_file.citations(), direct.citations());
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("latex_file.tex");
        let mut c = client(RecordingTransport::returning_test_string());

        let err = c.load_citations_from_file(&missing).unwrap_err();

        match err {
            InspireError::NotFound { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected NotFound, got: {other:?}"),
        }
        assert!(c.citations().is_empty());
    }

    #[test]
    fn set_citations_replaces_wholesale() {
        let mut c = client(RecordingTransport::returning_test_string());
        c.find_cite(r"\cite{old}");

        c.set_citations(["new1", "new2", "new1"]);

        assert_eq!(c.citations().as_slice(), ["new1", "new2"]);
    }
}
