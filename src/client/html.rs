use std::fmt;
use std::str::FromStr;

use scraper::Html;

/// How a response body is handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyMode {
    /// Response text unchanged.
    Raw,
    /// Markup stripped, text nodes concatenated.
    #[default]
    Text,
    /// Markup converted to Markdown.
    Markdown,
}

impl FromStr for BodyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "raw" => Ok(BodyMode::Raw),
            "text" => Ok(BodyMode::Text),
            "markdown" => Ok(BodyMode::Markdown),
            other => Err(format!(
                "unknown body mode '{other}' (expected one of: raw, text, markdown)"
            )),
        }
    }
}

impl fmt::Display for BodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BodyMode::Raw => "raw",
            BodyMode::Text => "text",
            BodyMode::Markdown => "markdown",
        })
    }
}

pub(super) fn render(body: String, mode: BodyMode) -> String {
    match mode {
        BodyMode::Raw => body,
        BodyMode::Text => extract_text(&body),
        BodyMode::Markdown => html2md::rewrite_html(&body, false),
    }
}

/// Text content of the whole document, in document order.
pub(super) fn extract_text(html: &str) -> String {
    Html::parse_document(html).root_element().text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BIBTEX_PAGE: &str = "<html><head><title>Record</title></head>\
<body><pre>@article{Perry:2019bqg,\n  eprint = \"1905.00282\"\n}</pre></body></html>";

    #[test]
    fn text_mode_strips_markup() {
        let text = extract_text(BIBTEX_PAGE);

        assert_eq!(
            text,
            "Record@article{Perry:2019bqg,\n  eprint = \"1905.00282\"\n}"
        );
    }

    #[test]
    fn text_mode_keeps_plain_text() {
        let plain = "@article{foo,\n  title = \"{Bar}\"\n}";
        assert_eq!(extract_text(plain), plain);
    }

    #[test]
    fn text_mode_decodes_entities() {
        assert_eq!(extract_text("<p>A &amp; B</p>"), "A & B");
    }

    #[test]
    fn raw_mode_is_passthrough() {
        assert_eq!(render(BIBTEX_PAGE.to_string(), BodyMode::Raw), BIBTEX_PAGE);
    }

    #[test]
    fn markdown_mode_converts_markup() {
        let md = render(
            "<html><body><p>Hello <b>world</b></p></body></html>".to_string(),
            BodyMode::Markdown,
        );

        assert!(md.contains("world"), "got: {md}");
        assert!(!md.contains("<b>"), "got: {md}");
    }

    #[test]
    fn body_mode_parses_names() {
        assert_eq!("raw".parse::<BodyMode>(), Ok(BodyMode::Raw));
        assert_eq!("markdown".parse::<BodyMode>(), Ok(BodyMode::Markdown));
        assert!("pdf".parse::<BodyMode>().is_err());
        assert_eq!(BodyMode::default().to_string(), "text");
    }
}
