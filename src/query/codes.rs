use std::fmt;
use std::str::FromStr;

/// Unknown key at the boundary where user strings become table entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("unknown output format '{0}' (expected one of: xml, text, html)")]
    OutputFormat(String),

    #[error(
        "unknown publication style '{0}' (expected one of: cv-latex, cv-html, cv-text, bibtex, latex-eu, latex-us)"
    )]
    PublicationStyle(String),
}

/// Wire-level response flavor requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Xml,
    Text,
    #[default]
    Html,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Xml, OutputFormat::Text, OutputFormat::Html];

    pub fn code(self) -> &'static str {
        match self {
            OutputFormat::Xml => "x",
            OutputFormat::Text => "t",
            OutputFormat::Html => "h",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Text => "text",
            OutputFormat::Html => "html",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| LookupError::OutputFormat(s.to_string()))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bibliographic rendering style of the returned records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PublicationStyle {
    CvLatex,
    CvHtml,
    CvText,
    #[default]
    Bibtex,
    LatexEu,
    LatexUs,
}

impl PublicationStyle {
    pub const ALL: [PublicationStyle; 6] = [
        PublicationStyle::CvLatex,
        PublicationStyle::CvHtml,
        PublicationStyle::CvText,
        PublicationStyle::Bibtex,
        PublicationStyle::LatexEu,
        PublicationStyle::LatexUs,
    ];

    pub fn code(self) -> &'static str {
        match self {
            PublicationStyle::CvLatex => "lcv",
            PublicationStyle::CvHtml => "cv",
            PublicationStyle::CvText => "tcv",
            PublicationStyle::Bibtex => "x",
            PublicationStyle::LatexEu => "lxe",
            PublicationStyle::LatexUs => "lxu",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PublicationStyle::CvLatex => "cv-latex",
            PublicationStyle::CvHtml => "cv-html",
            PublicationStyle::CvText => "cv-text",
            PublicationStyle::Bibtex => "bibtex",
            PublicationStyle::LatexEu => "latex-eu",
            PublicationStyle::LatexUs => "latex-us",
        }
    }
}

impl FromStr for PublicationStyle {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| LookupError::PublicationStyle(s.to_string()))
    }
}

impl fmt::Display for PublicationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
