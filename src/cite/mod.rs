//! Citation-key extraction from LaTeX sources.

mod set;

pub use set::CitationSet;

use std::io::{self, Read};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// `\cite`, `\citet*`, `\citeauthor`, ... immediately followed by `{keys}`.
static CITE_COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\cite[a-zA-Z]*\*?\{([^}]+)\}").expect("valid cite regex"));

/// Splits a brace argument into trimmed, non-empty keys.
fn split_keys(arg: &str) -> impl Iterator<Item = &str> {
    arg.split(',').map(str::trim).filter(|k| !k.is_empty())
}

/// Merges every key cited in `text` into `set`. Returns how many were new.
pub fn find_cite(set: &mut CitationSet, text: &str) -> usize {
    let mut added = 0;
    for caps in CITE_COMMAND.captures_iter(text) {
        for key in split_keys(&caps[1]) {
            if set.insert(key) {
                added += 1;
            }
        }
    }
    added
}

/// Reads a whole document and merges its citations into `set`.
pub fn parse_document(set: &mut CitationSet, mut reader: impl Read) -> io::Result<usize> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let added = find_cite(set, &text);
    debug!(bytes = text.len(), added, total = set.len(), "document scanned");
    Ok(added)
}

#[cfg(test)]
pub(crate) const SAMPLE_CITES: &str = r"\cite{key1} \citet{key2} \citep{key3} \citet*{key4}
                \citep*{key5} \citeauthor{key6} \citeyear{key7}
                \cite{key8, key9, key10, key1, key2} ";
