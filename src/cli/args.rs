use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use inspire::query::DEFAULT_ROOT;
use inspire::{BodyMode, QueryOptions};

/// Query inspirehep.net and build bibliographies from LaTeX citations
#[derive(Parser, Debug)]
#[command(name = "inspire", version)]
#[command(after_help = "\
Examples:
  inspire search 'f eprint 1905.00282'
  inspire publications 'Perry A' --style cv-latex
  inspire cite Perry:2019bqg --style latex-eu
  inspire bib paper.tex -o paper.bib
  inspire keys paper.tex --json")]
pub struct Cli {
    /// Response format requested from the service: xml, text or html
    #[arg(long, global = true, default_value = "html")]
    pub format: String,

    /// Search endpoint
    #[arg(long, global = true, env = "INSPIRE_ROOT", default_value = DEFAULT_ROOT)]
    pub root: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Free-text search (e.g. 'f eprint 1905.00282', 't quantum computing')
    Search {
        /// Search term; multiple words are joined with spaces
        #[arg(required = true)]
        term: Vec<String>,

        /// Publication style: cv-latex, cv-html, cv-text, bibtex, latex-eu, latex-us
        #[arg(short, long, default_value = "bibtex")]
        style: String,

        #[command(flatten)]
        query: QueryArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the publications of an author
    Publications {
        /// Author name, e.g. 'Perry A'
        #[arg(required = true)]
        name: Vec<String>,

        /// Publication style: cv-latex, cv-html, cv-text, bibtex, latex-eu, latex-us
        #[arg(short, long, default_value = "cv-latex")]
        style: String,

        /// Response rendering: raw, text or markdown
        #[arg(long, default_value = "text")]
        body: BodyMode,

        #[command(flatten)]
        query: QueryArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch a single record by its citation key
    Cite {
        /// Citation key, e.g. Perry:2019bqg
        key: String,

        /// Publication style: cv-latex, cv-html, cv-text, bibtex, latex-eu, latex-us
        #[arg(short, long, default_value = "bibtex")]
        style: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a bibliography for every key cited in a LaTeX file
    Bib {
        /// LaTeX source file
        tex: PathBuf,

        /// Publication style: cv-latex, cv-html, cv-text, bibtex, latex-eu, latex-us
        #[arg(short, long, default_value = "bibtex")]
        style: String,

        /// Output file, e.g. refs.bib (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the citation keys found in a LaTeX file
    Keys {
        /// LaTeX source file
        tex: PathBuf,

        /// Print a JSON document instead of one key per line
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// Sort field
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort order: a (ascending) or d (descending)
    #[arg(long)]
    pub order: Option<String>,

    /// Number of records to return
    #[arg(long)]
    pub count: Option<u32>,

    /// Offset of the first record
    #[arg(long)]
    pub start: Option<u32>,
}

impl From<QueryArgs> for QueryOptions {
    fn from(args: QueryArgs) -> Self {
        QueryOptions {
            sort: args.sort,
            order: args.order,
            count: args.count,
            start: args.start,
        }
    }
}
