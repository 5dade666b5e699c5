mod args;
mod errors;

pub use args::Cli;
pub use errors::AppError;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use args::Command;
use inspire::{ClientConfig, InspireClient, OutputFormat, PublicationStyle};

#[derive(Serialize)]
struct KeysReport<'a> {
    source: String,
    keys: &'a [String],
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    let output_format: OutputFormat = cli.format.parse()?;
    let mut config = ClientConfig {
        output_format,
        root: cli.root,
        ..Default::default()
    };

    match cli.command {
        Command::Search {
            term,
            style,
            query,
            output,
        } => {
            let style: PublicationStyle = style.parse()?;
            let client = InspireClient::new(config)?;
            let body = client
                .search(&term.join(" "), style, &query.into())
                .await?;
            emit(&body, output.as_deref())
        }
        Command::Publications {
            name,
            style,
            body,
            query,
            output,
        } => {
            let style: PublicationStyle = style.parse()?;
            config.publication_body = body;
            let client = InspireClient::new(config)?;
            let list = client
                .publication_list(&name.join(" "), style, &query.into())
                .await?;
            emit(&list, output.as_deref())
        }
        Command::Cite { key, style, output } => {
            let style: PublicationStyle = style.parse()?;
            let client = InspireClient::new(config)?;
            let entry = client.get_citation(&key, style).await?;
            emit(&entry, output.as_deref())
        }
        Command::Bib { tex, style, output } => {
            let style: PublicationStyle = style.parse()?;
            let mut client = InspireClient::new(config)?;
            client.load_citations_from_file(&tex)?;
            if client.citations().is_empty() {
                warn!(path = %tex.display(), "no citation commands found");
            }
            let bibliography = client.generate_bibliography(style).await?;
            info!(keys = client.citations().len(), "bibliography complete");
            emit(&bibliography, output.as_deref())
        }
        Command::Keys { tex, json } => {
            let mut client = InspireClient::new(config)?;
            client.load_citations_from_file(&tex)?;
            let keys = client.citations().as_slice();
            let text = if json {
                let report = KeysReport {
                    source: tex.display().to_string(),
                    keys,
                };
                serde_json::to_string_pretty(&report)? + "\n"
            } else {
                keys.iter().map(|k| format!("{k}\n")).collect()
            };
            emit(&text, None)
        }
    }
}

/// Writes `text` to `output`, or stdout when no file is given.
fn emit(text: &str, output: Option<&Path>) -> Result<(), AppError> {
    match output {
        Some(path) => fs::write(path, text).map_err(|source| AppError::Output {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| AppError::Output {
                    path: PathBuf::from("<stdout>"),
                    source,
                })
        }
    }
}
