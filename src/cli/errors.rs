use std::io;
use std::path::PathBuf;

use inspire::{InspireError, LookupError, TransportError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Inspire(#[from] InspireError),

    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot encode keys as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<LookupError> for AppError {
    fn from(e: LookupError) -> Self {
        AppError::Inspire(e.into())
    }
}

impl AppError {
    /// Semantic exit codes: 2 lookup, 3 transport, 4 input file, 5 output.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Inspire(InspireError::Lookup(_)) => 2,
            AppError::Inspire(InspireError::Transport(_)) => 3,
            AppError::Inspire(InspireError::NotFound { .. }) => 4,
            AppError::Output { .. } | AppError::Json(_) => 5,
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            AppError::Inspire(InspireError::Lookup(_)) => {
                Some("run with --help to list the accepted values")
            }
            AppError::Inspire(InspireError::Transport(TransportError::Status(_))) => {
                Some("the service rejected the request; check the search term and --root")
            }
            AppError::Inspire(InspireError::Transport(
                TransportError::InvalidScheme | TransportError::InvalidUrl(_),
            )) => Some("--root must be an http(s) URL such as http://inspirehep.net/search"),
            AppError::Inspire(InspireError::NotFound { .. }) => {
                Some("verify the file path is correct")
            }
            _ => None,
        }
    }
}
