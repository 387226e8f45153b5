use std::io;

use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run `{program}` for {host}: {source}")]
    Spawn {
        program: String,
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("probe task did not finish: {0}")]
    Task(#[from] JoinError),

    #[error("failed to draw results: {0}")]
    Render(#[from] io::Error),
}
