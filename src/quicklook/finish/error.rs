use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinishError {
    #[error("Failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} exited with status {code:?}: {stderr}")]
    Failed {
        step: &'static str,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Cannot derive a finished name from {0}")]
    InvalidPath(String),
}
