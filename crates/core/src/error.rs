use thiserror::Error;

/// Top-level error type shared by every crate in the workspace.
#[derive(Debug, Error)]
pub enum HudError {
    #[error("config error: {0}")]
    Config(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = HudError> = std::result::Result<T, E>;
