use thiserror::Error;

#[derive(Debug, Error)]
pub enum LandingError {
    #[error("sequencer needs at least one item")]
    EmptyList,

    #[error("invalid timing: {0}")]
    InvalidTiming(String),

    #[error("failed to parse config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LandingError>;
