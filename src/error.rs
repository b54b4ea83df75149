use thiserror::Error;

#[derive(Error, Debug)]
pub enum TubegrabError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Missing embedded asset: {0}")]
    MissingAsset(String),

    #[error("Provisioning error: {0}")]
    Provision(String),

    #[error("Extractor process error: {0}")]
    Process(String),

    #[error("Unexpected extractor output: {0}")]
    MalformedOutput(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TubegrabError>;
