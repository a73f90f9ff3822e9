use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeuristicsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote AI error: {0}")]
    Remote(String),

    #[error("failed to read catalog file '{path}': {source}")]
    CatalogIo {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse catalog file: {0}")]
    CatalogParse(#[from] serde_yaml::Error),

    #[error("invalid catalog: {0}")]
    CatalogValidation(String),
}
