use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document is empty after decoding; nothing to extract")]
    EmptyDocument,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to read document {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
