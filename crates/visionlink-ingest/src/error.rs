/// Errors that can occur while running the ingestion loop.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// An I/O error occurred on the underlying input stream.
    #[error("ingest I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
