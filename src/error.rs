use thiserror::Error;

/// Errors from rendering and file handling. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Typst compilation failed: {0}")]
    Compile(String),
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
