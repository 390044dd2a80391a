use thiserror::Error;

/// Why a single image failed to load.
///
/// Never fatal: the displaying component shows a broken-image placeholder
/// with a retry control, and preloads just log it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to load image: {src}")]
    Network { src: String },
    #[error("Image load timeout after {timeout_ms}ms: {src}")]
    Timeout { src: String, timeout_ms: u64 },
}

impl LoadError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, LoadError::Timeout { .. })
    }

    pub fn src(&self) -> &str {
        match self {
            LoadError::Network { src } | LoadError::Timeout { src, .. } => src,
        }
    }
}

/// Gallery data and configuration errors
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Invalid gallery data: {0}")]
    Data(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}
