use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while rendering or writing a report.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(#[from] genpdf::error::Error),

    #[error("no usable fonts for the PDF: {reason}")]
    Fonts { reason: String },

    #[error("could not build image download client: {0}")]
    ImageClient(#[from] reqwest::Error),

    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a single product image was left out of the PDF.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("image larger than {limit} bytes")]
    TooLarge { limit: usize },

    #[error("not a supported image: {0}")]
    Decode(#[from] image::ImageError),
}
