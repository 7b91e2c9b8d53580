use miette::Diagnostic;
use thiserror::Error;

/// Main error type for randomart operations
#[derive(Error, Diagnostic, Debug)]
pub enum RaError {
    #[error("IO error: {0}")]
    #[diagnostic(code(randomart::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(randomart::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(randomart::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Canvas error: {message}")]
    #[diagnostic(code(randomart::canvas))]
    Canvas {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Encode error with {path}: {message}")]
    #[diagnostic(code(randomart::encode))]
    Encode {
        path: std::path::PathBuf,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, RaError>;
