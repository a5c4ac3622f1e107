use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all Pomelo operations.
#[derive(Debug, Error, Diagnostic)]
pub enum PomeloError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The POM XML stream could not be parsed.
    #[error("Malformed XML: {message}")]
    #[diagnostic(help("The pom.xml is not well-formed; check for truncation or binary content"))]
    MalformedXml { message: String },

    /// A Maven coordinate was still missing parts after parent fallback.
    #[error("Incomplete coordinate: {message}")]
    #[diagnostic(help(
        "groupId, artifactId and version must all be present, either directly or via <parent>"
    ))]
    IncompleteCoordinate { message: String },

    /// Invalid or malformed configuration (e.g. pomelo.toml).
    #[error("Config error: {message}")]
    #[diagnostic(help("Check your pomelo.toml for syntax errors"))]
    Config { message: String },

    /// Network request or download failed.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type PomeloResult<T> = miette::Result<T>;
