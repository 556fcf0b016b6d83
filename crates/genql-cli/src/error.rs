use std::path::PathBuf;

use genql_dsl::DslError;

/// Exit codes for the CLI process.
///
/// - 0: success
/// - 1: general error
/// - 2: invalid arguments / configuration error
/// - 3: field spec, relation or model error
/// - 4: schema document could not be read or written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    InvalidArguments = 2,
    ParseError = 3,
    DocumentError = 4,
}

/// Errors returned by CLI command handlers.
///
/// Each variant maps to an `ExitCode` and can produce structured
/// output in JSON mode.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Errors from parsing specs or editing the document.
    #[error("{0}")]
    Dsl(#[from] DslError),

    /// IO errors outside the document engine.
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Document already exists (init without --force).
    #[error("schema document '{path}' already exists (use --force to overwrite)")]
    DocumentExists { path: PathBuf },

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl CliError {
    /// Maps this error to the appropriate exit code.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Dsl(e) if e.is_document_error() => ExitCode::DocumentError,
            Self::Dsl(_) => ExitCode::ParseError,
            Self::Config { .. } => ExitCode::InvalidArguments,
            Self::Io { .. } | Self::DocumentExists { .. } | Self::Other(_) => {
                ExitCode::GeneralError
            }
        }
    }

    /// Serializes this error as a JSON value for `--format json` output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Dsl(e) => {
                let kind = if e.is_document_error() {
                    "document_error"
                } else {
                    "spec_error"
                };
                let mut json = serde_json::json!({
                    "error": kind,
                    "message": e.to_string(),
                });
                if let Some((token, span)) = e.token_span() {
                    json["token"] = token.into();
                    json["span"] = serde_json::json!({ "start": span.start, "end": span.end });
                }
                json
            }
            Self::Io { path, source } => serde_json::json!({
                "error": "io_error",
                "path": path.display().to_string(),
                "message": source.to_string(),
            }),
            Self::Config { message } => serde_json::json!({
                "error": "config_error",
                "message": message,
            }),
            other => serde_json::json!({
                "error": "error",
                "message": other.to_string(),
            }),
        }
    }
}
