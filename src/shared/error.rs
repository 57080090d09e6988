use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts and CI systems to distinguish between
/// different kinds of runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - dependencies resolved (or none found, which is a valid result)
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (oracle error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency resolution.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// Only failures that must abort the whole run live here; per-package
/// registry failures degrade to negative cache entries instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Name-resolution oracle is not configured: {missing}\n\n💡 Hint: {hint}")]
    OracleNotConfigured { missing: String, hint: String },

    #[error("Name-resolution oracle request failed: {details}")]
    OracleTransport { details: String },

    #[error("Name-resolution oracle returned a malformed response: {details}\nResponse was: {raw}")]
    OracleMalformedResponse { details: String, raw: String },

    #[error("No package could be verified against the registry.\n\n💡 Hint: This can be caused by network issues or highly unconventional import names")]
    NoVerifiedPackages,

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },
}
