use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Recovered failures (skipped messages, architectures or advisories) never
/// change the exit code; only fatal failures do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the run completed, possibly skipping some advisories
    Success = 0,
    /// Invalid command-line arguments or configuration
    InvalidArguments = 2,
    /// Application error (structural parse failure, input file, login, etc.)
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

/// Application-specific errors for errata import.
#[derive(Debug, Error)]
pub enum ErrataError {
    #[error("Invalid configuration: {message}\n\n💡 Hint: {hint}")]
    Configuration { message: String, hint: String },

    #[error("Invalid input file: {path}\nReason: {reason}\n\n💡 Hint: Please specify a readable announcement file")]
    InputFile { path: PathBuf, reason: String },

    /// The source as a whole is not in the expected format
    #[error("Failed to parse {source_name}: {details}")]
    StructuralParse {
        source_name: String,
        details: String,
    },

    #[error("No template advisory {advisory} exists for architecture {architecture}")]
    MissingTemplate {
        advisory: String,
        architecture: String,
    },

    /// A resolved package lacks part of its name, version, release or architecture
    #[error("Package {package} of advisory {advisory} for {architecture} is incomplete")]
    IncompletePackage {
        advisory: String,
        architecture: String,
        package: String,
    },

    #[error("Advisory {advisory} is not ready to publish, missing: {missing}")]
    NotReadyToPublish { advisory: String, missing: String },

    /// Validation error for value objects
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl ErrataError {
    /// Builds a configuration error with a hint for the user
    pub fn configuration(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Maps the error to the exit code the CLI should terminate with
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ErrataError::Configuration { .. } | ErrataError::InputFile { .. } => {
                ExitCode::InvalidArguments
            }
            _ => ExitCode::ApplicationError,
        }
    }
}
