//! Code generation error types

use charon_common::{CompilerError, SourceLocation};
use charon_ir::{BuilderError, IrType};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodegenError {
    #[error("unimplemented {what} operation `{op}`")]
    UnsupportedOperation {
        what: &'static str,
        op: String,
        location: SourceLocation,
    },

    #[error("cast of incompatible types `{from}` and `{to}`")]
    IncompatibleCast {
        from: IrType,
        to: IrType,
        location: SourceLocation,
    },

    #[error("unsupported assignment target")]
    UnsupportedAssignment { location: SourceLocation },

    /// The input tree broke the contract of the validating front end
    #[error("{message}")]
    Internal { message: String },
}

impl CodegenError {
    pub fn internal(message: impl Into<String>) -> Self {
        CodegenError::Internal { message: message.into() }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, CodegenError::Internal { .. })
    }

    /// Where a user-facing error should be reported
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            CodegenError::UnsupportedOperation { location, .. }
            | CodegenError::IncompatibleCast { location, .. }
            | CodegenError::UnsupportedAssignment { location } => Some(location),
            CodegenError::Internal { .. } => None,
        }
    }
}

impl From<BuilderError> for CodegenError {
    fn from(err: BuilderError) -> Self {
        CodegenError::internal(err.to_string())
    }
}

impl From<CodegenError> for CompilerError {
    fn from(err: CodegenError) -> Self {
        let message = err.to_string();
        match err {
            CodegenError::Internal { .. } => CompilerError::InternalError { message },
            CodegenError::UnsupportedOperation { location, .. }
            | CodegenError::IncompatibleCast { location, .. }
            | CodegenError::UnsupportedAssignment { location } => {
                CompilerError::codegen_error(message, location)
            }
        }
    }
}
