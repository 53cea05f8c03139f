//! Charon Compiler - Common Types and Utilities
//!
//! This crate contains the source location model, the compiler-wide error
//! type and the diagnostic reporter shared by the backend crates.

pub mod error;
pub mod source_loc;

pub use error::{CompilerError, Diagnostic, ErrorReporter, Severity};
pub use source_loc::{SourceLocation, SourceSpan};

/// Label identifier for basic blocks
pub type LabelId = u32;

/// Temporary value identifier for IR
pub type TempId = u32;
