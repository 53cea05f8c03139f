//! Lowering from the typed tree to IR
//!
//! Every variable lives in a stack slot allocated in the entry block, so
//! source-level mutation is expressed with loads and stores and the
//! instruction stream stays in SSA form.

mod errors;
mod types;
mod scope;
pub mod expressions;
pub mod statements;
pub mod codegen;

pub use errors::CodegenError;
pub use codegen::CodeGenerator;
pub use types::TypeMap;
pub use scope::{ScopeStack, VarInfo};
