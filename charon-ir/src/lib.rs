//! Typed SSA backend for the Charon compiler
//!
//! The lowering engine only talks to this crate through its public API:
//!
//! - `types` - representation types (`IrType`)
//! - `values` - operands (temporaries, constants, globals)
//! - `ops` - binary operations, comparisons and casts
//! - `instructions` - IR instructions
//! - `blocks` - basic blocks
//! - `function` - function declarations and definitions
//! - `module` - modules, global data and the textual printer
//! - `builder` - IR construction with an insertion cursor
//! - `verify` - structural verifier
//! - `passes` - optimization pipeline
//! - `interp` - reference interpreter

pub use self::types::{IrType, TypeCategory, POINTER_BITS};
pub use self::values::Value;
pub use self::ops::{sign_extend, CastOp, IrBinaryOp};
pub use self::instructions::Instruction;
pub use self::blocks::BasicBlock;
pub use self::function::Function;
pub use self::module::{GlobalVariable, Linkage, Module};
pub use self::builder::{BuilderError, IrBuilder};
pub use self::verify::{verify_function, verify_module, VerifyError};
pub use self::passes::{Pass, PassError, PassManager};
pub use self::interp::{execute, ExecError, Interpreter};

mod types;
mod values;
mod ops;
mod instructions;
mod blocks;
mod function;
mod module;
mod builder;
mod verify;
pub mod passes;
pub mod interp;
