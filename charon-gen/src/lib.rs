//! Charon Compiler - Tree Lowering
//!
//! Lowers the validated, typed tree produced by the front end into a typed
//! SSA module, runs the selected pass pipeline and writes the module text.

pub mod codegen;
pub mod node;
pub mod ops;
pub mod types;


pub use codegen::{CodeGenerator, CodegenError};
pub use node::{FunctionDecl, Node, NodeKind};
pub use ops::{BinaryOp, UnaryOp};
pub use types::{Type, TypeKind};

use std::path::Path;
use charon_common::{CompilerError, ErrorReporter};
use charon_ir::{verify_module, Module, PassManager};
use log::info;

/// Name given to every module produced by `gen`
pub const MODULE_NAME: &str = "CharonModule";

/// Lower `program`, run the `passes` pipeline and verify the result.
/// User-facing failures are also reported to `reporter` at the node's location.
pub fn compile(program: &Node, passes: &str, reporter: &mut ErrorReporter) -> Result<Module, CompilerError> {
    let mut pipeline = PassManager::parse(passes).map_err(|e| CompilerError::backend_error(e.to_string()))?;

    let mut module = CodeGenerator::new(MODULE_NAME)
        .generate(program)
        .map_err(|err| report(err, reporter))?;

    if !pipeline.is_empty() {
        info!("running passes: {}", pipeline.pass_names().join(","));
    }
    pipeline
        .run(&mut module)
        .map_err(|e| CompilerError::backend_error(e.to_string()))?;
    verify_module(&module).map_err(|e| CompilerError::backend_error(e.to_string()))?;
    Ok(module)
}

/// Compile `program` and write the module text to `dest`. Nothing is
/// written when compilation fails.
pub fn gen(program: &Node, dest: &Path, passes: &str, reporter: &mut ErrorReporter) -> Result<(), CompilerError> {
    let module = compile(program, passes, reporter)?;
    module.write_to_file(dest)?;
    info!("wrote {}", dest.display());
    Ok(())
}

fn report(err: CodegenError, reporter: &mut ErrorReporter) -> CompilerError {
    if let Some(location) = err.location() {
        reporter.error(err.to_string(), location.clone());
    }
    err.into()
}
