//! Identifier (variable reference) code generation

use charon_common::SourceLocation;
use charon_ir::Value;
use crate::codegen::{CodeGenerator, CodegenError};

pub fn generate_identifier(
    gen: &mut CodeGenerator,
    name: &str,
    location: &SourceLocation,
) -> Result<Value, CodegenError> {
    let var = gen
        .scopes
        .lookup(name)
        .cloned()
        .ok_or_else(|| CodegenError::internal(format!("unresolved variable `{name}` at {location}")))?;
    Ok(gen.builder.build_load(var.ptr, var.ir_type)?)
}
