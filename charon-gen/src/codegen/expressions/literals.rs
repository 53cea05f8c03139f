//! Literal code generation

use charon_ir::{IrType, Value};
use crate::codegen::CodeGenerator;

/// Numeric literals start out 64 bits wide; consumers retype them.
pub fn generate_numeric_literal(value: u64) -> Value {
    Value::constant(value, IrType::I64)
}

/// String literals become private NUL-terminated constants
pub fn generate_string_literal(gen: &mut CodeGenerator, value: &str) -> Value {
    gen.builder.build_global_string(value)
}
