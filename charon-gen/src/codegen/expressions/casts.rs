//! Cast code generation
//!
//! Casts stay within a representation category. Between integers the wider
//! source is truncated and the narrower one zero-extended.

use std::cmp::Ordering;
use charon_common::SourceLocation;
use charon_ir::{CastOp, IrType, Value};
use crate::codegen::{CodeGenerator, CodegenError};
use crate::node::Node;
use crate::types::Type;

pub fn generate_cast(
    gen: &mut CodeGenerator,
    value: &Node,
    target: &Type,
    location: &SourceLocation,
) -> Result<Value, CodegenError> {
    let to = gen.types.map_type(target)?;
    let source = gen.generate_value(value)?;
    let from = source.ty();

    if to.is_void() || from.category() != to.category() {
        return Err(CodegenError::IncompatibleCast {
            from,
            to,
            location: location.clone(),
        });
    }
    convert_width(gen, source, &to)
}

/// Change the width of a value within its category. Constants are
/// re-materialized instead of cast.
pub(crate) fn convert_width(gen: &mut CodeGenerator, value: Value, to: &IrType) -> Result<Value, CodegenError> {
    if value.as_constant().is_some() {
        return Ok(value.retype_constant(to));
    }

    let from = value.ty();
    let (Some(from_bits), Some(to_bits)) = (from.bit_width(), to.bit_width()) else {
        return Err(CodegenError::internal(format!("no width conversion from {from} to {to}")));
    };
    let result = match from_bits.cmp(&to_bits) {
        Ordering::Greater => gen.builder.build_cast(CastOp::Trunc, value, to.clone())?,
        Ordering::Less => gen.builder.build_cast(CastOp::ZExt, value, to.clone())?,
        Ordering::Equal => value,
    };
    Ok(result)
}
