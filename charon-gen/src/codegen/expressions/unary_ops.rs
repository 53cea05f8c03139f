//! Unary operation code generation

use charon_common::SourceLocation;
use charon_ir::{IrBinaryOp, Value};
use crate::codegen::{CodeGenerator, CodegenError};
use crate::node::Node;
use crate::ops::UnaryOp;

pub fn generate_unary_operation(
    gen: &mut CodeGenerator,
    op: UnaryOp,
    operand: &Node,
    location: &SourceLocation,
) -> Result<Value, CodegenError> {
    let ir_op = match op {
        // `!x` is `x == 0` at x's own width, so the result is always i1
        UnaryOp::Not => IrBinaryOp::Eq,
        UnaryOp::Negative => IrBinaryOp::Sub,
        UnaryOp::Deref | UnaryOp::AddressOf => {
            return Err(CodegenError::UnsupportedOperation {
                what: "unary",
                op: op.to_string(),
                location: location.clone(),
            });
        }
    };

    let value = gen.generate_value(operand)?;
    let zero = Value::zero(value.ty());
    let (lhs, rhs) = match op {
        UnaryOp::Negative => (zero, value),
        _ => (value, zero),
    };
    Ok(gen.builder.build_binary(ir_op, lhs, rhs)?)
}
