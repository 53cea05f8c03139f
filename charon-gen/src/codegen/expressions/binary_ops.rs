//! Binary operation code generation

use charon_common::SourceLocation;
use charon_ir::{IrBinaryOp, Value};
use crate::codegen::{CodeGenerator, CodegenError};
use crate::node::{Node, NodeKind};
use crate::ops::BinaryOp;

/// The right operand is always lowered before the left one.
pub fn generate_binary_operation(
    gen: &mut CodeGenerator,
    op: BinaryOp,
    left: &Node,
    right: &Node,
    location: &SourceLocation,
) -> Result<Value, CodegenError> {
    let right_val = gen.generate_value(right)?;

    if op == BinaryOp::Assign {
        return generate_assignment(gen, left, right_val);
    }

    let ir_op = match op {
        BinaryOp::Add => IrBinaryOp::Add,
        BinaryOp::Sub => IrBinaryOp::Sub,
        BinaryOp::Mul => IrBinaryOp::Mul,
        BinaryOp::Div => IrBinaryOp::UDiv,
        BinaryOp::Mod => IrBinaryOp::SRem,
        BinaryOp::Equal => IrBinaryOp::Eq,
        BinaryOp::NotEqual => IrBinaryOp::Ne,
        BinaryOp::Greater => IrBinaryOp::Ugt,
        BinaryOp::GreaterEqual => IrBinaryOp::Uge,
        BinaryOp::Less => IrBinaryOp::Ult,
        BinaryOp::LessEqual => IrBinaryOp::Ule,
        BinaryOp::Assign | BinaryOp::LogicalAnd | BinaryOp::LogicalOr => {
            return Err(CodegenError::UnsupportedOperation {
                what: "binary",
                op: op.to_string(),
                location: location.clone(),
            });
        }
    };

    let left_val = gen.generate_value(left)?;
    let (lhs, rhs) = gen.unify_operands(left_val, right_val)?;
    Ok(gen.builder.build_binary(ir_op, lhs, rhs)?)
}

/// Store into a named variable; the stored value is the result
fn generate_assignment(gen: &mut CodeGenerator, target: &Node, value: Value) -> Result<Value, CodegenError> {
    let NodeKind::ExprVar { name } = &target.kind else {
        return Err(CodegenError::UnsupportedAssignment {
            location: target.location.clone(),
        });
    };

    let var = gen.scopes.lookup(name).cloned().ok_or_else(|| {
        CodegenError::internal(format!("unresolved variable `{name}` at {}", target.location))
    })?;
    let value = gen.coerce(value, &var.ir_type)?;
    gen.builder.build_store(value.clone(), var.ptr)?;
    Ok(value)
}
