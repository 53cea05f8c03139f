//! Expression code generation modules

mod literals;
mod identifiers;
mod binary_ops;
mod unary_ops;
mod function_calls;
mod casts;

pub use literals::{generate_numeric_literal, generate_string_literal};
pub use identifiers::generate_identifier;
pub use binary_ops::generate_binary_operation;
pub use unary_ops::generate_unary_operation;
pub use function_calls::generate_function_call;
pub use casts::generate_cast;

use charon_ir::{IrBinaryOp, IrType, Value};
use crate::node::{Node, NodeKind};
use super::{CodeGenerator, CodegenError};

impl CodeGenerator {
    /// Lower an expression. Calls to void functions produce `None`.
    pub fn generate_expression(&mut self, expr: &Node) -> Result<Option<Value>, CodegenError> {
        let value = match &expr.kind {
            NodeKind::ExprLiteralNumeric { value } => literals::generate_numeric_literal(*value),
            NodeKind::ExprLiteralChar { value } => Value::constant(u64::from(*value), IrType::I8),
            NodeKind::ExprLiteralBool { value } => Value::constant(u64::from(*value), IrType::I1),
            NodeKind::ExprLiteralString { value } => literals::generate_string_literal(self, value),
            NodeKind::ExprVar { name } => identifiers::generate_identifier(self, name, &expr.location)?,
            NodeKind::ExprBinary { op, left, right } => {
                binary_ops::generate_binary_operation(self, *op, left, right, &expr.location)?
            }
            NodeKind::ExprUnary { op, operand } => {
                unary_ops::generate_unary_operation(self, *op, operand, &expr.location)?
            }
            NodeKind::ExprCast { value, ty } => casts::generate_cast(self, value, ty, &expr.location)?,
            NodeKind::ExprCall { name, args } => {
                return function_calls::generate_function_call(self, name, args, &expr.location);
            }
            other => {
                return Err(CodegenError::internal(format!(
                    "{} is not an expression ({})",
                    other.name(),
                    expr.location
                )));
            }
        };
        Ok(Some(value))
    }

    /// Lower an expression whose value is needed
    pub fn generate_value(&mut self, expr: &Node) -> Result<Value, CodegenError> {
        self.generate_expression(expr)?.ok_or_else(|| {
            CodegenError::internal(format!("void value used at {}", expr.location))
        })
    }

    /// Compare against the zero of the value's own width, producing `i1`
    pub(crate) fn generate_condition(&mut self, condition: &Node) -> Result<Value, CodegenError> {
        let value = self.generate_value(condition)?;
        let zero = Value::zero(value.ty());
        Ok(self.builder.build_binary(IrBinaryOp::Ne, value, zero)?)
    }

    /// Bring an integer value to the width its consumer expects. Literal
    /// constants are retyped, computed values are truncated or extended.
    pub(crate) fn coerce(&mut self, value: Value, ty: &IrType) -> Result<Value, CodegenError> {
        if value.ty() == *ty || !value.ty().is_integer() || !ty.is_integer() {
            return Ok(value);
        }
        casts::convert_width(self, value, ty)
    }

    /// Give two operands a common type. A constant takes its partner's type,
    /// numeric literals (`i64`) giving way first; otherwise a 64-bit value
    /// computed from literals is narrowed to the partner's width.
    pub(crate) fn unify_operands(&mut self, lhs: Value, rhs: Value) -> Result<(Value, Value), CodegenError> {
        let (lhs_ty, rhs_ty) = (lhs.ty(), rhs.ty());
        if lhs_ty == rhs_ty {
            return Ok((lhs, rhs));
        }
        let (lhs_const, rhs_const) = (lhs.as_constant().is_some(), rhs.as_constant().is_some());
        if rhs_const && (!lhs_const || rhs_ty == IrType::I64) {
            return Ok((lhs, rhs.retype_constant(&lhs_ty)));
        }
        if lhs_const || lhs_ty == IrType::I64 {
            let lhs = self.coerce(lhs, &rhs_ty)?;
            return Ok((lhs, rhs));
        }
        let rhs = self.coerce(rhs, &lhs_ty)?;
        Ok((lhs, rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charon_ir::Instruction;
    use pretty_assertions::assert_eq;

    fn generator_in_function() -> CodeGenerator {
        let mut gen = CodeGenerator::new("test");
        gen.builder.declare_function("f", IrType::Void, vec![], false);
        gen.builder.start_function("f").unwrap();
        let entry = gen.builder.append_block("entry").unwrap();
        gen.builder.position_at_end(entry).unwrap();
        gen
    }

    #[test]
    fn test_unify_retypes_literal() {
        let mut gen = generator_in_function();
        let temp = Value::temp(4, IrType::I8);
        let literal = Value::constant(300, IrType::I64);
        assert_eq!(
            gen.unify_operands(literal.clone(), temp.clone()).unwrap(),
            (Value::constant(44, IrType::I8), temp.clone())
        );
        assert_eq!(
            gen.unify_operands(temp.clone(), literal).unwrap(),
            (temp, Value::constant(44, IrType::I8))
        );
    }

    #[test]
    fn test_unify_prefers_numeric_literal() {
        let mut gen = generator_in_function();
        let ch = Value::constant(u64::from(b'a'), IrType::I8);
        let num = Value::constant(97, IrType::I64);
        assert_eq!(gen.unify_operands(num, ch.clone()).unwrap(), (ch.clone(), ch));
    }

    #[test]
    fn test_unify_narrows_computed_literal_value() {
        let mut gen = generator_in_function();
        let wide = Value::temp(7, IrType::I64);
        let narrow = Value::temp(8, IrType::I16);
        let (lhs, rhs) = gen.unify_operands(wide, narrow.clone()).unwrap();
        assert_eq!((lhs.ty(), rhs), (IrType::I16, narrow));

        let function = gen.builder.current_function().unwrap();
        assert!(matches!(
            function.blocks[0].instructions.last(),
            Some(Instruction::Cast { op: charon_ir::CastOp::Trunc, .. })
        ));
    }
}
