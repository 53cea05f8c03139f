//! Blocks and expression statements

use crate::codegen::{CodeGenerator, CodegenError};
use crate::node::Node;

pub fn generate_block(gen: &mut CodeGenerator, statements: &[Node]) -> Result<(), CodegenError> {
    gen.scopes.push();
    for stmt in statements {
        gen.generate_statement(stmt)?;
    }
    gen.scopes.pop()
}

/// Evaluate for side effects; the value, if any, is dropped
pub fn generate_expression_stmt(gen: &mut CodeGenerator, expr: &Node) -> Result<(), CodegenError> {
    gen.generate_expression(expr)?;
    Ok(())
}
