//! Statement code generation modules

mod declarations;
mod control_flow;
mod jumps;
mod misc;

pub use declarations::generate_declaration;
pub use control_flow::{generate_if, generate_while};
pub use jumps::generate_return;
pub use misc::{generate_block, generate_expression_stmt};

use crate::node::{Node, NodeKind};
use super::{CodeGenerator, CodegenError};

impl CodeGenerator {
    /// Lower a statement at the current insertion point
    pub fn generate_statement(&mut self, stmt: &Node) -> Result<(), CodegenError> {
        if self.builder.current_block().is_none() || self.builder.current_block_has_terminator() {
            return Err(CodegenError::internal(format!(
                "unreachable statement at {}",
                stmt.location
            )));
        }

        match &stmt.kind {
            NodeKind::StmtBlock { statements } => misc::generate_block(self, statements),
            NodeKind::StmtReturn { value } => jumps::generate_return(self, value.as_deref()),
            NodeKind::StmtIf { condition, body, else_body } => {
                control_flow::generate_if(self, condition, body, else_body.as_deref())
            }
            NodeKind::StmtWhile { condition, body } => control_flow::generate_while(self, condition, body),
            NodeKind::StmtDecl { ty, name, initial } => {
                declarations::generate_declaration(self, ty, name, initial.as_deref())
            }
            NodeKind::Program { .. } | NodeKind::GlobalFunction { .. } | NodeKind::GlobalExtern { .. } => {
                Err(CodegenError::internal(format!(
                    "{} is not a statement ({})",
                    stmt.kind.name(),
                    stmt.location
                )))
            }
            _ => misc::generate_expression_stmt(self, stmt),
        }
    }

    /// Whether control reaches the end of the current block
    pub(crate) fn falls_through(&self) -> bool {
        self.builder.current_block().is_some() && !self.builder.current_block_has_terminator()
    }
}
