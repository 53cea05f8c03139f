//! Code generator context and top-level items

mod function_gen;

use charon_ir::{IrBuilder, Module};
use log::debug;
use crate::node::{Node, NodeKind};
use super::errors::CodegenError;
use super::scope::ScopeStack;
use super::types::TypeMap;

/// Lowering context for one compilation unit. Consumed by `generate`.
pub struct CodeGenerator {
    pub(crate) builder: IrBuilder,
    pub(crate) types: TypeMap,
    pub(crate) scopes: ScopeStack,
}

impl CodeGenerator {
    pub fn new(module_name: &str) -> Self {
        Self {
            builder: IrBuilder::new(module_name),
            types: TypeMap::new(),
            scopes: ScopeStack::new(),
        }
    }

    /// Lower a `Program` node into a module
    pub fn generate(mut self, program: &Node) -> Result<Module, CodegenError> {
        let NodeKind::Program { globals } = &program.kind else {
            return Err(CodegenError::internal(format!(
                "expected Program at the root, found {}",
                program.kind.name()
            )));
        };

        // Signatures first, so calls may name functions defined later
        for global in globals {
            if let NodeKind::GlobalFunction { decl, .. } | NodeKind::GlobalExtern { decl } = &global.kind {
                function_gen::declare_function(&mut self, decl)?;
            }
        }
        for global in globals {
            self.generate_global(global)?;
        }

        let module = self.builder.finish();
        debug!("lowered {} function(s) into '{}'", module.functions.len(), module.name);
        Ok(module)
    }

    fn generate_global(&mut self, node: &Node) -> Result<(), CodegenError> {
        match &node.kind {
            NodeKind::GlobalFunction { decl, body } => function_gen::generate_function(self, decl, body),
            NodeKind::GlobalExtern { decl } => function_gen::declare_function(self, decl),
            other => Err(CodegenError::internal(format!(
                "{} is not a global declaration ({})",
                other.name(),
                node.location
            ))),
        }
    }
}
