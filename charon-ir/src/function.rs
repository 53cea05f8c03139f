//! Function Definitions
//!
//! A function is either a declaration (`is_external`, no blocks) or a
//! definition whose first block is the entry block.

use charon_common::{LabelId, TempId};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::{BasicBlock, IrType, Value};

/// Function in IR
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub return_type: IrType,
    pub parameters: Vec<(TempId, IrType)>,
    pub blocks: Vec<BasicBlock>,
    pub is_external: bool,
    pub is_vararg: bool,
}

impl Function {
    /// Create a declaration. Parameters are numbered `%0..%n`.
    pub fn new(name: String, return_type: IrType, param_types: Vec<IrType>, is_vararg: bool) -> Self {
        let parameters = param_types
            .into_iter()
            .enumerate()
            .map(|(i, ty)| (i as TempId, ty))
            .collect();
        Self {
            name,
            return_type,
            parameters,
            blocks: Vec::new(),
            is_external: true,
            is_vararg,
        }
    }

    /// The signature as a function type
    pub fn fn_type(&self) -> IrType {
        IrType::Function {
            return_type: Box::new(self.return_type.clone()),
            param_types: self.parameters.iter().map(|(_, ty)| ty.clone()).collect(),
            is_vararg: self.is_vararg,
        }
    }

    pub fn param_value(&self, index: usize) -> Option<Value> {
        self.parameters
            .get(index)
            .map(|(id, ty)| Value::temp(*id, ty.clone()))
    }

    pub fn add_block(&mut self, block: BasicBlock) {
        self.blocks.push(block);
    }

    pub fn get_block(&self, id: LabelId) -> Option<&BasicBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn get_block_mut(&mut self, id: LabelId) -> Option<&mut BasicBlock> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn entry_block(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }

    pub fn entry_block_mut(&mut self) -> Option<&mut BasicBlock> {
        self.blocks.first_mut()
    }

    pub fn is_definition(&self) -> bool {
        !self.is_external
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = if self.is_external { "declare" } else { "define" };
        write!(f, "{keyword} {} @{}(", self.return_type, self.name)?;
        for (i, (id, ty)) in self.parameters.iter().enumerate() {
            if i > 0 { write!(f, ", ")?; }
            if self.is_external {
                write!(f, "{ty}")?;
            } else {
                write!(f, "{ty} %{id}")?;
            }
        }
        if self.is_vararg {
            if !self.parameters.is_empty() { write!(f, ", ")?; }
            write!(f, "...")?;
        }
        write!(f, ")")?;
        if self.is_external {
            return writeln!(f);
        }
        writeln!(f, " {{")?;
        for block in &self.blocks {
            write!(f, "{block}")?;
        }
        writeln!(f, "}}")
    }
}
