//! Basic Block Management
//!
//! Defines basic blocks - sequences of instructions with single entry/exit points.

use charon_common::LabelId;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::Instruction;

/// Basic Block - straight-line instructions ending in exactly one terminator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicBlock {
    pub id: LabelId,
    /// Human-readable hint (`entry`, `then`, `merge`, ...), printed as a comment
    pub name: String,
    pub instructions: Vec<Instruction>,
}

impl BasicBlock {
    pub fn new(id: LabelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            instructions: Vec::new(),
        }
    }

    pub fn add_instruction(&mut self, instr: Instruction) {
        self.instructions.push(instr);
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn has_terminator(&self) -> bool {
        self.instructions.last().is_some_and(Instruction::is_terminator)
    }

    pub fn terminator(&self) -> Option<&Instruction> {
        self.instructions.last().filter(|instr| instr.is_terminator())
    }

    pub fn successors(&self) -> Vec<LabelId> {
        self.terminator().map(Instruction::successors).unwrap_or_default()
    }
}

impl fmt::Display for BasicBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "L{}:  ; {}", self.id, self.name)?;
        for instr in &self.instructions {
            writeln!(f, "  {instr}")?;
        }
        Ok(())
    }
}
