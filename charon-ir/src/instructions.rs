//! IR Instructions
//!
//! Defines all instruction types available in the IR.

use charon_common::{LabelId, TempId};
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::{CastOp, IrBinaryOp, IrType, Value};

/// IR Instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    /// Binary operation or comparison: result = op lhs, rhs
    Binary {
        result: TempId,
        op: IrBinaryOp,
        lhs: Value,
        rhs: Value,
        result_type: IrType,
    },

    /// Allocate a stack slot: result = alloca type
    Alloca {
        result: TempId,
        alloc_type: IrType,
    },

    /// Load from memory: result = load ptr
    Load {
        result: TempId,
        ptr: Value,
        result_type: IrType,
    },

    /// Store to memory: store value, ptr
    Store {
        value: Value,
        ptr: Value,
    },

    /// Direct call. `fn_type` is the callee signature at the call site,
    /// which is what describes variadic calls.
    Call {
        result: Option<TempId>,
        function: String,
        fn_type: IrType,
        args: Vec<Value>,
    },

    /// Integer width change: result = op value to target_type
    Cast {
        result: TempId,
        op: CastOp,
        value: Value,
        target_type: IrType,
    },

    /// Return: ret value or ret void
    Return(Option<Value>),

    /// Unconditional branch: br label
    Branch(LabelId),

    /// Conditional branch: br condition, true_label, false_label
    BranchCond {
        condition: Value,
        true_label: LabelId,
        false_label: LabelId,
    },
}

impl Instruction {
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Instruction::Return(_) | Instruction::Branch(_) | Instruction::BranchCond { .. }
        )
    }

    /// The value defined by this instruction, if any
    pub fn result(&self) -> Option<Value> {
        match self {
            Instruction::Binary { result, result_type, .. }
            | Instruction::Load { result, result_type, .. }
            | Instruction::Cast { result, target_type: result_type, .. } => {
                Some(Value::temp(*result, result_type.clone()))
            }
            Instruction::Alloca { result, .. } => Some(Value::temp(*result, IrType::Ptr)),
            Instruction::Call { result: Some(result), fn_type: IrType::Function { return_type, .. }, .. } => {
                Some(Value::temp(*result, (**return_type).clone()))
            }
            _ => None,
        }
    }

    pub fn result_id(&self) -> Option<TempId> {
        self.result().and_then(|value| value.as_temp())
    }

    pub fn operands(&self) -> Vec<&Value> {
        match self {
            Instruction::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            Instruction::Alloca { .. } | Instruction::Branch(_) | Instruction::Return(None) => Vec::new(),
            Instruction::Load { ptr, .. } => vec![ptr],
            Instruction::Store { value, ptr } => vec![value, ptr],
            Instruction::Call { args, .. } => args.iter().collect(),
            Instruction::Cast { value, .. } => vec![value],
            Instruction::Return(Some(value)) => vec![value],
            Instruction::BranchCond { condition, .. } => vec![condition],
        }
    }

    pub fn operands_mut(&mut self) -> Vec<&mut Value> {
        match self {
            Instruction::Binary { lhs, rhs, .. } => vec![lhs, rhs],
            Instruction::Alloca { .. } | Instruction::Branch(_) | Instruction::Return(None) => Vec::new(),
            Instruction::Load { ptr, .. } => vec![ptr],
            Instruction::Store { value, ptr } => vec![value, ptr],
            Instruction::Call { args, .. } => args.iter_mut().collect(),
            Instruction::Cast { value, .. } => vec![value],
            Instruction::Return(Some(value)) => vec![value],
            Instruction::BranchCond { condition, .. } => vec![condition],
        }
    }

    /// Instructions that may be deleted when their result is unused
    pub fn is_pure(&self) -> bool {
        matches!(
            self,
            Instruction::Binary { .. } | Instruction::Alloca { .. } | Instruction::Load { .. } | Instruction::Cast { .. }
        )
    }

    pub fn successors(&self) -> Vec<LabelId> {
        match self {
            Instruction::Branch(label) => vec![*label],
            Instruction::BranchCond { true_label, false_label, .. } => vec![*true_label, *false_label],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Binary { result, op, lhs, rhs, .. } => {
                write!(f, "%{result} = {op} {} {lhs}, {rhs}", lhs.ty())
            }
            Instruction::Alloca { result, alloc_type } => {
                write!(f, "%{result} = alloca {alloc_type}")
            }
            Instruction::Load { result, ptr, result_type } => {
                write!(f, "%{result} = load {result_type}, ptr {ptr}")
            }
            Instruction::Store { value, ptr } => {
                write!(f, "store {} {value}, ptr {ptr}", value.ty())
            }
            Instruction::Call { result, function, fn_type, args } => {
                if let Some(result) = result {
                    write!(f, "%{result} = ")?;
                }
                match fn_type {
                    IrType::Function { is_vararg: true, .. } => write!(f, "call {fn_type} @{function}(")?,
                    IrType::Function { return_type, .. } => write!(f, "call {return_type} @{function}(")?,
                    other => write!(f, "call {other} @{function}(")?,
                }
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{} {arg}", arg.ty())?;
                }
                write!(f, ")")
            }
            Instruction::Cast { result, op, value, target_type } => {
                write!(f, "%{result} = {op} {} {value} to {target_type}", value.ty())
            }
            Instruction::Return(Some(value)) => write!(f, "ret {} {value}", value.ty()),
            Instruction::Return(None) => write!(f, "ret void"),
            Instruction::Branch(label) => write!(f, "br label %L{label}"),
            Instruction::BranchCond { condition, true_label, false_label } => {
                write!(f, "br i1 {condition}, label %L{true_label}, label %L{false_label}")
            }
        }
    }
}
