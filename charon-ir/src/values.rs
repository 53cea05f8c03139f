//! IR Value Representations
//!
//! Operands carry their own representation type so that casts and
//! comparisons can be built without consulting the defining instruction.

use charon_common::TempId;
use serde::{Deserialize, Serialize};
use std::fmt;
use crate::types::IrType;

/// IR Value - represents operands in IR instructions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// SSA temporary (instruction result or function parameter)
    Temp { id: TempId, ty: IrType },

    /// Integer constant; the payload is always masked to the type's width
    Constant { value: u64, ty: IrType },

    /// Address of a module-level global
    Global(String),

    /// Undefined value of the given type
    Undef(IrType),
}

impl Value {
    pub fn temp(id: TempId, ty: IrType) -> Self {
        Value::Temp { id, ty }
    }

    pub fn constant(value: u64, ty: IrType) -> Self {
        let value = value & ty.mask();
        Value::Constant { value, ty }
    }

    pub fn zero(ty: IrType) -> Self {
        Value::constant(0, ty)
    }

    pub fn ty(&self) -> IrType {
        match self {
            Value::Temp { ty, .. } | Value::Constant { ty, .. } | Value::Undef(ty) => ty.clone(),
            Value::Global(_) => IrType::Ptr,
        }
    }

    pub fn as_constant(&self) -> Option<u64> {
        match self {
            Value::Constant { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_temp(&self) -> Option<TempId> {
        match self {
            Value::Temp { id, .. } => Some(*id),
            _ => None,
        }
    }

    /// Re-materialize an integer constant at another integer width.
    /// Non-constants are returned unchanged.
    pub fn retype_constant(self, ty: &IrType) -> Value {
        match self {
            Value::Constant { value, ty: from } if from.is_integer() && ty.is_integer() => {
                Value::constant(value, ty.clone())
            }
            other => other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Temp { id, .. } => write!(f, "%{id}"),
            Value::Constant { value, ty: IrType::I1 } => {
                write!(f, "{}", if *value == 0 { "false" } else { "true" })
            }
            Value::Constant { value, .. } => write!(f, "{value}"),
            Value::Global(name) => write!(f, "@{name}"),
            Value::Undef(_) => write!(f, "undef"),
        }
    }
}
