//! IR Type System
//!
//! Backend representations: fixed-width integers, a single opaque pointer,
//! constant byte arrays for global data and function signatures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse classification used to decide whether a cast is legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeCategory {
    Void,
    Integer,
    Pointer,
    Aggregate,
    Function,
}

/// IR Type system
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrType {
    /// No value; only valid as a function return type
    Void,

    I1,
    I8,
    I16,
    I32,
    I64,

    /// Untyped pointer, the pointee is a source-level concept only
    Ptr,

    /// Array type [size x element_type]
    Array { size: u64, element_type: Box<IrType> },

    /// Function type
    Function {
        return_type: Box<IrType>,
        param_types: Vec<IrType>,
        is_vararg: bool,
    },
}

/// Pointers occupy a full machine word on every supported target.
pub const POINTER_BITS: u32 = 64;

impl IrType {
    /// Integer representation for a bit width, if the backend has one
    pub fn int(bits: u32) -> Option<IrType> {
        match bits {
            1 => Some(IrType::I1),
            8 => Some(IrType::I8),
            16 => Some(IrType::I16),
            32 => Some(IrType::I32),
            64 => Some(IrType::I64),
            _ => None,
        }
    }

    /// Size of this representation in bits
    pub fn bit_width(&self) -> Option<u32> {
        match self {
            IrType::Void | IrType::Function { .. } => None,
            IrType::I1 => Some(1),
            IrType::I8 => Some(8),
            IrType::I16 => Some(16),
            IrType::I32 => Some(32),
            IrType::I64 => Some(64),
            IrType::Ptr => Some(POINTER_BITS),
            IrType::Array { size, element_type } => element_type
                .bit_width()
                .and_then(|bits| u32::try_from(*size).ok().map(|size| size * bits)),
        }
    }

    pub fn category(&self) -> TypeCategory {
        match self {
            IrType::Void => TypeCategory::Void,
            IrType::I1 | IrType::I8 | IrType::I16 | IrType::I32 | IrType::I64 => {
                TypeCategory::Integer
            }
            IrType::Ptr => TypeCategory::Pointer,
            IrType::Array { .. } => TypeCategory::Aggregate,
            IrType::Function { .. } => TypeCategory::Function,
        }
    }

    pub fn is_integer(&self) -> bool {
        self.category() == TypeCategory::Integer
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, IrType::Ptr)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, IrType::Void)
    }

    /// Bit mask selecting the significant bits of a scalar of this type
    pub fn mask(&self) -> u64 {
        match self.bit_width() {
            Some(bits) if bits < 64 && self.category() != TypeCategory::Aggregate => {
                (1u64 << bits) - 1
            }
            _ => u64::MAX,
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => write!(f, "void"),
            IrType::I1 => write!(f, "i1"),
            IrType::I8 => write!(f, "i8"),
            IrType::I16 => write!(f, "i16"),
            IrType::I32 => write!(f, "i32"),
            IrType::I64 => write!(f, "i64"),
            IrType::Ptr => write!(f, "ptr"),
            IrType::Array { size, element_type } => write!(f, "[{size} x {element_type}]"),
            IrType::Function { return_type, param_types, is_vararg } => {
                write!(f, "{return_type} (")?;
                for (i, param) in param_types.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{param}")?;
                }
                if *is_vararg {
                    if !param_types.is_empty() { write!(f, ", ")?; }
                    write!(f, "...")?;
                }
                write!(f, ")")
            }
        }
    }
}
