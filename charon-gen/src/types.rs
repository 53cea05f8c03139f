//! Source-level type model
//!
//! Primitive types are plain values built by the constructors below, so two
//! types are equal exactly when they are structurally equal.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Void,
    Pointer,
    Integer,
}

/// Source type: void, unsigned integer of a fixed width, or pointer
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Void,
    Pointer { base: Box<Type> },
    /// Width 1 is the boolean type
    Integer { bit_width: u32 },
}

impl Type {
    pub fn void() -> Type {
        Type::Void
    }

    pub fn bool() -> Type {
        Type::Integer { bit_width: 1 }
    }

    pub fn u8() -> Type {
        Type::Integer { bit_width: 8 }
    }

    pub fn u16() -> Type {
        Type::Integer { bit_width: 16 }
    }

    pub fn u32() -> Type {
        Type::Integer { bit_width: 32 }
    }

    pub fn u64() -> Type {
        Type::Integer { bit_width: 64 }
    }

    /// The natural unsigned integer
    pub fn uint() -> Type {
        Type::u64()
    }

    pub fn pointer(base: Type) -> Type {
        Type::Pointer { base: Box::new(base) }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Void => TypeKind::Void,
            Type::Pointer { .. } => TypeKind::Pointer,
            Type::Integer { .. } => TypeKind::Integer,
        }
    }

    pub fn is_kind(&self, kind: TypeKind) -> bool {
        self.kind() == kind
    }

    pub fn is_void(&self) -> bool {
        self.is_kind(TypeKind::Void)
    }

    /// Structural equality: integers by width, pointers by base
    pub fn equals(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Void, Type::Void) => true,
            (Type::Integer { bit_width: a }, Type::Integer { bit_width: b }) => a == b,
            (Type::Pointer { base: a }, Type::Pointer { base: b }) => a.equals(b),
            _ => false,
        }
    }

    pub fn bit_width(&self) -> Option<u32> {
        match self {
            Type::Integer { bit_width } => Some(*bit_width),
            _ => None,
        }
    }

    pub fn pointee(&self) -> Option<&Type> {
        match self {
            Type::Pointer { base } => Some(base),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => write!(f, "void"),
            Type::Integer { bit_width: 1 } => write!(f, "bool"),
            Type::Integer { bit_width } => write!(f, "u{bit_width}"),
            Type::Pointer { base } => write!(f, "*{base}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_equality_laws() {
        let types = [
            Type::void(),
            Type::bool(),
            Type::u8(),
            Type::u64(),
            Type::pointer(Type::u32()),
            Type::pointer(Type::pointer(Type::void())),
        ];
        for a in &types {
            assert!(a.equals(a));
            for b in &types {
                assert_eq!(Type::pointer(a.clone()).equals(&Type::pointer(b.clone())), a.equals(b));
                assert_eq!(a.equals(b), a == b);
            }
        }
    }

    #[test]
    fn test_kinds() {
        assert!(Type::void().is_void());
        assert!(Type::u16().is_kind(TypeKind::Integer));
        assert!(Type::pointer(Type::u8()).is_kind(TypeKind::Pointer));
        assert_eq!(Type::uint(), Type::u64());
        assert!(!Type::u8().equals(&Type::u16()));
        assert_eq!(Type::pointer(Type::u8()).pointee(), Some(&Type::u8()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Type::pointer(Type::pointer(Type::u8())).to_string(), "**u8");
        assert_eq!(Type::bool().to_string(), "bool");
        assert_eq!(Type::void().to_string(), "void");
    }

    #[test]
    fn test_json_shape() {
        let ty: Type = serde_json::from_str(r#"{"kind":"pointer","base":{"kind":"integer","bit_width":8}}"#).unwrap();
        assert_eq!(ty, Type::pointer(Type::u8()));
    }
}
