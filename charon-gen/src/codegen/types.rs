//! Type conversion utilities

use std::collections::HashMap;
use charon_ir::IrType;
use super::errors::CodegenError;
use crate::types::Type;

/// Backend representations of every primitive, built once per compilation
#[derive(Debug, Clone)]
pub struct TypeMap {
    void: IrType,
    ptr: IrType,
    integers: HashMap<u32, IrType>,
}

impl TypeMap {
    pub fn new() -> Self {
        let integers = [1, 8, 16, 32, 64]
            .into_iter()
            .filter_map(|bits| IrType::int(bits).map(|ty| (bits, ty)))
            .collect();
        Self {
            void: IrType::Void,
            ptr: IrType::Ptr,
            integers,
        }
    }

    /// Convert a source type to its backend representation. Pointers are
    /// opaque regardless of their base type.
    pub fn map_type(&self, ty: &Type) -> Result<IrType, CodegenError> {
        match ty {
            Type::Void => Ok(self.void.clone()),
            Type::Pointer { .. } => Ok(self.ptr.clone()),
            Type::Integer { bit_width } => self
                .integers
                .get(bit_width)
                .cloned()
                .ok_or_else(|| CodegenError::internal(format!("no representation for {bit_width}-bit integers"))),
        }
    }
}

impl Default for TypeMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_map_primitives() {
        let types = TypeMap::new();
        assert_eq!(types.map_type(&Type::void()), Ok(IrType::Void));
        assert_eq!(types.map_type(&Type::bool()), Ok(IrType::I1));
        assert_eq!(types.map_type(&Type::u8()), Ok(IrType::I8));
        assert_eq!(types.map_type(&Type::u16()), Ok(IrType::I16));
        assert_eq!(types.map_type(&Type::u32()), Ok(IrType::I32));
        assert_eq!(types.map_type(&Type::u64()), Ok(IrType::I64));
    }

    #[test]
    fn test_pointers_are_opaque() {
        let types = TypeMap::new();
        assert_eq!(types.map_type(&Type::pointer(Type::u8())), Ok(IrType::Ptr));
        assert_eq!(types.map_type(&Type::pointer(Type::pointer(Type::void()))), Ok(IrType::Ptr));
    }

    #[test]
    fn test_unmapped_width_is_internal() {
        let err = TypeMap::new().map_type(&Type::Integer { bit_width: 24 }).unwrap_err();
        assert!(err.is_internal());
    }
}
