//! IR Operations
//!
//! Binary arithmetic and integer comparisons, plus the width-changing casts.
//! Evaluation helpers are shared by constant folding and the interpreter.

use serde::{Deserialize, Serialize};
use std::fmt;
use crate::types::IrType;

/// Binary operations in IR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IrBinaryOp {
    // Arithmetic (wrapping)
    Add, Sub, Mul,
    SDiv, UDiv,    // Signed/unsigned division
    SRem, URem,    // Signed/unsigned remainder

    // Comparison (return i1)
    Eq, Ne,
    Ult, Ule, Ugt, Uge, // Unsigned comparisons
}

impl IrBinaryOp {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            IrBinaryOp::Eq | IrBinaryOp::Ne | IrBinaryOp::Ult | IrBinaryOp::Ule | IrBinaryOp::Ugt | IrBinaryOp::Uge
        )
    }

    /// Result representation for operands of type `operand`
    pub fn result_type(self, operand: &IrType) -> IrType {
        if self.is_comparison() { IrType::I1 } else { operand.clone() }
    }

    /// Evaluate on masked operands of type `ty`. Returns `None` on division by zero.
    pub fn evaluate(self, lhs: u64, rhs: u64, ty: &IrType) -> Option<u64> {
        let mask = ty.mask();
        let bits = ty.bit_width().unwrap_or(64);
        let (lhs, rhs) = (lhs & mask, rhs & mask);
        let value = match self {
            IrBinaryOp::Add => lhs.wrapping_add(rhs),
            IrBinaryOp::Sub => lhs.wrapping_sub(rhs),
            IrBinaryOp::Mul => lhs.wrapping_mul(rhs),
            IrBinaryOp::UDiv => lhs.checked_div(rhs)?,
            IrBinaryOp::URem => lhs.checked_rem(rhs)?,
            IrBinaryOp::SDiv => {
                let (l, r) = (sign_extend(lhs, bits), sign_extend(rhs, bits));
                if r == 0 {
                    return None;
                }
                l.wrapping_div(r) as u64
            }
            IrBinaryOp::SRem => {
                let (l, r) = (sign_extend(lhs, bits), sign_extend(rhs, bits));
                if r == 0 {
                    return None;
                }
                l.wrapping_rem(r) as u64
            }
            IrBinaryOp::Eq => (lhs == rhs) as u64,
            IrBinaryOp::Ne => (lhs != rhs) as u64,
            IrBinaryOp::Ult => (lhs < rhs) as u64,
            IrBinaryOp::Ule => (lhs <= rhs) as u64,
            IrBinaryOp::Ugt => (lhs > rhs) as u64,
            IrBinaryOp::Uge => (lhs >= rhs) as u64,
        };
        Some(value & self.result_type(ty).mask())
    }
}

/// Interpret the low `bits` bits of `value` as a two's-complement integer
pub fn sign_extend(value: u64, bits: u32) -> i64 {
    if bits == 0 || bits >= 64 {
        return value as i64;
    }
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

impl fmt::Display for IrBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            IrBinaryOp::Add => "add",
            IrBinaryOp::Sub => "sub",
            IrBinaryOp::Mul => "mul",
            IrBinaryOp::SDiv => "sdiv",
            IrBinaryOp::UDiv => "udiv",
            IrBinaryOp::SRem => "srem",
            IrBinaryOp::URem => "urem",
            IrBinaryOp::Eq => "icmp eq",
            IrBinaryOp::Ne => "icmp ne",
            IrBinaryOp::Ult => "icmp ult",
            IrBinaryOp::Ule => "icmp ule",
            IrBinaryOp::Ugt => "icmp ugt",
            IrBinaryOp::Uge => "icmp uge",
        };
        write!(f, "{op_str}")
    }
}

/// Width-changing integer casts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastOp {
    Trunc,
    ZExt,
}

impl CastOp {
    pub fn evaluate(self, value: u64, target: &IrType) -> u64 {
        // Operands are kept masked, so zero-extension is the identity.
        value & target.mask()
    }
}

impl fmt::Display for CastOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastOp::Trunc => write!(f, "trunc"),
            CastOp::ZExt => write!(f, "zext"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_sub_at_width() {
        assert_eq!(IrBinaryOp::Sub.evaluate(0, 1, &IrType::I32), Some(4294967295));
        assert_eq!(IrBinaryOp::Add.evaluate(255, 1, &IrType::I8), Some(0));
    }

    #[test]
    fn test_srem_is_signed_at_width() {
        // -7 srem 2 == -1 in 8 bits
        assert_eq!(IrBinaryOp::SRem.evaluate(0xF9, 2, &IrType::I8), Some(0xFF));
        assert_eq!(IrBinaryOp::URem.evaluate(0xF9, 2, &IrType::I8), Some(1));
    }

    #[test]
    fn test_division_by_zero_does_not_fold() {
        assert_eq!(IrBinaryOp::UDiv.evaluate(1, 0, &IrType::I32), None);
        assert_eq!(IrBinaryOp::SRem.evaluate(1, 0, &IrType::I32), None);
    }

    #[test]
    fn test_comparisons_are_unsigned() {
        assert_eq!(IrBinaryOp::Ugt.evaluate(0xFF, 1, &IrType::I8), Some(1));
        assert_eq!(IrBinaryOp::Ult.evaluate(0xFF, 1, &IrType::I8), Some(0));
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xFF, 8), -1);
        assert_eq!(sign_extend(0x7F, 8), 127);
        assert_eq!(sign_extend(u64::MAX, 64), -1);
    }
}
