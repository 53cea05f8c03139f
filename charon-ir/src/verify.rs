//! Structural verifier
//!
//! Checks the invariants every lowered module must satisfy: each block ends
//! in exactly one terminator, every block is reachable from the entry, every
//! used temporary is defined and operand types agree.

use std::collections::{HashMap, HashSet, VecDeque};
use charon_common::{LabelId, TempId};
use thiserror::Error;
use crate::{CastOp, Function, Instruction, IrType, Module, Value};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("in function '{function}'{}: {message}", .block.map(|b| format!(", block L{b}")).unwrap_or_default())]
pub struct VerifyError {
    pub function: String,
    pub block: Option<LabelId>,
    pub message: String,
}

fn err(function: &Function, block: Option<LabelId>, message: impl Into<String>) -> VerifyError {
    VerifyError {
        function: function.name.clone(),
        block,
        message: message.into(),
    }
}

pub fn verify_module(module: &Module) -> Result<(), VerifyError> {
    let mut seen = HashSet::new();
    for function in &module.functions {
        if !seen.insert(function.name.as_str()) {
            return Err(err(function, None, "duplicate function name"));
        }
        if function.is_definition() {
            verify_function(module, function)?;
        } else if !function.blocks.is_empty() {
            return Err(err(function, None, "declaration has a body"));
        }
    }
    Ok(())
}

pub fn verify_function(module: &Module, function: &Function) -> Result<(), VerifyError> {
    let entry = function
        .entry_block()
        .ok_or_else(|| err(function, None, "definition has no blocks"))?;

    let mut labels = HashSet::new();
    for block in &function.blocks {
        if !labels.insert(block.id) {
            return Err(err(function, Some(block.id), "duplicate block label"));
        }
    }

    // Terminator discipline
    for block in &function.blocks {
        if !block.has_terminator() {
            return Err(err(function, Some(block.id), "block does not end in a terminator"));
        }
        let body = &block.instructions[..block.instructions.len() - 1];
        if body.iter().any(Instruction::is_terminator) {
            return Err(err(function, Some(block.id), "terminator before end of block"));
        }
        for target in block.successors() {
            if !labels.contains(&target) {
                return Err(err(function, Some(block.id), format!("branch to missing block L{target}")));
            }
            if target == entry.id {
                return Err(err(function, Some(block.id), "branch to entry block"));
            }
        }
    }

    // Reachability
    let mut reachable = HashSet::from([entry.id]);
    let mut queue = VecDeque::from([entry.id]);
    while let Some(label) = queue.pop_front() {
        if let Some(block) = function.get_block(label) {
            for succ in block.successors() {
                if reachable.insert(succ) {
                    queue.push_back(succ);
                }
            }
        }
    }
    if let Some(block) = function.blocks.iter().find(|b| !reachable.contains(&b.id)) {
        return Err(err(function, Some(block.id), "unreachable block"));
    }

    // Definitions
    let mut defined: HashMap<TempId, IrType> = function.parameters.iter().cloned().collect();
    for block in &function.blocks {
        for instr in &block.instructions {
            if let Some(Value::Temp { id, ty }) = instr.result() {
                if defined.insert(id, ty).is_some() {
                    return Err(err(function, Some(block.id), format!("%{id} defined twice")));
                }
            }
        }
    }

    for block in &function.blocks {
        for instr in &block.instructions {
            for operand in instr.operands() {
                match operand {
                    Value::Temp { id, ty } => match defined.get(id) {
                        None => {
                            return Err(err(function, Some(block.id), format!("use of undefined value %{id}")));
                        }
                        Some(def_ty) if def_ty != ty => {
                            return Err(err(
                                function,
                                Some(block.id),
                                format!("%{id} used as {ty} but defined as {def_ty}"),
                            ));
                        }
                        Some(_) => {}
                    },
                    Value::Global(name) if module.get_global(name).is_none() => {
                        return Err(err(function, Some(block.id), format!("use of undefined global @{name}")));
                    }
                    _ => {}
                }
            }
            verify_instruction(module, function, block.id, instr)?;
        }
    }

    Ok(())
}

fn verify_instruction(
    module: &Module,
    function: &Function,
    block: LabelId,
    instr: &Instruction,
) -> Result<(), VerifyError> {
    let fail = |message: String| -> Result<(), VerifyError> { Err(err(function, Some(block), message)) };

    match instr {
        Instruction::Binary { op, lhs, rhs, result_type, .. } => {
            if lhs.ty() != rhs.ty() {
                return fail(format!("{op} operands disagree: {} vs {}", lhs.ty(), rhs.ty()));
            }
            let ty = lhs.ty();
            if !(ty.is_integer() || (op.is_comparison() && ty.is_pointer())) {
                return fail(format!("{op} on unsupported type {ty}"));
            }
            if *result_type != op.result_type(&lhs.ty()) {
                return fail(format!("{op} has result type {result_type}"));
            }
        }
        Instruction::Alloca { alloc_type, .. } => {
            if alloc_type.bit_width().is_none() {
                return fail(format!("alloca of unsized type {alloc_type}"));
            }
        }
        Instruction::Load { ptr, .. } | Instruction::Store { ptr, .. } => {
            if !ptr.ty().is_pointer() {
                return fail(format!("memory access through non-pointer {}", ptr.ty()));
            }
        }
        Instruction::Call { function: callee, fn_type, args, .. } => {
            let target = module
                .get_function(callee)
                .ok_or_else(|| err(function, Some(block), format!("call to undeclared @{callee}")))?;
            if target.fn_type() != *fn_type {
                return fail(format!("call to @{callee} with mismatched signature {fn_type}"));
            }
            let fixed = target.parameters.len();
            if args.len() < fixed || (!target.is_vararg && args.len() != fixed) {
                return fail(format!("call to @{callee} with {} argument(s), expected {fixed}", args.len()));
            }
            for (arg, (_, param_ty)) in args.iter().zip(&target.parameters) {
                if arg.ty() != *param_ty {
                    return fail(format!("argument {arg} to @{callee} has type {}, expected {param_ty}", arg.ty()));
                }
            }
        }
        Instruction::Cast { op, value, target_type, .. } => {
            let (from, to) = (value.ty(), target_type);
            let (Some(from_bits), Some(to_bits)) = (from.bit_width(), to.bit_width()) else {
                return fail(format!("{op} between unsized types"));
            };
            if !from.is_integer() || !to.is_integer() {
                return fail(format!("{op} from {from} to {to} is not an integer cast"));
            }
            let ok = match op {
                CastOp::Trunc => from_bits > to_bits,
                CastOp::ZExt => from_bits < to_bits,
            };
            if !ok {
                return fail(format!("{op} from {from} to {to} does not change width in the right direction"));
            }
        }
        Instruction::Return(value) => {
            let returned = value.as_ref().map(Value::ty).unwrap_or(IrType::Void);
            if returned != function.return_type {
                return fail(format!("returns {returned} from function returning {}", function.return_type));
            }
        }
        Instruction::BranchCond { condition, .. } => {
            if condition.ty() != IrType::I1 {
                return fail(format!("branch condition has type {}", condition.ty()));
            }
        }
        Instruction::Branch(_) => {}
    }
    Ok(())
}
