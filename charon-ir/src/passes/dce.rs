use std::collections::HashSet;
use charon_common::TempId;
use crate::{Function, Instruction, Value};
use super::Pass;

/// Deletes side-effect free instructions whose results are never used.
/// A local slot that is only ever stored to counts as unused, so the
/// stores into it go too.
pub struct DeadCodeElim;

impl Pass for DeadCodeElim {
    fn name(&self) -> &'static str {
        "dce"
    }

    fn run_on_function(&mut self, function: &mut Function) -> bool {
        let mut changed = false;
        loop {
            let uses = collect_uses(function);
            let mut removed = false;
            for block in &mut function.blocks {
                let before = block.instructions.len();
                block.instructions.retain(|instr| match instr {
                    Instruction::Store { ptr: Value::Temp { id, .. }, .. } if uses.slots.contains(id) => {
                        uses.used.contains(id)
                    }
                    _ if instr.is_pure() => instr.result_id().is_some_and(|id| uses.used.contains(&id)),
                    _ => true,
                });
                removed |= block.instructions.len() != before;
            }
            if !removed {
                break;
            }
            changed = true;
        }
        changed
    }
}

struct Uses {
    /// Temporaries read anywhere other than as a store destination
    used: HashSet<TempId>,
    /// Results of `alloca`
    slots: HashSet<TempId>,
}

fn collect_uses(function: &Function) -> Uses {
    let mut used = HashSet::new();
    let mut slots = HashSet::new();
    for instr in function.blocks.iter().flat_map(|b| &b.instructions) {
        match instr {
            Instruction::Alloca { result, .. } => {
                slots.insert(*result);
            }
            // Stores through anything but a local slot are never removed
            Instruction::Store { value, .. } => {
                used.extend(value.as_temp());
            }
            other => {
                used.extend(other.operands().into_iter().filter_map(Value::as_temp));
            }
        }
    }
    Uses { used, slots }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IrBinaryOp, IrBuilder, IrType};

    #[test]
    fn test_removes_unused_arithmetic_and_write_only_slot() {
        let mut builder = IrBuilder::new("m");
        builder.declare_function("f", IrType::I32, vec![IrType::I32], false);
        builder.start_function("f").unwrap();
        let entry = builder.append_block("entry").unwrap();
        builder.position_at_end(entry).unwrap();
        let param = builder.param_value(0).unwrap();
        let slot = builder.build_entry_alloca(IrType::I32).unwrap();
        builder.build_store(param.clone(), slot).unwrap();
        builder.build_binary(IrBinaryOp::Mul, param.clone(), param.clone()).unwrap();
        builder.build_return(Some(param)).unwrap();
        let mut module = builder.finish();

        let function = module.get_function_mut("f").unwrap();
        assert!(DeadCodeElim.run_on_function(function));
        assert_eq!(function.blocks[0].instructions.len(), 1);
        assert!(matches!(function.blocks[0].instructions[0], Instruction::Return(Some(_))));
    }

    #[test]
    fn test_keeps_loaded_slot() {
        let mut builder = IrBuilder::new("m");
        builder.declare_function("f", IrType::I32, vec![IrType::I32], false);
        builder.start_function("f").unwrap();
        let entry = builder.append_block("entry").unwrap();
        builder.position_at_end(entry).unwrap();
        let param = builder.param_value(0).unwrap();
        let slot = builder.build_entry_alloca(IrType::I32).unwrap();
        builder.build_store(param, slot.clone()).unwrap();
        let loaded = builder.build_load(slot, IrType::I32).unwrap();
        builder.build_return(Some(loaded)).unwrap();
        let mut module = builder.finish();

        let function = module.get_function_mut("f").unwrap();
        assert!(!DeadCodeElim.run_on_function(function));
        assert_eq!(function.blocks[0].instructions.len(), 4);
    }
}
