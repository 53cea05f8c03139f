use std::collections::HashMap;
use charon_common::TempId;
use crate::{Function, Instruction, Value};
use super::simplifycfg::remove_unreachable;
use super::Pass;

/// Folds arithmetic, comparisons and casts whose operands are all
/// constants, and turns conditional branches on constants into jumps.
/// Blocks only reachable through a dropped edge are removed.
pub struct ConstFold;

impl Pass for ConstFold {
    fn name(&self) -> &'static str {
        "constfold"
    }

    fn run_on_function(&mut self, function: &mut Function) -> bool {
        let mut changed = false;
        loop {
            let replacements = fold_round(function);
            if replacements.is_empty() {
                break;
            }
            changed = true;
            for block in &mut function.blocks {
                for instr in &mut block.instructions {
                    for operand in instr.operands_mut() {
                        if let Some(folded) = operand.as_temp().and_then(|id| replacements.get(&id)) {
                            *operand = folded.clone();
                        }
                    }
                }
            }
        }

        for block in &mut function.blocks {
            if let Some(last) = block.instructions.last_mut() {
                if let Instruction::BranchCond { condition: Value::Constant { value, .. }, true_label, false_label } = last {
                    let target = if *value != 0 { *true_label } else { *false_label };
                    *last = Instruction::Branch(target);
                    changed = true;
                }
            }
        }
        remove_unreachable(function) || changed
    }
}

/// Remove every foldable instruction and return the constants replacing them
fn fold_round(function: &mut Function) -> HashMap<TempId, Value> {
    let mut replacements = HashMap::new();
    for block in &mut function.blocks {
        block.instructions.retain(|instr| match fold(instr) {
            Some((id, value)) => {
                replacements.insert(id, value);
                false
            }
            None => true,
        });
    }
    replacements
}

fn fold(instr: &Instruction) -> Option<(TempId, Value)> {
    match instr {
        Instruction::Binary { result, op, lhs, rhs, result_type } => {
            let folded = op.evaluate(lhs.as_constant()?, rhs.as_constant()?, &lhs.ty())?;
            Some((*result, Value::constant(folded, result_type.clone())))
        }
        Instruction::Cast { result, op, value, target_type } => {
            let folded = op.evaluate(value.as_constant()?, target_type);
            Some((*result, Value::constant(folded, target_type.clone())))
        }
        _ => None,
    }
}
