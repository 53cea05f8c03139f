use std::collections::{HashSet, VecDeque};
use crate::{Function, Instruction};
use super::Pass;

/// Collapses conditional branches with identical targets and removes blocks
/// no longer reachable from the entry block.
pub struct SimplifyCfg;

impl Pass for SimplifyCfg {
    fn name(&self) -> &'static str {
        "simplifycfg"
    }

    fn run_on_function(&mut self, function: &mut Function) -> bool {
        let mut changed = false;

        for block in &mut function.blocks {
            if let Some(last) = block.instructions.last_mut() {
                if let Instruction::BranchCond { true_label, false_label, .. } = last {
                    if true_label == false_label {
                        let target = *true_label;
                        *last = Instruction::Branch(target);
                        changed = true;
                    }
                }
            }
        }

        remove_unreachable(function) || changed
    }
}

/// Drop blocks not reachable from the entry block. Returns true if any were
/// removed.
pub(super) fn remove_unreachable(function: &mut Function) -> bool {
    let Some(entry) = function.entry_block().map(|b| b.id) else {
        return false;
    };
    let mut reachable = HashSet::from([entry]);
    let mut queue = VecDeque::from([entry]);
    while let Some(label) = queue.pop_front() {
        let successors = function.get_block(label).map(|b| b.successors()).unwrap_or_default();
        for succ in successors {
            if reachable.insert(succ) {
                queue.push_back(succ);
            }
        }
    }

    let before = function.blocks.len();
    function.blocks.retain(|b| reachable.contains(&b.id));
    function.blocks.len() != before
}
