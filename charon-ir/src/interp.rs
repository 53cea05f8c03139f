//! Reference interpreter
//!
//! Executes defined functions directly on the IR. Every stack slot and every
//! byte of global data occupies one memory cell; an address is the cell index
//! plus one, so zero never names a live cell.

use std::collections::HashMap;
use charon_common::{LabelId, TempId};
use log::trace;
use thiserror::Error;
use crate::{Function, Instruction, Module, Value};

pub const MAX_CALL_DEPTH: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error("Function '{0}' not found")]
    UnknownFunction(String),

    #[error("Cannot execute external function '{0}'")]
    ExternalCall(String),

    #[error("Function '{function}' expects {expected} argument(s), got {found}")]
    ArityMismatch { function: String, expected: usize, found: usize },

    #[error("Division by zero in '{0}'")]
    DivisionByZero(String),

    #[error("Invalid memory address {0:#x}")]
    InvalidAddress(u64),

    #[error("Read of undefined value %{0}")]
    UndefinedValue(TempId),

    #[error("Global '@{0}' not found")]
    UndefinedGlobal(String),

    #[error("Block L{0} not found")]
    MissingBlock(LabelId),

    #[error("Function '{0}' has no body")]
    NoEntryBlock(String),

    #[error("Block L{0} has no terminator")]
    MissingTerminator(LabelId),

    #[error("Call depth exceeded {MAX_CALL_DEPTH}")]
    CallDepthExceeded,
}

pub struct Interpreter<'m> {
    module: &'m Module,
    memory: Vec<u64>,
    globals: HashMap<&'m str, u64>,
    depth: usize,
}

impl<'m> Interpreter<'m> {
    pub fn new(module: &'m Module) -> Self {
        let mut memory = Vec::new();
        let mut globals = HashMap::new();
        for global in &module.globals {
            globals.insert(global.name.as_str(), memory.len() as u64 + 1);
            match &global.initializer {
                Some(bytes) => memory.extend(bytes.iter().map(|&b| u64::from(b))),
                None => {
                    let cells = global.var_type.bit_width().map_or(1, |bits| bits.div_ceil(8).max(1));
                    memory.extend(std::iter::repeat(0).take(cells as usize));
                }
            }
        }
        Self { module, memory, globals, depth: 0 }
    }

    /// Read one cell. Used by tests to inspect string data.
    pub fn read(&self, address: u64) -> Result<u64, ExecError> {
        address
            .checked_sub(1)
            .and_then(|index| self.memory.get(index as usize))
            .copied()
            .ok_or(ExecError::InvalidAddress(address))
    }

    fn write(&mut self, address: u64, value: u64) -> Result<(), ExecError> {
        let cell = address
            .checked_sub(1)
            .and_then(|index| self.memory.get_mut(index as usize))
            .ok_or(ExecError::InvalidAddress(address))?;
        *cell = value;
        Ok(())
    }

    /// Call a defined function. Arguments are masked to the parameter widths.
    pub fn call(&mut self, name: &str, args: &[u64]) -> Result<Option<u64>, ExecError> {
        let function = self
            .module
            .get_function(name)
            .ok_or_else(|| ExecError::UnknownFunction(name.to_string()))?;
        if !function.is_definition() {
            return Err(ExecError::ExternalCall(name.to_string()));
        }
        if args.len() != function.parameters.len() {
            return Err(ExecError::ArityMismatch {
                function: name.to_string(),
                expected: function.parameters.len(),
                found: args.len(),
            });
        }
        if self.depth >= MAX_CALL_DEPTH {
            return Err(ExecError::CallDepthExceeded);
        }

        self.depth += 1;
        let result = self.run(function, args);
        self.depth -= 1;
        result
    }

    fn run(&mut self, function: &'m Function, args: &[u64]) -> Result<Option<u64>, ExecError> {
        trace!("exec @{}", function.name);
        let mut frame: HashMap<TempId, u64> = function
            .parameters
            .iter()
            .zip(args)
            .map(|((id, ty), value)| (*id, value & ty.mask()))
            .collect();

        let mut block = function
            .entry_block()
            .ok_or_else(|| ExecError::NoEntryBlock(function.name.clone()))?;

        loop {
            let mut next = None;
            for instr in &block.instructions {
                match instr {
                    Instruction::Binary { result, op, lhs, rhs, .. } => {
                        let ty = lhs.ty();
                        let (l, r) = (self.eval(&frame, lhs)?, self.eval(&frame, rhs)?);
                        let value = op
                            .evaluate(l, r, &ty)
                            .ok_or_else(|| ExecError::DivisionByZero(function.name.clone()))?;
                        frame.insert(*result, value);
                    }
                    Instruction::Alloca { result, .. } => {
                        self.memory.push(0);
                        frame.insert(*result, self.memory.len() as u64);
                    }
                    Instruction::Load { result, ptr, result_type } => {
                        let address = self.eval(&frame, ptr)?;
                        frame.insert(*result, self.read(address)? & result_type.mask());
                    }
                    Instruction::Store { value, ptr } => {
                        let value = self.eval(&frame, value)?;
                        let address = self.eval(&frame, ptr)?;
                        self.write(address, value)?;
                    }
                    Instruction::Call { result, function: callee, args, .. } => {
                        let values = args
                            .iter()
                            .map(|arg| self.eval(&frame, arg))
                            .collect::<Result<Vec<_>, _>>()?;
                        let returned = self.call(callee, &values)?;
                        if let (Some(result), Some(value)) = (result, returned) {
                            frame.insert(*result, value);
                        }
                    }
                    Instruction::Cast { result, op, value, target_type } => {
                        let value = self.eval(&frame, value)?;
                        frame.insert(*result, op.evaluate(value, target_type));
                    }
                    Instruction::Return(value) => {
                        return value.as_ref().map(|v| self.eval(&frame, v)).transpose();
                    }
                    Instruction::Branch(label) => {
                        next = Some(*label);
                        break;
                    }
                    Instruction::BranchCond { condition, true_label, false_label } => {
                        let taken = if self.eval(&frame, condition)? != 0 { true_label } else { false_label };
                        next = Some(*taken);
                        break;
                    }
                }
            }

            let label = next.ok_or(ExecError::MissingTerminator(block.id))?;
            block = function.get_block(label).ok_or(ExecError::MissingBlock(label))?;
        }
    }

    fn eval(&self, frame: &HashMap<TempId, u64>, value: &Value) -> Result<u64, ExecError> {
        match value {
            Value::Temp { id, .. } => frame.get(id).copied().ok_or(ExecError::UndefinedValue(*id)),
            Value::Constant { value, .. } => Ok(*value),
            Value::Global(name) => self
                .globals
                .get(name.as_str())
                .copied()
                .ok_or_else(|| ExecError::UndefinedGlobal(name.clone())),
            Value::Undef(_) => Ok(0),
        }
    }
}

/// Convenience wrapper: run `name` in a fresh interpreter over `module`
pub fn execute(module: &Module, name: &str, args: &[u64]) -> Result<Option<u64>, ExecError> {
    Interpreter::new(module).call(name, args)
}
