//! Lexical scopes
//!
//! An explicit stack of frames. Each frame lists its bindings in declaration
//! order; lookup walks frames innermost first.

use charon_ir::{IrType, Value};
use super::errors::CodegenError;

/// Storage slot bound to a source-level name
#[derive(Debug, Clone, PartialEq)]
pub struct VarInfo {
    /// Address of the slot
    pub ptr: Value,
    /// Representation the slot was allocated with
    pub ir_type: IrType,
}

#[derive(Debug, Default)]
pub struct ScopeStack {
    frames: Vec<Vec<(String, VarInfo)>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self) {
        self.frames.push(Vec::new());
    }

    /// Discard the innermost frame and its bindings
    pub fn pop(&mut self) -> Result<(), CodegenError> {
        self.frames
            .pop()
            .map(|_| ())
            .ok_or_else(|| CodegenError::internal("scope stack underflow"))
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind in the innermost frame, shadowing any outer binding
    pub fn bind(&mut self, name: &str, info: VarInfo) -> Result<(), CodegenError> {
        let frame = self
            .frames
            .last_mut()
            .ok_or_else(|| CodegenError::internal(format!("no scope to bind `{name}` in")))?;
        frame.push((name.to_string(), info));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&VarInfo> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.iter().rev())
            .find(|(bound, _)| bound == name)
            .map(|(_, info)| info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn slot(id: u32) -> VarInfo {
        VarInfo { ptr: Value::temp(id, IrType::Ptr), ir_type: IrType::I32 }
    }

    #[test]
    fn test_shadowing_and_pop() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.bind("x", slot(1)).unwrap();
        scopes.push();
        scopes.bind("x", slot(2)).unwrap();
        assert_eq!(scopes.lookup("x"), Some(&slot(2)));

        scopes.pop().unwrap();
        assert_eq!(scopes.lookup("x"), Some(&slot(1)));
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn test_missing_name_is_none() {
        let mut scopes = ScopeStack::new();
        scopes.push();
        scopes.bind("a", slot(0)).unwrap();
        assert_eq!(scopes.lookup("b"), None);
    }

    #[test]
    fn test_empty_stack_errors() {
        let mut scopes = ScopeStack::new();
        assert!(scopes.bind("x", slot(0)).is_err());
        assert!(scopes.pop().is_err());
    }
}
