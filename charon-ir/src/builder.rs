//! IR Builder
//!
//! Owns the module under construction and an insertion cursor
//! (current function + current block). Blocks may be created detached and
//! attached to the function's block order later, so that blocks which turn
//! out to be unreachable are never emitted.

use charon_common::{LabelId, TempId};
use log::trace;
use thiserror::Error;
use crate::{
    BasicBlock, CastOp, Function, GlobalVariable, Instruction, IrBinaryOp, IrType, Linkage,
    Module, Value,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("No current function")]
    NoCurrentFunction,

    #[error("No insertion block")]
    NoCurrentBlock,

    #[error("Block L{0} not found")]
    BlockNotFound(LabelId),

    #[error("Function '{0}' is not declared")]
    FunctionNotFound(String),

    #[error("Function '{0}' is already defined")]
    DuplicateDefinition(String),

    #[error("Function '{0}' has no entry block")]
    NoEntryBlock(String),

    #[error("Function '{0}' has no parameter {1}")]
    ParameterOutOfRange(String, usize),
}

/// Builder for constructing IR
pub struct IrBuilder {
    module: Module,
    current_function: Option<usize>,
    current_block: Option<LabelId>,
    detached_blocks: Vec<BasicBlock>,
    next_temp_id: TempId,
    next_label_id: LabelId,
    next_global_id: u32,
}

impl IrBuilder {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module: Module::new(module_name.into()),
            current_function: None,
            current_block: None,
            detached_blocks: Vec::new(),
            next_temp_id: 0,
            next_label_id: 0,
            next_global_id: 0,
        }
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Consume the builder and hand out the finished module
    pub fn finish(self) -> Module {
        self.module
    }

    fn new_temp(&mut self) -> TempId {
        let temp = self.next_temp_id;
        self.next_temp_id += 1;
        temp
    }

    fn new_label(&mut self) -> LabelId {
        let label = self.next_label_id;
        self.next_label_id += 1;
        label
    }

    /// Register a signature in the module's function table. Re-declaring an
    /// existing name keeps the first declaration.
    pub fn declare_function(
        &mut self,
        name: &str,
        return_type: IrType,
        param_types: Vec<IrType>,
        is_vararg: bool,
    ) -> &Function {
        let index = match self.module.functions.iter().position(|f| f.name == name) {
            Some(index) => index,
            None => {
                trace!("declare @{name}");
                self.module.add_function(Function::new(name.to_string(), return_type, param_types, is_vararg));
                self.module.functions.len() - 1
            }
        };
        &self.module.functions[index]
    }

    /// Begin emitting the body of a previously declared function
    pub fn start_function(&mut self, name: &str) -> Result<(), BuilderError> {
        let index = self
            .module
            .functions
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| BuilderError::FunctionNotFound(name.to_string()))?;
        let function = &mut self.module.functions[index];
        if function.is_definition() {
            return Err(BuilderError::DuplicateDefinition(name.to_string()));
        }
        function.is_external = false;

        self.next_temp_id = function.parameters.len() as TempId;
        self.next_label_id = 0;
        self.current_function = Some(index);
        self.current_block = None;
        self.detached_blocks.clear();
        Ok(())
    }

    /// Stop emitting into the current function. Detached blocks that were
    /// never attached are dropped.
    pub fn finish_function(&mut self) {
        if !self.detached_blocks.is_empty() {
            trace!("dropping {} unattached block(s)", self.detached_blocks.len());
            self.detached_blocks.clear();
        }
        self.current_function = None;
        self.current_block = None;
    }

    fn function_mut(&mut self) -> Result<&mut Function, BuilderError> {
        let index = self.current_function.ok_or(BuilderError::NoCurrentFunction)?;
        Ok(&mut self.module.functions[index])
    }

    pub fn current_function(&self) -> Option<&Function> {
        self.current_function.map(|index| &self.module.functions[index])
    }

    pub fn param_value(&self, index: usize) -> Result<Value, BuilderError> {
        let function = self.current_function().ok_or(BuilderError::NoCurrentFunction)?;
        function
            .param_value(index)
            .ok_or_else(|| BuilderError::ParameterOutOfRange(function.name.clone(), index))
    }

    /// Create a block at the end of the current function's block order
    pub fn append_block(&mut self, name: &str) -> Result<LabelId, BuilderError> {
        let label = self.new_label();
        self.function_mut()?.add_block(BasicBlock::new(label, name));
        Ok(label)
    }

    /// Create a block that is not yet part of the function
    pub fn create_detached_block(&mut self, name: &str) -> LabelId {
        let label = self.new_label();
        self.detached_blocks.push(BasicBlock::new(label, name));
        label
    }

    /// Move a detached block to the end of the current function
    pub fn attach_block(&mut self, label: LabelId) -> Result<(), BuilderError> {
        let position = self
            .detached_blocks
            .iter()
            .position(|b| b.id == label)
            .ok_or(BuilderError::BlockNotFound(label))?;
        let block = self.detached_blocks.remove(position);
        self.function_mut()?.add_block(block);
        Ok(())
    }

    pub fn position_at_end(&mut self, label: LabelId) -> Result<(), BuilderError> {
        if self.function_mut()?.get_block(label).is_none() {
            return Err(BuilderError::BlockNotFound(label));
        }
        self.current_block = Some(label);
        Ok(())
    }

    pub fn clear_insertion_point(&mut self) {
        self.current_block = None;
    }

    pub fn current_block(&self) -> Option<LabelId> {
        self.current_block
    }

    pub fn current_block_has_terminator(&self) -> bool {
        match (self.current_function(), self.current_block) {
            (Some(function), Some(label)) => function
                .get_block(label)
                .is_some_and(BasicBlock::has_terminator),
            _ => false,
        }
    }

    fn add_instruction(&mut self, instr: Instruction) -> Result<(), BuilderError> {
        let label = self.current_block.ok_or(BuilderError::NoCurrentBlock)?;
        let block = self
            .function_mut()?
            .get_block_mut(label)
            .ok_or(BuilderError::BlockNotFound(label))?;
        block.add_instruction(instr);
        Ok(())
    }

    pub fn build_binary(&mut self, op: IrBinaryOp, lhs: Value, rhs: Value) -> Result<Value, BuilderError> {
        let result = self.new_temp();
        let result_type = op.result_type(&lhs.ty());
        self.add_instruction(Instruction::Binary { result, op, lhs, rhs, result_type: result_type.clone() })?;
        Ok(Value::temp(result, result_type))
    }

    /// Allocate a slot in the entry block's prologue, after any allocas
    /// already placed there, independent of the current insertion point.
    pub fn build_entry_alloca(&mut self, alloc_type: IrType) -> Result<Value, BuilderError> {
        let result = self.new_temp();
        let function = self.function_mut()?;
        let name = function.name.clone();
        let entry = function
            .entry_block_mut()
            .ok_or(BuilderError::NoEntryBlock(name))?;
        let position = entry
            .instructions
            .iter()
            .take_while(|instr| matches!(instr, Instruction::Alloca { .. }))
            .count();
        entry.instructions.insert(position, Instruction::Alloca { result, alloc_type });
        Ok(Value::temp(result, IrType::Ptr))
    }

    pub fn build_load(&mut self, ptr: Value, result_type: IrType) -> Result<Value, BuilderError> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Load { result, ptr, result_type: result_type.clone() })?;
        Ok(Value::temp(result, result_type))
    }

    pub fn build_store(&mut self, value: Value, ptr: Value) -> Result<(), BuilderError> {
        self.add_instruction(Instruction::Store { value, ptr })
    }

    /// Call a function from the module's function table using its recorded
    /// signature. Returns `None` for void callees.
    pub fn build_call(&mut self, function: &str, args: Vec<Value>) -> Result<Option<Value>, BuilderError> {
        let callee = self
            .module
            .get_function(function)
            .ok_or_else(|| BuilderError::FunctionNotFound(function.to_string()))?;
        let fn_type = callee.fn_type();
        let return_type = callee.return_type.clone();

        let result = if return_type.is_void() { None } else { Some(self.new_temp()) };
        self.add_instruction(Instruction::Call {
            result,
            function: function.to_string(),
            fn_type,
            args,
        })?;
        Ok(result.map(|id| Value::temp(id, return_type)))
    }

    pub fn build_cast(&mut self, op: CastOp, value: Value, target_type: IrType) -> Result<Value, BuilderError> {
        let result = self.new_temp();
        self.add_instruction(Instruction::Cast { result, op, value, target_type: target_type.clone() })?;
        Ok(Value::temp(result, target_type))
    }

    pub fn build_return(&mut self, value: Option<Value>) -> Result<(), BuilderError> {
        self.add_instruction(Instruction::Return(value))
    }

    pub fn build_branch(&mut self, label: LabelId) -> Result<(), BuilderError> {
        self.add_instruction(Instruction::Branch(label))
    }

    pub fn build_branch_cond(&mut self, condition: Value, true_label: LabelId, false_label: LabelId) -> Result<(), BuilderError> {
        self.add_instruction(Instruction::BranchCond { condition, true_label, false_label })
    }

    /// Add a private NUL-terminated byte string and return its address
    pub fn build_global_string(&mut self, value: &str) -> Value {
        let name = format!(".str.{}", self.next_global_id);
        self.next_global_id += 1;

        let mut bytes = value.as_bytes().to_vec();
        bytes.push(0);
        self.module.add_global(GlobalVariable {
            name: name.clone(),
            var_type: IrType::Array {
                size: bytes.len() as u64,
                element_type: Box::new(IrType::I8),
            },
            is_constant: true,
            initializer: Some(bytes),
            linkage: Linkage::Private,
        });
        Value::Global(name)
    }
}
