//! Function code generation

use charon_ir::Value;
use log::debug;
use crate::node::{FunctionDecl, Node};
use super::super::{CodegenError, VarInfo};
use super::CodeGenerator;

/// Register a signature in the module's function table
pub fn declare_function(gen: &mut CodeGenerator, decl: &FunctionDecl) -> Result<(), CodegenError> {
    let return_type = gen.types.map_type(&decl.return_type)?;
    let param_types = decl
        .arguments
        .iter()
        .map(|(_, ty)| gen.types.map_type(ty))
        .collect::<Result<Vec<_>, _>>()?;
    gen.builder.declare_function(&decl.name, return_type, param_types, decl.is_varargs);
    Ok(())
}

/// Generate IR for a function definition
pub fn generate_function(gen: &mut CodeGenerator, decl: &FunctionDecl, body: &Node) -> Result<(), CodegenError> {
    debug!("lowering function '{}'", decl.name);
    declare_function(gen, decl)?;
    gen.builder.start_function(&decl.name)?;

    let entry = gen.builder.append_block("entry")?;
    gen.builder.position_at_end(entry)?;

    // Parameters get slots like any other local
    gen.scopes.push();
    for (index, (name, ty)) in decl.arguments.iter().enumerate() {
        let ir_type = gen.types.map_type(ty)?;
        let slot = gen.builder.build_entry_alloca(ir_type.clone())?;
        let param = gen.builder.param_value(index)?;
        gen.builder.build_store(param, slot.clone())?;
        gen.scopes.bind(name, VarInfo { ptr: slot, ir_type })?;
    }

    gen.generate_statement(body)?;
    gen.scopes.pop()?;

    // Implicit return when control reaches the end of the body
    if gen.falls_through() {
        let return_type = gen.types.map_type(&decl.return_type)?;
        if return_type.is_void() {
            gen.builder.build_return(None)?;
        } else {
            gen.builder.build_return(Some(Value::zero(return_type)))?;
        }
    }

    gen.builder.finish_function();
    Ok(())
}
