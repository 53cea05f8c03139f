//! Local variable declarations

use log::trace;
use crate::codegen::{CodeGenerator, CodegenError, VarInfo};
use crate::node::Node;
use crate::types::Type;

/// The slot goes into the entry block prologue; the initializer is stored at
/// the current position. The name is bound after the initializer is lowered,
/// so `var x = x` reads the outer `x`.
pub fn generate_declaration(
    gen: &mut CodeGenerator,
    ty: &Type,
    name: &str,
    initial: Option<&Node>,
) -> Result<(), CodegenError> {
    let ir_type = gen.types.map_type(ty)?;
    let slot = gen.builder.build_entry_alloca(ir_type.clone())?;
    trace!("local `{name}`: {ty} in {slot}");

    if let Some(initial) = initial {
        let value = gen.generate_value(initial)?;
        let value = gen.coerce(value, &ir_type)?;
        gen.builder.build_store(value, slot.clone())?;
    }

    gen.scopes.bind(name, VarInfo { ptr: slot, ir_type })
}
