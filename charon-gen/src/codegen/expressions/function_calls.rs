//! Function call code generation

use charon_common::SourceLocation;
use charon_ir::Value;
use log::trace;
use crate::codegen::{CodeGenerator, CodegenError};
use crate::node::Node;

/// Arguments are lowered left to right and brought to the callee's declared
/// parameter types; extra variadic arguments keep their own type.
pub fn generate_function_call(
    gen: &mut CodeGenerator,
    name: &str,
    args: &[Node],
    location: &SourceLocation,
) -> Result<Option<Value>, CodegenError> {
    let param_types: Vec<_> = gen
        .builder
        .module()
        .get_function(name)
        .ok_or_else(|| CodegenError::internal(format!("call to undeclared function `{name}` at {location}")))?
        .parameters
        .iter()
        .map(|(_, ty)| ty.clone())
        .collect();

    let mut values = Vec::with_capacity(args.len());
    for (index, arg) in args.iter().enumerate() {
        let value = gen.generate_value(arg)?;
        values.push(match param_types.get(index) {
            Some(ty) => gen.coerce(value, ty)?,
            None => value,
        });
    }

    trace!("call @{name} with {} argument(s)", values.len());
    Ok(gen.builder.build_call(name, values)?)
}
