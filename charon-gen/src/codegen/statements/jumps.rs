//! Return statements

use crate::codegen::{CodeGenerator, CodegenError};
use crate::node::Node;

pub fn generate_return(gen: &mut CodeGenerator, value: Option<&Node>) -> Result<(), CodegenError> {
    let Some(value) = value else {
        gen.builder.build_return(None)?;
        return Ok(());
    };

    let return_type = gen
        .builder
        .current_function()
        .map(|f| f.return_type.clone())
        .ok_or_else(|| CodegenError::internal("return outside of a function"))?;
    let value = gen.generate_value(value)?;
    let value = gen.coerce(value, &return_type)?;
    gen.builder.build_return(Some(value))?;
    Ok(())
}
