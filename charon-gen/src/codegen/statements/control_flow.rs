//! Control flow statement code generation (if, while)
//!
//! Blocks that might end up unreachable are created detached and only
//! attached once something branches to them.

use log::trace;
use crate::codegen::{CodeGenerator, CodegenError};
use crate::node::Node;

pub fn generate_if(
    gen: &mut CodeGenerator,
    condition: &Node,
    body: &Node,
    else_body: Option<&Node>,
) -> Result<(), CodegenError> {
    let cond_val = gen.generate_condition(condition)?;

    let then_label = gen.builder.append_block("then")?;
    let else_label = else_body.map(|_| gen.builder.create_detached_block("else"));
    let merge_label = gen.builder.create_detached_block("merge");

    gen.builder
        .build_branch_cond(cond_val, then_label, else_label.unwrap_or(merge_label))?;

    // Then block
    gen.builder.position_at_end(then_label)?;
    gen.generate_statement(body)?;
    let mut merge_needed = false;
    if gen.falls_through() {
        gen.builder.build_branch(merge_label)?;
        merge_needed = true;
    }

    // Else block, or the false edge straight to merge
    match (else_label, else_body) {
        (Some(else_label), Some(else_body)) => {
            gen.builder.attach_block(else_label)?;
            gen.builder.position_at_end(else_label)?;
            gen.generate_statement(else_body)?;
            if gen.falls_through() {
                gen.builder.build_branch(merge_label)?;
                merge_needed = true;
            }
        }
        _ => merge_needed = true,
    }

    if merge_needed {
        gen.builder.attach_block(merge_label)?;
        gen.builder.position_at_end(merge_label)?;
    } else {
        trace!("both arms terminate, no merge block");
        gen.builder.clear_insertion_point();
    }
    Ok(())
}

pub fn generate_while(gen: &mut CodeGenerator, condition: &Node, body: &Node) -> Result<(), CodegenError> {
    let cond_label = gen.builder.append_block("cond")?;
    gen.builder.build_branch(cond_label)?;
    gen.builder.position_at_end(cond_label)?;
    let cond_val = gen.generate_condition(condition)?;

    let body_label = gen.builder.create_detached_block("body");
    let end_label = gen.builder.create_detached_block("end");
    gen.builder.build_branch_cond(cond_val, body_label, end_label)?;

    gen.builder.attach_block(body_label)?;
    gen.builder.position_at_end(body_label)?;
    gen.generate_statement(body)?;
    if gen.falls_through() {
        gen.builder.build_branch(cond_label)?;
    }

    gen.builder.attach_block(end_label)?;
    gen.builder.position_at_end(end_label)?;
    Ok(())
}
