//! Charon Compiler Driver
//!
//! Reads a validated tree in JSON form, lowers it and either writes the
//! module or executes one of its functions.

mod cli;

use anyhow::{Context, Result};
use charon_common::{CompilerError, ErrorReporter};
use charon_gen::Node;
use charon_ir::{execute, Module};
use clap::Parser;
use cli::{Cli, Command};
use colored::*;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// Exit status for internal compiler errors (EX_SOFTWARE)
const EXIT_INTERNAL: i32 = 70;

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        let internal = e.downcast_ref::<CompilerError>().is_some_and(CompilerError::is_internal);
        if internal {
            eprintln!("{}: {:#}", "internal compiler error".red().bold(), e);
            process::exit(EXIT_INTERNAL);
        }
        eprintln!("{}: {:#}", "error".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Compile { input, output, passes, print_ir, emit_json } => {
            let module = compile_file(&input, &passes)?;

            if print_ir {
                print!("{module}");
            }
            if let Some(path) = emit_json {
                let json = serde_json::to_string_pretty(&module)?;
                fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
            }

            let output = output.unwrap_or_else(|| default_output(&input));
            module
                .write_to_file(&output)
                .map_err(CompilerError::from)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("{}", format!("Module written to {}", output.display()).green());
        }
        Command::Run { input, entry, args, passes } => {
            let module = compile_file(&input, &passes)?;
            debug!("executing @{entry} with {args:?}");
            if let Some(value) = execute(&module, &entry, &args)? {
                println!("{value}");
            }
        }
    }
    Ok(())
}

fn compile_file(input: &Path, passes: &str) -> Result<Module> {
    let text = fs::read_to_string(input)
        .map_err(CompilerError::from)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let program = Node::from_json(&text).with_context(|| format!("failed to parse {}", input.display()))?;

    let mut reporter = ErrorReporter::new();
    let result = charon_gen::compile(&program, passes, &mut reporter);
    print_diagnostics(&reporter);
    result.with_context(|| format!("failed to compile {}", input.display()))
}

fn print_diagnostics(reporter: &ErrorReporter) {
    for diagnostic in reporter.diagnostics() {
        eprintln!(
            "{}: {}: {}",
            diagnostic.span,
            diagnostic.severity.to_string().red().bold(),
            diagnostic.message
        );
    }
    if reporter.has_errors() {
        eprintln!("{}", reporter.summary().yellow());
    }
}

fn default_output(input: &Path) -> PathBuf {
    input.with_extension("ll")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_replaces_extension() {
        assert_eq!(default_output(Path::new("dir/prog.json")), PathBuf::from("dir/prog.ll"));
        assert_eq!(default_output(Path::new("prog")), PathBuf::from("prog.ll"));
    }
}
