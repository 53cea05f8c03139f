use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "charonc")]
#[command(about = "Charon compiler backend: lowers typed trees to SSA modules")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lower a JSON tree and write the module text
    Compile {
        /// Input tree in JSON form
        input: PathBuf,

        /// Output module file (defaults to the input with an .ll extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pass pipeline, e.g. "constfold,dce" or "default<O2>"
        #[arg(long, default_value = "")]
        passes: String,

        /// Print the module to stdout
        #[arg(long)]
        print_ir: bool,

        /// Also write the module as JSON to this path
        #[arg(long)]
        emit_json: Option<PathBuf>,
    },

    /// Lower a JSON tree and execute one of its functions
    Run {
        /// Input tree in JSON form
        input: PathBuf,

        /// Function to call
        #[arg(short, long, default_value = "main")]
        entry: String,

        /// Integer arguments passed to the entry function
        #[arg(value_name = "ARG")]
        args: Vec<u64>,

        /// Pass pipeline applied before execution
        #[arg(long, default_value = "")]
        passes: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_compile() {
        let cli = Cli::try_parse_from([
            "charonc", "compile", "tree.json", "-o", "out.ll", "--passes", "default<O2>", "--print-ir",
        ])
        .unwrap();
        let Command::Compile { input, output, passes, print_ir, emit_json } = cli.command else {
            panic!("expected compile");
        };
        assert_eq!(input, PathBuf::from("tree.json"));
        assert_eq!(output, Some(PathBuf::from("out.ll")));
        assert_eq!(passes, "default<O2>");
        assert!(print_ir);
        assert_eq!(emit_json, None);
    }

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["charonc", "run", "tree.json", "3", "4"]).unwrap();
        let Command::Run { entry, args, passes, .. } = cli.command else {
            panic!("expected run");
        };
        assert_eq!(entry, "main");
        assert_eq!(args, vec![3, 4]);
        assert_eq!(passes, "");
    }

    #[test]
    fn test_rejects_non_integer_argument() {
        assert!(Cli::try_parse_from(["charonc", "run", "tree.json", "abc"]).is_err());
    }
}
