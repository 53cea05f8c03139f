//! Optimization pass pipeline
//!
//! Pipelines are named declaratively (`"constfold,dce"`, `"default<O2>"`)
//! and resolved into an ordered list of passes run over the whole module.

mod constfold;
mod dce;
mod simplifycfg;

pub use constfold::ConstFold;
pub use dce::DeadCodeElim;
pub use simplifycfg::SimplifyCfg;

use log::debug;
use thiserror::Error;
use crate::verify::{verify_module, VerifyError};
use crate::{Function, Module};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    #[error("unknown pass '{0}'")]
    UnknownPass(String),

    #[error("verification failed after '{pass}': {source}")]
    Verification {
        pass: String,
        #[source]
        source: VerifyError,
    },
}

/// A transformation over a single function
pub trait Pass {
    fn name(&self) -> &'static str;

    /// Returns true if the function changed
    fn run_on_function(&mut self, function: &mut Function) -> bool;
}

enum Step {
    Transform(Box<dyn Pass>),
    /// Verification checkpoint inside a pipeline
    Verify,
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Step::Transform(pass) => pass.name(),
            Step::Verify => "verify",
        }
    }
}

pub struct PassManager {
    steps: Vec<Step>,
}

const DEFAULT_PIPELINE: &[&str] = &["constfold", "dce", "simplifycfg"];

impl PassManager {
    /// Parse a comma-separated pipeline description. An empty string and
    /// `default<O0>` run nothing; `default<O1>`..`default<O3>` run the
    /// standard cleanup sequence.
    pub fn parse(pipeline: &str) -> Result<Self, PassError> {
        let mut steps = Vec::new();
        for name in pipeline.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match name {
                "default<O0>" => {}
                "default<O1>" | "default<O2>" | "default<O3>" => {
                    for pass in DEFAULT_PIPELINE {
                        steps.push(Self::step(pass)?);
                    }
                }
                other => steps.push(Self::step(other)?),
            }
        }
        Ok(Self { steps })
    }

    fn step(name: &str) -> Result<Step, PassError> {
        Ok(match name {
            "constfold" => Step::Transform(Box::new(ConstFold)),
            "dce" => Step::Transform(Box::new(DeadCodeElim)),
            "simplifycfg" => Step::Transform(Box::new(SimplifyCfg)),
            "verify" => Step::Verify,
            other => return Err(PassError::UnknownPass(other.to_string())),
        })
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order over all function definitions
    pub fn run(&mut self, module: &mut Module) -> Result<(), PassError> {
        let mut previous = "input";
        for step in &mut self.steps {
            match step {
                Step::Transform(pass) => {
                    for function in module.functions.iter_mut().filter(|f| f.is_definition()) {
                        if pass.run_on_function(function) {
                            debug!("{} changed @{}", pass.name(), function.name);
                        }
                    }
                    previous = pass.name();
                }
                Step::Verify => {
                    verify_module(module).map_err(|source| PassError::Verification {
                        pass: previous.to_string(),
                        source,
                    })?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_explicit_pipeline() {
        let pm = PassManager::parse("constfold, dce,verify").unwrap();
        assert_eq!(pm.pass_names(), vec!["constfold", "dce", "verify"]);
    }

    #[test]
    fn test_parse_default_levels() {
        assert!(PassManager::parse("default<O0>").unwrap().is_empty());
        assert!(PassManager::parse("").unwrap().is_empty());
        assert_eq!(
            PassManager::parse("default<O2>").unwrap().pass_names(),
            vec!["constfold", "dce", "simplifycfg"]
        );
    }

    #[test]
    fn test_parse_unknown_pass() {
        assert_eq!(
            PassManager::parse("constfold,licm").err(),
            Some(PassError::UnknownPass("licm".to_string()))
        );
    }
}
