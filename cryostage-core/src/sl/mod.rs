// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::Path;
use std::process::Command;

mod script;

pub use script::SlurmScript;

use crate::constant::SUBMIT_BINARY;
use crate::error::CryostageError;

/// Submission backend for generated scheduler scripts
///
/// Success means the submission command itself succeeded; the submitted job
/// runs outside this system's visibility and is never waited on.
pub trait JobSubmitter {
    fn submit(&self, script: &Path) -> Result<(), CryostageError>;
}

/// Submits scripts to a Slurm cluster via `sbatch`
#[derive(Debug, Clone, Default)]
pub struct Sbatch;

impl JobSubmitter for Sbatch {
    fn submit(&self, script: &Path) -> Result<(), CryostageError> {
        let status = Command::new(SUBMIT_BINARY)
            .arg(script)
            .status()
            .map_err(|err| {
                CryostageError::CommandError(format!("{} {}: {}", SUBMIT_BINARY, script.display(), err))
            })?;

        if !status.success() {
            return Err(CryostageError::CommandStatusError(
                SUBMIT_BINARY.to_string(),
                status.code().unwrap_or(-1),
            ));
        }

        Ok(())
    }
}
