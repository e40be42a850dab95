// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::process::{Command, Stdio};

use crate::constant::CONFIG_BINARY;
use crate::error::CryostageError;
use crate::xt::{ConfigGenerator, ConfigRequest};

/// Generates configuration files by shelling out to `cryolo_gui config`
///
/// The tool's stdout is suppressed; a spawn failure or non-zero exit status
/// is propagated as an error rather than silently ignored.
#[derive(Debug, Clone, Default)]
pub struct CryoloGui;

impl CryoloGui {
    /// Argument vector passed to the configuration binary
    pub fn arguments(request: &ConfigRequest) -> Vec<String> {
        let mut arguments = vec![
            "config".to_string(),
            request.config_path.display().to_string(),
            request.box_size.to_string(),
            "--train_image_folder".to_string(),
            request.train_image_dir.clone(),
            "--train_annot_folder".to_string(),
            request.train_annot_dir.clone(),
            "--saved_weights_name".to_string(),
            request.saved_weights_name.clone(),
        ];

        // Pretrained weights are only needed in some use cases
        if let Some(weights) = request.pretrained() {
            arguments.push("--pretrained_weights".to_string());
            arguments.push(weights.to_string());
        }

        arguments
    }
}

impl ConfigGenerator for CryoloGui {
    fn generate(&self, request: &ConfigRequest) -> Result<(), CryostageError> {
        let status = Command::new(CONFIG_BINARY)
            .args(Self::arguments(request))
            .stdout(Stdio::null())
            .status()
            .map_err(|err| {
                CryostageError::CommandError(format!("{}: {}", CONFIG_BINARY, err))
            })?;

        if !status.success() {
            return Err(CryostageError::CommandStatusError(
                CONFIG_BINARY.to_string(),
                status.code().unwrap_or(-1),
            ));
        }

        Ok(())
    }
}
