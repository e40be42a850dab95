// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::PathBuf;

mod builtin;
mod cryolo;

pub use builtin::BuiltinConfig;
pub use cryolo::CryoloGui;

use crate::error::CryostageError;

/// Parameters for generating one crYOLO configuration file
#[derive(Debug, Clone)]
pub struct ConfigRequest {
    /// Path where the configuration file is written
    pub config_path: PathBuf,
    /// Side length of the annotation bounding box in pixels
    pub box_size: u32,
    /// Training image directory, relative to the submission directory
    pub train_image_dir: String,
    /// Training annotation directory, relative to the submission directory
    pub train_annot_dir: String,
    /// File name the trained model weights are saved under
    pub saved_weights_name: String,
    /// Optional pretrained weights to fine-tune from; when absent or empty
    /// the corresponding option is omitted entirely
    pub pretrained_weights: Option<String>,
}

impl ConfigRequest {
    /// Pretrained weights, treating an empty string the same as absent
    pub fn pretrained(&self) -> Option<&str> {
        self.pretrained_weights
            .as_deref()
            .filter(|weights| !weights.is_empty())
    }
}

/// Configuration backend for the external picking tool
pub trait ConfigGenerator {
    fn generate(&self, request: &ConfigRequest) -> Result<(), CryostageError>;
}
