// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use serde::Serialize;

use crate::error::CryostageError;
use crate::xt::{ConfigGenerator, ConfigRequest};

/// Writes the crYOLO configuration JSON directly, without the gui tool
///
/// Useful on clusters where crYOLO is only installed on the compute nodes.
/// The emitted sections mirror the defaults `cryolo_gui config` produces
/// for the same request.
#[derive(Debug, Clone, Default)]
pub struct BuiltinConfig;

#[derive(Debug, Serialize)]
struct ModelSection {
    architecture: &'static str,
    input_size: u32,
    anchors: [u32; 2],
    max_box_per_image: u32,
    norm: &'static str,
}

#[derive(Debug, Serialize)]
struct TrainSection {
    train_image_folder: String,
    train_annot_folder: String,
    train_times: u32,
    batch_size: u32,
    learning_rate: f64,
    nb_epoch: u32,
    object_scale: f64,
    no_object_scale: f64,
    coord_scale: f64,
    class_scale: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pretrained_weights: Option<String>,
    saved_weights_name: String,
    debug: bool,
}

#[derive(Debug, Serialize)]
struct CryoloConfig {
    model: ModelSection,
    train: TrainSection,
}

impl CryoloConfig {
    fn from_request(request: &ConfigRequest) -> CryoloConfig {
        CryoloConfig {
            model: ModelSection {
                architecture: "PhosaurusNet",
                input_size: 1024,
                anchors: [request.box_size, request.box_size],
                max_box_per_image: 700,
                norm: "STANDARD",
            },
            train: TrainSection {
                train_image_folder: request.train_image_dir.clone(),
                train_annot_folder: request.train_annot_dir.clone(),
                train_times: 10,
                batch_size: 4,
                learning_rate: 0.0001,
                nb_epoch: 200,
                object_scale: 5.0,
                no_object_scale: 1.0,
                coord_scale: 1.0,
                class_scale: 1.0,
                pretrained_weights: request.pretrained().map(|weights| weights.to_string()),
                saved_weights_name: request.saved_weights_name.clone(),
                debug: true,
            },
        }
    }
}

impl ConfigGenerator for BuiltinConfig {
    fn generate(&self, request: &ConfigRequest) -> Result<(), CryostageError> {
        let config = CryoloConfig::from_request(request);

        let rendered = serde_json::to_string_pretty(&config)
            .map_err(|err| CryostageError::ConfigWriteError(err.to_string()))?;

        std::fs::write(&request.config_path, rendered).map_err(|err| {
            CryostageError::ConfigWriteError(format!(
                "{}: {}",
                request.config_path.display(),
                err
            ))
        })
    }
}

#[cfg(test)]
mod test {

    use std::path::PathBuf;

    use serde_json::Value;

    use super::*;

    fn request(config_path: PathBuf, pretrained_weights: Option<String>) -> ConfigRequest {
        ConfigRequest {
            config_path,
            box_size: 225,
            train_image_dir: "train_image".to_string(),
            train_annot_dir: "train_annot".to_string(),
            saved_weights_name: "cryolo_model.h5".to_string(),
            pretrained_weights,
        }
    }

    #[test]
    fn test_generate_writes_json() {
        let output = std::env::temp_dir().join("CRYOSTAGE_TEST_CONFIG.json");

        BuiltinConfig
            .generate(&request(output.clone(), None))
            .unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        let value: Value = serde_json::from_str(&written).unwrap();

        assert_eq!(value["model"]["anchors"][0], 225);
        assert_eq!(value["model"]["anchors"][1], 225);
        assert_eq!(value["train"]["train_image_folder"], "train_image");
        assert_eq!(value["train"]["saved_weights_name"], "cryolo_model.h5");
        assert!(value["train"].get("pretrained_weights").is_none());

        std::fs::remove_file(&output).unwrap();
    }

    #[test]
    fn test_generate_with_pretrained_weights() {
        let output = std::env::temp_dir().join("CRYOSTAGE_TEST_CONFIG_PRETRAINED.json");

        BuiltinConfig
            .generate(&request(
                output.clone(),
                Some("general_model.h5".to_string()),
            ))
            .unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        let value: Value = serde_json::from_str(&written).unwrap();

        assert_eq!(value["train"]["pretrained_weights"], "general_model.h5");

        std::fs::remove_file(&output).unwrap();
    }
}
