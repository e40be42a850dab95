// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

// Name of the particle data file expected inside every job folder
pub const PARTICLE_DATA_FILE: &str = "data.txt";

// Character terminating each micrograph segment in a particle data file
pub const SEGMENT_DELIMITER: char = '$';

// Name of the micrograph directory located three levels above the data file
pub const MICROGRAPHS_DIR: &str = "Micrographs";

// External binaries invoked by the orchestrators
pub const CONFIG_BINARY: &str = "cryolo_gui";
pub const TRAIN_BINARY: &str = "cryolo_train";
pub const PREDICT_BINARY: &str = "cryolo_predict";
pub const SUBMIT_BINARY: &str = "sbatch";

// Default artifact names written into the training output directory
pub const DEFAULT_OUTPUT_DIR: &str = "cryolo_training";
pub const DEFAULT_CONFIG_NAME: &str = "config_cryolo.json";
pub const DEFAULT_TRAIN_IMAGE_DIR: &str = "train_image";
pub const DEFAULT_TRAIN_ANNOT_DIR: &str = "train_annot";
pub const DEFAULT_WEIGHTS_NAME: &str = "cryolo_model.h5";
pub const SLURM_SCRIPT_NAME: &str = "cryolo.slurm";

// Default cluster placement; override per cluster via the CLI
pub const DEFAULT_PARTITION: &str = "jiang-gpu";
pub const DEFAULT_NODELIST: &str = "prp";

// Fixed resource requests for training and picking jobs
pub const TRAIN_JOB_NAME: &str = "ctrain";
pub const TRAIN_CPUS: u32 = 12;
pub const TRAIN_GPUS: u32 = 2;
pub const PICK_JOB_NAME: &str = "cpick";
pub const PICK_CPUS: u32 = 12;
pub const PICK_GPUS: u32 = 1;

// Number of crYOLO data-loading workers passed to cryolo_train
pub const CRYOLO_WORKERS: u32 = 5;

// Default detection confidence threshold passed to cryolo_predict
pub const DEFAULT_THRESHOLD: f32 = 0.3;
