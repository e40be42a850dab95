// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;

use cryostage_core::constant;
use cryostage_core::error::CryostageError;
use cryostage_core::pd;
use cryostage_core::sl::{JobSubmitter, Sbatch, SlurmScript};
use cryostage_core::ut;
use cryostage_core::xt::{BuiltinConfig, ConfigGenerator, ConfigRequest, CryoloGui};

#[derive(Debug, Args)]
#[command(about = "Stage particle data, generate a configuration, and submit a training job.")]
pub struct TrainArgs {
    #[arg(
        short = 'j',
        long,
        num_args = 1..,
        help = "Job folders containing particle data files.",
        required = true
    )]
    pub job_folders: Vec<String>,

    #[arg(
        short = 'b',
        long,
        num_args = 1..,
        help = "Box size in pixels for each job folder.",
        required = true
    )]
    pub box_sizes: Vec<u32>,

    #[arg(
        short = 'o',
        long,
        help = "Training output directory - must not already exist.",
        default_value = constant::DEFAULT_OUTPUT_DIR
    )]
    pub output: Option<String>,

    #[arg(
        long,
        help = "Configuration file name written into the output directory.",
        default_value = constant::DEFAULT_CONFIG_NAME
    )]
    pub config_name: Option<String>,

    #[arg(
        long,
        help = "Training image directory name inside the output directory.",
        default_value = constant::DEFAULT_TRAIN_IMAGE_DIR
    )]
    pub train_image_folder: Option<String>,

    #[arg(
        long,
        help = "Training annotation directory name inside the output directory.",
        default_value = constant::DEFAULT_TRAIN_ANNOT_DIR
    )]
    pub train_annot_folder: Option<String>,

    #[arg(
        long,
        help = "File name the trained model weights are saved under.",
        default_value = constant::DEFAULT_WEIGHTS_NAME
    )]
    pub saved_weights_name: Option<String>,

    #[arg(long, help = "Pretrained weights to fine-tune from.")]
    pub pretrained_weights: Option<String>,

    #[arg(
        long,
        help = "Slurm partition to submit to.",
        default_value = constant::DEFAULT_PARTITION
    )]
    pub partition: Option<String>,

    #[arg(
        long,
        help = "Slurm node to run on.",
        default_value = constant::DEFAULT_NODELIST
    )]
    pub nodelist: Option<String>,

    #[arg(
        long,
        help = "Name of the micrograph directory three levels above each data file.",
        default_value = constant::MICROGRAPHS_DIR
    )]
    pub micrographs_dir: Option<String>,

    #[arg(
        long,
        help = "Write the configuration JSON directly instead of calling cryolo_gui."
    )]
    pub local_config: bool,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn train(args: &TrainArgs) {
    if args.job_folders.len() != args.box_sizes.len() {
        eprintln!(
            "{} {}",
            "ERROR:".red().bold(),
            CryostageError::JobLengthError(args.job_folders.len(), args.box_sizes.len())
        );
        std::process::exit(1);
    }

    let result = if args.local_config {
        run(args, &BuiltinConfig, &Sbatch)
    } else {
        run(args, &CryoloGui, &Sbatch)
    };

    if let Err(err) = result {
        eprintln!("{} {}", "ERROR:".red().bold(), err);
        std::process::exit(1);
    }
}

/// Stage all job folders, generate the configuration, and submit the job.
///
/// The output directory must not exist; its creation is the first side
/// effect, so a failed precondition leaves the file system untouched.
pub fn run(
    args: &TrainArgs,
    generator: &dyn ConfigGenerator,
    submitter: &dyn JobSubmitter,
) -> Result<PathBuf, CryostageError> {
    let config_name = args.config_name.to_owned().unwrap();
    let train_image_folder = args.train_image_folder.to_owned().unwrap();
    let train_annot_folder = args.train_annot_folder.to_owned().unwrap();
    let micrographs_dir = args.micrographs_dir.to_owned().unwrap();

    let output = ut::path::create_output_directory(args.output.as_deref().unwrap())?;

    let image_dir = output.join(&train_image_folder);
    let annot_dir = output.join(&train_annot_folder);

    for (job_folder, box_size) in args.job_folders.iter().zip(&args.box_sizes) {
        let data_file = Path::new(job_folder).join(constant::PARTICLE_DATA_FILE);

        let summary = pd::convert_particle_data(
            &data_file,
            *box_size,
            &image_dir,
            &annot_dir,
            &micrographs_dir,
            args.verbose,
        )?;

        ut::track::progress_log(
            &format!(
                "Staged {} micrographs ({} particles) from {}; {} skipped.",
                summary.converted,
                ut::track::thousands_format(summary.particles),
                job_folder,
                summary.skipped.len()
            ),
            args.verbose,
        );
    }

    // When combining multiple selection jobs, crYOLO is trained on the
    // average of their box sizes
    let box_size = pd::mean_box_size(&args.box_sizes).ok_or_else(|| {
        CryostageError::OtherError("at least one box size is required".to_string())
    })?;

    generator.generate(&ConfigRequest {
        config_path: output.join(&config_name),
        box_size,
        train_image_dir: train_image_folder,
        train_annot_dir: train_annot_folder,
        saved_weights_name: args.saved_weights_name.to_owned().unwrap(),
        pretrained_weights: args.pretrained_weights.to_owned(),
    })?;

    let script = SlurmScript {
        job_name: constant::TRAIN_JOB_NAME.to_string(),
        partition: args.partition.to_owned().unwrap(),
        cpus_per_task: constant::TRAIN_CPUS,
        gpus: constant::TRAIN_GPUS,
        nodelist: args.nodelist.to_owned().unwrap(),
        command: format!(
            "{} -c {} -w {}",
            constant::TRAIN_BINARY,
            config_name,
            constant::CRYOLO_WORKERS
        ),
    };

    let script_path = output.join(constant::SLURM_SCRIPT_NAME);
    script.write(&script_path)?;

    submitter.submit(&script_path)?;

    ut::track::progress_log(
        &format!("Submitted training job from {}.", output.display()),
        args.verbose,
    );

    Ok(output)
}

#[cfg(test)]
mod test {

    use std::cell::RefCell;

    use super::*;

    struct RecordingSubmitter {
        submitted: RefCell<Vec<PathBuf>>,
    }

    impl RecordingSubmitter {
        fn new() -> RecordingSubmitter {
            RecordingSubmitter {
                submitted: RefCell::new(Vec::new()),
            }
        }
    }

    impl JobSubmitter for RecordingSubmitter {
        fn submit(&self, script: &Path) -> Result<(), CryostageError> {
            self.submitted.borrow_mut().push(script.to_path_buf());
            Ok(())
        }
    }

    const TEST_DATA: &str = "\
metadata
$
_rlnMicrographName mic_001.mrc
100.5 200.25
$
";

    fn args(root: &Path, job_folders: Vec<String>, box_sizes: Vec<u32>) -> TrainArgs {
        TrainArgs {
            job_folders,
            box_sizes,
            output: Some(root.join("cryolo_training").display().to_string()),
            config_name: Some(constant::DEFAULT_CONFIG_NAME.to_string()),
            train_image_folder: Some(constant::DEFAULT_TRAIN_IMAGE_DIR.to_string()),
            train_annot_folder: Some(constant::DEFAULT_TRAIN_ANNOT_DIR.to_string()),
            saved_weights_name: Some(constant::DEFAULT_WEIGHTS_NAME.to_string()),
            pretrained_weights: None,
            partition: Some(constant::DEFAULT_PARTITION.to_string()),
            nodelist: Some(constant::DEFAULT_NODELIST.to_string()),
            micrographs_dir: Some(constant::MICROGRAPHS_DIR.to_string()),
            local_config: true,
            verbose: false,
        }
    }

    fn build_job_folder(root: &Path, job: &str) -> String {
        let micrographs = root.join("Micrographs");
        let job_folder = root.join("Particles").join(job);

        std::fs::create_dir_all(&micrographs).unwrap();
        std::fs::create_dir_all(&job_folder).unwrap();

        std::fs::write(micrographs.join("mic_001.mrc"), b"fake mrc bytes").unwrap();
        std::fs::write(job_folder.join("data.txt"), TEST_DATA).unwrap();

        job_folder.display().to_string()
    }

    #[test]
    fn test_run_stages_and_submits() {
        let root = std::env::temp_dir().join("CRYOSTAGE_TEST_TRAIN_RUN");
        let job_folder = build_job_folder(&root, "Select2D_job030");

        let submitter = RecordingSubmitter::new();
        let args = args(&root, vec![job_folder], vec![150]);

        let output = run(&args, &BuiltinConfig, &submitter).unwrap();

        assert!(output.join("train_image").join("mic_001.mrc").exists());
        assert!(output.join("train_annot").join("mic_001.box").exists());
        assert!(output.join("config_cryolo.json").exists());

        let script = std::fs::read_to_string(output.join("cryolo.slurm")).unwrap();
        assert!(script.contains("#SBATCH --gres gpu:2"));
        assert!(script.contains("#SBATCH --cpus-per-task 12"));
        assert!(script.contains("cryolo_train -c config_cryolo.json -w 5"));

        let submitted = submitter.submitted.borrow();
        assert_eq!(*submitted, [output.join("cryolo.slurm")]);

        drop(submitted);
        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_run_existing_output_has_no_side_effects() {
        let root = std::env::temp_dir().join("CRYOSTAGE_TEST_TRAIN_EXISTS");
        let job_folder = build_job_folder(&root, "Select2D_job030");

        let output = root.join("cryolo_training");
        std::fs::create_dir_all(&output).unwrap();

        let submitter = RecordingSubmitter::new();
        let args = args(&root, vec![job_folder], vec![150]);

        let result = run(&args, &BuiltinConfig, &submitter);

        assert!(matches!(result, Err(CryostageError::DirExistsError(_))));
        assert!(!output.join("train_image").exists());
        assert!(submitter.submitted.borrow().is_empty());

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_run_mean_box_size_in_config() {
        let root = std::env::temp_dir().join("CRYOSTAGE_TEST_TRAIN_MEAN");
        let job_a = build_job_folder(&root, "Select2D_job030");
        let job_b = build_job_folder(&root, "Select3D_job033");

        let submitter = RecordingSubmitter::new();
        let args = args(&root, vec![job_a, job_b], vec![150, 300]);

        let output = run(&args, &BuiltinConfig, &submitter).unwrap();

        let config = std::fs::read_to_string(output.join("config_cryolo.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&config).unwrap();
        assert_eq!(value["model"]["anchors"][0], 225);

        std::fs::remove_dir_all(&root).unwrap();
    }
}
