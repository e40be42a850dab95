// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use cryostage_core::constant;
use cryostage_core::error::CryostageError;
use cryostage_core::sl::{JobSubmitter, Sbatch, SlurmScript};
use cryostage_core::ut::track;

#[derive(Debug, Args)]
#[command(about = "Submit a particle picking job using a trained model.")]
pub struct PickArgs {
    #[arg(short = 'c', long, help = "crYOLO configuration file.", required = true)]
    pub config: Option<String>,

    #[arg(
        short = 'i',
        long,
        help = "Directory of micrographs to pick from.",
        default_value = "full_data"
    )]
    pub micrographs: Option<String>,

    #[arg(
        short = 'w',
        long,
        help = "Trained model weights.",
        default_value = constant::DEFAULT_WEIGHTS_NAME
    )]
    pub weights: Option<String>,

    #[arg(
        short = 'o',
        long,
        help = "Output directory for picked box files.",
        default_value = "boxfiles"
    )]
    pub output: Option<String>,

    #[arg(
        short = 't',
        long,
        help = "Detection confidence threshold.",
        default_value = "0.3"
    )]
    pub threshold: Option<f32>,

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
        help = "Path to write the submission script.",
        default_value = constant::SLURM_SCRIPT_NAME
    )]
    pub script: Option<String>,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn pick(args: &PickArgs) {
    if let Err(err) = run(args, &Sbatch) {
        eprintln!("{} {}", "ERROR:".red().bold(), err);
        std::process::exit(1);
    }
}

/// Write the picking script and submit it.
///
/// Success means the submission command succeeded; the picking job itself
/// runs on the cluster and is never waited on.
pub fn run(args: &PickArgs, submitter: &dyn JobSubmitter) -> Result<PathBuf, CryostageError> {
    let script = SlurmScript {
        job_name: constant::PICK_JOB_NAME.to_string(),
        partition: args.partition.to_owned().unwrap(),
        cpus_per_task: constant::PICK_CPUS,
        gpus: constant::PICK_GPUS,
        nodelist: args.nodelist.to_owned().unwrap(),
        command: format!(
            "{} -c {} -w {} -i {} -o {} -t {}",
            constant::PREDICT_BINARY,
            args.config.as_deref().unwrap(),
            args.weights.as_deref().unwrap(),
            args.micrographs.as_deref().unwrap(),
            args.output.as_deref().unwrap(),
            args.threshold.unwrap_or(constant::DEFAULT_THRESHOLD)
        ),
    };

    let script_path = PathBuf::from(args.script.as_deref().unwrap());
    script.write(&script_path)?;

    submitter.submit(&script_path)?;

    track::progress_log(
        &format!("Submitted picking job {}.", script_path.display()),
        args.verbose,
    );

    Ok(script_path)
}
