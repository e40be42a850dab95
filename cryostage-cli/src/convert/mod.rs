// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::Path;

use clap::Args;
use colored::Colorize;

use cryostage_core::constant;
use cryostage_core::pd;
use cryostage_core::ut::track;

#[derive(Debug, Args)]
#[command(about = "Convert a particle data file into per-micrograph box annotations.")]
pub struct ConvertArgs {
    #[arg(short = 'f', long, help = "Particle data file.", required = true)]
    pub data_file: Option<String>,

    #[arg(short = 'b', long, help = "Box size in pixels.", required = true)]
    pub box_size: Option<u32>,

    #[arg(
        short = 'i',
        long,
        help = "Output directory for copied micrograph images.",
        default_value = constant::DEFAULT_TRAIN_IMAGE_DIR
    )]
    pub images: Option<String>,

    #[arg(
        short = 'a',
        long,
        help = "Output directory for box annotation files.",
        default_value = constant::DEFAULT_TRAIN_ANNOT_DIR
    )]
    pub annotations: Option<String>,

    #[arg(
        long,
        help = "Name of the micrograph directory three levels above the data file.",
        default_value = constant::MICROGRAPHS_DIR
    )]
    pub micrographs_dir: Option<String>,

    #[arg(short = 'v', long, help = "Verbose output.")]
    pub verbose: bool,
}

pub fn convert(args: &ConvertArgs) {
    let data_file = args.data_file.to_owned().unwrap();
    let box_size = args.box_size.unwrap();
    let images = args.images.to_owned().unwrap();
    let annotations = args.annotations.to_owned().unwrap();
    let micrographs_dir = args.micrographs_dir.to_owned().unwrap();

    let summary = pd::convert_particle_data(
        Path::new(&data_file),
        box_size,
        Path::new(&images),
        Path::new(&annotations),
        &micrographs_dir,
        args.verbose,
    )
    .unwrap_or_else(|err| {
        eprintln!("{} {}", "ERROR:".red().bold(), err);
        std::process::exit(1);
    });

    track::progress_log(
        &format!(
            "Staged {} micrographs ({} particles); {} skipped.",
            summary.converted,
            track::thousands_format(summary.particles),
            summary.skipped.len()
        ),
        args.verbose,
    );
}
