// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::Path;

use kdam::BarExt;

use crate::error::CryostageError;
use crate::pd::{BoxAnnotations, ParticleData};
use crate::ut;

/// Outcome of staging one particle data file for training
#[derive(Debug, Clone, Default)]
pub struct ConversionSummary {
    /// Number of micrographs staged with an image copy and a `.box` file
    pub converted: usize,
    /// Names of micrographs skipped because their image was missing
    pub skipped: Vec<String>,
    /// Total number of particles written across all `.box` files
    pub particles: usize,
}

/// Stage a particle data file as crYOLO training data
///
/// Each micrograph referenced in the data file is copied into `image_dir`
/// and its particle coordinates are written as a `.box` file into
/// `annot_dir`. Both directories are created if absent. Micrograph images
/// are resolved under the sibling micrograph directory three levels above
/// the data file; a missing image is logged as a warning and the micrograph
/// is skipped without leaving a partial annotation file.
///
/// # Arguments
///
/// * `data_file` - Path to the particle data file inside a job folder
/// * `box_size` - Side length of the annotation bounding box in pixels
/// * `image_dir` - Output directory for copied micrograph images
/// * `annot_dir` - Output directory for `.box` annotation files
/// * `micrographs_dir` - Name of the sibling micrograph directory
/// * `verbose` - Log progress to console
pub fn convert_particle_data(
    data_file: &Path,
    box_size: u32,
    image_dir: &Path,
    annot_dir: &Path,
    micrographs_dir: &str,
    verbose: bool,
) -> Result<ConversionSummary, CryostageError> {
    ut::path::ensure_directory(image_dir)?;
    ut::path::ensure_directory(annot_dir)?;

    let data = ParticleData::open(data_file)?;
    let source_dir = ut::path::micrograph_dir(data_file, micrographs_dir);

    let mut summary = ConversionSummary::default();

    let mut pb = ut::track::progress_bar(data.micrographs().len(), "Converting", verbose);

    for micrograph in data.micrographs() {
        let source = source_dir.join(micrograph.name());

        if !source.exists() {
            ut::track::warn_log(&format!(
                "{} is missing {}: its particle data will not be used for training.",
                micrographs_dir,
                micrograph.name()
            ));
            summary.skipped.push(micrograph.name().to_string());

            if verbose {
                pb.update(1).unwrap();
            }

            continue;
        }

        std::fs::copy(&source, image_dir.join(micrograph.name())).map_err(|err| {
            CryostageError::ImageCopyError(format!("{}: {}", source.display(), err))
        })?;

        let stem = Path::new(micrograph.name())
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(micrograph.name());

        let boxes = BoxAnnotations::from_coordinates(micrograph.coordinates(), box_size);
        boxes.save(annot_dir.join(format!("{}.box", stem)))?;

        summary.converted += 1;
        summary.particles += boxes.len();

        if verbose {
            pb.update(1).unwrap();
        }
    }

    if verbose {
        println!();
    }

    Ok(summary)
}
