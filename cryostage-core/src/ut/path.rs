// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::{Path, PathBuf};

use crate::error::CryostageError;

/// Create a fresh output directory, refusing to touch an existing one.
///
/// Training runs must never mix with the artifacts of a previous run, so
/// unlike a scratch directory this never increments or reuses: an existing
/// path is an error and nothing is written.
///
/// # Arguments
///
/// * `directory` - Path to new directory - no overwrites allowed
pub fn create_output_directory<P: AsRef<Path>>(directory: P) -> Result<PathBuf, CryostageError> {
    let directory = directory.as_ref();

    if directory.exists() {
        return Err(CryostageError::DirExistsError(
            directory.display().to_string(),
        ));
    }

    std::fs::create_dir(directory).map_err(|err| CryostageError::DirError(err.to_string()))?;

    Ok(directory.to_path_buf())
}

/// Create a directory if it does not already exist.
///
/// Shared staging directories (train images, train annotations) may already
/// hold the output of a previous job folder within the same run.
pub fn ensure_directory<P: AsRef<Path>>(directory: P) -> Result<PathBuf, CryostageError> {
    let directory = directory.as_ref();

    if !directory.exists() {
        std::fs::create_dir_all(directory)
            .map_err(|err| CryostageError::DirError(err.to_string()))?;
    }

    Ok(directory.to_path_buf())
}

/// Resolve the micrograph directory for a particle data file.
///
/// Upstream particle-selection jobs place their data file three levels below
/// the directory holding the shared micrograph folder, i.e. the images for
/// `project/Particles/Select2D_job030/data.txt` live in
/// `project/Micrographs/`. The resolution is lexical; the returned path is
/// not checked for existence.
///
/// # Arguments
///
/// * `data_file` - Path to a particle data file
/// * `dir_name` - Name of the sibling micrograph directory
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use cryostage_core::ut::path::micrograph_dir;
///
/// let dir = micrograph_dir(Path::new("project/Particles/job030/data.txt"), "Micrographs");
/// assert_eq!(dir, PathBuf::from("project/Micrographs"));
/// ```
pub fn micrograph_dir(data_file: &Path, dir_name: &str) -> PathBuf {
    let mut dir = data_file.to_path_buf();

    for _ in 0..3 {
        dir.pop();
    }

    dir.join(dir_name)
}
