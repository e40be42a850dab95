// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::fmt;

#[derive(Debug, Clone)]
pub enum CryostageError {
    ParticleDataReadError(String),
    ParticleDataParseError(String),
    BoxesWriteError(String),
    ImageCopyError(String),
    ConfigWriteError(String),
    CommandError(String),
    CommandStatusError(String, i32),
    DirError(String),
    DirExistsError(String),
    JobLengthError(usize, usize),
    NoFileError(String),
    OtherError(String),
}

impl fmt::Display for CryostageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CryostageError::ParticleDataReadError(message) => {
                write!(
                    f,
                    "[cryostage::ParticleDataReadError] Particle data file could not be read. {}.",
                    message
                )
            }
            CryostageError::ParticleDataParseError(message) => {
                write!(
                    f,
                    "[cryostage::ParticleDataParseError] Particle data file is malformed. {}.",
                    message
                )
            }
            CryostageError::BoxesWriteError(message) => {
                write!(
                    f,
                    "[cryostage::BoxesWriteError] Failed to write box annotations. {}.",
                    message
                )
            }
            CryostageError::ImageCopyError(message) => {
                write!(
                    f,
                    "[cryostage::ImageCopyError] Failed to copy micrograph image. {}.",
                    message
                )
            }
            CryostageError::ConfigWriteError(message) => {
                write!(
                    f,
                    "[cryostage::ConfigWriteError] Failed to write configuration file. {}.",
                    message
                )
            }
            CryostageError::CommandError(message) => {
                write!(
                    f,
                    "[cryostage::CommandError] Failed to run external command. {}.",
                    message
                )
            }
            CryostageError::CommandStatusError(command, code) => {
                write!(
                    f,
                    "[cryostage::CommandStatusError] Command `{}` exited with non-zero status {}.",
                    command, code
                )
            }
            CryostageError::DirError(message) => {
                write!(
                    f,
                    "[cryostage::DirError] Directory could not be created or read. {}.",
                    message
                )
            }
            CryostageError::DirExistsError(message) => {
                write!(
                    f,
                    "[cryostage::DirExistsError] Output directory already exists and will not be overwritten: {}.",
                    message
                )
            }
            CryostageError::JobLengthError(jobs, sizes) => {
                write!(
                    f,
                    "[cryostage::JobLengthError] Number of job folders ({}) must match number of box sizes ({}).",
                    jobs, sizes
                )
            }
            CryostageError::NoFileError(message) => {
                write!(
                    f,
                    "[cryostage::NoFileError] File could not be found. {}.",
                    message
                )
            }
            CryostageError::OtherError(message) => {
                write!(f, "[cryostage::OtherError] Error: {}.", message)
            }
        }
    }
}

impl std::error::Error for CryostageError {}
