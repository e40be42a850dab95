// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

mod boxes;
mod convert;
mod particles;

pub use boxes::BoxAnnotations;
pub use boxes::mean_box_size;

pub use particles::MicrographParticles;
pub use particles::ParticleData;

pub use convert::ConversionSummary;
pub use convert::convert_particle_data;
