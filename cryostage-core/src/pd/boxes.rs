// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::Path;

use crate::error::CryostageError;

/// Box annotations for a single micrograph in crYOLO's `.box` format
///
/// Each annotation is an (x, y, width, height) record where x and y are the
/// picked coordinates rounded to the nearest integer (ties-to-even, matching
/// the rounding of the upstream selection pipeline) and width/height both
/// equal the caller-supplied box size.
///
/// # Examples
///
/// ```
/// use cryostage_core::pd::BoxAnnotations;
///
/// let boxes = BoxAnnotations::from_coordinates(&[[100.5, 200.25]], 150);
/// assert_eq!(boxes.as_xywh(), [[100, 200, 150, 150]]);
/// ```
#[derive(Debug, Clone)]
pub struct BoxAnnotations {
    boxes: Vec<[i64; 4]>,
}

impl BoxAnnotations {
    /// Build annotations from picked coordinates and a box size
    ///
    /// # Arguments
    ///
    /// * `coordinates` - Picked (x, y) particle coordinates in pixels
    /// * `box_size` - Side length of the square bounding box in pixels
    pub fn from_coordinates(coordinates: &[[f64; 2]], box_size: u32) -> BoxAnnotations {
        let boxes = coordinates
            .iter()
            .map(|[x, y]| {
                [
                    x.round_ties_even() as i64,
                    y.round_ties_even() as i64,
                    box_size as i64,
                    box_size as i64,
                ]
            })
            .collect();

        BoxAnnotations { boxes }
    }

    /// Annotations as (x, y, width, height) records
    pub fn as_xywh(&self) -> &[[i64; 4]] {
        &self.boxes
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Render annotations in the fixed-width `.box` layout
    ///
    /// One line per particle: x and y left-justified to width 4, width and
    /// height right-justified to width 3, tab-separated, newline-terminated.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.boxes.len() * 20);

        for [x, y, w, h] in &self.boxes {
            out.push_str(&format!("{:<4}\t{:<4}\t{:>3}\t{:>3}\n", x, y, w, h));
        }

        out
    }

    /// Save annotations at the provided path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to save the `.box` file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CryostageError> {
        let path = path.as_ref();

        std::fs::write(path, self.render()).map_err(|err| {
            CryostageError::BoxesWriteError(format!("{}: {}", path.display(), err))
        })
    }
}

/// Mean box size for a combined training run, truncated to an integer
///
/// When multiple selection jobs are combined into one training set, crYOLO
/// is configured with the average of their box sizes. Returns `None` when
/// no box sizes are supplied.
///
/// # Examples
///
/// ```
/// use cryostage_core::pd::mean_box_size;
///
/// assert_eq!(mean_box_size(&[150, 300]), Some(225));
/// assert_eq!(mean_box_size(&[]), None);
/// ```
pub fn mean_box_size(box_sizes: &[u32]) -> Option<u32> {
    if box_sizes.is_empty() {
        return None;
    }

    let sum: u64 = box_sizes.iter().map(|size| *size as u64).sum();
    Some((sum / box_sizes.len() as u64) as u32)
}
