// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::Path;

use crate::constant::SEGMENT_DELIMITER;
use crate::error::CryostageError;

/// Picked particle coordinates for a single micrograph
///
/// Coordinates are stored as floating-point (x, y) pairs exactly as they
/// appear in the particle data file; rounding happens only when the
/// coordinates are converted to box annotations.
#[derive(Debug, Clone)]
pub struct MicrographParticles {
    name: String,
    coordinates: Vec<[f64; 2]>,
}

impl MicrographParticles {
    /// Name of the micrograph image file these particles were picked from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Picked (x, y) coordinates in pixels
    pub fn coordinates(&self) -> &[[f64; 2]] {
        &self.coordinates
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// A parsed particle data file produced by an upstream selection job
///
/// The file is a flat text format where segments are terminated by `$`.
/// Anything after the final terminator is ignored. The first segment holds
/// run metadata and is discarded; every following segment names a micrograph
/// on its first non-blank line (the name is the last whitespace-separated
/// token) and lists one `x y` coordinate pair per remaining line.
///
/// # Examples
///
/// ```
/// use cryostage_core::pd::ParticleData;
///
/// let text = "metadata\n$\n_rln mic_001.mrc\n10.5 20.5\n$\n";
/// let data = ParticleData::parse(text).unwrap();
///
/// assert_eq!(data.micrographs().len(), 1);
/// assert_eq!(data.micrographs()[0].name(), "mic_001.mrc");
/// ```
#[derive(Debug, Clone)]
pub struct ParticleData {
    micrographs: Vec<MicrographParticles>,
}

impl ParticleData {
    /// Read and parse a particle data file from the provided path
    ///
    /// # Arguments
    ///
    /// * `path` - A path to a segment-delimited particle data file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ParticleData, CryostageError> {
        let path = path.as_ref();

        let text = std::fs::read_to_string(path).map_err(|err| {
            CryostageError::ParticleDataReadError(format!("{}: {}", path.display(), err))
        })?;

        Self::parse(&text)
    }

    /// Parse particle data from an in-memory string
    ///
    /// Malformed coordinate lines (wrong field count, unparsable floats) are
    /// a fatal error rather than being skipped, so a corrupt data file can
    /// never silently shrink the training set.
    pub fn parse(text: &str) -> Result<ParticleData, CryostageError> {
        let segments: Vec<&str> = text.split(SEGMENT_DELIMITER).collect();

        // Content after the final terminator is not a segment
        let segments = &segments[..segments.len() - 1];

        let mut micrographs = Vec::new();

        // Segment 0 is run metadata and carries no particle coordinates
        for segment in segments.iter().skip(1) {
            let lines: Vec<&str> = segment
                .lines()
                .filter(|line| !line.trim().is_empty())
                .collect();

            let Some(header) = lines.first() else {
                return Err(CryostageError::ParticleDataParseError(
                    "encountered a segment with no micrograph name".to_string(),
                ));
            };

            let name = header
                .split_whitespace()
                .last()
                .unwrap_or_default()
                .to_string();

            let mut coordinates = Vec::with_capacity(lines.len() - 1);

            for line in &lines[1..] {
                let fields: Vec<&str> = line.split_whitespace().collect();

                if fields.len() != 2 {
                    return Err(CryostageError::ParticleDataParseError(format!(
                        "expected 2 coordinate fields but found {} in segment for {}",
                        fields.len(),
                        name
                    )));
                }

                let x: f64 = fields[0].parse().map_err(|_| {
                    CryostageError::ParticleDataParseError(format!(
                        "could not parse x coordinate `{}` in segment for {}",
                        fields[0], name
                    ))
                })?;

                let y: f64 = fields[1].parse().map_err(|_| {
                    CryostageError::ParticleDataParseError(format!(
                        "could not parse y coordinate `{}` in segment for {}",
                        fields[1], name
                    ))
                })?;

                coordinates.push([x, y]);
            }

            micrographs.push(MicrographParticles { name, coordinates });
        }

        Ok(ParticleData { micrographs })
    }

    /// Per-micrograph particle records in file order
    pub fn micrographs(&self) -> &[MicrographParticles] {
        &self.micrographs
    }
}

#[cfg(test)]
mod test {

    use super::*;

    const TEST_DATA: &str = "\
run metadata line
$
_rlnMicrographName mic_001.mrc
100.5 200.25
300.0 400.75
$
_rlnMicrographName mic_002.mrc
10.0 20.0
$
trailing remainder";

    #[test]
    fn test_parse_segments() {
        let data = ParticleData::parse(TEST_DATA).unwrap();

        assert_eq!(data.micrographs().len(), 2);
        assert_eq!(data.micrographs()[0].name(), "mic_001.mrc");
        assert_eq!(data.micrographs()[1].name(), "mic_002.mrc");
    }

    #[test]
    fn test_parse_coordinates() {
        let data = ParticleData::parse(TEST_DATA).unwrap();

        let first = &data.micrographs()[0];
        assert_eq!(first.len(), 2);
        assert_eq!(first.coordinates()[0], [100.5, 200.25]);
        assert_eq!(first.coordinates()[1], [300.0, 400.75]);

        let second = &data.micrographs()[1];
        assert_eq!(second.coordinates(), [[10.0, 20.0]]);
    }

    #[test]
    fn test_parse_metadata_discarded() {
        let data = ParticleData::parse("metadata only, no terminator").unwrap();
        assert!(data.micrographs().is_empty());
    }

    #[test]
    fn test_parse_name_is_last_token() {
        let text = "meta\n$\nsome prefix tokens mic_003.mrc\n1.0 2.0\n$\n";
        let data = ParticleData::parse(text).unwrap();
        assert_eq!(data.micrographs()[0].name(), "mic_003.mrc");
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let text = "meta\n$\nmic_001.mrc\n1.0 2.0 3.0\n$\n";
        let result = ParticleData::parse(text);
        assert!(matches!(
            result,
            Err(CryostageError::ParticleDataParseError(_))
        ));
    }

    #[test]
    fn test_parse_bad_float() {
        let text = "meta\n$\nmic_001.mrc\n1.0 abc\n$\n";
        let result = ParticleData::parse(text);
        assert!(matches!(
            result,
            Err(CryostageError::ParticleDataParseError(_))
        ));
    }

    #[test]
    fn test_parse_empty_segment() {
        let text = "meta\n$\n\n$\n";
        let result = ParticleData::parse(text);
        assert!(matches!(
            result,
            Err(CryostageError::ParticleDataParseError(_))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let result = ParticleData::open("does_not_exist/data.txt");
        assert!(matches!(
            result,
            Err(CryostageError::ParticleDataReadError(_))
        ));
    }
}
