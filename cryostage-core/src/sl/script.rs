// Copyright (c) 2025, Tom Ouellette
// Licensed under the MIT License

use std::path::Path;

use crate::error::CryostageError;

/// A generated Slurm submission script
///
/// Holds the resource-request directives and the single command the job
/// runs. Scripts are rendered, written once, submitted, and never tracked
/// afterward.
///
/// # Examples
///
/// ```
/// use cryostage_core::sl::SlurmScript;
///
/// let script = SlurmScript {
///     job_name: "ctrain".to_string(),
///     partition: "jiang-gpu".to_string(),
///     cpus_per_task: 12,
///     gpus: 2,
///     nodelist: "prp".to_string(),
///     command: "cryolo_train -c config_cryolo.json -w 5".to_string(),
/// };
///
/// assert!(script.render().contains("#SBATCH --gres gpu:2"));
/// ```
#[derive(Debug, Clone)]
pub struct SlurmScript {
    pub job_name: String,
    pub partition: String,
    pub cpus_per_task: u32,
    pub gpus: u32,
    pub nodelist: String,
    pub command: String,
}

impl SlurmScript {
    /// Render the script with its directive block and command line
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("#!/usr/bin/env bash\n");
        out.push('\n');
        out.push_str(&format!("#SBATCH --job-name {}\n", self.job_name));
        out.push_str(&format!("#SBATCH --partition {}\n", self.partition));
        out.push_str("#SBATCH --ntasks 1\n");
        out.push_str(&format!("#SBATCH --cpus-per-task {}\n", self.cpus_per_task));
        out.push_str(&format!("#SBATCH --gres gpu:{}\n", self.gpus));
        out.push_str(&format!("#SBATCH --nodelist {}\n", self.nodelist));
        out.push_str("#SBATCH --output %x.%j.stdout\n");
        out.push_str("#SBATCH --error %x.%j.stderr\n");
        out.push('\n');
        out.push_str(&self.command);
        out.push('\n');

        out
    }

    /// Write the rendered script at the provided path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to save the submission script
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<(), CryostageError> {
        let path = path.as_ref();

        std::fs::write(path, self.render())
            .map_err(|err| CryostageError::OtherError(format!("{}: {}", path.display(), err)))
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn train_script() -> SlurmScript {
        SlurmScript {
            job_name: "ctrain".to_string(),
            partition: "jiang-gpu".to_string(),
            cpus_per_task: 12,
            gpus: 2,
            nodelist: "prp".to_string(),
            command: "cryolo_train -c config_cryolo.json -w 5".to_string(),
        }
    }

    #[test]
    fn test_render_directives() {
        let rendered = train_script().render();

        assert!(rendered.starts_with("#!/usr/bin/env bash\n"));
        assert!(rendered.contains("#SBATCH --job-name ctrain\n"));
        assert!(rendered.contains("#SBATCH --partition jiang-gpu\n"));
        assert!(rendered.contains("#SBATCH --ntasks 1\n"));
        assert!(rendered.contains("#SBATCH --cpus-per-task 12\n"));
        assert!(rendered.contains("#SBATCH --gres gpu:2\n"));
        assert!(rendered.contains("#SBATCH --nodelist prp\n"));
        assert!(rendered.contains("#SBATCH --output %x.%j.stdout\n"));
        assert!(rendered.contains("#SBATCH --error %x.%j.stderr\n"));
    }

    #[test]
    fn test_render_single_command() {
        let rendered = train_script().render();

        let commands: Vec<&str> = rendered
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect();

        assert_eq!(commands, ["cryolo_train -c config_cryolo.json -w 5"]);
    }

    #[test]
    fn test_write() {
        let output = std::env::temp_dir().join("CRYOSTAGE_TEST_SCRIPT.slurm");

        let script = train_script();
        script.write(&output).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, script.render());

        std::fs::remove_file(&output).unwrap();
    }
}
