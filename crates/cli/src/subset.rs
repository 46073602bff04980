//! Subsetting font files on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use subfont_subsetter::{DEFAULT_SUFFIX, Subsetter, encode_suffix};

use crate::io::FontFile;

/// Settings shared by every file in a subset run.
#[derive(Debug, Clone)]
pub struct SubsetJob {
    pub text: String,
    pub suffix: Option<String>,
    pub include_ascii_printable: bool,
    pub output_dir: PathBuf,
}

impl SubsetJob {
    fn subsetter(&self) -> Subsetter {
        let subsetter = Subsetter::new().include_ascii_printable(self.include_ascii_printable);
        match &self.suffix {
            Some(suffix) => subsetter.with_suffix(suffix.as_str()),
            None => subsetter,
        }
    }

    /// Output path for the `index`-th of `count` subsets produced from `input`.
    ///
    /// A single output is named `<stem>+<suffix>.ttf`; collections get a
    /// `-<index>` tail per member.
    pub fn output_path(&self, input: &Path, index: usize, count: usize) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let suffix = encode_suffix(self.suffix.as_deref().unwrap_or(DEFAULT_SUFFIX));
        let name = if count == 1 {
            format!("{stem}+{suffix}.ttf")
        } else {
            format!("{stem}+{suffix}-{index}.ttf")
        };
        self.output_dir.join(name)
    }
}

/// Subset one font file, writing one output per contained font.
pub fn subset_file(job: &SubsetJob, input: &Path) -> Result<Vec<PathBuf>> {
    let data = FontFile::new(input).read()?;
    let subsets = job
        .subsetter()
        .subset(&data, &job.text)
        .with_context(|| format!("Failed to subset {}", input.display()))?;

    let input_size = data.len() as f64 / 1024.0 / 1024.0;
    let mut outputs = Vec::with_capacity(subsets.len());
    for (index, subset_data) in subsets.iter().enumerate() {
        let output = job.output_path(input, index, subsets.len());
        FontFile::new(&output).write(subset_data)?;

        let output_size = subset_data.len() as f64 / 1024.0 / 1024.0;
        info!(
            "Subset {} -> {} ({input_size:.2} MB -> {output_size:.2} MB, {:.1}% reduction)",
            input.file_name().unwrap_or_default().to_string_lossy(),
            output.file_name().unwrap_or_default().to_string_lossy(),
            (1.0 - output_size / input_size) * 100.0
        );
        outputs.push(output);
    }

    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn job(suffix: Option<&str>) -> SubsetJob {
        SubsetJob {
            text: "abc".to_string(),
            suffix: suffix.map(str::to_string),
            include_ascii_printable: true,
            output_dir: PathBuf::from("out"),
        }
    }

    #[test]
    fn test_output_path_single() {
        let path = job(None).output_path(Path::new("fonts/Test-Regular.ttf"), 0, 1);
        assert_eq!(path, PathBuf::from("out/Test-Regular+subset.ttf"));
    }

    #[test]
    fn test_output_path_encodes_suffix() {
        let path = job(Some("a b")).output_path(Path::new("Test.ttf"), 0, 1);
        assert_eq!(path, PathBuf::from("out/Test+a%20b.ttf"));
    }

    #[test]
    fn test_output_path_collection() {
        let job = job(Some("v1"));
        assert_eq!(job.output_path(Path::new("Family.ttc"), 0, 3), PathBuf::from("out/Family+v1-0.ttf"));
        assert_eq!(job.output_path(Path::new("Family.ttc"), 2, 3), PathBuf::from("out/Family+v1-2.ttf"));
    }

    #[test]
    fn test_garbage_input_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.ttf");
        fs::write(&input, b"not a font").unwrap();

        let job = SubsetJob { output_dir: dir.path().join("out"), ..job(None) };
        assert!(subset_file(&job, &input).is_err());
        assert!(!job.output_dir.exists());
    }

    #[test]
    fn test_missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let job = SubsetJob { output_dir: dir.path().join("out"), ..job(None) };
        assert!(subset_file(&job, &dir.path().join("missing.ttf")).is_err());
    }
}
