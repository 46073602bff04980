//! Parallel batch processing over input files.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use log::{error, info};
use rayon::prelude::*;

/// Outcome of running one operation over a batch of files.
#[derive(Debug)]
pub struct BatchResult<R> {
    pub outputs: Vec<R>,
    pub failures: Vec<PathBuf>,
}

impl<R> BatchResult<R> {
    pub fn succeeded(&self) -> usize {
        self.outputs.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn ok_or_bail(self, operation: &str) -> Result<Vec<R>> {
        if !self.failures.is_empty() {
            let failed: Vec<_> = self.failures.iter().map(|p| p.display().to_string()).collect();
            bail!("{operation} failed for {} file(s): {}", failed.len(), failed.join(", "));
        }
        Ok(self.outputs)
    }
}

/// Run `op` over every input in parallel.
///
/// Failures are logged per file and do not stop the rest of the batch.
/// Outputs keep the order of `inputs`.
pub fn run_parallel<P, R, F>(label: &str, inputs: &[P], op: F) -> BatchResult<R>
where
    P: AsRef<Path> + Sync,
    R: Send,
    F: Fn(&Path) -> Result<R> + Sync,
{
    let results: Vec<_> = inputs
        .par_iter()
        .map(|input| (input.as_ref(), op(input.as_ref())))
        .collect();

    let mut batch = BatchResult { outputs: Vec::new(), failures: Vec::new() };
    for (path, result) in results {
        match result {
            Ok(output) => batch.outputs.push(output),
            Err(e) => {
                error!("{}: {e:?}", path.display());
                batch.failures.push(path.to_path_buf());
            }
        }
    }

    info!("{label}: {} succeeded, {} failed", batch.succeeded(), batch.failed());
    batch
}
