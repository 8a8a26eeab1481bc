//! Per-run summary of extension outcomes.

use std::fmt;

/// Summary of a pipeline run: which extensions made it into the pack,
/// which were skipped, and which failed (dry-run mode only; failures
/// abort the run when push is enabled).
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub succeeded: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} succeeded, {} skipped, {} failed",
            self.succeeded.len(),
            self.skipped.len(),
            self.failed.len()
        )?;
        for name in &self.succeeded {
            writeln!(f, "  + {name}")?;
        }
        for name in &self.skipped {
            writeln!(f, "  - {name} (skipped)")?;
        }
        for name in &self.failed {
            writeln!(f, "  ! {name} (failed)")?;
        }
        Ok(())
    }
}
