use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one executed check, for operator output. Nothing downstream
/// consumes it; the screenshots on disk are the actual deliverable.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub check: String,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    /// Screenshot files written, in capture order.
    pub screenshots: Vec<PathBuf>,
}

impl CheckReport {
    pub fn begin(check: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            started_at: Utc::now(),
            duration: Duration::ZERO,
            screenshots: Vec::new(),
        }
    }

    pub fn record_screenshot(&mut self, path: PathBuf) {
        self.screenshots.push(path);
    }

    /// Stamp the elapsed wall-clock time since `begin`.
    pub fn finish(&mut self) {
        self.duration = (Utc::now() - self.started_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
    }
}
