//! Report generation for verification runs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::HarnessError;
use crate::verify::VerificationSummary;

/// Identity of a fixture file a report was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureDigest {
    pub path: String,
    pub sha256: String,
}

impl FixtureDigest {
    /// Hash the file at `path`.
    pub fn of_file(path: &Path) -> Result<Self, HarnessError> {
        let data = std::fs::read(path)?;
        Ok(Self {
            path: path.display().to_string(),
            sha256: sha256_hex(&data),
        })
    }
}

/// A verification report over one or more fixture files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Report title.
    pub title: String,
    /// Timestamp (UTC).
    pub timestamp: String,
    /// Float type the engine was built with.
    pub float_width: String,
    pub fixtures: Vec<FixtureDigest>,
    /// Verification summary.
    pub summary: VerificationSummary,
}

impl SuiteReport {
    /// Render the report as markdown.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        out.push_str(&format!("- Timestamp: {}\n", self.timestamp));
        out.push_str(&format!("- Float width: {}\n", self.float_width));
        out.push_str(&format!("- Total: {}\n", self.summary.total));
        out.push_str(&format!("- Passed: {}\n", self.summary.passed));
        out.push_str(&format!("- Failed: {}\n\n", self.summary.failed));

        out.push_str("| Case | Destination | Status |\n");
        out.push_str("|------|-------------|--------|\n");
        for r in &self.summary.results {
            let status = if r.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                r.case_name,
                r.destination.as_str(),
                status
            ));
        }
        out
    }

    /// Render the report as JSON.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
    }
}

/// Width of the float type `%f` renders, as built.
#[must_use]
pub fn float_width() -> &'static str {
    if size_of::<barefmt_core::stdio::Real>() == 8 {
        "f64"
    } else {
        "f32"
    }
}

fn sha256_hex(data: &[u8]) -> String {
    Sha256::digest(data)
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
