//! Test execution engine.

use std::time::Instant;

use barefmt_core::Arg;
use barefmt_core::stdio::{DeviceSink, format_to_buffer, format_to_device};

use crate::device::CaptureDevice;
use crate::diff;
use crate::fixtures::{ArgSpec, Destination, FixtureCase, FixtureSet};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};
use crate::verify::VerificationResult;

/// Runs a fixture set and collects verification results.
pub struct TestRunner {
    /// Name of the test campaign.
    pub campaign: String,
}

impl TestRunner {
    /// Create a new test runner.
    #[must_use]
    pub fn new(campaign: impl Into<String>) -> Self {
        Self {
            campaign: campaign.into(),
        }
    }

    /// Run all fixtures in a set and return results.
    pub fn run(&self, fixture_set: &FixtureSet) -> Vec<VerificationResult> {
        fixture_set.cases.iter().map(verify_case).collect()
    }

    /// Like [`TestRunner::run`], logging one entry per case plus a summary.
    pub fn run_logged(
        &self,
        fixture_set: &FixtureSet,
        log: &mut LogEmitter,
    ) -> std::io::Result<Vec<VerificationResult>> {
        log.emit_entry(
            LogEntry::new(String::new(), LogLevel::Info, "set_start")
                .with_family(&fixture_set.family)
                .with_details(serde_json::json!({
                    "campaign": self.campaign,
                    "version": fixture_set.version,
                    "cases": fixture_set.cases.len(),
                })),
        )?;

        let mut results = Vec::with_capacity(fixture_set.cases.len());
        for case in &fixture_set.cases {
            let started = Instant::now();
            let result = verify_case(case);
            let elapsed = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

            let (level, outcome) = if result.passed {
                (LogLevel::Debug, Outcome::Pass)
            } else {
                (LogLevel::Error, Outcome::Fail)
            };
            let mut entry = LogEntry::new(String::new(), level, "case_result")
                .with_family(&fixture_set.family)
                .with_case(&case.name, case.destination.as_str())
                .with_outcome(outcome)
                .with_duration_us(elapsed);
            if let Some(diff) = &result.diff {
                entry = entry.with_details(serde_json::json!({ "diff": diff }));
            }
            log.emit_entry(entry)?;
            results.push(result);
        }

        let failed = results.iter().filter(|r| !r.passed).count();
        log.emit_entry(
            LogEntry::new(String::new(), LogLevel::Info, "set_done")
                .with_family(&fixture_set.family)
                .with_outcome(if failed == 0 { Outcome::Pass } else { Outcome::Fail })
                .with_details(serde_json::json!({
                    "passed": results.len() - failed,
                    "failed": failed,
                })),
        )?;
        Ok(results)
    }
}

fn verify_case(case: &FixtureCase) -> VerificationResult {
    let actual = execute_case(case);
    let passed = actual == case.expected;
    VerificationResult {
        case_name: case.name.clone(),
        destination: case.destination,
        passed,
        diff: (!passed).then(|| diff::render_diff(&case.expected, &actual)),
        expected: case.expected.clone(),
        actual,
    }
}

/// Render one case through its destination.
///
/// Device cases report every byte the device received, after a final flush.
/// Buffer cases report the terminated contents, or `overflow:<required>`.
pub fn execute_case(case: &FixtureCase) -> String {
    let args: Vec<Arg<'_>> = case.args.iter().map(ArgSpec::to_arg).collect();
    let fmt = case.format.as_bytes();

    match case.destination {
        Destination::Device => {
            let mut sink: DeviceSink<CaptureDevice> = DeviceSink::new(CaptureDevice::default());
            format_to_device(&mut sink, fmt, &args);
            String::from_utf8_lossy(&sink.into_inner().bytes()).into_owned()
        }
        Destination::Buffer => {
            let mut out = vec![0u8; case.capacity()];
            match format_to_buffer(&mut out, fmt, &args) {
                Ok(n) => String::from_utf8_lossy(&out[..n]).into_owned(),
                Err(err) => format!("overflow:{}", err.required()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structured_log::validate_log_line;

    fn fixture(json: &str) -> FixtureSet {
        FixtureSet::from_json(json).expect("valid fixture json")
    }

    #[test]
    fn buffer_cases_pass() {
        let set = fixture(
            r#"{"version":"v1","family":"stdio/printf","cases":[
                {"name":"pad","format":"%05d","args":[{"int":42}],"expected":"00042"},
                {"name":"null","format":"[%s]","args":[{"str":null}],"expected":"[(null)]"}
            ]}"#,
        );
        let results = TestRunner::new("smoke").run(&set);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.passed), "{results:?}");
    }

    #[test]
    fn overflow_is_reported_with_required_size() {
        let set = fixture(
            r#"{"version":"v1","family":"stdio/printf","cases":[
                {"name":"tight","format":"%d","args":[{"int":123456}],"expected":"overflow:7","capacity":4}
            ]}"#,
        );
        let results = TestRunner::new("overflow").run(&set);
        assert!(results[0].passed, "{:?}", results[0]);
    }

    #[test]
    fn device_cases_include_pending_line() {
        let set = fixture(
            r#"{"version":"v1","family":"stdio/printf","cases":[
                {"name":"lines","format":"a\nb","expected":"a\nb","destination":"device"}
            ]}"#,
        );
        let results = TestRunner::new("device").run(&set);
        assert!(results[0].passed);
        assert_eq!(results[0].destination, Destination::Device);
    }

    #[test]
    fn mismatch_carries_diff() {
        let set = fixture(
            r#"{"version":"v1","family":"stdio/printf","cases":[
                {"name":"wrong","format":"%x","args":[{"uint":255}],"expected":"FF"}
            ]}"#,
        );
        let results = TestRunner::new("fail").run(&set);
        assert!(!results[0].passed);
        assert_eq!(results[0].actual, "ff");
        assert!(results[0].diff.as_deref().unwrap().contains("+ff"));
    }

    #[test]
    fn logged_run_emits_valid_lines() {
        let set = fixture(
            r#"{"version":"v1","family":"stdio/printf","cases":[
                {"name":"ok","format":"%u","args":[{"uint":7}],"expected":"7"},
                {"name":"bad","format":"%u","args":[{"uint":7}],"expected":"8"}
            ]}"#,
        );
        let mut log = LogEmitter::to_buffer("runner");
        let results = TestRunner::new("log").run_logged(&set, &mut log).unwrap();
        assert_eq!(results.iter().filter(|r| r.passed).count(), 1);

        let text = String::from_utf8(log.buffered().unwrap().to_vec()).unwrap();
        let entries: Vec<LogEntry> = text
            .lines()
            .enumerate()
            .map(|(i, line)| validate_log_line(line, i + 1).unwrap())
            .collect();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].event, "set_start");
        assert_eq!(entries[2].outcome, Some(Outcome::Fail));
        assert_eq!(entries[3].outcome, Some(Outcome::Fail));
    }
}
