use std::path::PathBuf;

use barefmt_harness::config::HarnessConfig;
use barefmt_harness::fixtures::fixture_paths;
use barefmt_harness::report::FixtureDigest;
use barefmt_harness::structured_log::{LogEmitter, validate_log_file, validate_log_line};
use barefmt_harness::{Destination, FixtureSet, TestRunner, VerificationSummary};

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn load_all() -> Vec<FixtureSet> {
    fixture_paths(&fixture_dir())
        .expect("bundled fixtures present")
        .iter()
        .map(|path| FixtureSet::from_file(path).expect("bundled fixture parses"))
        .collect()
}

#[test]
fn bundled_fixtures_pass() {
    let runner = TestRunner::new("bundled");
    let results: Vec<_> = load_all().iter().flat_map(|set| runner.run(set)).collect();
    let summary = VerificationSummary::from_results(results);

    let failures: Vec<String> = summary
        .failures()
        .map(|r| format!("{}: {}", r.case_name, r.diff.clone().unwrap_or_default()))
        .collect();
    assert!(failures.is_empty(), "failing cases:\n{}", failures.join("\n"));
    assert!(summary.total > 0);
}

#[test]
fn bundled_fixtures_cover_both_destinations() {
    let sets = load_all();
    let cases = sets.iter().flat_map(|set| set.cases.iter());
    let (device, buffer): (Vec<_>, Vec<_>) =
        cases.partition(|case| case.destination == Destination::Device);
    assert!(!device.is_empty());
    assert!(!buffer.is_empty());
}

#[test]
fn case_names_are_unique() {
    for set in load_all() {
        let mut names: Vec<&str> = set.cases.iter().map(|c| c.name.as_str()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total, "duplicate case names in {}", set.family);
    }
}

#[test]
fn logged_run_is_schema_valid() {
    let mut log = LogEmitter::to_buffer("suite");
    let runner = TestRunner::new("bundled-logged");
    for set in load_all() {
        runner.run_logged(&set, &mut log).unwrap();
    }
    let text = String::from_utf8(log.buffered().unwrap().to_vec()).unwrap();
    let mut count = 0;
    for (i, line) in text.lines().enumerate() {
        if let Err(errs) = validate_log_line(line, i + 1) {
            let msgs: Vec<String> = errs.iter().map(ToString::to_string).collect();
            panic!("invalid log line {}: {}", i + 1, msgs.join("; "));
        }
        count += 1;
    }
    assert!(count > 2);
}

#[test]
fn log_file_output_is_schema_valid() {
    let dir = std::env::temp_dir().join(format!("barefmt-suite-log-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("run.jsonl");

    let config = HarnessConfig::from_values(Some("trace"), Some(path.clone()));
    let mut log = config.emitter("suite-file").unwrap();
    let runner = TestRunner::new("bundled-file");
    let mut cases = 0;
    for set in load_all() {
        cases += runner.run_logged(&set, &mut log).unwrap().len();
    }
    log.flush().unwrap();
    drop(log);

    let (lines, errors) = validate_log_file(&path).unwrap();
    assert!(errors.is_empty(), "{errors:?}");
    assert!(lines > cases, "expected per-case lines plus set markers");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn fixture_digest_is_stable() {
    let path = fixture_paths(&fixture_dir()).unwrap().remove(0);
    let a = FixtureDigest::of_file(&path).unwrap();
    let b = FixtureDigest::of_file(&path).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.sha256.len(), 64);
}
