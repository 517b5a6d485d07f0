//! CLI entrypoint for the barefmt conformance harness.

use std::path::PathBuf;

use barefmt_core::stdio::{
    Counter, DeviceSink, format_to_buffer, format_to_device, write_counter_report,
};
use barefmt_harness::config::HarnessConfig;
use barefmt_harness::device::StdoutDevice;
use barefmt_harness::fixtures::{fixture_paths, parse_u64};
use barefmt_harness::report::{FixtureDigest, float_width};
use barefmt_harness::structured_log::{LogEntry, LogLevel, Outcome, now_utc};
use barefmt_harness::{
    ArgSpec, FixtureSet, HarnessError, SuiteReport, TestRunner, VerificationSummary,
};
use clap::{Parser, Subcommand};

/// Conformance tooling for barefmt.
#[derive(Debug, Parser)]
#[command(name = "barefmt-harness")]
#[command(about = "Conformance testing harness for barefmt")]
struct Cli {
    /// Minimum structured-log level (falls back to BAREFMT_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    /// JSONL log file (falls back to BAREFMT_LOG, then stderr).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the engine against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown; a .json twin is written alongside).
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Format once and print the result.
    Render {
        /// Format string. `\n`, `\t` and `\\` are unescaped.
        #[arg(long)]
        format: String,
        /// Typed argument: int:N, uint:N, float:X, float_bits:N, str:S, null, ptr:N.
        #[arg(long = "arg")]
        args: Vec<String>,
        /// Format into a buffer of this size instead of the device.
        #[arg(long)]
        buffer: Option<usize>,
    },
    /// Print an end-of-run counter report.
    Report {
        /// Counter as name=value; zero counters are skipped.
        #[arg(long = "counter")]
        counters: Vec<String>,
    },
    /// Print a value as 16 hex digits.
    Hex {
        /// Decimal or 0x-prefixed value.
        value: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = HarnessConfig::from_values(cli.log_level.as_deref(), cli.log_file.clone())
        .with_env_fallback(cli.log_level.is_some());
    let run_id = format!("run-{}", std::process::id());
    let mut log = config.emitter(&run_id)?;

    match cli.command {
        Command::Verify { fixture, report } => {
            let fixture_dir = fixture.display().to_string();
            log.emit_entry(
                LogEntry::new(String::new(), LogLevel::Info, "verify_start")
                    .with_details(serde_json::json!({ "fixture_dir": fixture_dir })),
            )?;

            let runner = TestRunner::new("fixture-verify");
            let mut results = Vec::new();
            let mut digests = Vec::new();
            for path in fixture_paths(&fixture)? {
                let set = match FixtureSet::from_file(&path) {
                    Ok(set) => set,
                    Err(err) => {
                        log.emit_entry(
                            LogEntry::new(String::new(), LogLevel::Warn, "fixture_skipped")
                                .with_outcome(Outcome::Skip)
                                .with_details(serde_json::json!({ "error": err.to_string() })),
                        )?;
                        continue;
                    }
                };
                digests.push(FixtureDigest::of_file(&path)?);
                results.extend(runner.run_logged(&set, &mut log)?);
            }
            if digests.is_empty() {
                return Err(HarnessError::NoFixtures(fixture).into());
            }

            let report_doc = SuiteReport {
                title: String::from("barefmt Conformance Report"),
                timestamp: now_utc(),
                float_width: float_width().to_string(),
                fixtures: digests,
                summary: VerificationSummary::from_results(results),
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );
            for failure in report_doc.summary.failures() {
                eprintln!("FAIL {}", failure.case_name);
                if let Some(diff) = &failure.diff {
                    eprintln!("{diff}");
                }
            }

            if let Some(report_path) = report {
                std::fs::write(&report_path, report_doc.to_markdown())?;
                std::fs::write(report_path.with_extension("json"), report_doc.to_json())?;
                eprintln!("Wrote report to {}", report_path.display());
            }

            let passed = report_doc.summary.all_passed();
            log.emit_entry(
                LogEntry::new(String::new(), LogLevel::Info, "verify_done").with_outcome(if passed {
                    Outcome::Pass
                } else {
                    Outcome::Fail
                }),
            )?;
            log.flush()?;
            if !passed {
                return Err("Conformance verification failed".into());
            }
        }
        Command::Render {
            format,
            args,
            buffer,
        } => {
            let specs = args
                .iter()
                .map(|a| ArgSpec::parse_cli(a))
                .collect::<Result<Vec<_>, _>>()?;
            let args: Vec<_> = specs.iter().map(ArgSpec::to_arg).collect();
            let fmt = unescape(&format);

            match buffer {
                Some(capacity) => {
                    let mut out = vec![0u8; capacity];
                    match format_to_buffer(&mut out, &fmt, &args) {
                        Ok(n) => println!("{} ({n} bytes)", String::from_utf8_lossy(&out[..n])),
                        Err(err) => {
                            let kept = out.iter().position(|&b| b == 0).unwrap_or(0);
                            println!("{} ({err})", String::from_utf8_lossy(&out[..kept]));
                        }
                    }
                }
                None => {
                    let mut sink: DeviceSink<StdoutDevice> = DeviceSink::new(StdoutDevice::new());
                    format_to_device(&mut sink, &fmt, &args);
                    let mut device = sink.into_inner();
                    if let Some(err) = device.take_error() {
                        return Err(err.into());
                    }
                }
            }
            log.emit_entry(
                LogEntry::new(String::new(), LogLevel::Debug, "render").with_details(
                    serde_json::json!({ "format": format, "args": specs.len() }),
                ),
            )?;
        }
        Command::Report { counters } => {
            let parsed = counters
                .iter()
                .map(|c| parse_counter(c))
                .collect::<Result<Vec<_>, _>>()?;
            let counters: Vec<Counter<'_>> = parsed
                .iter()
                .map(|(name, value)| Counter::new(name, *value))
                .collect();

            let mut sink: DeviceSink<StdoutDevice> = DeviceSink::new(StdoutDevice::new());
            let written = write_counter_report(&mut sink, &counters);
            if let Some(err) = sink.into_inner().take_error() {
                return Err(err.into());
            }
            log.emit_entry(
                LogEntry::new(String::new(), LogLevel::Debug, "counter_report")
                    .with_details(serde_json::json!({ "bytes": written })),
            )?;
        }
        Command::Hex { value } => {
            let value = parse_u64(&value).ok_or_else(|| format!("invalid value '{value}'"))?;
            let mut sink: DeviceSink<StdoutDevice> = DeviceSink::new(StdoutDevice::new());
            sink.print_hex(value);
            sink.putchar(b'\n');
            if let Some(err) = sink.into_inner().take_error() {
                return Err(err.into());
            }
        }
    }

    log.flush()?;
    Ok(())
}

fn parse_counter(s: &str) -> Result<(String, u64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid counter '{s}', expected name=value"))?;
    let value = parse_u64(value).ok_or_else(|| format!("invalid counter value in '{s}'"))?;
    Ok((name.to_string(), value))
}

fn unescape(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    let mut bytes = s.bytes();
    while let Some(b) = bytes.next() {
        if b != b'\\' {
            out.push(b);
            continue;
        }
        match bytes.next() {
            Some(b'n') => out.push(b'\n'),
            Some(b't') => out.push(b'\t'),
            Some(b'\\') => out.push(b'\\'),
            Some(other) => out.extend_from_slice(&[b'\\', other]),
            None => out.push(b'\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescape_handles_common_sequences() {
        assert_eq!(unescape(r"a\nb\tc\\d\q"), b"a\nb\tc\\d\\q");
        assert_eq!(unescape(r"end\"), b"end\\");
    }

    #[test]
    fn counters_parse() {
        assert_eq!(parse_counter("mcycle=0x10").unwrap(), ("mcycle".to_string(), 16));
        assert!(parse_counter("mcycle").is_err());
        assert!(parse_counter("mcycle=x").is_err());
    }
}
