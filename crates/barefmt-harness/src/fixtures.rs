//! Fixture loading and management.

use std::path::{Path, PathBuf};

use barefmt_core::Arg;
use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Buffer size used by buffer cases that do not name one.
pub const DEFAULT_CAPACITY: usize = 256;

/// One argument value, tagged with its slot kind.
///
/// JSON form: `{"int": -3}`, `{"uint": 7}`, `{"float": 1.5}`, `{"str": "x"}`,
/// `{"str": null}` (null pointer), `{"ptr": 4096}`. JSON has no infinity or
/// NaN, so those are given as raw IEEE-754 bits: `{"float_bits": 9218868437227405312}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgSpec {
    Int(i64),
    Uint(u64),
    Float(f64),
    #[serde(rename = "float_bits")]
    FloatBits(u64),
    Str(Option<String>),
    Ptr(u64),
}

impl ArgSpec {
    /// Borrow this spec as an engine argument.
    #[must_use]
    pub fn to_arg(&self) -> Arg<'_> {
        match self {
            Self::Int(v) => Arg::Int(*v),
            Self::Uint(v) => Arg::Uint(*v),
            Self::Float(v) => Arg::Float(*v),
            Self::FloatBits(bits) => Arg::Float(f64::from_bits(*bits)),
            Self::Str(s) => Arg::Str(s.as_deref().map(str::as_bytes)),
            Self::Ptr(p) => Arg::Ptr(*p as usize),
        }
    }

    /// Parse the CLI form: `int:-3`, `uint:7`, `float:1.5`,
    /// `float_bits:0x7ff0000000000000`, `str:text`, `null`, `ptr:0x1000`.
    /// Integers are read by [`parse_u64`].
    pub fn parse_cli(s: &str) -> Result<Self, HarnessError> {
        let bad = || HarnessError::ArgSpec(s.to_string());
        if s == "null" {
            return Ok(Self::Str(None));
        }
        let (kind, value) = s.split_once(':').ok_or_else(bad)?;
        match kind {
            "int" => {
                let (negative, digits) = match value.strip_prefix('-') {
                    Some(rest) => (true, rest),
                    None => (false, value),
                };
                let magnitude = parse_u64(digits).ok_or_else(bad)?;
                let v = if negative {
                    0i64.checked_sub_unsigned(magnitude)
                } else {
                    i64::try_from(magnitude).ok()
                };
                v.map(Self::Int).ok_or_else(bad)
            }
            "uint" => parse_u64(value).map(Self::Uint).ok_or_else(bad),
            "ptr" => parse_u64(value).map(Self::Ptr).ok_or_else(bad),
            "float_bits" => parse_u64(value).map(Self::FloatBits).ok_or_else(bad),
            "float" => value.parse().map(Self::Float).map_err(|_| bad()),
            "str" => Ok(Self::Str(Some(value.to_string()))),
            _ => Err(bad()),
        }
    }
}

/// Parse a decimal or `0x`-prefixed hex integer. `_` separators are ignored.
#[must_use]
pub fn parse_u64(s: &str) -> Option<u64> {
    let digits = s.replace('_', "");
    match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => digits.parse().ok(),
    }
}

/// Where a case's output is delivered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Destination {
    Device,
    #[default]
    Buffer,
}

impl Destination {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::Buffer => "buffer",
        }
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    pub format: String,
    #[serde(default)]
    pub args: Vec<ArgSpec>,
    /// Expected output. Buffer overflows are written as `overflow:<required>`.
    pub expected: String,
    #[serde(default)]
    pub destination: Destination,
    /// Buffer size for buffer cases, terminator included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl FixtureCase {
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.unwrap_or(DEFAULT_CAPACITY)
    }
}

/// A collection of fixture cases for one family of behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    pub family: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| HarnessError::Fixture {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Every `*.json` file directly inside `dir`, sorted by path.
pub fn fixture_paths(dir: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();
    if paths.is_empty() {
        return Err(HarnessError::NoFixtures(dir.to_path_buf()));
    }
    Ok(paths)
}
