//! Function manifest: the execution settings copied into every new project.
//!
//! The manifest is owned by the function runtime, not by the registry. The
//! registry only carries it around as a value and writes it to
//! [`MANIFEST_FILE`] when a project is scaffolded. The JSON layout matches
//! what the runtime reads, including Go-style duration strings such as
//! `"1s"` or `"1m30s"` for `time_limit`.

use crate::error::{FnkitError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// File name the manifest is persisted under inside a project.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Execution manifest of a function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Display name
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Long-form description (markdown)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Command line executed for every request
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub run: Vec<String>,

    /// Headers added to every response
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub output_headers: BTreeMap<String, String>,

    /// Request headers mapped to environment variables
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub input_headers: BTreeMap<String, String>,

    /// Query parameters mapped to environment variables
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,

    /// Static environment for the process
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,

    /// Allowed HTTP method (empty = any)
    #[serde(skip_serializing_if = "String::is_empty")]
    pub method: String,

    /// Maximum execution time per request
    #[serde(with = "go_duration", skip_serializing_if = "Duration::is_zero")]
    pub time_limit: Duration,

    /// Maximum request body size in bytes
    #[serde(skip_serializing_if = "is_zero")]
    pub maximum_payload: u64,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub allowed_ip: BTreeSet<String>,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub allowed_origin: BTreeSet<String>,

    /// Whether the function can be called without a token
    pub public: bool,

    /// Directory served as static content
    #[serde(rename = "static", skip_serializing_if = "String::is_empty")]
    pub static_dir: String,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub aliases: BTreeSet<String>,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl Manifest {
    /// Load a manifest from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| FnkitError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Render the manifest as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| FnkitError::Other(e.into()))
    }

    /// Persist the manifest to `path`, replacing any existing file.
    pub fn save_as(&self, path: &Path) -> Result<()> {
        let mut content = self.to_json_pretty()?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }
}

/// Serde adapter for Go-style duration strings.
pub mod go_duration {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_duration(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_duration(&raw).map_err(serde::de::Error::custom)
    }

    const NANOS_PER_MICRO: u128 = 1_000;
    const NANOS_PER_MILLI: u128 = 1_000_000;
    const NANOS_PER_SEC: u128 = 1_000_000_000;

    fn unit_nanos(unit: &str) -> Option<u128> {
        match unit {
            "ns" => Some(1),
            "us" | "µs" | "μs" => Some(NANOS_PER_MICRO),
            "ms" => Some(NANOS_PER_MILLI),
            "s" => Some(NANOS_PER_SEC),
            "m" => Some(60 * NANOS_PER_SEC),
            "h" => Some(3600 * NANOS_PER_SEC),
            _ => None,
        }
    }

    /// Parse a duration such as `"1s"`, `"250ms"`, `"1.5h"` or `"2h45m"`.
    pub fn parse_duration(input: &str) -> Result<Duration, String> {
        let s = input.trim();
        if s == "0" {
            return Ok(Duration::ZERO);
        }
        if s.is_empty() {
            return Err("empty duration".to_string());
        }

        let mut total: u128 = 0;
        let mut rest = s;
        while !rest.is_empty() {
            let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            let (int_part, after_int) = rest.split_at(int_len);

            let (frac_part, after_number) = match after_int.strip_prefix('.') {
                Some(tail) => {
                    let frac_len = tail.find(|c: char| !c.is_ascii_digit()).unwrap_or(tail.len());
                    tail.split_at(frac_len)
                }
                None => ("", after_int),
            };
            if int_part.is_empty() && frac_part.is_empty() {
                return Err(format!("invalid duration {:?}", input));
            }

            let unit_len = after_number
                .find(|c: char| c.is_ascii_digit() || c == '.')
                .unwrap_or(after_number.len());
            let (unit, tail) = after_number.split_at(unit_len);
            if unit.is_empty() {
                return Err(format!("missing unit in duration {:?}", input));
            }
            let scale = unit_nanos(unit)
                .ok_or_else(|| format!("unknown unit {:?} in duration {:?}", unit, input))?;

            let whole: u128 = if int_part.is_empty() {
                0
            } else {
                int_part
                    .parse()
                    .map_err(|_| format!("invalid duration {:?}", input))?
            };
            let mut value = whole
                .checked_mul(scale)
                .ok_or_else(|| format!("duration {:?} overflows", input))?;
            if !frac_part.is_empty() {
                // Digits beyond nanosecond precision are dropped.
                let digits = &frac_part[..frac_part.len().min(18)];
                let frac: u128 = digits
                    .parse()
                    .map_err(|_| format!("invalid duration {:?}", input))?;
                value = value
                    .checked_add(frac * scale / 10u128.pow(digits.len() as u32))
                    .ok_or_else(|| format!("duration {:?} overflows", input))?;
            }
            total = total
                .checked_add(value)
                .ok_or_else(|| format!("duration {:?} overflows", input))?;
            rest = tail;
        }

        let secs = u64::try_from(total / NANOS_PER_SEC)
            .map_err(|_| format!("duration {:?} overflows", input))?;
        Ok(Duration::new(secs, (total % NANOS_PER_SEC) as u32))
    }

    /// Format a duration the way the function runtime prints it (`"1m30s"`).
    pub fn format_duration(value: Duration) -> String {
        let nanos = value.as_nanos();
        if nanos == 0 {
            return "0s".to_string();
        }
        if nanos < NANOS_PER_MICRO {
            return format!("{}ns", nanos);
        }
        if nanos < NANOS_PER_MILLI {
            return format!("{}µs", with_fraction(nanos, NANOS_PER_MICRO, 3));
        }
        if nanos < NANOS_PER_SEC {
            return format!("{}ms", with_fraction(nanos, NANOS_PER_MILLI, 6));
        }

        let secs = value.as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let rem = u128::from(secs % 60) * NANOS_PER_SEC + u128::from(value.subsec_nanos());

        let mut out = String::new();
        if hours > 0 {
            out.push_str(&format!("{}h", hours));
        }
        if hours > 0 || minutes > 0 {
            out.push_str(&format!("{}m", minutes));
        }
        out.push_str(&format!("{}s", with_fraction(rem, NANOS_PER_SEC, 9)));
        out
    }

    fn with_fraction(nanos: u128, unit: u128, digits: usize) -> String {
        let whole = nanos / unit;
        let frac = nanos % unit;
        if frac == 0 {
            return whole.to_string();
        }
        let frac = format!("{:0width$}", frac, width = digits);
        format!("{}.{}", whole, frac.trim_end_matches('0'))
    }
}

#[cfg(test)]
mod tests {
    use super::go_duration::{format_duration, parse_duration};
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_simple_durations() {
        assert_eq!(parse_duration("1s").unwrap(), Duration::from_secs(1));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn parses_compound_and_fractional_durations() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_duration("1h0m0s").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("10us").unwrap(), Duration::from_micros(10));
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(parse_duration("").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("5 parsecs").is_err());
        assert!(parse_duration("s").is_err());
    }

    #[test]
    fn rejects_fraction_that_overflows() {
        // The whole part alone fits in u128 nanoseconds; the fraction does not.
        let input = format!("{}.9s", u128::MAX / 1_000_000_000);
        let err = parse_duration(&input).unwrap_err();
        assert!(err.contains("overflows"));
    }

    #[test]
    fn formats_like_the_runtime() {
        assert_eq!(format_duration(Duration::from_secs(1)), "1s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::ZERO), "0s");
    }

    #[test]
    fn manifest_serializes_time_limit_as_string() {
        let manifest = Manifest {
            name: "demo".into(),
            time_limit: Duration::from_secs(1),
            maximum_payload: 8192,
            ..Default::default()
        };
        let json = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["time_limit"], "1s");
        assert_eq!(json["maximum_payload"], 8192);
        assert!(json.get("run").is_none());
    }

    #[test]
    fn manifest_defaults_missing_fields() {
        let manifest: Manifest = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(manifest.name, "x");
        assert!(manifest.run.is_empty());
        assert_eq!(manifest.time_limit, Duration::ZERO);
        assert!(!manifest.public);
    }

    #[test]
    fn manifest_reads_static_field() {
        let manifest: Manifest = serde_json::from_str(r#"{"static": "public"}"#).unwrap();
        assert_eq!(manifest.static_dir, "public");
    }

    #[test]
    fn manifest_rejects_bad_time_limit() {
        let result: std::result::Result<Manifest, _> =
            serde_json::from_str(r#"{"time_limit": "forever"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn save_as_writes_readable_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(MANIFEST_FILE);
        let manifest = Manifest {
            name: "Example".into(),
            run: vec!["node".into(), "app.js".into()],
            time_limit: Duration::from_secs(1),
            ..Default::default()
        };

        manifest.save_as(&path).unwrap();
        let loaded = Manifest::from_path(&path).unwrap();

        assert_eq!(loaded, manifest);
    }
}
