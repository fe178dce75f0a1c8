//! `.din` trace ingestion and the Monte-Carlo workload filename convention.
//!
//! Trace parsing itself is "trivial plumbing" per spec.md §1, but its
//! interface is part of this crate because the CLI has to read `.din`
//! files somehow. Grounded on `original_source/cache_sim.py`'s
//! `parse_din`/`output_to_din` and `main.py`'s `parse_din`, both of which
//! split each line on the first space and parse the address as hex.

use std::path::Path;

use crate::access::{AccessKind, AccessRecord};
use crate::error::{CacheSimError, Result};

/// Parse one `.din` line: `"<kind> <hex-address>"`, decimal kind,
/// lowercase hex address, no `0x` prefix.
fn parse_line(line: &str, line_no: usize) -> Result<AccessRecord> {
    let malformed = || CacheSimError::MalformedTrace {
        line: line_no,
        text: line.to_string(),
    };

    let mut parts = line.split_ascii_whitespace();
    let kind_field = parts.next().ok_or_else(malformed)?;
    let addr_field = parts.next().ok_or_else(malformed)?;
    if parts.next().is_some() {
        return Err(malformed());
    }

    let kind_value: u8 = kind_field.parse().map_err(|_| malformed())?;
    let kind = AccessKind::try_from(kind_value).map_err(|_| malformed())?;
    let address = u64::from_str_radix(addr_field, 16).map_err(|_| malformed())?;

    Ok(AccessRecord { kind, address })
}

/// Read an entire `.din` trace into memory, in order. Any malformed line
/// fails the whole read (spec.md §7: no partial results for a malformed
/// trace record).
pub fn read_din(path: impl AsRef<Path>) -> Result<Vec<AccessRecord>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    parse_din_str(&text)
}

/// Parse `.din` trace content already held in memory (used by tests and
/// by `read_din`).
pub fn parse_din_str(text: &str) -> Result<Vec<AccessRecord>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_line(line, i + 1))
        .collect()
}

/// Render a trace back to `.din` text, the inverse of [`parse_din_str`].
/// Grounded on `original_source/cache_sim.py`'s `output_to_din`, which
/// joins `hex(addr)[2:]` (no `0x` prefix) per line.
pub fn write_din(trace: &[AccessRecord]) -> String {
    trace
        .iter()
        .map(|record| format!("{} {:x}", record.kind as u8, record.address))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse the `<prefix>_<l1_size>_<l2_size>` Monte-Carlo filename
/// convention from a file stem (filename without extension).
///
/// Grounded on `original_source/monte_carlo.py`'s `SimulationRunner.__init__`:
/// `parts = i.split('.')[0].split('_')`, then `l1_size = int(parts[1])`,
/// `l2_size = int(parts[2])` — i.e. the *last two* underscore-separated
/// fields are sizes in bytes and everything before them is the prefix.
/// Returns `None` if the stem doesn't have at least three `_`-separated
/// fields or either size field fails to parse as a byte count.
pub fn parse_geometry_from_stem(stem: &str) -> Option<(usize, usize)> {
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 3 {
        return None;
    }
    let l2_size: usize = parts[parts.len() - 1].parse().ok()?;
    let l1_size: usize = parts[parts.len() - 2].parse().ok()?;
    Some((l1_size, l2_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_trace() {
        let text = "0 0\n1 40\n2 ff\n";
        let trace = parse_din_str(text).unwrap();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace[0].kind, AccessKind::ReadData);
        assert_eq!(trace[1].address, 0x40);
        assert_eq!(trace[2].kind, AccessKind::ReadInst);
        assert_eq!(trace[2].address, 0xff);
    }

    #[test]
    fn skips_trailing_blank_lines() {
        let text = "0 0\n\n1 10\n\n";
        let trace = parse_din_str(text).unwrap();
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn rejects_bad_kind_with_line_number() {
        let text = "0 0\n3 10\n";
        let err = parse_din_str(text).unwrap_err();
        match err {
            CacheSimError::MalformedTrace { line, .. } => assert_eq!(line, 2),
            other => panic!("expected MalformedTrace, got {other:?}"),
        }
    }

    #[test]
    fn rejects_non_hex_address() {
        assert!(parse_din_str("0 not-hex\n").is_err());
    }

    #[test]
    fn rejects_missing_field() {
        assert!(parse_din_str("0\n").is_err());
    }

    #[test]
    fn write_din_round_trips_through_parse() {
        let trace = vec![
            AccessRecord { kind: AccessKind::ReadData, address: 0x0 },
            AccessRecord { kind: AccessKind::WriteData, address: 0xdead },
            AccessRecord { kind: AccessKind::ReadInst, address: 0x7f },
        ];
        let text = write_din(&trace);
        let parsed = parse_din_str(&text).unwrap();
        assert_eq!(parsed, trace);
    }

    #[test]
    fn parses_geometry_from_monte_carlo_stem() {
        assert_eq!(parse_geometry_from_stem("008.espresso_32768_262144"), Some((32768, 262144)));
        assert_eq!(parse_geometry_from_stem("workload_4096_65536"), Some((4096, 65536)));
    }

    #[test]
    fn geometry_parse_rejects_too_few_fields() {
        assert_eq!(parse_geometry_from_stem("workload_4096"), None);
        assert_eq!(parse_geometry_from_stem("workload"), None);
    }

    #[test]
    fn geometry_parse_rejects_non_numeric_fields() {
        assert_eq!(parse_geometry_from_stem("prefix_abc_def"), None);
    }
}
