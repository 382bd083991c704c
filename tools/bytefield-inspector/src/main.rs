//! Print the TLV records in a buffer.
//!
//! The input is read from a file or given inline as hex. It may be wrapped in a
//! simple or length-prefixed frame and may carry a trailing checksum byte; both
//! are removed (and verified) before the records are listed.
//!
//! ```sh
//! bytefield-inspector --hex 01050048656c6c6f
//! bytefield-inspector capture.bin --frame simple --start 7e --end 7e --checksum sum
//! ```
//!
//! Log output goes to stderr. `-v` raises the level; `RUST_LOG` overrides it.

use std::path::PathBuf;
use std::process::ExitCode;

use bytefield::{
    parse_all_tlv, remove_length_prefixed_frame, remove_simple_frame, sum_mod_256,
    validate_checksum, xor, FrameMarkers, ScanState, TlvRecord,
};
use clap::{ArgGroup, Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FrameKind {
    None,
    Simple,
    Length,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ChecksumKind {
    None,
    Sum,
    Xor,
}

impl ChecksumKind {
    fn function(self) -> Option<fn(&[u8]) -> u8> {
        match self {
            ChecksumKind::None => None,
            ChecksumKind::Sum => Some(sum_mod_256),
            ChecksumKind::Xor => Some(xor),
        }
    }
}

fn parse_marker(s: &str) -> Result<u8, String> {
    let digits = s.trim_start_matches("0x");
    u8::from_str_radix(digits, 16).map_err(|e| format!("invalid marker {:?}: {}", s, e))
}

#[derive(Debug, Parser)]
#[command(name = "bytefield-inspector", about = "List the TLV records in a buffer")]
#[command(group(ArgGroup::new("input").required(true).args(["file", "hex"])))]
struct Args {
    /// File containing the raw buffer
    file: Option<PathBuf>,

    /// Buffer given inline as hex
    #[arg(long)]
    hex: Option<String>,

    /// Framing to remove before scanning
    #[arg(long, value_enum, default_value_t = FrameKind::None)]
    frame: FrameKind,

    /// Start marker for simple framing (hex)
    #[arg(long, value_parser = parse_marker, default_value = "7e")]
    start: u8,

    /// End marker for simple framing (hex)
    #[arg(long, value_parser = parse_marker, default_value = "7e")]
    end: u8,

    /// Trailing checksum byte to verify and strip
    #[arg(long, value_enum, default_value_t = ChecksumKind::None)]
    checksum: ChecksumKind,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn load(&self) -> Result<Vec<u8>, String> {
        if let Some(encoded) = &self.hex {
            return hex::decode(encoded.trim()).map_err(|e| format!("invalid hex input: {}", e));
        }
        match &self.file {
            Some(path) => std::fs::read(path)
                .map_err(|e| format!("failed to read {}: {}", path.display(), e)),
            None => Err("no input given".to_string()),
        }
    }
}

/// Renders a value as text when it is printable UTF-8.
fn preview(record: &TlvRecord) -> Option<&str> {
    let text = std::str::from_utf8(record.value()).ok()?;
    if text.is_empty() || text.chars().any(char::is_control) {
        return None;
    }
    Some(text)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let raw = match args.load() {
        Ok(raw) => raw,
        Err(e) => {
            error!(error = %e, "failed to load input");
            return ExitCode::FAILURE;
        }
    };
    info!(len = raw.len(), "loaded buffer");

    let unframed = match args.frame {
        FrameKind::None => Ok(&raw[..]),
        FrameKind::Simple => FrameMarkers::new(args.start, args.end).remove(&raw),
        FrameKind::Length => remove_length_prefixed_frame(&raw),
    };
    let payload = match unframed {
        Ok(payload) => payload,
        Err(e) => {
            error!(frame = ?args.frame, error = %e, "failed to remove frame");
            return ExitCode::FAILURE;
        }
    };

    let body = match args.checksum.function() {
        Some(f) => {
            if !validate_checksum(payload, f) {
                error!(checksum = ?args.checksum, "checksum mismatch");
                return ExitCode::FAILURE;
            }
            &payload[..payload.len() - 1]
        }
        None => payload,
    };

    let mut records = parse_all_tlv(body);
    let mut count = 0usize;
    for record in records.by_ref() {
        match record {
            Ok(record) => {
                match preview(&record) {
                    Some(text) => println!(
                        "tag=0x{:02x} len={} value={} text={:?}",
                        record.tag(),
                        record.length(),
                        hex::encode(record.value()),
                        text
                    ),
                    None => println!(
                        "tag=0x{:02x} len={} value={}",
                        record.tag(),
                        record.length(),
                        hex::encode(record.value())
                    ),
                }
                count += 1;
            }
            Err(e) => error!(error = %e, "scan failed"),
        }
    }

    if records.state() == ScanState::Failed {
        warn!(records = count, position = records.position(), "partial scan");
        return ExitCode::FAILURE;
    }
    info!(records = count, "scan complete");
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marker() {
        assert_eq!(parse_marker("7e").unwrap(), 0x7E);
        assert_eq!(parse_marker("0x02").unwrap(), 0x02);
        assert!(parse_marker("zz").is_err());
        assert!(parse_marker("100").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["bytefield-inspector", "--hex", "0100", "--frame", "length", "-vv"]).unwrap();
        assert_eq!(args.frame, FrameKind::Length);
        assert_eq!(args.checksum, ChecksumKind::None);
        assert_eq!(args.start, 0x7E);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.load().unwrap(), vec![0x01, 0x00]);

        // Input is required
        assert!(Args::try_parse_from(["bytefield-inspector"]).is_err());
    }

    #[test]
    fn test_preview() {
        let record = TlvRecord::new(1, &b"Hello"[..]).unwrap();
        assert_eq!(preview(&record), Some("Hello"));
        let record = TlvRecord::new(1, vec![0xFF, 0x00]).unwrap();
        assert_eq!(preview(&record), None);
    }
}
