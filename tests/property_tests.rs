//! Property-based tests for rust_json_logger using proptest

use proptest::prelude::*;
use rust_json_logger::prelude::*;
use serde_json::Value;

fn quiet_logger(level: LogLevel, buffer: &MemoryAppender) -> Logger {
    Logger::builder(level, buffer.clone())
        .timestamp_key("")
        .caller_key("")
        .build()
}

fn single_record(buffer: &MemoryAppender) -> Value {
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1, "expected one record, got {:?}", lines);
    serde_json::from_str(&lines[0]).expect("record is valid JSON")
}

fn finite_f64() -> impl Strategy<Value = f64> {
    use proptest::num::f64::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO
}

fn finite_f32() -> impl Strategy<Value = f32> {
    use proptest::num::f32::{NEGATIVE, NORMAL, POSITIVE, SUBNORMAL, ZERO};
    POSITIVE | NEGATIVE | NORMAL | SUBNORMAL | ZERO
}

/// Fragment written for `key` when it is the last field of the only record.
fn raw_field(buffer: &MemoryAppender, key: &str) -> String {
    let lines = buffer.lines();
    assert_eq!(lines.len(), 1, "expected one record, got {:?}", lines);
    let marker = format!("\"{}\":", key);
    let start = lines[0].rfind(&marker).expect("field present") + marker.len();
    lines[0][start..].trim_end_matches('}').to_string()
}

// ============================================================================
// Level Gate Tests
// ============================================================================

proptest! {
    /// A record is written exactly when its level is at or above the logger's
    #[test]
    fn test_level_gate(logger_level in any::<i8>(), record_level in any::<i8>()) {
        let buffer = MemoryAppender::new();
        let logger = quiet_logger(LogLevel(logger_level), &buffer);

        logger.string("k", "v").log(LogLevel(record_level), "gated");

        prop_assert_eq!(!buffer.is_empty(), record_level >= logger_level);
    }

    /// Level ordering follows the numeric value
    #[test]
    fn test_log_level_ordering(a in any::<i8>(), b in any::<i8>()) {
        prop_assert_eq!(LogLevel(a) <= LogLevel(b), a <= b);
        prop_assert_eq!(LogLevel(a) < LogLevel(b), a < b);
    }

    /// Rendered level names parse back to the same level
    #[test]
    fn test_level_name_roundtrip(level in -8_i8..=127) {
        let name = LevelNames::default().name(LogLevel(level));
        let parsed: LogLevel = name.parse().unwrap();
        prop_assert_eq!(parsed, LogLevel(level));
    }
}

// ============================================================================
// Field Encoding Tests
// ============================================================================

proptest! {
    #[test]
    fn test_int64_roundtrip(v in any::<i64>()) {
        let buffer = MemoryAppender::new();
        quiet_logger(LogLevel::DEBUG, &buffer).int64("v", v).debug("m");
        prop_assert_eq!(single_record(&buffer)["v"].as_i64(), Some(v));
    }

    #[test]
    fn test_uint64_roundtrip(v in any::<u64>()) {
        let buffer = MemoryAppender::new();
        quiet_logger(LogLevel::DEBUG, &buffer).uint64("v", v).debug("m");
        prop_assert_eq!(single_record(&buffer)["v"].as_u64(), Some(v));
    }

    /// Finite floats are written in a form that parses back to the same bits
    #[test]
    fn test_float64_roundtrip(v in finite_f64()) {
        let buffer = MemoryAppender::new();
        quiet_logger(LogLevel::DEBUG, &buffer).float64("v", v).debug("m");
        let parsed: f64 = raw_field(&buffer, "v").parse().unwrap();
        prop_assert_eq!(parsed.to_bits(), v.to_bits());
    }

    #[test]
    fn test_float32_roundtrip(v in finite_f32()) {
        let buffer = MemoryAppender::new();
        quiet_logger(LogLevel::DEBUG, &buffer).float32("v", v).debug("m");
        let parsed: f32 = raw_field(&buffer, "v").parse().unwrap();
        prop_assert_eq!(parsed.to_bits(), v.to_bits());
    }

    /// Any string, control characters included, survives as a single line
    #[test]
    fn test_string_roundtrip(key in "\\PC{0,16}", value in any::<String>()) {
        let buffer = MemoryAppender::new();
        quiet_logger(LogLevel::DEBUG, &buffer)
            .string(key.clone(), value.clone())
            .debug(&value);

        let record = single_record(&buffer);
        prop_assert_eq!(record["message"].as_str(), Some(value.as_str()));
        if key != "severity" && key != "message" {
            prop_assert_eq!(record[key.as_str()].as_str(), Some(value.as_str()));
        }
    }

    /// Invalid UTF-8 never breaks the record
    #[test]
    fn test_bytes_are_valid_json(value in proptest::collection::vec(any::<u8>(), 0..64)) {
        let buffer = MemoryAppender::new();
        quiet_logger(LogLevel::DEBUG, &buffer).bytes("b", &value).debug("m");
        let record = single_record(&buffer);
        let expected = String::from_utf8_lossy(&value);
        prop_assert_eq!(
            record["b"].as_str(),
            Some(expected.as_ref())
        );
    }
}

// ============================================================================
// Key Omission Tests
// ============================================================================

proptest! {
    /// Empty header keys are left out, configured ones are present in order
    #[test]
    fn test_key_omission(
        level_on in any::<bool>(),
        timestamp_on in any::<bool>(),
        caller_on in any::<bool>(),
        message_on in any::<bool>(),
    ) {
        let pick = |on: bool, key: &'static str| if on { key } else { "" };
        let buffer = MemoryAppender::new();
        let logger = Logger::builder(LogLevel::DEBUG, buffer.clone())
            .level_key(pick(level_on, "severity"))
            .timestamp_key(pick(timestamp_on, "timestamp"))
            .caller_key(pick(caller_on, "caller"))
            .message_key(pick(message_on, "message"))
            .build();

        logger.info("m");

        let line = buffer.lines().remove(0);
        let record: Value = serde_json::from_str(&line).unwrap();
        let expected: Vec<&str> = [
            (level_on, "severity"),
            (timestamp_on, "timestamp"),
            (caller_on, "caller"),
            (message_on, "message"),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .map(|(_, key)| *key)
        .collect();

        prop_assert_eq!(record.as_object().unwrap().len(), expected.len());
        let mut last = 0;
        for key in expected {
            let at = line.find(&format!("\"{}\":", key));
            prop_assert!(at.is_some());
            let at = at.unwrap();
            prop_assert!(at >= last);
            last = at;
        }
    }
}
