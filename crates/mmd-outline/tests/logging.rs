//! Tests for logging functionality
//!
//! Only one global subscriber can be installed per process, so these tests
//! check that initialization never panics rather than what it prints.

use mmd_outline::core::logging::{init_logging, LogFormat, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_log_format_variants() {
    assert_eq!(LogFormat::variants(), &["compact", "pretty", "json"]);
    assert_eq!(LogFormat::default(), LogFormat::Compact);
}

#[test]
fn test_env_variable_names() {
    assert_eq!(LOG_LEVEL_ENV, "MMD_OUTLINE_LOG_LEVEL");
    assert_eq!(LOG_FORMAT_ENV, "MMD_OUTLINE_LOG_FORMAT");
}

#[test]
fn test_init_logging_levels_and_formats() {
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("mmd_outline=trace"), Some("pretty"));
    let _ = init_logging(Some("off"), Some("json"));
    let _ = init_logging(None, None);
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}
