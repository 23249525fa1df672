#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use castwire_cli::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
decode:
  max_decompresed_bytes: 2048 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn out_of_range_cap_is_rejected() {
    let bad = r#"
version: 1
decode:
  max_decompressed_bytes: 16
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn unsupported_version_is_rejected() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "INVALID_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.decode.max_decompressed_bytes, 4 * 1024 * 1024);
    assert!(cfg.decode.sniff_inner_gzip);
    assert!(cfg.output.include_unknown);
}

#[test]
fn ok_full_config() {
    let ok = r#"
version: 1
decode:
  max_decompressed_bytes: 1048576
  sniff_inner_gzip: false
  display: true
output:
  include_unknown: false
  skip_partial: true
  stats_line: true
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.decode.max_decompressed_bytes, 1_048_576);
    assert!(!cfg.decode.sniff_inner_gzip);
    assert!(cfg.decode.display);
    assert!(!cfg.output.include_unknown);
    assert!(cfg.output.skip_partial);
}

#[test]
fn missing_file_is_io_error() {
    let err = config::load_from_file("does/not/exist.yaml").expect_err("must fail");
    assert_eq!(err.code().as_str(), "IO");
}
