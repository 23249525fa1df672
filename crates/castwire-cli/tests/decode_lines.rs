#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use castwire_cli::config::{self, CliConfig};
use castwire_cli::run::decode_lines;

/// Gzip frame: one chat ("A: hi") and one unregistered method.
const FRAME: &str = concat!(
    "CAkQTSoVCg1jb21wcmVzc190eXBlEgRnemlwMgJwYjoDbXNnQlQfiwgAAAAAAAL/41LlEgpP",
    "TUpOLC5xzkgs8U0tLk5MTxXiFWLn0JJidDRgl2LKyJRg5JLmEoUq860sLkktqoSpZJBgUmi4",
    "MPX/HkMArwkHbksAAAA",
    "=",
);
const FRAME_UNPADDED: &str = concat!(
    "CAkQTSoVCg1jb21wcmVzc190eXBlEgRnemlwMgJwYjoDbXNnQlQfiwgAAAAAAAL/41LlEgpP",
    "TUpOLC5xzkgs8U0tLk5MTxXiFWLn0JJidDRgl2LKyJRg5JLmEoUq860sLkktqoSpZJBgUmi4",
    "MPX/HkMArwkHbksAAAA",
);

fn run(input: &str, cfg: &CliConfig) -> (Vec<serde_json::Value>, castwire_cli::run::RunSummary) {
    let mut out = Vec::new();
    let summary = decode_lines(input.as_bytes(), &mut out, cfg).unwrap();
    let lines = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    (lines, summary)
}

#[test]
fn prints_one_record_per_message() {
    let input = format!("{FRAME}\n\n  {FRAME_UNPADDED}  \n");
    let (lines, summary) = run(&input, &CliConfig::default());

    assert_eq!(summary.lines, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["messageType"], "chat");
    assert_eq!(lines[0]["content"], "hi");
    assert_eq!(lines[0]["timestamp"], "1700000000000");
    assert_eq!(lines[1]["messageType"], "WebcastMysteryMessage");
    assert_eq!(summary.stats.frames, 2);
    assert_eq!(summary.stats.chat, 2);
    assert_eq!(summary.stats.unknown, 2);
}

#[test]
fn bad_lines_are_counted_not_fatal() {
    let input = format!("not-a-frame\n{FRAME}\n");
    let (lines, summary) = run(&input, &CliConfig::default());
    assert_eq!(summary.failed, 1);
    assert_eq!(lines.len(), 2);
}

#[test]
fn output_section_filters_and_appends_stats() {
    let cfg = config::load_from_str(
        r#"
version: 1
decode:
  display: true
output:
  include_unknown: false
  stats_line: true
"#,
    )
    .unwrap();
    let (lines, summary) = run(FRAME, &cfg);
    assert_eq!(summary.records_written, 1);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["display"], "A: hi");
    assert_eq!(lines[1]["messages"], 2);
}
