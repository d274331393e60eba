#![allow(unused)]
//! Command-line pipeline harness.
//!
//! # What this covers
//!
//! - **End to end**: JSON input → session → highlighted lines, through
//!   [`combomatch::run`], the same function `main` calls.
//! - **Overrides**: command-line values replace config values.
//! - **Empty text**: a collapsed list prints the configured message.
//! - **Short queries**: leave the list unfiltered and unhighlighted.
//!
//! # Running
//!
//! ```sh
//! cargo test --test cli_harness
//! ```

mod common;
use combomatch::core::{Config, ListState, MatchMode, MatchPolicy};
use combomatch::{run, Overrides, RunOptions};
use common::*;
use pretty_assertions::assert_eq;

fn run_to_string(config: &Config, opts: &RunOptions, input: &str) -> (ListState, String) {
    let mut out = Vec::new();
    let state = run(config, opts, input, &mut out).expect("run succeeds");
    (state, String::from_utf8(out).expect("utf-8 output"))
}

fn markup(query: &str) -> RunOptions {
    RunOptions {
        query: query.to_string(),
        markup: true,
        count_only: false,
    }
}

fn plain_config() -> Config {
    let mut cfg = Config::defaults();
    cfg.highlight.open = "[".into();
    cfg.highlight.close = "]".into();
    cfg
}

#[test]
fn jsonl_in_highlighted_lines_out() {
    let (state, out) = run_to_string(&plain_config(), &markup("portland"), &airports_jsonl());
    assert_eq!(state, ListState::Expanded(2));
    insta::assert_snapshot!(out, @r"
    [Portland], ME
    [Portland], OR
    ");
}

#[test]
fn json_array_input() {
    let input = r#"[{"name":"Albany, NY"},{"name":"Albany, OR"}]"#;
    let (_, out) = run_to_string(&plain_config(), &markup("albany or"), input);
    assert_eq!(out, "[Albany], [OR]\n");
}

#[test]
fn collapsed_list_prints_empty_text() {
    let (state, out) = run_to_string(&plain_config(), &markup("boise"), &airports_jsonl());
    assert_eq!(state, ListState::Collapsed);
    assert_eq!(out, "No matches found!\n");
}

#[test]
fn count_only() {
    let opts = RunOptions {
        query: "albany".into(),
        markup: false,
        count_only: true,
    };
    let (_, out) = run_to_string(&Config::defaults(), &opts, &airports_jsonl());
    assert_eq!(out, "2\n");
}

#[test]
fn short_query_prints_everything_plain() {
    let (state, out) = run_to_string(&plain_config(), &markup("a"), &airports_jsonl());
    assert_eq!(state, ListState::Unchanged);
    assert_eq!(out.lines().count(), AIRPORTS.len());
    assert!(!out.contains('['));
}

#[test]
fn ansi_marker_without_markup() {
    let opts = RunOptions {
        query: "akron".into(),
        markup: false,
        count_only: false,
    };
    let (_, out) = run_to_string(&Config::defaults(), &opts, &airports_jsonl());
    assert_eq!(out, "\x1b[1;7mAkron\x1b[0m, OH\n");
}

#[test]
fn overrides_replace_config_values() {
    let mut cfg = plain_config();
    Overrides {
        display_field: Some("code".into()),
        match_fields: vec!["name".into()],
        or: true,
        anchored: false,
        case_sensitive: true,
        min_chars: Some(3),
    }
    .apply(&mut cfg);

    assert_eq!(cfg.filter.display_field, "code");
    assert_eq!(cfg.filter.match_fields, vec!["name"]);
    assert_eq!(cfg.filter.policy, MatchPolicy::Or);
    assert_eq!(cfg.filter.mode, MatchMode::Substring);
    assert!(cfg.filter.case_sensitive);
    assert_eq!(cfg.list.min_chars, 3);

    // code display, name also matched, case-sensitive OR
    let (_, out) = run_to_string(&cfg, &markup("PDX Akron"), &airports_jsonl());
    assert_eq!(out, "CAK\n[PDX]\n");
}

#[test]
fn anchored_override() {
    let mut cfg = plain_config();
    Overrides {
        anchored: true,
        ..Overrides::default()
    }
    .apply(&mut cfg);
    let (_, out) = run_to_string(&cfg, &markup("new york"), &airports_jsonl());
    assert_eq!(out, "[New] [York], NY (JFK)\n");
}

#[test]
fn bad_input_is_an_error() {
    let mut out = Vec::new();
    let err = run(&Config::defaults(), &markup("alb"), "{not json}\n", &mut out).unwrap_err();
    assert!(err.to_string().contains("line 1"), "{err}");
}

#[test]
fn empty_display_field_override_is_rejected() {
    let mut cfg = Config::defaults();
    Overrides {
        display_field: Some(String::new()),
        ..Overrides::default()
    }
    .apply(&mut cfg);
    let mut out = Vec::new();
    assert!(run(&cfg, &markup("alb"), &airports_jsonl(), &mut out).is_err());
}
