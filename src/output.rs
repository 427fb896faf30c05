//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! ## Check
//!
//! ```text
//! Config
//!     Source: behavior.toml
//! Language
//!     Default: ar (stored under "lang")
//!     Toggle: ar → "EN", en → "العربية"
//! Scroll
//!     Shadow > 50px, shrink > 10px, scroll-top > 300px
//!     Section offset 100px, header offset 70px, debounce 10ms
//! Reveal (threshold 0.1, margin 0px 0px -50px 0px)
//!     001 .timeline-item translateY(30px) 0.6s, +0.1s each
//! Easter egg
//!     10 keys, 5s
//! ```

use crate::config::BehaviorConfig;
use crate::language::Language;
use crate::reveal::css_seconds;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Summary printed by `check`. `source` is the file the config came from, or
/// `None` when only stock defaults apply.
pub fn format_config_summary(config: &BehaviorConfig, source: Option<&Path>) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Config".to_string());
    match source {
        Some(path) => lines.push(format!("{}Source: {}", indent(1), path.display())),
        None => lines.push(format!("{}Source: stock defaults", indent(1))),
    }

    let lang = &config.language;
    lines.push("Language".to_string());
    lines.push(format!(
        "{}Default: {} (stored under {:?})",
        indent(1),
        lang.default,
        lang.storage_key
    ));
    let toggles: Vec<String> = Language::ALL
        .iter()
        .map(|l| format!("{l} → {:?}", lang.labels.get(l.other())))
        .collect();
    lines.push(format!("{}Toggle: {}", indent(1), toggles.join(", ")));

    let scroll = &config.scroll;
    lines.push("Scroll".to_string());
    lines.push(format!(
        "{}Shadow > {}px, shrink > {}px, scroll-top > {}px",
        indent(1),
        scroll.shadow_threshold,
        scroll.shrink_threshold,
        scroll.scroll_top_threshold
    ));
    lines.push(format!(
        "{}Section offset {}px, header offset {}px, debounce {}ms",
        indent(1),
        scroll.active_link_offset,
        scroll.header_offset,
        scroll.debounce_ms
    ));

    let reveal = &config.reveal;
    lines.push(format!(
        "Reveal (threshold {}, margin {})",
        reveal.threshold, reveal.root_margin
    ));
    if reveal.groups.is_empty() {
        lines.push(format!("{}(no groups)", indent(1)));
    }
    for (i, group) in reveal.groups.iter().enumerate() {
        lines.push(format!(
            "{}{} .{} {} {}, +{} each",
            indent(1),
            format_index(i + 1),
            group.class,
            group.transform,
            css_seconds(group.duration_ms),
            css_seconds(group.stagger_ms)
        ));
    }

    let egg = &config.easter_egg;
    lines.push("Easter egg".to_string());
    lines.push(format!(
        "{}{} keys, {}",
        indent(1),
        egg.sequence.len(),
        css_seconds(egg.duration_ms)
    ));

    if !config.greeting.is_empty() {
        lines.push("Greeting".to_string());
        for line in &config.greeting {
            lines.push(format!("{}{}", indent(1), line));
        }
    }

    lines
}

pub fn print_config_summary(config: &BehaviorConfig, source: Option<&Path>) {
    for line in format_config_summary(config, source) {
        println!("{}", line);
    }
}
