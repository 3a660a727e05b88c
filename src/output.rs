//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Save
//!
//! ```text
//! Stored
//!     global_page_width = 35
//! Rejected
//!     global_font_size
//! Header image
//!     /public/banner.png (62%)
//! Stylesheet: 41 bytes
//! ```
//!
//! ## List
//!
//! ```text
//! 001 global_page_width = 35 (integer)
//! 002 styles = ":root{--page-width:35em;}" (string)
//! ```
//!
//! ## Catalog
//!
//! ```text
//! Global
//!     global_page_width (enum-integer, default 30)
//!         30, 35, 40
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::{self, Section, ValueKind, ValueType};
use crate::store::StoredSetting;
use crate::theme::SaveOutcome;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn type_name(value_type: ValueType) -> &'static str {
    match value_type {
        ValueType::Boolean => "boolean",
        ValueType::String => "string",
        ValueType::Integer => "integer",
        ValueType::EnumString => "enum-string",
        ValueType::EnumInteger => "enum-integer",
        ValueType::FreeText => "text",
        ValueType::Image => "image",
    }
}

// ============================================================================
// Save
// ============================================================================

pub fn format_save_output(outcome: &SaveOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    let report = &outcome.report;

    if !report.stored.is_empty() {
        lines.push("Stored".to_string());
        for (id, value) in &report.stored {
            lines.push(format!("{}{} = {}", indent(1), id, value));
        }
    }
    if !report.rejected.is_empty() {
        lines.push("Rejected".to_string());
        for id in &report.rejected {
            lines.push(format!("{}{}", indent(1), id));
        }
    }
    if let Some(image) = &outcome.header_image {
        lines.push("Header image".to_string());
        lines.push(format!("{}{} ({}%)", indent(1), image.url, image.width));
    }
    match &outcome.stylesheet {
        Some(css) => lines.push(format!("Stylesheet: {} bytes", css.len())),
        None => lines.push("Stylesheet: none (all defaults)".to_string()),
    }
    lines
}

pub fn print_save_output(outcome: &SaveOutcome) {
    for line in format_save_output(outcome) {
        println!("{}", line);
    }
}

// ============================================================================
// List
// ============================================================================

pub fn format_list_output<'a>(
    entries: impl IntoIterator<Item = (&'a str, &'a StoredSetting)>,
) -> Vec<String> {
    let lines: Vec<String> = entries
        .into_iter()
        .enumerate()
        .map(|(i, (id, setting))| {
            format!(
                "{} {} = {} ({})",
                format_index(i + 1),
                id,
                setting.value,
                setting.declared
            )
        })
        .collect();
    if lines.is_empty() {
        vec!["No stored settings (all defaults)".to_string()]
    } else {
        lines
    }
}

pub fn print_list_output<'a>(entries: impl IntoIterator<Item = (&'a str, &'a StoredSetting)>) {
    for line in format_list_output(entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Catalog
// ============================================================================

fn default_label(kind: &ValueKind) -> String {
    match kind {
        ValueKind::Boolean { default } => default.to_string(),
        ValueKind::Integer { default } | ValueKind::EnumInteger { default, .. } => {
            default.to_string()
        }
        ValueKind::String { default }
        | ValueKind::FreeText { default }
        | ValueKind::EnumString { default, .. } => format!("{:?}", default),
        ValueKind::Image => "none".to_string(),
    }
}

fn choices_line(kind: &ValueKind) -> Option<String> {
    match kind {
        ValueKind::EnumString { choices, .. } => Some(
            choices
                .iter()
                .map(|c| c.value)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        ValueKind::EnumInteger { choices, .. } => Some(
            choices
                .iter()
                .map(|c| c.value.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        _ => None,
    }
}

fn section_title(section: Section) -> &'static str {
    match section {
        Section::Global => "Global",
        Section::Header => "Header",
        Section::Content => "Content",
        Section::Widgets => "Widgets",
        Section::Footer => "Footer",
    }
}

pub fn format_catalog_output() -> Vec<String> {
    let mut lines = Vec::new();
    for section in Section::ALL {
        lines.push(section_title(section).to_string());
        for def in catalog::CATALOG.iter().filter(|d| d.section == section) {
            let derived = if def.derived { ", computed" } else { "" };
            lines.push(format!(
                "{}{} ({}, default {}{})",
                indent(1),
                def.id,
                type_name(def.value_type()),
                default_label(&def.kind),
                derived
            ));
            if let Some(choices) = choices_line(&def.kind) {
                lines.push(format!("{}{}", indent(2), choices));
            }
        }
    }
    lines
}

pub fn print_catalog_output() {
    for line in format_catalog_output() {
        println!("{}", line);
    }
}
