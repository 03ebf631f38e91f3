//! Field and section descriptors for presentation layers
//!
//! Widgets, labels and inline errors are all keyed by [`FieldPath`], so any
//! front end can be driven from [`layout`] and a [`FormState`] snapshot.

use crate::core::field::{FieldKind, FieldPath, FieldValue, Section};
use crate::form::state::FormState;
use serde::Serialize;
use std::fmt::Write;

pub const FORM_TITLE: &str = "New Booking Entry";
pub const SUBMIT_LABEL: &str = "Create Booking";

/// How one field is shown
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub path: FieldPath,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: &'static str,
    /// Shown but never editable
    pub read_only: bool,
}

/// A titled group of fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSpec {
    pub section: Section,
    pub title: &'static str,
    pub fields: Vec<FieldSpec>,
}

pub fn field_spec(path: FieldPath) -> FieldSpec {
    let (label, placeholder) = match path {
        FieldPath::SenderFullName | FieldPath::ReceiverFullName => ("Full Name", "Enter name"),
        FieldPath::SenderMobileNumber => ("Mobile Number", "Enter 10 digit mobile number"),
        FieldPath::SenderEmail => ("Email (Optional)", "sender@example.com"),
        FieldPath::ReceiverFullAddress => ("Full Address", "Enter address"),
        FieldPath::PackageWeight => ("Weight (kg)", "0.0"),
        FieldPath::PackageRatePerKg => ("Rate per kg (₹)", "0.0"),
        FieldPath::PackageTotalCost => ("Total Cost", ""),
    };

    FieldSpec {
        path,
        label,
        kind: path.kind(),
        required: path.is_required(),
        placeholder,
        read_only: !path.is_editable(),
    }
}

/// Every section with its fields, in display order
pub fn layout() -> Vec<SectionSpec> {
    Section::ALL
        .into_iter()
        .map(|section| SectionSpec {
            section,
            title: section.title(),
            fields: FieldPath::ALL
                .into_iter()
                .filter(|p| p.section() == section)
                .map(field_spec)
                .collect(),
        })
        .collect()
}

/// Total cost as shown to the user: rupee sign, two decimals
pub fn format_total_cost(total: f64) -> String {
    format!("₹{:.2}", total)
}

/// Plain-text rendering of the form with inline errors
pub fn render_text(state: &FormState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", FORM_TITLE);

    for section in layout() {
        let _ = writeln!(out, "\n== {} ==", section.title);
        for field in section.fields {
            let marker = if field.required { " *" } else { "" };
            let value = match (field.path, state.record.get(field.path)) {
                (FieldPath::PackageTotalCost, FieldValue::Number(n)) => format_total_cost(n),
                (_, FieldValue::Number(n)) => n.to_string(),
                (_, FieldValue::Text(s)) if s.is_empty() => format!("<{}>", field.placeholder),
                (_, FieldValue::Text(s)) => s,
            };
            let _ = writeln!(out, "  {}{}: {}", field.label, marker, value);
            if let Some(error) = state.errors.get(field.path) {
                let _ = writeln!(out, "    ! {}", error);
            }
        }
    }

    let _ = writeln!(out, "\n[{}]", SUBMIT_LABEL);
    out
}
