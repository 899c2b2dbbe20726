// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

/// Parameter Form Runtime Types
///
/// This module contains the typed value model shared by the field table,
/// the form state, and the document synchronization code:
/// - FieldKind: the three encodings a parameter element may carry
/// - FieldValue: a live value with parse/render per kind
/// - FieldSpec: static declaration of one parameter (name, kind, default,
///   editing step, display metadata)

use std::fmt;

use crate::pfe_error::FormError;

// ============================================================================
// SECTION 1: Field kinds
// ============================================================================

/// Value encoding of a parameter element's text content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Real,
    Boolean,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // PhysiCell-style type names, also used in config `type` attributes
        let label = match self {
            FieldKind::Integer => "int",
            FieldKind::Real => "double",
            FieldKind::Boolean => "bool",
        };
        f.write_str(label)
    }
}

// ============================================================================
// SECTION 2: Field values
// ============================================================================

/// One live parameter value; runtime variant always matches the FieldSpec kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
    Boolean(bool),
}

impl FieldValue {
    #[allow(dead_code)] // Public API, may be used by future hosts
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Real(_) => FieldKind::Real,
            FieldValue::Boolean(_) => FieldKind::Boolean,
        }
    }

    /// Decode element text per kind.
    ///
    /// Integer: trimmed base-10. Real: trimmed float (accepts exponent
    /// notation). Boolean: case-insensitive comparison against "true";
    /// any other text, including malformed text, decodes to false — the
    /// original tooling never validated booleans and documents in the wild
    /// rely on the lenient rule.
    pub fn parse(kind: FieldKind, field: &'static str, text: &str) -> Result<Self, FormError> {
        let text = text.trim();
        match kind {
            FieldKind::Integer => text
                .parse::<i64>()
                .map(FieldValue::Integer)
                .map_err(|_| FormError::parse(field, kind, text)),
            FieldKind::Real => text
                .parse::<f64>()
                .map(FieldValue::Real)
                .map_err(|_| FormError::parse(field, kind, text)),
            FieldKind::Boolean => Ok(FieldValue::Boolean(text.eq_ignore_ascii_case("true"))),
        }
    }

    /// Render as element text.
    ///
    /// Numbers use the default decimal rendering (250.0 renders as "250").
    /// Booleans render as "True"/"False" — this exact casing is what the
    /// original tooling wrote, and must be preserved so round-tripped
    /// documents stay compatible with it.
    pub fn render(&self) -> String {
        match self {
            FieldValue::Integer(v) => v.to_string(),
            FieldValue::Real(v) => v.to_string(),
            FieldValue::Boolean(true) => "True".to_string(),
            FieldValue::Boolean(false) => "False".to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ============================================================================
// SECTION 3: Field specifications
// ============================================================================

/// Static declaration of one configuration parameter
///
/// `name` doubles as the XML element name under the document's parameter
/// section. `step` is the editing increment for hosts that present spinner
/// controls (ignored for booleans). `unit` and `description` are display-only.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: FieldValue,
    pub step: f64,
    pub unit: &'static str,
    pub description: &'static str,
}
