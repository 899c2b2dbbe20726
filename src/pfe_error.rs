// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

/// Parameter Form Errors
///
/// Structured error type for the form core. Every variant names what failed:
/// the missing section or field, the unparseable text, or the byte position
/// of an XML syntax error. Nothing is swallowed; callers can match on the
/// variant to distinguish schema mismatches from malformed values.

use thiserror::Error;

use crate::pft_types::FieldKind;

#[derive(Debug, Error)]
pub enum FormError {
    /// The parameter section root is absent from the document
    #[error("section <{section}> not found in document")]
    MissingSection { section: &'static str },

    /// A named parameter element is absent under the section root,
    /// or an unknown field name was passed to the form API
    #[error("parameter '{field}' not found")]
    MissingField { field: String },

    /// Element text does not decode per the field's declared kind
    #[error("parameter '{field}': cannot parse '{text}' as {kind}")]
    Parse {
        field: String,
        kind: FieldKind,
        text: String,
    },

    /// Malformed XML, reported with the reader's byte position
    #[error("XML error at byte {position}: {message}")]
    Xml { position: u64, message: String },

    /// Config file I/O failure
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FormError {
    pub(crate) fn missing_field(field: &str) -> Self {
        FormError::MissingField {
            field: field.to_string(),
        }
    }

    pub(crate) fn parse(field: &str, kind: FieldKind, text: &str) -> Self {
        FormError::Parse {
            field: field.to_string(),
            kind,
            text: text.to_string(),
        }
    }

    pub(crate) fn xml(position: u64, message: impl ToString) -> Self {
        FormError::Xml {
            position,
            message: message.to_string(),
        }
    }
}
