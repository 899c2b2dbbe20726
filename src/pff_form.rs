// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

/// Parameter Form Core
///
/// Holds the live value for every entry of the parameter table and
/// synchronizes those values with the <user_parameters> section of a
/// configuration document, in both directions. The form owns no display
/// machinery and retains no document reference between calls; hosts drive
/// it load → edit → save.

use crate::pfd_doc::Document;
use crate::pfe_error::FormError;
use crate::pft_types::{FieldSpec, FieldValue};
use crate::pfu_params::{field_index, FIELDS, SECTION};

/// Live values for all sixty parameters, in table order
pub struct ParamForm {
    values: Vec<FieldValue>,
}

impl ParamForm {
    /// Fresh form populated from the table defaults
    pub fn new() -> Self {
        ParamForm {
            values: FIELDS.iter().map(|spec| spec.default).collect(),
        }
    }

    /// Current value of a field, None for unknown names
    #[allow(dead_code)] // Public API, may be used by future hosts
    pub fn get(&self, name: &str) -> Option<FieldValue> {
        field_index(name).map(|i| self.values[i])
    }

    /// Host edit path: decode `text` per the named field's kind and store it
    pub fn set_text(&mut self, name: &str, text: &str) -> Result<(), FormError> {
        let idx = field_index(name).ok_or_else(|| FormError::missing_field(name))?;
        let spec = &FIELDS[idx];
        self.values[idx] = FieldValue::parse(spec.kind, spec.name, text)?;
        Ok(())
    }

    /// Ordered (spec, value) pairs for display hosts
    pub fn rows(&self) -> impl Iterator<Item = (&'static FieldSpec, FieldValue)> + '_ {
        FIELDS.iter().zip(self.values.iter().copied())
    }

    /// Overwrite form values from the document's parameter section.
    ///
    /// Each field's element is located by name anywhere under
    /// <user_parameters> and decoded per its declared kind. Fails with
    /// MissingSection/MissingField/Parse naming the culprit. Not
    /// transactional: fields earlier in table order keep their newly loaded
    /// values when a later field fails.
    pub fn load_from_doc(&mut self, doc: &Document) -> Result<(), FormError> {
        let section = doc
            .root
            .find_descendant(SECTION)
            .ok_or(FormError::MissingSection { section: SECTION })?;

        for (idx, spec) in FIELDS.iter().enumerate() {
            let element = section
                .find_descendant(spec.name)
                .ok_or_else(|| FormError::missing_field(spec.name))?;
            self.values[idx] = FieldValue::parse(spec.kind, spec.name, &element.text())?;
        }
        Ok(())
    }

    /// Write form values back into the document's parameter section.
    ///
    /// Inverse of load: each located element's text content is replaced with
    /// the rendered value. Same location rules and errors. Not transactional:
    /// elements written before a MissingField failure stay written.
    pub fn save_to_doc(&self, doc: &mut Document) -> Result<(), FormError> {
        let section = doc
            .root
            .find_descendant_mut(SECTION)
            .ok_or(FormError::MissingSection { section: SECTION })?;

        for (idx, spec) in FIELDS.iter().enumerate() {
            let element = section
                .find_descendant_mut(spec.name)
                .ok_or_else(|| FormError::missing_field(spec.name))?;
            element.set_text(&self.values[idx].render());
        }
        Ok(())
    }
}

impl Default for ParamForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pfc_config::default_config;
    use crate::pft_types::FieldKind;

    /// Document with every parameter present (the embedded default config)
    fn full_doc() -> Document {
        Document::parse(default_config()).unwrap()
    }

    #[test]
    fn test_construct_yields_table_defaults() {
        let form = ParamForm::new();
        for spec in FIELDS.iter() {
            assert_eq!(form.get(spec.name), Some(spec.default), "field {}", spec.name);
        }
    }

    #[test]
    fn test_load_from_default_document_matches_defaults() {
        let doc = full_doc();
        let mut form = ParamForm::new();
        form.load_from_doc(&doc).unwrap();
        for spec in FIELDS.iter() {
            assert_eq!(form.get(spec.name), Some(spec.default), "field {}", spec.name);
        }
    }

    #[test]
    fn test_load_overwrites_values() {
        let mut doc = full_doc();
        doc.root
            .find_descendant_mut("tumor_radius")
            .unwrap()
            .set_text("400.5");
        doc.root
            .find_descendant_mut("is_motile")
            .unwrap()
            .set_text("TRUE");

        let mut form = ParamForm::new();
        form.load_from_doc(&doc).unwrap();
        assert_eq!(form.get("tumor_radius"), Some(FieldValue::Real(400.5)));
        assert_eq!(form.get("is_motile"), Some(FieldValue::Boolean(true)));
    }

    #[test]
    fn test_missing_section_is_structured_error() {
        let doc = Document::parse("<settings><other/></settings>").unwrap();
        let mut form = ParamForm::new();
        match form.load_from_doc(&doc) {
            Err(FormError::MissingSection { section }) => {
                assert_eq!(section, "user_parameters");
            }
            other => panic!("expected MissingSection, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_missing_field_names_the_field() {
        let mut doc = full_doc();
        // Drop oxygen_uptake_rate from the section
        let section = doc.root.find_descendant_mut(SECTION).unwrap();
        section.children.retain(|node| match node {
            crate::pfd_doc::Node::Element(el) => el.name != "oxygen_uptake_rate",
            _ => true,
        });

        let mut form = ParamForm::new();
        match form.load_from_doc(&doc) {
            Err(FormError::MissingField { field }) => {
                assert_eq!(field, "oxygen_uptake_rate");
            }
            other => panic!("expected MissingField, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_malformed_numeric_names_the_field() {
        let mut doc = full_doc();
        doc.root
            .find_descendant_mut("tumor_radius")
            .unwrap()
            .set_text("abc");

        let mut form = ParamForm::new();
        match form.load_from_doc(&doc) {
            Err(FormError::Parse { field, kind, text }) => {
                assert_eq!(field, "tumor_radius");
                assert_eq!(kind, FieldKind::Real);
                assert_eq!(text, "abc");
            }
            other => panic!("expected Parse, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_save_renders_defaults() {
        let mut doc = full_doc();
        let form = ParamForm::new();
        form.save_to_doc(&mut doc).unwrap();

        assert_eq!(doc.root.find_descendant("random_seed").unwrap().text(), "0");
        assert_eq!(doc.root.find_descendant("tumor_radius").unwrap().text(), "250");
        assert_eq!(doc.root.find_descendant("is_motile").unwrap().text(), "False");
        assert_eq!(doc.root.find_descendant("apoptosis").unwrap().text(), "True");
    }

    #[test]
    fn test_save_preserves_element_attributes() {
        let mut doc = full_doc();
        let form = ParamForm::new();
        form.save_to_doc(&mut doc).unwrap();
        let radius = doc.root.find_descendant("tumor_radius").unwrap();
        assert_eq!(radius.attr("units"), Some("micron"));
    }

    #[test]
    fn test_save_into_sectionless_doc_fails() {
        let mut doc = Document::parse("<settings/>").unwrap();
        let form = ParamForm::new();
        assert!(matches!(
            form.save_to_doc(&mut doc),
            Err(FormError::MissingSection { .. })
        ));
    }

    #[test]
    fn test_round_trip_load_save() {
        // Load a document, save into a fresh copy, reload: values agree
        let mut doc = full_doc();
        doc.root
            .find_descendant_mut("max_birth_rate")
            .unwrap()
            .set_text("0.00072");
        doc.root
            .find_descendant_mut("enable_active_influx")
            .unwrap()
            .set_text("true");

        let mut form = ParamForm::new();
        form.load_from_doc(&doc).unwrap();

        let mut copy = full_doc();
        form.save_to_doc(&mut copy).unwrap();

        let mut reloaded = ParamForm::new();
        reloaded.load_from_doc(&copy).unwrap();
        for spec in FIELDS.iter() {
            assert_eq!(
                reloaded.get(spec.name),
                form.get(spec.name),
                "field {}",
                spec.name
            );
        }
    }

    #[test]
    fn test_set_text_edits() {
        let mut form = ParamForm::new();
        form.set_text("random_seed", "7").unwrap();
        assert_eq!(form.get("random_seed"), Some(FieldValue::Integer(7)));

        form.set_text("cycle", "True").unwrap();
        assert_eq!(form.get("cycle"), Some(FieldValue::Boolean(true)));

        assert!(matches!(
            form.set_text("not_a_field", "1"),
            Err(FormError::MissingField { .. })
        ));
        assert!(matches!(
            form.set_text("random_seed", "seven"),
            Err(FormError::Parse { .. })
        ));
    }

    #[test]
    fn test_rows_follow_table_order() {
        let form = ParamForm::new();
        let rows: Vec<_> = form.rows().collect();
        assert_eq!(rows.len(), FIELDS.len());
        assert_eq!(rows[0].0.name, "random_seed");
        assert_eq!(rows[1].0.name, "tumor_radius");
        assert_eq!(rows[59].0.name, "treat_NP1_saturation_density");
    }
}
