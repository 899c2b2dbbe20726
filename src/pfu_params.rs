// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Scale Invariant

/// User Parameter Table
///
/// The single declarative source of truth for the form: sixty parameters in
/// document order, each carrying its XML element name, kind, default, editing
/// step, and unit label. Construction, load, and save all iterate this table;
/// no parameter has bespoke code anywhere else.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::pft_types::{FieldKind, FieldSpec, FieldValue};

/// Element name of the section root all parameters live under
pub const SECTION: &str = "user_parameters";

// ============================================================================
// SECTION 1: Table constructors
// ============================================================================

const fn int(name: &'static str, default: i64, step: f64, unit: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Integer,
        default: FieldValue::Integer(default),
        step,
        unit,
        description: "",
    }
}

const fn real(name: &'static str, default: f64, step: f64, unit: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Real,
        default: FieldValue::Real(default),
        step,
        unit,
        description: "",
    }
}

const fn flag(name: &'static str, default: bool) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Boolean,
        default: FieldValue::Boolean(default),
        step: 0.0, // unused for booleans
        unit: "",
        description: "",
    }
}

// ============================================================================
// SECTION 2: The parameter table (document order)
// ============================================================================

pub static FIELDS: [FieldSpec; 60] = [
    int("random_seed", 0, 1.0, ""),
    real("tumor_radius", 250.0, 10.0, "micron"),
    real("oxygen_uptake_rate", 10.0, 1.0, "1/min"),
    real("oxygen_secretion_rate", 0.0, 0.01, "1/min"),
    real("oxygen_saturation_density", 0.0, 0.01, ""),
    real("NP1_uptake_rate", 0.0, 0.01, "1/min"),
    real("NP1_secretion_rate", 0.0, 0.01, "1/min"),
    real("NP1_saturation_density", 0.0, 0.01, ""),
    real("max_birth_rate", 0.00072, 0.0001, "1/min"),
    real("o2_proliferation_saturation", 38.0, 1.0, "mmHg"),
    real("o2_proliferation_threshold", 5.0, 0.1, "mmHg"),
    real("o2_reference", 38.0, 1.0, "mmHg"),
    real("max_necrosis_rate", 0.0027777777777778, 0.0001, "1/min"),
    real("o2_necrosis_threshold", 5.0, 0.1, "mmHg"),
    real("o2_necrosis_max", 2.5, 0.1, "mmHg"),
    real("apoptosis_rate", 5.316666666666667e-5, 1e-5, "1/min"),
    flag("is_motile", false),
    real("bias", 0.25, 0.01, ""),
    int("gradient_substrate_index", 0, 1.0, ""),
    flag("negative_taxis", false),
    real("speed", 1.1, 0.1, "micron/min"),
    real("persistence_time", 10.0, 1.0, "min"),
    real("max_relative_adhesion_distance", 1.5, 0.1, ""),
    real("adhesion_strength", 0.4, 0.1, ""),
    real("repulsion_strength", 10.0, 1.0, ""),
    int("effect_model", 0, 1.0, ""),
    real("EC_50", 0.5, 0.1, ""),
    real("Hill_power", 2.0, 0.1, ""),
    flag("enable_active_influx", true),
    real("relative_max_internal_concentration", 2.0, 0.1, ""),
    real("internalization_rate", 0.0058, 0.001, "1/min"),
    real("reference_external_concentration", 1.0, 0.1, ""),
    flag("cycle", false),
    flag("apoptosis", true),
    flag("motility", false),
    flag("mechanics", false),
    flag("secretion", false),
    real("treat_max_birth_rate", 0.00018, 1e-5, "1/min"),
    real("treat_o2_proliferation_saturation", 38.0, 1.0, "mmHg"),
    real("treat_o2_proliferation_threshold", 5.0, 0.1, "mmHg"),
    real("treat_o2_reference", 38.0, 1.0, "mmHg"),
    real("treat_max_necrosis_rate", 0.0027777777777778, 0.0001, "1/min"),
    real("treat_o2_necrosis_threshold", 5.0, 0.1, "mmHg"),
    real("treat_o2_necrosis_max", 2.5, 0.1, "mmHg"),
    real("treat_apoptosis_rate", 0.001, 0.0001, "1/min"),
    flag("treat_is_motile", true),
    real("treat_bias", 0.25, 0.01, ""),
    int("treat_gradient_substrate_index", 0, 1.0, ""),
    flag("treat_negative_taxis", false),
    real("treat_speed", 1.1, 0.1, "micron/min"),
    real("treat_persistence_time", 10.0, 1.0, "min"),
    real("treat_max_relative_adhesion_distance", 1.5, 0.1, ""),
    real("treat_adhesion_strength", 0.4, 0.1, ""),
    real("treat_repulsion_strength", 10.0, 1.0, ""),
    real("treat_oxygen_uptake_rate", 10.0, 1.0, "1/min"),
    real("treat_oxygen_secretion_rate", 0.0, 0.01, "1/min"),
    real("treat_oxygen_saturation_density", 0.0, 0.01, ""),
    real("treat_NP1_uptake_rate", 0.0, 0.01, "1/min"),
    real("treat_NP1_secretion_rate", 0.0, 0.01, "1/min"),
    real("treat_NP1_saturation_density", 0.0, 0.01, ""),
];

// ============================================================================
// SECTION 3: Name lookup
// ============================================================================

lazy_static! {
    static ref INDEX: HashMap<&'static str, usize> = {
        let mut map = HashMap::with_capacity(FIELDS.len());
        for (i, spec) in FIELDS.iter().enumerate() {
            map.insert(spec.name, i);
        }
        map
    };
}

/// Table index of a field, or None for unknown names
pub fn field_index(name: &str) -> Option<usize> {
    INDEX.get(name).copied()
}

/// Spec of a field by name
#[allow(dead_code)] // Public API, may be used by future hosts
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    field_index(name).map(|i| &FIELDS[i])
}
