//! Static form metadata for item fields.
//!
//! Consumers render inputs from this table rather than from runtime schema
//! introspection.

use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    Select,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// `false` for fields fixed at creation (edit forms must not offer them).
    pub updatable: bool,
    #[serde(skip_serializing_if = "no_options")]
    pub options: &'static [&'static str],
}

fn no_options(options: &&[&str]) -> bool {
    options.is_empty()
}

pub const FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        kind: FieldKind::Text,
        updatable: false,
        options: &[],
    },
    FieldSpec {
        name: "description",
        kind: FieldKind::Text,
        updatable: true,
        options: &[],
    },
    FieldSpec {
        name: "drawing",
        kind: FieldKind::Text,
        updatable: true,
        options: &[],
    },
    FieldSpec {
        name: "quantity",
        kind: FieldKind::Number,
        updatable: true,
        options: &[],
    },
    FieldSpec {
        name: "status",
        kind: FieldKind::Select,
        updatable: true,
        options: &["Active", "Unavailable", "Slow"],
    },
];

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FIELD_SPECS.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemStatus;

    #[test]
    fn only_name_is_fixed() {
        let fixed: Vec<_> = FIELD_SPECS.iter().filter(|f| !f.updatable).map(|f| f.name).collect();
        assert_eq!(fixed, vec!["name"]);
    }

    #[test]
    fn status_options_match_enum() {
        let spec = field_spec("status").unwrap();
        let expected: Vec<_> = ItemStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(spec.options.to_vec(), expected);
    }

    #[test]
    fn serializes_kind_as_type() {
        let json = serde_json::to_value(field_spec("quantity").unwrap()).unwrap();
        assert_eq!(json["type"], "number");
        assert!(json.get("options").is_none());
    }
}
