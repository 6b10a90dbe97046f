//! Serialization tests against the shapes the viewer reads

use serde_json::{json, Value};

/// A consolidated person as the viewer expects it
fn person_fixture() -> Value {
    json!({
        "id": "@I4@",
        "names": ["Olena /Koval/"],
        "sex": "f",
        "birth": { "kind": "birth", "date": "12 MAR 1901", "place": "Lviv" },
        "death": null,
        "burials": [],
        "occupations": [],
        "marriages": [],
        "divorces": [],
        "parents": ["@I1@", "@I2_1@"],
        "spouses": [],
        "children": [],
        "media": [],
        "notes": [],
        "ancestors": [{ "id": "@I1@", "generation": 1 }],
        "redirects_to": null,
        "parents_hidden": false,
        "children_hidden": false
    })
}

#[cfg(test)]
mod serialization_tests {
    use super::*;
    use crate::graph::{Ancestor, EventKind, Person, PersonId, Sex};

    #[test]
    fn person_id_serializes_as_string() {
        let id = PersonId::from_string("@I4@");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"@I4@\"");
    }

    #[test]
    fn person_id_deserializes_from_string() {
        let id: PersonId = serde_json::from_str("\"@I4@\"").unwrap();
        assert_eq!(id.as_str(), "@I4@");
    }

    #[test]
    fn sex_serializes_as_single_lowercase_char() {
        assert_eq!(serde_json::to_string(&Sex::Male).unwrap(), "\"m\"");
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"f\"");
        assert_eq!(serde_json::to_string(&Sex::Unknown).unwrap(), "\"u\"");
    }

    #[test]
    fn person_deserializes_from_fixture() {
        let person: Person = serde_json::from_value(person_fixture()).unwrap();
        assert_eq!(person.id.as_str(), "@I4@");
        assert_eq!(person.sex, Sex::Female);
        assert_eq!(person.birth.as_ref().map(|b| b.kind), Some(EventKind::Birth));
        assert_eq!(person.parents.len(), 2);
        assert_eq!(person.ancestors, vec![Ancestor::new("@I1@".into(), 1)]);
        assert!(!person.redirects());
    }

    #[test]
    fn person_roundtrip_preserves_shadow_link() {
        let original = Person::new("@I2@", Sex::Male).with_name("Taras /Koval/");
        let shadow = original.shadow("@I2_1@".into());

        let json = serde_json::to_value(&shadow).unwrap();
        assert_eq!(json["redirects_to"], "@I2@");

        let back: Person = serde_json::from_value(json).unwrap();
        assert_eq!(back, shadow);
    }
}
