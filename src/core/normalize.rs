//! Converts the backend's heterogeneous JSON payloads into the stable
//! records in [`crate::api::models`].
//!
//! The backend is inconsistent about shape: product fields carry Russian
//! labels, the assistant endpoint answers in one of two envelopes picked
//! by a `type` discriminator, and component objects carry arbitrary extra
//! fields per category. Rather than model every variation, the normalizer
//! promotes a fixed allowlist of keys into struct fields and keeps
//! everything else verbatim in a residual `details` map. Normalization
//! never fails: missing keys get defaults, wrong-typed promoted values
//! fall back to zero/empty.
//!
//! The same split/merge pair also serves the local store
//! ([`crate::core::store`]), which writes our own blob with ASCII field
//! names; the two paths differ only in the [`FieldNames`] they pass in.

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::api::models::{AssistantComponent, AssistantReply, ProductRecord};

/// Names of the promoted component fields in one serialization of a
/// component object.
pub struct FieldNames {
    pub id: &'static str,
    pub price: &'static str,
    pub model: &'static str,
    pub category: &'static str,
    pub image: &'static str,
}

/// Key names as the backend sends them.
pub const WIRE_FIELDS: FieldNames = FieldNames {
    id: "id",
    price: "Цена",
    model: "Модель",
    category: "category",
    image: "Изображение",
};

/// Key names in the locally persisted blob. ASCII because the blob is
/// our own format, not the backend's.
pub const STORE_FIELDS: FieldNames = FieldNames {
    id: "id",
    price: "price",
    model: "model",
    category: "category",
    image: "image",
};

const PRODUCT_PRICE: &str = "Цена";
const PRODUCT_MODEL: &str = "Модель";
const PRODUCT_IMAGE: &str = "Изображение";

const MODEL_FALLBACK: &str = "Unknown Model";

/// String form of a JSON value for the residual map: strings keep their
/// literal text, every other value uses its JSON text.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn normalize_product_list(raw: &[Value]) -> Vec<ProductRecord> {
    raw.iter().map(normalize_product).collect()
}

fn normalize_product(raw: &Value) -> ProductRecord {
    let empty = Map::new();
    let object = raw.as_object().unwrap_or(&empty);

    let mut details = HashMap::new();
    for (key, value) in object {
        if key != PRODUCT_PRICE && key != PRODUCT_MODEL && key != PRODUCT_IMAGE {
            details.insert(key.clone(), value_text(value));
        }
    }

    ProductRecord {
        price: object.get(PRODUCT_PRICE).and_then(Value::as_i64).unwrap_or(0),
        model: object
            .get(PRODUCT_MODEL)
            .and_then(Value::as_str)
            .unwrap_or(MODEL_FALLBACK)
            .to_string(),
        image_url: object
            .get(PRODUCT_IMAGE)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        details,
    }
}

/// Dispatches on the `type` discriminator. Unknown or missing
/// discriminators parse to an empty reply rather than an error; the
/// discriminator itself is preserved in `kind` so callers can tell which
/// envelope they got.
pub fn normalize_assistant_reply(raw: &Value) -> AssistantReply {
    let kind = raw
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut price = None;
    let mut comment = String::new();
    let mut components = Vec::new();

    match kind.as_str() {
        // Flat envelope: totals and components at the top level.
        "pc_build_ready" => {
            price = raw.get("total_price").and_then(Value::as_i64);
            if let Some(text) = raw.get("comment").and_then(Value::as_str) {
                comment = text.to_string();
            }
            if let Some(items) = raw.get("components").and_then(Value::as_array) {
                components = items
                    .iter()
                    .map(|item| split_component(item, &WIRE_FIELDS))
                    .collect();
            }
        }
        // Nested envelope: the summary line doubles as the comment.
        "search_result" => {
            if let Some(text) = raw.pointer("/content/title").and_then(Value::as_str) {
                comment = text.to_string();
            }
            if let Some(items) = raw.pointer("/content/items").and_then(Value::as_array) {
                components = items
                    .iter()
                    .map(|item| split_component(item, &WIRE_FIELDS))
                    .collect();
            }
        }
        _ => {}
    }

    AssistantReply {
        price,
        kind,
        comment,
        components,
    }
}

/// Splits one component object into promoted fields plus the residual
/// `details` map. Null values are dropped entirely; every non-promoted
/// key survives verbatim with its value's string form.
pub fn split_component(raw: &Value, fields: &FieldNames) -> AssistantComponent {
    let empty = Map::new();
    let object = raw.as_object().unwrap_or(&empty);

    let mut component = AssistantComponent::default();
    for (key, value) in object {
        if value.is_null() {
            continue;
        }
        if key == fields.id {
            component.id = value.as_i64().unwrap_or(0);
        } else if key == fields.price {
            component.price = value.as_i64().unwrap_or(0);
        } else if key == fields.model {
            component.model = value_text(value);
        } else if key == fields.category {
            component.category = Some(value_text(value));
        } else if key == fields.image {
            component.image_url = value_text(value);
        } else {
            component.details.insert(key.clone(), value_text(value));
        }
    }
    component
}

/// Inverse of [`split_component`]: promoted fields become direct
/// properties and every `details` entry is re-added as a sibling.
pub fn merge_component(component: &AssistantComponent, fields: &FieldNames) -> Value {
    let mut object = Map::new();
    object.insert(fields.id.to_string(), Value::from(component.id));
    object.insert(fields.price.to_string(), Value::from(component.price));
    object.insert(fields.model.to_string(), Value::from(component.model.clone()));
    let category = match &component.category {
        Some(category) => Value::from(category.clone()),
        None => Value::Null,
    };
    object.insert(fields.category.to_string(), category);
    object.insert(fields.image.to_string(), Value::from(component.image_url.clone()));
    for (key, value) in &component.details {
        object.insert(key.clone(), Value::from(value.clone()));
    }
    Value::Object(object)
}

/// Flattens a reply into the blob the store writes: scalar fields direct,
/// components merged with [`STORE_FIELDS`].
pub fn flatten_reply(reply: &AssistantReply) -> Value {
    let mut object = Map::new();
    let price = match reply.price {
        Some(price) => Value::from(price),
        None => Value::Null,
    };
    object.insert("price".to_string(), price);
    object.insert("kind".to_string(), Value::from(reply.kind.clone()));
    object.insert("comment".to_string(), Value::from(reply.comment.clone()));
    object.insert(
        "components".to_string(),
        Value::Array(
            reply
                .components
                .iter()
                .map(|component| merge_component(component, &STORE_FIELDS))
                .collect(),
        ),
    );
    Value::Object(object)
}

/// Inverse of [`flatten_reply`], with the same tolerance for missing
/// keys as the wire-side normalizer.
pub fn split_stored_reply(raw: &Value) -> AssistantReply {
    AssistantReply {
        price: raw.get("price").and_then(Value::as_i64),
        kind: raw
            .get("kind")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        comment: raw
            .get("comment")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        components: raw
            .get("components")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| split_component(item, &STORE_FIELDS))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_with_all_fields_splits_cleanly() {
        let raw = vec![json!({
            "Цена": 50000,
            "Модель": "Phone X",
            "Изображение": "http://img",
            "Цвет": "black"
        })];

        let records = normalize_product_list(&raw);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.price, 50000);
        assert_eq!(record.model, "Phone X");
        assert_eq!(record.image_url, "http://img");
        assert_eq!(record.details.len(), 1);
        assert_eq!(record.details["Цвет"], "black");
    }

    #[test]
    fn product_missing_promoted_keys_gets_defaults() {
        let raw = vec![json!({"Гарантия": "2 года", "Вес": 1.5})];

        let record = &normalize_product_list(&raw)[0];
        assert_eq!(record.price, 0);
        assert_eq!(record.model, "Unknown Model");
        assert_eq!(record.image_url, "");
        assert_eq!(record.details["Гарантия"], "2 года");
        assert_eq!(record.details["Вес"], "1.5");
    }

    #[test]
    fn product_details_never_contain_promoted_keys() {
        let raw = vec![json!({"Цена": 1, "Модель": "A", "Изображение": "u", "x": 2})];

        let record = &normalize_product_list(&raw)[0];
        for key in ["Цена", "Модель", "Изображение"] {
            assert!(!record.details.contains_key(key));
        }
        assert_eq!(record.details["x"], "2");
    }

    #[test]
    fn build_ready_reply_keeps_totals_and_component_count() {
        let raw = json!({
            "type": "pc_build_ready",
            "total_price": 120000,
            "comment": "Gaming build",
            "components": [
                {"id": 1, "Цена": 30000, "Модель": "CPU-9", "category": "cpu", "Изображение": "http://cpu"},
                {"id": 2, "Цена": 90000, "Модель": "GPU-7", "category": "gpu", "Изображение": "http://gpu"}
            ]
        });

        let reply = normalize_assistant_reply(&raw);
        assert_eq!(reply.kind, "pc_build_ready");
        assert_eq!(reply.price, Some(120000));
        assert_eq!(reply.comment, "Gaming build");
        assert_eq!(reply.components.len(), 2);
        assert_eq!(reply.components[0].model, "CPU-9");
        assert_eq!(reply.components[1].category.as_deref(), Some("gpu"));
    }

    #[test]
    fn build_ready_reply_tolerates_missing_optionals() {
        let reply = normalize_assistant_reply(&json!({"type": "pc_build_ready"}));
        assert_eq!(reply.kind, "pc_build_ready");
        assert_eq!(reply.price, None);
        assert_eq!(reply.comment, "");
        assert!(reply.components.is_empty());
    }

    #[test]
    fn search_result_reply_reads_the_nested_envelope() {
        let raw = json!({
            "type": "search_result",
            "content": {
                "title": "Found 2 items",
                "items": [{"id": 1, "Цена": 100, "Модель": "A"}]
            }
        });

        let reply = normalize_assistant_reply(&raw);
        assert_eq!(reply.kind, "search_result");
        assert_eq!(reply.price, None);
        assert_eq!(reply.comment, "Found 2 items");
        assert_eq!(reply.components.len(), 1);
        let component = &reply.components[0];
        assert_eq!(component.id, 1);
        assert_eq!(component.price, 100);
        assert_eq!(component.model, "A");
        assert_eq!(component.category, None);
        assert_eq!(component.image_url, "");
        assert!(component.details.is_empty());
    }

    #[test]
    fn unknown_discriminator_parses_to_an_empty_reply() {
        let reply = normalize_assistant_reply(&json!({"type": "maintenance", "comment": "x"}));
        assert_eq!(reply.kind, "maintenance");
        assert_eq!(reply.price, None);
        assert_eq!(reply.comment, "");
        assert!(reply.components.is_empty());
    }

    #[test]
    fn missing_discriminator_behaves_like_an_unknown_one() {
        let reply = normalize_assistant_reply(&json!({"comment": "stray"}));
        assert_eq!(reply.kind, "");
        assert!(reply.components.is_empty());
    }

    #[test]
    fn component_split_drops_nulls_and_keeps_everything_else() {
        let raw = json!({
            "id": 5,
            "Цена": 7000,
            "Модель": "RAM-32",
            "category": null,
            "Изображение": "http://ram",
            "Производитель": "Kingston",
            "Ядра": 8,
            "XMP": true,
            "Тайминги": [16, 18, 18]
        });

        let component = split_component(&raw, &WIRE_FIELDS);
        assert_eq!(component.id, 5);
        assert_eq!(component.price, 7000);
        assert_eq!(component.category, None);
        for key in ["id", "Цена", "Модель", "category", "Изображение"] {
            assert!(!component.details.contains_key(key));
        }
        assert_eq!(component.details["Производитель"], "Kingston");
        assert_eq!(component.details["Ядра"], "8");
        assert_eq!(component.details["XMP"], "true");
        assert_eq!(component.details["Тайминги"], "[16,18,18]");
    }

    #[test]
    fn wrong_typed_promoted_fields_fall_back_to_defaults() {
        let raw = json!({"id": "five", "Цена": "дорого", "Модель": 42});

        let component = split_component(&raw, &WIRE_FIELDS);
        assert_eq!(component.id, 0);
        assert_eq!(component.price, 0);
        // Model keeps its string form even when the backend sends a number.
        assert_eq!(component.model, "42");
    }

    #[test]
    fn stored_blob_uses_ascii_names_only() {
        let reply = AssistantReply {
            price: Some(100),
            kind: "pc_build_ready".to_string(),
            comment: "ok".to_string(),
            components: vec![AssistantComponent {
                id: 1,
                price: 100,
                model: "CPU".to_string(),
                category: Some("cpu".to_string()),
                image_url: "http://cpu".to_string(),
                details: HashMap::from([("Ядра".to_string(), "8".to_string())]),
            }],
        };

        let blob = flatten_reply(&reply);
        let component = &blob["components"][0];
        assert_eq!(component["price"], 100);
        assert_eq!(component["image"], "http://cpu");
        assert!(component.get("Цена").is_none());
        // Residual entries sit next to the promoted fields.
        assert_eq!(component["Ядра"], "8");
    }

    #[test]
    fn stored_blob_splits_back_into_the_same_reply() {
        let reply = AssistantReply {
            price: None,
            kind: "search_result".to_string(),
            comment: "Found 1 item".to_string(),
            components: vec![AssistantComponent {
                id: 3,
                price: 2500,
                model: "SSD-1T".to_string(),
                category: None,
                image_url: String::new(),
                details: HashMap::from([
                    ("Объем".to_string(), "1 ТБ".to_string()),
                    ("Интерфейс".to_string(), "NVMe".to_string()),
                ]),
            }],
        };

        let restored = split_stored_reply(&flatten_reply(&reply));
        assert_eq!(restored, reply);
    }
}
