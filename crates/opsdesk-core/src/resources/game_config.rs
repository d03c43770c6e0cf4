//! Typed key/value game configuration.

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, DeleteSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement,
    InsertPosition, ListShape, OnFetchError, Resource, ResourceDescriptor, UpdateSpec,
};
use crate::validate::{self, ValueType};

/// Category summary embedded in a config record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub id: i64,
    pub key: String,
    pub label: String,
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfigDraft {
    pub key: String,
    pub label: String,
    pub value: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

const FILTERS: &[FilterSpec] = &[
    FilterSpec::server("key", FilterKind::Text),
    FilterSpec::server("label", FilterKind::Text),
    FilterSpec::server("categoryId", FilterKind::Number),
];

#[derive(Debug, Clone, Copy)]
pub struct GameConfigs;

impl Resource for GameConfigs {
    type Id = i64;
    type Record = GameConfig;
    type Draft = GameConfigDraft;
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "game-configs",
        path: "/game-configs/main",
        id_field: "id",
        list: ListShape::Paged { items_key: "list" },
        page_size_param: "pageSize",
        default_page_size: 10,
        get: Some("/game-configs/detail"),
        create: Some(CreateSpec {
            path: None,
            codes: &[200, 201],
            position: InsertPosition::Prepend,
        }),
        update: Some(UpdateSpec {
            verb: HttpVerb::Put,
            id: IdPlacement::Body,
        }),
        delete: Some(DeleteSpec {
            verb: HttpVerb::Delete,
            path: None,
            id: IdPlacement::Body,
        }),
        status: None,
        filters: FILTERS,
        permission_gated: false,
        on_fetch_error: OnFetchError::KeepLast,
    };

    fn id(record: &GameConfig) -> i64 {
        record.id
    }

    fn default_draft() -> GameConfigDraft {
        GameConfigDraft {
            key: String::new(),
            label: String::new(),
            value: String::new(),
            value_type: ValueType::String,
            category_id: None,
            description: None,
        }
    }

    fn draft_from(record: &GameConfig) -> GameConfigDraft {
        GameConfigDraft {
            key: record.key.clone(),
            label: record.label.clone(),
            value: record.value.clone(),
            value_type: record.value_type,
            category_id: record.category_id,
            description: record.description.clone(),
        }
    }

    fn validate(draft: &GameConfigDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "key", &draft.key, 1, 100);
        if draft.key.chars().any(char::is_whitespace) {
            errors.add("key", "must not contain whitespace");
        }
        validate::text(&mut errors, "label", &draft.label, 1, 100);
        validate::required(&mut errors, "categoryId", draft.category_id.as_ref());
        validate::max_len(&mut errors, "description", draft.description.as_deref(), 500);

        if draft.value.trim().is_empty() {
            errors.add("value", "is required");
        } else if let Err(reason) = draft.value_type.check(&draft.value) {
            errors.add("value", reason);
        }

        errors.into_result()
    }

    fn apply_draft(record: &mut GameConfig, draft: &GameConfigDraft) {
        record.key = draft.key.clone();
        record.label = draft.label.clone();
        record.value = draft.value.clone();
        record.value_type = draft.value_type;
        if record.category_id != draft.category_id {
            record.category = None;
        }
        record.category_id = draft.category_id;
        record.description = draft.description.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(value_type: ValueType, value: &str) -> GameConfigDraft {
        GameConfigDraft {
            key: "max_stamina".into(),
            label: "Max stamina".into(),
            value: value.into(),
            value_type,
            category_id: Some(2),
            description: None,
        }
    }

    #[test]
    fn value_checked_against_declared_type() {
        let errors = GameConfigs::validate(&draft(ValueType::Number, "abc"), FormMode::Create)
            .unwrap_err();
        assert_eq!(errors.field("value"), Some("must be a valid number"));
        assert!(GameConfigs::validate(&draft(ValueType::Number, "120"), FormMode::Create).is_ok());
        assert!(
            GameConfigs::validate(&draft(ValueType::Json, "{\"a\":1}"), FormMode::Edit).is_ok()
        );
    }

    #[test]
    fn category_required() {
        let mut d = draft(ValueType::String, "x");
        d.category_id = None;
        let errors = GameConfigs::validate(&d, FormMode::Create).unwrap_err();
        assert_eq!(errors.field("categoryId"), Some("is required"));
    }

    #[test]
    fn type_serializes_under_type_key() {
        let body = serde_json::to_value(draft(ValueType::Boolean, "true")).unwrap();
        assert_eq!(body["type"], "boolean");
        assert_eq!(body["categoryId"], 2);
    }
}
