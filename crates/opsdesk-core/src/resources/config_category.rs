//! Groupings for game configuration entries.

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, DeleteSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement,
    InsertPosition, ListShape, OnFetchError, Resource, ResourceDescriptor, UpdateSpec,
};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCategory {
    pub id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCategoryDraft {
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i64,
}

/// Entry of the category dropdown used by config forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub sort_order: i64,
}

const FILTERS: &[FilterSpec] = &[FilterSpec::server("name", FilterKind::Text)];

#[derive(Debug, Clone, Copy)]
pub struct ConfigCategories;

impl Resource for ConfigCategories {
    type Id = i64;
    type Record = ConfigCategory;
    type Draft = ConfigCategoryDraft;
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "config-categories",
        path: "/game-configs/category",
        id_field: "id",
        list: ListShape::Paged { items_key: "list" },
        page_size_param: "pageSize",
        default_page_size: 10,
        get: None,
        create: Some(CreateSpec {
            path: None,
            codes: &[200, 201],
            position: InsertPosition::Append,
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

    fn id(record: &ConfigCategory) -> i64 {
        record.id
    }

    fn default_draft() -> ConfigCategoryDraft {
        ConfigCategoryDraft::default()
    }

    fn draft_from(record: &ConfigCategory) -> ConfigCategoryDraft {
        ConfigCategoryDraft {
            name: record.name.clone(),
            display_name: record.display_name.clone(),
            description: record.description.clone(),
            sort_order: record.sort_order,
        }
    }

    fn validate(draft: &ConfigCategoryDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "name", &draft.name, 1, 50);
        validate::text(&mut errors, "displayName", &draft.display_name, 1, 50);
        validate::max_len(&mut errors, "description", draft.description.as_deref(), 200);
        if draft.sort_order < 0 {
            errors.add("sortOrder", "must not be negative");
        }
        errors.into_result()
    }

    fn apply_draft(record: &mut ConfigCategory, draft: &ConfigCategoryDraft) {
        record.name = draft.name.clone();
        record.display_name = draft.display_name.clone();
        record.description = draft.description.clone();
        record.sort_order = draft.sort_order;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_required() {
        let draft = ConfigCategoryDraft {
            name: "battle".into(),
            ..Default::default()
        };
        let errors = ConfigCategories::validate(&draft, FormMode::Create).unwrap_err();
        assert_eq!(errors.field("displayName"), Some("is required"));
    }
}
