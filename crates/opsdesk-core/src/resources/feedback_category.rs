//! Categories players file feedback under.

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement, InsertPosition,
    ListShape, OnFetchError, Resource, ResourceDescriptor, UpdateSpec,
};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCategory {
    pub id: i64,
    pub name: String,
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackCategoryDraft {
    pub name: String,
    pub is_enabled: bool,
}

const FILTERS: &[FilterSpec] = &[
    FilterSpec::server("name", FilterKind::Text),
    FilterSpec::server("isEnabled", FilterKind::Bool),
];

#[derive(Debug, Clone, Copy)]
pub struct FeedbackCategories;

impl Resource for FeedbackCategories {
    type Id = i64;
    type Record = FeedbackCategory;
    type Draft = FeedbackCategoryDraft;
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "feedback-categories",
        path: "/feedback-categories",
        id_field: "id",
        list: ListShape::Paged { items_key: "list" },
        page_size_param: "limit",
        default_page_size: 10,
        get: None,
        create: Some(CreateSpec {
            path: None,
            codes: &[200, 201],
            position: InsertPosition::Prepend,
        }),
        update: Some(UpdateSpec {
            verb: HttpVerb::Put,
            id: IdPlacement::Body,
        }),
        delete: None,
        status: None,
        filters: FILTERS,
        permission_gated: false,
        on_fetch_error: OnFetchError::KeepLast,
    };

    fn id(record: &FeedbackCategory) -> i64 {
        record.id
    }

    fn default_draft() -> FeedbackCategoryDraft {
        FeedbackCategoryDraft {
            name: String::new(),
            is_enabled: true,
        }
    }

    fn draft_from(record: &FeedbackCategory) -> FeedbackCategoryDraft {
        FeedbackCategoryDraft {
            name: record.name.clone(),
            is_enabled: record.is_enabled,
        }
    }

    fn validate(draft: &FeedbackCategoryDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "name", &draft.name, 1, 50);
        errors.into_result()
    }

    fn apply_draft(record: &mut FeedbackCategory, draft: &FeedbackCategoryDraft) {
        record.name = draft.name.clone();
        record.is_enabled = draft.is_enabled;
    }
}
