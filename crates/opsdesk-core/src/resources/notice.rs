//! In-game notices.

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, FormMode, HttpVerb, IdPlacement, InsertPosition, ListShape,
    OnFetchError, Resource, ResourceDescriptor, StatusRoute, StatusSpec, UpdateSpec,
};
use crate::validate;

use super::PublishStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Server-assigned string identifier.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(rename = "abstract", default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
    pub status: PublishStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeDraft {
    pub title: String,
    pub subtitle: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy)]
pub struct Notices;

impl Resource for Notices {
    type Id = String;
    type Record = Notice;
    type Draft = NoticeDraft;
    type Status = PublishStatus;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "notices",
        path: "/notice",
        id_field: "id",
        list: ListShape::Paged { items_key: "data" },
        page_size_param: "pageSize",
        default_page_size: 10,
        get: None,
        create: Some(CreateSpec {
            path: None,
            codes: &[200, 201],
            position: InsertPosition::Prepend,
        }),
        update: Some(UpdateSpec {
            verb: HttpVerb::Patch,
            id: IdPlacement::Body,
        }),
        delete: None,
        status: Some(StatusSpec {
            route: StatusRoute::Flag("isStatus"),
            verb: HttpVerb::Patch,
            id: IdPlacement::Body,
            field: "status",
        }),
        filters: &[],
        permission_gated: false,
        on_fetch_error: OnFetchError::KeepLast,
    };

    fn id(record: &Notice) -> String {
        record.id.clone()
    }

    fn default_draft() -> NoticeDraft {
        NoticeDraft::default()
    }

    fn draft_from(record: &Notice) -> NoticeDraft {
        NoticeDraft {
            title: record.title.clone(),
            subtitle: record.subtitle.clone(),
            summary: record.summary.clone(),
            content: record.content.clone(),
        }
    }

    fn validate(draft: &NoticeDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "title", &draft.title, 1, 100);
        validate::max_len(&mut errors, "subtitle", Some(&draft.subtitle), 100);
        validate::text(&mut errors, "abstract", &draft.summary, 1, 300);
        validate::text(&mut errors, "content", &draft.content, 1, 10_000);
        errors.into_result()
    }

    fn apply_draft(record: &mut Notice, draft: &NoticeDraft) {
        record.title = draft.title.clone();
        record.subtitle = draft.subtitle.clone();
        record.summary = draft.summary.clone();
        record.content = draft.content.clone();
    }

    fn set_status(record: &mut Notice, status: &PublishStatus) {
        record.status = *status;
    }
}
