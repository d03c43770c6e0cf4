//! Time-boxed player activities.

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement, InsertPosition,
    ListShape, OnFetchError, Resource, ResourceDescriptor, StatusRoute, StatusSpec, UpdateSpec,
};
use crate::types::Timestamp;
use crate::validate;

use super::PublishStatus;

/// Highest player level an activity can be limited to.
pub const MAX_LEVEL: i64 = 9;

/// Times travel as epoch milliseconds under snake_case keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub intro: String,
    /// Minimum player level.
    pub limit: i64,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    #[serde(default)]
    pub award: String,
    #[serde(default)]
    pub detail: String,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub title: String,
    pub intro: String,
    pub limit: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,
    pub award: String,
    pub detail: String,
}

const FILTERS: &[FilterSpec] = &[
    FilterSpec::local("keyword", FilterKind::Text, &["title", "intro", "award"]),
    FilterSpec::local("status", FilterKind::Choice(&["0", "1"]), &["status"]),
];

#[derive(Debug, Clone, Copy)]
pub struct Activities;

impl Resource for Activities {
    type Id = i64;
    type Record = Activity;
    type Draft = ActivityDraft;
    type Status = PublishStatus;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "activities",
        path: "/activity",
        id_field: "id",
        list: ListShape::Unpaged,
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
            id: IdPlacement::Query,
        }),
        delete: None,
        status: Some(StatusSpec {
            route: StatusRoute::Path("/activity-status"),
            verb: HttpVerb::Patch,
            id: IdPlacement::Query,
            field: "status",
        }),
        filters: FILTERS,
        permission_gated: false,
        on_fetch_error: OnFetchError::Clear,
    };

    fn id(record: &Activity) -> i64 {
        record.id
    }

    fn default_draft() -> ActivityDraft {
        ActivityDraft {
            title: String::new(),
            intro: String::new(),
            limit: 1,
            start_time: None,
            end_time: None,
            award: String::new(),
            detail: String::new(),
        }
    }

    fn draft_from(record: &Activity) -> ActivityDraft {
        ActivityDraft {
            title: record.title.clone(),
            intro: record.intro.clone(),
            limit: record.limit,
            start_time: Some(record.start_time),
            end_time: Some(record.end_time),
            award: record.award.clone(),
            detail: record.detail.clone(),
        }
    }

    fn validate(draft: &ActivityDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "title", &draft.title, 1, 100);
        validate::text(&mut errors, "intro", &draft.intro, 1, 500);
        validate::text(&mut errors, "award", &draft.award, 1, 500);
        validate::text(&mut errors, "detail", &draft.detail, 1, 5000);
        if !(1..=MAX_LEVEL).contains(&draft.limit) {
            errors.add("limit", format!("must be between 1 and {}", MAX_LEVEL));
        }
        validate::time_range(
            &mut errors,
            "start_time",
            draft.start_time,
            "end_time",
            draft.end_time,
        );
        errors.into_result()
    }

    fn apply_draft(record: &mut Activity, draft: &ActivityDraft) {
        record.title = draft.title.clone();
        record.intro = draft.intro.clone();
        record.limit = draft.limit;
        if let Some(start) = draft.start_time {
            record.start_time = start;
        }
        if let Some(end) = draft.end_time {
            record.end_time = end;
        }
        record.award = draft.award.clone();
        record.detail = draft.detail.clone();
    }

    fn set_status(record: &mut Activity, status: &PublishStatus) {
        record.status = *status;
    }
}
