//! Feedback filed by players, and operator replies to it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    DeleteSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement, ListShape, OnFetchError,
    Resource, ResourceDescriptor, UpdateSpec,
};
use crate::validate;

/// Longest reply the server stores.
pub const MAX_REPLY: usize = 1000;

/// Category summary embedded in a feedback record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFeedback {
    pub id: i64,
    pub category_id: i64,
    pub content: String,
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub feedback_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_time: Option<String>,
    #[serde(default)]
    pub is_replied: bool,
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
}

/// A reply, optionally recategorizing or correcting the feedback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerFeedbackDraft {
    pub reply: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

const FILTERS: &[FilterSpec] = &[
    FilterSpec::server("categoryId", FilterKind::Number),
    FilterSpec::server("content", FilterKind::Text),
    FilterSpec::server("isReplied", FilterKind::Bool),
    FilterSpec::server("userId", FilterKind::Number),
];

#[derive(Debug, Clone, Copy)]
pub struct PlayerFeedbacks;

impl Resource for PlayerFeedbacks {
    type Id = i64;
    type Record = PlayerFeedback;
    type Draft = PlayerFeedbackDraft;
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "feedbacks",
        path: "/feedbacks",
        id_field: "id",
        list: ListShape::Paged { items_key: "list" },
        page_size_param: "limit",
        default_page_size: 10,
        get: None,
        create: None,
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

    fn id(record: &PlayerFeedback) -> i64 {
        record.id
    }

    fn default_draft() -> PlayerFeedbackDraft {
        PlayerFeedbackDraft::default()
    }

    fn draft_from(record: &PlayerFeedback) -> PlayerFeedbackDraft {
        PlayerFeedbackDraft {
            reply: record.reply.clone().unwrap_or_default(),
            content: Some(record.content.clone()),
            category_id: Some(record.category_id),
        }
    }

    fn validate(draft: &PlayerFeedbackDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "reply", &draft.reply, 1, MAX_REPLY);
        if draft.content.as_deref().is_some_and(|c| c.trim().is_empty()) {
            errors.add("content", "must not be blank");
        }
        errors.into_result()
    }

    fn apply_draft(record: &mut PlayerFeedback, draft: &PlayerFeedbackDraft) {
        record.reply = Some(draft.reply.clone()).filter(|r| !r.is_empty());
        if let Some(content) = &draft.content {
            record.content = content.clone();
        }
        if let Some(category_id) = draft.category_id {
            record.category_id = category_id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{FilterValue, Operation, QueryState};
    use serde_json::json;

    fn feedback() -> PlayerFeedback {
        serde_json::from_value(json!({
            "id": 4,
            "categoryId": 2,
            "content": "Cannot claim the daily reward",
            "reply": null,
            "feedbackTime": "2026-10-01 08:00:00",
            "isReplied": false,
            "userId": 1001,
            "category": {"id": 2, "name": "Rewards", "isEnabled": true}
        }))
        .unwrap()
    }

    #[test]
    fn reply_is_required_and_bounded() {
        let mut draft = PlayerFeedbacks::draft_from(&feedback());
        let errors = PlayerFeedbacks::validate(&draft, FormMode::Edit).unwrap_err();
        assert_eq!(errors.field("reply"), Some("is required"));

        draft.reply = "x".repeat(MAX_REPLY + 1);
        assert!(PlayerFeedbacks::validate(&draft, FormMode::Edit).is_err());

        draft.reply = "Fixed in the next patch".into();
        assert!(PlayerFeedbacks::validate(&draft, FormMode::Edit).is_ok());
    }

    #[test]
    fn unreplied_feedback_round_trips_through_its_draft() {
        let original = feedback();
        let mut record = original.clone();
        PlayerFeedbacks::apply_draft(&mut record, &PlayerFeedbacks::draft_from(&original));
        assert_eq!(record, original);
    }

    #[test]
    fn replied_filter_goes_to_the_server() {
        let d = &PlayerFeedbacks::DESCRIPTOR;
        let mut q = QueryState::new(d);
        q.set_filter(d, "isReplied", FilterValue::Bool(false)).unwrap();
        let params = q.server_params(d);
        assert!(params.contains(&("isReplied".to_string(), "false".to_string())));
        assert!(params.contains(&("limit".to_string(), "10".to_string())));
        assert!(!d.supports(Operation::Create));
    }
}
