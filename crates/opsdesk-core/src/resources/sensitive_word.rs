//! Sensitive-word dictionary, detection reports, and the detection log.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, DeleteSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement,
    InsertPosition, ListShape, OnFetchError, Resource, ResourceDescriptor, UpdateSpec,
};
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordType {
    Political,
    Violent,
    Pornographic,
    Advertising,
    Abuse,
    Cheat,
    Other,
}

/// Severity, `1` (low) to `3` (high).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WordLevel {
    Low,
    Medium,
    High,
}

impl TryFrom<u8> for WordLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(WordLevel::Low),
            2 => Ok(WordLevel::Medium),
            3 => Ok(WordLevel::High),
            other => Err(format!("unknown level {}", other)),
        }
    }
}

impl From<WordLevel> for u8 {
    fn from(level: WordLevel) -> Self {
        match level {
            WordLevel::Low => 1,
            WordLevel::Medium => 2,
            WordLevel::High => 3,
        }
    }
}

/// What the chat filter does on a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordAction {
    Replace,
    Reject,
    Warn,
}

impl fmt::Display for WordAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WordAction::Replace => "replace",
            WordAction::Reject => "reject",
            WordAction::Warn => "warn",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitiveWord {
    pub id: i64,
    pub word: String,
    #[serde(rename = "type")]
    pub word_type: WordType,
    pub level: WordLevel,
    pub action: WordAction,
    #[serde(default)]
    pub replacement: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitiveWordDraft {
    pub word: String,
    #[serde(rename = "type")]
    pub word_type: WordType,
    pub level: WordLevel,
    pub action: WordAction,
    pub replacement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
}

/// One dictionary hit in a detection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedWord {
    pub word: String,
    #[serde(rename = "type")]
    pub word_type: WordType,
    pub level: WordLevel,
    pub action: WordAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub has_sensitive_word: bool,
    #[serde(default)]
    pub matched_words: Vec<MatchedWord>,
    #[serde(default)]
    pub max_level: u8,
    #[serde(default)]
    pub should_reject: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResult {
    pub filtered_text: String,
    #[serde(default)]
    pub has_replaced: bool,
    #[serde(default)]
    pub replace_count: u32,
}

/// Result of running sample text through the server's filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionReport {
    pub original_text: String,
    pub detection: Detection,
    pub filter_result: FilterResult,
}

/// Outcome counts of a batch import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub failed: u64,
    /// Words already in the dictionary.
    #[serde(default)]
    pub duplicate: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStatistics {
    pub total_words: u64,
    pub enabled_words: u64,
    pub disabled_words: u64,
    pub total_logs: u64,
    pub recent_logs: u64,
}

/// One message the chat filter acted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensitiveWordLog {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(default)]
    pub filtered_content: Option<String>,
    /// Comma-separated as stored by the server.
    #[serde(default)]
    pub matched_words: String,
    #[serde(default)]
    pub action_taken: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub created_at: String,
}

const FILTERS: &[FilterSpec] = &[
    FilterSpec::server(
        "type",
        FilterKind::Choice(&[
            "political",
            "violent",
            "pornographic",
            "advertising",
            "abuse",
            "cheat",
            "other",
        ]),
    ),
    FilterSpec::server("level", FilterKind::Choice(&["1", "2", "3"])),
    FilterSpec::server("enabled", FilterKind::Bool),
    FilterSpec::server("keyword", FilterKind::Text),
];

#[derive(Debug, Clone, Copy)]
pub struct SensitiveWords;

impl Resource for SensitiveWords {
    type Id = i64;
    type Record = SensitiveWord;
    type Draft = SensitiveWordDraft;
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "sensitive-words",
        path: "/sensitive-words",
        id_field: "id",
        list: ListShape::Paged { items_key: "items" },
        page_size_param: "pageSize",
        default_page_size: 20,
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

    fn id(record: &SensitiveWord) -> i64 {
        record.id
    }

    fn default_draft() -> SensitiveWordDraft {
        SensitiveWordDraft {
            word: String::new(),
            word_type: WordType::Abuse,
            level: WordLevel::Medium,
            action: WordAction::Replace,
            replacement: "***".to_string(),
            description: None,
            enabled: true,
        }
    }

    fn draft_from(record: &SensitiveWord) -> SensitiveWordDraft {
        SensitiveWordDraft {
            word: record.word.clone(),
            word_type: record.word_type,
            level: record.level,
            action: record.action,
            replacement: record.replacement.clone(),
            description: record.description.clone(),
            enabled: record.enabled,
        }
    }

    fn validate(draft: &SensitiveWordDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "word", &draft.word, 1, 50);
        if draft.action == WordAction::Replace {
            validate::text(&mut errors, "replacement", &draft.replacement, 1, 50);
        }
        validate::max_len(&mut errors, "description", draft.description.as_deref(), 200);
        errors.into_result()
    }

    fn apply_draft(record: &mut SensitiveWord, draft: &SensitiveWordDraft) {
        record.word = draft.word.clone();
        record.word_type = draft.word_type;
        record.level = draft.level;
        record.action = draft.action;
        record.replacement = draft.replacement.clone();
        record.description = draft.description.clone();
        record.enabled = draft.enabled;
    }
}

const LOG_FILTERS: &[FilterSpec] = &[
    FilterSpec::server("userId", FilterKind::Number),
    FilterSpec::server("source", FilterKind::Text),
    FilterSpec::server("startTime", FilterKind::Text),
    FilterSpec::server("endTime", FilterKind::Text),
];

/// The detection log. Read-only.
#[derive(Debug, Clone, Copy)]
pub struct SensitiveWordLogs;

impl Resource for SensitiveWordLogs {
    type Id = i64;
    type Record = SensitiveWordLog;
    type Draft = ();
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "word-logs",
        path: "/sensitive-words/logs",
        id_field: "id",
        list: ListShape::Paged { items_key: "items" },
        page_size_param: "pageSize",
        default_page_size: 20,
        get: None,
        create: None,
        update: None,
        delete: None,
        status: None,
        filters: LOG_FILTERS,
        permission_gated: false,
        on_fetch_error: OnFetchError::KeepLast,
    };

    fn id(record: &SensitiveWordLog) -> i64 {
        record.id
    }

    fn default_draft() {}

    fn draft_from(_record: &SensitiveWordLog) {}

    fn validate(_draft: &(), _mode: FormMode) -> Result<(), ValidationErrors> {
        Ok(())
    }

    fn apply_draft(_record: &mut SensitiveWordLog, _draft: &()) {}
}

/// Validate every draft of a batch import, keyed by position.
///
/// Returns the index and errors of the first invalid draft.
pub fn validate_batch(drafts: &[SensitiveWordDraft]) -> Result<(), (usize, ValidationErrors)> {
    drafts.iter().enumerate().try_for_each(|(i, draft)| {
        SensitiveWords::validate(draft, FormMode::Create).map_err(|errors| (i, errors))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replace_action_needs_replacement() {
        let mut draft = SensitiveWords::default_draft();
        draft.word = "cheater".into();
        assert!(SensitiveWords::validate(&draft, FormMode::Create).is_ok());

        draft.replacement.clear();
        let errors = SensitiveWords::validate(&draft, FormMode::Create).unwrap_err();
        assert_eq!(errors.field("replacement"), Some("is required"));

        draft.action = WordAction::Reject;
        assert!(SensitiveWords::validate(&draft, FormMode::Create).is_ok());
    }

    #[test]
    fn level_is_numeric_on_the_wire() {
        let draft = SensitiveWords::default_draft();
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["level"], 2);
        assert_eq!(body["type"], "abuse");
        assert!(serde_json::from_value::<WordLevel>(json!(4)).is_err());
    }

    #[test]
    fn parses_detection_report() {
        let report: DetectionReport = serde_json::from_value(json!({
            "originalText": "you cheat",
            "detection": {
                "hasSensitiveWord": true,
                "matchedWords": [
                    {"word": "cheat", "type": "cheat", "level": 2, "action": "replace"}
                ],
                "maxLevel": 2,
                "shouldReject": false
            },
            "filterResult": {
                "filteredText": "you ***",
                "hasReplaced": true,
                "replaceCount": 1
            }
        }))
        .unwrap();
        assert!(report.detection.has_sensitive_word);
        assert_eq!(report.detection.matched_words[0].level, WordLevel::Medium);
        assert_eq!(report.filter_result.filtered_text, "you ***");
    }

    #[test]
    fn batch_validation_names_the_first_bad_word() {
        let mut good = SensitiveWords::default_draft();
        good.word = "scam".into();
        let bad = SensitiveWords::default_draft();

        assert!(validate_batch(&[good.clone()]).is_ok());
        let (index, errors) = validate_batch(&[good.clone(), bad, good]).unwrap_err();
        assert_eq!(index, 1);
        assert_eq!(errors.field("word"), Some("is required"));
    }

    #[test]
    fn parses_log_entries() {
        let log: SensitiveWordLog = serde_json::from_value(json!({
            "id": 1,
            "userId": 1001,
            "content": "buy gold here",
            "filteredContent": null,
            "matchedWords": "buy gold",
            "actionTaken": "reject",
            "source": "chat",
            "platform": "ios",
            "createdAt": "2026-10-18 20:00:00"
        }))
        .unwrap();
        assert_eq!(log.user_id, 1001);
        assert!(log.filtered_content.is_none());
        assert!(SensitiveWordLogs::DESCRIPTOR.filter("startTime").is_some());
    }
}
