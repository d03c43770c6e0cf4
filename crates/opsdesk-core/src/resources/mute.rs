//! Chat mutes keyed by player id, and the log of mute actions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, DeleteSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement,
    InsertPosition, ListShape, OnFetchError, Resource, ResourceDescriptor,
};
use crate::validate;

/// A muted player as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteRecord {
    pub user_id: String,
    /// Seconds left on the mute.
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub unlock_time: String,
    #[serde(default)]
    pub remaining_time: String,
    /// Only present on the record echoed by a new mute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteDraft {
    pub user_id: String,
    /// `<n><unit>` with unit `s`, `m` or `h`, e.g. `30m`.
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Check a `<n><unit>` mute duration.
pub fn check_duration(value: &str) -> Result<(), String> {
    let value = value.trim();
    let Some(unit) = value.chars().last() else {
        return Err("is required".to_string());
    };
    if !matches!(unit, 's' | 'm' | 'h') {
        return Err("must end in s, m or h".to_string());
    }
    match value[..value.len() - 1].parse::<u32>() {
        Ok(n) if n >= 1 => Ok(()),
        _ => Err("must start with a whole number of at least 1".to_string()),
    }
}

/// Which entries of the mute log to read or clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MuteLogKind {
    Mute,
    Unmute,
    All,
}

impl MuteLogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MuteLogKind::Mute => "mute",
            MuteLogKind::Unmute => "unmute",
            MuteLogKind::All => "all",
        }
    }
}

impl fmt::Display for MuteLogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuteLogEntry {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<i64>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuteLog {
    #[serde(default)]
    pub list: Vec<MuteLogEntry>,
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MuteLogKind>,
}

/// Per-player outcome of a batch unmute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmuteResult {
    pub user_id: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmuteReport {
    #[serde(default)]
    pub results: Vec<UnmuteResult>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub success_count: u64,
}

impl UnmuteReport {
    pub fn failures(&self) -> impl Iterator<Item = &UnmuteResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

const FILTERS: &[FilterSpec] = &[FilterSpec::local("userId", FilterKind::Text, &["userId"])];

#[derive(Debug, Clone, Copy)]
pub struct Mutes;

impl Resource for Mutes {
    type Id = String;
    type Record = MuteRecord;
    type Draft = MuteDraft;
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "mutes",
        path: "/mute/mute-list",
        id_field: "userId",
        list: ListShape::Wrapped { items_key: "list" },
        page_size_param: "pageSize",
        default_page_size: 10,
        get: None,
        create: Some(CreateSpec {
            path: None,
            codes: &[200],
            position: InsertPosition::Prepend,
        }),
        update: None,
        delete: Some(DeleteSpec {
            verb: HttpVerb::Delete,
            path: None,
            id: IdPlacement::Query,
        }),
        status: None,
        filters: FILTERS,
        permission_gated: false,
        on_fetch_error: OnFetchError::KeepLast,
    };

    fn id(record: &MuteRecord) -> String {
        record.user_id.clone()
    }

    fn default_draft() -> MuteDraft {
        MuteDraft {
            user_id: String::new(),
            duration: "10m".to_string(),
            reason: None,
        }
    }

    fn draft_from(record: &MuteRecord) -> MuteDraft {
        MuteDraft {
            user_id: record.user_id.clone(),
            duration: record.duration.clone().unwrap_or_default(),
            reason: None,
        }
    }

    fn validate(draft: &MuteDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "userId", &draft.user_id, 1, 64);
        if let Err(message) = check_duration(&draft.duration) {
            errors.add("duration", message);
        }
        validate::max_len(&mut errors, "reason", draft.reason.as_deref(), 200);
        errors.into_result()
    }

    fn apply_draft(record: &mut MuteRecord, draft: &MuteDraft) {
        record.user_id = draft.user_id.clone();
        record.duration = Some(draft.duration.clone()).filter(|d| !d.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn durations_need_a_count_and_unit() {
        assert!(check_duration("30m").is_ok());
        assert!(check_duration("1h").is_ok());
        assert!(check_duration("45s").is_ok());
        assert_eq!(check_duration("").unwrap_err(), "is required");
        assert!(check_duration("0m").is_err());
        assert!(check_duration("10d").is_err());
        assert!(check_duration("m").is_err());
        assert!(check_duration("-5h").is_err());
    }

    #[test]
    fn draft_validation_reports_each_field() {
        let mut draft = Mutes::default_draft();
        draft.duration = "forever".into();
        let errors = Mutes::validate(&draft, FormMode::Create).unwrap_err();
        assert_eq!(errors.field("userId"), Some("is required"));
        assert!(errors.field("duration").is_some());

        draft.user_id = "player-9".into();
        draft.duration = "2h".into();
        assert!(Mutes::validate(&draft, FormMode::Create).is_ok());
    }

    #[test]
    fn new_mute_echo_lacks_countdown_fields() {
        let record: MuteRecord = serde_json::from_value(json!({
            "userId": "player-9",
            "duration": "2h",
            "unlockTime": "2026-10-19 12:00:00"
        }))
        .unwrap();
        assert_eq!(Mutes::id(&record), "player-9");
        assert_eq!(record.ttl, 0);
        assert!(record.remaining_time.is_empty());
    }

    #[test]
    fn unmute_report_lists_failures() {
        let report: UnmuteReport = serde_json::from_value(json!({
            "results": [
                {"userId": "a", "success": true},
                {"userId": "b", "success": false, "message": "not muted"}
            ],
            "total": 2,
            "successCount": 1
        }))
        .unwrap();
        let failed: Vec<&str> = report.failures().map(|r| r.user_id.as_str()).collect();
        assert_eq!(failed, vec!["b"]);
    }

    #[test]
    fn removal_uses_query_user_id() {
        let d = &Mutes::DESCRIPTOR;
        assert!(d.list.is_whole_set());
        assert_eq!(d.delete.map(|s| s.id), Some(IdPlacement::Query));
        assert!(d.update.is_none());
    }
}
