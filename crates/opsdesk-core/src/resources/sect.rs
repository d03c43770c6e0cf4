//! Player-run sects (guilds).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationErrors;
use crate::resource::{
    FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement, ListShape, OnFetchError, Resource,
    ResourceDescriptor, StatusRoute, StatusSpec, UpdateSpec,
};
use crate::validate;

use super::PublishStatus;

/// The server flattens the joined level and realm rows into dotted keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sect {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub notice: Option<String>,
    pub level_id: i64,
    #[serde(default)]
    pub prestige: i64,
    #[serde(default)]
    pub spirit_stone: i64,
    #[serde(default)]
    pub member_count: i64,
    /// `None` or `0` admits every realm.
    #[serde(default)]
    pub min_realm_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliverables_json: Option<Value>,
    #[serde(rename = "created_at", default)]
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leader_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishStatus>,
    #[serde(rename = "guildLevel.level", default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(
        rename = "guildLevel.memberCapacity",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub member_capacity: Option<i64>,
    #[serde(rename = "realm.name", default, skip_serializing_if = "Option::is_none")]
    pub realm_name: Option<String>,
}

/// Editable sect fields. `intro`, `notice` and `minRealmId` are always
/// sent so that `null` clears them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectDraft {
    pub name: String,
    #[serde(default)]
    pub intro: Option<String>,
    #[serde(default)]
    pub notice: Option<String>,
    #[serde(default)]
    pub min_realm_id: Option<i64>,
    pub level_id: i64,
    pub prestige: i64,
    pub spirit_stone: i64,
}

const FILTERS: &[FilterSpec] = &[FilterSpec::server("keyword", FilterKind::Text)];

#[derive(Debug, Clone, Copy)]
pub struct Sects;

impl Resource for Sects {
    type Id = i64;
    type Record = Sect;
    type Draft = SectDraft;
    type Status = PublishStatus;

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "sects",
        path: "/guilds",
        id_field: "id",
        list: ListShape::Paged { items_key: "list" },
        page_size_param: "pageSize",
        default_page_size: 10,
        get: None,
        create: None,
        update: Some(UpdateSpec {
            verb: HttpVerb::Post,
            id: IdPlacement::Body,
        }),
        delete: None,
        status: Some(StatusSpec {
            route: StatusRoute::Path("/guilds/status"),
            verb: HttpVerb::Post,
            id: IdPlacement::Body,
            field: "status",
        }),
        filters: FILTERS,
        permission_gated: false,
        on_fetch_error: OnFetchError::KeepLast,
    };

    fn id(record: &Sect) -> i64 {
        record.id
    }

    fn default_draft() -> SectDraft {
        SectDraft {
            name: String::new(),
            intro: None,
            notice: None,
            min_realm_id: None,
            level_id: 1,
            prestige: 0,
            spirit_stone: 0,
        }
    }

    fn draft_from(record: &Sect) -> SectDraft {
        SectDraft {
            name: record.name.clone(),
            intro: record.intro.clone(),
            notice: record.notice.clone(),
            min_realm_id: record.min_realm_id,
            level_id: record.level_id,
            prestige: record.prestige,
            spirit_stone: record.spirit_stone,
        }
    }

    fn validate(draft: &SectDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "name", &draft.name, 1, 64);
        validate::max_len(&mut errors, "intro", draft.intro.as_deref(), 256);
        if draft.level_id < 1 {
            errors.add("levelId", "must be at least 1");
        }
        if draft.prestige < 0 {
            errors.add("prestige", "must not be negative");
        }
        if draft.spirit_stone < 0 {
            errors.add("spiritStone", "must not be negative");
        }
        errors.into_result()
    }

    fn apply_draft(record: &mut Sect, draft: &SectDraft) {
        record.name = draft.name.clone();
        record.intro = draft.intro.clone();
        record.notice = draft.notice.clone();
        record.min_realm_id = draft.min_realm_id;
        record.level_id = draft.level_id;
        record.prestige = draft.prestige;
        record.spirit_stone = draft.spirit_stone;
    }

    fn set_status(record: &mut Sect, status: &PublishStatus) {
        record.status = Some(*status);
    }
}
