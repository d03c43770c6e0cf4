//! Player accounts on the game server.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, DeleteSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement,
    InsertPosition, ListShape, OnFetchError, Resource, ResourceDescriptor, UpdateSpec,
};
use crate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameUser {
    pub id: i64,
    pub name: String,
    /// Binding id on the platform account.
    pub bid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameUserDraft {
    pub name: String,
    pub bid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Only sent when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for GameUserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameUserDraft")
            .field("name", &self.name)
            .field("bid", &self.bid)
            .field("pid", &self.pid)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

const FILTERS: &[FilterSpec] = &[FilterSpec::server("search", FilterKind::Text)];

#[derive(Debug, Clone, Copy)]
pub struct GameUsers;

impl Resource for GameUsers {
    type Id = i64;
    type Record = GameUser;
    type Draft = GameUserDraft;
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "game-users",
        path: "/game/users",
        id_field: "id",
        list: ListShape::Paged { items_key: "users" },
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

    fn id(record: &GameUser) -> i64 {
        record.id
    }

    fn default_draft() -> GameUserDraft {
        GameUserDraft::default()
    }

    fn draft_from(record: &GameUser) -> GameUserDraft {
        GameUserDraft {
            name: record.name.clone(),
            bid: record.bid.clone(),
            pid: record.pid.clone(),
            email: record.email.clone(),
            password: None,
        }
    }

    fn validate(draft: &GameUserDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "name", &draft.name, 1, 50);
        if let Some(email) = draft.email.as_deref().filter(|e| !e.is_empty())
            && !email.contains('@')
        {
            errors.add("email", "is not a valid email address");
        }
        errors.into_result()
    }

    fn apply_draft(record: &mut GameUser, draft: &GameUserDraft) {
        record.name = draft.name.clone();
        record.bid = draft.bid.clone();
        record.pid = draft.pid.clone();
        record.email = draft.email.clone();
    }
}
