//! Admin accounts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, DeleteSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement,
    InsertPosition, ListShape, OnFetchError, Resource, ResourceDescriptor, UpdateSpec,
};
use crate::validate;

/// Shared by admin accounts and roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
}

/// Role summary embedded in an admin record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRef {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(default)]
    pub is_super_admin: bool,
    pub status: AccountStatus,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<RoleRef>,
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminDraft {
    pub username: String,
    /// Required on create; editing never sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
}

impl fmt::Debug for AdminDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminDraft")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("name", &self.name)
            .field("role_id", &self.role_id)
            .finish()
    }
}

const FILTERS: &[FilterSpec] = &[FilterSpec::server("search", FilterKind::Text)];

#[derive(Debug, Clone, Copy)]
pub struct Admins;

impl Resource for Admins {
    type Id = i64;
    type Record = Admin;
    type Draft = AdminDraft;
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "admins",
        path: "/account/list",
        id_field: "id",
        list: ListShape::Paged { items_key: "list" },
        page_size_param: "pageSize",
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

    fn id(record: &Admin) -> i64 {
        record.id
    }

    fn default_draft() -> AdminDraft {
        AdminDraft::default()
    }

    fn draft_from(record: &Admin) -> AdminDraft {
        AdminDraft {
            username: record.username.clone(),
            password: None,
            name: record.name.clone(),
            role_id: record.role_id,
        }
    }

    fn validate(draft: &AdminDraft, mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "username", &draft.username, 3, 32);
        validate::text(&mut errors, "name", &draft.name, 1, 50);

        match (mode, draft.password.as_deref()) {
            (FormMode::Create, None) => errors.add("password", "is required"),
            (_, Some(p)) if p.chars().count() < 6 => {
                errors.add("password", "must be at least 6 characters")
            }
            _ => {}
        }

        errors.into_result()
    }

    fn apply_draft(record: &mut Admin, draft: &AdminDraft) {
        record.username = draft.username.clone();
        record.name = draft.name.clone();
        record.role_id = draft.role_id;
    }
}
