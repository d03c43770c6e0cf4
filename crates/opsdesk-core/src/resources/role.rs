//! Roles and their permission assignments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, DeleteSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement,
    InsertPosition, ListShape, OnFetchError, Resource, ResourceDescriptor, UpdateSpec,
};
use crate::validate;

use super::admin::AccountStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub is_system: bool,
    pub status: AccountStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: AccountStatus,
}

/// A grantable permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub action: String,
}

/// Every permission, flat and grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCatalog {
    #[serde(default)]
    pub all: Vec<Permission>,
    #[serde(default)]
    pub grouped: BTreeMap<String, Vec<Permission>>,
}

const FILTERS: &[FilterSpec] = &[
    FilterSpec::server("status", FilterKind::Choice(&["active", "inactive"])),
    FilterSpec::server("search", FilterKind::Text),
];

#[derive(Debug, Clone, Copy)]
pub struct Roles;

impl Resource for Roles {
    type Id = i64;
    type Record = Role;
    type Draft = RoleDraft;
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "roles",
        path: "/roles/list",
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
        permission_gated: true,
        on_fetch_error: OnFetchError::KeepLast,
    };

    fn id(record: &Role) -> i64 {
        record.id
    }

    fn default_draft() -> RoleDraft {
        RoleDraft {
            name: String::new(),
            description: None,
            status: AccountStatus::Active,
        }
    }

    fn draft_from(record: &Role) -> RoleDraft {
        RoleDraft {
            name: record.name.clone(),
            description: record.description.clone(),
            status: record.status,
        }
    }

    fn validate(draft: &RoleDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "name", &draft.name, 1, 50);
        validate::max_len(&mut errors, "description", draft.description.as_deref(), 200);
        errors.into_result()
    }

    fn apply_draft(record: &mut Role, draft: &RoleDraft) {
        record.name = draft.name.clone();
        record.description = draft.description.clone();
        record.status = draft.status;
    }
}
