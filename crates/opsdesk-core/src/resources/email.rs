//! In-game mail sent by operators, with optional item attachments.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    CreateSpec, DeleteSpec, FilterKind, FilterSpec, FormMode, HttpVerb, IdPlacement,
    InsertPosition, ListShape, OnFetchError, Resource, ResourceDescriptor,
};
use crate::validate;

/// An attached item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailGood {
    pub item_id: i64,
    pub category: String,
    pub quantity: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub id: i64,
    /// The title.
    pub name: String,
    /// Whether the mail has been sent.
    #[serde(default)]
    pub is_element: bool,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub goods: Vec<EmailGood>,
    /// Sending admin.
    pub aid: i64,
    #[serde(default)]
    pub time: String,
}

/// Whether a new mail is kept as a draft or sent at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
    Draft,
    Send,
}

impl fmt::Display for EmailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EmailKind::Draft => "draft",
            EmailKind::Send => "send",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDraft {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub goods_list: Vec<EmailGood>,
    /// Empty for every player, otherwise a JSON array of player ids.
    #[serde(default)]
    pub receiver: String,
    /// Sending admin.
    pub sender: Option<i64>,
    #[serde(rename = "type")]
    pub kind: EmailKind,
}

/// An item that can be attached, as offered by `/email/good`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsOption {
    #[serde(default)]
    pub unique_id: String,
    pub item_id: i64,
    pub category: String,
    pub name: String,
}

impl GoodsOption {
    /// The three currencies, which the server does not list as goods.
    pub fn currencies() -> Vec<GoodsOption> {
        ["Spirit Stone", "Spirit Crystal", "Spirit Milk"]
            .iter()
            .enumerate()
            .map(|(i, name)| GoodsOption {
                unique_id: format!("money_{}", i),
                item_id: i as i64,
                category: "money".to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    pub fn attach(&self, quantity: u32) -> EmailGood {
        EmailGood {
            item_id: self.item_id,
            category: self.category.clone(),
            quantity,
            name: self.name.clone(),
        }
    }
}

const FILTERS: &[FilterSpec] = &[FilterSpec::local(
    "keyword",
    FilterKind::Text,
    &["name", "subtitle"],
)];

#[derive(Debug, Clone, Copy)]
pub struct Emails;

impl Resource for Emails {
    type Id = i64;
    type Record = Email;
    type Draft = EmailDraft;
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "emails",
        path: "/email/email",
        id_field: "id",
        list: ListShape::Unpaged,
        page_size_param: "pageSize",
        default_page_size: 10,
        get: None,
        create: Some(CreateSpec {
            path: Some("/email/create"),
            codes: &[200],
            position: InsertPosition::Prepend,
        }),
        update: None,
        delete: Some(DeleteSpec {
            verb: HttpVerb::Get,
            path: Some("/email/deleteEmail"),
            id: IdPlacement::Query,
        }),
        status: None,
        filters: FILTERS,
        permission_gated: false,
        on_fetch_error: OnFetchError::KeepLast,
    };

    fn id(record: &Email) -> i64 {
        record.id
    }

    fn default_draft() -> EmailDraft {
        EmailDraft {
            title: String::new(),
            subtitle: String::new(),
            content: String::new(),
            goods_list: Vec::new(),
            receiver: String::new(),
            sender: None,
            kind: EmailKind::Draft,
        }
    }

    fn draft_from(record: &Email) -> EmailDraft {
        EmailDraft {
            title: record.name.clone(),
            subtitle: record.subtitle.clone(),
            content: String::new(),
            goods_list: record.goods.clone(),
            receiver: String::new(),
            sender: Some(record.aid),
            kind: if record.is_element {
                EmailKind::Send
            } else {
                EmailKind::Draft
            },
        }
    }

    fn validate(draft: &EmailDraft, _mode: FormMode) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "title", &draft.title, 1, 50);
        validate::max_len(&mut errors, "subtitle", Some(&draft.subtitle), 100);
        validate::max_len(&mut errors, "content", Some(&draft.content), 500);
        validate::required(&mut errors, "sender", draft.sender.as_ref());
        if !draft.receiver.trim().is_empty()
            && !matches!(
                serde_json::from_str::<serde_json::Value>(&draft.receiver),
                Ok(serde_json::Value::Array(_))
            )
        {
            errors.add("receiver", "must be empty or a JSON array of player ids");
        }
        if draft.goods_list.iter().any(|g| g.quantity == 0) {
            errors.add("goodsList", "quantities must be at least 1");
        }
        errors.into_result()
    }

    fn apply_draft(record: &mut Email, draft: &EmailDraft) {
        record.name = draft.title.clone();
        record.subtitle = draft.subtitle.clone();
        record.goods = draft.goods_list.clone();
        if let Some(sender) = draft.sender {
            record.aid = sender;
        }
        record.is_element = draft.kind == EmailKind::Send;
    }
}
