//! Recharge orders, packages, and the charge and refund requests.

use serde::{Deserialize, Serialize};

use crate::error::ValidationErrors;
use crate::resource::{
    FilterKind, FilterSpec, FormMode, ListShape, OnFetchError, Resource, ResourceDescriptor,
};
use crate::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RechargeStatus {
    Success,
    Refund,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageType {
    Normal,
    MonthCard,
}

/// Whether players can buy a package: `1` on sale, `0` withdrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PackageStatus {
    Withdrawn,
    OnSale,
}

impl TryFrom<u8> for PackageStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PackageStatus::Withdrawn),
            1 => Ok(PackageStatus::OnSale),
            other => Err(format!("unknown package status {}", other)),
        }
    }
}

impl From<PackageStatus> for u8 {
    fn from(status: PackageStatus) -> Self {
        match status {
            PackageStatus::Withdrawn => 0,
            PackageStatus::OnSale => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargePackage {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub package_type: PackageType,
    pub price_amount: f64,
    #[serde(default)]
    pub grant_spirit_stone: i64,
    #[serde(default)]
    pub grant_spirit_crystal: i64,
    #[serde(default)]
    pub grant_spirit_coin: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grant_items_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_buy_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_days: Option<i64>,
    pub status: PackageStatus,
    #[serde(default)]
    pub weight: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Charge a package to a player, producing an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeRequest {
    pub uid: i64,
    pub package_id: i64,
}

/// Ask for an order to be refunded. `order_id` is the order's numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    pub order_id: i64,
    pub reason: String,
}

impl RefundRequest {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validate::text(&mut errors, "reason", &self.reason, 1, 200);
        errors.into_result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RefundStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundApplication {
    pub id: i64,
    pub order_id: i64,
    pub reason: String,
    pub status: RefundStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RechargeOrder {
    pub id: i64,
    pub uid: i64,
    #[serde(default)]
    pub package_id: Option<i64>,
    pub order_id: String,
    pub status: RechargeStatus,
    pub pay_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

const FILTERS: &[FilterSpec] = &[
    FilterSpec::server("uid", FilterKind::Number),
    FilterSpec::server("status", FilterKind::Choice(&["SUCCESS", "REFUND"])),
];

#[derive(Debug, Clone, Copy)]
pub struct RechargeOrders;

impl Resource for RechargeOrders {
    type Id = i64;
    type Record = RechargeOrder;
    type Draft = ();
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "recharge-orders",
        path: "/recharge/orders",
        id_field: "id",
        list: ListShape::Paged { items_key: "list" },
        page_size_param: "pageSize",
        default_page_size: 10,
        get: None,
        create: None,
        update: None,
        delete: None,
        status: None,
        filters: FILTERS,
        permission_gated: false,
        on_fetch_error: OnFetchError::KeepLast,
    };

    fn id(record: &RechargeOrder) -> i64 {
        record.id
    }

    fn default_draft() {}

    fn draft_from(_record: &RechargeOrder) {}

    fn validate(_draft: &(), _mode: FormMode) -> Result<(), ValidationErrors> {
        Ok(())
    }

    fn apply_draft(_record: &mut RechargeOrder, _draft: &()) {}
}

impl RechargeOrder {
    /// Only settled orders can be refunded.
    pub fn refundable(&self) -> bool {
        self.status == RechargeStatus::Success
    }
}

const PACKAGE_FILTERS: &[FilterSpec] = &[
    FilterSpec::server("type", FilterKind::Choice(&["NORMAL", "MONTH_CARD"])),
    FilterSpec::server("status", FilterKind::Choice(&["0", "1"])),
];

/// Packages on offer. Read-only.
#[derive(Debug, Clone, Copy)]
pub struct RechargePackages;

impl Resource for RechargePackages {
    type Id = i64;
    type Record = RechargePackage;
    type Draft = ();
    type Status = ();

    const DESCRIPTOR: ResourceDescriptor = ResourceDescriptor {
        name: "recharge-packages",
        path: "/recharge/packages",
        id_field: "id",
        list: ListShape::Paged { items_key: "list" },
        page_size_param: "pageSize",
        default_page_size: 10,
        get: None,
        create: None,
        update: None,
        delete: None,
        status: None,
        filters: PACKAGE_FILTERS,
        permission_gated: false,
        on_fetch_error: OnFetchError::KeepLast,
    };

    fn id(record: &RechargePackage) -> i64 {
        record.id
    }

    fn default_draft() {}

    fn draft_from(_record: &RechargePackage) {}

    fn validate(_draft: &(), _mode: FormMode) -> Result<(), ValidationErrors> {
        Ok(())
    }

    fn apply_draft(_record: &mut RechargePackage, _draft: &()) {}
}
