//! The backend's resources.

pub mod activity;
pub mod admin;
pub mod config_category;
pub mod email;
pub mod feedback_category;
pub mod game_config;
pub mod game_user;
pub mod mute;
pub mod notice;
pub mod player_feedback;
pub mod recharge;
pub mod role;
pub mod sect;
pub mod sensitive_word;
pub mod stats;

use serde::{Deserialize, Serialize};

pub use activity::{Activities, Activity, ActivityDraft};
pub use admin::{AccountStatus, Admin, AdminDraft, Admins};
pub use config_category::{CategoryOption, ConfigCategories, ConfigCategory, ConfigCategoryDraft};
pub use email::{Email, EmailDraft, EmailGood, EmailKind, Emails, GoodsOption};
pub use feedback_category::{FeedbackCategories, FeedbackCategory, FeedbackCategoryDraft};
pub use game_config::{GameConfig, GameConfigDraft, GameConfigs};
pub use game_user::{GameUser, GameUserDraft, GameUsers};
pub use mute::{
    MuteDraft, MuteLog, MuteLogEntry, MuteLogKind, MuteRecord, Mutes, UnmuteReport, UnmuteResult,
};
pub use notice::{Notice, NoticeDraft, Notices};
pub use player_feedback::{PlayerFeedback, PlayerFeedbackDraft, PlayerFeedbacks};
pub use recharge::{
    ChargeRequest, PackageStatus, PackageType, RechargeOrder, RechargeOrders, RechargePackage,
    RechargePackages, RechargeStatus, RefundApplication, RefundRequest, RefundStatus,
};
pub use role::{Permission, PermissionCatalog, Role, RoleDraft, Roles};
pub use sect::{Sect, SectDraft, Sects};
pub use sensitive_word::{
    DetectionReport, ImportReport, SensitiveWord, SensitiveWordDraft, SensitiveWordLog,
    SensitiveWordLogs, SensitiveWords, WordAction, WordLevel, WordStatistics, WordType,
};
pub use stats::{PlayerRank, RankLimit, SectRank, StatSummary};

/// Visibility of an activity, notice or sect: `0` open, `1` closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum PublishStatus {
    Open,
    Closed,
}

impl PublishStatus {
    pub fn toggled(self) -> Self {
        match self {
            PublishStatus::Open => PublishStatus::Closed,
            PublishStatus::Closed => PublishStatus::Open,
        }
    }
}

impl TryFrom<i64> for PublishStatus {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PublishStatus::Open),
            1 => Ok(PublishStatus::Closed),
            other => Err(format!("unknown status {}", other)),
        }
    }
}

impl From<PublishStatus> for i64 {
    fn from(status: PublishStatus) -> Self {
        match status {
            PublishStatus::Open => 0,
            PublishStatus::Closed => 1,
        }
    }
}

impl std::fmt::Display for PublishStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublishStatus::Open => f.write_str("open"),
            PublishStatus::Closed => f.write_str("closed"),
        }
    }
}
