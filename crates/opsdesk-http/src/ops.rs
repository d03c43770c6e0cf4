//! Operations outside the list/form pattern.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use opsdesk_core::auth::check_new_password;
use opsdesk_core::error::{InvalidInputError, ValidationErrors};
use opsdesk_core::resource::HttpVerb;
use opsdesk_core::resources::sensitive_word::validate_batch;
use opsdesk_core::resources::{
    CategoryOption, ChargeRequest, DetectionReport, GoodsOption, ImportReport, MuteLog,
    MuteLogKind, Permission, PermissionCatalog, PlayerRank, RankLimit, RechargeOrder,
    RefundApplication, RefundRequest, SectRank, SensitiveWordDraft, StatSummary, UnmuteReport,
    WordStatistics,
};
use opsdesk_core::{PasswordChange, Result, Timestamp};

use crate::client::ApiClient;
use crate::envelope::{
    self, ACCOUNTS, AssignPermissionsRequest, CHANGE_PASSWORD, ChangePasswordRequest,
    DeletedCount, DetectRequest, EMAIL_GOODS, EMAIL_SEND, GAME_CONFIG_CATEGORY_OPTIONS,
    GAME_CONFIG_SYNC, ImportWordsRequest, MUTE_LIST, MUTE_LOGS, PERMISSIONS, PLAYER_RANK,
    RECHARGE_CHARGE, RECHARGE_REFUNDS, ResetPasswordRequest, SECT_RANK, SENSITIVE_WORD_EXPORT,
    SENSITIVE_WORD_IMPORT, SENSITIVE_WORD_REFRESH, SENSITIVE_WORD_STATISTICS,
    SENSITIVE_WORD_TEST, STAT_SUMMARY, SUCCESS, UnmuteRequest,
};

/// When the game servers were told to reload their configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReceipt {
    pub timestamp: Timestamp,
}

impl ApiClient {
    /// Change the signed-in admin's password.
    ///
    /// The new password and its confirmation are checked before sending.
    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        change.validate()?;
        let body = ChangePasswordRequest {
            current_password: change.current(),
            new_password: change.new_password(),
        };
        self.post_json(CHANGE_PASSWORD, Some(&body)).await?;
        info!("Password changed");
        Ok(())
    }

    /// Set another admin's password.
    #[instrument(skip(self, new_password))]
    pub async fn reset_admin_password(&self, id: i64, new_password: &str) -> Result<()> {
        let mut errors = ValidationErrors::new();
        check_new_password(&mut errors, "newPassword", new_password);
        errors.into_result()?;

        let body = ResetPasswordRequest { id, new_password };
        self.call(HttpVerb::Patch, ACCOUNTS, &[], Some(&body), &[SUCCESS])
            .await?;
        info!(id, "Admin password reset");
        Ok(())
    }

    /// Every grantable permission.
    #[instrument(skip(self))]
    pub async fn permissions(&self) -> Result<PermissionCatalog> {
        let data = self.get_json(PERMISSIONS, &[]).await?;
        envelope::required(data)
    }

    /// Permissions currently granted to a role.
    #[instrument(skip(self))]
    pub async fn role_permissions(&self, role_id: i64) -> Result<Vec<Permission>> {
        let data = self
            .get_json(&envelope::role_permissions(role_id), &[])
            .await?;
        list_or_empty(data)
    }

    /// Replace a role's permissions with `codes`.
    #[instrument(skip(self))]
    pub async fn assign_permissions(&self, role_id: i64, codes: &[String]) -> Result<()> {
        let body = AssignPermissionsRequest {
            permission_codes: codes,
        };
        self.post_json(&envelope::role_permissions(role_id), Some(&body))
            .await?;
        info!(role_id, count = codes.len(), "Permissions assigned");
        Ok(())
    }

    /// Push the current game configuration to the game servers.
    #[instrument(skip(self))]
    pub async fn sync_game_configs(&self) -> Result<SyncReceipt> {
        let data = self.post_json::<()>(GAME_CONFIG_SYNC, None).await?;
        envelope::required(data)
    }

    /// Options for the category picker of config forms.
    #[instrument(skip(self))]
    pub async fn config_category_options(&self) -> Result<Vec<CategoryOption>> {
        let data = self.get_json(GAME_CONFIG_CATEGORY_OPTIONS, &[]).await?;
        list_or_empty(data)
    }

    /// Run `text` through the server's sensitive-word filter.
    #[instrument(skip(self, text))]
    pub async fn detect_sensitive_words(&self, text: &str) -> Result<DetectionReport> {
        let data = self
            .post_json(SENSITIVE_WORD_TEST, Some(&DetectRequest { text }))
            .await?;
        envelope::required(data)
    }

    /// Make the server reload its sensitive-word dictionary.
    #[instrument(skip(self))]
    pub async fn refresh_sensitive_word_cache(&self) -> Result<()> {
        self.post_json::<()>(SENSITIVE_WORD_REFRESH, None).await?;
        info!("Sensitive-word cache refreshed");
        Ok(())
    }

    /// Add every draft to the dictionary in one call.
    ///
    /// All drafts are validated first; nothing is sent if one fails.
    #[instrument(skip(self, words), fields(count = words.len()))]
    pub async fn import_sensitive_words(
        &self,
        words: &[SensitiveWordDraft],
    ) -> Result<ImportReport> {
        if words.is_empty() {
            return Err(InvalidInputError::Other {
                message: "nothing to import".to_string(),
            }
            .into());
        }
        validate_batch(words).map_err(|(index, errors)| InvalidInputError::Other {
            message: format!("word {}: {}", index + 1, errors),
        })?;

        let data = self
            .post_json(SENSITIVE_WORD_IMPORT, Some(&ImportWordsRequest { words }))
            .await?;
        let report: ImportReport = envelope::required(data)?;
        info!(
            success = report.success,
            failed = report.failed,
            duplicate = report.duplicate,
            "Sensitive words imported"
        );
        Ok(report)
    }

    /// The whole dictionary as the file the server exports.
    #[instrument(skip(self))]
    pub async fn export_sensitive_words(&self) -> Result<Vec<u8>> {
        self.download(SENSITIVE_WORD_EXPORT).await
    }

    #[instrument(skip(self))]
    pub async fn sensitive_word_statistics(&self) -> Result<WordStatistics> {
        let data = self.get_json(SENSITIVE_WORD_STATISTICS, &[]).await?;
        envelope::required(data)
    }

    /// Lift several mutes at once. Per-player failures are in the report.
    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    pub async fn batch_unmute(&self, user_ids: &[String]) -> Result<UnmuteReport> {
        if user_ids.is_empty() {
            return Err(InvalidInputError::Other {
                message: "no players to unmute".to_string(),
            }
            .into());
        }
        let body = UnmuteRequest { user_ids };
        let data = self
            .call(HttpVerb::Put, MUTE_LIST, &[], Some(&body), &[SUCCESS])
            .await?;
        let report: UnmuteReport = envelope::required(data)?;
        for failure in report.failures() {
            warn!(user_id = %failure.user_id, message = ?failure.message, "Unmute failed");
        }
        info!(
            total = report.total,
            succeeded = report.success_count,
            "Batch unmute finished"
        );
        Ok(report)
    }

    /// The latest mute-log entries, newest first. `All` reads both kinds.
    #[instrument(skip(self))]
    pub async fn mute_logs(&self, kind: MuteLogKind, limit: u32) -> Result<MuteLog> {
        let mut query = vec![("limit".to_string(), limit.max(1).to_string())];
        if kind != MuteLogKind::All {
            query.push(("type".to_string(), kind.to_string()));
        }
        let data = self.get_json(MUTE_LOGS, &query).await?;
        Ok(match data {
            Some(data) => envelope::required(Some(data))?,
            None => MuteLog {
                list: Vec::new(),
                total: 0,
                kind: Some(kind),
            },
        })
    }

    /// Purge mute-log entries of `kind`. Returns how many were removed.
    #[instrument(skip(self))]
    pub async fn clear_mute_logs(&self, kind: MuteLogKind) -> Result<u64> {
        let query = [("type".to_string(), kind.to_string())];
        let data = self
            .call::<Value>(HttpVerb::Delete, MUTE_LOGS, &query, None, &[SUCCESS])
            .await?;
        let deleted = match data {
            Some(data) => envelope::required::<DeletedCount>(Some(data))?.deleted_count,
            None => 0,
        };
        info!(%kind, deleted, "Mute logs cleared");
        Ok(deleted)
    }

    /// Send a saved draft email.
    #[instrument(skip(self))]
    pub async fn send_email(&self, id: i64) -> Result<()> {
        let query = [("id".to_string(), id.to_string())];
        self.get_json(EMAIL_SEND, &query).await?;
        info!(id, "Email sent");
        Ok(())
    }

    /// Items that can be attached to an email: the currencies, then the
    /// server's goods.
    #[instrument(skip(self))]
    pub async fn email_goods(&self) -> Result<Vec<GoodsOption>> {
        let data = self.get_json(EMAIL_GOODS, &[]).await?;
        let mut options = GoodsOption::currencies();
        options.extend(list_or_empty::<GoodsOption>(data)?);
        Ok(options)
    }

    /// Charge a package to a player on the operator's behalf.
    #[instrument(skip(self))]
    pub async fn recharge_charge(&self, request: &ChargeRequest) -> Result<RechargeOrder> {
        let data = self.post_json(RECHARGE_CHARGE, Some(request)).await?;
        let order: RechargeOrder = envelope::required(data)?;
        info!(order = %order.order_id, uid = order.uid, "Recharge charged");
        Ok(order)
    }

    /// File a refund application for an order.
    #[instrument(skip(self, request), fields(order_id = request.order_id))]
    pub async fn request_refund(&self, request: &RefundRequest) -> Result<RefundApplication> {
        request.validate()?;
        let data = self.post_json(RECHARGE_REFUNDS, Some(request)).await?;
        let application: RefundApplication = envelope::required(data)?;
        info!(id = application.id, status = ?application.status, "Refund requested");
        Ok(application)
    }

    #[instrument(skip(self))]
    pub async fn stat_summary(&self) -> Result<StatSummary> {
        let data = self.get_json(STAT_SUMMARY, &[]).await?;
        envelope::required(data)
    }

    /// Top players by realm.
    #[instrument(skip(self))]
    pub async fn player_rank(&self, limit: RankLimit) -> Result<Vec<PlayerRank>> {
        let query = [("limit".to_string(), limit.get().to_string())];
        let data = self.get_json(PLAYER_RANK, &query).await?;
        list_or_empty(data)
    }

    /// Top sects by level.
    #[instrument(skip(self))]
    pub async fn sect_rank(&self, limit: RankLimit) -> Result<Vec<SectRank>> {
        let query = [("limit".to_string(), limit.get().to_string())];
        let data = self.get_json(SECT_RANK, &query).await?;
        list_or_empty(data)
    }
}

fn list_or_empty<T: DeserializeOwned>(data: Option<Value>) -> Result<Vec<T>> {
    match data {
        Some(data) => envelope::required(Some(data)),
        None => Ok(Vec::new()),
    }
}
