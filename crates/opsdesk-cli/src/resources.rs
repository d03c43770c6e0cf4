//! Resource names accepted on the command line.

use clap::ValueEnum;

/// Every resource the console can manage.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Admin accounts
    Admins,
    /// Admin roles
    Roles,
    /// Player activities
    Activities,
    /// Announcements
    Notices,
    /// Game configuration entries
    GameConfigs,
    /// Game configuration categories
    ConfigCategories,
    /// Sensitive-word dictionary
    SensitiveWords,
    /// Player feedback categories
    FeedbackCategories,
    /// Recharge orders (read-only)
    RechargeOrders,
    /// Recharge packages (read-only)
    RechargePackages,
    /// Muted players, keyed by player id
    Mutes,
    /// Operator mail to players
    Emails,
    /// Player accounts
    GameUsers,
    /// Feedback filed by players
    Feedbacks,
    /// Player sects
    Sects,
    /// Sensitive-word detection log (read-only)
    WordLogs,
}

/// Run a generic `async fn name<R: Resource>(..)` for the resource `kind`
/// names.
///
/// ```ignore
/// with_resource!(args.resource, list::run_typed(args, &app))
/// ```
macro_rules! with_resource {
    ($kind:expr, $($f:ident)::+ ( $($arg:expr),* $(,)? )) => {{
        use opsdesk_core::resources as r;
        use $crate::resources::ResourceKind as K;
        match $kind {
            K::Admins => $($f)::+::<r::Admins>($($arg),*).await,
            K::Roles => $($f)::+::<r::Roles>($($arg),*).await,
            K::Activities => $($f)::+::<r::Activities>($($arg),*).await,
            K::Notices => $($f)::+::<r::Notices>($($arg),*).await,
            K::GameConfigs => $($f)::+::<r::GameConfigs>($($arg),*).await,
            K::ConfigCategories => $($f)::+::<r::ConfigCategories>($($arg),*).await,
            K::SensitiveWords => $($f)::+::<r::SensitiveWords>($($arg),*).await,
            K::FeedbackCategories => $($f)::+::<r::FeedbackCategories>($($arg),*).await,
            K::RechargeOrders => $($f)::+::<r::RechargeOrders>($($arg),*).await,
            K::RechargePackages => $($f)::+::<r::RechargePackages>($($arg),*).await,
            K::Mutes => $($f)::+::<r::Mutes>($($arg),*).await,
            K::Emails => $($f)::+::<r::Emails>($($arg),*).await,
            K::GameUsers => $($f)::+::<r::GameUsers>($($arg),*).await,
            K::Feedbacks => $($f)::+::<r::PlayerFeedbacks>($($arg),*).await,
            K::Sects => $($f)::+::<r::Sects>($($arg),*).await,
            K::WordLogs => $($f)::+::<r::SensitiveWordLogs>($($arg),*).await,
        }
    }};
}

pub(crate) use with_resource;

#[cfg(test)]
mod tests {
    use super::*;
    use opsdesk_core::Resource;
    use opsdesk_core::resources::{FeedbackCategories, GameConfigs, PlayerFeedbacks};

    async fn path_of<R: Resource>() -> &'static str {
        R::DESCRIPTOR.path
    }

    #[tokio::test]
    async fn kebab_case_names_dispatch_to_typed_resources() {
        let kind = ResourceKind::from_str("game-configs", false).unwrap();
        assert_eq!(
            with_resource!(kind, path_of()),
            GameConfigs::DESCRIPTOR.path
        );

        let kind = ResourceKind::from_str("feedback-categories", false).unwrap();
        assert_eq!(
            with_resource!(kind, path_of()),
            FeedbackCategories::DESCRIPTOR.path
        );

        let kind = ResourceKind::from_str("feedbacks", false).unwrap();
        assert_eq!(
            with_resource!(kind, path_of()),
            PlayerFeedbacks::DESCRIPTOR.path
        );

        assert!(ResourceKind::from_str("players", false).is_err());
    }
}
