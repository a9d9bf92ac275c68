//! # UserSettingRepository
//!
//! ユーザーごとの通知設定（Preference Gate）を参照する。
//!
//! 設定は `user_settings` テーブルに `(user_id, name, enabled)` で保存される。
//! 行が存在しない場合は有効として扱う（通知はデフォルトでオン）。

use async_trait::async_trait;
use sqlx::PgPool;
use upkoding_domain::{notification::NotificationCategory, user::UserId};

use crate::error::InfraError;

/// ユーザー設定リポジトリトレイト
#[async_trait]
pub trait UserSettingRepository: Send + Sync {
    /// 指定カテゴリのメール通知が有効か
    async fn is_notification_enabled(
        &self,
        user_id: &UserId,
        category: NotificationCategory,
    ) -> Result<bool, InfraError>;
}

/// PostgreSQL 実装の UserSettingRepository
#[derive(Debug, Clone)]
pub struct PostgresUserSettingRepository {
    pool: PgPool,
}

impl PostgresUserSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserSettingRepository for PostgresUserSettingRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%user_id, %category))]
    async fn is_notification_enabled(
        &self,
        user_id: &UserId,
        category: NotificationCategory,
    ) -> Result<bool, InfraError> {
        let enabled: Option<bool> = sqlx::query_scalar(
            r#"
            SELECT enabled
            FROM user_settings
            WHERE user_id = $1 AND name = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(category.setting_key())
        .fetch_optional(&self.pool)
        .await?;

        Ok(enabled.unwrap_or(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresUserSettingRepository>();
    }
}
