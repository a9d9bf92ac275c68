//! # ParticipantRepository
//!
//! 取り組みを購読している参加者を取得する。
//!
//! ## 設計方針
//!
//! - **購読中のみ**: `subscribed = TRUE` の参加者だけを返す
//! - **操作者の除外**: イベントを発生させたユーザーはクエリで除外する
//! - **不正な行は読み飛ばす**: メールアドレスが不正な参加者 1 人のために他の参加者への通知を止めない

use async_trait::async_trait;
use sqlx::PgPool;
use upkoding_domain::{
    project::UserProjectId,
    user::{User, UserId},
};

use upkoding_shared::event_log::error_tag;

use super::user_repository::UserRow;
use crate::error::InfraError;

/// 参加者リポジトリトレイト
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// 取り組みを購読中のユーザーを取得する（`exclude_user` を除く）
    async fn find_subscribed_users(
        &self,
        user_project_id: &UserProjectId,
        exclude_user: &UserId,
    ) -> Result<Vec<User>, InfraError>;
}

/// PostgreSQL 実装の ParticipantRepository
#[derive(Debug, Clone)]
pub struct PostgresParticipantRepository {
    pool: PgPool,
}

impl PostgresParticipantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%user_project_id))]
    async fn find_subscribed_users(
        &self,
        user_project_id: &UserProjectId,
        exclude_user: &UserId,
    ) -> Result<Vec<User>, InfraError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT u.id, u.username, u.email
            FROM user_project_participants p
            INNER JOIN users u ON u.id = p.user_id
            WHERE p.user_project_id = $1
              AND p.subscribed = TRUE
              AND p.user_id <> $2
            ORDER BY p.id
            "#,
        )
        .bind(user_project_id.as_uuid())
        .bind(exclude_user.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(users_from_rows(rows))
    }
}

/// 行をユーザーに変換する。変換できない行はログに残して除外する。
fn users_from_rows(rows: Vec<UserRow>) -> Vec<User> {
    rows.into_iter()
        .filter_map(|row| match User::try_from(row) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(
                    error.category = error_tag::INFRASTRUCTURE,
                    error.kind = error_tag::INVALID_ROW,
                    error = %e,
                    "参加者の行を読み飛ばす"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresParticipantRepository>();
    }

    fn row(username: &str, email: &str) -> UserRow {
        UserRow {
            id:       Uuid::now_v7(),
            username: username.to_string(),
            email:    email.to_string(),
        }
    }

    #[test]
    fn メールアドレスが不正な行だけを除外して残りを返す() {
        let rows = vec![
            row("andi", "bukan-email"),
            row("citra", "citra@example.com"),
            row("dewi", "dewi@example.com"),
        ];

        let users = users_from_rows(rows);

        let usernames: Vec<&str> = users.iter().map(User::username).collect();
        assert_eq!(usernames, vec!["citra", "dewi"]);
    }
}
