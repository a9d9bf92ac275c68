//! # UserRepository
//!
//! イベントの操作者を ID から取得する。

use async_trait::async_trait;
use sqlx::PgPool;
use upkoding_domain::user::{Email, User, UserId};
use uuid::Uuid;

use crate::error::InfraError;

/// `users` テーブルの行
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id:       Uuid,
    pub username: String,
    pub email:    String,
}

impl TryFrom<UserRow> for User {
    type Error = InfraError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(row.email)
            .map_err(|e| InfraError::rejected_row("users.email", row.id, e))?;
        Ok(User::new(UserId::from_uuid(row.id), row.username, email))
    }
}

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ID でユーザーを取得する
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, username, email
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InfraErrorKind;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresUserRepository>();
    }

    #[test]
    fn 正しい行からユーザーを復元できる() {
        let id = Uuid::now_v7();
        let row = UserRow {
            id,
            username: "budi".to_string(),
            email: "budi@example.com".to_string(),
        };

        let user = User::try_from(row).unwrap();

        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.username(), "budi");
        assert_eq!(user.email().as_str(), "budi@example.com");
    }

    #[test]
    fn 不正なメールアドレスの行はエラーになる() {
        let row = UserRow {
            id:       Uuid::now_v7(),
            username: "budi".to_string(),
            email:    "budi".to_string(),
        };

        let err = User::try_from(row).unwrap_err();

        assert!(matches!(
            err.kind(),
            InfraErrorKind::InvalidRow { column: "users.email", source: Some(_), .. }
        ));
    }
}
