//! # UserProjectRepository
//!
//! 取り組みを所有者・プロジェクトと合わせて取得する。

use async_trait::async_trait;
use sqlx::PgPool;
use upkoding_domain::{
    project::{Project, ProjectId, UserProject, UserProjectId, UserProjectStatus},
    user::User,
};
use uuid::Uuid;

use super::user_repository::UserRow;
use crate::error::InfraError;

/// 取り組み + 所有者 + プロジェクトの結合行
#[derive(Debug, sqlx::FromRow)]
struct UserProjectRow {
    id:             Uuid,
    status:         String,
    owner_id:       Uuid,
    owner_username: String,
    owner_email:    String,
    project_id:     Uuid,
    project_title:  String,
    project_slug:   String,
}

impl TryFrom<UserProjectRow> for UserProject {
    type Error = InfraError;

    fn try_from(row: UserProjectRow) -> Result<Self, Self::Error> {
        let status: UserProjectStatus = row
            .status
            .parse()
            .map_err(|_| InfraError::unknown_value("user_projects.status", row.id, &row.status))?;
        let owner = User::try_from(UserRow {
            id:       row.owner_id,
            username: row.owner_username,
            email:    row.owner_email,
        })?;
        let project = Project::new(
            ProjectId::from_uuid(row.project_id),
            row.project_title,
            row.project_slug,
        );

        Ok(UserProject::new(
            UserProjectId::from_uuid(row.id),
            owner,
            project,
            status,
        ))
    }
}

/// 取り組みリポジトリトレイト
#[async_trait]
pub trait UserProjectRepository: Send + Sync {
    /// ID で取り組みを取得する
    async fn find_by_id(&self, id: &UserProjectId) -> Result<Option<UserProject>, InfraError>;
}

/// PostgreSQL 実装の UserProjectRepository
#[derive(Debug, Clone)]
pub struct PostgresUserProjectRepository {
    pool: PgPool,
}

impl PostgresUserProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserProjectRepository for PostgresUserProjectRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: &UserProjectId) -> Result<Option<UserProject>, InfraError> {
        let row: Option<UserProjectRow> = sqlx::query_as(
            r#"
            SELECT
                up.id,
                up.status,
                u.id AS owner_id,
                u.username AS owner_username,
                u.email AS owner_email,
                p.id AS project_id,
                p.title AS project_title,
                p.slug AS project_slug
            FROM user_projects up
            INNER JOIN users u ON u.id = up.user_id
            INNER JOIN projects p ON p.id = up.project_id
            WHERE up.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserProject::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InfraErrorKind;

    fn make_row(status: &str) -> UserProjectRow {
        UserProjectRow {
            id:             Uuid::now_v7(),
            status:         status.to_string(),
            owner_id:       Uuid::now_v7(),
            owner_username: "siti".to_string(),
            owner_email:    "siti@example.com".to_string(),
            project_id:     Uuid::now_v7(),
            project_title:  "Aplikasi Todo".to_string(),
            project_slug:   "aplikasi-todo".to_string(),
        }
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PostgresUserProjectRepository>();
    }

    #[test]
    fn 結合行から取り組みを復元できる() {
        let user_project = UserProject::try_from(make_row("in_review")).unwrap();

        assert_eq!(user_project.status(), UserProjectStatus::InReview);
        assert_eq!(user_project.owner().username(), "siti");
        assert_eq!(user_project.project().slug(), "aplikasi-todo");
    }

    #[test]
    fn 不明な状態の行はエラーになる() {
        let err = UserProject::try_from(make_row("archived")).unwrap_err();

        assert!(matches!(
            err.kind(),
            InfraErrorKind::InvalidRow { column: "user_projects.status", source: None, .. }
        ));
    }

    #[test]
    fn 所有者のメールアドレスが不正な行はエラーになる() {
        let mut row = make_row("in_review");
        row.owner_email = String::new();

        let err = UserProject::try_from(row).unwrap_err();

        assert!(matches!(
            err.kind(),
            InfraErrorKind::InvalidRow { column: "users.email", .. }
        ));
    }
}
