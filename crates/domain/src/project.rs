//! # プロジェクトと取り組み
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Project`] | プロジェクト | 練習用のプロジェクト課題 |
//! | [`UserProject`] | 取り組み | あるユーザーがプロジェクトに取り組んでいる記録 |
//! | [`UserProjectStatus`] | 取り組み状態 | 進行中、レビュー待ち、完了、未完了 |
//!
//! 取り組みはアカウント/プロジェクト側のサブシステムが所有し、
//! 通知処理は読み取るだけ。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::user::User;

define_uuid_id! {
    /// プロジェクト ID
    pub struct ProjectId;
}

define_uuid_id! {
    /// 取り組み（UserProject）ID
    pub struct UserProjectId;
}

/// プロジェクト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    id:    ProjectId,
    title: String,
    slug:  String,
}

impl Project {
    pub fn new(id: ProjectId, title: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            slug: slug.into(),
        }
    }

    pub fn id(&self) -> &ProjectId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }
}

/// 取り組み状態
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserProjectStatus {
    /// 進行中
    InProgress,
    /// レビュー待ち
    InReview,
    /// 完了（承認済み）
    Complete,
    /// 未完了（差し戻し）
    Incomplete,
}

/// 取り組み（UserProject）
///
/// `owner` は取り組んでいるユーザーで、承認/差し戻し通知の唯一の受信者。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProject {
    id:      UserProjectId,
    owner:   User,
    project: Project,
    status:  UserProjectStatus,
}

impl UserProject {
    pub fn new(id: UserProjectId, owner: User, project: Project, status: UserProjectStatus) -> Self {
        Self {
            id,
            owner,
            project,
            status,
        }
    }

    pub fn id(&self) -> &UserProjectId {
        &self.id
    }

    pub fn owner(&self) -> &User {
        &self.owner
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn status(&self) -> UserProjectStatus {
        self.status
    }
}
