//! # 取り組みイベント
//!
//! 取り組みの状態が変化したときにメインアプリケーションが発行するイベント。
//! 生成後は不変で、通知ディスパッチャへの読み取り専用の入力となる。
//!
//! ## イベント種別
//!
//! | 種別コード | 意味 | 通知カテゴリ |
//! |-----------|------|-------------|
//! | `review_request` | レビュー依頼 | `review_request` |
//! | `review_message` | レビューメッセージ投稿 | `project_message` |
//! | `project_complete` | 取り組み承認 | `project_approved` |
//! | `project_incomplete` | 取り組み差し戻し | `project_disapproved` |
//!
//! 種別コードは文字列のまま保持し、分類は [`ProjectEvent::event_type`] で行う。
//! 未知のコードは `None` となり、通知は発生しない。

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::IntoStaticStr;

use crate::{notification::NotificationCategory, project::UserProject, user::User};

define_uuid_id! {
    /// 取り組みイベント ID
    pub struct ProjectEventId;
}

/// 取り組みイベント種別
///
/// 1 イベントにつき 1 種別のみ（排他的な閉じた列挙）。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProjectEventType {
    /// レビュー依頼
    ReviewRequest,
    /// レビューメッセージ
    ReviewMessage,
    /// 承認（完了）
    ProjectComplete,
    /// 差し戻し（未完了）
    ProjectIncomplete,
}

impl ProjectEventType {
    /// 種別コードを分類する
    ///
    /// 未知のコードはエラーではなく `None` を返す。
    pub fn classify(code: &str) -> Option<Self> {
        code.parse().ok()
    }

    /// 対応する通知カテゴリを返す
    pub fn category(self) -> NotificationCategory {
        match self {
            Self::ReviewRequest => NotificationCategory::ReviewRequest,
            Self::ReviewMessage => NotificationCategory::ProjectMessage,
            Self::ProjectComplete => NotificationCategory::ProjectApproved,
            Self::ProjectIncomplete => NotificationCategory::ProjectDisapproved,
        }
    }
}

/// 取り組みイベント
#[derive(Debug, Clone)]
pub struct ProjectEvent {
    id:           ProjectEventId,
    type_code:    String,
    user_project: UserProject,
    actor:        User,
    created_at:   DateTime<Utc>,
}

impl ProjectEvent {
    pub fn new(
        id: ProjectEventId,
        type_code: impl Into<String>,
        user_project: UserProject,
        actor: User,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            type_code: type_code.into(),
            user_project,
            actor,
            created_at,
        }
    }

    pub fn id(&self) -> &ProjectEventId {
        &self.id
    }

    /// 発行元が付与した種別コード（未分類）
    pub fn type_code(&self) -> &str {
        &self.type_code
    }

    /// 分類済みのイベント種別
    pub fn event_type(&self) -> Option<ProjectEventType> {
        ProjectEventType::classify(&self.type_code)
    }

    pub fn user_project(&self) -> &UserProject {
        &self.user_project
    }

    /// イベントを発生させたユーザー
    pub fn actor(&self) -> &User {
        &self.actor
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("review_request", ProjectEventType::ReviewRequest)]
    #[case("review_message", ProjectEventType::ReviewMessage)]
    #[case("project_complete", ProjectEventType::ProjectComplete)]
    #[case("project_incomplete", ProjectEventType::ProjectIncomplete)]
    fn test_既知の種別コードを分類できる(
        #[case] code: &str,
        #[case] expected: ProjectEventType,
    ) {
        assert_eq!(ProjectEventType::classify(code), Some(expected));
        assert_eq!(expected.to_string(), code);
    }

    #[rstest]
    #[case("")]
    #[case("project_deleted")]
    #[case("REVIEW_REQUEST")]
    fn test_未知の種別コードはnoneになる(#[case] code: &str) {
        assert_eq!(ProjectEventType::classify(code), None);
    }

    #[rstest]
    #[case(ProjectEventType::ReviewRequest, NotificationCategory::ReviewRequest)]
    #[case(ProjectEventType::ReviewMessage, NotificationCategory::ProjectMessage)]
    #[case(ProjectEventType::ProjectComplete, NotificationCategory::ProjectApproved)]
    #[case(
        ProjectEventType::ProjectIncomplete,
        NotificationCategory::ProjectDisapproved
    )]
    fn test_イベント種別から通知カテゴリへの対応が正しい(
        #[case] event_type: ProjectEventType,
        #[case] expected: NotificationCategory,
    ) {
        assert_eq!(event_type.category(), expected);
    }
}
