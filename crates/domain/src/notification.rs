//! # 通知
//!
//! 取り組みイベントから送られるメール通知のドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`NotificationCategory`] | 通知カテゴリ | ユーザー設定でオン/オフできる通知の単位 |
//! | [`Audience`] | 宛先区分 | 参加者全員（ファンアウト）か、取り組みの所有者のみか |
//! | [`EmailMessage`] | メールメッセージ | 受信者ごとにレンダリングされる一時的な値 |
//! | [`NotificationContext`] | 通知コンテキスト | イベントごとに 1 度だけ組み立てる共通コンテキスト |
//! | [`RecipientContext`] | 受信者コンテキスト | 共通コンテキスト + `to_user` |
//!
//! ## 設計方針
//!
//! - **fire-and-forget**: メール送信の失敗は呼び出し元の操作に影響しない
//! - **受信者ごとの不変コンテキスト**: 共通コンテキストを借用し、受信者ごとに新しく組み立てる

use serde::Serialize;
use strum::IntoStaticStr;
use thiserror::Error;

use crate::{
    project::{Project, UserProject},
    user::User,
};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// テンプレートレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    TemplateFailed(String),
}

/// 通知の宛先区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// 購読中の参加者全員（操作者を除く）
    Participants,
    /// 取り組みの所有者のみ
    Owner,
}

/// 通知カテゴリ
///
/// ユーザー設定の通知可否はカテゴリ単位で判定する。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationCategory {
    /// レビュー依頼 → 参加者に送信
    ReviewRequest,
    /// 取り組みへのメッセージ → 参加者に送信
    ProjectMessage,
    /// 取り組みの承認 → 所有者に送信
    ProjectApproved,
    /// 取り組みの差し戻し → 所有者に送信
    ProjectDisapproved,
}

impl NotificationCategory {
    pub fn audience(self) -> Audience {
        match self {
            Self::ReviewRequest | Self::ProjectMessage => Audience::Participants,
            Self::ProjectApproved | Self::ProjectDisapproved => Audience::Owner,
        }
    }

    /// テンプレート ID（拡張子なし）
    pub fn template_name(self) -> &'static str {
        match self {
            Self::ReviewRequest => "project_review_request",
            Self::ProjectMessage => "project_message",
            Self::ProjectApproved => "project_approved",
            Self::ProjectDisapproved => "project_disapproved",
        }
    }

    /// ユーザー設定のキー
    pub fn setting_key(self) -> &'static str {
        match self {
            Self::ReviewRequest => "email_notify_project_review_request",
            Self::ProjectMessage => "email_notify_project_message",
            Self::ProjectApproved => "email_notify_project_approved",
            Self::ProjectDisapproved => "email_notify_project_disapproved",
        }
    }

    /// 件名
    ///
    /// ファンアウト系のカテゴリのみ操作者のハンドルを埋め込む。
    pub fn subject(self, actor: &User) -> String {
        match self {
            Self::ReviewRequest => {
                format!("[Proyek] Permintaan review dari {}", actor.handle())
            }
            Self::ProjectMessage => format!("[Proyek] Pesan dari {}", actor.handle()),
            Self::ProjectApproved => "[Proyek] Proyek kamu telah disetujui!".to_string(),
            Self::ProjectDisapproved => "[Proyek] Status proyek kamu diralat".to_string(),
        }
    }
}

/// メールメッセージ
///
/// テンプレートレンダリングの出力。NotificationSender に渡した後は破棄される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// 送信元アドレス
    pub from:      String,
    /// 送信先メールアドレス
    pub to:        Vec<String>,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}

/// 通知コンテキスト（イベント単位）
///
/// テンプレートに渡す共通の値。イベントごとに 1 度だけ組み立てる。
#[derive(Debug, Clone, Serialize)]
pub struct NotificationContext<'a> {
    /// サイトのドメイン（リンク生成用）
    pub domain:       &'a str,
    /// イベントの操作者
    pub user:         &'a User,
    pub user_project: &'a UserProject,
    pub project:      &'a Project,
}

impl<'a> NotificationContext<'a> {
    pub fn new(domain: &'a str, actor: &'a User, user_project: &'a UserProject) -> Self {
        Self {
            domain,
            user: actor,
            user_project,
            project: user_project.project(),
        }
    }

    /// 受信者を束縛したコンテキストを作る
    pub fn for_recipient(&'a self, to_user: &'a User) -> RecipientContext<'a> {
        RecipientContext {
            base: self,
            to_user,
        }
    }
}

/// 受信者コンテキスト
///
/// シリアライズすると共通コンテキストのキーに `to_user` が加わる。
#[derive(Debug, Clone, Serialize)]
pub struct RecipientContext<'a> {
    #[serde(flatten)]
    base:        &'a NotificationContext<'a>,
    pub to_user: &'a User,
}

impl RecipientContext<'_> {
    pub fn base(&self) -> &NotificationContext<'_> {
        self.base
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        project::{ProjectId, UserProjectId, UserProjectStatus},
        user::{Email, UserId},
    };

    fn make_user(username: &str) -> User {
        User::new(
            UserId::new(),
            username,
            Email::new(format!("{username}@example.com")).unwrap(),
        )
    }

    fn make_user_project(owner: User) -> UserProject {
        UserProject::new(
            UserProjectId::new(),
            owner,
            Project::new(ProjectId::new(), "Aplikasi Todo", "aplikasi-todo"),
            UserProjectStatus::InReview,
        )
    }

    #[rstest]
    #[case(NotificationCategory::ReviewRequest, Audience::Participants)]
    #[case(NotificationCategory::ProjectMessage, Audience::Participants)]
    #[case(NotificationCategory::ProjectApproved, Audience::Owner)]
    #[case(NotificationCategory::ProjectDisapproved, Audience::Owner)]
    fn test_カテゴリごとの宛先区分が正しい(
        #[case] category: NotificationCategory,
        #[case] expected: Audience,
    ) {
        assert_eq!(category.audience(), expected);
    }

    #[test]
    fn test_ファンアウト系の件名に操作者のハンドルが含まれる() {
        let actor = make_user("budi");

        assert_eq!(
            NotificationCategory::ReviewRequest.subject(&actor),
            "[Proyek] Permintaan review dari @budi"
        );
        assert_eq!(
            NotificationCategory::ProjectMessage.subject(&actor),
            "[Proyek] Pesan dari @budi"
        );
    }

    #[test]
    fn test_所有者向けの件名は固定文言() {
        let actor = make_user("budi");

        assert_eq!(
            NotificationCategory::ProjectApproved.subject(&actor),
            "[Proyek] Proyek kamu telah disetujui!"
        );
        assert_eq!(
            NotificationCategory::ProjectDisapproved.subject(&actor),
            "[Proyek] Status proyek kamu diralat"
        );
    }

    #[test]
    fn test_カテゴリの文字列表現はsnake_case() {
        assert_eq!(
            NotificationCategory::ProjectDisapproved.to_string(),
            "project_disapproved"
        );
        let s: &str = NotificationCategory::ReviewRequest.into();
        assert_eq!(s, "review_request");
    }

    #[test]
    fn test_受信者コンテキストは共通キーとto_userを持つ() {
        let actor = make_user("budi");
        let owner = make_user("siti");
        let reviewer = make_user("andi");
        let user_project = make_user_project(owner);
        let base = NotificationContext::new("upkoding.id", &actor, &user_project);

        let json = serde_json::to_value(base.for_recipient(&reviewer)).unwrap();

        assert_eq!(json["domain"], "upkoding.id");
        assert_eq!(json["user"]["username"], "budi");
        assert_eq!(json["project"]["slug"], "aplikasi-todo");
        assert_eq!(json["user_project"]["owner"]["username"], "siti");
        assert_eq!(json["to_user"]["username"], "andi");
    }

    #[test]
    fn test_受信者ごとのコンテキストは互いに影響しない() {
        let actor = make_user("budi");
        let user_project = make_user_project(make_user("siti"));
        let base = NotificationContext::new("upkoding.id", &actor, &user_project);
        let first = make_user("andi");
        let second = make_user("rina");

        let first_ctx = base.for_recipient(&first);
        let second_ctx = base.for_recipient(&second);

        assert_eq!(first_ctx.to_user.username(), "andi");
        assert_eq!(second_ctx.to_user.username(), "rina");
        assert!(base.domain == first_ctx.base().domain);
    }
}
