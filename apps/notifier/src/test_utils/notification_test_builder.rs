//! 通知テストビルダー
//!
//! テストコードの重複を削減するためのビルダーパターン実装。
//! 標準的なテストデータ（所有者 `siti` の取り組み）とモックのセットアップを提供する。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use upkoding_domain::{
    participant::Participant,
    project::{Project, ProjectId, UserProject, UserProjectId, UserProjectStatus},
    project_event::{ProjectEvent, ProjectEventId},
    user::{Email, User, UserId},
};
use upkoding_infra::mock::{
    MockNotificationSender,
    MockParticipantRepository,
    MockUserProjectRepository,
    MockUserRepository,
    MockUserSettingRepository,
};

use crate::usecase::{
    ProjectEventUseCase,
    notification::{DispatcherSettings, NotificationDispatcher, TemplateRenderer},
};

/// テスト用のサイトドメイン
pub const TEST_SITE_DOMAIN: &str = "upkoding.test";

/// テスト用の送信元アドレス
pub const TEST_FROM_ADDRESS: &str = "UpKoding <upkoding@example.com>";

/// ディスパッチャのテストセットアップ
///
/// SUT と、検証に使うモックのハンドル（内部状態は SUT と共有）。
pub struct NotificationTestSetup {
    pub sut:              NotificationDispatcher,
    pub sender:           MockNotificationSender,
    pub participant_repo: MockParticipantRepository,
    pub setting_repo:     MockUserSettingRepository,
}

/// イベント受信ユースケースのテストセットアップ
pub struct ProjectEventTestSetup {
    pub sut:               ProjectEventUseCase,
    pub sender:            MockNotificationSender,
    pub participant_repo:  MockParticipantRepository,
    pub setting_repo:      MockUserSettingRepository,
    pub user_repo:         MockUserRepository,
    pub user_project_repo: MockUserProjectRepository,
}

/// 通知テストビルダー
///
/// # 使用例
///
/// ```ignore
/// use upkoding_notifier::test_utils::NotificationTestBuilder;
///
/// #[tokio::test]
/// async fn test_example() {
///     let builder = NotificationTestBuilder::new();
///     let setup = builder.build_dispatcher();
///     let andi = NotificationTestBuilder::make_user("andi");
///     setup.participant_repo.add_participant(builder.participant(&andi, true));
///
///     let actor = NotificationTestBuilder::make_user("budi");
///     let report = setup.sut.dispatch(&builder.build_event("review_request", &actor)).await;
/// }
/// ```
pub struct NotificationTestBuilder {
    owner:        User,
    user_project: UserProject,
    now:          DateTime<Utc>,
}

impl NotificationTestBuilder {
    /// デフォルト値で新しいビルダーを作成
    pub fn new() -> Self {
        let owner = Self::make_user("siti");
        let user_project = UserProject::new(
            UserProjectId::new(),
            owner.clone(),
            Project::new(ProjectId::new(), "Aplikasi Todo", "aplikasi-todo"),
            UserProjectStatus::InReview,
        );

        Self {
            owner,
            user_project,
            now: Utc::now(),
        }
    }

    /// `{username}@example.com` のユーザーを作成
    pub fn make_user(username: &str) -> User {
        User::new(
            UserId::new(),
            username,
            Email::new(format!("{username}@example.com")).unwrap(),
        )
    }

    /// 取り組みの所有者
    pub fn owner(&self) -> &User {
        &self.owner
    }

    pub fn user_project(&self) -> &UserProject {
        &self.user_project
    }

    /// この取り組みの参加者を作成
    pub fn participant(&self, user: &User, subscribed: bool) -> Participant {
        Participant::new(self.user_project.id().clone(), user.clone(), subscribed)
    }

    /// この取り組みで発生したイベントを作成
    pub fn build_event(&self, type_code: &str, actor: &User) -> ProjectEvent {
        ProjectEvent::new(
            ProjectEventId::new(),
            type_code,
            self.user_project.clone(),
            actor.clone(),
            self.now,
        )
    }

    pub fn dispatcher_settings(&self) -> DispatcherSettings {
        DispatcherSettings {
            from_address: TEST_FROM_ADDRESS.to_string(),
            site_domain:  TEST_SITE_DOMAIN.to_string(),
        }
    }

    /// 正常に送信するモックでディスパッチャを構築
    pub fn build_dispatcher(&self) -> NotificationTestSetup {
        self.build_dispatcher_with_sender(MockNotificationSender::new())
    }

    /// 指定したモック送信でディスパッチャを構築
    pub fn build_dispatcher_with_sender(
        &self,
        sender: MockNotificationSender,
    ) -> NotificationTestSetup {
        let participant_repo = MockParticipantRepository::new();
        let setting_repo = MockUserSettingRepository::new();
        let sut = NotificationDispatcher::new(
            Arc::new(sender.clone()),
            Arc::new(participant_repo.clone()),
            Arc::new(setting_repo.clone()),
            TemplateRenderer::new().unwrap(),
            self.dispatcher_settings(),
        );

        NotificationTestSetup {
            sut,
            sender,
            participant_repo,
            setting_repo,
        }
    }

    /// 取り組みと所有者を登録済みのイベント受信ユースケースを構築
    pub fn build_project_event_usecase(&self) -> ProjectEventTestSetup {
        self.build_project_event_usecase_with_sender(MockNotificationSender::new())
    }

    /// 指定したモック送信でイベント受信ユースケースを構築
    pub fn build_project_event_usecase_with_sender(
        &self,
        sender: MockNotificationSender,
    ) -> ProjectEventTestSetup {
        let NotificationTestSetup {
            sut: dispatcher,
            sender,
            participant_repo,
            setting_repo,
        } = self.build_dispatcher_with_sender(sender);
        let user_repo = MockUserRepository::new();
        let user_project_repo = MockUserProjectRepository::new();
        user_repo.add_user(self.owner.clone());
        user_project_repo.add_user_project(self.user_project.clone());

        let sut = ProjectEventUseCase::new(
            Arc::new(user_project_repo.clone()),
            Arc::new(user_repo.clone()),
            dispatcher,
        );

        ProjectEventTestSetup {
            sut,
            sender,
            participant_repo,
            setting_repo,
            user_repo,
            user_project_repo,
        }
    }
}

impl Default for NotificationTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
