//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリ実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! upkoding-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use upkoding_domain::{
    notification::{EmailMessage, NotificationCategory, NotificationError},
    participant::Participant,
    project::{UserProject, UserProjectId},
    user::{User, UserId},
};

use crate::{
    error::InfraError,
    notification::{BatchDelivery, NotificationSender},
    repository::{
        ParticipantRepository,
        UserProjectRepository,
        UserRepository,
        UserSettingRepository,
    },
};

// ===== MockNotificationSender =====

#[derive(Debug, Clone, Default)]
enum Rejection {
    #[default]
    None,
    All,
    Address(String),
}

/// 送信内容を記録するモック送信
///
/// `failing()` は全メール、`rejecting(address)` は指定した宛先のメールだけ、
/// 記録した上で `SendFailed` を返す。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
    single_calls: Arc<Mutex<Vec<EmailMessage>>>,
    batch_calls:  Arc<Mutex<Vec<Vec<EmailMessage>>>>,
    rejection:    Arc<Mutex<Rejection>>,
}

impl MockNotificationSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// 常に送信失敗を返すモック
    pub fn failing() -> Self {
        Self::with_rejection(Rejection::All)
    }

    /// `address` 宛てのメールだけ送信失敗を返すモック
    pub fn rejecting(address: impl Into<String>) -> Self {
        Self::with_rejection(Rejection::Address(address.into()))
    }

    fn with_rejection(rejection: Rejection) -> Self {
        let sender = Self::default();
        *sender.rejection.lock().unwrap() = rejection;
        sender
    }

    /// `send_email` に渡されたメール
    pub fn single_calls(&self) -> Vec<EmailMessage> {
        self.single_calls.lock().unwrap().clone()
    }

    /// `send_mass_email` に渡されたメールの一覧（呼び出しごと）
    pub fn batch_calls(&self) -> Vec<Vec<EmailMessage>> {
        self.batch_calls.lock().unwrap().clone()
    }

    /// 単発・まとめ送信を合わせた全メール
    pub fn sent_emails(&self) -> Vec<EmailMessage> {
        let mut emails = self.single_calls();
        emails.extend(self.batch_calls().into_iter().flatten());
        emails
    }

    fn result_for(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let rejected = match &*self.rejection.lock().unwrap() {
            Rejection::None => false,
            Rejection::All => true,
            Rejection::Address(address) => email.to.iter().any(|to| to == address),
        };
        if rejected {
            Err(NotificationError::SendFailed("モック送信失敗".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.single_calls.lock().unwrap().push(email.clone());
        self.result_for(email)
    }

    /// 呼び出し単位で記録し、各メールの成否は `send_email` と同じ規則で決める
    async fn send_mass_email(&self, emails: &[EmailMessage]) -> BatchDelivery {
        self.batch_calls.lock().unwrap().push(emails.to_vec());
        let mut delivery = BatchDelivery::default();
        for (index, email) in emails.iter().enumerate() {
            delivery.record(index, self.result_for(email));
        }
        delivery
    }
}

// ===== MockParticipantRepository =====

#[derive(Clone, Default)]
pub struct MockParticipantRepository {
    participants: Arc<Mutex<Vec<Participant>>>,
}

impl MockParticipantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_participant(&self, participant: Participant) {
        self.participants.lock().unwrap().push(participant);
    }
}

#[async_trait]
impl ParticipantRepository for MockParticipantRepository {
    async fn find_subscribed_users(
        &self,
        user_project_id: &UserProjectId,
        exclude_user: &UserId,
    ) -> Result<Vec<User>, InfraError> {
        Ok(self
            .participants
            .lock()
            .unwrap()
            .iter()
            .filter(|p| {
                p.user_project_id() == user_project_id
                    && p.is_subscribed()
                    && p.user().id() != exclude_user
            })
            .map(|p| p.user().clone())
            .collect())
    }
}

// ===== MockUserSettingRepository =====

/// 通知設定のモック
///
/// デフォルトは全カテゴリ有効。`disable()` で個別に無効化する。
#[derive(Clone, Default)]
pub struct MockUserSettingRepository {
    disabled: Arc<Mutex<HashSet<(UserId, NotificationCategory)>>>,
    queries:  Arc<Mutex<Vec<(UserId, NotificationCategory)>>>,
}

impl MockUserSettingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn disable(&self, user_id: &UserId, category: NotificationCategory) {
        self.disabled
            .lock()
            .unwrap()
            .insert((user_id.clone(), category));
    }

    /// 問い合わせ履歴
    pub fn queries(&self) -> Vec<(UserId, NotificationCategory)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserSettingRepository for MockUserSettingRepository {
    async fn is_notification_enabled(
        &self,
        user_id: &UserId,
        category: NotificationCategory,
    ) -> Result<bool, InfraError> {
        self.queries
            .lock()
            .unwrap()
            .push((user_id.clone(), category));
        Ok(!self
            .disabled
            .lock()
            .unwrap()
            .contains(&(user_id.clone(), category)))
    }
}

// ===== MockUserProjectRepository =====

#[derive(Clone, Default)]
pub struct MockUserProjectRepository {
    user_projects: Arc<Mutex<Vec<UserProject>>>,
}

impl MockUserProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user_project(&self, user_project: UserProject) {
        self.user_projects.lock().unwrap().push(user_project);
    }
}

#[async_trait]
impl UserProjectRepository for MockUserProjectRepository {
    async fn find_by_id(&self, id: &UserProjectId) -> Result<Option<UserProject>, InfraError> {
        Ok(self
            .user_projects
            .lock()
            .unwrap()
            .iter()
            .find(|up| up.id() == id)
            .cloned())
    }
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id() == id)
            .cloned())
    }
}
