//! # 取り組みイベント受信ユースケース
//!
//! メインアプリケーションから届いた ID 参照のイベントを、
//! 取り組みと操作者を読み込んだ [`ProjectEvent`] に組み立ててディスパッチする。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use upkoding_domain::{
    project::UserProjectId,
    project_event::{ProjectEvent, ProjectEventId, ProjectEventType},
    user::UserId,
};
use upkoding_infra::repository::{UserProjectRepository, UserRepository};

use super::notification::{DispatchReport, NotificationDispatcher};
use crate::error::NotifierError;

/// 受信イベントの入力
#[derive(Debug, Clone)]
pub struct ReceiveProjectEventInput {
    /// 発行元が付与したイベント ID（未指定なら採番する）
    pub event_id:        Option<ProjectEventId>,
    pub type_code:       String,
    pub user_project_id: UserProjectId,
    pub actor_id:        UserId,
    /// 発生日時（未指定なら受信時刻）
    pub created_at:      Option<DateTime<Utc>>,
}

/// 取り組みイベント受信ユースケース
pub struct ProjectEventUseCase {
    user_project_repo: Arc<dyn UserProjectRepository>,
    user_repo:         Arc<dyn UserRepository>,
    dispatcher:        NotificationDispatcher,
}

impl ProjectEventUseCase {
    pub fn new(
        user_project_repo: Arc<dyn UserProjectRepository>,
        user_repo: Arc<dyn UserRepository>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            user_project_repo,
            user_repo,
            dispatcher,
        }
    }

    /// イベントを受け取り、通知をディスパッチする
    ///
    /// 未知の種別コードはデータベースを参照せずに無視する。
    pub async fn receive(
        &self,
        input: ReceiveProjectEventInput,
    ) -> Result<DispatchReport, NotifierError> {
        if ProjectEventType::classify(&input.type_code).is_none() {
            tracing::debug!(type_code = %input.type_code, "未知のイベント種別を受信");
            return Ok(DispatchReport::ignored(input.type_code));
        }

        let user_project = self
            .user_project_repo
            .find_by_id(&input.user_project_id)
            .await?
            .ok_or_else(|| {
                NotifierError::NotFound(format!(
                    "取り組みが見つかりません: {}",
                    input.user_project_id
                ))
            })?;

        let actor = self
            .user_repo
            .find_by_id(&input.actor_id)
            .await?
            .ok_or_else(|| {
                NotifierError::NotFound(format!("ユーザーが見つかりません: {}", input.actor_id))
            })?;

        let event = ProjectEvent::new(
            input.event_id.unwrap_or_default(),
            input.type_code,
            user_project,
            actor,
            input.created_at.unwrap_or_else(Utc::now),
        );

        Ok(self.dispatcher.dispatch(&event).await?)
    }
}
