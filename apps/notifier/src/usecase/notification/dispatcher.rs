//! # 通知ディスパッチャ
//!
//! 取り組みイベントを分類し、宛先の解決 → 通知設定の確認 → レンダリング → 送信を行う。
//!
//! ## 処理の流れ
//!
//! | 宛先区分 | 受信者 | 送信操作 |
//! |---------|-------|---------|
//! | 参加者（ファンアウト） | 購読中の参加者から操作者を除いた全員 | `send_mass_email` を 1 回 |
//! | 所有者 | 取り組みの所有者 | `send_email` を 1 回 |
//!
//! ## 設計方針
//!
//! - **未知のイベント種別は無視**: エラーにせず、何も送らない
//! - **送信失敗は握りつぶす**: ログに記録し、呼び出し元には成功として返す
//! - **1 通の失敗で他の受信者を巻き込まない**: まとめ送信は最後まで試行し、届いた数を報告する
//! - **レンダリング/リポジトリの失敗は伝播**: 送信前に失敗した場合は何も送らない
//! - **受信者ごとに新しいコンテキスト**: 共通コンテキストを借用し、`to_user` を束縛する

use std::sync::Arc;

use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;
use upkoding_domain::{
    notification::{
        Audience,
        EmailMessage,
        NotificationCategory,
        NotificationContext,
        NotificationError,
        RecipientContext,
    },
    project_event::ProjectEvent,
    user::User,
};
use upkoding_infra::{
    InfraError,
    notification::{BatchDelivery, NotificationSender},
    repository::{ParticipantRepository, UserSettingRepository},
};
use upkoding_shared::{
    event_log::{Outcome, error_tag},
    log_business_event,
};

use super::TemplateRenderer;

/// ディスパッチャの設定値
#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    /// 送信元アドレス（例: `UpKoding <upkoding@example.com>`）
    pub from_address: String,
    /// サイトのドメイン（メール内リンク用）
    pub site_domain:  String,
}

/// 送信結果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Delivery {
    /// 受信者がいない、または未知のイベント種別のため送信しなかった
    Skipped,
    /// 全員に送信できた
    Sent,
    /// 一部の受信者にだけ送信できた
    Partial,
    /// 誰にも送信できなかった（ログのみ、呼び出し元には伝播しない）
    Failed,
}

/// ディスパッチ結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    /// 受け取った種別コード
    pub event_type: String,
    /// 分類された通知カテゴリ（未知の種別は `None`）
    pub category:   Option<NotificationCategory>,
    /// 送信対象になった受信者数
    pub recipients: usize,
    /// 実際に送信できた数
    pub delivered:  usize,
    pub delivery:   Delivery,
}

impl DispatchReport {
    /// 未知の種別コードに対する結果
    pub fn ignored(type_code: impl Into<String>) -> Self {
        Self {
            event_type: type_code.into(),
            category:   None,
            recipients: 0,
            delivered:  0,
            delivery:   Delivery::Skipped,
        }
    }
}

/// ディスパッチエラー
///
/// 送信前の段階で失敗した場合のみ返す。送信自体の失敗は含まない。
#[derive(Debug, Error)]
pub enum DispatchError {
    /// 参加者・通知設定の参照に失敗
    #[error("リポジトリの参照に失敗: {0}")]
    Repository(#[from] InfraError),

    /// テンプレートレンダリングに失敗
    #[error(transparent)]
    Template(NotificationError),
}

/// 通知ディスパッチャ
///
/// 1 イベントにつき送信操作は高々 1 回。受信者は 1 イベント内で重複しない。
pub struct NotificationDispatcher {
    sender:            Arc<dyn NotificationSender>,
    participant_repo:  Arc<dyn ParticipantRepository>,
    setting_repo:      Arc<dyn UserSettingRepository>,
    template_renderer: TemplateRenderer,
    settings:          DispatcherSettings,
}

impl NotificationDispatcher {
    pub fn new(
        sender: Arc<dyn NotificationSender>,
        participant_repo: Arc<dyn ParticipantRepository>,
        setting_repo: Arc<dyn UserSettingRepository>,
        template_renderer: TemplateRenderer,
        settings: DispatcherSettings,
    ) -> Self {
        Self {
            sender,
            participant_repo,
            setting_repo,
            template_renderer,
            settings,
        }
    }

    /// イベントに応じた通知を送信する
    ///
    /// 送信失敗は [`Delivery::Failed`] / [`Delivery::Partial`] として報告し、エラーにはしない。
    #[tracing::instrument(
        skip_all,
        fields(event_id = %event.id(), event_type = event.type_code())
    )]
    pub async fn dispatch(&self, event: &ProjectEvent) -> Result<DispatchReport, DispatchError> {
        let Some(event_type) = event.event_type() else {
            tracing::debug!("未知のイベント種別のため通知しない");
            return Ok(DispatchReport::ignored(event.type_code()));
        };
        let category = event_type.category();
        let context = NotificationContext::new(
            &self.settings.site_domain,
            event.actor(),
            event.user_project(),
        );

        match category.audience() {
            Audience::Participants => self.notify_participants(event, category, &context).await,
            Audience::Owner => self.notify_owner(event, category, &context).await,
        }
    }

    /// 購読中の参加者全員（操作者を除く）へまとめて送信する
    async fn notify_participants(
        &self,
        event: &ProjectEvent,
        category: NotificationCategory,
        context: &NotificationContext<'_>,
    ) -> Result<DispatchReport, DispatchError> {
        let actor_id = event.actor().id();
        let candidates = self
            .participant_repo
            .find_subscribed_users(event.user_project().id(), actor_id)
            .await?
            .into_iter()
            .filter(|user| user.id() != actor_id)
            .unique_by(|user| user.id().clone())
            .collect::<Vec<_>>();

        let mut messages = Vec::with_capacity(candidates.len());
        for to_user in &candidates {
            if !self
                .setting_repo
                .is_notification_enabled(to_user.id(), category)
                .await?
            {
                continue;
            }
            let message =
                self.render_message(category, event.actor(), &context.for_recipient(to_user))?;
            messages.push(message);
        }

        if messages.is_empty() {
            return Ok(self.skipped(event, category));
        }

        let delivery = self.sender.send_mass_email(&messages).await;
        Ok(self.finish(event, category, &messages, delivery))
    }

    /// 取り組みの所有者へ 1 通送信する
    async fn notify_owner(
        &self,
        event: &ProjectEvent,
        category: NotificationCategory,
        context: &NotificationContext<'_>,
    ) -> Result<DispatchReport, DispatchError> {
        let owner = event.user_project().owner();
        if !self
            .setting_repo
            .is_notification_enabled(owner.id(), category)
            .await?
        {
            return Ok(self.skipped(event, category));
        }

        let message =
            self.render_message(category, event.actor(), &context.for_recipient(owner))?;
        let mut delivery = BatchDelivery::default();
        delivery.record(0, self.sender.send_email(&message).await);
        Ok(self.finish(event, category, std::slice::from_ref(&message), delivery))
    }

    fn render_message(
        &self,
        category: NotificationCategory,
        actor: &User,
        context: &RecipientContext<'_>,
    ) -> Result<EmailMessage, DispatchError> {
        let body = self
            .template_renderer
            .render(category, context)
            .map_err(DispatchError::Template)?;

        Ok(EmailMessage {
            from:      self.settings.from_address.clone(),
            to:        vec![context.to_user.email().to_string()],
            subject:   category.subject(actor),
            html_body: body.html,
            text_body: body.text,
        })
    }

    fn skipped(&self, event: &ProjectEvent, category: NotificationCategory) -> DispatchReport {
        let category_str: &str = category.into();
        log_business_event!(
            Outcome::Skipped,
            event.entity_id = %event.user_project().id(),
            event.actor_id = %event.actor().id(),
            notification.category = category_str,
            "通知対象の受信者がいないため送信しない"
        );

        DispatchReport {
            event_type: event.type_code().to_string(),
            category: Some(category),
            recipients: 0,
            delivered: 0,
            delivery: Delivery::Skipped,
        }
    }

    fn finish(
        &self,
        event: &ProjectEvent,
        category: NotificationCategory,
        messages: &[EmailMessage],
        delivery: BatchDelivery,
    ) -> DispatchReport {
        let category_str: &str = category.into();
        for (index, error) in &delivery.failures {
            let to = messages.get(*index).map(|m| m.to.join(",")).unwrap_or_default();
            tracing::error!(
                error.category = error_tag::EXTERNAL_SERVICE,
                error.kind = error_tag::MAIL_TRANSPORT,
                to = %to,
                error = %error,
                "通知メール送信失敗"
            );
        }

        let status = match (delivery.delivered, delivery.is_complete()) {
            (_, true) => Delivery::Sent,
            (0, false) => Delivery::Failed,
            (_, false) => Delivery::Partial,
        };
        let outcome = if status == Delivery::Sent {
            Outcome::Sent
        } else {
            Outcome::Failed
        };
        log_business_event!(
            outcome,
            event.entity_id = %event.user_project().id(),
            event.actor_id = %event.actor().id(),
            notification.category = category_str,
            notification.recipients = messages.len(),
            notification.delivered = delivery.delivered,
            "通知メール送信結果"
        );

        DispatchReport {
            event_type: event.type_code().to_string(),
            category: Some(category),
            recipients: messages.len(),
            delivered: delivery.delivered,
            delivery: status,
        }
    }
}
