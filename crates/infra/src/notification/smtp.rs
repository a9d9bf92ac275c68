//! SMTP リレー経由の送信
//!
//! TLS なしの平文 SMTP に接続する。開発時の Mailpit や、
//! 同一ネットワーク内の社内リレーを想定している。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Mailbox, Message, MultiPart},
};
use upkoding_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

pub struct SmtpNotificationSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotificationSender {
    pub fn new(host: &str, port: u16) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();
        Self { transport }
    }
}

fn mailbox(role: &str, address: &str) -> Result<Mailbox, NotificationError> {
    address
        .parse()
        .map_err(|e| NotificationError::SendFailed(format!("{role} {address:?} を解釈できません: {e}")))
}

/// テキストと HTML を持つ multipart/alternative を組み立てる
fn to_message(email: &EmailMessage) -> Result<Message, NotificationError> {
    let recipients = email
        .to
        .iter()
        .map(|to| mailbox("宛先", to))
        .collect::<Result<Vec<_>, _>>()?;

    let builder = recipients.into_iter().fold(
        Message::builder()
            .from(mailbox("送信元", &email.from)?)
            .subject(email.subject.as_str()),
        |builder, to| builder.to(to),
    );

    let body = MultiPart::alternative_plain_html(email.text_body.clone(), email.html_body.clone());
    builder
        .multipart(body)
        .map_err(|e| NotificationError::SendFailed(format!("メッセージを組み立てられません: {e}")))
}

#[async_trait]
impl NotificationSender for SmtpNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let message = to_message(email)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| NotificationError::SendFailed(format!("SMTP リレーが拒否しました: {e}")))?;

        tracing::debug!(code = %response.code(), subject = %email.subject, "SMTP 送信完了");
        Ok(())
    }
}
