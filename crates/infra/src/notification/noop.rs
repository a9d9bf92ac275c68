//! 送信しない実装
//!
//! `NOTIFICATION_BACKEND=noop`（既定値）で使う。宛先と件名を info で、
//! テキスト本文を debug で出すので、ローカルでは `RUST_LOG=debug` で本文まで確認できる。

use async_trait::async_trait;
use upkoding_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotificationSender;

#[async_trait]
impl NotificationSender for NoopNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(to = ?email.to, subject = %email.subject, "送信せずに破棄");
        tracing::debug!(text_body = %email.text_body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_for(username: &str) -> EmailMessage {
        EmailMessage {
            from:      "UpKoding <upkoding@example.com>".to_string(),
            to:        vec![format!("{username}@example.com")],
            subject:   "[Proyek] Pesan dari @budi".to_string(),
            html_body: format!("<p>Halo {username}</p>"),
            text_body: format!("Halo {username}"),
        }
    }

    #[tokio::test]
    async fn test_まとめ送信は全件を成功として数える() {
        let batch: Vec<_> = ["siti", "andi", "citra"].into_iter().map(message_for).collect();

        let delivery = NoopNotificationSender.send_mass_email(&batch).await;

        assert_eq!(delivery.delivered, 3);
        assert!(delivery.is_complete());
    }

    #[tokio::test]
    async fn test_空のまとめ送信は0件() {
        let delivery = NoopNotificationSender.send_mass_email(&[]).await;

        assert_eq!(delivery.attempted(), 0);
    }
}
