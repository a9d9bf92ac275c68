//! # 通知送信
//!
//! メール通知の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationSender` trait でメール送信を抽象化
//! - **3 つの実装**: SMTP（開発用リレー）、Mailgun（本番用）、Noop（ログ出力のみ）
//! - **環境変数切替**: `NOTIFICATION_BACKEND` でランタイム選択
//! - **失敗は呼び出し側で握りつぶす**: 送信実装はエラーを返し、破棄するかはディスパッチャが決める

mod mailgun;
mod noop;
mod smtp;

use async_trait::async_trait;
pub use mailgun::MailgunNotificationSender;
pub use noop::NoopNotificationSender;
pub use smtp::SmtpNotificationSender;
use upkoding_domain::notification::{EmailMessage, NotificationError};

/// まとめ送信の結果
///
/// 1 通の失敗で残りの送信は止めない。失敗はバッチ内の位置と合わせて保持する。
#[derive(Debug, Default)]
pub struct BatchDelivery {
    pub delivered: usize,
    pub failures:  Vec<(usize, NotificationError)>,
}

impl BatchDelivery {
    pub fn attempted(&self) -> usize {
        self.delivered + self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn record(&mut self, index: usize, result: Result<(), NotificationError>) {
        match result {
            Ok(()) => self.delivered += 1,
            Err(e) => self.failures.push((index, e)),
        }
    }
}

/// メール送信トレイト
///
/// 単発送信（send-one）とまとめ送信（send-batch）の 2 操作を持つ。
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// メールを 1 通送信する
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError>;

    /// 複数のメールを先頭から順に送信する
    ///
    /// 途中で失敗しても残りのメールは送信を試みる。
    async fn send_mass_email(&self, emails: &[EmailMessage]) -> BatchDelivery {
        let mut delivery = BatchDelivery::default();
        for (index, email) in emails.iter().enumerate() {
            delivery.record(index, self.send_email(email).await);
        }
        delivery
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;

    use super::*;

    /// 指定した宛先だけ失敗し、試行した宛先を記録する送信
    struct RejectingSender {
        rejected: &'static str,
        attempts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationSender for RejectingSender {
        async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
            let to = email.to.join(",");
            self.attempts.lock().unwrap().push(to.clone());
            if to == self.rejected {
                Err(NotificationError::SendFailed(format!("{to} は受け付けられません")))
            } else {
                Ok(())
            }
        }
    }

    fn message_to(address: &str) -> EmailMessage {
        EmailMessage {
            from:      "UpKoding <upkoding@example.com>".to_string(),
            to:        vec![address.to_string()],
            subject:   "[Proyek] Permintaan review dari @budi".to_string(),
            html_body: "<p>Halo</p>".to_string(),
            text_body: "Halo".to_string(),
        }
    }

    #[tokio::test]
    async fn test_先頭の宛先が失敗しても残りの宛先へ送信を続ける() {
        // Arrange
        let sender = RejectingSender {
            rejected: "bukan-email",
            attempts: Mutex::new(Vec::new()),
        };
        let batch = vec![
            message_to("bukan-email"),
            message_to("andi@example.com"),
            message_to("citra@example.com"),
        ];

        // Act
        let delivery = sender.send_mass_email(&batch).await;

        // Assert
        assert_eq!(
            *sender.attempts.lock().unwrap(),
            vec!["bukan-email", "andi@example.com", "citra@example.com"]
        );
        assert_eq!(delivery.delivered, 2);
        assert_eq!(delivery.attempted(), 3);
        assert!(!delivery.is_complete());
        assert_eq!(delivery.failures.len(), 1);
        assert!(matches!(
            &delivery.failures[0],
            (0, NotificationError::SendFailed(msg)) if msg.contains("bukan-email")
        ));
    }

    #[tokio::test]
    async fn test_全件成功なら失敗は空() {
        let sender = RejectingSender {
            rejected: "bukan-email",
            attempts: Mutex::new(Vec::new()),
        };

        let delivery = sender
            .send_mass_email(&[message_to("andi@example.com"), message_to("citra@example.com")])
            .await;

        assert_eq!(delivery.delivered, 2);
        assert!(delivery.is_complete());
    }
}
