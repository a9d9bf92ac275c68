//! Mailgun 通知送信実装
//!
//! Mailgun の HTTP API（`POST /v3/{domain}/messages`）を reqwest で呼び出す。
//! 本番環境で使用する。

use async_trait::async_trait;
use upkoding_domain::notification::{EmailMessage, NotificationError};

use super::NotificationSender;

/// Mailgun 通知送信
pub struct MailgunNotificationSender {
    client:   reqwest::Client,
    api_base: String,
    domain:   String,
    api_key:  String,
}

impl MailgunNotificationSender {
    /// 新しい Mailgun 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `api_base`: API のベース URL（例: `https://api.mailgun.net`、EU リージョンは `https://api.eu.mailgun.net`）
    /// - `domain`: Mailgun の送信ドメイン
    /// - `api_key`: Mailgun の API キー
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        domain: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            domain: domain.into(),
            api_key: api_key.into(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/v3/{}/messages",
            self.api_base.trim_end_matches('/'),
            self.domain
        )
    }
}

impl std::fmt::Debug for MailgunNotificationSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailgunNotificationSender")
            .field("api_base", &self.api_base)
            .field("domain", &self.domain)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Mailgun API に送るフォームフィールド
///
/// 宛先が複数の場合は `to` を繰り返す。
fn form_fields(email: &EmailMessage) -> Vec<(&'static str, &str)> {
    let mut fields = vec![("from", email.from.as_str())];
    fields.extend(email.to.iter().map(|to| ("to", to.as_str())));
    fields.push(("subject", email.subject.as_str()));
    fields.push(("text", email.text_body.as_str()));
    fields.push(("html", email.html_body.as_str()));
    fields
}

#[async_trait]
impl NotificationSender for MailgunNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        self.client
            .post(self.messages_url())
            .basic_auth("api", Some(&self.api_key))
            .form(&form_fields(email))
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("Mailgun 送信失敗: {e}")))?
            .error_for_status()
            .map_err(|e| NotificationError::SendFailed(format!("Mailgun 応答エラー: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_sender(api_base: &str) -> MailgunNotificationSender {
        MailgunNotificationSender::new(
            reqwest::Client::new(),
            api_base,
            "mg.upkoding.id",
            "key-secret",
        )
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MailgunNotificationSender>();
    }

    #[test]
    fn messages_urlはドメインを含むエンドポイントを返す() {
        assert_eq!(
            make_sender("https://api.mailgun.net").messages_url(),
            "https://api.mailgun.net/v3/mg.upkoding.id/messages"
        );
        assert_eq!(
            make_sender("https://api.eu.mailgun.net/").messages_url(),
            "https://api.eu.mailgun.net/v3/mg.upkoding.id/messages"
        );
    }

    #[test]
    fn form_fieldsは宛先ごとにtoを繰り返す() {
        let email = EmailMessage {
            from:      "UpKoding <upkoding@example.com>".to_string(),
            to:        vec!["siti@example.com".to_string(), "andi@example.com".to_string()],
            subject:   "[Proyek] Pesan dari @budi".to_string(),
            html_body: "<p>Halo</p>".to_string(),
            text_body: "Halo".to_string(),
        };

        let fields = form_fields(&email);

        assert_eq!(
            fields,
            vec![
                ("from", "UpKoding <upkoding@example.com>"),
                ("to", "siti@example.com"),
                ("to", "andi@example.com"),
                ("subject", "[Proyek] Pesan dari @budi"),
                ("text", "Halo"),
                ("html", "<p>Halo</p>"),
            ]
        );
    }

    #[test]
    fn debug出力でapi_keyがマスクされる() {
        let debug = format!("{:?}", make_sender("https://api.mailgun.net"));

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("key-secret"));
    }
}
