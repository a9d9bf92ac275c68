//! # 通知サービス設定
//!
//! 環境変数から通知サービスの設定を読み込む。
//!
//! 読み込みは [`NotifierConfig::from_lookup`] に集約し、
//! テストでは環境変数の代わりに任意のルックアップ関数を渡す。

use std::{env, fmt};

use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 値の形式が不正
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// 通知サービスの設定
#[derive(Debug, Clone)]
pub struct NotifierConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
    /// 通知設定
    pub notification: NotificationConfig,
}

/// 通知機能の設定
#[derive(Debug, Clone)]
pub struct NotificationConfig {
    /// 送信バックエンド
    pub backend:      MailBackend,
    /// 送信元アドレス
    pub from_address: String,
    /// サイトのドメイン（メール内リンク用）
    pub site_domain:  String,
}

/// 送信バックエンド
///
/// `NOTIFICATION_BACKEND` 環境変数で切り替える:
/// - `smtp`: Mailpit（開発）/ SMTP リレー経由で送信
/// - `mailgun`: Mailgun HTTP API 経由で送信（本番）
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailBackend {
    Smtp { host: String, port: u16 },
    Mailgun(MailgunConfig),
    Noop,
}

/// Mailgun の接続設定
#[derive(Clone, PartialEq, Eq)]
pub struct MailgunConfig {
    pub api_base:      String,
    pub sender_domain: String,
    pub api_key:       String,
}

impl fmt::Debug for MailgunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailgunConfig")
            .field("api_base", &self.api_base)
            .field("sender_domain", &self.sender_domain)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl NotifierConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// ルックアップ関数から設定を読み込む
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            host:         lookup("NOTIFIER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port:         parse_port(
                "NOTIFIER_PORT",
                &lookup("NOTIFIER_PORT").ok_or(ConfigError::Missing("NOTIFIER_PORT"))?,
            )?,
            database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            notification: NotificationConfig::from_lookup(&lookup)?,
        })
    }
}

impl NotificationConfig {
    fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_name = lookup("NOTIFICATION_BACKEND").unwrap_or_else(|| "noop".to_string());
        let backend = match backend_name.as_str() {
            "smtp" => MailBackend::Smtp {
                host: lookup("SMTP_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_port(
                    "SMTP_PORT",
                    &lookup("SMTP_PORT").unwrap_or_else(|| "1025".to_string()),
                )?,
            },
            "mailgun" => MailBackend::Mailgun(MailgunConfig {
                api_base:      lookup("MAILGUN_API_BASE")
                    .unwrap_or_else(|| "https://api.mailgun.net".to_string()),
                sender_domain: lookup("MAILGUN_SENDER_DOMAIN")
                    .ok_or(ConfigError::Missing("MAILGUN_SENDER_DOMAIN"))?,
                api_key:       lookup("MAILGUN_API_KEY")
                    .ok_or(ConfigError::Missing("MAILGUN_API_KEY"))?,
            }),
            "noop" => MailBackend::Noop,
            _ => {
                return Err(ConfigError::Invalid {
                    name:  "NOTIFICATION_BACKEND",
                    value: backend_name,
                });
            }
        };

        Ok(Self {
            backend,
            from_address: lookup("DEFAULT_EMAIL_FROM")
                .unwrap_or_else(|| "UpKoding <upkoding@example.com>".to_string()),
            site_domain: lookup("SITE_DOMAIN").unwrap_or_else(|| "localhost:8000".to_string()),
        })
    }
}

fn parse_port(name: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
