//! # 通知イベントの構造化ログ
//!
//! 1 件のディスパッチにつき 1 行、結果を [`Outcome`] 付きで出す。
//! JSON 出力では次のように絞り込める:
//!
//! ```text
//! jq 'select(.["event.kind"] == "business_event" and .["event.result"] == "failure")'
//! ```
//!
//! エラーログの `error.category` / `error.kind` には [`error_tag`] の値を使う。

/// `event.kind` の固定値
pub const BUSINESS_EVENT: &str = "business_event";

/// `event.category` の固定値
pub const NOTIFICATION: &str = "notification";

/// `event.entity_type` の固定値（イベントは常に取り組み単位）
pub const USER_PROJECT: &str = "user_project";

/// ディスパッチの結末
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Failed,
    Skipped,
}

impl Outcome {
    /// `event.action`
    pub fn action(self) -> &'static str {
        match self {
            Self::Sent => "notification.sent",
            Self::Failed => "notification.failed",
            Self::Skipped => "notification.skipped",
        }
    }

    /// `event.result`
    pub fn result(self) -> &'static str {
        match self {
            Self::Sent => "success",
            Self::Failed => "failure",
            Self::Skipped => "skipped",
        }
    }
}

/// 通知のビジネスイベントを info レベルで出す。
///
/// 第 1 引数に [`Outcome`]、続けて `tracing::info!` と同じ形式で
/// 追加フィールドとメッセージを渡す。
///
/// ```ignore
/// log_business_event!(
///     Outcome::Sent,
///     event.entity_id = %user_project_id,
///     notification.recipients = 2,
///     "通知メール送信成功"
/// );
/// ```
#[macro_export]
macro_rules! log_business_event {
    ($outcome:expr, $($fields:tt)+) => {{
        let outcome: $crate::event_log::Outcome = $outcome;
        ::tracing::info!(
            event.kind = $crate::event_log::BUSINESS_EVENT,
            event.category = $crate::event_log::NOTIFICATION,
            event.entity_type = $crate::event_log::USER_PROJECT,
            event.action = outcome.action(),
            event.result = outcome.result(),
            $($fields)+
        )
    }};
}

/// エラーログのタグ
pub mod error_tag {
    /// `error.category`: DB など自前のインフラ
    pub const INFRASTRUCTURE: &str = "infrastructure";
    /// `error.category`: SMTP リレーや Mailgun
    pub const EXTERNAL_SERVICE: &str = "external_service";

    pub const DATABASE: &str = "database";
    /// 保存済みの行をドメイン型に変換できない
    pub const INVALID_ROW: &str = "invalid_row";
    pub const TEMPLATE: &str = "template";
    pub const MAIL_TRANSPORT: &str = "mail_transport";
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Outcome::Sent, "notification.sent", "success")]
    #[case(Outcome::Failed, "notification.failed", "failure")]
    #[case(Outcome::Skipped, "notification.skipped", "skipped")]
    fn test_結末ごとにactionとresultが決まる(
        #[case] outcome: Outcome,
        #[case] action: &str,
        #[case] result: &str,
    ) {
        assert_eq!(outcome.action(), action);
        assert_eq!(outcome.result(), result);
    }

    #[test]
    fn test_マクロは購読者なしでも呼び出せる() {
        let user_project_id = "0190a5c4-0000-7000-8000-000000000000";

        log_business_event!(
            Outcome::Skipped,
            event.entity_id = user_project_id,
            "通知対象の受信者がいない"
        );
    }
}
