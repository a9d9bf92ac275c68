//! # ログ出力と Request ID
//!
//! - `LOG_FORMAT=json` で 1 行 1 JSON、それ以外は人間向けの整形出力
//! - `RUST_LOG` が無ければ [`DEFAULT_FILTER`] を使う
//! - HTTP リクエストごとに UUID v7 の `x-request-id` を振り、リクエストスパンに載せる

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_FILTER: &str = "info,upkoding=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する。未設定や未知の値は `Pretty`。
    ///
    /// 未知の値はトレーシング初期化前に来るので stderr に警告を出す。
    pub fn from_setting(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("json") => Self::Json,
            None | Some("" | "pretty") => Self::Pretty,
            Some(other) => {
                eprintln!("WARNING: LOG_FORMAT={other:?} は未対応のため pretty で出力します");
                Self::Pretty
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// 起動ログに出すサービス名
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn from_env(service_name: impl Into<String>) -> Self {
        let format = std::env::var("LOG_FORMAT").ok();
        Self {
            service_name: service_name.into(),
            log_format:   LogFormat::from_setting(format.as_deref()),
        }
    }
}

/// グローバル subscriber を設定する。プロセス起動時に一度だけ呼ぶ。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let output = if config.log_format == LogFormat::Json {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().with_target(false).boxed()
    };

    tracing_subscriber::registry().with(filter).with(output).init();

    tracing::info!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}

/// `SetRequestIdLayer` 用。時刻順に並ぶ UUID v7 を発行する。
#[cfg(feature = "observability")]
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

#[cfg(feature = "observability")]
impl tower_http::request_id::MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(
        &mut self,
        _request: &http::Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let value = http::HeaderValue::try_from(uuid::Uuid::now_v7().to_string()).ok()?;
        Some(tower_http::request_id::RequestId::new(value))
    }
}

/// `TraceLayer::make_span_with` 用のリクエストスパン
///
/// Request ID は先行する `SetRequestIdLayer` が付けたものを読む。
#[cfg(feature = "observability")]
pub fn make_request_span<B>(request: &http::Request<B>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id,
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Some("json"), LogFormat::Json)]
    #[case(Some(" json "), LogFormat::Json)]
    #[case(Some("pretty"), LogFormat::Pretty)]
    #[case(Some(""), LogFormat::Pretty)]
    #[case(None, LogFormat::Pretty)]
    #[case(Some("JSON"), LogFormat::Pretty)]
    #[case(Some("logfmt"), LogFormat::Pretty)]
    fn test_log_formatの解釈(#[case] value: Option<&str>, #[case] expected: LogFormat) {
        assert_eq!(LogFormat::from_setting(value), expected);
    }

    #[cfg(feature = "observability")]
    #[test]
    fn test_request_idはuuid_v7になる() {
        use tower_http::request_id::MakeRequestId;

        let request = http::Request::builder().body(()).unwrap();

        let id = MakeRequestUuidV7.make_request_id(&request).unwrap();

        let uuid = uuid::Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();
        assert_eq!(uuid.get_version(), Some(uuid::Version::SortRand));
    }
}
