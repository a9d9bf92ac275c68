//! # インフラ層エラー
//!
//! リポジトリが返すエラー。発生地点のスパンを [`SpanTrace`] として持ち運び、
//! ハンドラでログに出すときにどのクエリで失敗したかを辿れるようにする。
//!
//! 生成は必ず [`InfraError::from_kind`] を経由する（`From<sqlx::Error>` も同様）。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;
use upkoding_domain::DomainError;
use uuid::Uuid;

/// リポジトリ層のエラー
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

#[derive(Debug, Error)]
pub enum InfraErrorKind {
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// 保存済みの列の値をドメイン型に変換できない
    #[error("{column} の値が不正です (id={row_id}): {reason}")]
    InvalidRow {
        column: &'static str,
        row_id: Uuid,
        reason: String,
        #[source]
        source: Option<DomainError>,
    },

    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    fn from_kind(kind: InfraErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }

    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// ドメインの検証で弾かれた列
    pub fn rejected_row(column: &'static str, row_id: Uuid, source: DomainError) -> Self {
        Self::from_kind(InfraErrorKind::InvalidRow {
            column,
            row_id,
            reason: source.to_string(),
            source: Some(source),
        })
    }

    /// ドメイン側にエラー型がない列（文字列 enum など）
    pub fn unknown_value(column: &'static str, row_id: Uuid, value: &str) -> Self {
        Self::from_kind(InfraErrorKind::InvalidRow {
            column,
            row_id,
            reason: format!("未知の値 {value:?}"),
            source: None,
        })
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::from_kind(InfraErrorKind::Unexpected(msg.into()))
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SpanTrace の Debug は冗長なので Display で出す
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &format_args!("{}", self.span_trace))
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self::from_kind(InfraErrorKind::Database(source))
    }
}
