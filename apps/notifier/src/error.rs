//! # 通知サービス エラー定義
//!
//! 通知サービス固有のエラーと、HTTP レスポンスへの変換を定義する。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use upkoding_infra::InfraError;
use upkoding_shared::{ErrorResponse, event_log::error_tag};

use crate::usecase::notification::DispatchError;

/// 通知サービスで発生するエラー
#[derive(Debug, Error)]
pub enum NotifierError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 不正なリクエスト
    #[error("不正なリクエスト: {0}")]
    BadRequest(String),

    /// データベースエラー
    #[error("データベースエラー: {0}")]
    Database(#[from] InfraError),

    /// テンプレートレンダリングエラー
    #[error("テンプレートエラー: {0}")]
    Template(String),
}

impl From<DispatchError> for NotifierError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::Repository(e) => Self::Database(e),
            DispatchError::Template(e) => Self::Template(e.to_string()),
        }
    }
}

impl IntoResponse for NotifierError {
    fn into_response(self) -> Response {
        let body = match &self {
            NotifierError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
            NotifierError::BadRequest(msg) => ErrorResponse::bad_request(msg.clone()),
            NotifierError::Database(e) => {
                tracing::error!(
                    error.category = error_tag::INFRASTRUCTURE,
                    error.kind = error_tag::DATABASE,
                    "データベースエラー: {}\n{}",
                    e,
                    e.span_trace()
                );
                ErrorResponse::internal_error()
            }
            NotifierError::Template(msg) => {
                tracing::error!(
                    error.category = error_tag::INFRASTRUCTURE,
                    error.kind = error_tag::TEMPLATE,
                    "テンプレートエラー: {}",
                    msg
                );
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}
