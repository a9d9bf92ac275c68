//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 通知サービスが返すエラー本文。axum への変換は各サービス側で行い、
//! ここは serde だけに依存する。
//!
//! ```
//! use upkoding_shared::{ErrorResponse, error_response::ProblemKind};
//!
//! let body = ErrorResponse::from_kind(ProblemKind::NotFound, "取り組みが見つかりません");
//! assert_eq!(body.status, 404);
//! assert_eq!(body.error_type, "https://upkoding.id/errors/not-found");
//! ```

use serde::{Deserialize, Serialize};

const ERROR_TYPE_BASE: &str = "https://upkoding.id/errors";

/// 通知サービスが返し得る問題の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    BadRequest,
    NotFound,
    InternalError,
}

impl ProblemKind {
    pub fn status(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::InternalError => 500,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::InternalError => "Internal Server Error",
        }
    }

    /// `type` URI の末尾
    fn slug(self) -> &'static str {
        match self {
            Self::BadRequest => "bad-request",
            Self::NotFound => "not-found",
            Self::InternalError => "internal-error",
        }
    }
}

/// Problem Details 本文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

impl ErrorResponse {
    pub fn from_kind(kind: ProblemKind, detail: impl Into<String>) -> Self {
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{}", kind.slug()),
            title:      kind.title().to_string(),
            status:     kind.status(),
            detail:     detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::from_kind(ProblemKind::BadRequest, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::from_kind(ProblemKind::NotFound, detail)
    }

    /// 500 は原因を本文に含めない（ログにのみ出す）
    pub fn internal_error() -> Self {
        Self::from_kind(ProblemKind::InternalError, "内部エラーが発生しました")
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ProblemKind::BadRequest, 400, "https://upkoding.id/errors/bad-request")]
    #[case(ProblemKind::NotFound, 404, "https://upkoding.id/errors/not-found")]
    #[case(ProblemKind::InternalError, 500, "https://upkoding.id/errors/internal-error")]
    fn test_種類ごとにstatusとtypeが決まる(
        #[case] kind: ProblemKind,
        #[case] status: u16,
        #[case] error_type: &str,
    ) {
        let body = ErrorResponse::from_kind(kind, "detail");

        assert_eq!(body.status, status);
        assert_eq!(body.error_type, error_type);
        assert_eq!(body.title, kind.title());
    }

    #[test]
    fn test_500の本文は固定文言になる() {
        let body = ErrorResponse::internal_error();

        assert_eq!(body.detail, "内部エラーが発生しました");
    }

    #[test]
    fn test_typeフィールド名でシリアライズされる() {
        let json = serde_json::to_value(ErrorResponse::not_found("取り組みが見つかりません")).unwrap();

        assert_eq!(json["type"], "https://upkoding.id/errors/not-found");
        assert_eq!(json["detail"], "取り組みが見つかりません");
        assert!(json.get("error_type").is_none());
    }
}
