//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成時に検出される制約違反を表現する。
//! 保存済みの行がこれに該当した場合、インフラ層は `InvalidRow` として扱う。

use derive_more::Display;
use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// メールアドレスが宛先として使えない
    #[error("メールアドレスが不正です（{reason}）: {value:?}")]
    InvalidEmail {
        value:  String,
        reason: EmailRejection,
    },
}

/// メールアドレスを拒否した理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EmailRejection {
    #[display("空文字列")]
    Empty,
    #[display("local@domain の形式ではない")]
    Malformed,
    #[display("255 文字を超えている")]
    TooLong,
}
