//! # ユーザー
//!
//! 通知の送信者・受信者となるユーザーを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`User`] | ユーザー | イベントの操作者、または通知の受信者 |
//! | [`Email`] | メールアドレス | 通知の宛先 |
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use upkoding_domain::user::{Email, User, UserId};
//!
//! let user = User::new(UserId::new(), "budi", Email::new("budi@example.com")?);
//! assert_eq!(user.handle(), "@budi");
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, EmailRejection};

const MAX_EMAIL_LEN: usize = 255;

define_uuid_id! {
    /// ユーザー ID（一意識別子）
    pub struct UserId;
}

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        let rejection = if value.is_empty() {
            Some(EmailRejection::Empty)
        } else if !is_local_at_domain(&value) {
            Some(EmailRejection::Malformed)
        } else if value.len() > MAX_EMAIL_LEN {
            Some(EmailRejection::TooLong)
        } else {
            None
        };

        match rejection {
            Some(reason) => Err(DomainError::InvalidEmail { value, reason }),
            None => Ok(Self(value)),
        }
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_local_at_domain(value: &str) -> bool {
    value
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        })
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーエンティティ
///
/// アカウント管理はメインの Web アプリケーションが担当し、
/// ここでは通知に必要な属性だけを読み取る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    id:       UserId,
    username: String,
    email:    Email,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>, email: Email) -> Self {
        Self {
            id,
            username: username.into(),
            email,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    /// 件名などに埋め込むハンドル（`@username`）
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }
}
