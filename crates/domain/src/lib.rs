//! # UpKoding ドメイン層
//!
//! プロジェクト通知に必要なドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: User, UserProject）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: Email, NotificationCategory）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! notifier → infra → domain
//! ```
//!
//! ドメイン層は DB やメール送信などのインフラには一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`user`] - ユーザーとメールアドレス
//! - [`project`] - プロジェクトとユーザーの取り組み（UserProject）
//! - [`participant`] - 取り組みの購読者
//! - [`project_event`] - 取り組みの状態変化イベント
//! - [`notification`] - 通知カテゴリ、メールメッセージ、テンプレートコンテキスト
//!
//! ## 使用例
//!
//! ```rust
//! use upkoding_domain::project_event::ProjectEventType;
//!
//! let event_type = ProjectEventType::classify("review_request");
//! assert_eq!(event_type, Some(ProjectEventType::ReviewRequest));
//! assert_eq!(ProjectEventType::classify("unknown"), None);
//! ```

#[macro_use]
mod macros;

pub mod error;
pub mod notification;
pub mod participant;
pub mod project;
pub mod project_event;
pub mod user;

pub use error::{DomainError, EmailRejection};
