//! # UpKoding インフラ層
//!
//! 通知サービスが利用する外部システムとの接続・通信を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理
//! - **リポジトリ実装**: 参加者、ユーザー設定、取り組み、ユーザーの読み取り
//! - **メール送信**: SMTP / Mailgun / Noop の 3 実装
//!
//! ## 依存関係
//!
//! ```text
//! notifier → infra → domain
//!              └──→ shared（ログのタグ定数のみ）
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`notification`] - メール送信トレイトと実装
//! - [`repository`] - リポジトリトレイトと PostgreSQL 実装
//! - `mock` - テスト用インメモリ実装（`test-utils` feature）

pub mod db;
pub mod error;
pub mod notification;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use error::InfraError;
