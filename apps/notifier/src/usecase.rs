//! # ユースケース層
//!
//! 通知サービスのビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと送信実装を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `notification`: 通知ディスパッチャとテンプレートレンダラー
//! - `project_event`: 受信したイベントの解決とディスパッチ

pub mod notification;
pub mod project_event;

pub use project_event::{ProjectEventUseCase, ReceiveProjectEventInput};
