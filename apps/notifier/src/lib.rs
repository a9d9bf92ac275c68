//! # UpKoding 通知サービス
//!
//! 取り組み（UserProject）のイベントを受け取り、関係者へメール通知を送る。
//!
//! ## モジュール構成
//!
//! - [`app`] - ルーター構築
//! - [`config`] - 環境変数からの設定読み込み
//! - [`error`] - サービス固有エラーと HTTP レスポンス変換
//! - [`handler`] - HTTP ハンドラ
//! - [`usecase`] - 通知ディスパッチとイベント受信

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

// テストユーティリティ（内部実装、ドキュメントからは隠す）
#[cfg(any(test, feature = "test-utils"))]
#[doc(hidden)]
pub mod test_utils;
