//! # 通知ユースケース
//!
//! 取り組みイベントに伴うメール通知の宛先解決・生成・送信を統合する。
//!
//! ## モジュール構成
//!
//! - [`template_renderer`] - tera テンプレートエンジンによる本文生成
//! - [`dispatcher`] - 宛先解決 + 通知設定の確認 + 送信の統合

pub mod dispatcher;
pub mod template_renderer;

pub use dispatcher::{
    Delivery,
    DispatchError,
    DispatchReport,
    DispatcherSettings,
    NotificationDispatcher,
};
pub use template_renderer::{RenderedBody, TemplateRenderer};
