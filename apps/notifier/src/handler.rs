//! # HTTP ハンドラ
//!
//! リクエストの形だけを検証し、中身はユースケースに渡す。

pub mod health;
pub mod project_event;

pub use health::health_check;
pub use project_event::{ProjectEventRequest, ProjectEventState, receive_project_event};
