//! # ルーター
//!
//! ハンドラとミドルウェアを組み合わせた axum の [`Router`] を構築する。
//!
//! ## エンドポイント
//!
//! - `GET /health` - ヘルスチェック
//! - `POST /internal/project-events` - 取り組みイベントの受信
//!
//! ## ミドルウェア
//!
//! 外側から `SetRequestId` → `Trace` → `PropagateRequestId` の順に適用する。
//! Request ID は UUID v7 で採番し、レスポンスヘッダ `x-request-id` に返す。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use upkoding_shared::observability::{MakeRequestUuidV7, make_request_span};

use crate::handler::{ProjectEventState, health_check, receive_project_event};

/// アプリケーションのルーターを構築する
pub fn build_router(state: Arc<ProjectEventState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/internal/project-events", post(receive_project_event))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
