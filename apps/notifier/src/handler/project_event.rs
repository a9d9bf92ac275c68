//! # 取り組みイベントハンドラ
//!
//! メインアプリケーションがトランザクションのコミット後に発行するイベントを受け取る。
//!
//! ## エンドポイント
//!
//! - `POST /internal/project-events` - イベントを受信し、通知をディスパッチする
//!
//! ## レスポンス
//!
//! - `202 Accepted`: ディスパッチ結果（送信失敗も含む）
//! - `400 Bad Request`: 種別コードが空
//! - `404 Not Found`: 取り組みまたは操作者が存在しない
//! - `500 Internal Server Error`: データベース/テンプレートのエラー

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use upkoding_domain::project_event::ProjectEventId;
use uuid::Uuid;

use crate::{
    error::NotifierError,
    usecase::{ProjectEventUseCase, ReceiveProjectEventInput},
};

/// 取り組みイベント API の共有状態
pub struct ProjectEventState {
    pub usecase: ProjectEventUseCase,
}

/// イベント受信リクエスト
#[derive(Debug, Deserialize)]
pub struct ProjectEventRequest {
    pub event_id:        Option<Uuid>,
    /// 種別コード（例: `review_request`）
    pub event_type:      String,
    pub user_project_id: Uuid,
    pub actor_id:        Uuid,
    pub created_at:      Option<DateTime<Utc>>,
}

/// POST /internal/project-events
pub async fn receive_project_event(
    State(state): State<Arc<ProjectEventState>>,
    Json(req): Json<ProjectEventRequest>,
) -> Result<impl IntoResponse, NotifierError> {
    let type_code = req.event_type.trim();
    if type_code.is_empty() {
        return Err(NotifierError::BadRequest("event_type は必須です".to_string()));
    }

    let input = ReceiveProjectEventInput {
        event_id:        req.event_id.map(ProjectEventId::from),
        type_code:       type_code.to_string(),
        user_project_id: req.user_project_id.into(),
        actor_id:        req.actor_id.into(),
        created_at:      req.created_at,
    };

    let report = state.usecase.receive(input).await?;

    Ok((StatusCode::ACCEPTED, Json(report)))
}
