//! # 接続プール
//!
//! テーブルの所有とマイグレーションはメインの Web アプリケーション側にある。
//! 通知サービスは参照クエリしか発行しないため、プールは小さめにしている。

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// 起動時に一度だけ作り、リポジトリ間で共有する
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;

    tracing::debug!(max_connections = MAX_CONNECTIONS, "DB 接続プールを作成");
    Ok(pool)
}
