//! # UpKoding 通知サービス サーバー
//!
//! メインアプリケーションから取り組みイベントを受け取り、メール通知を送信する。
//!
//! ## 起動方法
//!
//! ```bash
//! NOTIFIER_PORT=14000 DATABASE_URL=postgres://... cargo run -p upkoding-notifier
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `NOTIFIER_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `NOTIFIER_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `NOTIFICATION_BACKEND` | No | `smtp` / `mailgun` / `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP リレー（デフォルト: `localhost:1025`） |
//! | `MAILGUN_API_KEY` / `MAILGUN_SENDER_DOMAIN` | mailgun 時 | Mailgun の認証情報 |
//! | `MAILGUN_API_BASE` | No | Mailgun API のベース URL |
//! | `DEFAULT_EMAIL_FROM` | No | 送信元アドレス |
//! | `SITE_DOMAIN` | No | メール内リンクのドメイン（デフォルト: `localhost:8000`） |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログレベル（デフォルト: `info,upkoding=debug`） |

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context as _;
use tokio::net::TcpListener;
use upkoding_infra::{
    db,
    notification::{
        MailgunNotificationSender,
        NoopNotificationSender,
        NotificationSender,
        SmtpNotificationSender,
    },
    repository::{
        PostgresParticipantRepository,
        PostgresUserProjectRepository,
        PostgresUserRepository,
        PostgresUserSettingRepository,
    },
};
use upkoding_notifier::{
    app::build_router,
    config::{MailBackend, NotifierConfig},
    handler::ProjectEventState,
    usecase::{
        ProjectEventUseCase,
        notification::{DispatcherSettings, NotificationDispatcher, TemplateRenderer},
    },
};
use upkoding_shared::observability::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let tracing_config = TracingConfig::from_env("notifier");
    init_tracing(&tracing_config);

    let config = NotifierConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        service = %tracing_config.service_name,
        "通知サービスを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    let sender = build_sender(&config.notification.backend)?;
    let template_renderer =
        TemplateRenderer::new().context("通知テンプレートの読み込みに失敗しました")?;
    let dispatcher = NotificationDispatcher::new(
        sender,
        Arc::new(PostgresParticipantRepository::new(pool.clone())),
        Arc::new(PostgresUserSettingRepository::new(pool.clone())),
        template_renderer,
        DispatcherSettings {
            from_address: config.notification.from_address.clone(),
            site_domain:  config.notification.site_domain.clone(),
        },
    );
    let usecase = ProjectEventUseCase::new(
        Arc::new(PostgresUserProjectRepository::new(pool.clone())),
        Arc::new(PostgresUserRepository::new(pool)),
        dispatcher,
    );

    let app = build_router(Arc::new(ProjectEventState { usecase }));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("通知サービスが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// 設定に応じた送信実装を作る
fn build_sender(backend: &MailBackend) -> anyhow::Result<Arc<dyn NotificationSender>> {
    let sender: Arc<dyn NotificationSender> = match backend {
        MailBackend::Smtp { host, port } => {
            tracing::info!("通知バックエンド: SMTP ({}:{})", host, port);
            Arc::new(SmtpNotificationSender::new(host, *port))
        }
        MailBackend::Mailgun(mailgun) => {
            tracing::info!(
                "通知バックエンド: Mailgun ({}, {})",
                mailgun.api_base,
                mailgun.sender_domain
            );
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .context("HTTP クライアントの作成に失敗しました")?;
            Arc::new(MailgunNotificationSender::new(
                client,
                mailgun.api_base.clone(),
                mailgun.sender_domain.clone(),
                mailgun.api_key.clone(),
            ))
        }
        MailBackend::Noop => {
            tracing::info!("通知バックエンド: Noop（送信しない）");
            Arc::new(NoopNotificationSender)
        }
    };

    Ok(sender)
}
