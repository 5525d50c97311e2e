//! Personal Finance Tracker API Server
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Client (Frontend)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum Web Server                         │
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                      Routes Layer                        ││
//! │  │  /health  /api/sync  /api/loans  /api/payments          ││
//! │  │           /api/transactions                              ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                      Data Layer                          ││
//! │  │  PostgreSQL (sqlx)  -  loans / payments / transactions  ││
//! │  └─────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// 라이브러리에서 가져오기
use finance_sync_api::{routes, AppState, Config, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    // RUST_LOG=debug,sqlx=warn 형태로 레벨 제어 가능
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "finance_sync_api=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting Personal Finance Tracker API Server");

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!("📋 Configuration loaded");

    // 데이터베이스 연결
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("🗄️  Database connected");

    // 마이그레이션 실행
    db.run_migrations().await?;
    tracing::info!("📦 Migrations completed");

    // 앱 상태 구성
    let state = AppState {
        db: Arc::new(db),
        config: Arc::new(config.clone()),
    };

    // 라우터 구성
    let app = create_router(state);

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🌐 Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// 라우터 생성
///
/// # Route Structure
///
/// ```text
/// GET    /health                - 서버 상태 확인
///
/// GET    /api/sync              - 사용자 전체 스냅샷 (loans + transactions)
/// POST   /api/loans             - 대출 upsert
/// DELETE /api/loans/:id         - 대출 삭제 (payments cascade)
/// POST   /api/payments          - 상환 내역 추가
/// POST   /api/transactions      - 거래 upsert
/// DELETE /api/transactions/:id  - 거래 삭제
/// ```
fn create_router(state: AppState) -> Router {
    // CORS 설정
    // 개발/스테이징: 모든 오리진 허용 (원본 앱과 동일)
    // 프로덕션: 환경변수로 지정한 도메인만 허용
    let cors = if state.config.is_production() {
        let origins: Vec<axum::http::HeaderValue> = state
            .config
            .allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::DELETE,
            ])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        // Health check
        .route("/health", get(routes::health::health_check))

        // Sync snapshot
        .route("/api/sync", get(routes::sync::get_user_data))

        // Loans
        .route("/api/loans", post(routes::loans::save_loan))
        .route("/api/loans/:id", delete(routes::loans::delete_loan))

        // Payments
        .route("/api/payments", post(routes::payments::add_payment))

        // Transactions
        .route("/api/transactions", post(routes::transactions::save_transaction))
        .route("/api/transactions/:id", delete(routes::transactions::delete_transaction))

        // 미들웨어
        .layer(TraceLayer::new_for_http())
        .layer(cors)

        // 상태 주입
        .with_state(state)
}
