//! Personal Finance Tracker API Library
//!
//! # Overview
//!
//! 이 라이브러리는 개인 재무 관리 앱의 동기화 백엔드 API를 제공합니다.
//! 대출(Loan)과 상환 내역(Payment), 가계부 거래(Transaction)를
//! 사용자별로 저장하고, 클라이언트 전체 동기화 엔드포인트를 노출합니다.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                         API                              │
//! │                                                          │
//! │  ┌─────────┐      ┌─────────┐      ┌─────────┐          │
//! │  │ Routes  │      │   DB    │      │  Types  │          │
//! │  └────┬────┘      └────┬────┘      └────┬────┘          │
//! │       │                │                │                │
//! │       └────────────────┴────────────────┘                │
//! │                        │                                 │
//! └────────────────────────┼─────────────────────────────────┘
//!                          │
//!                          ▼
//!                 ┌────────────────┐
//!                 │   PostgreSQL   │
//!                 └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 타입 및 처리
//! - `routes`: HTTP 엔드포인트 핸들러
//! - `db`: 데이터베이스 연동
//! - `types`: 클라이언트 wire 포맷 (camelCase JSON, 날짜 변환)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use finance_sync_api::{config::Config, db::Database};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.database_url).await?;
//!
//!     // ... 서버 시작
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use db::Database;
pub use error::ApiError;

/// 애플리케이션 전역 상태
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
}
