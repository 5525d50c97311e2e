//! API Routes Module
//!
//! 모든 HTTP 엔드포인트 정의
//!
//! # Routes
//! - `/health` - 헬스 체크
//! - `/api/sync` - 사용자 전체 스냅샷 동기화
//! - `/api/loans` - 대출 upsert / 삭제
//! - `/api/payments` - 상환 내역 추가
//! - `/api/transactions` - 거래 upsert / 삭제

pub mod health;
pub mod loans;
pub mod payments;
pub mod sync;
pub mod transactions;
