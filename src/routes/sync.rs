//! Sync Endpoint
//!
//! 클라이언트 전체 동기화: 사용자의 모든 대출(상환 내역 포함)과
//! 거래를 한 번에 내려줌. 증분/델타 동기화 없음 — 매 호출이 전체
//! 스냅샷이고 부수효과도 없음.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use crate::db::Payment;
use crate::error::ApiError;
use crate::types::{LoanJson, TransactionJson, UserQuery};
use crate::AppState;

/// 동기화 응답: 사용자 데이터 전체 스냅샷
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub loans: Vec<LoanJson>,
    pub transactions: Vec<TransactionJson>,
}

/// GET /api/sync?userId=X
///
/// # Response
///
/// ```json
/// {
///   "loans": [ { "id": "...", "payments": [...], ... } ],
///   "transactions": [ { "id": "...", ... } ]
/// }
/// ```
pub async fn get_user_data(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<SyncResponse>, ApiError> {
    let user_id = query.require()?;

    let loans = state.db.loans_by_user(&user_id).await?;

    // 상환 내역은 한 번에 가져와서 대출별로 묶음 (N+1 쿼리 방지)
    let loan_ids: Vec<String> = loans.iter().map(|l| l.id.clone()).collect();
    let payments = state.db.payments_by_loans(&loan_ids).await?;

    let mut payments_by_loan: HashMap<String, Vec<Payment>> = HashMap::new();
    for payment in payments {
        payments_by_loan
            .entry(payment.loan_id.clone())
            .or_default()
            .push(payment);
    }

    let loans = loans
        .into_iter()
        .map(|loan| {
            let loan_payments = payments_by_loan.remove(&loan.id).unwrap_or_default();
            LoanJson::from_model(loan, loan_payments)
        })
        .collect();

    let transactions = state
        .db
        .transactions_by_user(&user_id)
        .await?
        .into_iter()
        .map(TransactionJson::from_model)
        .collect();

    Ok(Json(SyncResponse { loans, transactions }))
}
