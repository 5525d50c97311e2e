//! Loan Endpoints
//!
//! 대출 upsert와 삭제. upsert는 id 기준 insert-or-replace이며
//! 부분 수정(patch)은 지원하지 않음 — 클라이언트가 전체 상태를 보냄.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::db::Loan;
use crate::error::ApiError;
use crate::types::{id_or_generate, parse_client_date, LoanJson, MessageResponse, UserQuery};
use crate::AppState;

// ============ Request Types ============

/// 대출 upsert 요청 (wire: camelCase)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPayload {
    /// 없으면 서버가 UUID 생성
    pub id: Option<String>,
    pub name: String,
    pub lender: Option<String>,
    pub principal: f64,
    pub interest_rate: Option<f64>,
    /// ISO-8601, 시간 부분은 버림
    pub start_date: String,
    pub emi_amount: f64,
    pub tenure_months: i32,
    #[serde(default)]
    pub initial_paid_months: i32,
    pub due_date_day: i32,
    #[serde(rename = "type")]
    pub loan_type: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub is_foreclosed: bool,
    /// 클라이언트가 보내더라도 통째로 무시됨 —
    /// 상환 내역은 /api/payments 엔드포인트로만 추가
    #[serde(default)]
    pub payments: Option<serde_json::Value>,
}

fn default_status() -> String {
    "active".to_string()
}

// ============ Handlers ============

/// POST /api/loans?userId=X
///
/// 대출 생성/전체 덮어쓰기. 생성 시 요청 사용자에게 귀속되고,
/// 업데이트 시에는 기존 소유자가 유지됨. 응답은 저장된 대출과
/// (이 호출로는 변경되지 않는) 상환 내역 전체.
pub async fn save_loan(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
    Json(payload): Json<LoanPayload>,
) -> Result<Json<LoanJson>, ApiError> {
    let user_id = query.require()?;
    let start_date = parse_client_date(&payload.start_date)?;

    let loan = Loan {
        id: id_or_generate(payload.id),
        user_id,
        name: payload.name,
        lender: payload.lender,
        principal: payload.principal,
        interest_rate: payload.interest_rate,
        start_date,
        emi_amount: payload.emi_amount,
        tenure_months: payload.tenure_months,
        initial_paid_months: payload.initial_paid_months,
        due_date_day: payload.due_date_day,
        loan_type: payload.loan_type,
        status: payload.status,
        is_foreclosed: payload.is_foreclosed,
    };

    state.db.upsert_loan(&loan).await?;

    tracing::info!(loan_id = %loan.id, "Loan upserted");

    // 저장된 행을 다시 읽어 응답 (업데이트 시 유지된 소유자 반영)
    let stored = state
        .db
        .loan_by_id(&loan.id)
        .await?
        .ok_or(ApiError::InternalError)?;
    let payments = state.db.payments_by_loan(&stored.id).await?;

    Ok(Json(LoanJson::from_model(stored, payments)))
}

/// DELETE /api/loans/:id
///
/// 대출과 그 상환 내역 전체 삭제 (cascade).
/// 소유권 확인 없음 — id를 아는 호출자는 누구나 삭제 가능.
pub async fn delete_loan(
    State(state): State<AppState>,
    Path(loan_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state.db.delete_loan(&loan_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Loan".to_string()));
    }

    tracing::info!(loan_id = %loan_id, "Loan deleted");

    Ok(Json(MessageResponse {
        message: "Deleted successfully".to_string(),
    }))
}
