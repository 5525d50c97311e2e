//! Payment Endpoint
//!
//! 상환 내역 추가 전용. 개별 수정/삭제는 없음 — 한번 추가된 상환은
//! 부모 대출을 삭제해야만 제거됨.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::db::Payment;
use crate::error::ApiError;
use crate::types::{id_or_generate, parse_client_date, PaymentJson};
use crate::AppState;

/// 상환 추가 요청
#[derive(Debug, Deserialize)]
pub struct PaymentPayload {
    pub id: Option<String>,
    #[serde(rename = "loanId")]
    pub loan_id: String,
    pub date: String,
    pub amount: f64,
    pub note: Option<String>,
}

/// POST /api/payments
///
/// 무조건 insert (upsert 아님). 대출 존재 여부는 핸들러에서 확인하지
/// 않고 FK 제약에 맡김 — 없는 loanId는 DB가 거부.
pub async fn add_payment(
    State(state): State<AppState>,
    Json(payload): Json<PaymentPayload>,
) -> Result<Json<PaymentJson>, ApiError> {
    let date = parse_client_date(&payload.date)?;

    let payment = Payment {
        id: id_or_generate(payload.id),
        loan_id: payload.loan_id,
        date,
        amount: payload.amount,
        note: payload.note,
    };

    state.db.insert_payment(&payment).await?;

    // TODO: 누적 상환액이 원금에 도달했을 때 status/is_foreclosed를
    // 자동 전이할지는 제품 결정 대기 — 규칙이 정해지면 여기서 재계산
    tracing::info!(payment_id = %payment.id, loan_id = %payment.loan_id, "Payment added");

    Ok(Json(PaymentJson::from_model(payment)))
}
