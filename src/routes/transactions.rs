//! Transaction Endpoints
//!
//! 가계부 거래(수입/지출) upsert와 삭제. 대출과 동일한
//! insert-or-replace 계약을 사용함.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::db::Transaction;
use crate::error::ApiError;
use crate::types::{
    id_or_generate, parse_client_date, MessageResponse, TransactionJson, UserQuery,
};
use crate::AppState;

/// 거래 upsert 요청
#[derive(Debug, Deserialize)]
pub struct TransactionPayload {
    pub id: Option<String>,
    pub date: String,
    pub amount: f64,
    /// income / expense (free-form)
    #[serde(rename = "type")]
    pub tx_type: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// POST /api/transactions?userId=X
///
/// 거래 생성/전체 덮어쓰기. 매 호출마다 요청 사용자에게 귀속됨 —
/// 기존 id를 다른 userId로 재업로드하면 소유권이 이전됨.
pub async fn save_transaction(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
    Json(payload): Json<TransactionPayload>,
) -> Result<Json<TransactionJson>, ApiError> {
    let user_id = query.require()?;
    let date = parse_client_date(&payload.date)?;

    let tx = Transaction {
        id: id_or_generate(payload.id),
        user_id,
        date,
        amount: payload.amount,
        tx_type: payload.tx_type,
        category: payload.category,
        description: payload.description,
    };

    state.db.upsert_transaction(&tx).await?;

    tracing::info!(tx_id = %tx.id, "Transaction upserted");

    Ok(Json(TransactionJson::from_model(tx)))
}

/// DELETE /api/transactions/:id
///
/// 소유권 확인 없음 (대출 삭제와 동일)
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(tx_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state.db.delete_transaction(&tx_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Transaction".to_string()));
    }

    tracing::info!(tx_id = %tx_id, "Transaction deleted");

    Ok(Json(MessageResponse {
        message: "Deleted".to_string(),
    }))
}
