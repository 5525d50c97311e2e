//! Common Types Module
//!
//! 클라이언트 wire 포맷 정의
//!
//! 저장 모델(snake_case 컬럼)과 클라이언트 JSON(camelCase 필드) 사이의
//! 변환을 한 곳에 모음. 날짜는 항상 `YYYY-MM-DD`로 직렬화되고,
//! 수신 시 시간 부분(`T...`)은 버림.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{Loan, Payment, Transaction};
use crate::error::ApiError;

// ============ Query Parameters ============

/// `?userId=X` 쿼리 파라미터
///
/// 인증 없음 — 클라이언트가 보낸 값을 그대로 신뢰함.
/// 실제 서비스에서는 Auth 토큰에서 추출하도록 교체할 지점.
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl UserQuery {
    /// userId가 없으면 400
    pub fn require(self) -> Result<String, ApiError> {
        self.user_id.ok_or(ApiError::MissingUserId)
    }
}

// ============ Response Types ============

/// 삭제 확인 응답
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// 클라이언트로 내려가는 Loan 표현 (user_id는 노출하지 않음)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanJson {
    pub id: String,
    pub name: String,
    pub lender: Option<String>,
    pub principal: f64,
    pub interest_rate: Option<f64>,
    /// `YYYY-MM-DD`
    pub start_date: NaiveDate,
    pub emi_amount: f64,
    pub tenure_months: i32,
    pub initial_paid_months: i32,
    pub due_date_day: i32,
    #[serde(rename = "type")]
    pub loan_type: String,
    pub status: String,
    pub is_foreclosed: bool,
    /// 읽기 전용 — 쓰기 경로에서는 무시됨
    pub payments: Vec<PaymentJson>,
}

impl LoanJson {
    pub fn from_model(loan: Loan, payments: Vec<Payment>) -> Self {
        Self {
            id: loan.id,
            name: loan.name,
            lender: loan.lender,
            principal: loan.principal,
            interest_rate: loan.interest_rate,
            start_date: loan.start_date,
            emi_amount: loan.emi_amount,
            tenure_months: loan.tenure_months,
            initial_paid_months: loan.initial_paid_months,
            due_date_day: loan.due_date_day,
            loan_type: loan.loan_type,
            status: loan.status,
            is_foreclosed: loan.is_foreclosed,
            payments: payments.into_iter().map(PaymentJson::from_model).collect(),
        }
    }
}

/// 클라이언트로 내려가는 Payment 표현 (loan_id는 부모에 암시되어 생략)
#[derive(Debug, Serialize)]
pub struct PaymentJson {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub note: Option<String>,
}

impl PaymentJson {
    pub fn from_model(payment: Payment) -> Self {
        Self {
            id: payment.id,
            date: payment.date,
            amount: payment.amount,
            note: payment.note,
        }
    }
}

/// 클라이언트로 내려가는 Transaction 표현
#[derive(Debug, Serialize)]
pub struct TransactionJson {
    pub id: String,
    pub date: NaiveDate,
    pub amount: f64,
    #[serde(rename = "type")]
    pub tx_type: String,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl TransactionJson {
    pub fn from_model(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            date: tx.date,
            amount: tx.amount,
            tx_type: tx.tx_type,
            category: tx.category,
            description: tx.description,
        }
    }
}

// ============ Helpers ============

/// 클라이언트 날짜 문자열 파싱
///
/// `2024-03-15` 또는 `2024-03-15T00:00:00Z` 형태 허용 —
/// `T` 이후의 시간 부분은 버림. 형식이 다르면 400 ValidationError.
pub fn parse_client_date(raw: &str) -> Result<NaiveDate, ApiError> {
    let date_part = raw.split('T').next().unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| ApiError::ValidationError(format!("invalid date: {}", raw)))
}

/// id 출처 결정: 클라이언트 제공 id 우선, 없거나 비어 있으면 서버가 생성
pub fn id_or_generate(id: Option<String>) -> String {
    match id {
        Some(id) if !id.is_empty() => id,
        _ => Uuid::new_v4().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_loan_json() -> LoanJson {
        let loan = Loan {
            id: "loan-1".to_string(),
            user_id: "user-a".to_string(),
            name: "Car Loan".to_string(),
            lender: None,
            principal: 18_000.0,
            interest_rate: Some(6.2),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            emi_amount: 410.0,
            tenure_months: 48,
            initial_paid_months: 3,
            due_date_day: 10,
            loan_type: "car".to_string(),
            status: "active".to_string(),
            is_foreclosed: false,
        };
        let payment = Payment {
            id: "pay-1".to_string(),
            loan_id: "loan-1".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            amount: 410.0,
            note: Some("first installment".to_string()),
        };
        LoanJson::from_model(loan, vec![payment])
    }

    #[test]
    fn test_parse_client_date_plain() {
        let date = parse_client_date("2024-03-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_parse_client_date_discards_time() {
        let date = parse_client_date("2024-03-15T00:00:00Z").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_parse_client_date_rejects_garbage() {
        assert!(parse_client_date("15/03/2024").is_err());
        assert!(parse_client_date("").is_err());
    }

    #[test]
    fn test_loan_wire_format() {
        let value = serde_json::to_value(sample_loan_json()).unwrap();

        // camelCase 필드명 + YYYY-MM-DD 날짜
        assert_eq!(value["startDate"], "2024-03-15");
        assert_eq!(value["interestRate"], 6.2);
        assert_eq!(value["emiAmount"], 410.0);
        assert_eq!(value["tenureMonths"], 48);
        assert_eq!(value["initialPaidMonths"], 3);
        assert_eq!(value["dueDateDay"], 10);
        assert_eq!(value["type"], "car");
        assert_eq!(value["isForeclosed"], false);
        assert_eq!(value["payments"][0]["date"], "2024-04-10");
        // user_id는 wire 포맷에 없음
        assert!(value.get("userId").is_none());
    }

    #[test]
    fn test_transaction_wire_format() {
        let tx = Transaction {
            id: "tx-1".to_string(),
            user_id: "user-a".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            amount: 42.5,
            tx_type: "income".to_string(),
            category: None,
            description: Some("refund".to_string()),
        };
        let value = serde_json::to_value(TransactionJson::from_model(tx)).unwrap();

        assert_eq!(value["date"], "2024-05-01");
        assert_eq!(value["type"], "income");
        assert_eq!(value["category"], serde_json::Value::Null);
    }

    #[test]
    fn test_user_query_require() {
        // userId 없으면 400 MissingUserId
        let missing = UserQuery { user_id: None }.require();
        assert!(matches!(missing, Err(ApiError::MissingUserId)));

        let present = UserQuery {
            user_id: Some("user-a".to_string()),
        }
        .require();
        assert_eq!(present.unwrap(), "user-a");
    }

    #[test]
    fn test_id_or_generate() {
        assert_eq!(id_or_generate(Some("abc".to_string())), "abc");

        // 없거나 빈 id는 UUID로 대체
        let generated = id_or_generate(None);
        assert!(Uuid::parse_str(&generated).is_ok());
        let generated = id_or_generate(Some(String::new()));
        assert!(Uuid::parse_str(&generated).is_ok());
    }
}
