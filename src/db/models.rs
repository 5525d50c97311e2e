//! Database Models
//!
//! Row types for the three tables backing the tracker: loans, payments,
//! and budget transactions. Mapped 1:1 to the migration schema via FromRow.

use chrono::NaiveDate;
use sqlx::FromRow;

/// 대출 레코드
#[derive(Debug, Clone, FromRow)]
pub struct Loan {
    /// 클라이언트 제공 또는 서버 생성 UUID 문자열
    pub id: String,

    /// 소유 사용자 (인증 없음, 클라이언트가 제공한 값 그대로)
    pub user_id: String,

    /// 대출 이름 (예: "Home Loan")
    pub name: String,

    /// 대출 기관 (옵션)
    pub lender: Option<String>,

    /// 원금
    pub principal: f64,

    /// 연 이자율 (%)
    pub interest_rate: Option<f64>,

    /// 대출 시작일
    pub start_date: NaiveDate,

    /// 월 납입금 (EMI)
    pub emi_amount: f64,

    /// 총 상환 개월 수
    pub tenure_months: i32,

    /// 추적 시작 전 이미 납부한 개월 수
    pub initial_paid_months: i32,

    /// 매월 납부일 (1~31)
    pub due_date_day: i32,

    /// 대출 종류 (free-form: home, car, personal, ...)
    pub loan_type: String,

    /// 상태 (free-form, 기본 "active" — 전이는 클라이언트 주도)
    pub status: String,

    /// 중도 상환(조기 종결) 여부
    pub is_foreclosed: bool,
}

/// 상환 내역
///
/// 개별 수정/삭제 엔드포인트 없음 — 부모 Loan 삭제 시 cascade로만 제거됨
#[derive(Debug, Clone, FromRow)]
pub struct Payment {
    pub id: String,

    /// 소속 대출 (FK, ON DELETE CASCADE)
    pub loan_id: String,

    pub date: NaiveDate,

    pub amount: f64,

    /// 메모 (옵션)
    pub note: Option<String>,
}

/// 가계부 거래 (수입/지출)
#[derive(Debug, Clone, FromRow)]
pub struct Transaction {
    pub id: String,

    pub user_id: String,

    pub date: NaiveDate,

    pub amount: f64,

    /// income / expense (free-form, enum 제약 없음)
    pub tx_type: String,

    /// 분류 (옵션)
    pub category: Option<String>,

    /// 설명 (옵션)
    pub description: Option<String>,
}
