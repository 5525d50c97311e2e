//! Database Module
//!
//! PostgreSQL 연동 (SQLx)
//!
//! - ACID 트랜잭션: 금융 데이터 무결성 보장
//! - 커넥션 풀: SQLx의 PgPool 사용 (커넥션 재사용, 타임아웃 처리)
//! - 마이그레이션: sqlx::migrate! 내장 지원
//!
//! 각 핸들러는 정확히 하나의 쓰기 연산을 수행하므로 요청 단위 원자성은
//! 개별 statement의 암묵적 트랜잭션으로 보장됨. 요청 간 잠금은 없음 —
//! 같은 id에 대한 동시 upsert는 나중에 커밋된 쪽이 전부 이김.

mod models;
mod repository;

pub use models::*;
pub use repository::FinanceRepository;

use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// 데이터베이스 연결 및 쿼리 담당
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 데이터베이스 연결
    ///
    /// # Connection Pool Settings
    ///
    /// - max_connections: 10 (트래픽에 따라 조정)
    /// - min_connections: 1 (idle 시 최소 유지)
    /// - acquire_timeout: 3초 (커넥션 획득 대기)
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// 마이그레이션 실행
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await?;
        Ok(())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ============ Loans ============

    /// 사용자의 모든 대출 조회
    pub async fn loans_by_user(&self, user_id: &str) -> Result<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT
                id, user_id, name, lender, principal, interest_rate,
                start_date, emi_amount, tenure_months, initial_paid_months,
                due_date_day, loan_type, status, is_foreclosed
            FROM loans
            WHERE user_id = $1
            ORDER BY start_date, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans)
    }

    /// 대출 생성/전체 덮어쓰기 (upsert)
    ///
    /// 단일 atomic statement로 insert-or-replace:
    /// 존재하면 클라이언트가 제어하는 모든 필드를 덮어씀 (부분 병합 아님).
    /// user_id는 최초 생성 시에만 기록되고 이후에는 유지됨.
    pub async fn upsert_loan(&self, loan: &Loan) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO loans (
                id, user_id, name, lender, principal, interest_rate,
                start_date, emi_amount, tenure_months, initial_paid_months,
                due_date_day, loan_type, status, is_foreclosed
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                lender = EXCLUDED.lender,
                principal = EXCLUDED.principal,
                interest_rate = EXCLUDED.interest_rate,
                start_date = EXCLUDED.start_date,
                emi_amount = EXCLUDED.emi_amount,
                tenure_months = EXCLUDED.tenure_months,
                initial_paid_months = EXCLUDED.initial_paid_months,
                due_date_day = EXCLUDED.due_date_day,
                loan_type = EXCLUDED.loan_type,
                status = EXCLUDED.status,
                is_foreclosed = EXCLUDED.is_foreclosed
            "#,
        )
        .bind(&loan.id)
        .bind(&loan.user_id)
        .bind(&loan.name)
        .bind(&loan.lender)
        .bind(loan.principal)
        .bind(loan.interest_rate)
        .bind(loan.start_date)
        .bind(loan.emi_amount)
        .bind(loan.tenure_months)
        .bind(loan.initial_paid_months)
        .bind(loan.due_date_day)
        .bind(&loan.loan_type)
        .bind(&loan.status)
        .bind(loan.is_foreclosed)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 대출 조회 (upsert 후 저장된 상태 반환용)
    pub async fn loan_by_id(&self, id: &str) -> Result<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            SELECT
                id, user_id, name, lender, principal, interest_rate,
                start_date, emi_amount, tenure_months, initial_paid_months,
                due_date_day, loan_type, status, is_foreclosed
            FROM loans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(loan)
    }

    /// 대출 삭제 (payments는 FK cascade로 함께 삭제)
    ///
    /// 삭제된 행이 있으면 true
    pub async fn delete_loan(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ============ Payments ============

    /// 대출 하나의 상환 내역 조회
    pub async fn payments_by_loan(&self, loan_id: &str) -> Result<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, loan_id, date, amount, note
            FROM payments
            WHERE loan_id = $1
            ORDER BY date, id
            "#,
        )
        .bind(loan_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// 여러 대출의 상환 내역 일괄 조회 (sync 스냅샷용, N+1 방지)
    pub async fn payments_by_loans(&self, loan_ids: &[String]) -> Result<Vec<Payment>> {
        if loan_ids.is_empty() {
            return Ok(vec![]);
        }

        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, loan_id, date, amount, note
            FROM payments
            WHERE loan_id = ANY($1)
            ORDER BY date, id
            "#,
        )
        .bind(loan_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// 상환 내역 추가 (무조건 insert — upsert 아님)
    ///
    /// 존재하지 않는 loan_id는 FK 제약이 거부함 (핸들러 사전 검증 없음)
    pub async fn insert_payment(&self, payment: &Payment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO payments (id, loan_id, date, amount, note)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&payment.id)
        .bind(&payment.loan_id)
        .bind(payment.date)
        .bind(payment.amount)
        .bind(&payment.note)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ============ Transactions ============

    /// 사용자의 모든 거래 조회
    pub async fn transactions_by_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, user_id, date, amount, tx_type, category, description
            FROM transactions
            WHERE user_id = $1
            ORDER BY date, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    /// 거래 생성/전체 덮어쓰기 (upsert)
    ///
    /// 대출과 동일한 upsert 계약. 단, 거래는 user_id도 매 호출마다
    /// 덮어씀 — 다른 userId로 재업로드하면 소유권이 이전됨.
    pub async fn upsert_transaction(&self, tx: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, user_id, date, amount, tx_type, category, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id)
            DO UPDATE SET
                user_id = EXCLUDED.user_id,
                date = EXCLUDED.date,
                amount = EXCLUDED.amount,
                tx_type = EXCLUDED.tx_type,
                category = EXCLUDED.category,
                description = EXCLUDED.description
            "#,
        )
        .bind(&tx.id)
        .bind(&tx.user_id)
        .bind(tx.date)
        .bind(tx.amount)
        .bind(&tx.tx_type)
        .bind(&tx.category)
        .bind(&tx.description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 거래 삭제
    pub async fn delete_transaction(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
