//! Repository Abstraction
//!
//! 데이터 접근 로직을 trait로 추상화
//!
//! 장점:
//! - 비즈니스 로직과 데이터 접근 분리
//! - 테스트 시 Mock 구현 쉬움 (PostgreSQL 없이 저장 계약 검증)
//! - DB 교체 시 영향 최소화
//!
//! PostgreSQL 구현은 db/mod.rs의 Database 구조체에 있고, 아래에서
//! trait에 바인딩됨. Mock은 upsert/cascade/사용자 격리 계약을
//! 인메모리로 재현함.

use async_trait::async_trait;
use anyhow::Result;

use super::models::{Loan, Payment, Transaction};
use super::Database;

/// 저장소 인터페이스
///
/// Database와 동일한 연산 집합. 핸들러가 의존하는 계약:
/// - upsert: id 기준 insert-or-replace (멱등)
/// - delete_loan: payments까지 cascade, 삭제 여부 반환
/// - insert_payment: 무조건 insert, 없는 loan_id는 거부
#[async_trait]
pub trait FinanceRepository: Send + Sync {
    async fn loans_by_user(&self, user_id: &str) -> Result<Vec<Loan>>;
    async fn upsert_loan(&self, loan: &Loan) -> Result<()>;
    async fn delete_loan(&self, id: &str) -> Result<bool>;

    async fn payments_by_loan(&self, loan_id: &str) -> Result<Vec<Payment>>;
    async fn insert_payment(&self, payment: &Payment) -> Result<()>;

    async fn transactions_by_user(&self, user_id: &str) -> Result<Vec<Transaction>>;
    async fn upsert_transaction(&self, tx: &Transaction) -> Result<()>;
    async fn delete_transaction(&self, id: &str) -> Result<bool>;
}

/// PostgreSQL 구현 — Database의 고유 메서드에 위임
#[async_trait]
impl FinanceRepository for Database {
    async fn loans_by_user(&self, user_id: &str) -> Result<Vec<Loan>> {
        Database::loans_by_user(self, user_id).await
    }

    async fn upsert_loan(&self, loan: &Loan) -> Result<()> {
        Database::upsert_loan(self, loan).await
    }

    async fn delete_loan(&self, id: &str) -> Result<bool> {
        Database::delete_loan(self, id).await
    }

    async fn payments_by_loan(&self, loan_id: &str) -> Result<Vec<Payment>> {
        Database::payments_by_loan(self, loan_id).await
    }

    async fn insert_payment(&self, payment: &Payment) -> Result<()> {
        Database::insert_payment(self, payment).await
    }

    async fn transactions_by_user(&self, user_id: &str) -> Result<Vec<Transaction>> {
        Database::transactions_by_user(self, user_id).await
    }

    async fn upsert_transaction(&self, tx: &Transaction) -> Result<()> {
        Database::upsert_transaction(self, tx).await
    }

    async fn delete_transaction(&self, id: &str) -> Result<bool> {
        Database::delete_transaction(self, id).await
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockFinanceRepository;
    use super::*;
    use chrono::NaiveDate;
    use tokio_test::block_on;

    fn sample_loan(id: &str, user_id: &str) -> Loan {
        Loan {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: "Home Loan".to_string(),
            lender: Some("First Bank".to_string()),
            principal: 250_000.0,
            interest_rate: Some(8.5),
            start_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            emi_amount: 2_100.0,
            tenure_months: 240,
            initial_paid_months: 0,
            due_date_day: 5,
            loan_type: "home".to_string(),
            status: "active".to_string(),
            is_foreclosed: false,
        }
    }

    fn sample_payment(id: &str, loan_id: &str) -> Payment {
        Payment {
            id: id.to_string(),
            loan_id: loan_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
            amount: 2_100.0,
            note: None,
        }
    }

    fn sample_transaction(id: &str, user_id: &str, amount: f64) -> Transaction {
        Transaction {
            id: id.to_string(),
            user_id: user_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            amount,
            tx_type: "expense".to_string(),
            category: Some("groceries".to_string()),
            description: None,
        }
    }

    #[test]
    fn database_satisfies_repository_contract() {
        // PostgreSQL 구현이 Mock과 같은 계약에 바인딩되는지 컴파일 타임 확인
        fn assert_impl<T: FinanceRepository>() {}
        assert_impl::<Database>();
        assert_impl::<MockFinanceRepository>();
    }

    #[test]
    fn loan_upsert_is_idempotent() {
        let repo = MockFinanceRepository::new();
        let loan = sample_loan("loan-1", "user-a");

        block_on(repo.upsert_loan(&loan)).unwrap();
        block_on(repo.upsert_loan(&loan)).unwrap();

        let loans = block_on(repo.loans_by_user("user-a")).unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].name, "Home Loan");
    }

    #[test]
    fn loan_upsert_overwrites_all_fields_but_keeps_owner() {
        let repo = MockFinanceRepository::new();
        block_on(repo.upsert_loan(&sample_loan("loan-1", "user-a"))).unwrap();

        let mut updated = sample_loan("loan-1", "user-b");
        updated.name = "Renamed".to_string();
        updated.lender = None;
        block_on(repo.upsert_loan(&updated)).unwrap();

        // 다른 userId로 재업로드해도 대출 소유자는 바뀌지 않음
        let loans = block_on(repo.loans_by_user("user-a")).unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].name, "Renamed");
        assert_eq!(loans[0].lender, None);
        assert!(block_on(repo.loans_by_user("user-b")).unwrap().is_empty());
    }

    #[test]
    fn deleting_loan_cascades_to_payments() {
        let repo = MockFinanceRepository::new();
        block_on(repo.upsert_loan(&sample_loan("loan-1", "user-a"))).unwrap();
        block_on(repo.insert_payment(&sample_payment("pay-1", "loan-1"))).unwrap();
        block_on(repo.insert_payment(&sample_payment("pay-2", "loan-1"))).unwrap();

        assert!(block_on(repo.delete_loan("loan-1")).unwrap());

        assert!(block_on(repo.payments_by_loan("loan-1")).unwrap().is_empty());
    }

    #[test]
    fn delete_of_missing_loan_reports_not_found() {
        let repo = MockFinanceRepository::new();
        assert!(!block_on(repo.delete_loan("never-created")).unwrap());
    }

    #[test]
    fn loans_are_isolated_by_user() {
        let repo = MockFinanceRepository::new();
        block_on(repo.upsert_loan(&sample_loan("loan-a", "user-a"))).unwrap();
        block_on(repo.upsert_loan(&sample_loan("loan-b", "user-b"))).unwrap();

        let loans_a = block_on(repo.loans_by_user("user-a")).unwrap();
        assert_eq!(loans_a.len(), 1);
        assert_eq!(loans_a[0].id, "loan-a");
    }

    #[test]
    fn payment_requires_existing_loan() {
        let repo = MockFinanceRepository::new();
        let result = block_on(repo.insert_payment(&sample_payment("pay-1", "ghost-loan")));
        assert!(result.is_err());
    }

    #[test]
    fn transaction_upsert_replaces_not_appends() {
        let repo = MockFinanceRepository::new();
        block_on(repo.upsert_transaction(&sample_transaction("tx-1", "user-a", 50.0))).unwrap();
        block_on(repo.upsert_transaction(&sample_transaction("tx-1", "user-a", 75.0))).unwrap();

        let txs = block_on(repo.transactions_by_user("user-a")).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].amount, 75.0);
    }

    #[test]
    fn transaction_upsert_reassigns_owner() {
        let repo = MockFinanceRepository::new();
        block_on(repo.upsert_transaction(&sample_transaction("tx-1", "user-a", 50.0))).unwrap();
        block_on(repo.upsert_transaction(&sample_transaction("tx-1", "user-b", 50.0))).unwrap();

        assert!(block_on(repo.transactions_by_user("user-a")).unwrap().is_empty());
        assert_eq!(block_on(repo.transactions_by_user("user-b")).unwrap().len(), 1);
    }

    #[test]
    fn deleted_transaction_never_returns() {
        let repo = MockFinanceRepository::new();
        block_on(repo.upsert_transaction(&sample_transaction("tx-1", "user-a", 50.0))).unwrap();

        assert!(block_on(repo.delete_transaction("tx-1")).unwrap());
        assert!(!block_on(repo.delete_transaction("tx-1")).unwrap());

        assert!(block_on(repo.transactions_by_user("user-a")).unwrap().is_empty());
    }
}
