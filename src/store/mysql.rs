use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use tracing::debug;

use super::{CompanyStore, SaveReport, StoreError, expect_one_row};
use crate::{
    model::{
        company::{Company, CompanyWithEmployees},
        employee::Employee,
    },
    tracking::RowChange,
};

const SELECT_COMPANY: &str = "SELECT id, last_salary_update FROM companies WHERE id = ?";
const SELECT_EMPLOYEES: &str =
    "SELECT id, company_id, salary FROM employees WHERE company_id = ? ORDER BY id";
const UPDATE_EMPLOYEE_SALARY: &str = "UPDATE employees SET salary = ? WHERE id = ?";
const UPDATE_COMPANY_STAMP: &str = "UPDATE companies SET last_salary_update = ? WHERE id = ?";
const RAISE_COMPANY_SALARIES: &str = "UPDATE employees SET salary = salary * ? WHERE company_id = ?";

#[derive(Clone)]
pub struct MySqlCompanyStore {
    pool: MySqlPool,
}

impl MySqlCompanyStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyStore for MySqlCompanyStore {
    async fn find_company(&self, company_id: u64) -> Result<Option<Company>, StoreError> {
        let company = sqlx::query_as::<_, Company>(SELECT_COMPANY)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(company)
    }

    async fn find_with_employees(
        &self,
        company_id: u64,
    ) -> Result<Option<CompanyWithEmployees>, StoreError> {
        let mut conn = self.pool.acquire().await?;

        let Some(company) = sqlx::query_as::<_, Company>(SELECT_COMPANY)
            .bind(company_id)
            .fetch_optional(&mut *conn)
            .await?
        else {
            return Ok(None);
        };

        let employees = sqlx::query_as::<_, Employee>(SELECT_EMPLOYEES)
            .bind(company_id)
            .fetch_all(&mut *conn)
            .await?;

        debug!(company_id, employees = employees.len(), "Loaded company with employees");

        Ok(Some(CompanyWithEmployees { company, employees }))
    }

    async fn save_changes(&self, changes: &[RowChange]) -> Result<SaveReport, StoreError> {
        let mut report = SaveReport::default();
        if changes.is_empty() {
            return Ok(report);
        }

        let mut tx = self.pool.begin().await?;

        // Returning early drops `tx`, which rolls back every change made so far.
        for change in changes {
            let rows_affected = match change {
                RowChange::EmployeeSalary { id, salary } => {
                    debug!(sql = UPDATE_EMPLOYEE_SALARY, id, %salary, "Executing");
                    let rows = sqlx::query(UPDATE_EMPLOYEE_SALARY)
                        .bind(salary)
                        .bind(id)
                        .execute(&mut *tx)
                        .await?
                        .rows_affected();
                    expect_one_row("employees", *id, rows)?;
                    rows
                }
                RowChange::CompanyLastSalaryUpdate { id, at } => {
                    debug!(sql = UPDATE_COMPANY_STAMP, id, at = ?at, "Executing");
                    let rows = sqlx::query(UPDATE_COMPANY_STAMP)
                        .bind(at)
                        .bind(id)
                        .execute(&mut *tx)
                        .await?
                        .rows_affected();
                    expect_one_row("companies", *id, rows)?;
                    rows
                }
            };
            report.record(rows_affected);
        }

        tx.commit().await?;
        Ok(report)
    }

    async fn raise_salaries_in_place(
        &self,
        company_id: u64,
        factor: Decimal,
        at: NaiveDateTime,
    ) -> Result<SaveReport, StoreError> {
        let mut report = SaveReport::default();
        let mut tx = self.pool.begin().await?;

        debug!(sql = RAISE_COMPANY_SALARIES, company_id, %factor, "Executing");
        let raised = sqlx::query(RAISE_COMPANY_SALARIES)
            .bind(factor)
            .bind(company_id)
            .execute(&mut *tx)
            .await?;
        report.record(raised.rows_affected());

        debug!(sql = UPDATE_COMPANY_STAMP, company_id, %at, "Executing");
        let stamped = sqlx::query(UPDATE_COMPANY_STAMP)
            .bind(at)
            .bind(company_id)
            .execute(&mut *tx)
            .await?;
        // Company deleted since it was looked up: dropping `tx` undoes the raise.
        expect_one_row("companies", company_id, stamped.rows_affected())?;
        report.record(stamped.rows_affected());

        tx.commit().await?;
        Ok(report)
    }
}
