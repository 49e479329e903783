use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::{
    model::company::{Company, CompanyWithEmployees},
    tracking::RowChange,
};

#[cfg(test)]
pub mod memory;
pub mod mysql;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A single-row UPDATE matched nothing; the transaction was rolled back.
    #[error("no row in {table} with id {id}")]
    RowMissing { table: &'static str, id: u64 },
}

/// Fails unless exactly one row matched.
pub fn expect_one_row(table: &'static str, id: u64, rows_affected: u64) -> Result<(), StoreError> {
    if rows_affected == 1 {
        Ok(())
    } else {
        Err(StoreError::RowMissing { table, id })
    }
}

/// What a single save sent to the database.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SaveReport {
    pub statements: usize,
    pub rows_affected: u64,
}

impl SaveReport {
    pub fn record(&mut self, rows_affected: u64) {
        self.statements += 1;
        self.rows_affected += rows_affected;
    }
}

/// Data access for companies and the employees they own.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Company row only.
    async fn find_company(&self, company_id: u64) -> Result<Option<Company>, StoreError>;

    /// Company plus all of its employees.
    async fn find_with_employees(
        &self,
        company_id: u64,
    ) -> Result<Option<CompanyWithEmployees>, StoreError>;

    /// Persist tracked changes, one UPDATE per change, in one transaction.
    /// An empty slice issues nothing. A change whose row is gone rolls the
    /// whole save back with [`StoreError::RowMissing`].
    async fn save_changes(&self, changes: &[RowChange]) -> Result<SaveReport, StoreError>;

    /// Multiply every salary of the company by `factor` with a single
    /// statement and stamp the company, both inside one transaction.
    /// Rolls back with [`StoreError::RowMissing`] if the company is gone.
    async fn raise_salaries_in_place(
        &self,
        company_id: u64,
        factor: Decimal,
        at: NaiveDateTime,
    ) -> Result<SaveReport, StoreError>;
}
