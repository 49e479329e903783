use chrono::{NaiveDateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use crate::{
    error::AppError,
    store::{CompanyStore, SaveReport},
    tracking::Tracked,
};

/// Every raise is ten percent.
pub const RAISE_FACTOR: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

/// Salaries are stored as DECIMAL(18,2); MySQL rounds half away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn raised(salary: Decimal) -> Decimal {
    round_money(salary * RAISE_FACTOR)
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Loads the company with all employees, raises each one in memory and lets
/// the tracker write one UPDATE per changed row.
pub async fn increase_salaries_tracked(
    store: &dyn CompanyStore,
    company_id: u64,
) -> Result<SaveReport, AppError> {
    let loaded = store
        .find_with_employees(company_id)
        .await?
        .ok_or(AppError::CompanyNotFound { company_id })?;

    let mut company = Tracked::new(loaded);
    for employee in company.employees.iter_mut() {
        employee.salary = raised(employee.salary);
    }
    company.company.last_salary_update = Some(now());

    let report = store.save_changes(&company.changes()).await?;
    company.accept_changes();

    info!(
        company_id,
        employees = company.employees.len(),
        statements = report.statements,
        rows_affected = report.rows_affected,
        "Salaries increased row by row"
    );

    Ok(report)
}

/// Raises every salary of the company with one set-based statement and
/// stamps the company in the same transaction. A company deleted after the
/// lookup makes the stamp match nothing, which rolls the raise back.
pub async fn increase_salaries_set_based(
    store: &dyn CompanyStore,
    company_id: u64,
) -> Result<SaveReport, AppError> {
    if store.find_company(company_id).await?.is_none() {
        return Err(AppError::CompanyNotFound { company_id });
    }

    let report = store
        .raise_salaries_in_place(company_id, RAISE_FACTOR, now())
        .await?;

    info!(
        company_id,
        statements = report.statements,
        rows_affected = report.rows_affected,
        "Salaries increased with a single statement"
    );

    Ok(report)
}
