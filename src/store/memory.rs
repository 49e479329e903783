use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::{CompanyStore, SaveReport, StoreError, expect_one_row};
use crate::{
    model::{
        company::{Company, CompanyWithEmployees},
        employee::Employee,
    },
    service::salary::round_money,
    tracking::RowChange,
};

#[derive(Default, Clone)]
struct Tables {
    companies: BTreeMap<u64, Company>,
    employees: BTreeMap<u64, Employee>,
    executed: Vec<String>,
}

/// In-process stand-in for MySQL that applies the same statements and
/// keeps a log of every committed write. Saves work on a copy of the tables
/// that only replaces them once every statement succeeded.
#[derive(Default)]
pub struct MemoryCompanyStore {
    tables: Mutex<Tables>,
}

impl MemoryCompanyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a company whose employees earn `salaries` (in cents).
    pub fn with_company(self, company_id: u64, salaries: &[i64]) -> Self {
        {
            let mut tables = self.tables.lock().unwrap();
            tables.companies.insert(
                company_id,
                Company {
                    id: company_id,
                    last_salary_update: None,
                },
            );
            for cents in salaries {
                let id = tables.employees.keys().next_back().map_or(1, |last| last + 1);
                tables.employees.insert(
                    id,
                    Employee {
                        id,
                        company_id,
                        salary: Decimal::new(*cents, 2),
                    },
                );
            }
        }
        self
    }

    pub fn snapshot(&self, company_id: u64) -> Option<CompanyWithEmployees> {
        let tables = self.tables.lock().unwrap();
        load(&tables, company_id)
    }

    /// Deletes the company and, like the foreign key, its employees.
    pub fn remove_company(&self, company_id: u64) {
        let mut tables = self.tables.lock().unwrap();
        tables.companies.remove(&company_id);
        tables.employees.retain(|_, e| e.company_id != company_id);
    }

    pub fn executed(&self) -> Vec<String> {
        self.tables.lock().unwrap().executed.clone()
    }
}

/// Shares the store with an `App` the same way `main` shares the MySQL one.
pub fn app_data(store: &Arc<MemoryCompanyStore>) -> web::Data<dyn CompanyStore> {
    let store: Arc<dyn CompanyStore> = store.clone();
    web::Data::from(store)
}

fn load(tables: &Tables, company_id: u64) -> Option<CompanyWithEmployees> {
    let company = tables.companies.get(&company_id)?.clone();
    let employees = tables
        .employees
        .values()
        .filter(|e| e.company_id == company_id)
        .cloned()
        .collect();
    Some(CompanyWithEmployees { company, employees })
}

#[async_trait]
impl CompanyStore for MemoryCompanyStore {
    async fn find_company(&self, company_id: u64) -> Result<Option<Company>, StoreError> {
        Ok(self.tables.lock().unwrap().companies.get(&company_id).cloned())
    }

    async fn find_with_employees(
        &self,
        company_id: u64,
    ) -> Result<Option<CompanyWithEmployees>, StoreError> {
        Ok(load(&self.tables.lock().unwrap(), company_id))
    }

    async fn save_changes(&self, changes: &[RowChange]) -> Result<SaveReport, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let mut tx = tables.clone();
        let mut report = SaveReport::default();

        for change in changes {
            let affected = match change {
                RowChange::EmployeeSalary { id, salary } => {
                    tx.executed.push(format!("UPDATE employees SET salary WHERE id = {id}"));
                    let rows = match tx.employees.get_mut(id) {
                        Some(employee) => {
                            employee.salary = round_money(*salary);
                            1
                        }
                        None => 0,
                    };
                    expect_one_row("employees", *id, rows)?;
                    rows
                }
                RowChange::CompanyLastSalaryUpdate { id, at } => {
                    tx.executed
                        .push(format!("UPDATE companies SET last_salary_update WHERE id = {id}"));
                    let rows = stamp(&mut tx, *id, *at);
                    expect_one_row("companies", *id, rows)?;
                    rows
                }
            };
            report.record(affected);
        }

        *tables = tx;
        Ok(report)
    }

    async fn raise_salaries_in_place(
        &self,
        company_id: u64,
        factor: Decimal,
        at: NaiveDateTime,
    ) -> Result<SaveReport, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        let mut tx = tables.clone();
        let mut report = SaveReport::default();

        tx.executed.push(format!(
            "UPDATE employees SET salary = salary * {factor} WHERE company_id = {company_id}"
        ));
        let mut raised = 0;
        for employee in tx.employees.values_mut().filter(|e| e.company_id == company_id) {
            employee.salary = round_money(employee.salary * factor);
            raised += 1;
        }
        report.record(raised);

        tx.executed.push(format!(
            "UPDATE companies SET last_salary_update WHERE id = {company_id}"
        ));
        let stamped = stamp(&mut tx, company_id, Some(at));
        expect_one_row("companies", company_id, stamped)?;
        report.record(stamped);

        *tables = tx;
        Ok(report)
    }
}

fn stamp(tables: &mut Tables, company_id: u64, at: Option<NaiveDateTime>) -> u64 {
    match tables.companies.get_mut(&company_id) {
        Some(company) => {
            company.last_salary_update = at;
            1
        }
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::salary::RAISE_FACTOR;
    use chrono::Utc;

    #[actix_web::test]
    async fn stamping_a_missing_company_fails() {
        let store = MemoryCompanyStore::new();

        let err = store
            .raise_salaries_in_place(99, RAISE_FACTOR, Utc::now().naive_utc())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::RowMissing { table: "companies", id: 99 }));

        let err = store
            .save_changes(&[RowChange::CompanyLastSalaryUpdate { id: 99, at: None }])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::RowMissing { table: "companies", id: 99 }));
        assert!(store.executed().is_empty());
    }

    #[actix_web::test]
    async fn failed_save_rolls_back_earlier_changes() {
        let store = MemoryCompanyStore::new().with_company(1, &[100_00]);

        let err = store
            .save_changes(&[
                RowChange::EmployeeSalary {
                    id: 1,
                    salary: Decimal::new(110_00, 2),
                },
                RowChange::EmployeeSalary {
                    id: 42,
                    salary: Decimal::new(110_00, 2),
                },
            ])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::RowMissing { table: "employees", id: 42 }));
        assert_eq!(store.snapshot(1).unwrap().employees[0].salary, Decimal::new(100_00, 2));
        assert!(store.executed().is_empty());
    }
}
