//! Snapshot based change tracking for loaded aggregates.
//!
//! A [`Tracked`] value keeps the state it was loaded with next to the state
//! being mutated. When it is saved only the rows whose columns actually
//! differ are turned into [`RowChange`]s, one per row.

use std::collections::HashMap;
use std::ops::{Deref, DerefMut};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::model::{
    company::{Company, CompanyWithEmployees},
    employee::Employee,
};

/// A single-row UPDATE produced by the tracker.
#[derive(Debug, Clone, PartialEq)]
pub enum RowChange {
    EmployeeSalary { id: u64, salary: Decimal },
    CompanyLastSalaryUpdate { id: u64, at: Option<NaiveDateTime> },
}

/// Types whose mutations can be expressed as row updates.
pub trait DetectChanges {
    fn detect_changes(&self, original: &Self, out: &mut Vec<RowChange>);
}

impl DetectChanges for Employee {
    fn detect_changes(&self, original: &Self, out: &mut Vec<RowChange>) {
        if self.salary != original.salary {
            out.push(RowChange::EmployeeSalary {
                id: self.id,
                salary: self.salary,
            });
        }
    }
}

impl DetectChanges for Company {
    fn detect_changes(&self, original: &Self, out: &mut Vec<RowChange>) {
        if self.last_salary_update != original.last_salary_update {
            out.push(RowChange::CompanyLastSalaryUpdate {
                id: self.id,
                at: self.last_salary_update,
            });
        }
    }
}

impl DetectChanges for CompanyWithEmployees {
    // The owning company comes first, so a company deleted since the load is
    // the first row reported missing.
    fn detect_changes(&self, original: &Self, out: &mut Vec<RowChange>) {
        self.company.detect_changes(&original.company, out);

        let before: HashMap<u64, &Employee> =
            original.employees.iter().map(|e| (e.id, e)).collect();
        for employee in &self.employees {
            if let Some(before) = before.get(&employee.id) {
                employee.detect_changes(before, out);
            }
        }
    }
}

#[derive(Debug)]
pub struct Tracked<T> {
    original: T,
    current: T,
}

impl<T: Clone + DetectChanges> Tracked<T> {
    pub fn new(loaded: T) -> Self {
        Self {
            original: loaded.clone(),
            current: loaded,
        }
    }

    /// Row updates needed to bring storage in line with the current state.
    pub fn changes(&self) -> Vec<RowChange> {
        let mut out = Vec::new();
        self.current.detect_changes(&self.original, &mut out);
        out
    }

    /// Called once the changes are persisted; the current state becomes the new baseline.
    pub fn accept_changes(&mut self) {
        self.original = self.current.clone();
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.current
    }
}

impl<T> DerefMut for Tracked<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.current
    }
}
