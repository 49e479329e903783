use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::employee::Employee;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Company {
    #[schema(example = 1)]
    pub id: u64,

    /// UTC time of the last salary raise, `None` until the first one.
    #[schema(
        example = "2026-01-01T09:30:00",
        value_type = Option<String>,
        format = "date-time",
        nullable = true
    )]
    pub last_salary_update: Option<NaiveDateTime>,
}

/// A company together with every employee it owns.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CompanyWithEmployees {
    #[serde(flatten)]
    pub company: Company,
    pub employees: Vec<Employee>,
}
