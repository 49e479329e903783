use actix_web::{HttpResponse, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppError, service::salary, store::CompanyStore};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanyQuery {
    /// Company whose employees get the raise
    #[serde(rename = "companyId")]
    #[param(example = 1)]
    pub company_id: u64,
}

/// Increase salaries row by row
///
/// Loads every employee of the company, raises each salary by 10% in memory
/// and saves one UPDATE per employee plus one for the company.
#[utoipa::path(
    put,
    path = "/increase-salaries",
    params(CompanyQuery),
    responses(
        (status = 204, description = "Salaries increased"),
        (status = 400, description = "Missing or malformed companyId"),
        (status = 404, description = "Company not found", body = Object, example = json!({
            "message": "The Company with Id '1' was not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Salary"
)]
pub async fn increase_salaries(
    store: web::Data<dyn CompanyStore>,
    query: web::Query<CompanyQuery>,
) -> Result<HttpResponse, AppError> {
    salary::increase_salaries_tracked(store.get_ref(), query.company_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Increase salaries with one SQL statement
///
/// Raises every salary of the company by 10% with a single UPDATE and stamps
/// the company, inside one transaction.
#[utoipa::path(
    put,
    path = "/increase-salaries-sql",
    params(CompanyQuery),
    responses(
        (status = 204, description = "Salaries increased"),
        (status = 400, description = "Missing or malformed companyId"),
        (status = 404, description = "Company not found", body = Object, example = json!({
            "message": "The Company with Id '1' was not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Salary"
)]
pub async fn increase_salaries_sql(
    store: web::Data<dyn CompanyStore>,
    query: web::Query<CompanyQuery>,
) -> Result<HttpResponse, AppError> {
    salary::increase_salaries_set_based(store.get_ref(), query.company_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
