use actix_web::{HttpResponse, web};

use crate::{error::AppError, store::CompanyStore};

/// Get a company with its employees
#[utoipa::path(
    get,
    path = "/companies/{company_id}",
    params(
        ("company_id", Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Company found", body = crate::model::company::CompanyWithEmployees),
        (status = 404, description = "Company not found", body = Object, example = json!({
            "message": "The Company with Id '1' was not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Company"
)]
pub async fn get_company(
    store: web::Data<dyn CompanyStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let company_id = path.into_inner();

    let company = store
        .find_with_employees(company_id)
        .await?
        .ok_or(AppError::CompanyNotFound { company_id })?;

    Ok(HttpResponse::Ok().json(company))
}
