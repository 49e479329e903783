use crate::api::{company, salary};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/increase-salaries").route(web::put().to(salary::increase_salaries)),
    )
    .service(
        web::resource("/increase-salaries-sql")
            .route(web::put().to(salary::increase_salaries_sql)),
    )
    // /companies/{company_id}
    .service(web::resource("/companies/{company_id}").route(web::get().to(company::get_company)));
}
