use crate::model::{
    company::{Company, CompanyWithEmployees},
    employee::Employee,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Salary Raise API",
        version = "0.1.0",
        description = r#"
## Salary raises, two ways

Both endpoints give every employee of a company a **10%** raise and stamp
the company's `last_salary_update`. They differ only in how the rows reach
the database:

- `PUT /increase-salaries` loads all employees, raises them in memory and
  issues **one UPDATE per employee** plus one for the company.
- `PUT /increase-salaries-sql` issues **one set-based UPDATE** for all
  employees plus one for the company, inside a single transaction.

Use `GET /companies/{company_id}` to inspect the result.
"#,
    ),
    paths(
        crate::api::salary::increase_salaries,
        crate::api::salary::increase_salaries_sql,
        crate::api::company::get_company,
    ),
    components(schemas(Company, CompanyWithEmployees, Employee)),
    tags(
        (name = "Salary", description = "Salary raise strategies"),
        (name = "Company", description = "Company lookup"),
    )
)]
pub struct ApiDoc;
