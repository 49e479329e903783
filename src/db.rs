use anyhow::{Context, Result};
use rust_decimal::Decimal;
use sqlx::{MySql, MySqlPool, QueryBuilder, mysql::MySqlPoolOptions};
use tracing::info;

const CREATE_COMPANIES: &str = r#"
CREATE TABLE IF NOT EXISTS companies (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    last_salary_update DATETIME(6) NULL
)
"#;

const CREATE_EMPLOYEES: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    company_id BIGINT UNSIGNED NOT NULL,
    salary DECIMAL(18, 2) NOT NULL,
    INDEX idx_employees_company_id (company_id),
    CONSTRAINT fk_employees_company FOREIGN KEY (company_id)
        REFERENCES companies (id) ON DELETE CASCADE
)
"#;

// Keeps a single multi-row INSERT well under MySQL's placeholder limit.
const SEED_BATCH: usize = 1_000;

pub async fn init_db(database_url: &str, max_connections: u32) -> Result<MySqlPool> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

pub async fn ensure_schema(pool: &MySqlPool) -> Result<()> {
    sqlx::query(CREATE_COMPANIES)
        .execute(pool)
        .await
        .context("Failed to create companies table")?;
    sqlx::query(CREATE_EMPLOYEES)
        .execute(pool)
        .await
        .context("Failed to create employees table")?;

    info!("Database schema is up to date");
    Ok(())
}

/// Inserts one company with `employees` employees when no company exists yet.
/// Returns the id of the seeded company.
pub async fn seed_demo_company(pool: &MySqlPool, employees: u32) -> Result<Option<u64>> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM companies")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!(existing, "Skipping demo seed, companies already present");
        return Ok(None);
    }

    let mut tx = pool.begin().await?;

    let company_id = sqlx::query("INSERT INTO companies (last_salary_update) VALUES (NULL)")
        .execute(&mut *tx)
        .await?
        .last_insert_id();

    let salaries: Vec<Decimal> = (0..employees).map(demo_salary).collect();
    for chunk in salaries.chunks(SEED_BATCH) {
        let mut insert: QueryBuilder<MySql> =
            QueryBuilder::new("INSERT INTO employees (company_id, salary) ");
        insert.push_values(chunk, |mut row, salary| {
            row.push_bind(company_id).push_bind(*salary);
        });
        insert.build().execute(&mut *tx).await?;
    }

    tx.commit().await?;

    info!(company_id, employees, "Seeded demo company");
    Ok(Some(company_id))
}

/// Spread salaries between 1000.00 and 5999.00.
fn demo_salary(n: u32) -> Decimal {
    Decimal::new(1_000_00 + i64::from(n % 5_000) * 100, 2)
}
