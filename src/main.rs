use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::{self, Data};
use actix_web::{App, HttpServer};
use anyhow::Context;
use dotenvy::dotenv;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod routes;
mod service;
mod store;
mod tracking;

use config::Config;
use db::init_db;
use store::{CompanyStore, mysql::MySqlCompanyStore};

use crate::docs::ApiDoc;
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!(addr = %config.server_addr, env = %config.app_env, "Server starting...");

    let pool = init_db(&config.database_url, config.db_max_connections).await?;

    if config.auto_migrate {
        db::ensure_schema(&pool).await?;
    }
    if config.seed_employees > 0 {
        db::seed_demo_company(&pool, config.seed_employees).await?;
    }

    let store: Arc<dyn CompanyStore> = Arc::new(MySqlCompanyStore::new(pool));
    let store = Data::from(store);
    let swagger_enabled = config.swagger_enabled();
    let server_addr = config.server_addr.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .configure(|cfg| {
                if swagger_enabled {
                    // wildcard {_:.*} so the UI's JS/CSS files resolve
                    cfg.service(
                        SwaggerUi::new("/swagger-ui/{_:.*}")
                            .url("/api-doc/openapi.json", ApiDoc::openapi()),
                    );
                }
            })
            .app_data(store.clone())
            .configure(routes::configure)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound().json(serde_json::json!({
                    "message": "Not found"
                }))
            }))
    })
    .bind(&server_addr)
    .with_context(|| format!("Failed to bind {server_addr}"))?
    .run()
    .await?;

    Ok(())
}
