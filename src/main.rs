//! DrinkNow
//!
//! An MCP server for hydration planning.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing::info;
use tracing_subscriber::EnvFilter;

use drinknow::build_info::BuildInfo;
use drinknow::config::Config;
use drinknow::db;
use drinknow::mcp::DrinkNowService;
use drinknow::pricing::HttpPricingClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so stdout stays the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("drinknow=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let build = BuildInfo::current();
    info!(
        version = build.version,
        build = build.build_number,
        compiled_at = build.compiled_at,
        "DrinkNow hydration planner starting"
    );

    let config = Config::load();
    info!(
        database = %config.database_path.display(),
        backend = %config.backend_url,
        locale = ?config.locale,
        "configuration loaded"
    );

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = db::Database::new(&config.database_path)?;
    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        info!(version, "database schema ready");
        Ok(())
    })?;

    let pricing = Arc::new(HttpPricingClient::new(config.backend_url.clone()));
    let service = DrinkNowService::new(&config, database, pricing);

    info!("starting MCP server on stdio");
    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
