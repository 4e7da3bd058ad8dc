//! MacroMate
//!
//! An MCP server for meal logging, macro targets and workout plans.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use macromate::ai::GatewayClient;
use macromate::build_info;
use macromate::config::AppConfig;
use macromate::db::{self, Database};
use macromate::mcp::MacroMateService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays clean for MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("macromate=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = AppConfig::from_env();
    let db_path = config.database_path.clone();
    eprintln!("Database path: {}", db_path.display());

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = Database::new(&db_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    if config.ai.api_key.is_none() {
        warn!("MACROMATE_AI_API_KEY is not set; AI tools will fail until it is configured");
    } else {
        info!(model = %config.ai.model, "AI gateway configured");
    }
    let ai = GatewayClient::new(config.ai.clone())?;

    let service = MacroMateService::new(db_path, database, Arc::new(ai), &config.ai);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
