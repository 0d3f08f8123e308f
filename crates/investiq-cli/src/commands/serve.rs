//! Server command implementation

use std::path::Path;

use anyhow::Result;
use investiq_server::{auth, JwtConfig, ServerConfig};

use super::open_db;

/// Comma-separated list of CORS origins
pub const ALLOWED_ORIGINS_ENV: &str = "INVESTIQ_ALLOWED_ORIGINS";

/// Split a comma-separated origin list, dropping blanks
pub fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Build the server configuration from flags and environment
pub fn server_config(no_auth: bool) -> ServerConfig {
    ServerConfig {
        require_auth: !no_auth,
        allowed_origins: parse_origins(&std::env::var(ALLOWED_ORIGINS_ENV).unwrap_or_default()),
        jwt: JwtConfig::from_env(),
    }
}

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
) -> Result<()> {
    println!("🚀 Starting InvestIQ API server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    let config = server_config(no_auth);

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
        println!("      Every request runs as '{}'", auth::LOCAL_DEV_USER);
    } else {
        println!(
            "   🔐 Authentication: bearer JWT (HS256, audience '{}')",
            config.jwt.audience
        );
    }
    if !config.allowed_origins.is_empty() {
        println!(
            "   🌐 CORS origins: {} ({})",
            config.allowed_origins.join(", "),
            ALLOWED_ORIGINS_ENV
        );
    }
    println!();

    let db = open_db(db_path, no_encrypt)?;
    investiq_server::serve_with_config(db, host, port, config).await
}
