//! Development token minting

use anyhow::Result;
use investiq_server::{auth, JwtConfig};

/// Sign a token for `user` with the given JWT settings
pub fn issue_dev_token(
    user: &str,
    email: Option<&str>,
    ttl_secs: u64,
    config: &JwtConfig,
) -> Result<String> {
    if user.trim().is_empty() {
        anyhow::bail!("User id must not be empty");
    }
    auth::issue_token(user, email, ttl_secs, config)
}

pub fn cmd_token(user: &str, email: Option<&str>, ttl_secs: u64) -> Result<()> {
    let config = JwtConfig::from_env();
    let token = issue_dev_token(user, email, ttl_secs, &config)?;

    eprintln!(
        "🔑 Token for '{}' (audience '{}', expires in {}s)",
        user, config.audience, ttl_secs
    );
    eprintln!("   For local development only; production tokens come from your identity provider.");
    println!("{}", token);

    Ok(())
}
