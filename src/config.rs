use anyhow::{bail, Context};

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub base_url: String,
    pub service_role_key: String,
}

/// Runtime configuration, sourced from the environment. Auth credentials are
/// optional as a pair; setting only one of the two is a misconfiguration.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub auth: Option<AuthConfig>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL must be set to the Postgres instance backing the member store")?;

        let base_url = std::env::var("SUPABASE_URL").ok();
        let service_role_key = std::env::var("SUPABASE_SERVICE_ROLE_KEY").ok();

        let auth = match (base_url, service_role_key) {
            (Some(base_url), Some(service_role_key)) => Some(AuthConfig {
                base_url,
                service_role_key,
            }),
            (None, None) => None,
            _ => bail!("SUPABASE_URL and SUPABASE_SERVICE_ROLE_KEY must be set together"),
        };

        Ok(Self { database_url, auth })
    }
}
