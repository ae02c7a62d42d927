use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait when acquiring a pooled connection
    pub connection_timeout: u64,
    /// Create the tables at startup when they do not exist yet
    pub auto_create: bool,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Identity provider domain, e.g. `tenant.auth0.com`
    pub domain: String,
    pub audience: String,
    pub algorithms: Vec<Algorithm>,
    pub jwks_url: Option<String>,
    /// Local JWKS document; when set, keys are never fetched
    pub jwks_file: Option<String>,
    pub leeway_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Empty means any origin is allowed
    pub cors_origins: Vec<String>,
}

impl AuthConfig {
    /// Issuer expected in the `iss` claim
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain)
    }

    pub fn jwks_url(&self) -> String {
        self.jwks_url
            .clone()
            .unwrap_or_else(|| format!("https://{}/.well-known/jwks.json", self.domain))
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let domain = lookup("AUTH0_DOMAIN").ok_or(ConfigError::Missing("AUTH0_DOMAIN"))?;

        let config = match environment {
            Environment::Production => Self::production(database_url, domain),
            Environment::Staging => Self::staging(database_url, domain),
            Environment::Development => Self::development(database_url, domain),
        };

        config.with_overrides(&lookup)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("CASTING_API_PORT").or_else(|| lookup("PORT")) {
            self.server.port = parse("PORT", &v)?;
        }
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }
        if let Some(v) = lookup("DATABASE_AUTO_CREATE") {
            self.database.auto_create = parse("DATABASE_AUTO_CREATE", &v)?;
        }

        // Auth overrides
        if let Some(v) = lookup("API_AUDIENCE") {
            self.auth.audience = v;
        }
        if let Some(v) = lookup("ALGORITHMS") {
            self.auth.algorithms = split_list(&v)
                .map(|alg| {
                    Algorithm::from_str(alg).map_err(|_| ConfigError::Invalid {
                        key: "ALGORITHMS",
                        value: alg.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            if self.auth.algorithms.is_empty() {
                return Err(ConfigError::Invalid { key: "ALGORITHMS", value: v });
            }
        }
        if let Some(v) = lookup("AUTH_JWKS_URL") {
            self.auth.jwks_url = Some(v);
        }
        if let Some(v) = lookup("AUTH_JWKS_FILE") {
            self.auth.jwks_file = Some(v);
        }
        if let Some(v) = lookup("AUTH_LEEWAY_SECS") {
            self.auth.leeway_secs = parse("AUTH_LEEWAY_SECS", &v)?;
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = split_list(&v).map(str::to_string).collect();
        }

        Ok(self)
    }

    fn base(environment: Environment, database_url: String, domain: String) -> Self {
        Self {
            environment,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 10,
                connection_timeout: 30,
                auto_create: true,
            },
            auth: AuthConfig {
                domain,
                audience: "casting-agency".to_string(),
                algorithms: vec![Algorithm::RS256],
                jwks_url: None,
                jwks_file: None,
                leeway_secs: 0,
            },
            security: SecurityConfig {
                cors_origins: Vec::new(),
            },
        }
    }

    fn development(database_url: String, domain: String) -> Self {
        Self::base(Environment::Development, database_url, domain)
    }

    fn staging(database_url: String, domain: String) -> Self {
        let mut config = Self::base(Environment::Staging, database_url, domain);
        config.database.max_connections = 20;
        config.database.connection_timeout = 10;
        config
    }

    fn production(database_url: String, domain: String) -> Self {
        let mut config = Self::base(Environment::Production, database_url, domain);
        config.database.max_connections = 50;
        config.database.connection_timeout = 5;
        config
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty())
}
