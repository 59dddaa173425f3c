use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    pub environment: String,
    pub secret_key: String,
    pub password_hash_cost: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path =
            env::var("DATABASE_PATH").unwrap_or_else(|_| "./instance/blog.sqlite".to_string());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| "Invalid DATABASE_MAX_CONNECTIONS")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let secret_key = resolve_secret_key(env::var("SECRET_KEY").ok(), &environment)?;

        let password_hash_cost = parse_hash_cost(env::var("PASSWORD_HASH_COST").ok())?;

        Ok(Config {
            server_host,
            server_port,
            database_path,
            database_max_connections,
            environment,
            secret_key,
            password_hash_cost,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Session cookies carry the `Secure` attribute outside development
    pub fn secure_cookies(&self) -> bool {
        self.environment == "production"
    }
}

/// The well-known development key is only accepted in development.
fn resolve_secret_key(value: Option<String>, environment: &str) -> Result<String, String> {
    match value {
        Some(key) if !key.is_empty() => Ok(key),
        _ if environment == "development" || environment == "test" => Ok("dev".to_string()),
        _ => Err("SECRET_KEY must be set outside development".to_string()),
    }
}

fn parse_hash_cost(value: Option<String>) -> Result<u32, String> {
    let Some(raw) = value else {
        return Ok(bcrypt::DEFAULT_COST);
    };

    let cost: u32 = raw.parse().map_err(|_| "Invalid PASSWORD_HASH_COST")?;
    if !(4..=31).contains(&cost) {
        return Err(format!("PASSWORD_HASH_COST must be between 4 and 31, got {cost}"));
    }
    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_key_defaults_in_development() {
        assert_eq!(resolve_secret_key(None, "development").unwrap(), "dev");
        assert_eq!(
            resolve_secret_key(Some(String::new()), "test").unwrap(),
            "dev"
        );
    }

    #[test]
    fn test_secret_key_required_in_production() {
        assert!(resolve_secret_key(None, "production").is_err());
        assert_eq!(
            resolve_secret_key(Some("s3cret".to_string()), "production").unwrap(),
            "s3cret"
        );
    }

    #[test]
    fn test_parse_hash_cost() {
        assert_eq!(parse_hash_cost(None).unwrap(), bcrypt::DEFAULT_COST);
        assert_eq!(parse_hash_cost(Some("4".to_string())).unwrap(), 4);
        assert!(parse_hash_cost(Some("3".to_string())).is_err());
        assert!(parse_hash_cost(Some("32".to_string())).is_err());
        assert!(parse_hash_cost(Some("fast".to_string())).is_err());
    }

    #[test]
    fn test_server_address_and_cookie_flags() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            database_path: "blog.sqlite".to_string(),
            database_max_connections: 1,
            environment: "production".to_string(),
            secret_key: "key".to_string(),
            password_hash_cost: 4,
        };

        assert_eq!(config.server_address(), "127.0.0.1:5000");
        assert!(config.secure_cookies());
    }
}
