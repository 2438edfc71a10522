use std::env;
use std::time::Duration;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        dotenv::dotenv().ok();

        // JWT_EXPIRATION is given in days, e.g. "7d"
        let jwt_expiration_days = env::var("JWT_EXPIRATION")
            .unwrap_or_else(|_| "7d".into())
            .trim_end_matches('d')
            .parse::<u64>()
            .unwrap_or(7);

        Ok(Config {
            database_url: env::var("DATABASE_URL")?,
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_expiration_secs: jwt_expiration_days * 86400,
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3001),
        })
    }

    pub fn jwt_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_expiration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn jwt_expiration_covers_the_configured_days() {
        let config = Config {
            database_url: "postgres://localhost/kaziconnect".into(),
            jwt_secret: "secret".into(),
            jwt_expiration_secs: 7 * 86400,
            server_host: "127.0.0.1".into(),
            server_port: 3001,
        };
        assert_eq!(config.jwt_expiration().as_secs(), 604800);
    }
}
