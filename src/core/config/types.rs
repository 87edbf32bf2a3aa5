use thiserror::Error;

#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub(super) server: ServerSettings,
    pub(super) runtime: RuntimeSettings,
    pub(super) api: ApiSettings,
    pub(super) security: SecuritySettings,
    pub(super) cors: CorsSettings,
    pub(super) database: DatabaseSettings,
    pub(super) admin: AdminSettings,
    pub(super) telemetry: TelemetrySettings,
}

#[derive(Debug, Clone)]
pub(crate) struct ServerSettings {
    pub(crate) host: String,
    pub(crate) port: u16,
}

#[derive(Debug, Clone)]
pub(crate) struct RuntimeSettings {
    pub(crate) environment: Environment,
    /// Production always runs strict; elsewhere `LEARNING_STRICT_CONFIG` opts in.
    pub(crate) strict_config: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiSettings {
    pub(crate) project_name: String,
    pub(crate) version: String,
}

#[derive(Debug, Clone)]
pub(crate) struct SecuritySettings {
    pub(crate) secret_key: String,
    pub(crate) access_token_expire_minutes: u64,
    pub(crate) algorithm: String,
}

#[derive(Debug, Clone)]
pub(crate) struct CorsSettings {
    pub(crate) origins: Vec<String>,
}

/// Either a full connection string or the discrete `POSTGRES_*` parts.
#[derive(Debug, Clone)]
pub(crate) enum DatabaseSettings {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: String,
        name: String,
    },
}

#[derive(Debug, Clone)]
pub(crate) struct AdminSettings {
    pub(crate) first_superuser_username: String,
    pub(crate) first_superuser_password: String,
}

#[derive(Debug, Clone)]
pub(crate) struct TelemetrySettings {
    pub(crate) log_level: String,
    pub(crate) json: bool,
    pub(crate) prometheus_enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    pub(super) fn from_label(label: Option<&str>) -> Self {
        match label.map(str::to_ascii_lowercase).as_deref() {
            Some("production" | "prod") => Self::Production,
            Some("test" | "testing") => Self::Test,
            _ => Self::Development,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("{key}={value:?} is not valid: {reason}")]
    Invalid { key: &'static str, value: String, reason: &'static str },
    #[error("{0} must be set when strict configuration is enabled")]
    MissingSecret(&'static str),
}

impl ConfigError {
    pub(super) fn invalid(key: &'static str, value: impl Into<String>, reason: &'static str) -> Self {
        Self::Invalid { key, value: value.into(), reason }
    }
}

impl DatabaseSettings {
    pub(crate) fn database_url(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::Parts { host, port, user, password, name } => {
                format!("postgresql://{user}:{password}@{host}:{port}/{name}")
            }
        }
    }

    /// True when the connection carries no credentials of its own.
    pub(super) fn lacks_password(&self) -> bool {
        matches!(self, Self::Parts { password, .. } if password.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_labels() {
        assert_eq!(Environment::from_label(Some("PROD")), Environment::Production);
        assert_eq!(Environment::from_label(Some("testing")), Environment::Test);
        assert_eq!(Environment::from_label(Some("staging")), Environment::Development);
        assert_eq!(Environment::from_label(None), Environment::Development);
    }

    #[test]
    fn parts_are_joined_into_a_url() {
        let database = DatabaseSettings::Parts {
            host: "db".to_string(),
            port: 5433,
            user: "learning".to_string(),
            password: String::new(),
            name: "learning_db".to_string(),
        };
        assert_eq!(database.database_url(), "postgresql://learning:@db:5433/learning_db");
        assert!(database.lacks_password());
        assert!(!DatabaseSettings::Url("postgresql://x".to_string()).lacks_password());
    }
}
