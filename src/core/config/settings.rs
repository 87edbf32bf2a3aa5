use super::secret::{resolve_signing_key, KeyOrigin};
use super::source::EnvSource;
use super::types::{
    AdminSettings, ApiSettings, ConfigError, CorsSettings, DatabaseSettings, Environment,
    RuntimeSettings, SecuritySettings, ServerSettings, Settings, TelemetrySettings,
};

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        Self::from_source(&EnvSource::process())
    }

    fn from_source<F>(env: &EnvSource<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment =
            Environment::from_label(env.first_of(&["LEARNING_ENV", "ENVIRONMENT"]).as_deref());

        let (secret_key, key_origin) =
            resolve_signing_key(env.get("SECRET_KEY"), env.get("LEARNING_SECRET_KEY_FILE"));
        match &key_origin {
            KeyOrigin::Environment => {}
            KeyOrigin::File(path) => {
                tracing::debug!(path = %path.display(), "Loaded signing key from file")
            }
            KeyOrigin::Generated(path) => {
                tracing::info!(path = %path.display(), "Generated a new signing key")
            }
        }

        let database = match env.get("DATABASE_URL") {
            Some(url) => DatabaseSettings::Url(url),
            None => DatabaseSettings::Parts {
                host: env.text("POSTGRES_SERVER", "localhost"),
                port: env.number("POSTGRES_PORT", 5432)?,
                user: env.text("POSTGRES_USER", "learning"),
                password: env.text("POSTGRES_PASSWORD", ""),
                name: env.text("POSTGRES_DB", "learning_db"),
            },
        };

        let settings = Self {
            server: ServerSettings {
                host: env.text("LEARNING_HOST", "0.0.0.0"),
                port: env.number("LEARNING_PORT", 8000)?,
            },
            runtime: RuntimeSettings {
                environment,
                strict_config: env.flag("LEARNING_STRICT_CONFIG")
                    || environment == Environment::Production,
            },
            api: ApiSettings {
                project_name: env.text("PROJECT_NAME", "Learning Platform API"),
                version: env.text("VERSION", env!("CARGO_PKG_VERSION")),
            },
            security: SecuritySettings {
                secret_key,
                access_token_expire_minutes: env.number("ACCESS_TOKEN_EXPIRE_MINUTES", 30)?,
                algorithm: env.text("ALGORITHM", "HS256"),
            },
            cors: CorsSettings { origins: env.origins("BACKEND_CORS_ORIGINS")? },
            database,
            admin: AdminSettings {
                first_superuser_username: env.text("FIRST_SUPERUSER_USERNAME", "admin"),
                first_superuser_password: env.text("FIRST_SUPERUSER_PASSWORD", ""),
            },
            telemetry: TelemetrySettings {
                log_level: env.text("LEARNING_LOG_LEVEL", "info"),
                json: env.flag("LEARNING_LOG_JSON"),
                prometheus_enabled: env.flag("PROMETHEUS_ENABLED"),
            },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn security(&self) -> &SecuritySettings {
        &self.security
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn admin(&self) -> &AdminSettings {
        &self.admin
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::invalid("LEARNING_HOST", "", "host must not be empty"));
        }
        if self.server.port == 0 {
            return Err(ConfigError::invalid("LEARNING_PORT", "0", "port must be non-zero"));
        }
        if self.security.access_token_expire_minutes == 0 {
            return Err(ConfigError::invalid(
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                "0",
                "tokens must live at least a minute",
            ));
        }
        if self.security.algorithm != "HS256" {
            return Err(ConfigError::invalid(
                "ALGORITHM",
                self.security.algorithm.clone(),
                "only HS256 is supported",
            ));
        }

        if !self.runtime.strict_config {
            return Ok(());
        }
        if self.database.lacks_password() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }
        if self.admin.first_superuser_password.is_empty() {
            return Err(ConfigError::MissingSecret("FIRST_SUPERUSER_PASSWORD"));
        }

        Ok(())
    }
}
