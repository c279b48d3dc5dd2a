use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub admin: AdminConfig,
    pub email: EmailConfig,
    pub recipients: RecipientsConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

/// Admin API authentication.
///
/// The admin surface is protected by a single shared-secret bearer token.
/// The secret is optional so the server can still boot without it, but an
/// unset secret denies every admin request rather than allowing them.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    pub password: Option<String>,
}

/// Which email backend is active. Exactly one is constructed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTransport {
    Smtp,
    HttpApi,
}

#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub transport: EmailTransport,
    /// Sender address for every outbound message
    pub from_email: String,
    pub smtp: SmtpConfig,
    pub http_api: HttpApiConfig,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// HTTP transactional-email provider configuration
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

/// Recipient configuration store settings.
///
/// `env_fallbacks` holds the raw `EMAIL_1`..`EMAIL_10` values read once at
/// startup, so recipient resolution never touches the process environment
/// afterwards. Values may carry a trailing `# comment`; the store strips it.
#[derive(Debug, Clone)]
pub struct RecipientsConfig {
    pub path: PathBuf,
    pub org_file_prefix: String,
    pub env_fallbacks: HashMap<u8, String>,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            admin: AdminConfig::from_env()?,
            email: EmailConfig::from_env()?,
            recipients: RecipientsConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
        })
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, String> {
        let password = env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty());

        Ok(Self { password })
    }
}

impl EmailConfig {
    const DEFAULT_SMTP_PORT: u16 = 465;

    pub fn from_env() -> Result<Self, String> {
        let transport = match env::var("EMAIL_TRANSPORT")
            .unwrap_or_else(|_| "smtp".to_string())
            .to_lowercase()
            .as_str()
        {
            "smtp" => EmailTransport::Smtp,
            "http" => EmailTransport::HttpApi,
            other => return Err(format!("Invalid EMAIL_TRANSPORT: {}", other)),
        };

        let from_email = env::var("SMTP_FROM_EMAIL")
            .unwrap_or_else(|_| "noreply@floridasons.org".to_string());

        let smtp_port = env::var("SMTP_PORT")
            .unwrap_or_else(|_| Self::DEFAULT_SMTP_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| "SMTP_PORT must be a valid number".to_string())?;

        Ok(Self {
            transport,
            from_email,
            smtp: SmtpConfig {
                host: env::var("SMTP_HOST").ok().filter(|s| !s.is_empty()),
                port: smtp_port,
                username: env::var("SMTP_USER").ok().filter(|s| !s.is_empty()),
                password: env::var("SMTP_PASS").ok().filter(|s| !s.is_empty()),
            },
            http_api: HttpApiConfig {
                base_url: env::var("EMAIL_API_URL").ok().filter(|s| !s.is_empty()),
                api_key: env::var("EMAIL_API_KEY").ok().filter(|s| !s.is_empty()),
            },
        })
    }
}

impl RecipientsConfig {
    const DEFAULT_PATH: &'static str = "config/report_emails.json";
    const DEFAULT_ORG_FILE_PREFIX: &'static str = "SAL";

    pub fn from_env() -> Result<Self, String> {
        let path = env::var("REPORT_EMAILS_PATH")
            .unwrap_or_else(|_| Self::DEFAULT_PATH.to_string())
            .into();

        let org_file_prefix = env::var("ORG_FILE_PREFIX")
            .unwrap_or_else(|_| Self::DEFAULT_ORG_FILE_PREFIX.to_string());

        let mut env_fallbacks = HashMap::new();
        for id in 1..=10u8 {
            if let Ok(value) = env::var(format!("EMAIL_{}", id)) {
                if !value.trim().is_empty() {
                    env_fallbacks.insert(id, value);
                }
            }
        }

        Ok(Self {
            path,
            org_file_prefix,
            env_fallbacks,
        })
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Squadron Reports API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "API documentation for the squadron report portal".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}
