use anyhow::{bail, Context, Result};

pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_model: String,
    pub groq_api_url: String,
    /// Number of questions generated per session.
    pub num_questions: usize,
    /// Attempt budget is `num_questions * attempt_multiplier`.
    pub attempt_multiplier: usize,
    pub max_sessions: usize,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so it can be exercised without
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            groq_api_key: require(&lookup, "GROQ_API_KEY")?,
            groq_model: lookup("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            groq_api_url: lookup("GROQ_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            num_questions: parse_or(&lookup, "NUM_QUESTIONS", 5)?,
            attempt_multiplier: parse_or(&lookup, "ATTEMPT_MULTIPLIER", 3)?,
            max_sessions: parse_or(&lookup, "MAX_SESSIONS", 1000)?,
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        };

        if config.num_questions == 0 {
            bail!("NUM_QUESTIONS must be at least 1");
        }
        if config.attempt_multiplier == 0 {
            bail!("ATTEMPT_MULTIPLIER must be at least 1");
        }
        if config.max_sessions == 0 {
            bail!("MAX_SESSIONS must be at least 1");
        }

        Ok(config)
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
