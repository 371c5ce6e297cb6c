//! Survey service settings.
//!
//! The expiry window and the assessment service location are externally
//! supplied; nothing in the core hardwires them.

use serde::Deserialize;

const DEFAULT_EXPIRY_DAYS: u32 = 30;
const DEFAULT_ASSESSMENT_BASE_URL: &str = "http://localhost:8080";

/// Externally supplied survey settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SurveyConfig {
    /// Days after creation until a survey's invitations may expire.
    pub expiry_days: u32,
    /// Base URL of the assessment service used by the HTTP fetcher.
    pub assessment_base_url: String,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            expiry_days: DEFAULT_EXPIRY_DAYS,
            assessment_base_url: DEFAULT_ASSESSMENT_BASE_URL.to_string(),
        }
    }
}

impl SurveyConfig {
    /// Loads settings from the environment, falling back to defaults.
    ///
    /// Reads `SURVEY_EXPIRE_DAYS` and `ASSESSMENT_BASE_URL`. A non-numeric
    /// expiry value is rejected rather than silently defaulted.
    pub fn from_env() -> Result<Self, String> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("SURVEY_EXPIRE_DAYS") {
            config.expiry_days = value
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("SURVEY_EXPIRE_DAYS must be a number of days, got `{value}`"))?;
        }
        if let Ok(value) = std::env::var("ASSESSMENT_BASE_URL") {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err("ASSESSMENT_BASE_URL must not be empty".to_string());
            }
            config.assessment_base_url = trimmed.trim_end_matches('/').to_string();
        }

        Ok(config)
    }
}
