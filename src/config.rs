//! Application-level configuration constants and runtime settings.

use serde::Deserialize;
use thiserror::Error;

// UI Behavior
pub const DEBOUNCE_MS: u32 = 300;
pub const SETTINGS_ELEMENT_ID: &str = "loan-calculator-settings";
pub const CHART_ELEMENT_ID: &str = "loanChart";
pub const CURRENCY_SYMBOL: &str = "₹";

// Validation limits
pub const MIN_LOAN_AMOUNT: f64 = 100_000.0;
pub const MIN_RATE_PCT: f64 = 1.0;
pub const MAX_RATE_PCT: f64 = 30.0;
pub const MIN_TERM_YEARS: u32 = 1;
pub const MAX_TERM_YEARS: u32 = 30;

// Prefill values used when arriving from a property listing
pub const PREFILL_DOWN_PAYMENT_FRACTION: f64 = 0.2;
pub const PREFILL_TERM_YEARS: u32 = 20;
pub const PREFILL_RATE_PCT: f64 = 8.5;

// Cache
pub const CACHE_CAPACITY: usize = 64;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
    #[error("invalid limits: {0}")]
    InvalidLimits(String),
}

/// Page-level overrides, read from a JSON `<script>` block when present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    pub debounce_ms: u32,
    pub min_loan_amount: f64,
    pub min_rate_pct: f64,
    pub max_rate_pct: f64,
    pub min_term_years: u32,
    pub max_term_years: u32,
    /// When set, a valid form is posted here instead of being rendered locally.
    pub form_action: Option<String>,
    pub log_level: String,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
            min_loan_amount: MIN_LOAN_AMOUNT,
            min_rate_pct: MIN_RATE_PCT,
            max_rate_pct: MAX_RATE_PCT,
            min_term_years: MIN_TERM_YEARS,
            max_term_years: MAX_TERM_YEARS,
            form_action: None,
            log_level: "info".to_string(),
        }
    }
}

impl CalculatorSettings {
    /// Parse settings from JSON; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), SettingsError> {
        if self.min_rate_pct > self.max_rate_pct {
            return Err(SettingsError::InvalidLimits(format!(
                "rate range {}..{} is empty",
                self.min_rate_pct, self.max_rate_pct
            )));
        }
        if self.min_term_years > self.max_term_years {
            return Err(SettingsError::InvalidLimits(format!(
                "term range {}..{} is empty",
                self.min_term_years, self.max_term_years
            )));
        }
        self.level()?;
        Ok(())
    }

    pub fn level(&self) -> Result<log::Level, SettingsError> {
        self.log_level
            .parse::<log::Level>()
            .map_err(|_| SettingsError::UnknownLogLevel(self.log_level.clone()))
    }

    /// Blank actions are treated as "render locally".
    pub fn form_action(&self) -> Option<&str> {
        self.form_action
            .as_deref()
            .map(str::trim)
            .filter(|action| !action.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = CalculatorSettings::from_json(r#"{"debounce_ms": 500}"#).unwrap();
        assert_eq!(settings.debounce_ms, 500);
        assert_eq!(settings.min_loan_amount, MIN_LOAN_AMOUNT);
        assert_eq!(settings.level().unwrap(), log::Level::Info);
    }

    #[test]
    fn rejects_inverted_rate_range() {
        let err = CalculatorSettings::from_json(r#"{"min_rate_pct": 12, "max_rate_pct": 4}"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidLimits(_)));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let err = CalculatorSettings::from_json(r#"{"log_level": "loud"}"#).unwrap_err();
        assert!(matches!(err, SettingsError::UnknownLogLevel(_)));
    }

    #[test]
    fn blank_form_action_means_local_render() {
        let settings =
            CalculatorSettings::from_json(r#"{"form_action": "  "}"#).unwrap();
        assert_eq!(settings.form_action(), None);
    }
}
