//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Install a custom settings TOML. Must be called before the first
/// `settings()` access; later calls fail with `AlreadyInitialized`.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub resources: ResourceSettings,
    pub fetch: FetchSettings,
    pub annotate: AnnotateSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSettings {
    /// Path or URL of the polyphone dictionary (JSON or compiled snapshot).
    pub dictionary: String,
    /// Path or URL of the tone table.
    pub tones: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnotateSettings {
    pub fallback_to_plain: bool,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.trim().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty!(resources.dictionary);
    check_non_empty!(resources.tones);

    if s.fetch.timeout_secs == 0 {
        return Err(SettingsError::InvalidValue {
            field: "fetch.timeout_secs".to_string(),
            reason: "must be positive".to_string(),
        });
    }

    Ok(())
}
