use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub intake: IntakeConfig,
    pub email: EmailConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Rates and flat unit prices the quote calculator reads. Catalog prices
/// (mulch, per-size units) are compiled in; these are the knobs that
/// change season to season.
#[derive(Clone, Debug)]
pub struct PricingConfig {
    pub tax_rate: Decimal,
    pub delivery_mileage_rate: Decimal,
    pub tablet_unit_price: Decimal,
    pub soil_conditioner_unit_price: Decimal,
    pub deer_guard_unit_price: Decimal,
    pub tree_stake_unit_price: Decimal,
    pub origin_frankfort: String,
    pub origin_lexington: String,
}

#[derive(Clone, Debug)]
pub struct IntakeConfig {
    pub org_name: String,
    pub internal_notification_address: String,
    pub reply_to_address: String,
}

#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: SecretString,
    pub password: SecretString,
    pub enabled: bool,
}

#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub sheet_id: String,
    pub document_folder_id: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub email_enabled: Option<bool>,
    pub internal_notification_address: Option<String>,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub sheet_id: Option<String>,
    pub document_folder_id: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            intake: IntakeConfig {
                org_name: "Trellis Nursery".to_string(),
                internal_notification_address: "hiring@example.test".to_string(),
                reply_to_address: "no-reply@example.test".to_string(),
            },
            email: EmailConfig {
                smtp_host: "localhost".to_string(),
                smtp_port: 587,
                username: String::new().into(),
                password: String::new().into(),
                enabled: false,
            },
            storage: StorageConfig { sheet_id: String::new(), document_folder_id: String::new() },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::new(6, 2),
            delivery_mileage_rate: Decimal::new(225, 2),
            tablet_unit_price: Decimal::new(75, 2),
            soil_conditioner_unit_price: Decimal::new(999, 2),
            deer_guard_unit_price: Decimal::new(399, 2),
            tree_stake_unit_price: Decimal::new(3600, 2),
            origin_frankfort: "100 Nursery Way, Frankfort, KY 40601".to_string(),
            origin_lexington: "2700 Greenhouse Rd, Lexington, KY 40509".to_string(),
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("trellis.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(pricing) = patch.pricing {
            if let Some(tax_rate) = pricing.tax_rate {
                self.pricing.tax_rate = tax_rate;
            }
            if let Some(delivery_mileage_rate) = pricing.delivery_mileage_rate {
                self.pricing.delivery_mileage_rate = delivery_mileage_rate;
            }
            if let Some(tablet_unit_price) = pricing.tablet_unit_price {
                self.pricing.tablet_unit_price = tablet_unit_price;
            }
            if let Some(soil_conditioner_unit_price) = pricing.soil_conditioner_unit_price {
                self.pricing.soil_conditioner_unit_price = soil_conditioner_unit_price;
            }
            if let Some(deer_guard_unit_price) = pricing.deer_guard_unit_price {
                self.pricing.deer_guard_unit_price = deer_guard_unit_price;
            }
            if let Some(tree_stake_unit_price) = pricing.tree_stake_unit_price {
                self.pricing.tree_stake_unit_price = tree_stake_unit_price;
            }
            if let Some(origin_frankfort) = pricing.origin_frankfort {
                self.pricing.origin_frankfort = origin_frankfort;
            }
            if let Some(origin_lexington) = pricing.origin_lexington {
                self.pricing.origin_lexington = origin_lexington;
            }
        }

        if let Some(intake) = patch.intake {
            if let Some(org_name) = intake.org_name {
                self.intake.org_name = org_name;
            }
            if let Some(internal_notification_address) = intake.internal_notification_address {
                self.intake.internal_notification_address = internal_notification_address;
            }
            if let Some(reply_to_address) = intake.reply_to_address {
                self.intake.reply_to_address = reply_to_address;
            }
        }

        if let Some(email) = patch.email {
            if let Some(smtp_host) = email.smtp_host {
                self.email.smtp_host = smtp_host;
            }
            if let Some(smtp_port) = email.smtp_port {
                self.email.smtp_port = smtp_port;
            }
            if let Some(username_value) = email.username {
                self.email.username = secret_value(username_value);
            }
            if let Some(password_value) = email.password {
                self.email.password = secret_value(password_value);
            }
            if let Some(enabled) = email.enabled {
                self.email.enabled = enabled;
            }
        }

        if let Some(storage) = patch.storage {
            if let Some(sheet_id) = storage.sheet_id {
                self.storage.sheet_id = sheet_id;
            }
            if let Some(document_folder_id) = storage.document_folder_id {
                self.storage.document_folder_id = document_folder_id;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("TRELLIS_PRICING_TAX_RATE") {
            self.pricing.tax_rate = parse_decimal("TRELLIS_PRICING_TAX_RATE", &value)?;
        }
        if let Some(value) = read_env("TRELLIS_PRICING_DELIVERY_MILEAGE_RATE") {
            self.pricing.delivery_mileage_rate =
                parse_decimal("TRELLIS_PRICING_DELIVERY_MILEAGE_RATE", &value)?;
        }

        if let Some(value) = read_env("TRELLIS_INTAKE_ORG_NAME") {
            self.intake.org_name = value;
        }
        if let Some(value) = read_env("TRELLIS_INTAKE_INTERNAL_NOTIFICATION_ADDRESS") {
            self.intake.internal_notification_address = value;
        }
        if let Some(value) = read_env("TRELLIS_INTAKE_REPLY_TO_ADDRESS") {
            self.intake.reply_to_address = value;
        }

        if let Some(value) = read_env("TRELLIS_EMAIL_SMTP_HOST") {
            self.email.smtp_host = value;
        }
        if let Some(value) = read_env("TRELLIS_EMAIL_SMTP_PORT") {
            self.email.smtp_port = parse_u16("TRELLIS_EMAIL_SMTP_PORT", &value)?;
        }
        if let Some(value) = read_env("TRELLIS_EMAIL_USERNAME") {
            self.email.username = secret_value(value);
        }
        if let Some(value) = read_env("TRELLIS_EMAIL_PASSWORD") {
            self.email.password = secret_value(value);
        }
        if let Some(value) = read_env("TRELLIS_EMAIL_ENABLED") {
            self.email.enabled = parse_bool("TRELLIS_EMAIL_ENABLED", &value)?;
        }

        if let Some(value) = read_env("TRELLIS_STORAGE_SHEET_ID") {
            self.storage.sheet_id = value;
        }
        if let Some(value) = read_env("TRELLIS_STORAGE_DOCUMENT_FOLDER_ID") {
            self.storage.document_folder_id = value;
        }

        let log_level =
            read_env("TRELLIS_LOGGING_LEVEL").or_else(|| read_env("TRELLIS_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("TRELLIS_LOGGING_FORMAT").or_else(|| read_env("TRELLIS_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(email_enabled) = overrides.email_enabled {
            self.email.enabled = email_enabled;
        }
        if let Some(internal_notification_address) = overrides.internal_notification_address {
            self.intake.internal_notification_address = internal_notification_address;
        }
        if let Some(smtp_username) = overrides.smtp_username {
            self.email.username = secret_value(smtp_username);
        }
        if let Some(smtp_password) = overrides.smtp_password {
            self.email.password = secret_value(smtp_password);
        }
        if let Some(sheet_id) = overrides.sheet_id {
            self.storage.sheet_id = sheet_id;
        }
        if let Some(document_folder_id) = overrides.document_folder_id {
            self.storage.document_folder_id = document_folder_id;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pricing(&self.pricing)?;
        validate_intake(&self.intake)?;
        validate_email(&self.email)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("trellis.toml"), PathBuf::from("config/trellis.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_pricing(pricing: &PricingConfig) -> Result<(), ConfigError> {
    if pricing.tax_rate < Decimal::ZERO || pricing.tax_rate >= Decimal::ONE {
        return Err(ConfigError::Validation(
            "pricing.tax_rate must be a fraction in range 0..1 (e.g. 0.06)".to_string(),
        ));
    }

    let unit_prices = [
        ("pricing.delivery_mileage_rate", pricing.delivery_mileage_rate),
        ("pricing.tablet_unit_price", pricing.tablet_unit_price),
        ("pricing.soil_conditioner_unit_price", pricing.soil_conditioner_unit_price),
        ("pricing.deer_guard_unit_price", pricing.deer_guard_unit_price),
        ("pricing.tree_stake_unit_price", pricing.tree_stake_unit_price),
    ];
    for (key, value) in unit_prices {
        if value < Decimal::ZERO {
            return Err(ConfigError::Validation(format!("{key} must not be negative")));
        }
    }

    if pricing.origin_frankfort.trim().is_empty() || pricing.origin_lexington.trim().is_empty() {
        return Err(ConfigError::Validation(
            "pricing origin addresses must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_intake(intake: &IntakeConfig) -> Result<(), ConfigError> {
    if intake.org_name.trim().is_empty() {
        return Err(ConfigError::Validation("intake.org_name must not be empty".to_string()));
    }

    for (key, address) in [
        ("intake.internal_notification_address", &intake.internal_notification_address),
        ("intake.reply_to_address", &intake.reply_to_address),
    ] {
        if !address.contains('@') {
            return Err(ConfigError::Validation(format!(
                "{key} must be an email address, got `{address}`"
            )));
        }
    }

    Ok(())
}

fn validate_email(email: &EmailConfig) -> Result<(), ConfigError> {
    if email.smtp_port == 0 {
        return Err(ConfigError::Validation(
            "email.smtp_port must be greater than zero".to_string(),
        ));
    }

    if email.enabled {
        if email.smtp_host.trim().is_empty() {
            return Err(ConfigError::Validation(
                "email.smtp_host is required when email.enabled is true".to_string(),
            ));
        }
        if email.username.expose_secret().trim().is_empty() {
            return Err(ConfigError::Validation(
                "email.username is required when email.enabled is true".to_string(),
            ));
        }
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    value.parse::<Decimal>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    pricing: Option<PricingPatch>,
    intake: Option<IntakePatch>,
    email: Option<EmailPatch>,
    storage: Option<StoragePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    tax_rate: Option<Decimal>,
    delivery_mileage_rate: Option<Decimal>,
    tablet_unit_price: Option<Decimal>,
    soil_conditioner_unit_price: Option<Decimal>,
    deer_guard_unit_price: Option<Decimal>,
    tree_stake_unit_price: Option<Decimal>,
    origin_frankfort: Option<String>,
    origin_lexington: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct IntakePatch {
    org_name: Option<String>,
    internal_notification_address: Option<String>,
    reply_to_address: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct EmailPatch {
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    username: Option<String>,
    password: Option<String>,
    enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    sheet_id: Option<String>,
    document_folder_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use rust_decimal::Decimal;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_validate_and_match_posted_rates() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.pricing.tax_rate == Decimal::new(6, 2), "default tax rate should be 6%")?;
        ensure(
            config.pricing.delivery_mileage_rate == Decimal::new(225, 2),
            "default mileage rate should be 2.25",
        )?;
        ensure(!config.email.enabled, "email should default to disabled")?;
        Ok(())
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_SHEET_ID", "sheet-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("trellis.toml");
            fs::write(
                &path,
                r#"
[storage]
sheet_id = "${TEST_SHEET_ID}"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.storage.sheet_id == "sheet-from-env",
                "sheet id should be loaded from environment",
            )
        })();

        clear_vars(&["TEST_SHEET_ID"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TRELLIS_LOG_LEVEL", "warn");
        env::set_var("TRELLIS_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&["TRELLIS_LOG_LEVEL", "TRELLIS_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TRELLIS_STORAGE_SHEET_ID", "sheet-from-env");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("trellis.toml");
            fs::write(
                &path,
                r#"
[pricing]
tax_rate = 0.07

[storage]
sheet_id = "sheet-from-file"

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.pricing.tax_rate == Decimal::new(7, 2), "file tax rate should apply")?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(
                config.storage.sheet_id == "sheet-from-env",
                "env sheet id should win over file and defaults",
            )?;
            Ok(())
        })();

        clear_vars(&["TRELLIS_STORAGE_SHEET_ID"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TRELLIS_PRICING_TAX_RATE", "1.5");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("pricing.tax_rate")
            );
            ensure(has_message, "validation failure should mention pricing.tax_rate")
        })();

        clear_vars(&["TRELLIS_PRICING_TAX_RATE"]);
        result
    }

    #[test]
    fn email_enabled_requires_credentials() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TRELLIS_EMAIL_ENABLED", "true");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("email.username")
            );
            ensure(has_message, "validation failure should mention email.username")
        })();

        clear_vars(&["TRELLIS_EMAIL_ENABLED"]);
        result
    }

    #[test]
    fn secret_values_are_not_leaked_by_debug() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TRELLIS_EMAIL_USERNAME", "mailer@example.test");
        env::set_var("TRELLIS_EMAIL_PASSWORD", "smtp-secret-value");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;
            let debug = format!("{config:?}");

            ensure(
                !debug.contains("smtp-secret-value"),
                "debug output should not contain the smtp password",
            )?;
            ensure(
                config.email.username.expose_secret() == "mailer@example.test",
                "username should be readable through expose_secret",
            )?;
            Ok(())
        })();

        clear_vars(&["TRELLIS_EMAIL_USERNAME", "TRELLIS_EMAIL_PASSWORD"]);
        result
    }
}
