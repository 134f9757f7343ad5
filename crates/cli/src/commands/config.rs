use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::ExposeSecret;
use toml::Value;
use trellis_core::config::{AppConfig, LoadOptions};

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let source = |key_path: &str, env_key: &str| {
        field_source(key_path, Some(env_key), config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "pricing.tax_rate",
        &config.pricing.tax_rate.to_string(),
        source("pricing.tax_rate", "TRELLIS_PRICING_TAX_RATE"),
    ));
    lines.push(render_line(
        "pricing.delivery_mileage_rate",
        &config.pricing.delivery_mileage_rate.to_string(),
        source("pricing.delivery_mileage_rate", "TRELLIS_PRICING_DELIVERY_MILEAGE_RATE"),
    ));
    lines.push(render_line(
        "pricing.origin_frankfort",
        &config.pricing.origin_frankfort,
        source("pricing.origin_frankfort", "TRELLIS_PRICING_ORIGIN_FRANKFORT"),
    ));
    lines.push(render_line(
        "pricing.origin_lexington",
        &config.pricing.origin_lexington,
        source("pricing.origin_lexington", "TRELLIS_PRICING_ORIGIN_LEXINGTON"),
    ));

    lines.push(render_line(
        "intake.org_name",
        &config.intake.org_name,
        source("intake.org_name", "TRELLIS_INTAKE_ORG_NAME"),
    ));
    lines.push(render_line(
        "intake.internal_notification_address",
        &config.intake.internal_notification_address,
        source(
            "intake.internal_notification_address",
            "TRELLIS_INTAKE_INTERNAL_NOTIFICATION_ADDRESS",
        ),
    ));
    lines.push(render_line(
        "intake.reply_to_address",
        &config.intake.reply_to_address,
        source("intake.reply_to_address", "TRELLIS_INTAKE_REPLY_TO_ADDRESS"),
    ));

    lines.push(render_line(
        "email.smtp_host",
        &config.email.smtp_host,
        source("email.smtp_host", "TRELLIS_EMAIL_SMTP_HOST"),
    ));
    lines.push(render_line(
        "email.smtp_port",
        &config.email.smtp_port.to_string(),
        source("email.smtp_port", "TRELLIS_EMAIL_SMTP_PORT"),
    ));
    lines.push(render_line(
        "email.username",
        &redact_secret(config.email.username.expose_secret()),
        source("email.username", "TRELLIS_EMAIL_USERNAME"),
    ));
    lines.push(render_line(
        "email.password",
        &redact_secret(config.email.password.expose_secret()),
        source("email.password", "TRELLIS_EMAIL_PASSWORD"),
    ));
    lines.push(render_line(
        "email.enabled",
        &config.email.enabled.to_string(),
        source("email.enabled", "TRELLIS_EMAIL_ENABLED"),
    ));

    lines.push(render_line(
        "storage.sheet_id",
        unset_if_empty(&config.storage.sheet_id),
        source("storage.sheet_id", "TRELLIS_STORAGE_SHEET_ID"),
    ));
    lines.push(render_line(
        "storage.document_folder_id",
        unset_if_empty(&config.storage.document_folder_id),
        source("storage.document_folder_id", "TRELLIS_STORAGE_DOCUMENT_FOLDER_ID"),
    ));

    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        source("logging.level", "TRELLIS_LOGGING_LEVEL"),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        source("logging.format", "TRELLIS_LOGGING_FORMAT"),
    ));

    lines.join("\n")
}

fn detect_config_path() -> Option<PathBuf> {
    let root = PathBuf::from("trellis.toml");
    if root.exists() {
        return Some(root);
    }

    let nested = PathBuf::from("config/trellis.toml");
    if nested.exists() {
        return Some(nested);
    }

    None
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_key: Option<&str>,
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_key {
        if env::var_os(env_key).is_some() {
            return format!("env ({env_key})");
        }
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_secret(value: &str) -> String {
    if value.trim().is_empty() {
        "<empty>".to_string()
    } else {
        "<redacted>".to_string()
    }
}

fn unset_if_empty(value: &str) -> &str {
    if value.trim().is_empty() {
        "<unset>"
    } else {
        value
    }
}
