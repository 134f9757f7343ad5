use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use trellis_core::config::{AppConfig, LoadOptions};
use trellis_core::pricing::{
    compute_quote, FixedDistance, InstallationParams, LineItem, Quote, UnavailableDistance,
};

use super::CommandResult;

/// Cart file shape: repeated `[[item]]` tables plus one `[installation]`
/// table.
#[derive(Debug, Deserialize)]
struct CartFile {
    item: Vec<LineItem>,
    installation: InstallationParams,
}

pub fn run(cart_path: &Path, miles: Option<Decimal>, json_output: bool) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("quote", "config_validation", error.to_string(), 2)
        }
    };

    let raw = match fs::read_to_string(cart_path) {
        Ok(raw) => raw,
        Err(error) => {
            return CommandResult::failure(
                "quote",
                "cart_read",
                format!("could not read cart file `{}`: {error}", cart_path.display()),
                3,
            )
        }
    };

    let cart: CartFile = match toml::from_str(&raw) {
        Ok(cart) => cart,
        Err(error) => {
            return CommandResult::failure(
                "quote",
                "cart_parse",
                format!("could not parse cart file `{}`: {error}", cart_path.display()),
                4,
            )
        }
    };

    let quote = match miles {
        Some(miles) => {
            compute_quote(&cart.item, &cart.installation, &config.pricing, &FixedDistance(miles))
        }
        None => {
            compute_quote(&cart.item, &cart.installation, &config.pricing, &UnavailableDistance)
        }
    };

    let output = if json_output {
        serde_json::to_string_pretty(&quote)
            .unwrap_or_else(|error| format!("{{\"error\":\"{error}\"}}"))
    } else {
        render_human(&cart.item, &cart.installation, &quote)
    };

    CommandResult { exit_code: 0, output }
}

fn render_human(items: &[LineItem], installation: &InstallationParams, quote: &Quote) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "quote for {} line item(s), delivered to {}:",
        items.len(),
        installation.destination_address()
    ));

    lines.push(money("material subtotal", quote.material_subtotal));
    lines.push(money("material subtotal (discounted)", quote.material_subtotal_discounted));
    lines.push(format!(
        "  mulch ({} x {}): ${}",
        quote.quantities.mulch_units,
        quote.mulch_sku,
        quote.mulch_cost.round_dp(2)
    ));
    lines.push(money("soil conditioner", quote.soil_conditioner_cost));
    lines.push(money("fertilizer tablets", quote.tablet_cost));
    if quote.tree_stake_cost > Decimal::ZERO {
        lines.push(money("tree stakes", quote.tree_stake_cost));
    }
    if quote.deer_guard_cost > Decimal::ZERO {
        lines.push(money("deer guards", quote.deer_guard_cost));
    }
    lines.push(money("auxiliary materials", quote.auxiliary_material_cost));
    lines.push(money("labor", quote.labor_cost));
    lines.push(format!(
        "  delivery ({} mi each way): ${}",
        quote.delivery_distance,
        quote.delivery_cost.round_dp(2)
    ));
    lines.push(money("subtotal", quote.subtotal));
    lines.push(money("tax", quote.tax));
    lines.push(money("total", quote.total));

    for warning in &quote.warnings {
        lines.push(format!("warning: {warning}"));
    }

    lines.join("\n")
}

fn money(label: &str, amount: Decimal) -> String {
    format!("  {label}: ${}", amount.round_dp(2))
}
