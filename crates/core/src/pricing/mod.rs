pub mod tables;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;

pub use tables::{AuxiliaryUnits, InstallationTier, MulchCategory, MulchType, SizeClass};

/// One cart line: a plant variety at a size, with optional per-unit
/// discounts expressed as a percentage and/or a flat dollar amount.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: u32,
    pub size: SizeClass,
    pub plant_material: String,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OriginSite {
    Frankfort,
    Lexington,
}

impl OriginSite {
    pub fn address(self, config: &PricingConfig) -> &str {
        match self {
            Self::Frankfort => &config.origin_frankfort,
            Self::Lexington => &config.origin_lexington,
        }
    }
}

/// Job-level installation inputs collected alongside the cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallationParams {
    pub mulch: MulchType,
    pub tier: InstallationTier,
    pub origin: OriginSite,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    #[serde(default)]
    pub tree_stakes: u32,
    #[serde(default)]
    pub deer_guards: u32,
}

impl InstallationParams {
    pub fn destination_address(&self) -> String {
        format!("{}, {}, {} {}", self.street_address, self.city, self.state, self.zip)
    }
}

/// Driving-distance lookup between two addresses, in miles. `None` on any
/// failure; the calculator then prices delivery at zero rather than
/// propagating an error.
pub trait DistanceMeasurer: Send + Sync {
    fn measure(&self, origin: &str, destination: &str) -> Option<Decimal>;
}

/// Fixed-mileage measurer for offline quoting and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedDistance(pub Decimal);

impl DistanceMeasurer for FixedDistance {
    fn measure(&self, _origin: &str, _destination: &str) -> Option<Decimal> {
        Some(self.0)
    }
}

/// Measurer that always fails, mirroring an unreachable mapping service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnavailableDistance;

impl DistanceMeasurer for UnavailableDistance {
    fn measure(&self, _origin: &str, _destination: &str) -> Option<Decimal> {
        None
    }
}

/// Whole auxiliary-material units required for the job, after the single
/// ceiling pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedQuantities {
    pub mulch_units: Decimal,
    pub soil_conditioner_units: Decimal,
    pub tablet_units: Decimal,
}

/// Fully computed pricing breakdown for a cart plus installation
/// parameters. Quotes are rebuilt from scratch on every request and never
/// mutated in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub material_subtotal: Decimal,
    pub material_subtotal_discounted: Decimal,
    pub mulch_cost: Decimal,
    pub soil_conditioner_cost: Decimal,
    pub tablet_cost: Decimal,
    pub deer_guard_cost: Decimal,
    pub tree_stake_cost: Decimal,
    pub auxiliary_material_cost: Decimal,
    pub labor_cost: Decimal,
    pub delivery_distance: Decimal,
    pub delivery_cost: Decimal,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub quantities: DerivedQuantities,
    pub mulch_sku: String,
    pub warnings: Vec<String>,
}

/// Prices a cart. Pure except for the single distance lookup, which is
/// consulted exactly once per computation.
pub fn compute_quote(
    items: &[LineItem],
    params: &InstallationParams,
    config: &PricingConfig,
    distance: &impl DistanceMeasurer,
) -> Quote {
    let mut warnings = Vec::new();

    let mut material_subtotal = Decimal::ZERO;
    let mut material_subtotal_discounted = Decimal::ZERO;
    let mut mulch_units = Decimal::ZERO;
    let mut soil_units = Decimal::ZERO;
    let mut tablet_units = Decimal::ZERO;

    for item in items {
        let quantity = Decimal::from(item.quantity);
        material_subtotal += item.unit_price * quantity;

        let discounted_unit = item.unit_price
            * (Decimal::ONE - item.discount_percent / Decimal::ONE_HUNDRED)
            - item.discount_amount;
        material_subtotal_discounted += discounted_unit * quantity;

        let units = tables::auxiliary_units(item.size, params.mulch);
        mulch_units += units.mulch * quantity;
        soil_units += units.soil_conditioner * quantity;
        tablet_units += units.tablets * quantity;
    }

    // Partial bags are not purchasable: round up once, after summing
    // across all lines, never per line.
    mulch_units = mulch_units.ceil();
    soil_units = soil_units.ceil();
    tablet_units = tablet_units.ceil();

    let mulch_cost = mulch_units * params.mulch.unit_price();
    let soil_conditioner_cost = soil_units * config.soil_conditioner_unit_price;
    let tablet_cost = tablet_units * config.tablet_unit_price;
    let deer_guard_cost = Decimal::from(params.deer_guards) * config.deer_guard_unit_price;
    let tree_stake_cost = Decimal::from(params.tree_stakes) * config.tree_stake_unit_price;
    let auxiliary_material_cost =
        mulch_cost + soil_conditioner_cost + tablet_cost + deer_guard_cost + tree_stake_cost;

    let labor_cost =
        (auxiliary_material_cost + material_subtotal) * params.tier.labor_multiplier();

    let destination = params.destination_address();
    let delivery_distance = match distance.measure(params.origin.address(config), &destination) {
        Some(miles) => miles,
        None => {
            warnings.push(format!(
                "driving distance to `{destination}` unavailable; delivery priced at zero"
            ));
            Decimal::ZERO
        }
    };
    // Per-mile rate, doubled for the round trip.
    let delivery_cost = config.delivery_mileage_rate * Decimal::TWO * delivery_distance;

    let subtotal = material_subtotal_discounted
        + auxiliary_material_cost
        + labor_cost
        + delivery_cost;
    let tax = subtotal * config.tax_rate;
    let total = subtotal + tax;

    Quote {
        material_subtotal,
        material_subtotal_discounted,
        mulch_cost,
        soil_conditioner_cost,
        tablet_cost,
        deer_guard_cost,
        tree_stake_cost,
        auxiliary_material_cost,
        labor_cost,
        delivery_distance,
        delivery_cost,
        subtotal,
        tax,
        total,
        quantities: DerivedQuantities {
            mulch_units,
            soil_conditioner_units: soil_units,
            tablet_units,
        },
        mulch_sku: params.mulch.sku().to_owned(),
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::config::PricingConfig;

    use super::{
        compute_quote, FixedDistance, InstallationParams, InstallationTier, LineItem, MulchType,
        OriginSite, SizeClass, UnavailableDistance,
    };

    fn dec(value: &str) -> Decimal {
        value.parse().expect("decimal literal")
    }

    fn params(mulch: MulchType, tier: InstallationTier) -> InstallationParams {
        InstallationParams {
            mulch,
            tier,
            origin: OriginSite::Frankfort,
            street_address: "12 Elm St".to_owned(),
            city: "Frankfort".to_owned(),
            state: "KY".to_owned(),
            zip: "40601".to_owned(),
            tree_stakes: 0,
            deer_guards: 0,
        }
    }

    fn line(quantity: u32, size: SizeClass, unit_price: &str) -> LineItem {
        LineItem {
            quantity,
            size,
            plant_material: "Red Maple".to_owned(),
            unit_price: dec(unit_price),
            discount_percent: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn undiscounted_line_items_price_at_quantity_times_unit() {
        let quote = compute_quote(
            &[line(3, SizeClass::Gallon5, "24.99")],
            &params(MulchType::Hardwood, InstallationTier::ShrubsOnly),
            &PricingConfig::default(),
            &FixedDistance(Decimal::ZERO),
        );

        assert_eq!(quote.material_subtotal, dec("74.97"));
        assert_eq!(quote.material_subtotal_discounted, dec("74.97"));
    }

    #[test]
    fn discounts_reduce_only_the_discounted_subtotal() {
        let mut item = line(2, SizeClass::Gallon5, "100");
        item.discount_percent = dec("10");
        item.discount_amount = dec("5");

        let quote = compute_quote(
            &[item],
            &params(MulchType::Hardwood, InstallationTier::ShrubsOnly),
            &PricingConfig::default(),
            &FixedDistance(Decimal::ZERO),
        );

        assert_eq!(quote.material_subtotal, dec("200"));
        // (100 * 0.9 - 5) * 2
        assert_eq!(quote.material_subtotal_discounted, dec("170"));
    }

    #[test]
    fn auxiliary_units_ceil_once_after_summing_across_lines() {
        // Two 1G lines contribute 0.25 soil bags each: 0.5 combined, one
        // bag after the single ceiling pass. Per-line ceiling would buy two.
        let quote = compute_quote(
            &[line(1, SizeClass::Gallon1, "10"), line(1, SizeClass::Gallon1, "10")],
            &params(MulchType::Hardwood, InstallationTier::ShrubsOnly),
            &PricingConfig::default(),
            &FixedDistance(Decimal::ZERO),
        );

        assert_eq!(quote.quantities.soil_conditioner_units, dec("1"));
        assert_eq!(quote.quantities.mulch_units, dec("1"));
        assert_eq!(quote.soil_conditioner_cost, dec("9.99"));
    }

    #[test]
    fn distance_failure_zeroes_delivery_but_still_totals() {
        let quote = compute_quote(
            &[line(1, SizeClass::Gallon5, "50")],
            &params(MulchType::Hardwood, InstallationTier::ShrubsOnly),
            &PricingConfig::default(),
            &UnavailableDistance,
        );

        assert_eq!(quote.delivery_distance, Decimal::ZERO);
        assert_eq!(quote.delivery_cost, Decimal::ZERO);
        assert!(quote.total > Decimal::ZERO);
        assert_eq!(quote.warnings.len(), 1);
        assert!(quote.warnings[0].contains("delivery priced at zero"));
    }

    #[test]
    fn accessories_price_at_flat_unit_rates() {
        let mut installation = params(MulchType::Hardwood, InstallationTier::ShrubsOnly);
        installation.tree_stakes = 2;
        installation.deer_guards = 3;

        let quote = compute_quote(
            &[line(1, SizeClass::Gallon1, "10")],
            &installation,
            &PricingConfig::default(),
            &FixedDistance(Decimal::ZERO),
        );

        assert_eq!(quote.tree_stake_cost, dec("72.00"));
        assert_eq!(quote.deer_guard_cost, dec("11.97"));
    }

    #[test]
    fn full_breakdown_matches_hand_computed_figures() {
        // 2x 1.25" caliper at $10, hardwood mulch, shrubs-only labor,
        // 10 miles each way.
        let quote = compute_quote(
            &[line(2, SizeClass::Caliper125, "10.00")],
            &params(MulchType::Hardwood, InstallationTier::ShrubsOnly),
            &PricingConfig::default(),
            &FixedDistance(dec("10")),
        );

        assert_eq!(quote.material_subtotal, dec("20.00"));
        assert_eq!(quote.quantities.mulch_units, dec("4"));
        assert_eq!(quote.quantities.soil_conditioner_units, dec("1"));
        assert_eq!(quote.quantities.tablet_units, dec("8"));
        assert_eq!(quote.mulch_cost, dec("35.96"));
        assert_eq!(quote.soil_conditioner_cost, dec("9.99"));
        assert_eq!(quote.tablet_cost, dec("6.00"));
        assert_eq!(quote.auxiliary_material_cost, dec("51.95"));
        // (51.95 + 20.00) * 0.97
        assert_eq!(quote.labor_cost, dec("69.7915"));
        // 2.25 * 2 * 10
        assert_eq!(quote.delivery_cost, dec("45.00"));
        assert_eq!(quote.subtotal, dec("186.7415"));
        assert_eq!(quote.tax, dec("11.204490"));
        assert_eq!(quote.total, dec("197.945990"));
        assert_eq!(quote.mulch_sku, "7HARDRVM");
        assert!(quote.warnings.is_empty());
    }

    #[test]
    fn quotes_are_recomputed_from_scratch() {
        let items = [line(1, SizeClass::Gallon3, "15")];
        let installation = params(MulchType::PineStraw, InstallationTier::FourToSixTrees);
        let config = PricingConfig::default();

        let first = compute_quote(&items, &installation, &config, &FixedDistance(dec("4")));
        let second = compute_quote(&items, &installation, &config, &FixedDistance(dec("4")));
        assert_eq!(first, second);
    }
}
