//! Lookup tables for installation materials: per-size auxiliary units,
//! mulch pricing/SKUs, and labor multipliers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Nursery stock size classes: caliper inches, heights in feet, container
/// gallons, and the slender-upright special case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    #[serde(rename = "1.25")]
    Caliper125,
    #[serde(rename = "1.5")]
    Caliper150,
    #[serde(rename = "1.75")]
    Caliper175,
    #[serde(rename = "2")]
    Caliper200,
    #[serde(rename = "5-6")]
    Height5To6,
    #[serde(rename = "6-7")]
    Height6To7,
    #[serde(rename = "Slender Upright")]
    SlenderUpright,
    #[serde(rename = "1G")]
    Gallon1,
    #[serde(rename = "2G")]
    Gallon2,
    #[serde(rename = "3G")]
    Gallon3,
    #[serde(rename = "5G")]
    Gallon5,
    #[serde(rename = "7G")]
    Gallon7,
    #[serde(rename = "10G")]
    Gallon10,
    #[serde(rename = "15G")]
    Gallon15,
    #[serde(rename = "30G")]
    Gallon30,
}

impl SizeClass {
    pub const ALL: [SizeClass; 15] = [
        Self::Caliper125,
        Self::Caliper150,
        Self::Caliper175,
        Self::Caliper200,
        Self::Height5To6,
        Self::Height6To7,
        Self::SlenderUpright,
        Self::Gallon1,
        Self::Gallon2,
        Self::Gallon3,
        Self::Gallon5,
        Self::Gallon7,
        Self::Gallon10,
        Self::Gallon15,
        Self::Gallon30,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Caliper125 => "1.25",
            Self::Caliper150 => "1.5",
            Self::Caliper175 => "1.75",
            Self::Caliper200 => "2",
            Self::Height5To6 => "5-6",
            Self::Height6To7 => "6-7",
            Self::SlenderUpright => "Slender Upright",
            Self::Gallon1 => "1G",
            Self::Gallon2 => "2G",
            Self::Gallon3 => "3G",
            Self::Gallon5 => "5G",
            Self::Gallon7 => "7G",
            Self::Gallon10 => "10G",
            Self::Gallon15 => "15G",
            Self::Gallon30 => "30G",
        }
    }
}

/// Mulch products group into three coverage categories; the per-size unit
/// table carries one column per category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MulchCategory {
    Standard,
    Premium,
    Straw,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MulchType {
    SoilConditionerOnly,
    Hardwood,
    EasternRedCedar,
    PineBark,
    PineBarkMiniNuggets,
    PineBarkNuggets,
    GradeACedar,
    Redwood,
    PineStraw,
}

impl MulchType {
    pub fn label(self) -> &'static str {
        match self {
            Self::SoilConditionerOnly => "Soil Conditioner Only",
            Self::Hardwood => "Hardwood",
            Self::EasternRedCedar => "Eastern Red Cedar",
            Self::PineBark => "Pine Bark",
            Self::PineBarkMiniNuggets => "Pine Bark Mini Nuggets",
            Self::PineBarkNuggets => "Pine Bark Nuggets",
            Self::GradeACedar => "Grade A Cedar",
            Self::Redwood => "Redwood",
            Self::PineStraw => "Pine Straw",
        }
    }

    pub fn category(self) -> MulchCategory {
        match self {
            Self::SoilConditionerOnly
            | Self::Hardwood
            | Self::EasternRedCedar
            | Self::PineBark
            | Self::PineBarkMiniNuggets
            | Self::PineBarkNuggets => MulchCategory::Standard,
            Self::GradeACedar | Self::Redwood => MulchCategory::Premium,
            Self::PineStraw => MulchCategory::Straw,
        }
    }

    pub fn unit_price(self) -> Decimal {
        match self {
            Self::SoilConditionerOnly => Decimal::new(999, 2),
            Self::Hardwood
            | Self::EasternRedCedar
            | Self::PineBark
            | Self::PineBarkMiniNuggets
            | Self::PineBarkNuggets => Decimal::new(899, 2),
            Self::GradeACedar | Self::Redwood => Decimal::new(1699, 2),
            Self::PineStraw => Decimal::new(1599, 2),
        }
    }

    pub fn sku(self) -> &'static str {
        match self {
            Self::SoilConditionerOnly => "07SOILC02",
            Self::Hardwood => "7HARDRVM",
            Self::EasternRedCedar => "RVM CEDAR",
            Self::PineBark => "07PINEBM02",
            Self::PineBarkMiniNuggets => "07PINEBMN02",
            Self::PineBarkNuggets => "07PINEBN02",
            Self::GradeACedar => "CEDAR",
            Self::Redwood => "REDWOODM",
            Self::PineStraw => "07PINESTRAW",
        }
    }
}

/// How many installation tiers scale the labor charge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallationTier {
    ShrubsOnly,
    OneToThreeTrees,
    FourToSixTrees,
    SevenPlusTrees,
}

impl InstallationTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::ShrubsOnly => "Shrubs Only: 97%",
            Self::OneToThreeTrees => "1-3 trees: 97%",
            Self::FourToSixTrees => "4-6 trees: 91%",
            Self::SevenPlusTrees => "7+ Trees: 85%",
        }
    }

    pub fn labor_multiplier(self) -> Decimal {
        match self {
            Self::ShrubsOnly | Self::OneToThreeTrees => Decimal::new(97, 2),
            Self::FourToSixTrees => Decimal::new(91, 2),
            Self::SevenPlusTrees => Decimal::new(85, 2),
        }
    }
}

/// Per-plant auxiliary material units for one line item's size and the
/// job's mulch selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuxiliaryUnits {
    pub mulch: Decimal,
    pub soil_conditioner: Decimal,
    pub tablets: Decimal,
}

/// Row of the size table: mulch units per coverage category, soil
/// conditioner bags, fertilizer tablets. Fractions are real: container
/// stock consumes partial bags per plant.
pub fn auxiliary_units(size: SizeClass, mulch: MulchType) -> AuxiliaryUnits {
    let d = |mantissa: i64, scale: u32| Decimal::new(mantissa, scale);
    let (standard, premium, straw, soil, tablets) = match size {
        SizeClass::Caliper125 => (d(2, 0), d(2, 0), d(1, 0), d(5, 1), d(4, 0)),
        SizeClass::Caliper150 => (d(2, 0), d(2, 0), d(1, 0), d(5, 1), d(4, 0)),
        SizeClass::Caliper175 => (d(3, 0), d(3, 0), d(2, 0), d(1, 0), d(5, 0)),
        SizeClass::Caliper200 => (d(3, 0), d(3, 0), d(3, 0), d(2, 0), d(6, 0)),
        SizeClass::Height5To6 => (d(3, 0), d(3, 0), d(2, 0), d(1, 0), d(5, 0)),
        SizeClass::Height6To7 => (d(3, 0), d(3, 0), d(3, 0), d(2, 0), d(6, 0)),
        SizeClass::SlenderUpright => (d(2, 0), d(2, 0), d(1, 0), d(5, 1), d(4, 0)),
        SizeClass::Gallon1 => (d(5, 1), d(5, 1), d(25, 2), d(25, 2), d(2, 0)),
        SizeClass::Gallon2 => (d(5, 1), d(5, 1), d(25, 2), d(25, 2), d(2, 0)),
        SizeClass::Gallon3 => (d(5, 1), d(5, 1), d(25, 2), d(5, 1), d(3, 0)),
        SizeClass::Gallon5 => (d(1, 0), d(1, 0), d(5, 1), d(5, 1), d(4, 0)),
        SizeClass::Gallon7 => (d(1, 0), d(1, 0), d(1, 0), d(1, 0), d(5, 0)),
        SizeClass::Gallon10 => (d(2, 0), d(2, 0), d(2, 0), d(1, 0), d(6, 0)),
        SizeClass::Gallon15 => (d(2, 0), d(2, 0), d(2, 0), d(2, 0), d(8, 0)),
        SizeClass::Gallon30 => (d(3, 0), d(3, 0), d(3, 0), d(3, 0), d(12, 0)),
    };
    let mulch = match mulch.category() {
        MulchCategory::Standard => standard,
        MulchCategory::Premium => premium,
        MulchCategory::Straw => straw,
    };
    AuxiliaryUnits { mulch, soil_conditioner: soil, tablets }
}
