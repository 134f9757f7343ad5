use rust_decimal::Decimal;
use serde::Serialize;
use trellis_core::config::{AppConfig, LoadOptions};
use trellis_core::maintenance::MaintenanceGate;
use trellis_core::pricing::tables::{auxiliary_units, InstallationTier, MulchType, SizeClass};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> String {
    let report = build_report();

    if json_output {
        return serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        });
    }

    render_human(&report)
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_maintenance_flag());
            checks.push(check_pricing_tables());
            checks.push(check_email_readiness(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            for name in ["maintenance_flag", "pricing_tables", "email_readiness"] {
                checks.push(DoctorCheck {
                    name,
                    status: CheckStatus::Skipped,
                    details: "skipped because configuration did not load".to_string(),
                });
            }
        }
    }

    let all_ok = checks.iter().all(|check| check.status != CheckStatus::Fail);
    let overall_status = if all_ok { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_ok {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_maintenance_flag() -> DoctorCheck {
    let gate = MaintenanceGate::from_env();
    match gate.notice() {
        Some(notice) => DoctorCheck {
            name: "maintenance_flag",
            status: CheckStatus::Fail,
            details: format!("maintenance flag is set; intake is paused: {notice}"),
        },
        None => DoctorCheck {
            name: "maintenance_flag",
            status: CheckStatus::Pass,
            details: "maintenance flag is not set".to_string(),
        },
    }
}

/// Walks the compiled-in catalog and verifies the invariants the quote
/// calculator assumes.
fn check_pricing_tables() -> DoctorCheck {
    let mulches =
        [MulchType::Hardwood, MulchType::GradeACedar, MulchType::PineStraw];

    for size in SizeClass::ALL {
        for mulch in mulches {
            let units = auxiliary_units(size, mulch);
            if units.mulch < Decimal::ZERO
                || units.soil_conditioner < Decimal::ZERO
                || units.tablets <= Decimal::ZERO
            {
                return DoctorCheck {
                    name: "pricing_tables",
                    status: CheckStatus::Fail,
                    details: format!(
                        "size `{}` has an out-of-range unit row for {:?}",
                        size.label(),
                        mulch
                    ),
                };
            }
        }
    }

    let tiers = [
        InstallationTier::ShrubsOnly,
        InstallationTier::OneToThreeTrees,
        InstallationTier::FourToSixTrees,
        InstallationTier::SevenPlusTrees,
    ];
    for tier in tiers {
        let multiplier = tier.labor_multiplier();
        if multiplier <= Decimal::ZERO || multiplier > Decimal::ONE {
            return DoctorCheck {
                name: "pricing_tables",
                status: CheckStatus::Fail,
                details: format!("labor multiplier out of range for {:?}", tier),
            };
        }
    }

    DoctorCheck {
        name: "pricing_tables",
        status: CheckStatus::Pass,
        details: format!(
            "{} size rows and {} labor tiers verified",
            SizeClass::ALL.len(),
            tiers.len()
        ),
    }
}

fn check_email_readiness(config: &AppConfig) -> DoctorCheck {
    if !config.email.enabled {
        return DoctorCheck {
            name: "email_readiness",
            status: CheckStatus::Skipped,
            details: "email is disabled; notification steps will record failures".to_string(),
        };
    }

    DoctorCheck {
        name: "email_readiness",
        status: CheckStatus::Pass,
        details: format!("smtp relay configured at {}:{}", config.email.smtp_host, config.email.smtp_port),
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
