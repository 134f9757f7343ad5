use std::env;

/// Environment flag that pauses the intake wizard before any phase runs.
pub const MAINTENANCE_ENV: &str = "TRELLIS_MAINTENANCE";

pub const MAINTENANCE_NOTICE: &str = "The application system is currently being updated. \
Please check back in a few minutes. We apologize for any inconvenience.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MaintenanceGate {
    enabled: bool,
}

impl MaintenanceGate {
    pub fn from_env() -> Self {
        let enabled = env::var(MAINTENANCE_ENV)
            .map(|value| value.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        Self { enabled }
    }

    pub fn enabled(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.enabled.then_some(MAINTENANCE_NOTICE)
    }
}

#[cfg(test)]
mod tests {
    use super::MaintenanceGate;

    #[test]
    fn disabled_gate_has_no_notice() {
        assert_eq!(MaintenanceGate::enabled(false).notice(), None);
    }

    #[test]
    fn enabled_gate_surfaces_the_static_notice() {
        let gate = MaintenanceGate::enabled(true);
        assert!(gate.is_enabled());
        assert!(gate.notice().is_some_and(|notice| notice.contains("check back")));
    }
}
