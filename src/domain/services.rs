use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A plumbing service a company can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceCode {
    EmergencyPlumbing,
    DrainCleaningFixture,
    DrainCleaningMain,
    SewerLineRepair,
    SewerLineTrenchlessRepair,
    SewerCameraInspection,
    WaterHeaterTankRepair,
    WaterHeaterTankInstall,
    WaterHeaterTanklessRepair,
    WaterHeaterTanklessInstall,
    LeakDetection,
    GasLineRepair,
    GasLineInstall,
    SumpPumpRepair,
    SumpPumpInstall,
    ToiletRepair,
    ToiletInstall,
    FaucetFixtureRepair,
    FaucetFixtureInstall,
    RepipingPartial,
    RepipingWholeHome,
    BackflowPrevention,
    WaterTreatment,
    WellPumpRepair,
    WellPumpReplacement,
}

/// Services-sheet header labels, matched exactly after trimming.
pub const SERVICE_LABELS: &[(&str, ServiceCode)] = &[
    ("Emergency Plumbing", ServiceCode::EmergencyPlumbing),
    ("Drain Cleaning (Fixture)", ServiceCode::DrainCleaningFixture),
    ("Drain Cleaning (Main Line)", ServiceCode::DrainCleaningMain),
    ("Sewer Line -Repair", ServiceCode::SewerLineRepair),
    ("Trenchless Sewer- Repair", ServiceCode::SewerLineTrenchlessRepair),
    ("Sewer Camera Inspection", ServiceCode::SewerCameraInspection),
    ("Water Heater (Tank) – Repair", ServiceCode::WaterHeaterTankRepair),
    ("Water Heater (Tank) – Install", ServiceCode::WaterHeaterTankInstall),
    ("Tankless Water Heater – Repair", ServiceCode::WaterHeaterTanklessRepair),
    ("Tankless Water Heater – Install", ServiceCode::WaterHeaterTanklessInstall),
    ("Leak Detection", ServiceCode::LeakDetection),
    ("Gas Line -Repair", ServiceCode::GasLineRepair),
    ("Gas Line -Installation", ServiceCode::GasLineInstall),
    ("Sump Pump – Repair", ServiceCode::SumpPumpRepair),
    ("Sump Pump – Install", ServiceCode::SumpPumpInstall),
    ("Toilet - Repair", ServiceCode::ToiletRepair),
    ("Toilet-Installation", ServiceCode::ToiletInstall),
    ("Faucet / Fixture -Repair", ServiceCode::FaucetFixtureRepair),
    ("Faucet / Fixture -Installation", ServiceCode::FaucetFixtureInstall),
    ("Repiping (Partial)", ServiceCode::RepipingPartial),
    ("Repiping (Whole House)", ServiceCode::RepipingWholeHome),
    ("Backflow Prevention", ServiceCode::BackflowPrevention),
    ("Water Treatment", ServiceCode::WaterTreatment),
    ("Well Pump Repair", ServiceCode::WellPumpRepair),
    ("Well Pump Replacement", ServiceCode::WellPumpReplacement),
];

/// Codes produced by the homeowner diagnostic flow that map onto a catalog service.
const DIAGNOSTIC_ALIASES: &[(&str, ServiceCode)] = &[
    ("PIPE_REPAIR", ServiceCode::LeakDetection),
    ("WATER_PRESSURE_DIAGNOSIS", ServiceCode::LeakDetection),
    ("DRAIN_BLOCKAGE", ServiceCode::DrainCleaningFixture),
    ("DISHWASHER_DRAIN_REPAIR", ServiceCode::DrainCleaningFixture),
    ("APPLIANCE_LEAK_REPAIR", ServiceCode::LeakDetection),
    ("WATER_SUPPLY_REPAIR", ServiceCode::LeakDetection),
    ("DISPOSAL_REPAIR", ServiceCode::DrainCleaningFixture),
    ("DISPOSAL_REPLACEMENT", ServiceCode::DrainCleaningFixture),
    ("TOILET_CLOG_REMOVAL", ServiceCode::ToiletRepair),
    ("WAX_RING_REPLACEMENT", ServiceCode::ToiletRepair),
    ("EMERGENCY_TOILET_OVERFLOW", ServiceCode::ToiletRepair),
    ("FAUCET_REPAIR", ServiceCode::FaucetFixtureRepair),
    ("MAIN_LINE_DRAIN_CLEANING", ServiceCode::DrainCleaningMain),
    ("WATER_HEATER_DIAGNOSIS", ServiceCode::WaterHeaterTankRepair),
    ("WATER_HEATER_REPAIR", ServiceCode::WaterHeaterTankRepair),
    ("WATER_HEATER_REPLACEMENT", ServiceCode::WaterHeaterTankInstall),
    ("WATER_HEATER_FLUSH", ServiceCode::WaterHeaterTankRepair),
    ("HOSE_BIB_REPAIR", ServiceCode::FaucetFixtureRepair),
    ("MAIN_WATER_LINE_REPAIR", ServiceCode::LeakDetection),
    ("SEWER_LINE_INSPECTION", ServiceCode::SewerCameraInspection),
];

impl ServiceCode {
    pub fn all() -> impl Iterator<Item = ServiceCode> {
        SERVICE_LABELS.iter().map(|(_, code)| *code)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCode::EmergencyPlumbing => "EMERGENCY_PLUMBING",
            ServiceCode::DrainCleaningFixture => "DRAIN_CLEANING_FIXTURE",
            ServiceCode::DrainCleaningMain => "DRAIN_CLEANING_MAIN",
            ServiceCode::SewerLineRepair => "SEWER_LINE_REPAIR",
            ServiceCode::SewerLineTrenchlessRepair => "SEWER_LINE_TRENCHLESS_REPAIR",
            ServiceCode::SewerCameraInspection => "SEWER_CAMERA_INSPECTION",
            ServiceCode::WaterHeaterTankRepair => "WATER_HEATER_TANK_REPAIR",
            ServiceCode::WaterHeaterTankInstall => "WATER_HEATER_TANK_INSTALL",
            ServiceCode::WaterHeaterTanklessRepair => "WATER_HEATER_TANKLESS_REPAIR",
            ServiceCode::WaterHeaterTanklessInstall => "WATER_HEATER_TANKLESS_INSTALL",
            ServiceCode::LeakDetection => "LEAK_DETECTION",
            ServiceCode::GasLineRepair => "GAS_LINE_REPAIR",
            ServiceCode::GasLineInstall => "GAS_LINE_INSTALL",
            ServiceCode::SumpPumpRepair => "SUMP_PUMP_REPAIR",
            ServiceCode::SumpPumpInstall => "SUMP_PUMP_INSTALL",
            ServiceCode::ToiletRepair => "TOILET_REPAIR",
            ServiceCode::ToiletInstall => "TOILET_INSTALL",
            ServiceCode::FaucetFixtureRepair => "FAUCET_FIXTURE_REPAIR",
            ServiceCode::FaucetFixtureInstall => "FAUCET_FIXTURE_INSTALL",
            ServiceCode::RepipingPartial => "REPIPING_PARTIAL",
            ServiceCode::RepipingWholeHome => "REPIPING_WHOLE_HOME",
            ServiceCode::BackflowPrevention => "BACKFLOW_PREVENTION",
            ServiceCode::WaterTreatment => "WATER_TREATMENT",
            ServiceCode::WellPumpRepair => "WELL_PUMP_REPAIR",
            ServiceCode::WellPumpReplacement => "WELL_PUMP_REPLACEMENT",
        }
    }

    /// The services-sheet header label for this code.
    pub fn label(&self) -> &'static str {
        SERVICE_LABELS
            .iter()
            .find(|(_, code)| code == self)
            .map(|(label, _)| *label)
            .unwrap_or_else(|| self.as_str())
    }

    /// Exact lookup of an already trimmed header label.
    pub fn from_label(label: &str) -> Option<ServiceCode> {
        SERVICE_LABELS
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, code)| *code)
    }
}

impl fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceCode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ServiceCode::all()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| format!("unknown service code: {}", s))
    }
}

/// Resolve a catalog code or a diagnostic alias to a catalog service.
pub fn resolve_service_code(code: &str) -> Option<ServiceCode> {
    let code = code.trim().to_ascii_uppercase();
    code.parse().ok().or_else(|| {
        DIAGNOSTIC_ALIASES
            .iter()
            .find(|(alias, _)| *alias == code)
            .map(|(_, target)| *target)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels_cover_every_code_once() {
        let codes: HashSet<ServiceCode> = ServiceCode::all().collect();
        assert_eq!(codes.len(), SERVICE_LABELS.len());
        assert_eq!(codes.len(), 25);
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        for code in ServiceCode::all() {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
            let back: ServiceCode = serde_json::from_str(&json).unwrap();
            assert_eq!(back, code);
        }
    }

    #[test]
    fn test_from_label_is_exact() {
        assert_eq!(
            ServiceCode::from_label("Water Heater (Tank) – Repair"),
            Some(ServiceCode::WaterHeaterTankRepair)
        );
        // hyphen instead of en-dash is a different label
        assert_eq!(ServiceCode::from_label("Water Heater (Tank) - Repair"), None);
        assert_eq!(ServiceCode::from_label("emergency plumbing"), None);
        assert_eq!(
            ServiceCode::EmergencyPlumbing.label(),
            "Emergency Plumbing"
        );
    }

    #[test]
    fn test_resolve_service_code() {
        assert_eq!(resolve_service_code("TOILET_REPAIR"), Some(ServiceCode::ToiletRepair));
        assert_eq!(resolve_service_code("pipe_repair"), Some(ServiceCode::LeakDetection));
        assert_eq!(
            resolve_service_code("SEWER_LINE_INSPECTION"),
            Some(ServiceCode::SewerCameraInspection)
        );
        assert_eq!(resolve_service_code("GENERAL_PLUMBING"), None);
    }
}
