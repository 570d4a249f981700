use crate::task::{TaskFactoryType, TaskPointFactoryType};
use serde::{Deserialize, Serialize};

/// Contest rules variant selecting the national flavour of a ruleset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContestNationality {
    #[default]
    Unknown,
    European,
    British,
    American,
}

/// Point types and sizes used when a point is created without an explicit
/// shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorDefaults {
    pub start_type: TaskPointFactoryType,
    /// m
    pub start_radius: f64,
    pub turnpoint_type: TaskPointFactoryType,
    /// m
    pub turnpoint_radius: f64,
    pub finish_type: TaskPointFactoryType,
    /// m
    pub finish_radius: f64,
}

impl Default for SectorDefaults {
    fn default() -> Self {
        Self {
            start_type: TaskPointFactoryType::StartCylinder,
            start_radius: 1000.0,
            turnpoint_type: TaskPointFactoryType::AstCylinder,
            turnpoint_radius: 500.0,
            finish_type: TaskPointFactoryType::FinishCylinder,
            finish_radius: 1000.0,
        }
    }
}

/// Task planning settings pushed in from the configuration layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskBehaviour {
    pub contest_nationality: ContestNationality,
    pub task_type_default: TaskFactoryType,
    pub sector_defaults: SectorDefaults,
    /// Minimum height above terrain on arrival (m)
    pub safety_height_arrival: f64,
    /// MacCready setting used for abort and reach calculations (m/s)
    pub safety_mc: f64,
    /// Shape of the height-dependent MacCready reduction, 0 disables it
    pub risk_gamma: f64,
    pub optimise_targets_range: bool,
    pub optimise_targets_bearing: bool,
}

impl Default for TaskBehaviour {
    fn default() -> Self {
        Self {
            contest_nationality: ContestNationality::Unknown,
            task_type_default: TaskFactoryType::Racing,
            sector_defaults: SectorDefaults::default(),
            safety_height_arrival: 300.0,
            safety_mc: 0.5,
            risk_gamma: 0.0,
            optimise_targets_range: true,
            optimise_targets_bearing: true,
        }
    }
}

impl TaskBehaviour {
    pub fn is_us(&self) -> bool {
        self.contest_nationality == ContestNationality::American
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::assert_ok;

    #[test]
    fn test_defaults() {
        let behaviour = TaskBehaviour::default();
        assert_eq!(behaviour.task_type_default, TaskFactoryType::Racing);
        assert_eq!(behaviour.sector_defaults.start_radius, 1000.0);
        assert_eq!(behaviour.sector_defaults.turnpoint_radius, 500.0);
        assert_eq!(behaviour.safety_height_arrival, 300.0);
        assert!(!behaviour.is_us());
    }

    #[test]
    fn test_partial_deserialize() {
        let json = r#"{ "contest_nationality": "american", "sector_defaults": { "finish_type": "finish_line" } }"#;
        let behaviour: TaskBehaviour = assert_ok!(serde_json::from_str(json));

        assert!(behaviour.is_us());
        assert_eq!(behaviour.sector_defaults.finish_type, TaskPointFactoryType::FinishLine);
        assert_eq!(behaviour.sector_defaults.start_type, TaskPointFactoryType::StartCylinder);
        assert_eq!(behaviour.safety_mc, 0.5);
    }

    #[test]
    fn test_round_trip() {
        let behaviour = TaskBehaviour {
            task_type_default: TaskFactoryType::Aat,
            risk_gamma: 0.5,
            ..TaskBehaviour::default()
        };
        let json = assert_ok!(serde_json::to_string(&behaviour));
        let parsed: TaskBehaviour = assert_ok!(serde_json::from_str(&json));
        assert_eq!(parsed, behaviour);
    }
}
