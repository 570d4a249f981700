use super::{GlidePolar, PolarInfo};
use serde::{Deserialize, Serialize};

/// Aircraft performance configuration as stored in a pilot profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarSettings {
    pub polar: PolarInfo,
    /// Fraction of the maximum ballast on board
    pub ballast: f64,
    /// Clean ratio, 1.0 for a clean wing
    pub bugs: f64,
    pub cruise_efficiency: f64,
    /// Empty aircraft plus pilot (kg); the polar's reference mass when unset
    pub dry_mass: Option<f64>,
    /// Never exceed speed used as the speed-to-fly limit (m/s)
    pub v_max: f64,
}

impl Default for PolarSettings {
    fn default() -> Self {
        Self {
            polar: PolarInfo::default(),
            ballast: 0.0,
            bugs: 1.0,
            cruise_efficiency: 1.0,
            dry_mass: None,
            v_max: 75.0,
        }
    }
}

impl PolarSettings {
    /// Build a glide polar from these settings at MacCready `mc`
    pub fn glide_polar(&self, mc: f64) -> GlidePolar {
        let mut polar = GlidePolar::new(mc, self.bugs, 0.0);
        let info = &self.polar;

        polar.set_coefficients(info.coefficients(), false);
        polar.set_reference_mass(info.reference_mass, false);
        polar.set_dry_mass(self.dry_mass.unwrap_or(info.reference_mass), false);
        polar.set_ballast_ratio(if info.reference_mass > 0.0 {
            info.max_ballast / info.reference_mass
        } else {
            0.0
        });
        polar.set_wing_area(info.wing_area);
        polar.set_cruise_efficiency(self.cruise_efficiency);
        polar.set_v_max(self.v_max, false);
        polar.set_ballast(self.ballast.clamp(0.0, 1.0));
        polar
    }
}
