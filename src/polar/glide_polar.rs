use super::{AircraftState, GlideState, PolarCoefficients, SpeedVector};
use crate::geo::Angle;
use tracing::trace;

const DEFAULT_V_MAX: f64 = 75.0;
const DEFAULT_REFERENCE_MASS: f64 = 300.0;
const DEFAULT_BALLAST_RATIO: f64 = 0.3;
const DEFAULT_COEFFICIENTS: PolarCoefficients = PolarCoefficients::new(0.00157, -0.0734, 1.48);

/// Aerodynamic performance model of the aircraft
///
/// Holds the pilot settings (MacCready, bugs, ballast) and the polar
/// coefficients, and caches the derived speeds. Any setter that changes an
/// input recomputes every derived value together in [`GlidePolar::update`],
/// so the cached values are never a mix of old and new settings.
///
/// All performance accessors require [`GlidePolar::is_valid`]. Calling them
/// on an invalid polar is a programming error and trips a debug assertion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlidePolar {
    mc: f64,
    inv_mc: f64,
    bugs: f64,
    /// Water ballast (l)
    ballast: f64,
    cruise_efficiency: f64,

    best_ld: f64,
    v_best_ld: f64,
    s_best_ld: f64,
    v_max: f64,
    s_max: f64,
    v_min: f64,
    s_min: f64,

    ideal_polar: PolarCoefficients,
    polar: PolarCoefficients,

    ballast_ratio: f64,
    reference_mass: f64,
    dry_mass: f64,
    wing_area: f64,
}

impl GlidePolar {
    /// Create a polar with the default coefficients
    ///
    /// `ballast` is in litres.
    pub fn new(mc: f64, bugs: f64, ballast: f64) -> Self {
        let mut polar = Self {
            mc,
            inv_mc: 0.0,
            bugs,
            ballast,
            cruise_efficiency: 1.0,
            best_ld: 0.0,
            v_best_ld: 0.0,
            s_best_ld: 0.0,
            v_max: DEFAULT_V_MAX,
            s_max: 0.0,
            v_min: 0.0,
            s_min: 0.0,
            ideal_polar: DEFAULT_COEFFICIENTS,
            polar: DEFAULT_COEFFICIENTS,
            ballast_ratio: DEFAULT_BALLAST_RATIO,
            reference_mass: DEFAULT_REFERENCE_MASS,
            dry_mass: DEFAULT_REFERENCE_MASS,
            wing_area: 0.0,
        };
        polar.set_mc(mc);
        polar
    }

    /// A polar that fails [`GlidePolar::is_valid`]
    pub fn invalid() -> Self {
        let mut polar = Self::new(0.0, 1.0, 0.0);
        polar.set_invalid();
        polar
    }

    pub fn set_invalid(&mut self) {
        self.ideal_polar = PolarCoefficients::invalid();
        self.update();
    }

    pub fn is_valid(&self) -> bool {
        self.v_min < self.v_max
    }

    /// Recompute the real polar and every derived speed
    pub fn update(&mut self) {
        if !self.ideal_polar.is_valid() || self.bugs <= 0.0 || self.reference_mass <= 0.0 {
            self.polar = PolarCoefficients::invalid();
            self.v_min = self.v_max;
            self.s_min = 0.0;
            self.s_max = 0.0;
            self.v_best_ld = 0.0;
            self.s_best_ld = 0.0;
            self.best_ld = 0.0;
            trace!("glide polar invalidated");
            return;
        }

        let loading = (self.total_mass() / self.reference_mass).sqrt();
        let inv_bugs = 1.0 / self.bugs;
        self.polar = PolarCoefficients::new(
            inv_bugs * self.ideal_polar.a / loading,
            inv_bugs * self.ideal_polar.b,
            inv_bugs * self.ideal_polar.c * loading,
        );

        self.update_s_max();
        self.update_best_ld();
        self.update_s_min();

        trace!(
            mc = self.mc,
            bugs = self.bugs,
            ballast = self.ballast,
            v_best_ld = self.v_best_ld,
            best_ld = self.best_ld,
            "glide polar updated"
        );
    }

    fn min_sink_speed(&self) -> f64 {
        self.v_max.min(-self.polar.b / (2.0 * self.polar.a))
    }

    fn update_s_max(&mut self) {
        self.s_max = self.sink_rate(self.v_max);
    }

    fn update_best_ld(&mut self) {
        let v_min = self.min_sink_speed();
        let v = ((self.polar.c + self.mc) / self.polar.a).sqrt();
        self.v_best_ld = v.min(self.v_max).max(v_min);
        self.s_best_ld = self.sink_rate(self.v_best_ld);
        self.best_ld = self.v_best_ld / self.s_best_ld;
    }

    fn update_s_min(&mut self) {
        self.v_min = self.min_sink_speed();
        self.s_min = self.sink_rate(self.v_min);
    }

    pub fn mc(&self) -> f64 {
        self.mc
    }

    /// Reciprocal of the MacCready setting, zero when MC is zero
    pub fn inv_mc(&self) -> f64 {
        self.inv_mc
    }

    pub fn set_mc(&mut self, mc: f64) {
        self.mc = mc;
        self.inv_mc = if mc > 0.0 { 1.0 / mc } else { 0.0 };
        self.update();
    }

    pub fn bugs(&self) -> f64 {
        self.bugs
    }

    /// Set the clean ratio, `1.0` for a clean wing
    pub fn set_bugs(&mut self, clean: f64) {
        debug_assert!(clean > 0.0 && clean <= 1.0);
        self.bugs = clean;
        self.update();
    }

    /// Ballast as a fraction of the maximum ballast
    pub fn ballast(&self) -> f64 {
        let capacity = self.ballast_ratio * self.reference_mass;
        if capacity > 0.0 { self.ballast / capacity } else { 0.0 }
    }

    /// Set ballast as a fraction of the maximum ballast
    pub fn set_ballast(&mut self, ratio: f64) {
        debug_assert!((0.0..=1.0).contains(&ratio));
        self.set_ballast_litres(ratio * self.ballast_ratio * self.reference_mass);
    }

    pub fn ballast_litres(&self) -> f64 {
        self.ballast
    }

    pub fn set_ballast_litres(&mut self, litres: f64) {
        self.ballast = litres;
        self.update();
    }

    pub fn has_ballast(&self) -> bool {
        self.ballast > 0.0
    }

    pub fn is_ballastable(&self) -> bool {
        self.ballast_ratio > 0.0
    }

    /// Maximum ballast as a fraction of the reference mass
    pub fn ballast_ratio(&self) -> f64 {
        self.ballast_ratio
    }

    pub fn set_ballast_ratio(&mut self, ratio: f64) {
        self.ballast_ratio = ratio;
    }

    pub fn cruise_efficiency(&self) -> f64 {
        self.cruise_efficiency
    }

    pub fn set_cruise_efficiency(&mut self, efficiency: f64) {
        self.cruise_efficiency = efficiency;
    }

    pub fn reference_mass(&self) -> f64 {
        self.reference_mass
    }

    pub fn set_reference_mass(&mut self, mass: f64, update: bool) {
        self.reference_mass = mass;
        if update {
            self.update();
        }
    }

    pub fn dry_mass(&self) -> f64 {
        self.dry_mass
    }

    pub fn set_dry_mass(&mut self, mass: f64, update: bool) {
        self.dry_mass = mass;
        if update {
            self.update();
        }
    }

    pub fn wing_area(&self) -> f64 {
        self.wing_area
    }

    pub fn set_wing_area(&mut self, area: f64) {
        self.wing_area = area;
    }

    /// Dry mass plus water ballast (kg)
    pub fn total_mass(&self) -> f64 {
        self.dry_mass + self.ballast
    }

    /// Total mass per wing area (kg/m²), zero when the wing area is unknown
    pub fn wing_loading(&self) -> f64 {
        if self.wing_area > 0.0 {
            self.total_mass() / self.wing_area
        } else {
            0.0
        }
    }

    /// Ideal coefficients, as configured
    pub fn coefficients(&self) -> PolarCoefficients {
        self.ideal_polar
    }

    /// Coefficients after bugs and ballast
    pub fn real_coefficients(&self) -> PolarCoefficients {
        self.polar
    }

    pub fn set_coefficients(&mut self, coefficients: PolarCoefficients, update: bool) {
        self.ideal_polar = coefficients;
        if update {
            self.update();
        }
    }

    pub fn set_v_max(&mut self, v_max: f64, update: bool) {
        self.v_max = v_max;
        if update {
            self.update();
        }
    }

    pub fn v_max(&self) -> f64 {
        debug_assert!(self.is_valid());
        self.v_max
    }

    pub fn s_max(&self) -> f64 {
        debug_assert!(self.is_valid());
        self.s_max
    }

    /// Minimum sink speed (m/s)
    pub fn v_min(&self) -> f64 {
        debug_assert!(self.is_valid());
        self.v_min
    }

    pub fn s_min(&self) -> f64 {
        debug_assert!(self.is_valid());
        self.s_min
    }

    /// MacCready-adjusted best glide speed (m/s)
    pub fn v_best_ld(&self) -> f64 {
        debug_assert!(self.is_valid());
        self.v_best_ld
    }

    pub fn s_best_ld(&self) -> f64 {
        debug_assert!(self.is_valid());
        self.s_best_ld
    }

    pub fn best_ld(&self) -> f64 {
        debug_assert!(self.is_valid());
        self.best_ld
    }

    /// Lowest speed considered flyable, used as takeoff detection threshold
    pub fn v_takeoff(&self) -> f64 {
        self.v_min() / 2.0
    }

    /// Still-air sink rate at airspeed `v` (m/s, positive down)
    pub fn sink_rate(&self, v: f64) -> f64 {
        self.polar.sink_rate(v)
    }

    /// Sink rate at airspeed `v` under load factor `n`
    pub fn sink_rate_at_load(&self, v: f64, n: f64) -> f64 {
        debug_assert!(self.is_valid());
        let w0 = self.sink_rate(v);
        let vl = self.v_best_ld / (self.v_best_ld / 2.0).max(v);
        (w0 + (v / (2.0 * self.best_ld)) * (n * n - 1.0) * vl * vl).max(0.0)
    }

    /// Sink rate plus MacCready setting
    pub fn ms_sink_rate(&self, v: f64) -> f64 {
        self.sink_rate(v) + self.mc
    }

    /// Speed minimising `(sink(V) + extra_sink) / (V - head_wind)`, clamped
    /// to the flyable speed range
    fn optimum_speed(&self, extra_sink: f64, head_wind: f64) -> f64 {
        let PolarCoefficients { a, b, c } = self.polar;
        let h = head_wind;
        let radicand = h * h + (b * h + c + extra_sink) / a;
        let v = h + radicand.max(0.0).sqrt();
        v.clamp(self.v_min, self.v_max)
    }

    /// MacCready speed to fly
    ///
    /// Without `block_stf` the aircraft dolphin-flies: the current netto
    /// vario is treated as lift along the cruise, and lift stronger than the
    /// MacCready setting plus minimum sink means slowing to minimum sink.
    /// `head_wind` comes from the active glide solution, if any, and only
    /// matters when MacCready is zero.
    pub fn speed_to_fly(&self, state: &AircraftState, head_wind: Option<f64>, block_stf: bool) -> f64 {
        debug_assert!(self.is_valid());

        let g_scaling = if block_stf || state.g_load <= 0.0 {
            1.0
        } else {
            state.g_load.sqrt()
        };

        let v_stf = if !block_stf && state.netto_vario > self.mc + self.s_min {
            self.v_min
        } else {
            let head_wind = match head_wind {
                Some(head_wind) if self.mc <= 0.0 => head_wind,
                _ => 0.0,
            };
            let stf_sink = if block_stf { 0.0 } else { -state.netto_vario };
            self.optimum_speed(self.mc + stf_sink, head_wind)
        };

        self.v_min.max(v_stf * g_scaling)
    }

    /// Airspeed for the best glide ratio over ground into `head_wind`
    pub fn best_glide_ratio_speed(&self, head_wind: f64) -> f64 {
        debug_assert!(self.is_valid());
        self.optimum_speed(0.0, head_wind)
    }

    /// Optimistic check whether the glide described by `task` could possibly
    /// be made, assuming the wind helps all the way
    pub fn is_glide_possible(&self, task: &GlideState) -> bool {
        debug_assert!(self.is_valid());
        if task.altitude_difference <= 0.0 {
            return false;
        }

        let reach = (self.v_best_ld + task.wind.norm) / self.s_best_ld * task.altitude_difference;
        task.vector.distance <= reach
    }

    /// MacCready reduced for the risk of landing out when low
    ///
    /// `height_fraction` is the height as a fraction of the climb ceiling.
    /// Small `gamma` keeps MC constant with height, large `gamma` scales it
    /// almost linearly.
    pub fn risk_mc(&self, height_fraction: f64, gamma: f64) -> f64 {
        let x = height_fraction.clamp(0.0, 1.0);
        if gamma < 0.1 {
            self.mc
        } else if gamma > 0.9 {
            self.mc * x
        } else {
            let k = 1.0 / (gamma * gamma) - 1.0;
            self.mc * (1.0 + k) * x / (1.0 + k * x)
        }
    }

    /// Glide ratio over ground at best glide speed along `track`
    ///
    /// Zero when the crosswind exceeds the airspeed.
    pub fn ld_over_ground(&self, track: Angle, wind: SpeedVector) -> f64 {
        debug_assert!(self.is_valid());
        if wind.is_zero() {
            return self.best_ld;
        }

        let theta = wind.bearing.reciprocal() - track;
        let tail_wind = wind.norm * theta.cos();
        let cross_wind = wind.norm * theta.sin();
        let v = self.v_best_ld;
        if cross_wind.abs() >= v {
            return 0.0;
        }

        let ground_speed = tail_wind + (v * v - cross_wind * cross_wind).sqrt();
        (ground_speed / self.s_best_ld).max(0.0)
    }

    /// [`ld_over_ground`](Self::ld_over_ground) for the aircraft's own track and wind
    pub fn ld_over_ground_for(&self, state: &AircraftState) -> f64 {
        self.ld_over_ground(state.track, state.wind)
    }

    /// Average cross-country speed at MacCready `mc` into `head_wind`
    fn average_speed(&self, mc: f64, head_wind: f64) -> f64 {
        if mc <= 0.0 {
            return 0.0;
        }

        let v = self.optimum_speed(mc, head_wind);
        mc * (v - head_wind) / (self.sink_rate(v) + mc)
    }

    /// Thermal strength on the next leg giving the same average speed as the
    /// current MacCready setting on the current leg
    ///
    /// Both winds are head wind components (m/s).
    pub fn next_leg_eq_thermal(&self, current_wind: f64, next_wind: f64) -> f64 {
        debug_assert!(self.is_valid());
        let target = self.average_speed(self.mc, current_wind);
        if target <= 0.0 {
            return 0.0;
        }

        let (mut low, mut high) = (0.0_f64, 20.0_f64);
        if self.average_speed(high, next_wind) < target {
            return high;
        }

        for _ in 0..64 {
            let middle = (low + high) / 2.0;
            if self.average_speed(middle, next_wind) < target {
                low = middle;
            } else {
                high = middle;
            }
            if high - low < 1e-6 {
                break;
            }
        }
        (low + high) / 2.0
    }
}

impl Default for GlidePolar {
    fn default() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{GeoPoint, GeoVector};
    use claims::{assert_gt, assert_le, assert_lt};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert_lt!((actual - expected).abs(), tolerance);
    }

    #[test]
    fn test_default_is_valid() {
        let polar = GlidePolar::default();
        assert!(polar.is_valid());
        assert_close(polar.v_min(), 0.0734 / (2.0 * 0.00157), 1e-9);
        assert_close(polar.s_max(), polar.sink_rate(75.0), 1e-12);
    }

    #[test]
    fn test_best_ld_identities() {
        for mc in [0.0, 1.0, 2.5] {
            let polar = GlidePolar::new(mc, 1.0, 0.0);
            assert_close(polar.sink_rate(polar.v_best_ld()), polar.s_best_ld(), 1e-12);
            assert_close(polar.best_ld(), polar.v_best_ld() / polar.s_best_ld(), 1e-12);
        }
    }

    #[test]
    fn test_best_ld_maximises_glide_ratio_at_zero_mc() {
        let polar = GlidePolar::default();
        let v = polar.v_best_ld();
        let ld = |v: f64| v / polar.sink_rate(v);
        assert_le!(ld(v - 1.0), polar.best_ld());
        assert_le!(ld(v + 1.0), polar.best_ld());
    }

    #[test]
    fn test_mc_increases_best_ld_speed() {
        let still = GlidePolar::new(0.0, 1.0, 0.0);
        let fast = GlidePolar::new(2.0, 1.0, 0.0);
        assert_gt!(fast.v_best_ld(), still.v_best_ld());
        assert_eq!(fast.inv_mc(), 0.5);
        assert_eq!(still.inv_mc(), 0.0);
    }

    #[test]
    fn test_bugs_degrade_performance() {
        let mut polar = GlidePolar::default();
        let clean = polar.best_ld();
        polar.set_bugs(0.8);
        assert_lt!(polar.best_ld(), clean);
        assert_eq!(polar.bugs(), 0.8);
    }

    #[test]
    fn test_ballast() {
        let mut polar = GlidePolar::default();
        assert!(polar.is_ballastable());
        assert!(!polar.has_ballast());

        let dry_v_min = polar.v_min();
        polar.set_ballast(0.5);
        assert_close(polar.ballast_litres(), 45.0, 1e-9);
        assert_close(polar.ballast(), 0.5, 1e-12);
        assert_close(polar.total_mass(), 345.0, 1e-9);
        assert!(polar.has_ballast());
        assert_gt!(polar.v_min(), dry_v_min);
    }

    #[test]
    fn test_wing_loading() {
        let mut polar = GlidePolar::default();
        assert_eq!(polar.wing_loading(), 0.0);
        polar.set_wing_area(10.0);
        assert_close(polar.wing_loading(), 30.0, 1e-12);
    }

    #[test]
    fn test_invalid() {
        let polar = GlidePolar::invalid();
        assert!(!polar.is_valid());

        let mut polar = GlidePolar::default();
        polar.set_coefficients(PolarCoefficients::new(-1.0, 1.0, 1.0), true);
        assert!(!polar.is_valid());
        polar.set_coefficients(PolarCoefficients::new(0.00157, -0.0734, 1.48), true);
        assert!(polar.is_valid());
    }

    #[test]
    fn test_v_max_below_min_sink_is_invalid() {
        let mut polar = GlidePolar::default();
        polar.set_v_max(10.0, true);
        assert!(!polar.is_valid());
    }

    #[test]
    fn test_sink_rate_at_load() {
        let polar = GlidePolar::new(1.0, 1.0, 0.0);
        let v = 30.0;
        assert_close(polar.sink_rate_at_load(v, 1.0), polar.sink_rate(v), 1e-12);
        assert_gt!(polar.sink_rate_at_load(v, 2.0), polar.sink_rate(v));
    }

    #[test]
    fn test_ms_sink_rate() {
        let polar = GlidePolar::new(1.5, 1.0, 0.0);
        assert_close(polar.ms_sink_rate(30.0), polar.sink_rate(30.0) + 1.5, 1e-12);
    }

    #[test]
    fn test_speed_to_fly_block_matches_best_ld() {
        let polar = GlidePolar::new(2.0, 1.0, 0.0);
        let state = AircraftState::new(GeoPoint::degrees(0.0, 0.0), 1000.0);
        assert_close(polar.speed_to_fly(&state, None, true), polar.v_best_ld(), 1e-9);
    }

    #[test]
    fn test_speed_to_fly_slows_in_lift() {
        let polar = GlidePolar::new(2.0, 1.0, 0.0);
        let mut state = AircraftState::new(GeoPoint::degrees(0.0, 0.0), 1000.0);

        state.netto_vario = -2.0;
        let sink = polar.speed_to_fly(&state, None, false);
        state.netto_vario = 0.5;
        let lift = polar.speed_to_fly(&state, None, false);
        assert_lt!(lift, sink);

        state.netto_vario = 5.0;
        assert_eq!(polar.speed_to_fly(&state, None, false), polar.v_min());
    }

    #[test]
    fn test_speed_to_fly_head_wind_only_at_zero_mc() {
        let state = AircraftState::new(GeoPoint::degrees(0.0, 0.0), 1000.0);

        let zero = GlidePolar::new(0.0, 1.0, 0.0);
        assert_gt!(
            zero.speed_to_fly(&state, Some(10.0), true),
            zero.speed_to_fly(&state, None, true)
        );

        let positive = GlidePolar::new(1.0, 1.0, 0.0);
        assert_eq!(
            positive.speed_to_fly(&state, Some(10.0), true),
            positive.speed_to_fly(&state, None, true)
        );
    }

    #[test]
    fn test_best_glide_ratio_speed() {
        let polar = GlidePolar::default();
        assert_close(polar.best_glide_ratio_speed(0.0), polar.v_best_ld(), 1e-9);
        assert_gt!(polar.best_glide_ratio_speed(10.0), polar.v_best_ld());
        assert_lt!(polar.best_glide_ratio_speed(-10.0), polar.v_best_ld());
    }

    #[test]
    fn test_is_glide_possible() {
        let polar = GlidePolar::default();
        let reach = polar.best_ld() * 1000.0;

        let near = GlideState::new(GeoVector::new(reach * 0.9, Angle::ZERO), 0.0, 1000.0, SpeedVector::zero());
        assert!(polar.is_glide_possible(&near));

        let far = GlideState::new(GeoVector::new(reach * 1.1, Angle::ZERO), 0.0, 1000.0, SpeedVector::zero());
        assert!(!polar.is_glide_possible(&far));

        let below = GlideState::new(GeoVector::new(10.0, Angle::ZERO), 500.0, 400.0, SpeedVector::zero());
        assert!(!polar.is_glide_possible(&below));
    }

    #[test]
    fn test_risk_mc() {
        let polar = GlidePolar::new(2.0, 1.0, 0.0);
        assert_eq!(polar.risk_mc(0.3, 0.0), 2.0);
        assert_close(polar.risk_mc(0.3, 1.0), 0.6, 1e-12);
        assert_close(polar.risk_mc(1.0, 0.5), 2.0, 1e-12);
        assert_eq!(polar.risk_mc(0.0, 0.5), 0.0);

        let mid = polar.risk_mc(0.5, 0.5);
        assert_gt!(mid, 1.0);
        assert_lt!(mid, 2.0);
    }

    #[test]
    fn test_ld_over_ground() {
        let polar = GlidePolar::default();
        assert_eq!(polar.ld_over_ground(Angle::ZERO, SpeedVector::zero()), polar.best_ld());

        // wind from the south pushes a northbound glider
        let tail = SpeedVector::new(Angle::HALF_CIRCLE, 10.0);
        assert_gt!(polar.ld_over_ground(Angle::ZERO, tail), polar.best_ld());

        let head = SpeedVector::new(Angle::ZERO, 10.0);
        assert_lt!(polar.ld_over_ground(Angle::ZERO, head), polar.best_ld());

        let gale = SpeedVector::new(Angle::QUARTER_CIRCLE, 100.0);
        assert_eq!(polar.ld_over_ground(Angle::ZERO, gale), 0.0);
    }

    #[test]
    fn test_next_leg_eq_thermal() {
        let polar = GlidePolar::new(2.0, 1.0, 0.0);
        assert_close(polar.next_leg_eq_thermal(0.0, 0.0), 2.0, 1e-4);
        assert_gt!(polar.next_leg_eq_thermal(0.0, 10.0), 2.0);
        assert_lt!(polar.next_leg_eq_thermal(0.0, -10.0), 2.0);
    }
}
