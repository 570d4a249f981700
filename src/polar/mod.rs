//! Glide performance
//!
//! [`GlidePolar`] turns a quadratic drag polar plus the pilot's MacCready,
//! bugs and ballast settings into the speeds and sink rates used for final
//! glide and speed-to-fly calculations.

mod coefficients;
mod glide_polar;
mod settings;
mod state;

pub use self::coefficients::{PolarCoefficients, PolarInfo};
pub use self::glide_polar::GlidePolar;
pub use self::settings::PolarSettings;
pub use self::state::{AircraftState, GlideState, SpeedVector};
