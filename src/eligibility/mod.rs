//! Registration eligibility engine
//!
//! Pure rules deciding whether a user may register for an event at a given
//! instant: regular windows, per-date closures, the on-the-spot path and
//! role/deadline overrides. No I/O; the clock is always passed in.

pub mod engine;
pub mod window;

pub use engine::{evaluate, RegistrationDecision};
pub use window::{
    format_time_remaining, on_spot_available, regular_availability, RegularAvailability,
};
