//! Engine configuration.
//!
//! Every field has a serde default, so a partial document (or `{}`) yields a
//! working configuration.

use crate::consts::{DEFAULT_LEAP_CACHE_CAPACITY, PERSIAN_DECIMAL_MARK};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Which tabular or observational Hijri calendar backs the `hijri` key.
///
/// The default is the tabular civil calendar, which can fall a day or two
/// away from ICU's `@calendar=islamic` (simulated sighting at Mecca). Pick
/// [`HijriVariant::SimulatedMecca`] to match ICU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HijriVariant {
    /// Tabular civil calendar, Friday epoch
    #[default]
    #[display(fmt = "civil")]
    Civil,
    /// Tabular civil calendar, Thursday (astronomical) epoch
    #[display(fmt = "civil_thursday")]
    CivilThursday,
    /// Saudi Umm al-Qura tables
    #[display(fmt = "umm_al_qura")]
    UmmAlQura,
    /// Astronomical crescent sighting at Mecca
    #[display(fmt = "simulated_mecca")]
    SimulatedMecca,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on memoized Chinese leap-month flags; 0 disables the cache.
    #[serde(default = "default_leap_cache_capacity")]
    pub leap_cache_capacity: usize,
    /// Replacement for `.` when translating digits to Persian.
    #[serde(default = "default_decimal_mark")]
    pub decimal_mark: String,
    #[serde(default)]
    pub hijri: HijriVariant,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            leap_cache_capacity: default_leap_cache_capacity(),
            decimal_mark:        default_decimal_mark(),
            hijri:               HijriVariant::default(),
        }
    }
}

fn default_leap_cache_capacity() -> usize {
    DEFAULT_LEAP_CACHE_CAPACITY
}

fn default_decimal_mark() -> String {
    PERSIAN_DECIMAL_MARK.to_owned()
}
