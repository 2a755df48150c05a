//! Mechanism to decide whether a smeared proton is seen by the forward stations

use crate::numeric::Float;

/// Protons at or below this energy never reach the stations
pub const MIN_ENERGY: Float = 3000.;

/// Acceptance window of the forward stations
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcceptanceCut {
    /// Minimum accepted smeared xi (inclusive)
    pub xi_min: Float,

    /// Maximum accepted smeared xi (inclusive)
    pub xi_max: Float,
}
//
impl AcceptanceCut {
    /// Setup the acceptance window
    pub fn new(xi_min: Float, xi_max: Float) -> Self {
        Self { xi_min, xi_max }
    }

    /// Decide whether a proton passes the cut or should be dropped
    ///
    /// The energy is the one the proton had before smearing.
    ///
    pub fn keep(&self, true_energy: Float, smeared_xi: Float) -> bool {
        true_energy > MIN_ENERGY && smeared_xi >= self.xi_min && smeared_xi <= self.xi_max
    }
}
