//! This module implements some domain-specific 4-vector handling logic.
//!
//! Positions and momenta are both stored as (x, y, z, t) / (px, py, pz, E)
//! 4-vectors, with the time-like coordinate last.

use crate::numeric::Float;
use nalgebra::SVector;
use prefix_num_ops::real::*;

/// 4-vector dimension
pub const FOUR_VECTOR_DIM: usize = 4;

/// Space-time position or relativistic 4-momentum
pub type FourVector = SVector<Float, FOUR_VECTOR_DIM>;

/// Relativistic 4-momentum
pub type Momentum = FourVector;

/// Space-time position
pub type Position = FourVector;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-momentum
pub const E: usize = 3;

/// Convenience const for accessing the T coordinate of a position
pub const T: usize = 3;

/// Pseudorapidity reported for momenta lying on the beam axis
const ON_AXIS_ETA: Float = 10e10;

/// Transverse momentum
pub fn pt(p: &Momentum) -> Float {
    sqrt(p[X] * p[X] + p[Y] * p[Y])
}

/// Azimuthal angle, in ]-π, π]
pub fn phi(p: &Momentum) -> Float {
    p[Y].atan2(p[X])
}

/// Pseudorapidity
///
/// Momenta on the beam axis get a large sentinel value carrying the sign of
/// pz, and a null momentum gets zero.
///
pub fn eta(p: &Momentum) -> Float {
    let pt = pt(p);
    if pt > 0. {
        (p[Z] / pt).asinh()
    } else if p[Z] == 0. {
        0.
    } else if p[Z] > 0. {
        ON_AXIS_ETA
    } else {
        -ON_AXIS_ETA
    }
}

/// Build a 4-momentum from transverse momentum, pseudorapidity, azimuth and
/// energy. The mass is whatever these four numbers imply.
pub fn from_pt_eta_phi_e(pt: Float, eta: Float, phi: Float, e: Float) -> Momentum {
    let pt = abs(pt);
    Momentum::new(pt * phi.cos(), pt * phi.sin(), pt * eta.sinh(), e)
}

/// Replace the energy of a 4-momentum, keeping pt, η and φ
///
/// This does not preserve the invariant mass. On the beam axis η is not
/// finite, so there the 3-momentum is kept untouched instead.
///
pub fn with_energy(p: &Momentum, e: Float) -> Momentum {
    let pt = pt(p);
    if pt == 0. {
        Momentum::new(p[X], p[Y], p[Z], e)
    } else {
        from_pt_eta_phi_e(pt, eta(p), phi(p), e)
    }
}
