//! This module defines the properties and storage of simulated events

use crate::{
    momentum::{self, Momentum, Position, E},
    numeric::Float,
};

/// A particle, as seen by the detector simulation
///
/// Holds the production vertex and the 4-momentum. Particles are owned by the
/// event they belong to. Processing stages only ever borrow them.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Production vertex (x, y, z, t)
    pub position: Position,

    /// 4-momentum (px, py, pz, E)
    pub momentum: Momentum,
}
//
impl Particle {
    /// Build a particle from its production vertex and 4-momentum
    pub fn new(position: Position, momentum: Momentum) -> Self {
        Self { position, momentum }
    }

    /// Energy
    pub fn energy(&self) -> Float {
        self.momentum[E]
    }

    /// Transverse momentum
    pub fn pt(&self) -> Float {
        momentum::pt(&self.momentum)
    }

    /// Pseudorapidity
    pub fn eta(&self) -> Float {
        momentum::eta(&self.momentum)
    }

    /// Azimuthal angle
    pub fn phi(&self) -> Float {
        momentum::phi(&self.momentum)
    }
}

/// Storage for one event's worth of input particles
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Event {
    /// Event number, as found in the input
    pub index: u64,

    /// Particles of the input collection, in input order
    pub particles: Vec<Particle>,
}
//
impl Event {
    /// Build an empty event
    pub fn new(index: u64) -> Self {
        Self {
            index,
            particles: Vec::new(),
        }
    }
}
