//! PPS proton smearing: detector resolution for forward protons
//!
//!
//! # Introduction (for the physicist)
//!
//! Protons which survive a collision with a small fractional momentum loss
//! (xi) stay close to the beam and can be tagged by the Precision Proton
//! Spectrometer stations, some 200 m down the beam line on each side. This
//! crate is the fast-simulation view of those stations: it smears the true xi
//! of each proton with a relative Gaussian resolution, smears its time of
//! flight to the stations with an absolute Gaussian resolution, and keeps only
//! the protons whose smeared xi lies in the acceptance window.
//!
//!
//! # Introduction (for the computer guy)
//!
//! The pipeline is simple:
//!
//! * read in the configuration and the input particles
//! * loop over events, in order,
//!     * loop over the protons of the event, in order,
//!     * draw a smeared xi and a smeared time of flight,
//!     * update and forward the proton, or drop it
//! * then write the accepted protons and a run summary.
//!
//! Everything runs on one thread with one seeded random number generator,
//! which makes runs bit-for-bit reproducible.

#![warn(missing_docs)]

pub mod acceptance;
pub mod config;
pub mod event;
pub mod input;
pub mod momentum;
pub mod numeric;
pub mod output;
pub mod random;
pub mod scheduling;
pub mod smearing;

/// We'll use anyhow's type-erased result type throughout the application
pub type Result<T> = anyhow::Result<T>;
