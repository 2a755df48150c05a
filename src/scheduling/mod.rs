//! This module takes care of scheduling the smearing work over events
//!
//! Events are processed one after another, and so are the particles within an
//! event. This is the order in which the shared random number generator gets
//! consumed, so it must not change if runs are to be reproducible.

use crate::{
    event::{Event, Particle},
    numeric::Float,
    random::RandomGenerator,
    smearing::ProtonSmearing,
    Result,
};

use log::debug;

/// Counters accumulated over a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of processed events
    pub num_events: usize,

    /// Number of particles fed to the smearing
    pub num_particles: usize,

    /// Number of particles which passed the acceptance cut
    pub num_accepted: usize,
}
//
impl RunSummary {
    /// Fraction of the particles which were accepted (NaN without particles)
    pub fn acceptance(&self) -> Float {
        self.num_accepted as Float / self.num_particles as Float
    }
}

/// Run the smearing over all events, in order
///
/// The particles accepted in each event are handed to `sink` as borrows of the
/// (updated) input particles, in input order, before the next event starts.
///
pub fn run_simulation(
    events: &mut [Event],
    smearing: &ProtonSmearing,
    rng: &mut RandomGenerator,
    mut sink: impl FnMut(u64, &[&Particle]) -> Result<()>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for event in events.iter_mut() {
        let index = event.index;
        let num_particles = event.particles.len();
        let accepted = smearing.process_all(&mut event.particles, rng);
        debug!(
            "Event {}: {} of {} particles accepted",
            index,
            accepted.len(),
            num_particles
        );

        summary.num_events += 1;
        summary.num_particles += num_particles;
        summary.num_accepted += accepted.len();
        sink(index, &accepted)?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::Configuration,
        momentum::{Momentum, Position, E},
    };

    fn proton(energy: Float) -> Particle {
        Particle::new(
            Position::new(0., 0., 0., 0.),
            Momentum::new(0.5, 0., 100., energy),
        )
    }

    fn exact_smearing() -> ProtonSmearing {
        ProtonSmearing::new(&Configuration {
            xi_resolution: 0.,
            time_resolution: 0.,
            ..Configuration::default()
        })
    }

    #[test]
    fn counts_and_sink_order() {
        let mut events = vec![
            Event {
                index: 3,
                particles: vec![proton(6000.), proton(1000.)],
            },
            Event::new(4),
            Event {
                index: 8,
                particles: vec![proton(6500.), proton(5500.), proton(6790.)],
            },
        ];
        let mut rng = RandomGenerator::new(1);
        let mut seen = Vec::new();
        let summary = run_simulation(&mut events, &exact_smearing(), &mut rng, |index, accepted| {
            seen.push((index, accepted.iter().map(|p| p.momentum[E]).collect::<Vec<_>>()));
            Ok(())
        })
        .unwrap();

        assert_eq!(
            summary,
            RunSummary {
                num_events: 3,
                num_particles: 5,
                num_accepted: 3,
            }
        );
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].0, 3);
        assert_eq!(seen[0].1.len(), 1);
        assert!(seen[1].1.is_empty());
        assert_eq!(seen[2].1.len(), 2);
        assert!((summary.acceptance() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn sink_errors_stop_the_run() {
        let mut events = vec![Event::new(0), Event::new(1), Event::new(2)];
        let mut rng = RandomGenerator::new(1);
        let mut calls = 0;
        let result = run_simulation(&mut events, &exact_smearing(), &mut rng, |index, _| {
            calls += 1;
            anyhow::ensure!(index < 1, "sink is full");
            Ok(())
        });
        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn empty_run() {
        let mut rng = RandomGenerator::new(1);
        let summary = run_simulation(&mut [], &exact_smearing(), &mut rng, |_, _| Ok(())).unwrap();
        assert_eq!(summary, RunSummary::default());
        assert!(summary.acceptance().is_nan());
    }
}
