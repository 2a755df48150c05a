//! Resolution smearing of forward protons
//!
//! Each proton gets its fractional momentum loss (xi) and its time of flight to
//! the forward stations smeared with Gaussian resolutions. Protons whose smeared
//! xi falls inside the acceptance window are updated in place and forwarded,
//! the others are dropped untouched.

use crate::{
    acceptance::AcceptanceCut,
    config::Configuration,
    event::Particle,
    momentum::{self, E, T, Z},
    numeric::Float,
    random::RandomGenerator,
};

use log::trace;
use prefix_num_ops::real::*;

/// Beam energy (GeV)
pub const BEAM_ENERGY: Float = 6800.;

/// Distance from the interaction point to the forward stations
pub const STATION_DISTANCE: Float = 21650.;

/// Divisor turning a flight distance into a flight time
pub const PROPAGATION_DIVISOR: Float = 30.;

/// Speed of light (m/s)
pub const C_LIGHT: Float = 2.99792458e8;

/// Fractional momentum loss of a proton of given energy
pub fn xi(energy: Float) -> Float {
    1. - energy / BEAM_ENERGY
}

/// Proton energy matching a given fractional momentum loss
pub fn energy_from_xi(xi: Float) -> Float {
    BEAM_ENERGY * (1. - xi)
}

/// True time of flight from a production z to the station the proton heads to
///
/// Protons with a null (or NaN) pz head to neither station and get no flight
/// time.
///
pub fn flight_time(z: Float, pz: Float) -> Option<Float> {
    let station = if pz > 0. {
        STATION_DISTANCE
    } else if pz < 0. {
        -STATION_DISTANCE
    } else {
        return None;
    };
    Some(abs((station - z / 10.) / PROPAGATION_DIVISOR))
}

/// Convert a flight time into the time unit of particle positions
pub fn to_position_time(flight_time: Float) -> Float {
    flight_time * 1.0e3 * C_LIGHT
}

/// Smearing of forward protons
#[derive(Clone, Debug, PartialEq)]
pub struct ProtonSmearing {
    /// Relative resolution on xi (sigma_xi / xi)
    xi_resolution: Float,

    /// Absolute resolution on the time of flight
    time_resolution: Float,

    /// Acceptance of the forward stations
    acceptance: AcceptanceCut,
}
//
impl ProtonSmearing {
    /// Setup the smearing using the run configuration
    pub fn new(cfg: &Configuration) -> Self {
        Self {
            xi_resolution: cfg.xi_resolution,
            time_resolution: cfg.time_resolution,
            acceptance: cfg.acceptance,
        }
    }

    /// Smear one proton
    ///
    /// Two Gaussian draws are made per call, xi first and time second, whatever
    /// the outcome. If the proton is accepted, its energy is replaced by the
    /// smeared one (pt, η and φ are kept, so the mass changes), its time is
    /// replaced by the smeared time of flight, and it is handed back. Rejected
    /// protons are left untouched.
    ///
    pub fn process<'p>(
        &self,
        particle: &'p mut Particle,
        rng: &mut RandomGenerator,
    ) -> Option<&'p mut Particle> {
        let energy = particle.momentum[E];
        let pz = particle.momentum[Z];
        let z = particle.position[Z];

        let xi_true = xi(energy);
        let xi_smeared = rng.gaussian(xi_true, self.xi_resolution * xi_true);

        // Every proton consumes exactly two draws, flight time or not
        let t_true = flight_time(z, pz);
        let t_smeared = rng.gaussian(t_true.unwrap_or(0.), self.time_resolution);
        if t_true.is_none() {
            trace!("Dropping proton with null pz (E = {energy})");
            return None;
        }

        if !self.acceptance.keep(energy, xi_smeared) {
            trace!("Dropping proton outside acceptance (E = {energy}, smeared xi = {xi_smeared})");
            return None;
        }

        particle.momentum = momentum::with_energy(&particle.momentum, energy_from_xi(xi_smeared));
        particle.position[T] = to_position_time(t_smeared);
        Some(particle)
    }

    /// Smear all protons of an event, in order, and return the accepted ones
    pub fn process_all<'p>(
        &self,
        particles: &'p mut [Particle],
        rng: &mut RandomGenerator,
    ) -> Vec<&'p Particle> {
        particles
            .iter_mut()
            .filter_map(|particle| self.process(particle, rng))
            .map(|particle| &*particle)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::{from_pt_eta_phi_e, Momentum, Position};
    use approx::assert_relative_eq;

    fn exact_config() -> Configuration {
        Configuration {
            xi_resolution: 0.,
            time_resolution: 0.,
            ..Configuration::default()
        }
    }

    fn proton(z: Float, pz: Float, energy: Float) -> Particle {
        Particle::new(
            Position::new(0., 0., z, 0.),
            Momentum::new(0.5, 0., pz, energy),
        )
    }

    #[test]
    fn xi_reference_points() {
        assert_eq!(xi(BEAM_ENERGY), 0.);
        assert_eq!(xi(0.), 1.);
        assert_relative_eq!(xi(6000.), 1. - 6000. / 6800.);
        assert_relative_eq!(energy_from_xi(xi(6000.)), 6000., epsilon = 1e-9);
    }

    #[test]
    fn flight_time_per_direction() {
        assert_relative_eq!(flight_time(0., 1.).unwrap(), 21650. / 30.);
        assert_relative_eq!(flight_time(0., -1.).unwrap(), 21650. / 30.);
        assert_relative_eq!(flight_time(500., 1.).unwrap(), (21650. - 50.) / 30.);
        assert_relative_eq!(flight_time(500., -1.).unwrap(), (21650. + 50.) / 30.);
        assert_eq!(flight_time(0., 0.), None);
        assert_eq!(flight_time(0., Float::NAN), None);
    }

    #[test]
    fn null_resolution_keeps_xi() {
        let smearing = ProtonSmearing::new(&exact_config());
        let mut rng = RandomGenerator::new(99);
        for energy in [4000., 5500., 6000., 6500.] {
            let mut p = proton(0., 100., energy);
            let accepted = smearing.process(&mut p, &mut rng).is_some();
            if accepted {
                assert_eq!(p.momentum[E], energy_from_xi(xi(energy)));
            }
            assert_eq!(accepted, (0.02..=0.20).contains(&xi(energy)));
        }
    }

    #[test]
    fn stored_time_uses_position_units() {
        let smearing = ProtonSmearing::new(&exact_config());
        let mut rng = RandomGenerator::new(1);
        let mut p = proton(0., 100., 6000.);
        assert!(smearing.process(&mut p, &mut rng).is_some());
        assert_eq!(p.position[T], (21650. / 30.) * 1000. * C_LIGHT);
    }

    #[test]
    fn reference_proton() {
        let smearing = ProtonSmearing::new(&exact_config());
        let mut rng = RandomGenerator::new(2024);
        let mut p = Particle::new(
            Position::new(0., 0., 0., 0.),
            from_pt_eta_phi_e(1., 0., 0., 6000.),
        );
        // pt = 1 and η = 0 leave pz null, so give it the forward direction
        p.momentum[Z] = 100.;
        let (pt, eta, phi) = (p.pt(), p.eta(), p.phi());
        let out = smearing.process(&mut p, &mut rng).expect("proton should be accepted");
        assert_relative_eq!(out.energy(), 6000., epsilon = 1e-9);
        assert_relative_eq!(out.pt(), pt, epsilon = 1e-12);
        assert_relative_eq!(out.eta(), eta, epsilon = 1e-9);
        assert_relative_eq!(out.phi(), phi);
        assert_relative_eq!(out.position[T], 721.666_666_666_666_7 * 1000. * C_LIGHT, max_relative = 1e-12);
    }

    #[test]
    fn rejected_proton_is_untouched() {
        let smearing = ProtonSmearing::new(&exact_config());
        let mut rng = RandomGenerator::new(5);
        for energy in [3000., 2000., 6790., 7000.] {
            let mut p = proton(12., -40., energy);
            let before = p.clone();
            assert!(smearing.process(&mut p, &mut rng).is_none());
            assert_eq!(p, before);
        }
    }

    #[test]
    fn null_pz_is_dropped_but_consumes_draws() {
        let smearing = ProtonSmearing::new(&Configuration::default());
        let mut rng1 = RandomGenerator::new(11);
        let mut rng2 = RandomGenerator::new(11);

        let mut still = proton(0., 0., 6000.);
        let before = still.clone();
        assert!(smearing.process(&mut still, &mut rng1).is_none());
        assert_eq!(still, before);

        rng2.gaussian(0., 1.);
        rng2.gaussian(0., 1.);
        assert_eq!(rng1.gaussian(0., 1.).to_bits(), rng2.gaussian(0., 1.).to_bits());
    }

    #[test]
    fn draws_are_xi_then_time() {
        let cfg = Configuration::default();
        let smearing = ProtonSmearing::new(&cfg);
        let mut rng = RandomGenerator::new(77);
        let mut reference = RandomGenerator::new(77);

        let mut p = proton(0., 100., 6000.);
        let xi_true = xi(6000.);
        let xi_smeared = reference.gaussian(xi_true, cfg.xi_resolution * xi_true);
        let t_smeared = reference.gaussian(21650. / 30., cfg.time_resolution);

        let accepted = smearing.process(&mut p, &mut rng).is_some();
        assert_eq!(accepted, cfg.acceptance.keep(6000., xi_smeared));
        if accepted {
            assert_eq!(p.momentum[E], energy_from_xi(xi_smeared));
            assert_eq!(p.position[T], to_position_time(t_smeared));
        }
    }

    #[test]
    fn survivors_keep_input_order() {
        let smearing = ProtonSmearing::new(&exact_config());
        let mut rng = RandomGenerator::new(3);
        let mut particles = vec![
            proton(1., 10., 6000.),
            proton(2., 10., 2000.),
            proton(3., -10., 6200.),
            proton(4., 0., 6000.),
            proton(5., 10., 5500.),
        ];
        let accepted = smearing.process_all(&mut particles, &mut rng);
        let zs = accepted.iter().map(|p| p.position[Z]).collect::<Vec<_>>();
        assert_eq!(zs, vec![1., 3., 5.]);
    }
}
