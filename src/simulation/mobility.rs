//! Mobility models.
//!
//! A mobility model turns a node's current position into a per-step
//! displacement. The network owns exactly one model and asks it for a
//! displacement for every node on every iteration; the network applies the
//! returned delta itself.
//!
//! Six policies are provided:
//! - `random-walk`: independent uniform steps on both axes
//! - `gauss-markov`: steps correlated with the previous step plus Gaussian noise
//! - `landmark`: head for the nearest of a fixed set of landmarks, stop on arrival
//! - `wind-drift`: constant wind vector plus a random-walk term
//! - `directed-random-walk`: random speed along a slowly wandering heading
//! - `seismic`: uniform jitter of a fixed magnitude
//!
//! Every model also carries the network's transmission range. Only the
//! delivery pass and the landmark model (which moves exactly one range per
//! step) read it.
//!
//! Randomness is never ambient: each call receives the caller's RNG so runs
//! can be reproduced from a seed.

use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};
use std::f64::consts::{FRAC_PI_4, TAU};
use std::fmt;
use std::str::FromStr;

use super::geometry::{distance2, distance_from_d2, polar};
use super::types::{Displacement, Point, WORLD_SIZE};
use crate::common::config::ConfigError;

/// Transmission range used when none is configured.
pub const DEFAULT_TRANSMISSION_RANGE: f64 = 10.0;

/// Selector naming one of the mobility policies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MobilityKind {
    RandomWalk,
    GaussMarkov,
    Landmark,
    WindDrift,
    DirectedRandomWalk,
    Seismic,
}

impl MobilityKind {
    pub const ALL: [MobilityKind; 6] = [
        MobilityKind::RandomWalk,
        MobilityKind::GaussMarkov,
        MobilityKind::Landmark,
        MobilityKind::WindDrift,
        MobilityKind::DirectedRandomWalk,
        MobilityKind::Seismic,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            MobilityKind::RandomWalk => "random-walk",
            MobilityKind::GaussMarkov => "gauss-markov",
            MobilityKind::Landmark => "landmark",
            MobilityKind::WindDrift => "wind-drift",
            MobilityKind::DirectedRandomWalk => "directed-random-walk",
            MobilityKind::Seismic => "seismic",
        }
    }
}

impl fmt::Display for MobilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MobilityKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MobilityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownMobilityModel(s.to_string()))
    }
}

/// Typed, per-policy parameters.
///
/// Built either from [`MobilityParams::defaults`] or from a configuration
/// section; [`MobilityParams::build`] validates them and produces the model.
#[derive(Debug, Clone, PartialEq)]
pub enum MobilityParams {
    RandomWalk { max_step_size: f64 },
    GaussMarkov { alpha: f64, beta: f64 },
    Landmark { num_landmarks: usize, landmark_range: f64 },
    WindDrift { wind_speed: f64, wind_dir: f64, max_step_size: f64 },
    DirectedRandomWalk { max_speed: f64 },
    Seismic { magnitude: f64 },
}

impl MobilityParams {
    /// Illustrative defaults for each policy.
    pub fn defaults(kind: MobilityKind) -> Self {
        match kind {
            MobilityKind::RandomWalk => MobilityParams::RandomWalk { max_step_size: 5.0 },
            MobilityKind::GaussMarkov => MobilityParams::GaussMarkov { alpha: 0.5, beta: 0.25 },
            MobilityKind::Landmark => MobilityParams::Landmark {
                num_landmarks: 5,
                landmark_range: 5.0,
            },
            MobilityKind::WindDrift => MobilityParams::WindDrift {
                wind_speed: 10.0,
                wind_dir: 45.0,
                max_step_size: 5.0,
            },
            MobilityKind::DirectedRandomWalk => MobilityParams::DirectedRandomWalk { max_speed: 5.0 },
            MobilityKind::Seismic => MobilityParams::Seismic { magnitude: 5.0 },
        }
    }

    pub fn kind(&self) -> MobilityKind {
        match self {
            MobilityParams::RandomWalk { .. } => MobilityKind::RandomWalk,
            MobilityParams::GaussMarkov { .. } => MobilityKind::GaussMarkov,
            MobilityParams::Landmark { .. } => MobilityKind::Landmark,
            MobilityParams::WindDrift { .. } => MobilityKind::WindDrift,
            MobilityParams::DirectedRandomWalk { .. } => MobilityKind::DirectedRandomWalk,
            MobilityParams::Seismic { .. } => MobilityKind::Seismic,
        }
    }

    /// Reject parameters a model cannot be built from.
    ///
    /// Uniform ranges need a finite, non-negative half-width, the Gaussian
    /// needs a finite non-negative standard deviation, and the landmark model
    /// needs at least one landmark to seek.
    pub fn validate(&self, transmission_range: f64) -> Result<(), ConfigError> {
        non_negative("transmission_range", transmission_range)?;
        match *self {
            MobilityParams::RandomWalk { max_step_size } => non_negative("max_step_size", max_step_size),
            MobilityParams::GaussMarkov { alpha, beta } => {
                finite("alpha", alpha)?;
                non_negative("beta", beta)
            }
            MobilityParams::Landmark { num_landmarks, landmark_range } => {
                if num_landmarks == 0 {
                    return Err(ConfigError::InvalidParameter("num_landmarks must be at least 1".to_string()));
                }
                non_negative("landmark_range", landmark_range)
            }
            MobilityParams::WindDrift {
                wind_speed,
                wind_dir,
                max_step_size,
            } => {
                finite("wind_speed", wind_speed)?;
                finite("wind_dir", wind_dir)?;
                non_negative("max_step_size", max_step_size)
            }
            MobilityParams::DirectedRandomWalk { max_speed } => non_negative("max_speed", max_speed),
            MobilityParams::Seismic { magnitude } => non_negative("magnitude", magnitude),
        }
    }

    /// Validate and instantiate the model.
    ///
    /// `rng` is consumed only by models that draw construction-time state
    /// (landmark positions, initial heading).
    pub fn build(&self, transmission_range: f64, rng: &mut dyn RngCore) -> Result<Box<dyn MobilityModel>, ConfigError> {
        self.validate(transmission_range)?;
        let model: Box<dyn MobilityModel> = match *self {
            MobilityParams::RandomWalk { max_step_size } => Box::new(RandomWalk::new(transmission_range, max_step_size)),
            MobilityParams::GaussMarkov { alpha, beta } => Box::new(GaussMarkov::new(transmission_range, alpha, beta)?),
            MobilityParams::Landmark {
                num_landmarks,
                landmark_range,
            } => Box::new(LandmarkSeeking::new(transmission_range, num_landmarks, landmark_range, rng)),
            MobilityParams::WindDrift {
                wind_speed,
                wind_dir,
                max_step_size,
            } => Box::new(WindDrift::new(transmission_range, wind_speed, wind_dir, max_step_size)),
            MobilityParams::DirectedRandomWalk { max_speed } => Box::new(DirectedRandomWalk::new(transmission_range, max_speed, rng)),
            MobilityParams::Seismic { magnitude } => Box::new(SeismicJitter::new(transmission_range, magnitude)),
        };
        Ok(model)
    }
}

fn finite(name: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidParameter(format!("{} must be finite, got {}", name, value)));
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(ConfigError::InvalidParameter(format!("{} must be non-negative, got {}", name, value)));
    }
    Ok(())
}

/// Uniform sample in `[-bound, bound]`. `bound` must be finite and >= 0.
///
/// Scaled from the unit interval: a `-bound..=bound` range overflows once
/// `2 * bound` exceeds `f64::MAX`.
fn symmetric_uniform(rng: &mut dyn RngCore, bound: f64) -> f64 {
    bound * rng.gen_range(-1.0..=1.0)
}

/// A per-step movement policy.
///
/// Implementations never fail and never touch the caller's position; they
/// may update their own state on every call.
pub trait MobilityModel: fmt::Debug {
    fn kind(&self) -> MobilityKind;

    /// Radio range shared by every node of the network. Fixed at construction.
    fn transmission_range(&self) -> f64;

    /// Displacement for a node currently at `position`.
    fn displacement(&mut self, position: &Point, rng: &mut dyn RngCore) -> Displacement;
}

/// Independent uniform steps in `[-max_step_size, max_step_size]` per axis.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    transmission_range: f64,
    max_step_size: f64,
}

impl RandomWalk {
    pub fn new(transmission_range: f64, max_step_size: f64) -> Self {
        Self {
            transmission_range,
            max_step_size,
        }
    }
}

impl MobilityModel for RandomWalk {
    fn kind(&self) -> MobilityKind {
        MobilityKind::RandomWalk
    }

    fn transmission_range(&self) -> f64 {
        self.transmission_range
    }

    fn displacement(&mut self, _position: &Point, rng: &mut dyn RngCore) -> Displacement {
        let dx = symmetric_uniform(rng, self.max_step_size);
        let dy = symmetric_uniform(rng, self.max_step_size);
        Displacement::new(dx, dy)
    }
}

/// Gauss-Markov model: `d = alpha * d_prev + N(0, beta)` on each axis.
///
/// The previous displacement is shared across all nodes of the network, so
/// consecutive nodes in the movement pass see each other's momentum.
#[derive(Debug, Clone)]
pub struct GaussMarkov {
    transmission_range: f64,
    alpha: f64,
    noise: Normal<f64>,
    previous: Displacement,
}

impl GaussMarkov {
    pub fn new(transmission_range: f64, alpha: f64, beta: f64) -> Result<Self, ConfigError> {
        let noise = Normal::new(0.0, beta).map_err(|e| ConfigError::InvalidParameter(format!("beta {}: {}", beta, e)))?;
        Ok(Self {
            transmission_range,
            alpha,
            noise,
            previous: Displacement::ZERO,
        })
    }

    pub fn previous(&self) -> Displacement {
        self.previous
    }
}

impl MobilityModel for GaussMarkov {
    fn kind(&self) -> MobilityKind {
        MobilityKind::GaussMarkov
    }

    fn transmission_range(&self) -> f64 {
        self.transmission_range
    }

    fn displacement(&mut self, _position: &Point, rng: &mut dyn RngCore) -> Displacement {
        let dx = self.alpha * self.previous.dx + self.noise.sample(rng);
        let dy = self.alpha * self.previous.dy + self.noise.sample(rng);
        self.previous = Displacement::new(dx, dy);
        self.previous
    }
}

/// Nodes head for the nearest landmark at one transmission range per step and
/// stop once within `landmark_range` of it.
#[derive(Debug, Clone)]
pub struct LandmarkSeeking {
    transmission_range: f64,
    landmarks: Vec<Point>,
    landmark_range: f64,
}

impl LandmarkSeeking {
    /// Scatter `num_landmarks` landmarks uniformly over the world area.
    pub fn new(transmission_range: f64, num_landmarks: usize, landmark_range: f64, rng: &mut dyn RngCore) -> Self {
        let landmarks = (0..num_landmarks)
            .map(|_| Point::new(rng.gen_range(0.0..WORLD_SIZE), rng.gen_range(0.0..WORLD_SIZE)))
            .collect();
        Self::with_landmarks(transmission_range, landmarks, landmark_range)
    }

    /// Use a fixed landmark set. `landmarks` must not be empty.
    pub fn with_landmarks(transmission_range: f64, landmarks: Vec<Point>, landmark_range: f64) -> Self {
        Self {
            transmission_range,
            landmarks,
            landmark_range,
        }
    }

    pub fn landmarks(&self) -> &[Point] {
        &self.landmarks
    }

    /// Nearest landmark to `position`; the first one wins ties.
    fn nearest(&self, position: &Point) -> Option<&Point> {
        self.landmarks
            .iter()
            .min_by(|a, b| distance2(a, position).total_cmp(&distance2(b, position)))
    }
}

impl MobilityModel for LandmarkSeeking {
    fn kind(&self) -> MobilityKind {
        MobilityKind::Landmark
    }

    fn transmission_range(&self) -> f64 {
        self.transmission_range
    }

    fn displacement(&mut self, position: &Point, _rng: &mut dyn RngCore) -> Displacement {
        let Some(target) = self.nearest(position) else {
            return Displacement::ZERO;
        };
        let dx = target.x - position.x;
        let dy = target.y - position.y;
        let dist = distance_from_d2(dx * dx + dy * dy);
        if dist <= self.landmark_range {
            return Displacement::ZERO;
        }
        Displacement::new(dx * self.transmission_range / dist, dy * self.transmission_range / dist)
    }
}

/// Constant wind vector plus a uniform random-walk term.
#[derive(Debug, Clone)]
pub struct WindDrift {
    transmission_range: f64,
    drift: Displacement,
    max_step_size: f64,
}

impl WindDrift {
    /// `wind_dir` is in degrees, measured counter-clockwise from the +x axis.
    pub fn new(transmission_range: f64, wind_speed: f64, wind_dir: f64, max_step_size: f64) -> Self {
        Self {
            transmission_range,
            drift: polar(wind_speed, wind_dir.to_radians()),
            max_step_size,
        }
    }

    pub fn drift(&self) -> Displacement {
        self.drift
    }
}

impl MobilityModel for WindDrift {
    fn kind(&self) -> MobilityKind {
        MobilityKind::WindDrift
    }

    fn transmission_range(&self) -> f64 {
        self.transmission_range
    }

    fn displacement(&mut self, _position: &Point, rng: &mut dyn RngCore) -> Displacement {
        let walk_dx = symmetric_uniform(rng, self.max_step_size);
        let walk_dy = symmetric_uniform(rng, self.max_step_size);
        Displacement::new(self.drift.dx + walk_dx, self.drift.dy + walk_dy)
    }
}

/// Random speed along a heading that wanders by up to ±π/4 per call.
///
/// The heading is not normalised; it accumulates across calls.
#[derive(Debug, Clone)]
pub struct DirectedRandomWalk {
    transmission_range: f64,
    max_speed: f64,
    heading: f64,
}

impl DirectedRandomWalk {
    /// Start with a heading drawn uniformly from `[0, 2π)`.
    pub fn new(transmission_range: f64, max_speed: f64, rng: &mut dyn RngCore) -> Self {
        let heading = rng.gen_range(0.0..TAU);
        Self::with_heading(transmission_range, max_speed, heading)
    }

    pub fn with_heading(transmission_range: f64, max_speed: f64, heading: f64) -> Self {
        Self {
            transmission_range,
            max_speed,
            heading,
        }
    }

    /// Current heading in radians.
    pub fn heading(&self) -> f64 {
        self.heading
    }
}

impl MobilityModel for DirectedRandomWalk {
    fn kind(&self) -> MobilityKind {
        MobilityKind::DirectedRandomWalk
    }

    fn transmission_range(&self) -> f64 {
        self.transmission_range
    }

    fn displacement(&mut self, _position: &Point, rng: &mut dyn RngCore) -> Displacement {
        let speed = rng.gen_range(0.0..=self.max_speed);
        let step = polar(speed, self.heading);
        self.heading += rng.gen_range(-FRAC_PI_4..=FRAC_PI_4);
        step
    }
}

/// Uniform jitter in `[-magnitude, magnitude]` per axis.
#[derive(Debug, Clone)]
pub struct SeismicJitter {
    transmission_range: f64,
    magnitude: f64,
}

impl SeismicJitter {
    pub fn new(transmission_range: f64, magnitude: f64) -> Self {
        Self {
            transmission_range,
            magnitude,
        }
    }
}

impl MobilityModel for SeismicJitter {
    fn kind(&self) -> MobilityKind {
        MobilityKind::Seismic
    }

    fn transmission_range(&self) -> f64 {
        self.transmission_range
    }

    fn displacement(&mut self, _position: &Point, rng: &mut dyn RngCore) -> Displacement {
        let dx = symmetric_uniform(rng, self.magnitude);
        let dy = symmetric_uniform(rng, self.magnitude);
        Displacement::new(dx, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const SAMPLES: usize = 20_000;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5eed)
    }

    fn origin() -> Point {
        Point::new(50.0, 50.0)
    }

    /// Draw `SAMPLES` displacements, check every component is within `bound`
    /// and return the per-axis means.
    fn sample_bounded(model: &mut dyn MobilityModel, bound: f64) -> (f64, f64) {
        let mut rng = rng();
        let (mut sum_x, mut sum_y) = (0.0, 0.0);
        for _ in 0..SAMPLES {
            let d = model.displacement(&origin(), &mut rng);
            assert!(d.dx >= -bound && d.dx <= bound, "dx {} outside ±{}", d.dx, bound);
            assert!(d.dy >= -bound && d.dy <= bound, "dy {} outside ±{}", d.dy, bound);
            sum_x += d.dx;
            sum_y += d.dy;
        }
        (sum_x / SAMPLES as f64, sum_y / SAMPLES as f64)
    }

    #[test]
    fn kind_parses_every_selector() {
        for kind in MobilityKind::ALL {
            assert_eq!(kind.as_str().parse::<MobilityKind>().unwrap(), kind);
            assert_eq!(kind.to_string(), kind.as_str());
            assert_eq!(MobilityParams::defaults(kind).kind(), kind);
        }
    }

    #[test]
    fn unknown_selector_is_rejected() {
        let err = "teleport".parse::<MobilityKind>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownMobilityModel(ref name) if name == "teleport"));
        // Selectors are case-sensitive
        assert!("Seismic".parse::<MobilityKind>().is_err());
    }

    #[test]
    fn random_walk_stays_within_step_and_centres_on_zero() {
        let mut model = RandomWalk::new(10.0, 5.0);
        let (mean_x, mean_y) = sample_bounded(&mut model, 5.0);
        assert!(mean_x.abs() < 0.15, "mean dx {}", mean_x);
        assert!(mean_y.abs() < 0.15, "mean dy {}", mean_y);
    }

    #[test]
    fn seismic_stays_within_magnitude_and_centres_on_zero() {
        let mut model = SeismicJitter::new(10.0, 2.0);
        let (mean_x, mean_y) = sample_bounded(&mut model, 2.0);
        assert!(mean_x.abs() < 0.06, "mean dx {}", mean_x);
        assert!(mean_y.abs() < 0.06, "mean dy {}", mean_y);
    }

    #[test]
    fn zero_step_random_walk_is_stationary() {
        let mut model = RandomWalk::new(10.0, 0.0);
        let mut rng = rng();
        for _ in 0..100 {
            let d = model.displacement(&origin(), &mut rng);
            assert_eq!(d, Displacement::ZERO);
        }
    }

    #[test]
    fn gauss_markov_degenerates_to_stationary() {
        let mut model = GaussMarkov::new(10.0, 0.0, 0.0).unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            let d = model.displacement(&origin(), &mut rng);
            assert_eq!(d.dx, 0.0);
            assert_eq!(d.dy, 0.0);
        }
    }

    #[test]
    fn gauss_markov_carries_previous_displacement() {
        let mut model = GaussMarkov::new(10.0, 0.5, 0.0).unwrap();
        model.previous = Displacement::new(8.0, -4.0);
        let mut rng = rng();
        let d = model.displacement(&origin(), &mut rng);
        assert_eq!(d, Displacement::new(4.0, -2.0));
        assert_eq!(model.previous(), d);
        let d = model.displacement(&origin(), &mut rng);
        assert_eq!(d, Displacement::new(2.0, -1.0));
    }

    #[test]
    fn gauss_markov_rejects_negative_beta() {
        assert!(GaussMarkov::new(10.0, 0.5, -1.0).is_err());
        let params = MobilityParams::GaussMarkov { alpha: 0.5, beta: -0.1 };
        assert!(matches!(params.validate(10.0), Err(ConfigError::InvalidParameter(_))));
    }

    #[test]
    fn landmark_arrival_returns_zero() {
        let mut model = LandmarkSeeking::new(10.0, 5, 0.0, &mut rng());
        assert_eq!(model.landmarks().len(), 5);
        let landmarks = model.landmarks().to_vec();
        for landmark in &landmarks {
            assert!(landmark.x >= 0.0 && landmark.x < WORLD_SIZE);
            assert!(landmark.y >= 0.0 && landmark.y < WORLD_SIZE);
            let d = model.displacement(landmark, &mut rng());
            assert_eq!(d, Displacement::ZERO);
        }
    }

    #[test]
    fn landmark_within_range_stops() {
        let mut model = LandmarkSeeking::with_landmarks(10.0, vec![Point::new(0.0, 0.0)], 5.0);
        // Exactly on the arrival boundary
        let d = model.displacement(&Point::new(3.0, 4.0), &mut rng());
        assert_eq!(d, Displacement::ZERO);
    }

    #[test]
    fn landmark_moves_one_range_toward_nearest() {
        let landmarks = vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        let mut model = LandmarkSeeking::with_landmarks(10.0, landmarks, 5.0);
        let d = model.displacement(&Point::new(70.0, 0.0), &mut rng());
        assert!((d.dx - 10.0).abs() < 1e-12);
        assert!(d.dy.abs() < 1e-12);

        let d = model.displacement(&Point::new(30.0, 40.0), &mut rng());
        assert!((d.length() - 10.0).abs() < 1e-9);
        assert!((d.dx - -6.0).abs() < 1e-9 && (d.dy - -8.0).abs() < 1e-9);
    }

    #[test]
    fn landmark_ignores_randomness() {
        let mut model = LandmarkSeeking::with_landmarks(10.0, vec![Point::new(20.0, 20.0)], 1.0);
        let a = model.displacement(&Point::new(80.0, 10.0), &mut StdRng::seed_from_u64(1));
        let b = model.displacement(&Point::new(80.0, 10.0), &mut StdRng::seed_from_u64(2));
        assert_eq!(a, b);
    }

    #[test]
    fn landmark_requires_at_least_one() {
        let params = MobilityParams::Landmark {
            num_landmarks: 0,
            landmark_range: 5.0,
        };
        assert!(params.build(10.0, &mut rng()).is_err());
    }

    #[test]
    fn wind_drift_without_walk_is_deterministic() {
        let mut model = WindDrift::new(10.0, 10.0, 45.0, 0.0);
        let expected_dx = 10.0 * 45.0_f64.to_radians().cos();
        let expected_dy = 10.0 * 45.0_f64.to_radians().sin();
        let mut rng = rng();
        for _ in 0..50 {
            let d = model.displacement(&origin(), &mut rng);
            assert_eq!(d.dx, expected_dx);
            assert_eq!(d.dy, expected_dy);
        }
        assert!((model.drift().dx - 7.0710678118654755).abs() < 1e-12);
    }

    #[test]
    fn wind_drift_walk_is_centred_on_drift() {
        let mut model = WindDrift::new(10.0, 3.0, 180.0, 1.0);
        let mut rng = rng();
        for _ in 0..1000 {
            let d = model.displacement(&origin(), &mut rng);
            assert!(d.dx >= -4.0 - 1e-12 && d.dx <= -2.0 + 1e-12);
            assert!(d.dy.abs() <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn directed_walk_respects_speed_and_turn_limits() {
        let mut model = DirectedRandomWalk::new(10.0, 5.0, &mut rng());
        assert!(model.heading() >= 0.0 && model.heading() < TAU);
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..SAMPLES {
            let before = model.heading();
            let d = model.displacement(&origin(), &mut rng);
            assert!(d.length() <= 5.0 + 1e-9, "step {} exceeds max speed", d.length());
            let turn = model.heading() - before;
            assert!(turn.abs() <= FRAC_PI_4 + 1e-12, "turn {} exceeds π/4", turn);
        }
    }

    #[test]
    fn directed_walk_moves_along_current_heading() {
        let mut model = DirectedRandomWalk::with_heading(10.0, 5.0, 0.0);
        let d = model.displacement(&origin(), &mut rng());
        assert!(d.dx >= 0.0);
        assert_eq!(d.dy, 0.0);
    }

    #[test]
    fn build_carries_transmission_range() {
        let mut rng = rng();
        for kind in MobilityKind::ALL {
            let model = MobilityParams::defaults(kind).build(12.5, &mut rng).unwrap();
            assert_eq!(model.kind(), kind);
            assert_eq!(model.transmission_range(), 12.5);
        }
    }

    #[test]
    fn build_rejects_bad_parameters() {
        let mut rng = rng();
        let cases = [
            MobilityParams::RandomWalk { max_step_size: -1.0 },
            MobilityParams::RandomWalk { max_step_size: f64::NAN },
            MobilityParams::GaussMarkov {
                alpha: f64::INFINITY,
                beta: 0.1,
            },
            MobilityParams::WindDrift {
                wind_speed: 1.0,
                wind_dir: f64::NAN,
                max_step_size: 1.0,
            },
            MobilityParams::DirectedRandomWalk { max_speed: -0.5 },
            MobilityParams::Seismic { magnitude: f64::INFINITY },
        ];
        for params in cases {
            assert!(params.build(10.0, &mut rng).is_err(), "{:?} should be rejected", params);
        }
        assert!(MobilityParams::defaults(MobilityKind::Seismic).build(-1.0, &mut rng).is_err());
    }

    #[test]
    fn huge_finite_step_sizes_still_sample() {
        let mut rng = rng();
        for params in [
            MobilityParams::RandomWalk { max_step_size: 1e308 },
            MobilityParams::WindDrift {
                wind_speed: 0.0,
                wind_dir: 0.0,
                max_step_size: f64::MAX,
            },
            MobilityParams::Seismic { magnitude: f64::MAX },
        ] {
            let mut model = params.build(10.0, &mut rng).unwrap();
            for _ in 0..100 {
                let d = model.displacement(&Point::new(50.0, 50.0), &mut rng);
                assert!(d.dx.is_finite() && d.dy.is_finite(), "{:?} gave {:?}", params, d);
            }
        }
    }
}
