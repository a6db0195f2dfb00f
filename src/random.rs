use crate::config::GaConfig;
use core::cmp::min;
use log::warn;
use rand::{RngCore, SeedableRng};
use std::{
    fs::File,
    io::{self, Read},
};

/// The random decisions a reproduction cycle makes, each with its own probability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionEvent {
    /// A selected pair of parents is recombined at a cut point
    Crossover,
    /// A single gene of a child is replaced
    Mutate,
}

/// Map a probability in [0, 1] onto the u64 threshold space used by [Happens].
/// Values outside of that range are clamped.
pub fn chance(p: f64) -> u64 {
    if p.is_nan() {
        return 0;
    }
    (p.clamp(0., 1.) * u64::MAX as f64) as u64
}

pub trait Probabilities {
    fn probability(&self, evt: EvolutionEvent) -> u64;
}

pub trait Happens: RngCore + Probabilities {
    fn happens(&mut self, evt: EvolutionEvent) -> bool;
}

impl<T: RngCore + Probabilities> Happens for T {
    fn happens(&mut self, evt: EvolutionEvent) -> bool {
        self.probability(evt) > self.next_u64()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbStatic {
    crossover: u64,
    mutate: u64,
}

impl ProbStatic {
    pub fn new(crossover_rate: f64, mutation_rate: f64) -> Self {
        Self {
            crossover: chance(crossover_rate),
            mutate: chance(mutation_rate),
        }
    }
}

impl Default for ProbStatic {
    fn default() -> Self {
        Self::from(&GaConfig::default())
    }
}

impl From<&GaConfig> for ProbStatic {
    fn from(config: &GaConfig) -> Self {
        Self::new(config.crossover_rate, config.mutation_rate)
    }
}

impl Probabilities for ProbStatic {
    fn probability(&self, evt: EvolutionEvent) -> u64 {
        match evt {
            EvolutionEvent::Crossover => self.crossover,
            EvolutionEvent::Mutate => self.mutate,
        }
    }
}

/// wyrand, a small and fast generator whose whole state is one u64
#[derive(Debug, Clone)]
pub struct WyRng {
    state: u64,
}

impl WyRng {
    pub fn seeded(state: u64) -> Self {
        Self { state }
    }
}

impl RngCore for WyRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        const WY_CONST_0: u64 = 0x2d35_8dcc_aa6c_78a5;
        const WY_CONST_1: u64 = 0x8bb8_4b93_962e_acc9;
        self.state = self.state.wrapping_add(WY_CONST_0);
        let t = u128::from(self.state) * u128::from(self.state ^ WY_CONST_1);
        (t as u64) ^ (t >> 64) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let mut idx = 0;
        while idx < dst.len() {
            let lim = min(8, dst.len() - idx);
            dst[idx..idx + lim].copy_from_slice(&self.next_u64().to_le_bytes()[..lim]);
            idx += lim;
        }
    }
}

impl SeedableRng for WyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::seeded(u64::from_le_bytes(seed))
    }
}

/// A random source bound to the probabilities of the events it decides
pub struct ProbBinding<P: Probabilities, R: RngCore> {
    p: P,
    r: R,
}

impl<P: Probabilities, R: RngCore> ProbBinding<P, R> {
    pub fn new(p: P, r: R) -> Self {
        Self { p, r }
    }
}

impl<P: Probabilities, R: RngCore> Probabilities for ProbBinding<P, R> {
    fn probability(&self, evt: EvolutionEvent) -> u64 {
        self.p.probability(evt)
    }
}

impl<P: Probabilities, R: RngCore> RngCore for ProbBinding<P, R> {
    fn next_u32(&mut self) -> u32 {
        self.r.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.r.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.r.fill_bytes(dest)
    }
}

pub fn seed_urandom() -> io::Result<u64> {
    let mut file = File::open("/dev/urandom")?;
    let mut buffer = [0u8; 8];
    file.read_exact(&mut buffer)?;
    Ok(u64::from_le_bytes(buffer))
}

/// A [WyRng] seeded from /dev/urandom, or from the thread rng where that can't be read
pub fn default_rng() -> WyRng {
    let seed = seed_urandom().unwrap_or_else(|err| {
        warn!("cannot seed from /dev/urandom ({err}), falling back to the thread rng");
        rand::random()
    });
    WyRng::seeded(seed)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_t;
    use core::iter::once;
    use rand::rngs::{StdRng, ThreadRng};

    fn assert_within_deviation(
        evt: EvolutionEvent,
        chance: f64,
        range: f64,
        happens: &mut impl Happens,
    ) {
        let samples = 10_000.;
        let expected = chance * samples;
        let max_deviation = expected * range;
        for _ in 0..100 {
            let incidence = once(())
                .cycle()
                .take(samples as usize)
                .filter(|()| happens.happens(evt))
                .count() as f64;
            assert!(
                (expected - incidence).abs() < max_deviation,
                "{evt:?}: {incidence} != {expected} ± {max_deviation}"
            );
        }
    }

    // control test - we are confident that rand generates good random numbers
    #[test]
    fn test_deviation_rand() {
        let mut p_bind = ProbBinding::new(ProbStatic::new(0.7, 0.05), ThreadRng::default());
        assert_within_deviation(EvolutionEvent::Crossover, 0.7, 0.1, &mut p_bind);
        assert_within_deviation(EvolutionEvent::Mutate, 0.05, 0.33, &mut p_bind);
    }

    #[test]
    fn test_deviation_wyrand() {
        let mut p_bind = ProbBinding::new(ProbStatic::new(0.7, 0.05), default_rng());
        assert_within_deviation(EvolutionEvent::Crossover, 0.7, 0.1, &mut p_bind);
        assert_within_deviation(EvolutionEvent::Mutate, 0.05, 0.33, &mut p_bind);
    }

    test_t!(never_and_always[T: WyRng | StdRng]() {
        let mut p_bind = ProbBinding::new(ProbStatic::new(1., 0.), T::seed_from_u64(3));
        for _ in 0..10_000 {
            assert!(p_bind.happens(EvolutionEvent::Crossover));
            assert!(!p_bind.happens(EvolutionEvent::Mutate));
        }
    });

    #[test]
    fn test_chance_bounds() {
        assert_eq!(chance(0.), 0);
        assert_eq!(chance(-3.), 0);
        assert_eq!(chance(f64::NAN), 0);
        assert_eq!(chance(1.), u64::MAX);
        assert_eq!(chance(7.), u64::MAX);
        assert!(chance(0.5).abs_diff(u64::MAX / 2) < 1 << 12);
    }

    #[test]
    fn test_from_config() {
        let p = ProbStatic::from(&GaConfig::default());
        assert_eq!(p.probability(EvolutionEvent::Crossover), chance(0.7));
        assert_eq!(p.probability(EvolutionEvent::Mutate), chance(0.001));
        assert_eq!(p, ProbStatic::default());
    }

    #[test]
    fn test_wyrng_seeded_is_reproducible() {
        let mut l = WyRng::seeded(42);
        let mut r = WyRng::seed_from_u64(0);
        let mut r_again = WyRng::seed_from_u64(0);
        let mut l_again = WyRng::seeded(42);
        for _ in 0..64 {
            assert_eq!(l.next_u64(), l_again.next_u64());
            assert_eq!(r.next_u64(), r_again.next_u64());
        }
    }

    #[test]
    fn test_wyrng_fill_bytes() {
        let mut rng = WyRng::seeded(7);
        let mut want = rng.next_u64().to_le_bytes().to_vec();
        want.extend(rng.next_u64().to_le_bytes());

        let mut rng = WyRng::seeded(7);
        let mut dst = [0u8; 13];
        rng.fill_bytes(&mut dst);
        assert_eq!(dst[..], want[..13]);

        rng.fill_bytes(&mut []);
    }
}
