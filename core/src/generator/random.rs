use rand::{Rng, SeedableRng};
use rand::rngs::SmallRng;

use super::*;

/// Lights every cell independently with `config.chance_lit`, reproducible from a single seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomGridGenerator {
    seed: u64,
}

impl RandomGridGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl GridGenerator for RandomGridGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        fill_random(config, &mut rng)
    }
}

/// Same strategy as [`RandomGridGenerator`], but draws from a caller supplied source.
#[derive(Debug)]
pub struct RngGridGenerator<R> {
    rng: R,
}

impl<R: Rng> RngGridGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> GridGenerator for RngGridGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<Grid> {
        fill_random(config, &mut self.rng)
    }
}

pub(crate) fn fill_random<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Grid> {
    config.validate()?;

    let grid = Grid::from_fn(config.size, |_| rng.random_bool(config.chance_lit))?;

    log::debug!(
        "Generated {}x{} grid, {} of {} cells lit",
        config.rows(),
        config.cols(),
        grid.lit_count(),
        config.total_cells()
    );
    if grid.has_won() {
        log::info!("Generated grid is already dark, the game starts won");
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    /// Source that always yields the same word, for forcing `random_bool` outcomes.
    struct ConstRng(u64);

    impl RngCore for ConstRng {
        fn next_u32(&mut self) -> u32 {
            self.0 as u32
        }

        fn next_u64(&mut self) -> u64 {
            self.0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(self.0 as u8);
        }
    }

    fn config(size: Coord2, chance_lit: f64) -> GameConfig {
        GameConfig::new_unchecked(size, chance_lit)
    }

    #[test]
    fn zero_chance_starts_won() {
        let grid = RandomGridGenerator::new(7).generate(config((5, 5), 0.0)).unwrap();

        assert!(grid.has_won());
        assert_eq!(grid.size(), (5, 5));
    }

    #[test]
    fn full_chance_lights_everything() {
        let grid = RandomGridGenerator::new(7).generate(config((5, 5), 1.0)).unwrap();

        assert_eq!(grid, Grid::lit((5, 5)).unwrap());
        assert!(!grid.has_won());
    }

    #[test]
    fn same_seed_gives_same_grid() {
        let a = RandomGridGenerator::new(42).generate(config((8, 6), 0.5)).unwrap();
        let b = RandomGridGenerator::new(42).generate(config((8, 6), 0.5)).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.size(), (8, 6));
    }

    #[test]
    fn rejects_invalid_config() {
        let generator = RandomGridGenerator::new(1);

        assert_eq!(
            generator.clone().generate(config((0, 5), 0.5)),
            Err(GameError::InvalidDimension)
        );
        assert_eq!(
            generator.generate(config((5, 5), 2.0)),
            Err(GameError::InvalidProbability)
        );
    }

    #[test]
    fn initialize_uses_injected_source() {
        let mut low = ConstRng(0);
        let mut high = ConstRng(u64::MAX);

        let lit = initialize(config((3, 4), 0.5), &mut low).unwrap();
        let dark = initialize(config((3, 4), 0.5), &mut high).unwrap();

        assert_eq!(lit.lit_count(), 12);
        assert!(dark.has_won());
    }

    #[test]
    fn rng_generator_wraps_borrowed_source() {
        let mut rng = SmallRng::seed_from_u64(99);
        let from_wrapper = RngGridGenerator::new(&mut rng)
            .generate(config((4, 4), 0.5))
            .unwrap();

        let mut rng = SmallRng::seed_from_u64(99);
        let direct = initialize(config((4, 4), 0.5), &mut rng).unwrap();

        assert_eq!(from_wrapper, direct);
    }
}
