use rand::{rngs::SmallRng, Rng};

use crate::{coordinate::Coordinate, player::OpponentView};

use crate::player::Player;

/// Random draws made before falling back to a scan for an open cell.
const MAX_SAMPLE_ATTEMPTS: usize = 10_000;

/// Computer opponent that fires at uniformly random unshot cells.
#[derive(Debug, Default)]
pub struct AiPlayer;

impl AiPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for AiPlayer {
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        opponent: &OpponentView<'_>,
    ) -> Option<Coordinate> {
        let size = opponent.size();
        if size == 0 {
            return None;
        }
        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let coord = Coordinate::new(rng.random_range(0..size), rng.random_range(0..size));
            if !opponent.already_shot(coord) {
                return Some(coord);
            }
        }
        log::debug!("random targeting exhausted, scanning for an open cell");
        opponent.unshot().next()
    }
}
