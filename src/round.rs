use crate::assets::Assets;
use crate::constants::{PLAYER_START_X, PLAYER_START_Y};
use crate::entities::Player;
use crate::obstacles::ObstacleSet;
use crate::rendering::GameGrid;
use rand::Rng;
use log::info;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    GameOver,
    Idle,
}

/// One playing session: the bird, the obstacles and the score.
pub struct Round<R: Rng> {
    pub player: Player,
    pub obstacles: ObstacleSet<R>,
    world_height: f64,
    score: u32,
    game_over: bool,
}

impl<R: Rng> Round<R> {
    pub fn new(world_height: f64, rng: R) -> Self {
        Round {
            player: Player::new(PLAYER_START_X, PLAYER_START_Y),
            obstacles: ObstacleSet::new(world_height, rng),
            world_height,
            score: 0,
            game_over: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Advances the round by `dt` seconds. Reports `GameOver` on the frame the round ends and `Idle` after.
    pub fn step(&mut self, dt: f64, flap: bool) -> StepOutcome {
        if self.is_over() {
            return StepOutcome::Idle;
        }

        if flap {
            self.player.jump();
        }
        self.player.apply_gravity(dt);

        let outcome = self.obstacles.update(dt, self.player.bounds(), self.player.position.x, self.score);
        self.score += outcome.passed;

        if outcome.collided {
            info!("Player hit an obstacle. Final score: {}", self.score);
            return self.end();
        }
        if self.player.is_out_of_bounds(self.world_height) {
            info!("Player left the sky at y = {:.1}. Final score: {}", self.player.position.y, self.score);
            return self.end();
        }
        StepOutcome::Running
    }

    fn end(&mut self) -> StepOutcome {
        self.game_over = true;
        self.player.alive = false;
        StepOutcome::GameOver
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        self.obstacles.draw(game_grid, assets);
        self.player.draw(game_grid, assets);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FRAME_DT, WORLD_HEIGHT};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded_round(seed: u64) -> Round<ChaCha8Rng> {
        Round::new(WORLD_HEIGHT, ChaCha8Rng::seed_from_u64(seed))
    }

    #[test]
    fn falling_to_the_ground_ends_round_once() {
        let mut round = seeded_round(1);
        let mut game_overs = 0;
        for _ in 0..300 {
            if round.step(FRAME_DT, false) == StepOutcome::GameOver {
                game_overs += 1;
            }
        }
        assert_eq!(game_overs, 1);
        assert!(round.is_over());
        assert!(!round.player.alive);
        assert_eq!(round.step(FRAME_DT, true), StepOutcome::Idle);
    }

    #[test]
    fn collision_ends_round_once() {
        let mut round = seeded_round(2);
        // Park the bird on the flyer, mid-air and clear of both pipes.
        let flyer = &round.obstacles.obstacles()[2];
        let (flyer_x, flyer_y) = (flyer.x(), flyer.bounds()[0].y);
        round.player.position.x = flyer_x;
        round.player.position.y = flyer_y;
        assert!(!round.player.is_out_of_bounds(WORLD_HEIGHT));

        let first = round.step(0.0, false);
        assert_eq!(first, StepOutcome::GameOver);
        assert_eq!(round.step(FRAME_DT, false), StepOutcome::Idle);
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn flapping_keeps_the_bird_in_the_air() {
        let mut round = seeded_round(3);
        for frame in 0..30 {
            // Flap roughly every half second from the starting height.
            let outcome = round.step(FRAME_DT, frame % 15 == 0);
            assert_eq!(outcome, StepOutcome::Running);
        }
        assert!(round.player.position.y > 200.0);
    }
}
