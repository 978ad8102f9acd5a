use crate::assets::Assets;
use crate::constants::{INITIAL_OBSTACLE_X, PIPE_WIDTH};
use crate::difficulty::level_for;
use crate::entities::{Flyer, Obstacle, Pipe};
use crate::rendering::GameGrid;
use crate::types::Rect;
use rand::Rng;
use log::info;

/// What one obstacle update did to the round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    pub collided: bool,
    pub passed: u32,
}

/// Two pipes and one flyer, recycled to the right as they leave the screen.
pub struct ObstacleSet<R: Rng> {
    obstacles: Vec<Obstacle>,
    rng: R,
}

impl<R: Rng> ObstacleSet<R> {
    pub fn new(world_height: f64, mut rng: R) -> Self {
        let level = level_for(0);
        let obstacles = vec![
            Obstacle::Pipe(Pipe::new(INITIAL_OBSTACLE_X[0], world_height, level.pipe_speed, &mut rng)),
            Obstacle::Pipe(Pipe::new(INITIAL_OBSTACLE_X[1], world_height, level.pipe_speed, &mut rng)),
            Obstacle::Flyer(Flyer::new(PIPE_WIDTH, INITIAL_OBSTACLE_X[2], world_height, level.flyer_speed)),
        ];
        ObstacleSet { obstacles, rng }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Moves, recycles, collides and scores every obstacle for one frame.
    ///
    /// `score` is the score at the start of the frame. Passes made earlier in the
    /// same frame already count towards spacing and speed for later obstacles.
    /// Scoring stops at the first collision.
    pub fn update(&mut self, dt: f64, player_box: &Rect, player_x: f64, score: u32) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        let mut current_score = score;

        for i in 0..self.obstacles.len() {
            let center_before = self.obstacles[i].center_x();
            self.obstacles[i].update(dt);

            if self.obstacles[i].is_offscreen() {
                let furthest = self.obstacles.iter().map(Obstacle::x).fold(0.0, f64::max);
                let spacing = level_for(current_score).spacing;
                self.obstacles[i].reposition(furthest + spacing, &mut self.rng);
            }

            if self.obstacles[i].overlaps(player_box) {
                outcome.collided = true;
                break;
            }

            let center_now = self.obstacles[i].center_x();
            if center_before >= player_x && center_now < player_x {
                outcome.passed += 1;
                current_score += 1;
                self.obstacles[i].apply_difficulty(&level_for(current_score));
                info!("Obstacle passed. Score: {}", current_score);
            }
        }

        outcome
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        for obstacle in &self.obstacles {
            obstacle.draw(game_grid, assets);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FRAME_DT, PLAYER_START_X, WORLD_HEIGHT};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded_set() -> ObstacleSet<ChaCha8Rng> {
        ObstacleSet::new(WORLD_HEIGHT, ChaCha8Rng::seed_from_u64(42))
    }

    fn far_away() -> Rect {
        Rect::new(-10_000.0, -10_000.0, 1.0, 1.0)
    }

    #[test]
    fn starts_with_two_pipes_and_a_flyer() {
        let set = seeded_set();
        let kinds: Vec<bool> = set.obstacles().iter().map(|o| matches!(o, Obstacle::Pipe(_))).collect();
        assert_eq!(kinds, vec![true, true, false]);
        assert_eq!(set.obstacles()[0].x(), INITIAL_OBSTACLE_X[0]);
        assert_eq!(set.obstacles()[1].x(), INITIAL_OBSTACLE_X[1]);
        assert!(set.obstacles().iter().all(|o| o.speed() == 120.0));
    }

    #[test]
    fn obstacles_only_move_left_until_recycled() {
        let mut set = seeded_set();
        for _ in 0..60 {
            let before: Vec<f64> = set.obstacles().iter().map(Obstacle::x).collect();
            set.update(FRAME_DT, &far_away(), PLAYER_START_X, 0);
            for (o, x) in set.obstacles().iter().zip(before) {
                assert!(o.x() < x);
            }
        }
    }

    #[test]
    fn recycled_obstacle_lands_past_the_furthest_one() {
        let mut set = seeded_set();
        set.obstacles[0].reposition(-PIPE_WIDTH - 1.0, &mut set.rng);
        // The flyer has not moved yet when the first pipe is recycled.
        let furthest = set.obstacles()[2].x();

        set.update(FRAME_DT, &far_away(), PLAYER_START_X, 0);
        let expected = furthest + level_for(0).spacing;
        assert!((set.obstacles()[0].x() - expected).abs() < 1e-9);
    }

    #[test]
    fn recycle_spacing_follows_score() {
        let mut set = seeded_set();
        set.obstacles[1].reposition(-PIPE_WIDTH - 1.0, &mut set.rng);
        let furthest = set.obstacles()[2].x();
        set.update(FRAME_DT, &far_away(), PLAYER_START_X, 35);
        let expected = furthest + level_for(35).spacing;
        assert!((set.obstacles()[1].x() - expected).abs() < 1e-9);
    }

    #[test]
    fn each_pass_scores_once() {
        let mut set = seeded_set();
        let mut passed = 0;
        // First pipe centre starts at 376 and needs about 3 seconds to reach the player.
        for _ in 0..100 {
            passed += set.update(FRAME_DT, &far_away(), PLAYER_START_X, passed).passed;
        }
        assert_eq!(passed, 1);

        for _ in 0..50 {
            assert_eq!(set.update(0.0, &far_away(), PLAYER_START_X, passed).passed, 0);
        }
    }

    #[test]
    fn passed_obstacle_takes_speed_for_new_score() {
        let mut set = seeded_set();
        let mut score = 9;
        for _ in 0..100 {
            score += set.update(FRAME_DT, &far_away(), PLAYER_START_X, score).passed;
        }
        assert_eq!(score, 10);
        assert_eq!(set.obstacles()[0].speed(), level_for(10).pipe_speed);
        assert_eq!(set.obstacles()[1].speed(), level_for(0).pipe_speed);
    }

    #[test]
    fn overlapping_player_collides() {
        let mut set = seeded_set();
        let pipe_x = set.obstacles()[0].x() - 120.0 * FRAME_DT;
        let player_box = Rect::new(pipe_x + 1.0, 1.0, 10.0, 10.0);
        let outcome = set.update(FRAME_DT, &player_box, PLAYER_START_X, 0);
        assert!(outcome.collided);
        assert_eq!(outcome.passed, 0);
    }
}
