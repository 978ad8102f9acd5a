use crate::assets::Assets;
use crate::constants::*;
use crate::difficulty::DifficultyLevel;
use crate::rendering::GameGrid;
use crate::types::{Rect, Vector2D};
use rand::Rng;
use log::debug;

// --- Player ---
pub struct Player {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub size: Vector2D,
    pub alive: bool,
    bounds: Rect,
    frame_index: usize,
    frame_timer: f64,
}

impl Player {
    pub fn new(x: f64, y: f64) -> Self {
        Player {
            position: Vector2D::new(x, y),
            velocity: Vector2D::new(0.0, 0.0),
            size: Vector2D::new(PLAYER_SIZE, PLAYER_SIZE),
            alive: true,
            bounds: Rect::new(x, y, PLAYER_SIZE, PLAYER_SIZE),
            frame_index: 0,
            frame_timer: 0.0,
        }
    }

    pub fn jump(&mut self) {
        self.velocity.y = FLAP_IMPULSE;
    }

    /// Integrates velocity, then position, then the flap animation.
    pub fn apply_gravity(&mut self, dt: f64) {
        self.velocity.y += GRAVITY * dt;
        self.position = self.position.add(self.velocity.scale(dt));

        self.frame_timer += dt;
        if self.frame_timer > PLAYER_FRAME_INTERVAL {
            self.frame_timer = 0.0;
            self.frame_index = self.frame_index.wrapping_add(1);
        }

        self.bounds.set_position(self.position.x, self.position.y);
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Touching the ground or pushing the head past the ceiling ends the round.
    pub fn is_out_of_bounds(&self, world_height: f64) -> bool {
        self.position.y <= GROUND_LEVEL || self.position.y + PLAYER_CEILING_MARGIN >= world_height
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        let sprite = if self.alive { assets.bird_frame(self.frame_index()) } else { "xox" };
        game_grid.put_world_str(self.position.x, self.position.y + self.size.y / 2.0, sprite);
    }
}

// --- Pipe pair ---
pub struct Pipe {
    x: f64,
    gap_y: f64,
    speed: f64,
    width: f64,
    world_height: f64,
    bounds: [Rect; 2], // [0] = top segment, [1] = bottom segment
}

impl Pipe {
    pub fn new<R: Rng>(x: f64, world_height: f64, speed: f64, rng: &mut R) -> Self {
        let mut pipe = Pipe {
            x,
            gap_y: world_height / 2.0,
            speed,
            width: PIPE_WIDTH,
            world_height,
            bounds: [Rect::new(x, 0.0, PIPE_WIDTH, 0.0); 2],
        };
        pipe.randomize_gap(rng);
        pipe.update_rects();
        pipe
    }

    pub fn gap_y(&self) -> f64 {
        self.gap_y
    }

    fn randomize_gap<R: Rng>(&mut self, rng: &mut R) {
        let min_y = PIPE_GAP_MARGIN;
        let max_y = self.world_height - PIPE_GAP_MARGIN;
        self.gap_y = if max_y > min_y { rng.gen_range(min_y..=max_y) } else { min_y };
    }

    fn update_rects(&mut self) {
        let bottom_height = (self.gap_y - PIPE_GAP / 2.0).max(0.0);
        self.bounds[1] = Rect::new(self.x, 0.0, self.width, bottom_height);

        let top_y = self.gap_y + PIPE_GAP / 2.0 + PIPE_TOP_LIFT;
        let top_height = (self.world_height - top_y).max(0.0);
        self.bounds[0] = Rect::new(self.x, top_y, self.width, top_height);
    }

    fn update(&mut self, dt: f64) {
        self.x -= self.speed * dt;
        self.update_rects();
    }

    fn reposition<R: Rng>(&mut self, x: f64, rng: &mut R) {
        self.x = x;
        self.randomize_gap(rng);
        self.update_rects();
        debug!("Pipe gap moved to y = {:.1}", self.gap_y());
    }

    fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        let gap_bottom = self.gap_y - PIPE_GAP / 2.0;
        let gap_top = self.gap_y + PIPE_GAP / 2.0;
        game_grid.fill_world_rect(&Rect::new(self.x, 0.0, self.width, gap_bottom), assets.pipe_glyph);
        game_grid.fill_world_rect(
            &Rect::new(self.x, gap_top, self.width, self.world_height - gap_top),
            assets.pipe_glyph,
        );
        game_grid.fill_world_rect(&Rect::new(self.x, gap_bottom - 8.0, self.width, 8.0), assets.pipe_cap_glyph);
        game_grid.fill_world_rect(&Rect::new(self.x, gap_top, self.width, 8.0), assets.pipe_cap_glyph);
    }
}

// --- Sine-wave flyer ---
pub struct Flyer {
    x: f64,
    base_y: f64,
    width: f64,
    height: f64,
    speed: f64,
    elapsed: f64,
    bounds: Rect,
}

impl Flyer {
    pub fn new(base_width: f64, x: f64, world_height: f64, speed: f64) -> Self {
        let width = base_width * FLYER_SCALE;
        let height = base_width * FLYER_SCALE;
        let base_y = world_height / 2.0;
        let hitbox_width = width * FLYER_HITBOX_SCALE;
        let hitbox_height = height * FLYER_HITBOX_SCALE;
        Flyer {
            x,
            base_y,
            width,
            height,
            speed,
            elapsed: 0.0,
            bounds: Rect::new(
                x + (width - hitbox_width) / 2.0,
                base_y + (height - hitbox_height) / 2.0,
                hitbox_width,
                hitbox_height,
            ),
        }
    }

    fn update(&mut self, dt: f64) {
        self.elapsed += dt;
        self.x -= self.speed * dt;
        let offset = (self.elapsed * FLYER_WAVE_FREQUENCY).sin() * FLYER_WAVE_AMPLITUDE;
        let current_y = self.base_y + offset;
        self.bounds.set_position(
            self.x + (self.width - self.bounds.width) / 2.0,
            current_y + (self.height - self.bounds.height) / 2.0,
        );
    }

    fn reposition(&mut self, x: f64) {
        self.x = x;
        self.bounds.x = x + (self.width - self.bounds.width) / 2.0;
    }

    fn frame_index(&self) -> usize {
        (self.elapsed * FLYER_FRAME_RATE) as usize
    }

    fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        let sprite = assets.flyer_frame(self.frame_index());
        game_grid.put_world_str(self.bounds.x, self.bounds.y + self.bounds.height / 2.0, sprite);
    }
}

/// Anything the player can crash into.
pub enum Obstacle {
    Pipe(Pipe),
    Flyer(Flyer),
}

impl Obstacle {
    pub fn update(&mut self, dt: f64) {
        match self {
            Obstacle::Pipe(pipe) => pipe.update(dt),
            Obstacle::Flyer(flyer) => flyer.update(dt),
        }
    }

    pub fn bounds(&self) -> &[Rect] {
        match self {
            Obstacle::Pipe(pipe) => &pipe.bounds,
            Obstacle::Flyer(flyer) => std::slice::from_ref(&flyer.bounds),
        }
    }

    pub fn overlaps(&self, player_box: &Rect) -> bool {
        self.bounds().iter().any(|r| r.overlaps(player_box))
    }

    /// Left edge used for spacing and scoring.
    pub fn x(&self) -> f64 {
        match self {
            Obstacle::Pipe(pipe) => pipe.x,
            Obstacle::Flyer(flyer) => flyer.bounds.x,
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            Obstacle::Pipe(pipe) => pipe.width,
            Obstacle::Flyer(flyer) => flyer.bounds.width,
        }
    }

    pub fn center_x(&self) -> f64 {
        self.x() + self.width() / 2.0
    }

    pub fn is_offscreen(&self) -> bool {
        self.x() + self.width() < 0.0
    }

    pub fn reposition<R: Rng>(&mut self, x: f64, rng: &mut R) {
        match self {
            Obstacle::Pipe(pipe) => pipe.reposition(x, rng),
            Obstacle::Flyer(flyer) => flyer.reposition(x),
        }
        debug!("Obstacle recycled to x = {:.1} at speed {:.0}", x, self.speed());
    }

    pub fn speed(&self) -> f64 {
        match self {
            Obstacle::Pipe(pipe) => pipe.speed,
            Obstacle::Flyer(flyer) => flyer.speed,
        }
    }

    /// Each variant picks the speed meant for it.
    pub fn apply_difficulty(&mut self, level: &DifficultyLevel) {
        match self {
            Obstacle::Pipe(pipe) => pipe.speed = level.pipe_speed,
            Obstacle::Flyer(flyer) => flyer.speed = level.flyer_speed,
        }
    }

    pub fn draw(&self, game_grid: &mut GameGrid, assets: &Assets) {
        match self {
            Obstacle::Pipe(pipe) => pipe.draw(game_grid, assets),
            Obstacle::Flyer(flyer) => flyer.draw(game_grid, assets),
        }
    }
}
