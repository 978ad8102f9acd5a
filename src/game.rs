use std::io::{self, Write};
use std::time::{Duration, Instant};
use crossterm::event::{self, Event};
use rand::SeedableRng;
use rand::rngs::StdRng;
use log::{error, info};

use crate::assets::Assets;
use crate::constants::*;
use crate::high_score::HighScoreStore;
use crate::rendering::{GameGrid, OutputTarget};
use crate::round::{Round, StepOutcome};
use crate::terminal_io::{Command, SimulatedInput, command_for};
use crate::types::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Paused,
    GameOver,
}

pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    simulated_input: Option<SimulatedInput>,
    max_frames: Option<u64>,
    assets: Assets,
    high_scores: HighScoreStore,
    screen: Screen,
    round: Option<Round<StdRng>>,
    rounds_started: u64,
    flap_pending: bool,
    running: bool,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        simulated_input: Option<SimulatedInput>,
        high_scores: HighScoreStore,
        max_frames: Option<u64>,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            simulated_input,
            max_frames,
            assets: Assets::load(),
            high_scores,
            screen: Screen::Menu,
            round: None,
            rounds_started: 0,
            flap_pending: false,
            running: true,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn best_score(&self) -> u32 {
        self.high_scores.best()
    }

    pub fn score(&self) -> u32 {
        self.round.as_ref().map_or(0, |round| round.score())
    }

    fn debug_mode_active(&self) -> bool {
        self.simulated_input.is_some()
    }

    pub fn run(&mut self) -> io::Result<()> {
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
        let mut frame_count: u64 = 0;
        let mut last_frame = Instant::now();
        let mut last_screen = self.screen;

        while self.running && self.max_frames.is_none_or(|max| frame_count < max) {
            if let Some(command) = self.poll_command(frame_count)? {
                self.apply_command(command);
            }

            let dt = if self.debug_mode_active() {
                FRAME_DT
            } else {
                let now = Instant::now();
                let elapsed = now.duration_since(last_frame).as_secs_f64();
                last_frame = now;
                elapsed.min(MAX_FRAME_DT)
            };
            self.update(dt);

            if game_grid.width != self.terminal_width || game_grid.height != self.terminal_height {
                game_grid = GameGrid::new(self.terminal_width, self.terminal_height);
            }
            game_grid.clear();
            self.draw(&mut game_grid);
            self.render(&game_grid)?;

            if self.screen != last_screen {
                info!("Screen {:?} -> {:?} at frame {}", last_screen, self.screen, frame_count);
                self.log_screen_buffer();
                last_screen = self.screen;
            }
            frame_count += 1;
        }

        info!("Game loop ended after {} frames. Best score: {}", frame_count, self.best_score());
        self.log_screen_buffer();
        Ok(())
    }

    fn poll_command(&mut self, frame_count: u64) -> io::Result<Option<Command>> {
        let mut current_event: Option<Event> = None;
        if let Some(sim_input) = &mut self.simulated_input {
            if sim_input.poll(frame_count)? {
                current_event = Some(sim_input.read()?);
            }
        } else if event::poll(Duration::from_millis(INPUT_POLL_MILLIS)).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            current_event = Some(event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?);
        }

        Ok(match current_event {
            Some(Event::Resize(new_width, new_height)) => {
                self.terminal_width = new_width;
                self.terminal_height = new_height;
                info!("Terminal resized to {}x{}", new_width, new_height);
                None
            }
            Some(event) => command_for(&event),
            None => None,
        })
    }

    pub fn apply_command(&mut self, command: Command) {
        match (self.screen, command) {
            (_, Command::Quit) => {
                info!("Quit requested.");
                self.running = false;
            }
            (Screen::Menu, Command::Confirm) | (Screen::GameOver, Command::Confirm) => self.start_round(),
            (Screen::Menu, Command::Back) => {}
            (Screen::Playing, Command::Confirm) => self.flap_pending = true,
            (Screen::Playing, Command::Back) => self.screen = Screen::Paused,
            (Screen::Paused, Command::Confirm) => self.screen = Screen::Playing,
            (Screen::Paused, Command::Back) | (Screen::GameOver, Command::Back) => {
                self.round = None;
                self.screen = Screen::Menu;
            }
        }
    }

    fn start_round(&mut self) {
        // Headless runs replay the same obstacle layout.
        let rng = if self.debug_mode_active() {
            StdRng::seed_from_u64(self.rounds_started)
        } else {
            StdRng::from_entropy()
        };
        self.rounds_started += 1;
        self.round = Some(Round::new(WORLD_HEIGHT, rng));
        self.flap_pending = false;
        self.screen = Screen::Playing;
        info!("Round {} started.", self.rounds_started);
    }

    pub fn update(&mut self, dt: f64) {
        if self.screen != Screen::Playing {
            return;
        }
        let flap = std::mem::take(&mut self.flap_pending);
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.step(dt, flap) == StepOutcome::GameOver {
            let score = round.score();
            self.screen = Screen::GameOver;
            match self.high_scores.submit(score) {
                Ok(true) => info!("High score saved: {}", score),
                Ok(false) => {}
                Err(e) => error!("Failed to save high score {}: {}", score, e),
            }
        }
    }

    fn draw(&self, game_grid: &mut GameGrid) {
        match self.screen {
            Screen::Menu => self.draw_menu(game_grid),
            Screen::Playing | Screen::Paused | Screen::GameOver => {
                if let Some(round) = &self.round {
                    round.draw(game_grid, &self.assets);
                }
                game_grid.fill_world_rect(&Rect::new(0.0, 0.0, WORLD_WIDTH, GROUND_LEVEL), self.assets.ground_glyph);
                game_grid.put_str(0, 0, &format!("Score: {}  Best: {}", self.score(), self.best_score()));
                match self.screen {
                    Screen::Paused => self.draw_banner(game_grid, &["PAUSED", "SPACE: continue   |   ESC: menu"]),
                    Screen::GameOver => self.draw_banner(
                        game_grid,
                        &[
                            "GAME OVER",
                            &format!("SCORE       {}", self.score()),
                            &format!("HIGH SCORE  {}", self.best_score()),
                            "SPACE: play again   |   ESC: menu",
                        ],
                    ),
                    _ => {}
                }
            }
        }
    }

    fn draw_menu(&self, game_grid: &mut GameGrid) {
        let art = &self.assets.title_art;
        let title_start_y = (game_grid.height / 2).saturating_sub(art.len() as u16 + 2);
        for (i, line) in art.iter().enumerate() {
            game_grid.put_centered(title_start_y + i as u16, line);
        }
        let text_y = title_start_y + art.len() as u16 + 1;
        game_grid.put_centered(text_y, "Press SPACE to flap");
        game_grid.put_centered(text_y + 1, "Dodge the pipes and the flyer");
        game_grid.put_centered(text_y + 3, &format!("Best: {}", self.best_score()));
        game_grid.put_centered(game_grid.height.saturating_sub(3), "Press SPACE to start   |   q: quit");
    }

    fn draw_banner(&self, game_grid: &mut GameGrid, lines: &[&str]) {
        let start_y = (game_grid.height / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            game_grid.put_centered(start_y + i as u16, line);
        }
    }

    fn render(&mut self, game_grid: &GameGrid) -> io::Result<()> {
        game_grid.render(&mut self.stdout_target).map_err(|e| { error!("Failed to render game grid: {}", e); e })?;
        self.stdout_target.flush().map_err(|e| { error!("Failed to flush stdout after rendering: {}", e); e })?;
        Ok(())
    }

    fn log_screen_buffer(&self) {
        if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
            sb.print_to_log();
        }
    }
}
