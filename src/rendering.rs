use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute,
};

use crate::constants::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::types::Rect;

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    cursor_x: u16,
    cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer.get(y as usize).map(|r| r.iter().collect()).unwrap_or_default()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height {
            info!("{}", self.row(y));
        }
        info!("---------------------");
    }
}

// --- OutputTarget: the real terminal or a ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Nothing to do headless
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                sb.write_str(&String::from_utf8_lossy(buf));
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- GameGrid: world units projected onto terminal cells ---
pub struct GameGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: u16, y: u16, c: char) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn clear(&mut self) {
        for row in self.grid.iter_mut() {
            row.fill(' ');
        }
    }

    /// Column for a world x. Off-grid positions come back negative or past the width.
    pub fn column_of(&self, x: f64) -> i32 {
        (x / WORLD_WIDTH * self.width as f64).floor() as i32
    }

    /// Row for a world y. World y points up, rows point down.
    pub fn row_of(&self, y: f64) -> i32 {
        ((WORLD_HEIGHT - y) / WORLD_HEIGHT * self.height as f64).floor() as i32
    }

    pub fn fill_world_rect(&mut self, rect: &Rect, c: char) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let w = self.width as f64;
        let h = self.height as f64;
        let left = (rect.x / WORLD_WIDTH * w).floor().max(0.0);
        let right = (rect.right() / WORLD_WIDTH * w).ceil().min(w);
        let top = ((WORLD_HEIGHT - rect.top()) / WORLD_HEIGHT * h).floor().max(0.0);
        let bottom = ((WORLD_HEIGHT - rect.y) / WORLD_HEIGHT * h).ceil().min(h);

        let mut row = top;
        while row < bottom {
            let mut col = left;
            while col < right {
                self.set_char(col as u16, row as u16, c);
                col += 1.0;
            }
            row += 1.0;
        }
    }

    /// Writes `text` starting at the cell that holds world point (x, y).
    pub fn put_world_str(&mut self, x: f64, y: f64, text: &str) {
        let row = self.row_of(y);
        let col = self.column_of(x);
        self.put_str_at(col, row, text);
    }

    pub fn put_str(&mut self, x: u16, y: u16, text: &str) {
        self.put_str_at(x as i32, y as i32, text);
    }

    pub fn put_centered(&mut self, y: u16, text: &str) {
        let x = (self.width as i32 - text.chars().count() as i32) / 2;
        self.put_str_at(x, y as i32, text);
    }

    fn put_str_at(&mut self, col: i32, row: i32, text: &str) {
        if row < 0 {
            return;
        }
        for (i, c) in text.chars().enumerate() {
            let x = col + i as i32;
            if x >= 0 {
                self.set_char(x as u16, row as u16, c);
            }
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", self.grid[y as usize].iter().collect::<String>())?;
        }
        Ok(())
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_string(grid: &GameGrid, y: usize) -> String {
        grid.grid[y].iter().collect()
    }

    #[test]
    fn world_corners_map_to_grid_corners() {
        let grid = GameGrid::new(72, 32);
        assert_eq!(grid.column_of(0.0), 0);
        assert_eq!(grid.row_of(WORLD_HEIGHT), 0);
        assert_eq!(grid.row_of(0.0), 32);
        assert_eq!(grid.column_of(WORLD_WIDTH), 72);
    }

    #[test]
    fn fill_world_rect_clips_to_grid() {
        let mut grid = GameGrid::new(72, 32);
        grid.fill_world_rect(&Rect::new(-100.0, 0.0, 120.0, 16.0), '#');
        // 16 world units tall is one row at 32 rows over 512 units.
        assert_eq!(row_string(&grid, 31), format!("{}{}", "#".repeat(5), " ".repeat(67)));
        assert_eq!(row_string(&grid, 30), " ".repeat(72));
    }

    #[test]
    fn empty_rect_draws_nothing() {
        let mut grid = GameGrid::new(10, 10);
        grid.fill_world_rect(&Rect::new(10.0, 10.0, 50.0, 0.0), '#');
        assert!(grid.grid.iter().all(|row| row.iter().all(|&c| c == ' ')));
    }

    #[test]
    fn centered_text_is_clipped_not_wrapped() {
        let mut grid = GameGrid::new(6, 2);
        grid.put_centered(0, "ABCDEFGH");
        assert_eq!(row_string(&grid, 0), "BCDEFG");
        assert_eq!(row_string(&grid, 1), "      ");
    }

    #[test]
    fn screen_buffer_receives_rendered_grid() {
        let mut grid = GameGrid::new(8, 3);
        grid.put_str(2, 1, "hi");
        let mut target = OutputTarget::ScreenBuffer(ScreenBuffer::new(8, 3));
        grid.render(&mut target).unwrap();
        match target {
            OutputTarget::ScreenBuffer(sb) => {
                assert_eq!(sb.row(1), "  hi    ");
                assert_eq!(sb.row(2), " ".repeat(8));
            }
            OutputTarget::Stdout(_) => unreachable!(),
        }
    }
}
