use log::info;

/// Glyph set for every drawable thing. Loaded once by the game and lent to draw calls.
pub struct Assets {
    pub bird_frames: Vec<&'static str>,
    pub flyer_frames: Vec<&'static str>,
    pub pipe_glyph: char,
    pub pipe_cap_glyph: char,
    pub ground_glyph: char,
    pub title_art: Vec<&'static str>,
}

impl Assets {
    pub fn load() -> Self {
        let assets = Assets {
            bird_frames: vec![r"\o>", "-o>", "/o>"],
            flyer_frames: vec!["}W{", "-W-", "{M}"],
            pipe_glyph: '#',
            pipe_cap_glyph: '=',
            ground_glyph: ':',
            title_art: vec![
                r" _____ _                           ",
                r"|  ___| | __ _ _ __  _ __  _   _   ",
                r"| |_  | |/ _` | '_ \| '_ \| | | |  ",
                r"|  _| | | (_| | |_) | |_) | |_| |  ",
                r"|_|   |_|\__,_| .__/| .__/ \__, |  ",
                r"              |_|   |_|    |___/   ",
            ],
        };
        info!(
            "Assets loaded: {} bird frames, {} flyer frames.",
            assets.bird_frames.len(),
            assets.flyer_frames.len()
        );
        assets
    }

    pub fn bird_frame(&self, index: usize) -> &'static str {
        self.bird_frames[index % self.bird_frames.len()]
    }

    pub fn flyer_frame(&self, index: usize) -> &'static str {
        self.flyer_frames[index % self.flyer_frames.len()]
    }
}
