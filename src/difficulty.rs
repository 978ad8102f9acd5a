/// Obstacle tuning for one score band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyLevel {
    pub pipe_speed: f64,
    pub flyer_speed: f64,
    pub spacing: f64,
}

// (score below, level). The last band covers everything above.
const BANDS: [(u32, DifficultyLevel); 3] = [
    (10, DifficultyLevel { pipe_speed: 120.0, flyer_speed: 120.0, spacing: 200.0 }),
    (20, DifficultyLevel { pipe_speed: 135.0, flyer_speed: 135.0, spacing: 190.0 }),
    (30, DifficultyLevel { pipe_speed: 150.0, flyer_speed: 150.0, spacing: 180.0 }),
];
const TOP_BAND: DifficultyLevel = DifficultyLevel { pipe_speed: 165.0, flyer_speed: 165.0, spacing: 170.0 };

/// Step function from score to obstacle speeds and spacing. No smoothing between bands.
pub fn level_for(score: u32) -> DifficultyLevel {
    BANDS
        .iter()
        .find(|(below, _)| score < *below)
        .map(|&(_, level)| level)
        .unwrap_or(TOP_BAND)
}
