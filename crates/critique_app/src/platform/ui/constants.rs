use critique_core::PROGRESS_STEPS;

pub const STEP_LABELS: [&str; PROGRESS_STEPS] = [
    "Reading document",
    "Extracting experience",
    "Matching against the role",
    "Writing critique",
];

/// Cells in the terminal score bar; each cell is 5%.
pub const SCORE_BAR_CELLS: usize = 20;
