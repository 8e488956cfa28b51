/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub wrong: usize,
    /// Completion percentage of the cursor, 0..=100.
    pub percent: u32,
    pub is_complete: bool,
}
