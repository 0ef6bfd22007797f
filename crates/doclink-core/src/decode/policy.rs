/// Decision returned by the trim policy after a failed decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimDecision {
    /// Give up and fall back to the original input.
    Stop,
    /// Drop the last character and decode again.
    TrimOne,
}

/// Bounded retry-by-truncation for references corrupted by an off-by-one
/// upstream encoder.
///
/// Replaces the open-ended "drop a char and recurse" heuristic with a fixed
/// number of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrimPolicy {
    /// Maximum number of trailing characters removed before giving up.
    pub max_trims: u32,
}

impl Default for TrimPolicy {
    fn default() -> Self {
        Self { max_trims: 4 }
    }
}

impl TrimPolicy {
    pub fn new(max_trims: u32) -> Self {
        Self { max_trims }
    }

    /// `trims` is how many characters were already removed; `remaining` is
    /// the length of the candidate that just failed to decode.
    pub fn decide(&self, trims: u32, remaining: usize) -> TrimDecision {
        if trims >= self.max_trims || remaining <= 1 {
            return TrimDecision::Stop;
        }
        TrimDecision::TrimOne
    }
}
