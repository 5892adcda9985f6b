//! Maps a refactoring ratio onto a qualitative signal band.

use super::{RefactoringRatio, SignalBand};

/// Band thresholds, first match wins. 0.1 and 0.5 both belong to
/// `Moderate`; the boundaries are fixed for cross-run comparability.
///
/// A ratio with no samples is always `Unknown`, even if a value is
/// somehow present.
pub fn classify(ratio: &RefactoringRatio) -> SignalBand {
    if ratio.samples < 1 {
        return SignalBand::Unknown;
    }

    match ratio.value {
        None => SignalBand::Unknown,
        Some(v) if v == 0.0 => SignalBand::None,
        Some(v) if v < 0.1 => SignalBand::Low,
        Some(v) if v <= 0.5 => SignalBand::Moderate,
        Some(_) => SignalBand::High,
    }
}
