//! Time-weighted rewrite intensity across a file's revision history.

use super::similarity::similarity;
use super::{RefactoringRatio, Revision};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Folds a newest-first revision sequence into one [`RefactoringRatio`].
///
/// Each adjacent pair forms a transition scored as
/// `(1 - similarity) * elapsed_hours`; the ratio is the arithmetic mean of
/// all transition scores. Large rewrites landing in a short window score
/// higher than the same rewrite spread over weeks.
///
/// Fewer than two revisions, or no transition with content on both sides,
/// yields [`RefactoringRatio::insufficient`]. A transition touching a
/// revision whose content is unavailable is skipped; its neighbors are
/// still considered.
pub fn compute_ratio(revisions: &[Revision]) -> RefactoringRatio {
    if revisions.len() < 2 {
        return RefactoringRatio::insufficient();
    }

    let mut total = 0.0;
    let mut samples = 0usize;

    for pair in revisions.windows(2) {
        let newer = &pair[0];
        let older = &pair[1];

        let (Some(new_content), Some(old_content)) = (&newer.content, &older.content) else {
            log::debug!(
                "skipping transition {}..{}: content unavailable",
                older.id,
                newer.id
            );
            continue;
        };

        total += transition_intensity(old_content, new_content, older, newer);
        samples += 1;
    }

    if samples == 0 {
        return RefactoringRatio::insufficient();
    }

    RefactoringRatio::measured(samples, total / samples as f64)
}

/// `(1 - similarity) * elapsed_hours` for one transition. The elapsed time
/// is taken as an absolute value so ordering inversions in the revision
/// feed cannot flip the sign.
fn transition_intensity(
    old_content: &str,
    new_content: &str,
    older: &Revision,
    newer: &Revision,
) -> f64 {
    let elapsed = newer.timestamp - older.timestamp;
    let hours = elapsed.num_seconds().unsigned_abs() as f64 / SECONDS_PER_HOUR;
    let sim = similarity(old_content, new_content);
    (1.0 - sim) * hours
}
