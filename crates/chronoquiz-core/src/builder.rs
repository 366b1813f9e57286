//! Random question-set sampling.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::QuizError;
use crate::model::Event;

/// Shuffle `candidates` uniformly and keep the first `length` of them.
///
/// The result is shorter than `length` when fewer candidates are available.
/// Fails with `InsufficientData` only when there are no candidates at all.
pub fn build_questions<R>(
    mut candidates: Vec<Event>,
    length: usize,
    rng: &mut R,
) -> Result<Vec<Event>, QuizError>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return Err(QuizError::InsufficientData);
    }

    candidates.shuffle(rng);
    candidates.truncate(length);

    tracing::debug!("built question set of {} events", candidates.len());
    Ok(candidates)
}
