//! Decision engine: picks one choice from a candidate set.
//!
//! The engine is a pure function of its input and the injected index source:
//! one uniform draw from `[0, len)`, no weighting, no memory of earlier picks,
//! no shuffle of the whole sequence. It does not enforce the two-choice
//! minimum (that policy lives in the session workflow) and it never sleeps;
//! any reveal delay is sequenced by the caller.

use crate::domain::{ChaispasError, Choice};
use crate::ports::IndexSource;

/// Select one element of `choices` uniformly at random.
///
/// - a single element is returned as-is
/// - an empty slice fails with [`ChaispasError::InvalidInput`]
pub fn decide<'a, R>(choices: &'a [Choice], source: &mut R) -> Result<&'a Choice, ChaispasError>
where
    R: IndexSource + ?Sized,
{
    if choices.is_empty() {
        return Err(ChaispasError::InvalidInput(
            "cannot decide between zero choices".to_string(),
        ));
    }

    let index = source.next_index(choices.len());
    let winner = choices.get(index).ok_or_else(|| {
        ChaispasError::InvalidInput(format!(
            "index source returned {index} for {} choices",
            choices.len()
        ))
    })?;

    tracing::debug!(index, of = choices.len(), winner = %winner.id, "drew winner");
    Ok(winner)
}
