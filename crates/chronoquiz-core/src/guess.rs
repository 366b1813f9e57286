//! Parsing of typed year guesses.

use crate::error::QuizError;
use crate::model::Era;

/// Largest year magnitude accepted as a guess.
pub const MAX_GUESS_MAGNITUDE: i32 = 100_000;

/// Parse a typed guess into a signed year.
///
/// `toggle` is the era selected in the UI and applies to bare numbers such as
/// `"44"`. A leading minus (`"-44"`) or an era suffix (`"44 BC"`, `"300 ce"`)
/// overrides it. Zero, empty input and anything non-numeric are rejected.
pub fn parse_guess(input: &str, toggle: Era) -> Result<i32, QuizError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QuizError::InvalidInput("please enter a year".into()));
    }

    let (number_part, suffix_era) = split_era_suffix(trimmed);
    let number_part = number_part.trim();

    let (negative, digits) = match number_part.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, number_part.strip_prefix('+').unwrap_or(number_part)),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(QuizError::InvalidInput(format!(
            "'{trimmed}' is not a valid year"
        )));
    }

    let magnitude: i32 = digits
        .parse()
        .ok()
        .filter(|m| *m <= MAX_GUESS_MAGNITUDE)
        .ok_or_else(|| {
            QuizError::InvalidInput(format!(
                "years beyond {MAX_GUESS_MAGNITUDE} are not accepted"
            ))
        })?;

    if magnitude == 0 {
        return Err(QuizError::InvalidInput(
            "there is no year 0; use 1 BC or 1 AD".into(),
        ));
    }

    let era = match (negative, suffix_era) {
        (true, Some(_)) => {
            return Err(QuizError::InvalidInput(
                "use either a minus sign or an era, not both".into(),
            ))
        }
        (true, None) => Era::Bc,
        (false, Some(era)) => era,
        (false, None) => toggle,
    };

    Ok(era.apply(magnitude))
}

/// Split a trailing `BC`/`BCE`/`AD`/`CE` marker off the input, if present.
fn split_era_suffix(input: &str) -> (&str, Option<Era>) {
    let lower = input.to_ascii_lowercase();
    for (marker, era) in [("bce", Era::Bc), ("bc", Era::Bc), ("ad", Era::Ad), ("ce", Era::Ad)] {
        if lower.ends_with(marker) {
            let cut = input.len() - marker.len();
            return (&input[..cut], Some(era));
        }
    }
    (input, None)
}
