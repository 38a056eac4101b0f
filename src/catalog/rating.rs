use crate::models::Rating;

pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 5.0;

/// Average of the valid scores in `ratings`, rounded to the nearest half
/// point. Scores outside `1..=5` are discarded. Returns 0 when nothing valid
/// remains.
pub fn average_rating(ratings: &[Rating]) -> f64 {
    average_score(ratings.iter().map(|r| r.score))
}

/// [`average_rating`] over raw scores.
pub fn average_score<I: IntoIterator<Item = f64>>(scores: I) -> f64 {
    let (sum, count) = scores
        .into_iter()
        .filter(|s| (MIN_SCORE..=MAX_SCORE).contains(s))
        .fold((0.0, 0u32), |(sum, n), s| (sum + s, n + 1));
    if count == 0 {
        return 0.0;
    }
    let mean = sum / f64::from(count);
    (mean * 2.0).round() / 2.0
}

/// Five-slot star rendering: full stars, an optional half, then empty ones.
pub fn star_rating(rating: f64) -> String {
    let rating = rating.clamp(0.0, MAX_SCORE);
    let full = rating.floor() as usize;
    let half = rating.fract() >= 0.5;
    let empty = 5 - full - usize::from(half);
    let mut out = "★".repeat(full);
    if half {
        out.push('½');
    }
    out.push_str(&"☆".repeat(empty));
    out
}
