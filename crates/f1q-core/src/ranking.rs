//! Ordering lap results into the qualification ranking.

use crate::model::{LapResult, RankedEntry, UnreliableEntry};

/// Status shown in place of a position for unreliable laps.
pub const UNRELIABLE_STATUS: &str = "Unknown";

/// Time label shown for unreliable laps.
pub const UNRELIABLE_LABEL: &str = "Unreliable";

/// The ranked and unreliable partitions of a set of laps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    pub ranked: Vec<RankedEntry>,
    pub unreliable: Vec<UnreliableEntry>,
}

/// Ranks laps by ascending elapsed time.
///
/// Ties keep their input order. With `filtering_enabled`, negative laps are
/// moved to [`Ranking::unreliable`] and do not take a position; otherwise they
/// are ranked like any other lap.
pub fn rank(laps: &[LapResult], filtering_enabled: bool) -> Ranking {
    let mut sorted: Vec<&LapResult> = laps.iter().collect();
    sorted.sort_by(|a, b| a.elapsed.total_cmp(&b.elapsed));

    let mut ranking = Ranking::default();
    let mut position = 1;
    for lap in sorted {
        if filtering_enabled && lap.is_negative() {
            ranking.unreliable.push(UnreliableEntry {
                status: UNRELIABLE_STATUS.to_string(),
                driver: lap.driver.clone(),
                car: lap.car.clone(),
                time: UNRELIABLE_LABEL.to_string(),
            });
            continue;
        }
        ranking.ranked.push(RankedEntry {
            position,
            driver: lap.driver.clone(),
            car: lap.car.clone(),
            time: format_lap_time(lap.elapsed),
        });
        position += 1;
    }

    tracing::debug!(
        ranked = ranking.ranked.len(),
        unreliable = ranking.unreliable.len(),
        filtering_enabled,
        "ranked laps"
    );
    ranking
}

/// Formats seconds as `minutes:seconds.millis`.
///
/// Neither part is zero-padded: `64.415` renders as `1:4.415`. Negative values
/// are floored, so `-5.0` renders as `-1:55.000`.
#[allow(clippy::cast_possible_truncation)]
pub fn format_lap_time(elapsed: f64) -> String {
    let minutes = (elapsed / 60.0).floor();
    let seconds = minutes.mul_add(-60.0, elapsed);
    format!("{}:{seconds:.3}", minutes as i64)
}
