//! Joining start and stop samples into lap results.

use chrono::NaiveDateTime;

use crate::error::ReportError;
use crate::model::{LapResult, UnmatchedEvent};
use crate::parse::{Roster, TimingLog};

/// Computes one lap per driver present in both logs, in start-log order.
///
/// Drivers missing from either log are skipped; see [`unmatched`] to list
/// them. Every code in either log must exist in the roster.
pub fn compute(
    start: &TimingLog,
    stop: &TimingLog,
    roster: &Roster,
) -> Result<Vec<LapResult>, ReportError> {
    check_references(start, roster)?;
    check_references(stop, roster)?;

    let mut laps = Vec::with_capacity(start.len().min(stop.len()));
    for event in start.events() {
        let Some(stop_at) = stop.get(&event.code) else {
            continue;
        };
        let participant = roster
            .get(&event.code)
            .ok_or_else(|| ReportError::MissingReference {
                code: event.code.clone(),
                artifact: start.kind().artifact(),
            })?;
        laps.push(LapResult {
            code: event.code.clone(),
            driver: participant.name.clone(),
            car: participant.car.clone(),
            start: event.timestamp,
            stop: stop_at,
            elapsed: elapsed_seconds(event.timestamp, stop_at),
        });
    }

    tracing::debug!(laps = laps.len(), "computed lap times");
    Ok(laps)
}

/// Lists samples that have no counterpart in the other log.
///
/// Start-only codes come first, in start-log order, followed by stop-only
/// codes in stop-log order.
pub fn unmatched(start: &TimingLog, stop: &TimingLog) -> Vec<UnmatchedEvent> {
    let lone = |log: &TimingLog, other: &TimingLog| {
        log.events()
            .iter()
            .filter(|event| !other.contains(&event.code))
            .map(|event| UnmatchedEvent {
                code: event.code.clone(),
                kind: event.kind,
            })
            .collect::<Vec<_>>()
    };

    let mut events = lone(start, stop);
    events.extend(lone(stop, start));
    for event in &events {
        tracing::warn!(code = %event.code, kind = %event.kind, "timing sample has no counterpart");
    }
    events
}

/// `stop - start` in seconds, with microsecond precision.
#[allow(clippy::cast_precision_loss)]
pub fn elapsed_seconds(start: NaiveDateTime, stop: NaiveDateTime) -> f64 {
    let delta = stop.signed_duration_since(start);
    delta.num_microseconds().map_or_else(
        || delta.num_milliseconds() as f64 / 1_000.0,
        |micros| micros as f64 / 1_000_000.0,
    )
}

fn check_references(log: &TimingLog, roster: &Roster) -> Result<(), ReportError> {
    match log.events().iter().find(|event| roster.get(&event.code).is_none()) {
        Some(event) => Err(ReportError::MissingReference {
            code: event.code.clone(),
            artifact: log.kind().artifact(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::EventKind;
    use crate::parse::{events_from_str, roster_from_str};
    use crate::paths::Artifact;

    const ROSTER: &str = "\
SVF_Sebastian Vettel_FERRARI
LHM_Lewis Hamilton_MERCEDES
DRR_Daniel Ricciardo_RED BULL RACING TAG HEUER
";

    fn logs(start: &str, stop: &str) -> (TimingLog, TimingLog) {
        (
            events_from_str(start, EventKind::Start).unwrap(),
            events_from_str(stop, EventKind::Stop).unwrap(),
        )
    }

    #[test]
    fn compute_joins_start_and_stop_per_driver() {
        let roster = roster_from_str(ROSTER).unwrap();
        let (start, stop) = logs(
            "SVF2018-05-24_12:02:58.917\nLHM2018-05-24_12:18:20.125\n",
            "LHM2018-05-24_12:19:32.585\nSVF2018-05-24_12:04:03.332\n",
        );

        let laps = compute(&start, &stop, &roster).unwrap();

        assert_eq!(laps.len(), 2);
        assert_eq!(laps[0].code, "SVF");
        assert_eq!(laps[0].driver, "Sebastian Vettel");
        assert_eq!(laps[0].car, "FERRARI");
        assert!((laps[0].elapsed - 64.415).abs() < 1e-9);
        assert_eq!(laps[1].code, "LHM");
        assert!((laps[1].elapsed - 72.46).abs() < 1e-9);
    }

    #[test]
    fn compute_skips_drivers_missing_from_either_log() {
        let roster = roster_from_str(ROSTER).unwrap();
        let (start, stop) = logs(
            "SVF2018-05-24_12:02:58.917\nLHM2018-05-24_12:18:20.125\n",
            "SVF2018-05-24_12:04:03.332\nDRR2018-05-24_12:11:24.067\n",
        );

        let laps = compute(&start, &stop, &roster).unwrap();

        let codes: Vec<_> = laps.iter().map(|lap| lap.code.as_str()).collect();
        assert_eq!(codes, ["SVF"]);
    }

    #[test]
    fn compute_keeps_negative_laps() {
        let roster = roster_from_str(ROSTER).unwrap();
        let (start, stop) = logs(
            "DRR2018-05-24_12:14:12.054\n",
            "DRR2018-05-24_12:11:24.067\n",
        );

        let laps = compute(&start, &stop, &roster).unwrap();

        assert!(laps[0].is_negative());
        assert!((laps[0].elapsed + 167.987).abs() < 1e-9);
    }

    #[test]
    fn compute_fails_on_code_missing_from_roster() {
        let roster = roster_from_str(ROSTER).unwrap();
        let (start, stop) = logs(
            "SVF2018-05-24_12:02:58.917\n",
            "SVF2018-05-24_12:04:03.332\nXYZ2018-05-24_12:04:03.332\n",
        );

        let err = compute(&start, &stop, &roster).unwrap_err();

        assert!(matches!(
            err,
            ReportError::MissingReference { ref code, artifact: Artifact::EndLog } if code == "XYZ"
        ));
    }

    #[test]
    fn unmatched_lists_lone_samples_from_both_logs() {
        let (start, stop) = logs(
            "SVF2018-05-24_12:02:58.917\nLHM2018-05-24_12:18:20.125\n",
            "SVF2018-05-24_12:04:03.332\nDRR2018-05-24_12:11:24.067\n",
        );

        let lone = unmatched(&start, &stop);

        assert_eq!(
            lone,
            vec![
                UnmatchedEvent {
                    code: "LHM".to_string(),
                    kind: EventKind::Start,
                },
                UnmatchedEvent {
                    code: "DRR".to_string(),
                    kind: EventKind::Stop,
                },
            ]
        );
    }

    #[test]
    fn elapsed_seconds_spans_midnight() {
        let (start, stop) = logs(
            "SVF2018-05-24_23:59:30.500\n",
            "SVF2018-05-25_00:00:45.250\n",
        );
        let elapsed = elapsed_seconds(start.get("SVF").unwrap(), stop.get("SVF").unwrap());
        assert!((elapsed - 74.75).abs() < 1e-9);
    }
}
