//! Daily forecast selection.
//!
//! The forecast endpoint returns one sample every three hours. For display we
//! keep one sample per local calendar day: the one closest to noon.

use std::{collections::BTreeMap, ops::Bound};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use tracing::{debug, warn};

use crate::model::ForecastSample;

/// Number of upcoming days shown by default.
pub const FORECAST_DAYS: usize = 3;

const NOON: u32 = 12;

/// Shift a UTC timestamp by a fixed offset. Plain arithmetic, no zone rules.
fn local_time(timestamp: i64, offset_secs: i64) -> Option<NaiveDateTime> {
    let shifted = timestamp.checked_add(offset_secs)?;
    DateTime::from_timestamp(shifted, 0).map(|dt| dt.naive_utc())
}

/// Pick one sample per local day for the `days` days following the first
/// sample's local date.
///
/// The first sample's date counts as "today" and is never returned. Within a
/// day the sample whose local hour is nearest 12:00 wins; on a tie the
/// earlier sample is kept. Results are in ascending date order and may be
/// shorter than `days`.
pub fn pick_daily_forecast(
    samples: &[ForecastSample],
    offset_secs: i64,
    days: usize,
) -> Vec<ForecastSample> {
    let mut today: Option<NaiveDate> = None;
    let mut best: BTreeMap<NaiveDate, (u32, &ForecastSample)> = BTreeMap::new();

    for sample in samples {
        let Some(local) = local_time(sample.timestamp, offset_secs) else {
            warn!(timestamp = sample.timestamp, offset_secs, "skipping out-of-range forecast sample");
            continue;
        };

        let date = local.date();
        let distance = local.hour().abs_diff(NOON);
        today.get_or_insert(date);

        best.entry(date)
            .and_modify(|slot| {
                if distance < slot.0 {
                    *slot = (distance, sample);
                }
            })
            .or_insert((distance, sample));
    }

    let Some(today) = today else {
        return Vec::new();
    };

    let picked: Vec<ForecastSample> = best
        .range((Bound::Excluded(today), Bound::Unbounded))
        .take(days)
        .map(|(_, (_, sample))| (*sample).clone())
        .collect();

    debug!(%today, candidates = best.len(), picked = picked.len(), "reduced forecast");
    picked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use proptest::prelude::*;

    const HOUR: i64 = 3600;
    const DAY: i64 = 24 * HOUR;

    /// 2024-03-10 00:00:00 UTC
    const BASE: i64 = 1_710_028_800;

    fn sample(timestamp: i64) -> ForecastSample {
        ForecastSample {
            timestamp,
            temperature: (timestamp % 40) as f64,
            description: format!("sample {timestamp}"),
        }
    }

    fn at(day: i64, hour: i64) -> ForecastSample {
        sample(BASE + day * DAY + hour * HOUR)
    }

    fn stamps(picked: &[ForecastSample]) -> Vec<i64> {
        picked.iter().map(|s| s.timestamp).collect()
    }

    #[test]
    fn noon_samples_for_four_days_yield_the_three_after_today() {
        let list: Vec<_> = (0..4).map(|d| at(d, 12)).collect();

        let picked = pick_daily_forecast(&list, 0, FORECAST_DAYS);

        assert_eq!(stamps(&picked), stamps(&list[1..]));
    }

    #[test]
    fn two_future_dates_yield_two_results() {
        let list = vec![at(0, 9), at(0, 12), at(1, 12), at(2, 15)];

        let picked = pick_daily_forecast(&list, 0, FORECAST_DAYS);

        assert_eq!(stamps(&picked), vec![at(1, 12).timestamp, at(2, 15).timestamp]);
    }

    #[test]
    fn only_today_yields_nothing() {
        let list: Vec<_> = (0..8).map(|i| at(0, i * 3)).collect();
        assert!(pick_daily_forecast(&list, 0, FORECAST_DAYS).is_empty());
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(pick_daily_forecast(&[], 3600, FORECAST_DAYS).is_empty());
    }

    #[test]
    fn first_sample_day_is_excluded_even_when_it_is_a_single_late_slot() {
        // Forecast starting at 21:00 still treats that date as today.
        let mut list = vec![at(0, 21)];
        list.extend((1..5).flat_map(|d| (0..8).map(move |i| at(d, i * 3))));

        let picked = pick_daily_forecast(&list, 0, FORECAST_DAYS);

        assert_eq!(
            stamps(&picked),
            vec![at(1, 12).timestamp, at(2, 12).timestamp, at(3, 12).timestamp]
        );
    }

    #[test]
    fn nearest_to_noon_wins_within_a_day() {
        let list = vec![at(0, 12), at(1, 0), at(1, 9), at(1, 15), at(1, 21)];

        let picked = pick_daily_forecast(&list, 0, FORECAST_DAYS);

        // 09:00 and 15:00 are both 3h from noon; 09:00 was seen first.
        assert_eq!(stamps(&picked), vec![at(1, 9).timestamp]);
    }

    #[test]
    fn offset_moves_samples_across_dates() {
        // UTC 22:00 on day 1 is 01:00 on day 2 at UTC+3.
        let list = vec![at(0, 12), at(1, 9), at(1, 22), at(2, 9)];

        let picked = pick_daily_forecast(&list, 3 * HOUR, FORECAST_DAYS);

        // day 1 local: 12:00 (from 09 UTC); day 2 local: 01:00 and 12:00.
        assert_eq!(stamps(&picked), vec![at(1, 9).timestamp, at(2, 9).timestamp]);
    }

    #[test]
    fn negative_offset_can_shift_today_backwards() {
        // 02:00 UTC at UTC-5 is 21:00 the previous day.
        let list = vec![at(1, 2), at(1, 17), at(2, 17)];

        let picked = pick_daily_forecast(&list, -5 * HOUR, FORECAST_DAYS);

        assert_eq!(stamps(&picked), vec![at(1, 17).timestamp, at(2, 17).timestamp]);
    }

    #[test]
    fn at_most_requested_days() {
        let list: Vec<_> = (0..6).map(|d| at(d, 12)).collect();

        assert_eq!(pick_daily_forecast(&list, 0, FORECAST_DAYS).len(), 3);
        assert_eq!(pick_daily_forecast(&list, 0, 5).len(), 5);
        assert!(pick_daily_forecast(&list, 0, 0).is_empty());
    }

    #[test]
    fn unordered_input_still_returns_ascending_dates() {
        let list = vec![at(0, 12), at(3, 12), at(1, 12), at(2, 12)];

        let picked = pick_daily_forecast(&list, 0, FORECAST_DAYS);

        assert_eq!(
            stamps(&picked),
            vec![at(1, 12).timestamp, at(2, 12).timestamp, at(3, 12).timestamp]
        );
    }

    #[test]
    fn out_of_range_samples_are_skipped() {
        let list = vec![sample(i64::MAX), at(0, 12), at(1, 12)];

        let picked = pick_daily_forecast(&list, 0, FORECAST_DAYS);

        assert_eq!(stamps(&picked), vec![at(1, 12).timestamp]);
    }

    fn local_date_and_hour(ts: i64, offset: i64) -> (NaiveDate, u32) {
        let local = local_time(ts, offset).unwrap();
        (local.date(), local.hour())
    }

    proptest! {
        #[test]
        fn picks_distinct_future_dates_in_order(
            steps in prop::collection::vec(0i64..6, 1..48),
            offset in -12 * HOUR..=14 * HOUR,
        ) {
            // 3-hour-ish chronological list with arbitrary gaps
            let mut ts = BASE;
            let list: Vec<_> = steps
                .iter()
                .map(|s| {
                    ts += s * 3 * HOUR;
                    sample(ts)
                })
                .collect();

            let picked = pick_daily_forecast(&list, offset, FORECAST_DAYS);
            let (today, _) = local_date_and_hour(list[0].timestamp, offset);

            prop_assert!(picked.len() <= FORECAST_DAYS);

            let dates: Vec<_> = picked
                .iter()
                .map(|s| local_date_and_hour(s.timestamp, offset).0)
                .collect();
            for pair in dates.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for date in &dates {
                prop_assert!(*date > today);
            }
        }

        #[test]
        fn chosen_sample_is_first_nearest_to_noon(
            hours in prop::collection::vec(0i64..24, 1..10),
            offset in -12 * HOUR..=14 * HOUR,
        ) {
            let mut list = vec![at(-1, 12)];
            list.extend(hours.iter().map(|h| at(0, *h)));

            let picked = pick_daily_forecast(&list, offset, 10);

            for chosen in &picked {
                let (date, _) = local_date_and_hour(chosen.timestamp, offset);
                let first_best = list
                    .iter()
                    .filter(|s| local_date_and_hour(s.timestamp, offset).0 == date)
                    .min_by_key(|s| local_date_and_hour(s.timestamp, offset).1.abs_diff(NOON))
                    .unwrap();

                prop_assert_eq!(chosen.timestamp, first_best.timestamp);
            }
        }
    }

    #[test]
    fn local_time_is_plain_offset_arithmetic() {
        let local = local_time(BASE, 5 * HOUR + 30 * 60).unwrap();
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(local.time(), NaiveTime::from_hms_opt(5, 30, 0).unwrap());
    }
}
