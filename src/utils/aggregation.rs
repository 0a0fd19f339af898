use crate::types::{DayVisibility, DisplayRecord, TimeRecord, ViewMode, Weekday};

/// Merge half-hour buckets into hour buckets when the hourly view is active.
///
/// Buckets are paired by position, `(0, 1)`, `(2, 3)`, ..., not by parsing
/// their labels, so the input must be gap-free and start on the hour. The
/// merged label is the first bucket's label minus its last three characters
/// (`"09:00"` becomes `"09"`). A trailing unpaired bucket is dropped.
pub fn aggregate(records: &[TimeRecord], mode: ViewMode) -> Vec<TimeRecord> {
    if mode == ViewMode::HalfHourly {
        return records.to_vec();
    }

    records
        .chunks_exact(2)
        .map(|pair| {
            let (first, second) = (&pair[0], &pair[1]);
            let mut merged = TimeRecord::new(strip_minutes(&first.time));
            for day in Weekday::ALL {
                merged.set(
                    day,
                    Some(first.value_or_zero(day) + second.value_or_zero(day)),
                );
            }
            merged
        })
        .collect()
}

/// Project each bucket onto the visible weekdays.
///
/// Hidden days are left out entirely rather than zeroed, as are days the
/// bucket carried no value for.
pub fn filter_visible(records: &[TimeRecord], visibility: &DayVisibility) -> Vec<DisplayRecord> {
    records
        .iter()
        .map(|record| DisplayRecord {
            time: record.time.clone(),
            values: Weekday::ALL
                .into_iter()
                .filter(|day| visibility.is_visible(*day))
                .filter_map(|day| record.get(day).map(|value| (day, value)))
                .collect(),
        })
        .collect()
}

fn strip_minutes(label: &str) -> &str {
    // char-based so a malformed non-ASCII label cannot split a code point
    let cut = label
        .char_indices()
        .rev()
        .nth(2)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &label[..cut]
}
