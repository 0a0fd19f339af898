//! # Bill Export Preparation
//!
//! Turns a point-of-sale bill export (CSV) into the half-hourly weekday
//! sales JSON the dashboard loads. Each output bucket sums one measure over
//! every bill line whose order time falls in `[bucket, bucket + 30min)`,
//! split by the weekday the bill was opened on.

use chrono::{Datelike, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use log::{info, warn};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::{DashboardError, Result};
use crate::types::{TimeRecord, Weekday};

/// Number of half-hour buckets in a day
pub const BUCKETS_PER_DAY: usize = 48;

const BILL_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One line of the bill export. Column names are the export's own headers.
#[derive(Debug, Deserialize)]
struct BillRow {
    #[serde(rename = "วันที่เปิดบิล")]
    opened_at: String,
    #[serde(rename = "เวลาสั่ง")]
    ordered_at: String,
    #[serde(rename = "ราคารวม", default)]
    total: String,
    #[serde(rename = "จำนวน", default)]
    quantity: String,
}

/// Which column is summed into the buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Measure {
    /// Line totals (`ราคารวม`)
    #[default]
    Revenue,
    /// Item quantities (`จำนวน`)
    Quantity,
}

#[derive(Debug, Clone, Default)]
pub struct PrepOptions {
    pub measure: Measure,
    /// Keep only bills opened within this many days of the latest bill
    pub window_days: Option<i64>,
}

struct Bill {
    opened_at: NaiveDateTime,
    ordered_at: NaiveTime,
    amount: Option<f64>,
}

/// Bucket a CSV bill export into 48 half-hourly records.
///
/// Lines with an unparseable bill date or order time are skipped; the run
/// fails only when no line has a usable bill date. Weekdays that never occur
/// in the (windowed) export are left out of every record.
pub fn process_bills<R: Read>(reader: R, options: &PrepOptions) -> Result<Vec<TimeRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut bills = Vec::new();
    let mut skipped = 0usize;
    for row in csv_reader.deserialize::<BillRow>() {
        match parse_bill(row?, options.measure) {
            Some(bill) => bills.push(bill),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("Skipped {} bill lines with an unreadable date or time", skipped);
    }

    let latest = bills
        .iter()
        .map(|bill| bill.opened_at)
        .max()
        .ok_or(DashboardError::NoValidBills)?;
    if let Some(days) = options.window_days {
        let cutoff =
            window_start(latest, days).ok_or(DashboardError::InvalidWindow { days })?;
        bills.retain(|bill| bill.opened_at > cutoff);
    }

    let days: BTreeSet<Weekday> = bills
        .iter()
        .map(|bill| Weekday::from(bill.opened_at.weekday()))
        .collect();

    let mut sums = vec![[0.0_f64; 7]; BUCKETS_PER_DAY];
    for bill in &bills {
        if let Some(amount) = bill.amount {
            let day = Weekday::from(bill.opened_at.weekday());
            sums[bucket_index(bill.ordered_at)][day.index()] += amount;
        }
    }

    info!(
        "Bucketed {} bill lines across {} weekdays",
        bills.len(),
        days.len()
    );

    Ok(sums
        .iter()
        .enumerate()
        .map(|(i, totals)| {
            let mut record = TimeRecord::new(bucket_label(i));
            for day in &days {
                record.set(*day, Some(round_cents(totals[day.index()])));
            }
            record
        })
        .collect())
}

/// Write records as pretty-printed JSON
pub fn write_records(path: &Path, records: &[TimeRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn parse_bill(row: BillRow, measure: Measure) -> Option<Bill> {
    let opened_at = NaiveDateTime::parse_from_str(&row.opened_at, BILL_DATE_FORMAT).ok()?;
    let ordered_at = NaiveTime::parse_from_str(&row.ordered_at, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&row.ordered_at, "%H:%M"))
        .ok()?;
    let amount = match measure {
        Measure::Revenue => parse_amount(&row.total),
        Measure::Quantity => parse_amount(&row.quantity),
    };
    Some(Bill {
        opened_at,
        ordered_at,
        amount,
    })
}

/// Numbers in the export use `,` as a thousands separator
fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    cleaned
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn bucket_index(time: NaiveTime) -> usize {
    ((time.hour() * 60 + time.minute()) / 30) as usize
}

fn bucket_label(index: usize) -> String {
    format!("{:02}:{:02}", index / 2, (index % 2) * 30)
}

/// Earliest excluded bill time for a window of `days`, or `None` when the
/// window is negative or reaches outside chrono's calendar
fn window_start(latest: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    if days < 0 {
        return None;
    }
    latest.checked_sub_signed(TimeDelta::try_days(days)?)
}

/// Rounds to two decimals, halves to even
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
