//! Console formatting for the current conditions and the daily forecast.

use std::fmt::Write as _;

use chrono::DateTime;

use crate::{
    art::art_for,
    model::{CurrentWeather, ForecastSample},
};

/// Layout used for the forecast table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// Pipe-delimited table with a dashed header rule.
    #[default]
    Github,
    /// Fixed-width columns, no borders.
    Plain,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions<'a> {
    pub symbol: &'a str,
    pub show_art: bool,
    pub table: TableStyle,
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }

    out
}

/// Readings as the API sent them: whole values keep one decimal (`-1.0`),
/// others print in their shortest form (`8.25`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn fraction_len(cell: &str) -> usize {
    cell.find('.').map_or(0, |dot| cell.len() - dot - 1)
}

/// Pad numeric cells on the right so their decimal points line up once the
/// column is right-aligned.
fn align_decimals(cells: &mut [String]) {
    let longest = cells.iter().map(|c| fraction_len(c)).max().unwrap_or(0);
    for cell in cells {
        let pad = longest - fraction_len(cell);
        cell.push_str(&" ".repeat(pad));
    }
}

pub fn render_current(current: &CurrentWeather, opts: &RenderOptions<'_>) -> String {
    let mut out = String::new();

    out.push_str("\n=== Current Weather ===\n");
    let _ = writeln!(out, "Location: {}", current.location_name);
    if opts.show_art
        && let Some(art) = art_for(&current.keyword)
    {
        let _ = writeln!(out, "{art}");
    }
    let _ = writeln!(out, "Condition: {}", title_case(&current.description));
    let _ = writeln!(out, "Temperature: {} {}", format_number(current.temperature), opts.symbol);
    let _ = writeln!(out, "Humidity: {}%", current.humidity_pct);
    // labelled m/s for both unit systems
    let _ = writeln!(out, "Wind Speed: {} m/s", format_number(current.wind_speed));
    out.push('\n');

    out
}

/// `YYYY-MM-DD` of the raw UTC timestamp.
fn utc_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "????-??-??".to_string())
}

struct Row {
    date: String,
    temp: String,
    condition: String,
}

fn rows(samples: &[ForecastSample]) -> Vec<Row> {
    samples
        .iter()
        .map(|s| Row {
            date: utc_date(s.timestamp),
            temp: format_number(s.temperature),
            condition: title_case(&s.description),
        })
        .collect()
}

fn width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|c| c.chars().count())
        .chain(std::iter::once(header.chars().count()))
        .max()
        .unwrap_or(0)
}

fn github_table(headers: [&str; 3], rows: &[Row]) -> String {
    let mut temps: Vec<String> = rows.iter().map(|r| r.temp.clone()).collect();
    align_decimals(&mut temps);

    let w_date = width(headers[0], rows.iter().map(|r| r.date.as_str()));
    let w_temp = width(headers[1], temps.iter().map(String::as_str));
    let w_cond = width(headers[2], rows.iter().map(|r| r.condition.as_str()));

    let mut out = String::new();
    let _ = writeln!(
        out,
        "| {:<w_date$} | {:>w_temp$} | {:<w_cond$} |",
        headers[0], headers[1], headers[2]
    );
    let _ = writeln!(
        out,
        "|{}|{}|{}|",
        "-".repeat(w_date + 2),
        "-".repeat(w_temp + 2),
        "-".repeat(w_cond + 2)
    );
    for (row, temp) in rows.iter().zip(&temps) {
        let _ = writeln!(
            out,
            "| {:<w_date$} | {:>w_temp$} | {:<w_cond$} |",
            row.date, temp, row.condition
        );
    }
    out
}

fn plain_table(headers: [&str; 3], rows: &[Row]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:12} {:10} {}", headers[0], headers[1], headers[2]);
    for row in rows {
        let _ = writeln!(out, "{:12} {:>10} {}", row.date, row.temp, row.condition);
    }
    out
}

pub fn render_forecast(samples: &[ForecastSample], opts: &RenderOptions<'_>) -> String {
    let temp_header = format!("Temp {}", opts.symbol);
    let headers = ["Date", temp_header.as_str(), "Condition"];
    let rows = rows(samples);

    let mut out = String::from("=== 3-Day Forecast ===\n");
    out.push_str(&match opts.table {
        TableStyle::Github => github_table(headers, &rows),
        TableStyle::Plain => plain_table(headers, &rows),
    });
    out.push('\n');
    out
}
