//! Terminal rendering of lookup results.
//!
//! Plain text on stdout. When stdout is a terminal (and `NO_COLOR` is not
//! set) the gender label is tinted with its display color.

use std::fmt::Write;

use crate::config::DisplayConfig;
use crate::models::{GenderInfo, NameRecord, Rgb};

/// Number of nationality entries shown per row in the recents list.
const RECENT_COUNTRIES: usize = 3;

/// Whether to emit ANSI colors on stdout.
pub fn use_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

fn paint(text: &str, color: Option<Rgb>, enabled: bool) -> String {
    match color {
        Some(Rgb(r, g, b)) if enabled => format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, text),
        _ => text.to_string(),
    }
}

fn gender_line(gender: Option<&GenderInfo>, color: bool) -> String {
    match gender {
        Some(g) => format!(
            "{} ({}%)",
            paint(&g.capitalized_label(), g.display_color(), color),
            g.probability.round() as i64
        ),
        None => "unknown".to_string(),
    }
}

/// Full view of one record.
pub fn render_record(record: &NameRecord, display: &DisplayConfig, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", record.name);
    let _ = writeln!(out, "  Age:     {}", record.age);
    let _ = writeln!(
        out,
        "  Gender:  {}",
        gender_line(record.gender.as_ref(), color)
    );

    if record.nationality.is_empty() {
        let _ = writeln!(out, "  Nationality: unknown");
    } else {
        let _ = writeln!(out, "  Nationality:");
        for country in &record.nationality {
            let _ = writeln!(
                out,
                "    {:>3}%  {:<28} {}",
                country.percent(),
                country.display_name(),
                country.flag_url(&display.flag_base_url)
            );
        }
    }
    out
}

/// Compact listing of recents, newest first.
pub fn render_recents(records: &[NameRecord], color: bool) -> String {
    if records.is_empty() {
        return "No recent lookups.\n".to_string();
    }

    let mut out = String::new();
    for record in records.iter().rev() {
        let countries: Vec<String> = record
            .nationality
            .iter()
            .take(RECENT_COUNTRIES)
            .map(|c| format!("{} {}%", c.country_code, c.percent()))
            .collect();
        let _ = writeln!(
            out,
            "{:<20} age {:>3}  {:<20} {}",
            record.name,
            record.age,
            gender_line(record.gender.as_ref(), color),
            countries.join(", ")
        );
    }
    out
}
