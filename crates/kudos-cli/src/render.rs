//! Plain-text rendering of feedback records.

use chrono::{DateTime, Utc};
use kudos_core::{feedback::Feedback, validate::RATING_MAX};

/// `rating` filled stars followed by empty ones, five in total.
pub fn render_stars(rating: u8) -> String {
  let filled = usize::from(rating.min(RATING_MAX));
  let empty = usize::from(RATING_MAX) - filled;
  format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

/// `dd/mm/yyyy`.
pub fn format_date(date: &DateTime<Utc>) -> String {
  date.format("%d/%m/%Y").to_string()
}

pub fn render_record(record: &Feedback) -> String {
  format!(
    "{}  {}  {}  ({})",
    format_date(&record.creation_date),
    render_stars(record.rating),
    record.feedback,
    record.id
  )
}
