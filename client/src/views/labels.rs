//! Display-label lookups shared by every renderer.

#[cfg(test)]
#[path = "labels_test.rs"]
mod labels_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

use crate::net::types::OrderStatus;

pub const OTHER_CATEGORY: &str = "Other";

/// Known product categories and their display names.
const CATEGORIES: [(&str, &str); 4] = [
    ("poster", "Poster Print"),
    ("sticker", "Custom Sticker"),
    ("canvas", "Canvas Decor"),
    ("tshirt", "T-Shirt Graphic"),
];

fn known_category(category: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|(key, _)| *key == category)
        .map(|(_, label)| *label)
}

/// Category display name; anything unrecognized is "Other".
#[must_use]
pub fn category_name(category: &str) -> &'static str {
    known_category(category).unwrap_or(OTHER_CATEGORY)
}

#[must_use]
pub fn order_status_label(status: &OrderStatus) -> &str {
    match status {
        OrderStatus::Pending => "Awaiting Payment",
        OrderStatus::Paid => "Paid",
        OrderStatus::Shipped => "Shipped",
        OrderStatus::Completed => "Completed",
        OrderStatus::Cancelled => "Cancelled",
        OrderStatus::Other(raw) => raw,
    }
}

#[must_use]
pub fn format_price(amount: f64) -> String {
    format!("¥{amount:.2}")
}

/// Cart badge text: hidden at zero, capped at `99+`.
#[must_use]
pub fn cart_badge(total_items: u32) -> Option<String> {
    match total_items {
        0 => None,
        1..=99 => Some(total_items.to_string()),
        _ => Some("99+".to_owned()),
    }
}

/// Prompt actually sent to the generator.
///
/// The category clause uses the display name, or the raw value when the
/// category is not one of the known four.
#[must_use]
pub fn full_prompt(prompt: &str, category: &str, style: &str) -> String {
    let mut full = prompt.to_owned();
    if !category.is_empty() {
        full.push_str(", for ");
        full.push_str(known_category(category).unwrap_or(category));
    }
    if !style.is_empty() {
        full.push_str(", ");
        full.push_str(style);
        full.push_str(" style");
    }
    full
}

/// `Jan 5, 2024`, or "" when the input does not parse.
#[must_use]
pub fn format_date(raw: &str) -> String {
    let Some(parsed) = parse_timestamp(raw) else {
        return String::new();
    };
    parsed
        .format(format_description!("[month repr:short] [day padding:none], [year]"))
        .unwrap_or_default()
}

/// `Jan 5, 2024 14:03`, or "" when the input does not parse.
#[must_use]
pub fn format_date_time(raw: &str) -> String {
    let Some(parsed) = parse_timestamp(raw) else {
        return String::new();
    };
    parsed
        .format(format_description!(
            "[month repr:short] [day padding:none], [year] [hour]:[minute]"
        ))
        .unwrap_or_default()
}

// Wall-clock time as written; offsets are not converted.
fn parse_timestamp(raw: &str) -> Option<PrimitiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(stamp) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(PrimitiveDateTime::new(stamp.date(), stamp.time()));
    }
    if let Ok(stamp) = PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day] [hour]:[minute]:[second]")) {
        return Some(stamp);
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(Date::midnight)
}
