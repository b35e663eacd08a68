//! Pattern rules for the individual listing fields.
//!
//! Each rule looks for the first number followed by its unit marker anywhere in
//! the page text. They are deliberately naive:
//!
//! - price: `,` and `.` are both stripped before conversion, so `12,500 DKK`
//!   reads as 12500 but `12,500.50 DKK` reads as 1250050. A dotted thousands
//!   group such as `1.500 kr.` is not recognised as one number at all and
//!   falls through to the trailing `500 kr.`.
//! - rooms: any number before "room"/"rm"/"bedroom"/"værelser" counts, so
//!   `2 bedrooms` and `2 roommates` both read as 2.
//! - size: only whole numbers directly before `m²`; `65.5 m²` reads as 5 and
//!   `70 m2` is not recognised.

use regex::Regex;
use std::sync::LazyLock;

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:,\d{3})*(?:\.\d{2})?)\s*(?:DKK|kr\.)").expect("valid price regex")
});

static ROOMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:room|rm|bedroom|værelser)").expect("valid rooms regex")
});

static SIZE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*m²").expect("valid size regex"));

/// Monthly rent in DKK, `None` when absent or out of range
pub fn price(text: &str) -> Option<u64> {
    let raw = PRICE_RE.captures(text)?.get(1)?.as_str();
    let digits = raw.replace([',', '.'], "");
    digits.parse().ok()
}

/// Room count
pub fn rooms(text: &str) -> Option<u32> {
    ROOMS_RE.captures(text)?.get(1)?.as_str().parse().ok()
}

/// Floor area in square meters
pub fn size_m2(text: &str) -> Option<u32> {
    SIZE_RE.captures(text)?.get(1)?.as_str().parse().ok()
}
