// Unit conversion: raw byte/Hz counts to human-readable strings and back

/// Byte units, base 1024.
pub const BYTE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

/// Frequency units, base 1000.
pub const HZ_UNITS: &[&str] = &["Hz", "kHz", "MHz", "GHz", "THz"];

pub const BYTE_BASE: u64 = 1024;
pub const HZ_BASE: u64 = 1000;
pub const DEFAULT_PRECISION: usize = 2;

/// Render a byte count with the largest unit that keeps the value >= 1.
///
/// ```
/// use sysreport::units::byte2size;
///
/// assert_eq!(byte2size(0, 1024, 2), "0 B");
/// assert_eq!(byte2size(1536, 1024, 2), "1.50 KB");
/// ```
pub fn byte2size(bytes: u64, base: u64, precision: usize) -> String {
    to_size(bytes, BYTE_UNITS, base, precision)
}

/// Render a frequency in Hz, e.g. `2_000_000_000` -> `"2.00 GHz"`.
pub fn hz2size(hz: u64, base: u64, precision: usize) -> String {
    to_size(hz, HZ_UNITS, base, precision)
}

/// [`byte2size`] with base 1024 and two decimals.
pub fn bytes(value: u64) -> String {
    byte2size(value, BYTE_BASE, DEFAULT_PRECISION)
}

/// [`hz2size`] with base 1000 and two decimals.
pub fn hertz(value: u64) -> String {
    hz2size(value, HZ_BASE, DEFAULT_PRECISION)
}

/// Whole-number percentage, e.g. `42.6` -> `"43%"`.
pub fn percent(value: f64) -> String {
    format!("{:.0}%", value.round())
}

/// Index of the unit to use: floor(log_base(value)), clamped to the table.
/// Integer arithmetic so exact powers never land one unit short.
fn unit_index(value: u64, base: u64, units: usize) -> usize {
    let mut index = 0;
    let mut scale = 1u64;
    while index + 1 < units {
        match scale.checked_mul(base) {
            Some(next) if next <= value => {
                scale = next;
                index += 1;
            }
            _ => break,
        }
    }
    index
}

fn to_size(value: u64, units: &[&str], base: u64, precision: usize) -> String {
    // log(0) is undefined; plain counts below one unit step have no fraction to show
    if value < base.max(2) || units.len() < 2 {
        return format!("{} {}", value, units[0]);
    }
    let index = unit_index(value, base, units.len());
    let scaled = value as f64 / (base as f64).powi(index as i32);
    format!("{:.*} {}", precision, scaled, units[index])
}

/// Parse `"<number> <unit>"` (space optional, unit case-insensitive) back into a raw count.
///
/// Accepts the output of [`byte2size`]/[`hz2size`] as well as tool output such
/// as `"8192 MB"` or `"2.60GHz"`.
pub fn parse_size(text: &str, units: &[&str], base: u64) -> Option<u64> {
    let text = text.trim();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let number: f64 = number.replace(',', "").parse().ok()?;
    let unit = unit.trim();
    let index = if unit.is_empty() {
        0
    } else {
        units.iter().position(|u| u.eq_ignore_ascii_case(unit))?
    };
    let raw = number * (base as f64).powi(index as i32);
    if !raw.is_finite() || raw < 0.0 {
        return None;
    }
    Some(raw.round() as u64)
}

/// Byte count from PHP-ini style shorthand (`"128M"`, `"1G"`, `"512k"`, `"4096"`).
///
/// `"-1"`, `"0"` and the empty string mean "no limit" and yield `0`.
/// Returns `None` when the value is not shorthand at all.
pub fn shorthand_bytes(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() || value == "-1" {
        return Some(0);
    }
    let (digits, multiplier) = match value.chars().last()?.to_ascii_lowercase() {
        'g' => (&value[..value.len() - 1], 1024 * 1024 * 1024),
        'm' => (&value[..value.len() - 1], 1024 * 1024),
        'k' => (&value[..value.len() - 1], 1024),
        _ => (value, 1),
    };
    let digits: u64 = digits.trim().parse().ok()?;
    digits.checked_mul(multiplier)
}
