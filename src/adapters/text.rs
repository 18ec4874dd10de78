// Text scanning shared by the adapters (interface listings, MAC lines, key/value dumps)

use regex::Regex;
use std::sync::LazyLock;

static DOTTED_QUAD: LazyLock<Regex> = LazyLock::new(|| {
    let octet = r"(\d|[1-9]\d|1\d\d|2[0-4]\d|25[0-5])";
    Regex::new(&format!(r"^{octet}\.{octet}\.{octet}\.{octet}$")).expect("dotted quad pattern")
});

static MAC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}\b").expect("mac pattern")
});

/// Addresses from an interface listing.
///
/// For every line that is not itself a bare dotted-quad address and contains
/// `delimiter`, keeps the text after the delimiter up to the next whitespace.
/// Empty results are dropped; order follows the input.
pub fn find_ips(text: &str, delimiter: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !DOTTED_QUAD.is_match(line))
        .filter_map(|line| {
            let start = line.find(delimiter)? + delimiter.len();
            let ip = line[start..].split(char::is_whitespace).next()?.trim();
            (!ip.is_empty()).then(|| ip.to_string())
        })
        .collect()
}

/// The value after the first `delimiter` in `text`, up to the end of that line.
pub fn find_mac_address(text: &str, delimiter: &str) -> Option<String> {
    let start = text.find(delimiter)? + delimiter.len();
    let rest = text[start..].trim();
    let value = rest.lines().next()?.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// First six-group hex MAC (`aa:bb:cc:dd:ee:ff` or `AA-BB-CC-DD-EE-FF`), scanning line by line.
pub fn first_mac(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| MAC_PATTERN.find(line))
        .map(|m| m.as_str().to_string())
}

pub fn is_dotted_quad(value: &str) -> bool {
    DOTTED_QUAD.is_match(value)
}

/// Value of the first `key<sep>value` line whose key matches (surrounding whitespace ignored).
pub fn field<'a>(text: &'a str, key: &str, separator: char) -> Option<&'a str> {
    text.lines().find_map(|line| {
        let (k, v) = line.split_once(separator)?;
        (k.trim() == key).then(|| v.trim())
    })
}

/// Concatenate address lists, dropping empties and repeats while keeping first-seen order.
pub fn merge_unique<I>(lists: I) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut merged: Vec<String> = Vec::new();
    for item in lists.into_iter().flatten() {
        let item = item.trim();
        if !item.is_empty() && !merged.iter().any(|m| m == item) {
            merged.push(item.to_string());
        }
    }
    merged
}
