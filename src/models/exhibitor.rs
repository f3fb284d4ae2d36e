//! Exhibitor directory entries.

use serde::{Deserialize, Serialize};

/// An organization whose orders can be tracked, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibitor {
    pub name: String,
    /// Booth identifier, e.g. `"B-156"` or `"3005"`.
    #[serde(default)]
    pub booth: String,
    #[serde(default)]
    pub total_orders: Option<u32>,
    #[serde(default)]
    pub delivered_orders: Option<u32>,
}

/// Section letters and number parsed from a booth identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoothParts {
    pub section: String,
    pub number: u32,
}

impl Exhibitor {
    pub fn new(name: impl Into<String>, booth: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            booth: booth.into(),
            total_orders: None,
            delivered_orders: None,
        }
    }

    /// Attaches the aggregate counters reported by the directory.
    #[must_use]
    pub fn with_counts(mut self, total: u32, delivered: u32) -> Self {
        self.total_orders = Some(total);
        self.delivered_orders = Some(delivered);
        self
    }

    /// Splits the booth into `<section-letters><optional '-'><number>`.
    ///
    /// Returns `None` for purely numeric booths such as `"3005"`.
    pub fn booth_parts(&self) -> Option<BoothParts> {
        let bytes = self.booth.as_bytes();
        let mut start = 0;
        while start < bytes.len() {
            if !bytes[start].is_ascii_uppercase() {
                start += 1;
                continue;
            }
            let letters_end = start
                + bytes[start..]
                    .iter()
                    .take_while(|b| b.is_ascii_uppercase())
                    .count();
            let digits_start = if bytes.get(letters_end) == Some(&b'-') {
                letters_end + 1
            } else {
                letters_end
            };
            let digits_len = bytes[digits_start..]
                .iter()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits_len > 0
                && let Ok(number) =
                    self.booth[digits_start..digits_start + digits_len].parse::<u32>()
            {
                return Some(BoothParts {
                    section: self.booth[start..letters_end].to_string(),
                    number,
                });
            }
            start = letters_end;
        }
        None
    }

    /// Two-letter badge for the exhibitor.
    ///
    /// Uses the first letters of the first two words longer than two
    /// characters, the first two characters of a single such word, or the
    /// first two characters of the name.
    pub fn initials(&self) -> String {
        let words: Vec<&str> = self
            .name
            .split(' ')
            .filter(|w| w.chars().count() > 2)
            .collect();
        let initials: String = match words.as_slice() {
            [first, second, ..] => first.chars().take(1).chain(second.chars().take(1)).collect(),
            [only] => only.chars().take(2).collect(),
            [] => self.name.chars().take(2).collect(),
        };
        initials.to_uppercase()
    }
}
