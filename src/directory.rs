//! The exhibitor directory.
//!
//! Loaded once per session. A failed or unusable remote response is
//! replaced by a fixed list of six accounts, so a loaded directory is
//! never empty.

use tracing::{info, warn};

use crate::Result;
use crate::TrackerError;
use crate::client::OrderSource;
use crate::models::Exhibitor;

/// Accounts used when the remote directory cannot be loaded:
/// name, booth, total orders, delivered orders.
const FALLBACK_ACCOUNTS: [(&str, &str, u32, u32); 6] = [
    ("nevetal", "3005", 3, 1),
    ("Saint Lucia Tourism Authority", "B-156", 2, 2),
    ("Costa Rica", "C-089", 1, 0),
    ("Discover Dominica Authority", "D-312", 4, 3),
    ("Great Italy Tour & Events", "E-445", 2, 1),
    ("Quench USA", "F-201", 3, 2),
];

/// Returns the fixed fallback accounts in table order.
pub fn fallback_exhibitors() -> Vec<Exhibitor> {
    FALLBACK_ACCOUNTS
        .iter()
        .map(|&(name, booth, total, delivered)| {
            Exhibitor::new(name, booth).with_counts(total, delivered)
        })
        .collect()
}

/// The known accounts for this session.
#[derive(Debug, Clone)]
pub struct Directory {
    accounts: Vec<Exhibitor>,
    fallback: bool,
}

impl Directory {
    /// Loads the directory from `source`.
    ///
    /// Never fails: any error is logged and the fallback accounts are used.
    pub async fn load<S: OrderSource>(source: &S, force_refresh: bool) -> Self {
        match source.exhibitors(force_refresh).await.and_then(validate) {
            Ok(accounts) => {
                info!(count = accounts.len(), "Loaded exhibitor directory");
                Self {
                    accounts,
                    fallback: false,
                }
            }
            Err(e) => {
                warn!(error = %e, "Exhibitor directory unavailable, using fallback list");
                Self::fallback()
            }
        }
    }

    /// A directory holding only the fallback accounts.
    pub fn fallback() -> Self {
        Self {
            accounts: fallback_exhibitors(),
            fallback: true,
        }
    }

    /// Builds a directory from an already-fetched list, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::MalformedPayload`] if the list is empty or
    /// any entry has a blank name.
    pub fn from_accounts(accounts: Vec<Exhibitor>) -> Result<Self> {
        Ok(Self {
            accounts: validate(accounts)?,
            fallback: false,
        })
    }

    /// Case-insensitive substring match on name or booth, in list order.
    ///
    /// An empty term matches every account. Whitespace is matched
    /// literally.
    pub fn search(&self, term: &str) -> Vec<&Exhibitor> {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return self.accounts.iter().collect();
        }
        self.accounts
            .iter()
            .filter(|e| {
                e.name.to_lowercase().contains(&needle) || e.booth.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Exact lookup by name.
    pub fn find(&self, name: &str) -> Option<&Exhibitor> {
        self.accounts.iter().find(|e| e.name == name)
    }

    pub fn accounts(&self) -> &[Exhibitor] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Whether the fallback list is in use.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }
}

fn validate(mut accounts: Vec<Exhibitor>) -> Result<Vec<Exhibitor>> {
    if accounts.is_empty() {
        return Err(TrackerError::MalformedPayload(
            "exhibitor list is empty".to_string(),
        ));
    }
    if let Some(index) = accounts.iter().position(|e| e.name.trim().is_empty()) {
        return Err(TrackerError::MalformedPayload(format!(
            "exhibitor at index {index} has no name"
        )));
    }
    accounts.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(accounts: impl IntoIterator<Item = &'a Exhibitor>) -> Vec<&'a str> {
        accounts.into_iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn fallback_has_six_accounts_with_counts() {
        let directory = Directory::fallback();
        assert_eq!(directory.len(), 6);
        assert!(directory.is_fallback());
        let nevetal = directory.find("nevetal").unwrap();
        assert_eq!(nevetal.booth, "3005");
        assert_eq!(nevetal.total_orders, Some(3));
        assert_eq!(nevetal.delivered_orders, Some(1));
        let quench = directory.find("Quench USA").unwrap();
        assert_eq!((quench.total_orders, quench.delivered_orders), (Some(3), Some(2)));
    }

    #[test]
    fn sorts_by_name_ordinally() {
        let directory = Directory::from_accounts(vec![
            Exhibitor::new("beta", "B-2"),
            Exhibitor::new("Zulu", "Z-1"),
            Exhibitor::new("Alpha", "A-1"),
        ])
        .unwrap();
        // Uppercase sorts before lowercase.
        assert_eq!(names(directory.accounts()), ["Alpha", "Zulu", "beta"]);
    }

    #[test]
    fn rejects_empty_and_blank_names() {
        assert!(Directory::from_accounts(Vec::new()).is_err());
        let err = Directory::from_accounts(vec![
            Exhibitor::new("Costa Rica", "C-089"),
            Exhibitor::new("  ", "X-1"),
        ])
        .unwrap_err();
        assert!(matches!(err, TrackerError::MalformedPayload(_)));
    }

    #[test]
    fn search_is_case_insensitive_on_name() {
        let directory = Directory::fallback();
        assert_eq!(names(directory.search("costa")), ["Costa Rica"]);
        assert_eq!(names(directory.search("AUTHORITY")).len(), 2);
    }

    #[test]
    fn search_matches_booth() {
        let directory = Directory::fallback();
        assert_eq!(names(directory.search("d-312")), ["Discover Dominica Authority"]);
        assert_eq!(names(directory.search("3005")), ["nevetal"]);
    }

    #[test]
    fn empty_search_returns_everything_in_order() {
        let directory = Directory::fallback();
        assert_eq!(names(directory.search("")), names(directory.accounts()));
    }

    #[test]
    fn whitespace_in_term_is_matched_literally() {
        let directory = Directory::fallback();
        assert!(directory.search("Rica ").is_empty());
        let spaced = names(directory.search(" "));
        assert_eq!(spaced.len(), 5);
        assert!(!spaced.contains(&"nevetal"));
    }

    #[test]
    fn search_preserves_list_order() {
        let directory = Directory::fallback();
        assert_eq!(
            names(directory.search("a")),
            names(directory.accounts().iter().filter(|e| {
                e.name.to_lowercase().contains('a') || e.booth.to_lowercase().contains('a')
            }))
        );
    }

    #[test]
    fn no_match_is_empty() {
        assert!(Directory::fallback().search("zzz").is_empty());
    }
}
