//! Ordered data-source fallback
//!
//! Secondary content (the feed sidebar) can come from more than one
//! endpoint. Sources are tried in order; the first success wins and an
//! exhausted chain is reported as [`Fetched::NoData`] instead of an error.

use crate::error::{Result, WatizatError};

/// A source of items that may fail
pub trait DataSource<T> {
    /// Name used in logs
    fn name(&self) -> &str;

    fn fetch(&self) -> Result<Vec<T>>;
}

/// Outcome of a fallback chain
#[derive(Debug)]
pub enum Fetched<T> {
    Found { source: String, items: Vec<T> },
    NoData { failures: Vec<(String, WatizatError)> },
}

impl<T> Fetched<T> {
    /// Items of the first successful source, empty when none succeeded
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Found { items, .. } => items,
            Self::NoData { .. } => Vec::new(),
        }
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Found { source, .. } => Some(source),
            Self::NoData { .. } => None,
        }
    }

    /// Converts `NoData` into an error listing every failure
    pub fn into_result(self) -> Result<Vec<T>> {
        match self {
            Self::Found { items, .. } => Ok(items),
            Self::NoData { failures } => {
                let summary = failures
                    .iter()
                    .map(|(name, err)| format!("{}: {}", name, err))
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(WatizatError::NoData(summary))
            }
        }
    }
}

/// Try each source in order until one succeeds
pub fn first_available<T>(sources: &[&dyn DataSource<T>]) -> Fetched<T> {
    let mut failures = Vec::new();

    for source in sources {
        match source.fetch() {
            Ok(items) => {
                tracing::debug!(source = source.name(), count = items.len(), "data source answered");
                return Fetched::Found {
                    source: source.name().to_string(),
                    items,
                };
            }
            Err(e) => {
                tracing::warn!(source = source.name(), error = %e, "data source failed, trying next");
                failures.push((source.name().to_string(), e));
            }
        }
    }

    Fetched::NoData { failures }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Fixed {
        name: &'static str,
        items: Option<Vec<u32>>,
        calls: Cell<usize>,
    }

    impl Fixed {
        fn ok(name: &'static str, items: Vec<u32>) -> Self {
            Self {
                name,
                items: Some(items),
                calls: Cell::new(0),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                name,
                items: None,
                calls: Cell::new(0),
            }
        }
    }

    impl DataSource<u32> for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn fetch(&self) -> Result<Vec<u32>> {
            self.calls.set(self.calls.get() + 1);
            self.items.clone().ok_or(WatizatError::Http {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_first_source_wins() {
        let primary = Fixed::ok("primary", vec![1, 2]);
        let fallback = Fixed::ok("fallback", vec![9]);
        let fetched = first_available::<u32>(&[&primary, &fallback]);
        assert_eq!(fetched.source(), Some("primary"));
        assert_eq!(fetched.into_items(), vec![1, 2]);
        assert_eq!(fallback.calls.get(), 0);
    }

    #[test]
    fn test_falls_back_on_failure() {
        let primary = Fixed::failing("primary");
        let fallback = Fixed::ok("fallback", vec![9]);
        let fetched = first_available::<u32>(&[&primary, &fallback]);
        assert_eq!(fetched.source(), Some("fallback"));
        assert_eq!(fetched.into_items(), vec![9]);
    }

    #[test]
    fn test_all_failing_degrades_to_empty() {
        let primary = Fixed::failing("primary");
        let fallback = Fixed::failing("fallback");
        let fetched = first_available::<u32>(&[&primary, &fallback]);
        match &fetched {
            Fetched::NoData { failures } => {
                assert_eq!(failures.len(), 2);
                assert_eq!(failures[0].0, "primary");
            }
            Fetched::Found { .. } => panic!("expected NoData"),
        }
        assert!(fetched.into_items().is_empty());
    }

    #[test]
    fn test_no_data_into_result() {
        let primary = Fixed::failing("primary");
        let err = first_available::<u32>(&[&primary])
            .into_result()
            .unwrap_err();
        assert!(err.to_string().contains("primary"));
    }

    #[test]
    fn test_empty_chain() {
        let fetched = first_available::<u32>(&[]);
        assert!(matches!(fetched, Fetched::NoData { ref failures } if failures.is_empty()));
    }
}
