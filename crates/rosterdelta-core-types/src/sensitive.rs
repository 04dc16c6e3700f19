//! Sensitive data marker for automatic redaction
//!
//! Employee snapshots carry personal fields (names, addresses, identifiers).
//! The `Sensitive<T>` wrapper keeps cell values out of log output and error
//! text while still letting callers compare or expose them deliberately.

use std::fmt;

/// Wrapper for sensitive data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use rosterdelta_core_types::Sensitive;
///
/// let address = Sensitive::new("12 Harbour Road");
/// println!("{:?}", address); // Prints: ***REDACTED***
/// println!("{}", address);   // Prints: ***REDACTED***
///
/// assert_eq!(address.expose(), &"12 Harbour Road");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying sensitive value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***REDACTED***")
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: PartialEq> PartialEq for Sensitive<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensitive_debug_redaction() {
        let cell = Sensitive::new("Jane Doe");
        let debug_str = format!("{:?}", cell);
        assert_eq!(debug_str, "***REDACTED***");
        assert!(!debug_str.contains("Jane"));
    }

    #[test]
    fn test_sensitive_display_redaction() {
        let cell = Sensitive::new(Some("4 Elm Street".to_string()));
        let display_str = format!("{}", cell);
        assert_eq!(display_str, "***REDACTED***");
        assert!(!display_str.contains("Elm"));
    }

    #[test]
    fn test_sensitive_expose_and_into_inner() {
        let cell = Sensitive::new(String::from("00042"));
        assert_eq!(cell.expose(), "00042");
        assert_eq!(cell.into_inner(), "00042");
    }

    #[test]
    fn test_sensitive_compares_inner_values() {
        assert_eq!(Sensitive::new("Y"), Sensitive::new("Y"));
        assert_ne!(Sensitive::new("Y"), Sensitive::new("N"));
    }

    #[test]
    fn test_sensitive_with_struct() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Cell {
            column: String,
            value: Sensitive<Option<String>>,
        }

        let cell = Cell {
            column: "address".to_string(),
            value: Sensitive::new(Some("1 Main St".to_string())),
        };

        let debug_str = format!("{:?}", cell);
        assert!(debug_str.contains("address"));
        assert!(debug_str.contains("***REDACTED***"));
        assert!(!debug_str.contains("Main"));
    }
}
