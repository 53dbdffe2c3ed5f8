//! Handler priority.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Execution priority of a subscriber. Higher runs first.
///
/// Any `i32` is legal; the named presets are only conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(i32);

impl Priority {
    pub const HIGH: Priority = Priority(100);
    pub const NORMAL: Priority = Priority(0);
    pub const LOW: Priority = Priority(-100);

    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Priority {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_normal() {
        assert_eq!(Priority::default(), Priority::NORMAL);
        assert_eq!(Priority::NORMAL.value(), 0);
    }

    #[test]
    fn test_presets_order() {
        assert!(Priority::HIGH > Priority::NORMAL);
        assert!(Priority::NORMAL > Priority::LOW);
        assert_eq!(Priority::HIGH.value(), 100);
        assert_eq!(Priority::LOW.value(), -100);
    }

    #[test]
    fn test_arbitrary_values() {
        let p: Priority = 250.into();
        assert!(p > Priority::HIGH);
        assert_eq!(Priority::new(i32::MIN).value(), i32::MIN);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&Priority::LOW).unwrap();
        assert_eq!(json, "-100");
        let back: Priority = serde_json::from_str("42").unwrap();
        assert_eq!(back, Priority::new(42));
    }
}
