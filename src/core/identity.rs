//! Named identity tokens for states and events.
//!
//! States and events carry no behavior. They are compared, hashed and
//! ordered by name only, so two values built from the same name are
//! interchangeable anywhere in a transition table.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! identity {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a token from its display name.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// The name used for equality, hashing and display.
            pub fn name(&self) -> &str {
                &self.0
            }

            /// True when the name is empty or whitespace only.
            ///
            /// Blank names are rejected when a table is validated by
            /// [`FsmBuilder`](crate::builder::FsmBuilder).
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self::new(name)
            }
        }
    };
}

identity! {
    /// A named point in a machine's lifecycle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tablefsm::core::State;
    ///
    /// let closed = State::new("CLOSED");
    /// assert_eq!(closed, State::from("CLOSED"));
    /// assert_eq!(closed.name(), "CLOSED");
    /// assert_eq!(closed.to_string(), "CLOSED");
    /// ```
    State
}

identity! {
    /// A named stimulus delivered to a machine.
    ///
    /// Events live in their own namespace: an `Event` named `"CLOSE"` is never
    /// confused with a `State` of the same name because the types differ.
    Event
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_name() {
        assert_eq!(State::new("LISTEN"), State::from("LISTEN".to_string()));
        assert_ne!(State::new("LISTEN"), State::new("CLOSED"));
        assert_eq!(Event::new("SYN"), Event::from("SYN"));
    }

    #[test]
    fn hashing_follows_name() {
        let mut seen = HashSet::new();
        seen.insert(Event::new("ACK"));
        seen.insert(Event::new("ACK"));
        seen.insert(Event::new("FIN"));

        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&Event::new("FIN")));
    }

    #[test]
    fn blank_names_are_detected() {
        assert!(State::new("").is_blank());
        assert!(Event::new("  \t").is_blank());
        assert!(!State::new("CLOSED").is_blank());
    }

    #[test]
    fn debug_names_the_namespace() {
        assert_eq!(format!("{:?}", State::new("CLOSED")), "State(\"CLOSED\")");
        assert_eq!(format!("{:?}", Event::new("ACK")), "Event(\"ACK\")");
    }

    #[test]
    fn serializes_as_bare_name() {
        let json = serde_json::to_string(&State::new("TIME_WAIT")).unwrap();
        assert_eq!(json, "\"TIME_WAIT\"");

        let back: State = serde_json::from_str(&json).unwrap();
        assert_eq!(back, State::new("TIME_WAIT"));
    }

    #[test]
    fn ordering_is_lexical() {
        let mut events = vec![Event::new("SYN"), Event::new("ACK"), Event::new("FIN")];
        events.sort();

        let names: Vec<&str> = events.iter().map(Event::name).collect();
        assert_eq!(names, vec!["ACK", "FIN", "SYN"]);
    }
}
