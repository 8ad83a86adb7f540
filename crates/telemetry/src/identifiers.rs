//! Typed identifier wrappers around `Arc<str>`.
//!
//! Trip and route ids come off the wire as plain strings but flow through
//! every layer of the pipeline, so each gets a distinct newtype. Cloning is
//! a refcount bump, and equality short-circuits when two ids share the same
//! allocation.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self::new(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

impl_identifier! {
    /// Identifies one vehicle run in the feed, e.g. `"092200_1..S03R"`.
    TripIdentifier
}

impl_identifier! {
    /// Identifies a route, e.g. `"1"` or `"A"`. Doubles as the path segment
    /// in the per-route feed URL.
    RouteIdentifier
}

// ============================================================================
// Tests
// ============================================================================
