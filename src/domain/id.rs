use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shortest identifier the generator will produce, whatever the configuration
/// asks for.
const MIN_GENERATED_LENGTH: usize = 4;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        ///
        /// Identifiers are opaque. Any string is accepted, including the empty
        /// string used for a reference that was never filled in.
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is empty or whitespace.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::new(s))
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

record_id!(
    /// Identifier of a [`User`](crate::domain::User).
    UserId
);
record_id!(
    /// Identifier of a [`Team`](crate::domain::Team).
    TeamId
);
record_id!(
    /// Identifier of an [`Equipment`](crate::domain::Equipment) asset.
    EquipmentId
);
record_id!(
    /// Identifier of a [`MaintenanceRequest`](crate::domain::MaintenanceRequest).
    RequestId
);

/// Generates a random alphanumeric identifier of the given length that is not
/// `taken`.
///
/// Candidates are cut from a v4 UUID, so `length` is clamped to the 32 hex
/// digits available.
pub(crate) fn generate(length: usize, taken: impl Fn(&str) -> bool) -> String {
    let length = length.clamp(MIN_GENERATED_LENGTH, 32);
    loop {
        let mut candidate = Uuid::new_v4().simple().to_string();
        candidate.truncate(length);
        if !taken(&candidate) {
            return candidate;
        }
        tracing::debug!(%candidate, "generated identifier already in use, retrying");
    }
}
