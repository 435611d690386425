//! Positive integer identifiers parsed from paths and token claims.

use std::{fmt, str::FromStr};

use super::ServiceError;

macro_rules! positive_id {
    ($name:ident, $message:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            pub fn new(raw: i32) -> Result<Self, ServiceError> {
                if raw > 0 {
                    Ok(Self(raw))
                } else {
                    Err(ServiceError::InvalidId($message))
                }
            }

            pub fn get(self) -> i32 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = ServiceError;

            /// The whole string must be a decimal integer; `"12abc"` is rejected.
            fn from_str(raw: &str) -> Result<Self, Self::Err> {
                raw.trim()
                    .parse::<i32>()
                    .map_err(|_| ServiceError::InvalidId($message))
                    .and_then(Self::new)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_id!(TodoId, "Invalid todo ID");
positive_id!(UserId, "Invalid user ID");
