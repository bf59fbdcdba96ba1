//! Macro for implementing Display and FromStr for wire-valued enums
//!
//! Graph uses PascalCase string values for presence states
//! (`"DoNotDisturb"`, `"Presenting"`). This macro maps enum variants to those
//! values once so serialization, logging and parsing stay consistent.
//!
//! # Example
//!
//! ```rust
//! use presencesync_domain::impl_wire_value_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Mood {
//!     Calm,
//!     Busy,
//! }
//!
//! impl_wire_value_conversions!(Mood {
//!     Calm => "Calm",
//!     Busy => "Busy",
//! });
//!
//! assert_eq!(Mood::Busy.to_string(), "Busy");
//! assert_eq!("calm".parse::<Mood>().unwrap(), Mood::Calm);
//! ```

/// Implements Display, FromStr and `as_wire_str` for wire-valued enums
///
/// - Display writes the exact wire value
/// - FromStr accepts the wire value case-insensitively
#[macro_export]
macro_rules! impl_wire_value_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Exact value sent over the wire.
            pub const fn as_wire_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_wire_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(if trimmed.eq_ignore_ascii_case($str) {
                    return Ok(Self::$variant);
                })+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
