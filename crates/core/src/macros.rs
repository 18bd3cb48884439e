//! Helper macro for enums persisted as lowercase `TEXT` columns.
//!
//! Each variant maps to a fixed wire/database string. The generated type
//! serializes as that string, parses from it (rejecting anything else with a
//! [`CoreError::Validation`](crate::error::CoreError::Validation) naming the
//! enum), and converts from `String` so sqlx rows can decode it via
//! `#[sqlx(try_from = "String")]`.

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire and database representation.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            /// Parse from the wire representation.
            pub fn parse(value: &str) -> Result<Self, $crate::error::CoreError> {
                match value {
                    $( $text => Ok($name::$variant), )+
                    _ => Err($crate::error::CoreError::Validation(
                        concat!("Invalid ", $label).to_string(),
                    )),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::error::CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }
    };
}
