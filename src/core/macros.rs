/// Wire enum macro for feedback analytics
///
/// The data layer sends every categorical field as an upper-case string
/// (`IN_PROGRESS`, `SUGGESTION`, ...). This macro generates the definition
/// order table, the wire-name mapping and `FromStr`/`Display` for such enums
/// so each enum only states its variants once.
///
/// # Example
///
/// ```rust
/// feedback_analytics::wire_enum! {
///     /// Traffic light
///     pub enum Light {
///         Red => "RED",
///         Green => "GREEN",
///     }
/// }
///
/// assert_eq!(Light::ALL, [Light::Red, Light::Green]);
/// assert_eq!("GREEN".parse::<Light>(), Ok(Light::Green));
/// assert_eq!(Light::Red.to_string(), "RED");
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant in definition order
            pub const ALL: [$name; [$($wire),+].len()] = [$($name::$variant),+];

            /// Upper-case name used on the wire
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            /// Position of the variant in definition order
            pub fn ordinal(&self) -> usize {
                Self::ALL.iter().position(|v| v == self).unwrap_or(0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(other.to_string()),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}
