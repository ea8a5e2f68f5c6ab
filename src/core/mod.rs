pub mod dates;
pub mod errors;
pub mod macros;
pub mod palette;
pub mod traits;
pub mod types;

pub use dates::{elapsed_days, parse_timestamp, parse_timestamp_value, MS_PER_DAY};
pub use errors::{
    AnalyticsError, AnalyticsResult, ConfigError, DataError, FilterError, RenderError,
};
pub use palette::{is_hex_color, is_palette_key, Palette, Swatch, DEFAULT_PALETTE, NEUTRAL_COLOR};
pub use traits::{ChartEventHandler, NoopHandler};
pub use types::*;
