use crate::error::{Result, RoundError};

/// Edge length of one QR module in SVG user units.
pub const DEFAULT_SIDE: i32 = 16;
/// Outer radius of a registration mark, in units of the module radius.
pub const DEFAULT_REGISTRATION_SIZE: i32 = 7;
/// Largest accepted pixel side. Together with the grid limit this keeps every
/// coordinate well inside `i32`.
pub const MAX_SIDE: i32 = 4096;
/// Largest accepted registration mark size.
pub const MAX_REGISTRATION_SIZE: i32 = 64;

/// Parameters threaded through every stage of the rounding pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundConfig {
    /// Pixel edge length. Only `side`x`side` rects count as pixels.
    pub side: i32,
    /// Registration mark size multiplier (outer radius = size * radius).
    pub registration_size: i32,
    /// Drop top-level `<g>` elements before extracting pixels.
    pub remove_groups: bool,
    /// Collect circles of isolated pixels into one trailing layer.
    pub isolated_layer: bool,
}

impl RoundConfig {
    /// Half the pixel side, the radius of every rounding circle.
    pub fn radius(&self) -> i32 {
        self.side / 2
    }

    /// Set the pixel side
    pub fn with_side(mut self, side: i32) -> Self {
        self.side = side;
        self
    }

    /// Set the registration mark size
    pub fn with_registration_size(mut self, size: i32) -> Self {
        self.registration_size = size;
        self
    }

    /// Drop or keep top-level groups
    pub fn with_remove_groups(mut self, remove: bool) -> Self {
        self.remove_groups = remove;
        self
    }

    /// Group lone-pixel circles in a trailing layer, or append them inline
    pub fn with_isolated_layer(mut self, layer: bool) -> Self {
        self.isolated_layer = layer;
        self
    }

    /// Defaults overridden by `QR_ROUND_*` environment variables.
    ///
    /// Unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            side: parse_env_i32("QR_ROUND_SIDE", defaults.side).clamp(2, MAX_SIDE),
            registration_size: parse_env_i32("QR_ROUND_MARK_SIZE", defaults.registration_size)
                .clamp(4, MAX_REGISTRATION_SIZE),
            remove_groups: !parse_env_bool_u8("QR_ROUND_KEEP_GROUPS", false),
            isolated_layer: !parse_env_bool_u8("QR_ROUND_FLAT_CIRCLES", false),
        }
    }

    /// Reject values that cannot produce a sensible geometry.
    pub fn validate(&self) -> Result<()> {
        if !(2..=MAX_SIDE).contains(&self.side) {
            return Err(RoundError::InvalidConfig(format!(
                "side must be between 2 and {}, got {}",
                MAX_SIDE, self.side
            )));
        }
        if !(4..=MAX_REGISTRATION_SIZE).contains(&self.registration_size) {
            return Err(RoundError::InvalidConfig(format!(
                "registration size must be between 4 and {}, got {}",
                MAX_REGISTRATION_SIZE, self.registration_size
            )));
        }
        Ok(())
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            side: DEFAULT_SIDE,
            registration_size: DEFAULT_REGISTRATION_SIZE,
            remove_groups: true,
            isolated_layer: true,
        }
    }
}

fn parse_env_i32(name: &str, default: i32) -> i32 {
    parse_i32(std::env::var(name).ok().as_deref(), default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    parse_bool_u8(std::env::var(name).ok().as_deref(), default)
}

fn parse_i32(value: Option<&str>, default: i32) -> i32 {
    value
        .and_then(|v| v.trim().parse::<i32>().ok())
        .unwrap_or(default)
}

fn parse_bool_u8(value: Option<&str>, default: bool) -> bool {
    value
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}
