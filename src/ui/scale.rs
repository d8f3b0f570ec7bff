//! Layout scaling against the 240 px reference design.

use crate::config::UI_BASE_SIZE_PX;

/// Scale factor in permille (1000 = reference layout).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiScale {
    permille: u16,
}

impl UiScale {
    pub const IDENTITY: Self = Self { permille: 1000 };

    /// Fit the reference square into `width` × `height`; the smaller axis
    /// wins. A zero or degenerate resolution falls back to 1000‰.
    pub fn from_resolution(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::IDENTITY;
        }
        let w_scale = width.saturating_mul(1000) / UI_BASE_SIZE_PX;
        let h_scale = height.saturating_mul(1000) / UI_BASE_SIZE_PX;
        let min_scale = w_scale.min(h_scale);
        if min_scale == 0 {
            return Self::IDENTITY;
        }
        Self {
            permille: min_scale.min(u32::from(u16::MAX)) as u16,
        }
    }

    pub fn permille(&self) -> u16 {
        self.permille
    }

    /// Scale a reference pixel value, rounding to nearest. Non-zero inputs
    /// never collapse to zero.
    pub fn px(&self, value: i32) -> i32 {
        if value == 0 {
            return 0;
        }
        let abs = i64::from(value.unsigned_abs());
        let mut scaled = (abs * i64::from(self.permille) + 500) / 1000;
        if scaled == 0 {
            scaled = 1;
        }
        let scaled = scaled.min(i64::from(i32::MAX)) as i32;
        if value < 0 {
            -scaled
        } else {
            scaled
        }
    }
}

impl Default for UiScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}
