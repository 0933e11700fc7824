use shared::plotter_hal::PlotterError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// Part of the display a marker can be drawn into without crossing the edges.
/// Every side is inset by `margin_px`, which is the marker radius.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableArea {
    width_px: i32,
    height_px: i32,
    margin_px: i32,
    midpoint_px: i32,
    x_scale: f64, // Pixels per unit of x
    x_range: f64,
}

impl DrawableArea {
    pub fn new(
        display_width_px: i32,
        display_height_px: i32,
        margin_px: i32,
        x_range: f64,
    ) -> Result<Self, PlotterError> {
        if margin_px < 0
            || display_width_px <= margin_px.saturating_mul(2)
            || display_height_px <= margin_px.saturating_mul(2)
        {
            return Err(PlotterError::DisplayTooSmall);
        }

        if !x_range.is_finite() || x_range <= 0.0 {
            return Err(PlotterError::InvalidSampleRange);
        }

        let width_px = display_width_px - margin_px * 2;
        let height_px = display_height_px - margin_px * 2;

        Ok(Self {
            width_px,
            height_px,
            margin_px,
            midpoint_px: height_px / 2,
            x_scale: width_px as f64 / x_range,
            x_range,
        })
    }

    pub fn width_px(&self) -> i32 {
        self.width_px
    }

    pub fn height_px(&self) -> i32 {
        self.height_px
    }

    pub fn margin_px(&self) -> i32 {
        self.margin_px
    }

    pub fn midpoint_px(&self) -> i32 {
        self.midpoint_px
    }

    pub fn x_scale(&self) -> f64 {
        self.x_scale
    }

    pub fn x_range(&self) -> f64 {
        self.x_range
    }

    /// Clamps a point into the range the mapping keeps on screen:
    /// `x` in `[0, x_range]` and `y` in `[-1, 1]`.
    pub fn clip(&self, point: SamplePoint) -> SamplePoint {
        SamplePoint {
            x: clamp_or_zero(point.x, 0.0, self.x_range),
            y: clamp_or_zero(point.y, -1.0, 1.0),
        }
    }

    pub fn contains(&self, x_pixel: i32, y_pixel: i32) -> bool {
        (self.margin_px..=self.margin_px + self.width_px).contains(&x_pixel)
            && (self.margin_px..=self.margin_px + self.height_px).contains(&y_pixel)
    }

    /// Values outside `[0, x_range]` x `[-1, 1]` land off the drawable area,
    /// saturating at the limits of `i32`.
    pub fn map_to_pixels(&self, x: f64, y: f64) -> (i32, i32) {
        let x_pixel = offset_pixel(self.margin_px, x * self.x_scale);

        // Display y grows downwards, so positive values are drawn above the midpoint
        let midpoint = self.midpoint_px as f64;
        let y_pixel = if y >= 0.0 {
            offset_pixel(self.margin_px, midpoint * (1.0 - y))
        } else {
            offset_pixel(self.margin_px + self.midpoint_px, midpoint * -y)
        };

        (x_pixel, y_pixel)
    }
}

pub fn map_to_pixels(x: f64, y: f64, area: &DrawableArea) -> (i32, i32) {
    area.map_to_pixels(x, y)
}

// Float to int casts saturate (NaN becomes 0), so only the add can overflow
fn offset_pixel(origin_px: i32, offset: f64) -> i32 {
    origin_px.saturating_add(libm::round(offset) as i32)
}

fn clamp_or_zero(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(min, max)
    }
}
