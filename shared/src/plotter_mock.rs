use core::any::Any;

use crate::plotter_hal::{
    Approximator, DisplayMetadata, RenderSink, Rgb565, TensorQuantization,
    SUPPORTED_SCHEMA_VERSION,
};

pub const MOCK_DISPLAY_WIDTH_PX: i32 = 320;
pub const MOCK_DISPLAY_HEIGHT_PX: i32 = 240;

/// Stands in for the inference engine by evaluating a quantized `sin(x)`.
#[derive(Debug)]
pub struct ApproximatorMock {
    pub schema_version: u32,
    pub allocation_succeeds: bool,
    pub input_quantization: TensorQuantization,
    pub output_quantization: TensorQuantization,
    pub fail_next_invocations: u32,
    pub allocations: u32,
    pub invocations: u32,
    pub last_input: Option<i8>,
}

impl Approximator for ApproximatorMock {
    fn schema_version(&self) -> u32 {
        self.schema_version
    }

    fn allocate_tensors(&mut self) -> bool {
        self.allocations += 1;
        self.allocation_succeeds
    }

    fn input_quantization(&self) -> TensorQuantization {
        self.input_quantization
    }

    fn output_quantization(&self) -> TensorQuantization {
        self.output_quantization
    }

    fn invoke(&mut self, input: i8) -> Option<i8> {
        self.invocations += 1;
        self.last_input = Some(input);

        if self.fail_next_invocations > 0 {
            self.fail_next_invocations -= 1;
            return None;
        }

        let input_params = self.input_quantization;
        let output_params = self.output_quantization;

        let x = (input as i32 - input_params.zero_point) as f64 * input_params.scale as f64;
        let y = libm::sin(x);
        let y_quantized = libm::round(y / output_params.scale as f64) + output_params.zero_point as f64;

        Some(y_quantized.clamp(i8::MIN as f64, i8::MAX as f64) as i8)
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}

impl ApproximatorMock {
    pub fn new() -> Self {
        Self {
            schema_version: SUPPORTED_SCHEMA_VERSION,
            allocation_succeeds: true,
            input_quantization: TensorQuantization {
                scale: 0.0245,
                zero_point: -128,
            },
            output_quantization: TensorQuantization {
                scale: 0.0085,
                zero_point: 4,
            },
            fail_next_invocations: 0,
            allocations: 0,
            invocations: 0,
            last_input: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawnCircle {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub color: Rgb565,
}

/// Display that remembers what it was asked to draw instead of driving an LCD.
#[derive(Debug)]
pub struct DisplayMock {
    width_px: i32,
    height_px: i32,
    pub clears: u32,
    pub last_clear_color: Option<Rgb565>,
    pub circles_drawn: u32,
    pub last_circle: Option<DrawnCircle>,
}

impl RenderSink for DisplayMock {
    fn clear(&mut self, color: Rgb565) {
        self.clears += 1;
        self.last_clear_color = Some(color);
    }

    fn fill_circle(&mut self, x: i32, y: i32, radius: i32, color: Rgb565) {
        self.circles_drawn += 1;
        self.last_circle = Some(DrawnCircle {
            x,
            y,
            radius,
            color,
        });
    }

    fn as_mut_any(&mut self) -> &mut dyn Any {
        self
    }
}

impl DisplayMetadata for DisplayMock {
    fn width_px(&self) -> i32 {
        self.width_px
    }

    fn height_px(&self) -> i32 {
        self.height_px
    }
}

impl DisplayMock {
    pub fn new() -> Self {
        Self::with_size(MOCK_DISPLAY_WIDTH_PX, MOCK_DISPLAY_HEIGHT_PX)
    }

    pub fn with_size(width_px: i32, height_px: i32) -> Self {
        Self {
            width_px,
            height_px,
            clears: 0,
            last_clear_color: None,
            circles_drawn: 0,
            last_circle: None,
        }
    }

    /// True when a circle drawn at the given position lies fully on screen.
    pub fn circle_on_screen(&self, circle: &DrawnCircle) -> bool {
        circle.x - circle.radius >= 0
            && circle.y - circle.radius >= 0
            && circle.x + circle.radius <= self.width_px
            && circle.y + circle.radius <= self.height_px
    }
}
