use core::any::Any;

use serde::{Deserialize, Serialize};
use strum_macros::{EnumDiscriminants, EnumIter};

/// Model schema version this plotter knows how to drive.
pub const SUPPORTED_SCHEMA_VERSION: u32 = 3;

pub const DEFAULT_INFERENCES_PER_CYCLE: u32 = 1000;
pub const DEFAULT_X_RANGE: f32 = 2.0 * core::f32::consts::PI;
pub const DEFAULT_MARKER_RADIUS_PX: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotterState {
    Plotting,
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlotterError {
    ModelVersionMismatch {
        model_version: u32,
        supported_version: u32,
    },
    TensorAllocationFailure,
    InvalidQuantizationScale,
    InvalidCyclePeriod,
    InvalidSampleRange,
    DisplayTooSmall,
    InferenceInvocationFailure,
}

impl PlotterError {
    /// Fatal errors stop the plotter before (or instead of) the first inference.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PlotterError::InferenceInvocationFailure)
    }
}

/// 16-bit RGB565 colour as understood by most small SPI/parallel LCD controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const YELLOW: Rgb565 = Rgb565(0xFFE0);
}

/// Quantization metadata as reported by the approximator for one tensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TensorQuantization {
    pub scale: f32,
    pub zero_point: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(PlotterDataPointVariant))]
#[strum_discriminants(derive(EnumIter))]
pub enum PlotterDataPoint {
    Sample {
        x: f32,
        y: f32,
        x_quantized: i8,
        y_quantized: i8,
    },
    InferenceFailed {
        x: f32,
    },
    Fault(PlotterError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotterConfig {
    pub inferences_per_cycle: u32,
    pub x_range: f32,
    pub marker_radius_px: i32, // Also used as the drawable area margin
    pub marker_color: Rgb565,
    pub background_color: Rgb565,
    pub update_interval_s: f32,
}

impl PlotterConfig {
    pub const fn default() -> Self {
        Self {
            inferences_per_cycle: DEFAULT_INFERENCES_PER_CYCLE,
            x_range: DEFAULT_X_RANGE,
            marker_radius_px: DEFAULT_MARKER_RADIUS_PX,
            marker_color: Rgb565::YELLOW,
            background_color: Rgb565::BLACK,
            update_interval_s: 0.0,
        }
    }
}

pub trait Approximator {
    fn schema_version(&self) -> u32;
    fn allocate_tensors(&mut self) -> bool;

    fn input_quantization(&self) -> TensorQuantization;
    fn output_quantization(&self) -> TensorQuantization;

    /// Runs one blocking inference. `None` means the engine reported a failure.
    fn invoke(&mut self, input: i8) -> Option<i8>;

    fn as_mut_any(&mut self) -> &mut dyn Any;
}

pub trait RenderSink {
    fn clear(&mut self, color: Rgb565);
    fn fill_circle(&mut self, x: i32, y: i32, radius: i32, color: Rgb565);

    fn as_mut_any(&mut self) -> &mut dyn Any;
}

pub trait DisplayMetadata {
    fn width_px(&self) -> i32;
    fn height_px(&self) -> i32;
}

pub trait PlotterDisplay: RenderSink + DisplayMetadata {}

impl<T> PlotterDisplay for T where T: RenderSink + DisplayMetadata {}
