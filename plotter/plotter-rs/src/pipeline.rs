use shared::plotter_hal::{PlotterConfig, PlotterError, TensorQuantization};

use crate::{
    coordinates::{DrawableArea, SamplePoint},
    cycle::CycleState,
    quantization::AffineQuantParams,
};

/// Everything derived once at startup that the plotting loop needs per sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalPipeline {
    pub input_params: AffineQuantParams,
    pub output_params: AffineQuantParams,
    pub cycle: CycleState,
    pub area: DrawableArea,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlottedSample {
    pub point: SamplePoint,
    pub x_quantized: i8,
    pub y_quantized: i8,
    pub pixel: (i32, i32),
}

impl SignalPipeline {
    pub fn new(
        config: &PlotterConfig,
        input_quantization: TensorQuantization,
        output_quantization: TensorQuantization,
        display_width_px: i32,
        display_height_px: i32,
    ) -> Result<Self, PlotterError> {
        Ok(Self {
            input_params: AffineQuantParams::from_tensor(input_quantization)?,
            output_params: AffineQuantParams::from_tensor(output_quantization)?,
            cycle: CycleState::new(config.inferences_per_cycle)?,
            area: DrawableArea::new(
                display_width_px,
                display_height_px,
                config.marker_radius_px,
                config.x_range as f64,
            )?,
        })
    }

    /// Advances the cycle and returns the next real input with its quantized form.
    pub fn next_input(&mut self) -> (f64, i8) {
        let x = self.cycle.next_sample(self.area.x_range());

        (x, self.input_params.quantize(x))
    }

    /// Turns a quantized approximator output for `x` into a point and an
    /// on-screen pixel position.
    pub fn resolve_output(&self, x: f64, x_quantized: i8, y_quantized: i8) -> PlottedSample {
        let point = SamplePoint {
            x,
            y: self.output_params.dequantize(y_quantized),
        };

        let clipped = self.area.clip(point);

        PlottedSample {
            point,
            x_quantized,
            y_quantized,
            pixel: self.area.map_to_pixels(clipped.x, clipped.y),
        }
    }
}
