use shared::{
    plotter_hal::{PlotterDataPoint, PlotterError},
    util::LoopTimer,
    ControllerState,
};

use crate::{
    pipeline::{PlottedSample, SignalPipeline},
    Plotter,
};

use super::PlotterFsm;

pub struct Plotting {
    pipeline: SignalPipeline,
    loop_timer: LoopTimer<f32>,
}

impl<'f> ControllerState<PlotterFsm, Plotter<'f>> for Plotting {
    fn update(&mut self, plotter: &mut Plotter<'f>, dt: f32) -> Option<PlotterFsm> {
        if !self.loop_timer.should_update(dt) {
            return None;
        }

        plotter.inference_count = plotter.inference_count.wrapping_add(1);

        match self.plot_next_sample(plotter) {
            Ok(sample) => {
                plotter.last_point = Some(sample.point);
            }
            Err(_) => {
                // Dropped, the next tick carries on with the next sample
                plotter.failed_inferences = plotter.failed_inferences.wrapping_add(1);
            }
        }

        None
    }

    fn enter_state(&mut self, plotter: &mut Plotter<'f>) {
        silprintln!("Starting inferences...");

        #[cfg(feature = "defmt")]
        defmt::info!("Starting inferences...");

        let background_color = plotter.config().background_color;

        self.loop_timer.reset();
        plotter.display.clear(background_color);
    }

    fn exit_state(&mut self, _plotter: &mut Plotter<'f>) {
        // Nothing
    }
}

impl Plotting {
    pub fn new(pipeline: SignalPipeline, update_interval_s: f32) -> PlotterFsm {
        PlotterFsm::Plotting(Self {
            pipeline,
            loop_timer: LoopTimer::new(update_interval_s),
        })
    }

    pub fn pipeline(&self) -> &SignalPipeline {
        &self.pipeline
    }

    fn plot_next_sample(&mut self, plotter: &mut Plotter) -> Result<PlottedSample, PlotterError> {
        let (x, x_quantized) = self.pipeline.next_input();

        let y_quantized = match plotter.approximator.invoke(x_quantized) {
            Some(y_quantized) => y_quantized,
            None => {
                silprintln!("Invoke failed on x: {}", x);

                #[cfg(feature = "defmt")]
                defmt::warn!("Invoke failed on x: {}", x);

                plotter
                    .data_logger
                    .log_data_point(&PlotterDataPoint::InferenceFailed { x: x as f32 });

                return Err(PlotterError::InferenceInvocationFailure);
            }
        };

        let sample = self.pipeline.resolve_output(x, x_quantized, y_quantized);

        plotter.data_logger.log_data_point(&PlotterDataPoint::Sample {
            x: sample.point.x as f32,
            y: sample.point.y as f32,
            x_quantized,
            y_quantized,
        });

        let (x_pixel, y_pixel) = sample.pixel;
        let config = plotter.config();
        let (background_color, marker_color) = (config.background_color, config.marker_color);

        plotter.display.clear(background_color);
        plotter.display.fill_circle(
            x_pixel,
            y_pixel,
            self.pipeline.area.margin_px(),
            marker_color,
        );

        Ok(sample)
    }
}
