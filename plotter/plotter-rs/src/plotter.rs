use shared::{
    plotter_hal::{
        Approximator, PlotterConfig, PlotterDataPoint, PlotterDisplay, PlotterError, PlotterState,
        SUPPORTED_SCHEMA_VERSION,
    },
    ControllerEntity, DataPointLogger,
};

use crate::{
    coordinates::SamplePoint,
    pipeline::SignalPipeline,
    plotter_fsm::{halted::Halted, plotting::Plotting, PlotterFsm},
};

pub struct Plotter<'a> {
    config: PlotterConfig,
    pub approximator: &'a mut dyn Approximator,
    pub display: &'a mut dyn PlotterDisplay,
    pub data_logger: &'a mut dyn DataPointLogger<PlotterDataPoint>,
    fsm: Option<ControllerEntity<PlotterFsm, Plotter<'a>, PlotterState>>,
    pub(crate) inference_count: u32,
    pub(crate) failed_inferences: u32,
    pub(crate) last_point: Option<SamplePoint>,
}

impl<'a> Plotter<'a> {
    /// Performs the one-time setup. If any of it fails the fault is logged
    /// and the plotter stays halted for the rest of its life.
    pub fn new(
        config: PlotterConfig,
        approximator: &'a mut dyn Approximator,
        display: &'a mut dyn PlotterDisplay,
        data_logger: &'a mut dyn DataPointLogger<PlotterDataPoint>,
    ) -> Self {
        let mut plotter = Self {
            config,
            approximator,
            display,
            data_logger,
            fsm: None,
            inference_count: 0,
            failed_inferences: 0,
            last_point: None,
        };

        let initial_state = match plotter.setup() {
            Ok(pipeline) => Plotting::new(pipeline, plotter.config.update_interval_s),
            Err(error) => Halted::new(error),
        };

        plotter.fsm = Some(ControllerEntity::new(&mut plotter, initial_state));

        plotter
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(mut fsm) = self.fsm.take() {
            fsm.update(self, dt);
            self.fsm = Some(fsm);
        }
    }

    pub fn state(&self) -> PlotterState {
        self.fsm
            .as_ref()
            .map_or(PlotterState::Halted, |fsm| fsm.hal_state())
    }

    pub fn fault(&self) -> Option<PlotterError> {
        match self.fsm.as_ref()?.fsm_state() {
            PlotterFsm::Halted(halted) => Some(halted.fault()),
            PlotterFsm::Plotting(_) => None,
        }
    }

    pub fn pipeline(&self) -> Option<&SignalPipeline> {
        match self.fsm.as_ref()?.fsm_state() {
            PlotterFsm::Plotting(plotting) => Some(plotting.pipeline()),
            PlotterFsm::Halted(_) => None,
        }
    }

    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    /// Inferences attempted so far, failed ones included.
    pub fn inference_count(&self) -> u32 {
        self.inference_count
    }

    pub fn failed_inferences(&self) -> u32 {
        self.failed_inferences
    }

    pub fn last_point(&self) -> Option<SamplePoint> {
        self.last_point
    }

    fn setup(&mut self) -> Result<SignalPipeline, PlotterError> {
        let model_version = self.approximator.schema_version();
        if model_version != SUPPORTED_SCHEMA_VERSION {
            return Err(PlotterError::ModelVersionMismatch {
                model_version,
                supported_version: SUPPORTED_SCHEMA_VERSION,
            });
        }

        if !self.approximator.allocate_tensors() {
            return Err(PlotterError::TensorAllocationFailure);
        }

        SignalPipeline::new(
            &self.config,
            self.approximator.input_quantization(),
            self.approximator.output_quantization(),
            self.display.width_px(),
            self.display.height_px(),
        )
    }
}
