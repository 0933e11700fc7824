use shared::{
    plotter_hal::{PlotterDataPoint, PlotterError},
    ControllerState,
};

use crate::Plotter;

use super::PlotterFsm;

/// Terminal state after a fatal startup error. Nothing is drawn or inferred.
pub struct Halted {
    fault: PlotterError,
}

impl<'f> ControllerState<PlotterFsm, Plotter<'f>> for Halted {
    fn update(&mut self, _plotter: &mut Plotter<'f>, _dt: f32) -> Option<PlotterFsm> {
        None
    }

    fn enter_state(&mut self, plotter: &mut Plotter<'f>) {
        silprintln!("Plotter halted: {:?}", self.fault);

        #[cfg(feature = "defmt")]
        defmt::error!("Plotter halted: {:?}", self.fault);

        plotter
            .data_logger
            .log_data_point(&PlotterDataPoint::Fault(self.fault));
    }

    fn exit_state(&mut self, _plotter: &mut Plotter<'f>) {
        // Nothing
    }
}

impl Halted {
    pub fn new(fault: PlotterError) -> PlotterFsm {
        PlotterFsm::Halted(Self { fault })
    }

    pub fn fault(&self) -> PlotterError {
        self.fault
    }
}
