use shared::{plotter_hal::PlotterState, ControllerFsm, ControllerState};

use crate::Plotter;

pub mod halted;
pub mod plotting;

pub enum PlotterFsm {
    Plotting(plotting::Plotting),
    Halted(halted::Halted),
}

impl<'a> ControllerFsm<PlotterFsm, Plotter<'a>, PlotterState> for PlotterFsm {
    fn to_controller_state(&mut self) -> &mut dyn ControllerState<PlotterFsm, Plotter<'a>> {
        match self {
            PlotterFsm::Plotting(state) => state,
            PlotterFsm::Halted(state) => state,
        }
    }

    fn hal_state(&self) -> PlotterState {
        match self {
            PlotterFsm::Plotting(_) => PlotterState::Plotting,
            PlotterFsm::Halted(_) => PlotterState::Halted,
        }
    }
}
