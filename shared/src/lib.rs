#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod logger;
pub mod plotter_hal;
pub mod plotter_mock;
pub mod util;

pub use logger::{DataPointLogger, PagedDataLogger};

pub trait ControllerState<F, C> {
    fn update(&mut self, controller: &mut C, dt: f32) -> Option<F>;
    fn enter_state(&mut self, controller: &mut C);
    fn exit_state(&mut self, controller: &mut C);
}

pub trait ControllerFsm<F, C, S> {
    fn to_controller_state(&mut self) -> &mut dyn ControllerState<F, C>;
    fn hal_state(&self) -> S;
}

/// Owns the current state of a state machine and runs its transitions.
pub struct ControllerEntity<F, C, S> {
    fsm_state: F,
    _controller_marker: core::marker::PhantomData<C>,
    _hal_state_marker: core::marker::PhantomData<S>,
}

impl<F, C, S> ControllerEntity<F, C, S>
where
    F: ControllerFsm<F, C, S>,
{
    pub fn new(controller: &mut C, mut fsm_state: F) -> Self {
        fsm_state.to_controller_state().enter_state(controller);

        Self {
            fsm_state,
            _controller_marker: core::marker::PhantomData,
            _hal_state_marker: core::marker::PhantomData,
        }
    }

    pub fn update(&mut self, controller: &mut C, dt: f32) {
        let new_state = self.fsm_state.to_controller_state().update(controller, dt);

        if let Some(new_state) = new_state {
            self.transition_state(controller, new_state);
        }
    }

    fn transition_state(&mut self, controller: &mut C, mut new_state: F) {
        self.fsm_state.to_controller_state().exit_state(controller);
        new_state.to_controller_state().enter_state(controller);

        self.fsm_state = new_state;
    }

    pub fn hal_state(&self) -> S {
        self.fsm_state.hal_state()
    }

    pub fn fsm_state(&self) -> &F {
        &self.fsm_state
    }
}
