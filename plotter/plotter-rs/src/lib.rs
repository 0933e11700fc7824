// Define no_std except for testing and sil feature
#![cfg_attr(not(any(test, feature = "sil")), no_std)]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "sil"))]
macro_rules! silprintln {
    () => { println!() };
    ($($arg:tt)*) => { println!($($arg)*) };
}

#[cfg(not(any(test, feature = "sil")))]
macro_rules! silprintln {
    () => {};
    ($($arg:tt)*) => {};
}

pub mod coordinates;
pub mod cycle;
pub mod pipeline;
pub mod plotter;
pub mod plotter_fsm;
pub mod quantization;

pub use coordinates::{map_to_pixels, DrawableArea, SamplePoint};
pub use cycle::{next_sample, CycleState};
pub use pipeline::SignalPipeline;
pub use plotter::Plotter;
pub use quantization::{dequantize, quantize, AffineQuantParams};
