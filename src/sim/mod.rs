pub mod integrator;
pub mod runner;
pub mod event;

pub use runner::{simulate, simulate_with, Flight, FlightReport};
pub use integrator::advance;
pub use event::{EventKind, SimEvent};
