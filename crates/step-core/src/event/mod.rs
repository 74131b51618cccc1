//! Eventos de ciclo de vida y bus de despacho.

mod bus;
mod types;

pub use bus::{SharedStepEventBus, StepEventBus};
pub use types::{StepEvent, StepEventKind};
