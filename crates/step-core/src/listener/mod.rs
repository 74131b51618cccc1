//! Capacidad de observación del ciclo de vida de steps.

mod console;

pub use console::ConsoleStepListener;

use std::cell::RefCell;
use std::rc::Rc;

use crate::errors::ListenerError;
use crate::step::{ExecutedStepDescription, StepOutcome};

/// Handle compartido de un listener registrado en el bus. La identidad de
/// registro es la identidad de la referencia (`Rc::ptr_eq`).
pub type SharedStepListener = Rc<RefCell<dyn StepListener>>;

/// Interfaz que implementa cualquier observador de eventos de step.
///
/// Los callbacks devuelven `Result` en lugar de hacer unwind: un `Err` se
/// reporta al sink de diagnóstico y el despacho continúa con el resto de
/// listeners. El orden de notificación es siempre el orden de registro.
pub trait StepListener {
    /// Un step entró en ejecución.
    fn step_started(&mut self, description: &ExecutedStepDescription) -> Result<(), ListenerError>;

    /// Un step concluyó con la clasificación dada.
    fn step_finished(&mut self, outcome: StepOutcome) -> Result<(), ListenerError>;
}
