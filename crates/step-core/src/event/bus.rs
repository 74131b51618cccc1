//! Bus de eventos de steps: punto único de verdad del estado del run.
//!
//! El bus mantiene el conjunto ordenado de listeners, las banderas
//! failed/pending del run actual y la traza append-only de eventos. El
//! despacho es síncrono y en orden de registro; un listener que falla se
//! reporta al sink de diagnóstico (`log`) y no interrumpe a los demás.
//!
//! No es un singleton ambiente: cada escenario (o worker concurrente)
//! instancia su propio bus y lo comparte por referencia (`Rc<RefCell<_>>`)
//! con los interceptores y listeners de ese escenario.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use uuid::Uuid;

use super::{StepEvent, StepEventKind};
use crate::listener::SharedStepListener;
use crate::step::{ExecutedStepDescription, StepOutcome};

/// Handle compartido del bus dentro de un escenario.
pub type SharedStepEventBus = Rc<RefCell<StepEventBus>>;

/// Estado del run + fan-out de eventos a listeners.
pub struct StepEventBus {
    run_id: Uuid,
    failed: bool,
    pending: bool,
    listeners: Vec<SharedStepListener>,
    trace: Vec<StepEvent>,
}

impl Default for StepEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl StepEventBus {
    pub fn new() -> Self {
        Self { run_id: Uuid::new_v4(),
               failed: false,
               pending: false,
               listeners: Vec::new(),
               trace: Vec::new() }
    }

    /// Bus envuelto en su handle compartido, listo para pasar a
    /// interceptores.
    pub fn new_shared() -> SharedStepEventBus {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Identificador del run actual. Cambia en cada `clear()`.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Registra un listener al final del conjunto ordenado. Idempotente
    /// por identidad de referencia: registrar dos veces el mismo listener
    /// es un no-op, no un error.
    pub fn register_listener(&mut self, listener: SharedStepListener) {
        let already = self.listeners.iter().any(|l| Rc::ptr_eq(l, &listener));
        if !already {
            self.listeners.push(listener);
        }
    }

    /// Da de baja un listener por identidad. No-op si no estaba.
    pub fn drop_listener(&mut self, listener: &SharedStepListener) {
        self.listeners.retain(|l| !Rc::ptr_eq(l, listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Reinicio en el límite de escenario: banderas a false, conjunto de
    /// listeners y traza vacíos, `run_id` nuevo. Lo invoca el integrador
    /// del test-runner, nunca la ruta de intercepción.
    pub fn clear(&mut self) {
        self.failed = false;
        self.pending = false;
        self.listeners.clear();
        self.trace.clear();
        self.run_id = Uuid::new_v4();
    }

    /// Marca el run como fallado. Idempotente; monotónico hasta `clear()`.
    pub fn mark_failed(&mut self) {
        self.failed = true;
    }

    /// Consulta usada por el interceptor antes de ejecutar un cuerpo.
    pub fn has_already_failed(&self) -> bool {
        self.failed
    }

    /// Marca el run como pendiente (algún step declarado no implementado).
    /// No activa la cascada de skips.
    pub fn mark_pending(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Difunde `step_started` a todos los listeners, en orden de registro,
    /// antes de devolver el control. Registra el evento en la traza.
    pub fn notify_step_started(&mut self, description: &ExecutedStepDescription) {
        self.append(StepEventKind::StepStarted { description: description.clone() });
        for listener in &self.listeners {
            if let Err(err) = listener.borrow_mut().step_started(description) {
                log::warn!("listener failed on step_started for '{description}': {err}");
            }
        }
    }

    /// Difunde `step_finished` con la clasificación terminal del step.
    pub fn notify_step_finished(&mut self, outcome: StepOutcome) {
        self.append(StepEventKind::StepFinished { outcome });
        for listener in &self.listeners {
            if let Err(err) = listener.borrow_mut().step_finished(outcome) {
                log::warn!("listener failed on step_finished ({outcome}): {err}");
            }
        }
    }

    /// Traza append-only del run actual (orden ascendente por `seq`).
    pub fn trace(&self) -> &[StepEvent] {
        &self.trace
    }

    fn append(&mut self, kind: StepEventKind) {
        let seq = self.trace.len() as u64;
        self.trace.push(StepEvent { seq,
                                    run_id: self.run_id,
                                    kind,
                                    ts: Utc::now() });
    }
}
