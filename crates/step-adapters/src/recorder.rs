//! Listener de reporte: reconstruye la traza ordenada del escenario.
//!
//! A partir únicamente del stream de eventos (started/finished) arma un
//! árbol de steps con profundidades y outcomes, suficiente para render
//! posterior sin re-ejecutar nada. La profundidad se deriva del conteo de
//! steps abiertos en el momento del `step_started`.

use serde::Serialize;

use step_core::errors::ListenerError;
use step_core::step::{ExecutedStepDescription, StepOutcome};
use step_core::StepListener;

/// Un step concluido dentro del registro, con sus hijos anidados.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedStep {
    pub description: ExecutedStepDescription,
    pub depth: usize,
    pub outcome: StepOutcome,
    pub children: Vec<RecordedStep>,
}

/// Modelo de resultado de un escenario: árbol de steps raíz + log plano
/// en orden de finalización.
#[derive(Debug, Default, Clone, Serialize)]
pub struct ScenarioRecord {
    roots: Vec<RecordedStep>,
    finish_order: Vec<(ExecutedStepDescription, StepOutcome, usize)>,
}

impl ScenarioRecord {
    /// Steps de nivel raíz, en orden de ejecución.
    pub fn roots(&self) -> &[RecordedStep] {
        &self.roots
    }

    /// Log plano (descripción, outcome, profundidad) en orden de
    /// finalización: los hijos de un step aparecen antes que su padre.
    pub fn finish_order(&self) -> &[(ExecutedStepDescription, StepOutcome, usize)] {
        &self.finish_order
    }

    /// Outcomes en orden de finalización.
    pub fn outcomes(&self) -> Vec<StepOutcome> {
        self.finish_order.iter().map(|(_, o, _)| *o).collect()
    }

    /// Profundidades en orden de finalización.
    pub fn depths(&self) -> Vec<usize> {
        self.finish_order.iter().map(|(_, _, d)| *d).collect()
    }

    pub fn has_failures(&self) -> bool {
        self.finish_order.iter().any(|(_, o, _)| *o == StepOutcome::Failure)
    }

    /// Cantidad total de steps concluidos (a cualquier profundidad).
    pub fn step_count(&self) -> usize {
        self.finish_order.len()
    }
}

// Step abierto: aún sin outcome, acumulando hijos.
struct OpenStep {
    description: ExecutedStepDescription,
    depth: usize,
    children: Vec<RecordedStep>,
}

/// Acumula el stream de eventos en un `ScenarioRecord`.
#[derive(Default)]
pub struct RecordingStepListener {
    open: Vec<OpenStep>,
    record: ScenarioRecord,
}

impl RecordingStepListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> &ScenarioRecord {
        &self.record
    }

    pub fn into_record(self) -> ScenarioRecord {
        self.record
    }
}

impl StepListener for RecordingStepListener {
    fn step_started(&mut self, description: &ExecutedStepDescription) -> Result<(), ListenerError> {
        self.open.push(OpenStep { description: description.clone(),
                                  depth: self.open.len(),
                                  children: Vec::new() });
        Ok(())
    }

    fn step_finished(&mut self, outcome: StepOutcome) -> Result<(), ListenerError> {
        let open = match self.open.pop() {
            Some(open) => open,
            None => return Err(ListenerError("step_finished without a matching step_started".into())),
        };
        let step = RecordedStep { description: open.description.clone(),
                                  depth: open.depth,
                                  outcome,
                                  children: open.children };
        self.record.finish_order.push((open.description, outcome, open.depth));
        match self.open.last_mut() {
            Some(parent) => parent.children.push(step),
            None => self.record.roots.push(step),
        }
        Ok(())
    }
}
