//! Tipos de evento del ciclo de vida de steps y estructura `StepEvent`.
//!
//! Rol en el motor:
//! - Cada notificación del `StepEventBus` queda registrada en una traza
//!   append-only además de despacharse a los listeners.
//! - La traza permite reconstruir, sin re-ejecutar nada, qué steps
//!   corrieron, cuáles fallaron, cuáles se saltaron como consecuencia y
//!   cuáles quedaron pendientes.
//! - El enum `StepEventKind` define el contrato observable del motor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::step::{ExecutedStepDescription, StepOutcome};

/// Eventos de ciclo de vida soportados.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepEventKind {
    /// Un step entró en ejecución. No implica éxito.
    StepStarted { description: ExecutedStepDescription },
    /// Un step concluyó con su clasificación terminal.
    StepFinished { outcome: StepOutcome },
}

/// Evento registrado en la traza del run actual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    pub seq: u64, // asignado por el bus (orden append)
    pub run_id: Uuid,
    pub kind: StepEventKind,
    pub ts: DateTime<Utc>, // metadato de reporte (no afecta el orden)
}
