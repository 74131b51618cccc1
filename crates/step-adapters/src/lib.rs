//! step-adapters: consumidores de referencia del bus de steps
//!
//! Este crate provee los listeners que consumen el contrato expuesto por
//! `step-core` sin meterse en los internals del motor:
//! - `RecordingStepListener`: acumula pares descripción/outcome en un
//!   modelo de resultado ordenado y con forma de árbol (`ScenarioRecord`),
//!   la semilla de cualquier reporte posterior. No renderiza ni persiste.
//! - `ScreenshotStepListener`: en cada límite de step pide una captura a
//!   un colaborador `Camera` externo, con nombres derivados de un número
//!   de secuencia monótono y un prefijo de contenido (sha2).
//!
//! Nota: el core sólo emite `step_started(description)` y
//! `step_finished(outcome)`; todo lo demás se reconstruye aquí.

pub mod recorder;
pub mod screenshots;

pub use recorder::{RecordedStep, RecordingStepListener, ScenarioRecord};
pub use screenshots::{Camera, CaptureError, ScreenshotStepListener};
