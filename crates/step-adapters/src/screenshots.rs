//! Captura en límites de step (subsistema de fotografía externo).
//!
//! El core sólo necesita invocar el hook "en el límite del step"; la
//! captura real y la persistencia en disco viven detrás del trait
//! `Camera`. Los nombres de captura se derivan de un número de secuencia
//! monótono (resistente a colisiones dentro del listener) y un prefijo
//! calculado del contenido de la descripción del step.

use sha2::{Digest, Sha256};
use thiserror::Error;

use step_core::errors::ListenerError;
use step_core::step::{ExecutedStepDescription, StepOutcome};
use step_core::StepListener;

/// Colaborador que sabe capturar el estado actual (navegador, UI, etc.).
pub trait Camera {
    fn take_screenshot(&mut self, name: &str, subject: &ExecutedStepDescription) -> Result<(), CaptureError>;
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CaptureError {
    /// El colaborador no puede capturar en este momento (p. ej. el driver
    /// no soporta screenshots). No es un fallo del listener.
    #[error("capture unavailable")]
    Unavailable,
    #[error("capture failed: {0}")]
    Failed(String),
}

/// Listener que pide una captura al concluir cada step.
pub struct ScreenshotStepListener<C: Camera> {
    camera: C,
    sequence: u64,
    open: Vec<ExecutedStepDescription>,
}

impl<C: Camera> ScreenshotStepListener<C> {
    pub fn new(camera: C) -> Self {
        Self { camera, sequence: 0, open: Vec::new() }
    }

    /// Número de secuencia de la próxima captura (monótono, empieza en 1).
    pub fn next_sequence(&self) -> u64 {
        self.sequence + 1
    }

    fn next_screenshot_name(&mut self, subject: &ExecutedStepDescription) -> String {
        self.sequence += 1;
        format!("screenshot-{}-{}.png", digest_prefix(&subject.to_string()), self.sequence)
    }
}

impl<C: Camera> StepListener for ScreenshotStepListener<C> {
    fn step_started(&mut self, description: &ExecutedStepDescription) -> Result<(), ListenerError> {
        self.open.push(description.clone());
        Ok(())
    }

    fn step_finished(&mut self, _outcome: StepOutcome) -> Result<(), ListenerError> {
        let subject = match self.open.pop() {
            Some(subject) => subject,
            None => return Err(ListenerError("step_finished without a matching step_started".into())),
        };
        let name = self.next_screenshot_name(&subject);
        match self.camera.take_screenshot(&name, &subject) {
            Ok(()) => Ok(()),
            Err(CaptureError::Unavailable) => {
                // sin cámara disponible no hay captura, pero tampoco fallo
                log::debug!("no screenshot for '{subject}': camera unavailable");
                Ok(())
            }
            Err(err) => Err(ListenerError(err.to_string())),
        }
    }
}

/// Prefijo derivado del contenido: primeros 16 hex del SHA-256 del texto.
fn digest_prefix(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut hex = String::with_capacity(16);
    for byte in digest.iter().take(8) {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}
