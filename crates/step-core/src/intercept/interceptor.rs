//! Interceptor de librerías de steps.
//!
//! Envuelve una instancia de `StepLibrary` (y recursivamente las librerías
//! anidadas que declara) de forma que toda invocación de un step pasa por
//! el protocolo de ciclo de vida:
//!
//! 1. construir la `ExecutedStepDescription` con los argumentos reales
//! 2. `enter` en el tracker de profundidad (pop garantizado por guard)
//! 3. `notify_step_started`
//! 4. si el run ya falló -> outcome SKIPPED, el cuerpo no se invoca
//! 5. si el step está marcado ignored/pending -> outcome correspondiente,
//!    el cuerpo no se invoca (pending no activa la cascada)
//! 6. en otro caso se invoca el cuerpo: retorno normal -> SUCCESS; fallo
//!    -> FAILURE + `mark_failed` + re-señalización del fallo original
//! 7. `notify_step_finished`
//! 8. `leave` del marco, en todos los caminos

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::errors::{ConstructionError, InterceptError};
use crate::event::SharedStepEventBus;
use crate::intercept::{DepthGuard, SharedCallDepthTracker, StepContext};
use crate::step::{ExecutedStepDescription, StepLibrary, StepLibraryMetadata, StepOutcome, StepRunResult};

pub struct StepInterceptor {
    metadata: StepLibraryMetadata,
    library: Rc<dyn StepLibrary>,
    nested: Vec<Rc<StepInterceptor>>,
    bus: SharedStepEventBus,
    tracker: SharedCallDepthTracker,
}

impl fmt::Debug for StepInterceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepInterceptor")
         .field("group", &self.metadata.group)
         .field("steps", &self.metadata.steps.len())
         .field("nested", &self.nested.len())
         .finish()
    }
}

impl StepInterceptor {
    /// Envuelve `library` y, recursivamente, todas sus librerías anidadas,
    /// compartiendo el mismo bus y tracker. Las librerías ya envueltas se
    /// memoizan por identidad de grupo, lo que además corta referencias
    /// cíclicas entre librerías.
    ///
    /// Una librería sin steps es válida: produce un interceptor sin
    /// comportamiento observable.
    pub fn wrap(library: Rc<dyn StepLibrary>,
                bus: SharedStepEventBus,
                tracker: SharedCallDepthTracker)
                -> Result<Rc<Self>, ConstructionError> {
        let mut wrapped = HashMap::new();
        let mut in_flight = HashSet::new();
        Self::wrap_with(library, &bus, &tracker, &mut wrapped, &mut in_flight)
    }

    fn wrap_with(library: Rc<dyn StepLibrary>,
                 bus: &SharedStepEventBus,
                 tracker: &SharedCallDepthTracker,
                 wrapped: &mut HashMap<String, Rc<StepInterceptor>>,
                 in_flight: &mut HashSet<String>)
                 -> Result<Rc<Self>, ConstructionError> {
        let metadata = library.metadata();
        if metadata.group.trim().is_empty() {
            return Err(ConstructionError::MissingGroupIdentity);
        }
        let mut seen = HashSet::new();
        for spec in &metadata.steps {
            if !seen.insert(spec.name.as_str()) {
                return Err(ConstructionError::DuplicateStep { group: metadata.group.clone(),
                                                              step: spec.name.clone() });
            }
        }
        if let Some(done) = wrapped.get(&metadata.group) {
            return Ok(done.clone());
        }

        in_flight.insert(metadata.group.clone());
        let mut nested = Vec::new();
        for child in library.nested() {
            let child_group = child.metadata().group;
            if in_flight.contains(&child_group) {
                // referencia cíclica: el back-edge se corta aquí
                continue;
            }
            if let Some(done) = wrapped.get(&child_group) {
                nested.push(done.clone());
                continue;
            }
            nested.push(Self::wrap_with(child, bus, tracker, wrapped, in_flight)?);
        }
        in_flight.remove(&metadata.group);

        let interceptor = Rc::new(Self { metadata,
                                         library,
                                         nested,
                                         bus: bus.clone(),
                                         tracker: tracker.clone() });
        wrapped.insert(interceptor.metadata.group.clone(), interceptor.clone());
        Ok(interceptor)
    }

    /// Identidad del grupo envuelto.
    pub fn group(&self) -> &str {
        &self.metadata.group
    }

    pub fn metadata(&self) -> &StepLibraryMetadata {
        &self.metadata
    }

    /// Interceptores de las librerías anidadas declaradas por esta.
    pub fn nested_interceptors(&self) -> &[Rc<StepInterceptor>] {
        &self.nested
    }

    /// Invoca el step `step` con los argumentos dados, aplicando el
    /// protocolo completo de intercepción.
    ///
    /// Devuelve el outcome clasificado, o re-señaliza el `StepFailure`
    /// original del cuerpo una vez hecha la contabilidad (el interceptor
    /// no suprime fallos: el caller sigue observándolos).
    pub fn call(&self, step: &str, args: &[Value]) -> Result<StepOutcome, InterceptError> {
        let spec = match self.metadata.spec(step) {
            Some(spec) => spec.clone(),
            None => {
                return Err(InterceptError::UnknownStep { group: self.metadata.group.clone(),
                                                         step: step.to_string() })
            }
        };
        let description = ExecutedStepDescription::with_arguments(&self.metadata.group, step, args);

        let _guard = DepthGuard::enter(&self.tracker, description.clone());
        self.bus.borrow_mut().notify_step_started(&description);

        let already_failed = self.bus.borrow().has_already_failed();
        let outcome = if already_failed {
            // skip preventivo: el cuerpo nunca se invoca, sin efectos
            StepOutcome::Skipped
        } else if spec.ignored {
            StepOutcome::Ignored
        } else if spec.pending {
            self.bus.borrow_mut().mark_pending();
            StepOutcome::Pending
        } else {
            let mut ctx = StepContext::new(&self.nested);
            match self.library.run_step(step, args, &mut ctx) {
                StepRunResult::Success => StepOutcome::Success,
                StepRunResult::Failure { error } => {
                    self.bus.borrow_mut().mark_failed();
                    self.bus.borrow_mut().notify_step_finished(StepOutcome::Failure);
                    // el guard hace el leave al salir de este camino también
                    return Err(InterceptError::Failure(error));
                }
            }
        };

        self.bus.borrow_mut().notify_step_finished(outcome);
        Ok(outcome)
    }
}
