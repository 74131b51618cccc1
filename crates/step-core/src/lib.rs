//! step-core: motor de intercepción de steps y despacho de eventos
//!
//! Instrumenta librerías de steps de escenarios de aceptación: cada
//! invocación de un step (incluidos sub-steps anidados) se observa, se
//! clasifica, se secuencia en un árbol de llamadas y se difunde por un bus
//! de eventos a los listeners registrados. Una vez que un step falla, los
//! steps siguientes del run se saltan en lugar de ejecutarse.

pub mod constants;
pub mod errors;
pub mod event;
pub mod intercept;
pub mod listener;
pub mod step;


pub use errors::{ConstructionError, InterceptError, ListenerError, StepFailure};
pub use event::{SharedStepEventBus, StepEvent, StepEventBus, StepEventKind};
pub use intercept::{CallDepthTracker, CallFrame, DepthGuard, SharedCallDepthTracker, StepContext, StepInterceptor};
pub use listener::{ConsoleStepListener, SharedStepListener, StepListener};
pub use step::{ExecutedStepDescription, StepLibrary, StepLibraryMetadata, StepOutcome, StepRunResult, StepSpec};

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::Value;

    use super::*;

    // Librería mínima para humo: dos steps, uno con argumento.
    struct GreetingSteps {
        greeted: Rc<RefCell<Vec<String>>>,
    }

    impl StepLibrary for GreetingSteps {
        fn metadata(&self) -> StepLibraryMetadata {
            StepLibraryMetadata::new("greetings",
                                     vec![StepSpec::new("open_session"), StepSpec::new("greet_user")])
        }

        fn run_step(&self, step: &str, args: &[Value], _ctx: &mut StepContext<'_>) -> StepRunResult {
            let detail = args.first().map(|a| a.to_string()).unwrap_or_default();
            self.greeted.borrow_mut().push(format!("{step}:{detail}"));
            StepRunResult::Success
        }
    }

    #[test]
    fn smoke_intercepted_step_runs_and_is_traced() {
        let bus = StepEventBus::new_shared();
        let tracker = CallDepthTracker::new_shared();
        let greeted = Rc::new(RefCell::new(Vec::new()));
        let steps = StepInterceptor::wrap(Rc::new(GreetingSteps { greeted: greeted.clone() }),
                                          bus.clone(),
                                          tracker.clone()).expect("interceptor should build");

        let outcome = steps.call("open_session", &[]).expect("step should run");
        assert_eq!(outcome, StepOutcome::Success);
        assert_eq!(greeted.borrow().len(), 1, "el cuerpo debe haberse ejecutado");

        let bus_ref = bus.borrow();
        let trace = bus_ref.trace();
        assert_eq!(trace.len(), 2);
        assert!(matches!(&trace[0].kind, StepEventKind::StepStarted { description }
                         if description.step_name() == "open_session"));
        assert!(matches!(&trace[1].kind, StepEventKind::StepFinished { outcome: StepOutcome::Success }));
        assert!(tracker.borrow().is_idle(), "la pila debe quedar vacía tras la llamada");
    }

    #[test]
    fn smoke_description_renders_arguments() {
        let d = ExecutedStepDescription::with_arguments("greetings", "greet_user",
                                                        &[serde_json::json!("Joe"), serde_json::json!(10)]);
        assert_eq!(d.to_string(), "greetings.greet_user(Joe, 10)");
        assert_eq!(d.arguments(), ["Joe".to_string(), "10".to_string()]);
    }
}
