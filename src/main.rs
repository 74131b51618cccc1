//! Binario demo: recorrido completo del motor con librerías de ejemplo.
//!
//! Ejecuta un escenario de compra con steps anidados, un step pendiente,
//! un fallo intencional y la cascada de skips resultante, y muestra la
//! transcripción de consola más el resumen del registro.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{json, Value};

use step_adapters::RecordingStepListener;
use step_core::{CallDepthTracker, ConsoleStepListener, StepContext, StepEventBus, StepFailure,
                StepInterceptor, StepLibrary, StepLibraryMetadata, StepRunResult, StepSpec};
use steptrace_rust::config::CONFIG;

/// Steps de pago, usados como librería anidada por `StoreSteps`.
struct CheckoutSteps;

impl StepLibrary for CheckoutSteps {
    fn metadata(&self) -> StepLibraryMetadata {
        StepLibraryMetadata::new("checkout",
                                 vec![StepSpec::new("fill_payment_details"),
                                      StepSpec::pending("apply_discount_code"),
                                      StepSpec::new("confirm_payment")])
    }

    fn run_step(&self, _step: &str, _args: &[Value], _ctx: &mut StepContext<'_>) -> StepRunResult {
        StepRunResult::Success
    }
}

/// Librería principal del escenario de compra.
struct StoreSteps {
    checkout: Rc<CheckoutSteps>,
}

impl StepLibrary for StoreSteps {
    fn metadata(&self) -> StepLibraryMetadata {
        StepLibraryMetadata::new("store",
                                 vec![StepSpec::new("search_catalog"),
                                      StepSpec::new("add_to_cart"),
                                      StepSpec::new("place_order"),
                                      StepSpec::new("expect_confirmation_mail"),
                                      StepSpec::new("rate_purchase")])
    }

    fn run_step(&self, step: &str, _args: &[Value], ctx: &mut StepContext<'_>) -> StepRunResult {
        match step {
            "place_order" => {
                for nested in ["fill_payment_details", "apply_discount_code", "confirm_payment"] {
                    if let Err(err) = ctx.run_nested("checkout", nested, &[]) {
                        return StepRunResult::Failure { error: err.into_failure() };
                    }
                }
                StepRunResult::Success
            }
            "expect_confirmation_mail" => {
                // fallo intencional para mostrar la cascada de skips
                StepRunResult::Failure { error: StepFailure::Assertion("no confirmation mail within 5s".into()) }
            }
            _ => StepRunResult::Success,
        }
    }

    fn nested(&self) -> Vec<Rc<dyn StepLibrary>> {
        vec![self.checkout.clone() as Rc<dyn StepLibrary>]
    }
}

fn main() {
    let _ = dotenvy::dotenv();

    let bus = StepEventBus::new_shared();
    let tracker = CallDepthTracker::new_shared();

    let console = Rc::new(RefCell::new(ConsoleStepListener::new()));
    let recorder = Rc::new(RefCell::new(RecordingStepListener::new()));
    bus.borrow_mut().register_listener(console.clone());
    bus.borrow_mut().register_listener(recorder.clone());

    let store = StepInterceptor::wrap(Rc::new(StoreSteps { checkout: Rc::new(CheckoutSteps) }),
                                      bus.clone(),
                                      tracker.clone()).expect("interceptor should build");

    let _ = store.call("search_catalog", &[json!("teapot")]);
    let _ = store.call("add_to_cart", &[json!("teapot"), json!(2)]);
    let _ = store.call("place_order", &[]);
    let _ = store.call("expect_confirmation_mail", &[]); // falla
    let _ = store.call("rate_purchase", &[json!(5)]); // queda en skip

    if CONFIG.demo.console_trace {
        println!("--- escenario ---");
        print!("{}", console.borrow().output());
    }

    {
        let recorder_ref = recorder.borrow();
        let record = recorder_ref.record();
        println!("--- resumen ---");
        for (description, outcome, depth) in record.finish_order() {
            println!("{}{} -> {}", "  ".repeat(*depth), description, outcome);
        }
        println!("steps: {}, con fallos: {}", record.step_count(), record.has_failures());
    }

    let bus_ref = bus.borrow();
    println!("run {} pending={} failed={}",
             bus_ref.run_id(),
             bus_ref.is_pending(),
             bus_ref.has_already_failed());
    if CONFIG.demo.dump_events {
        match serde_json::to_string_pretty(bus_ref.trace()) {
            Ok(dump) => println!("{dump}"),
            Err(err) => eprintln!("could not serialize the event trace: {err}"),
        }
    }
}
