//! El listener de capturas pide una foto por límite de step, con nombres
//! secuenciales y prefijo derivado del contenido, y delega la captura
//! real en el colaborador `Camera`.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use step_adapters::{Camera, CaptureError, RecordingStepListener, ScreenshotStepListener};
use step_core::step::ExecutedStepDescription;
use step_core::{CallDepthTracker, StepContext, StepEventBus, StepInterceptor, StepLibrary,
                StepLibraryMetadata, StepListener, StepOutcome, StepRunResult, StepSpec};

struct FakeCamera {
    captured: Rc<RefCell<Vec<String>>>,
}

impl Camera for FakeCamera {
    fn take_screenshot(&mut self, name: &str, _subject: &ExecutedStepDescription) -> Result<(), CaptureError> {
        self.captured.borrow_mut().push(name.to_string());
        Ok(())
    }
}

struct NoCamera;

impl Camera for NoCamera {
    fn take_screenshot(&mut self, _name: &str, _subject: &ExecutedStepDescription) -> Result<(), CaptureError> {
        Err(CaptureError::Unavailable)
    }
}

struct BrokenCamera;

impl Camera for BrokenCamera {
    fn take_screenshot(&mut self, _name: &str, _subject: &ExecutedStepDescription) -> Result<(), CaptureError> {
        Err(CaptureError::Failed("disk full".into()))
    }
}

fn drive(listener: &mut impl StepListener, description: &ExecutedStepDescription) {
    listener.step_started(description).expect("started");
    listener.step_finished(StepOutcome::Success).expect("finished");
}

#[test]
fn screenshot_names_are_sequential_and_content_prefixed() {
    let captured = Rc::new(RefCell::new(Vec::new()));
    let mut listener = ScreenshotStepListener::new(FakeCamera { captured: captured.clone() });
    let description = ExecutedStepDescription::new("store", "add_to_cart");

    drive(&mut listener, &description);
    drive(&mut listener, &description);
    assert_eq!(listener.next_sequence(), 3);

    let names = captured.borrow().clone();
    assert_eq!(names.len(), 2);
    assert!(names[0].starts_with("screenshot-"));
    assert!(names[0].ends_with("-1.png"));
    assert!(names[1].ends_with("-2.png"));

    // mismo contenido -> mismo prefijo; la secuencia evita la colisión
    let prefix = |name: &str| name.rsplit_once('-').map(|(head, _)| head.to_string());
    assert_eq!(prefix(&names[0]), prefix(&names[1]));
    // prefijo de 16 hex tras "screenshot-"
    let digest = names[0].trim_start_matches("screenshot-");
    let digest = &digest[..16];
    assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn different_steps_get_different_prefixes() {
    let captured = Rc::new(RefCell::new(Vec::new()));
    let mut listener = ScreenshotStepListener::new(FakeCamera { captured: captured.clone() });

    drive(&mut listener, &ExecutedStepDescription::new("store", "add_to_cart"));
    drive(&mut listener, &ExecutedStepDescription::new("store", "place_order"));

    let names = captured.borrow().clone();
    let prefix = |name: &str| name.rsplit_once('-').map(|(head, _)| head.to_string());
    assert_ne!(prefix(&names[0]), prefix(&names[1]));
}

#[test]
fn unavailable_camera_is_not_a_listener_error() {
    let mut listener = ScreenshotStepListener::new(NoCamera);
    let description = ExecutedStepDescription::new("store", "add_to_cart");

    listener.step_started(&description).expect("started");
    assert!(listener.step_finished(StepOutcome::Success).is_ok());
}

#[test]
fn broken_camera_surfaces_as_listener_error() {
    let mut listener = ScreenshotStepListener::new(BrokenCamera);
    let description = ExecutedStepDescription::new("store", "add_to_cart");

    listener.step_started(&description).expect("started");
    assert!(listener.step_finished(StepOutcome::Success).is_err());
}

// Una cámara rota no corta el despacho al resto de listeners del bus.

struct OneStep;

impl StepLibrary for OneStep {
    fn metadata(&self) -> StepLibraryMetadata {
        StepLibraryMetadata::new("solo", vec![StepSpec::new("only_step")])
    }

    fn run_step(&self, _step: &str, _args: &[Value], _ctx: &mut StepContext<'_>) -> StepRunResult {
        StepRunResult::Success
    }
}

#[test]
fn broken_camera_does_not_block_other_listeners() {
    let bus = StepEventBus::new_shared();
    let tracker = CallDepthTracker::new_shared();
    let recorder = Rc::new(RefCell::new(RecordingStepListener::new()));
    bus.borrow_mut().register_listener(Rc::new(RefCell::new(ScreenshotStepListener::new(BrokenCamera))));
    bus.borrow_mut().register_listener(recorder.clone());

    let steps = StepInterceptor::wrap(Rc::new(OneStep), bus.clone(), tracker).expect("interceptor");
    let outcome = steps.call("only_step", &[]).expect("step runs");

    assert_eq!(outcome, StepOutcome::Success);
    assert_eq!(recorder.borrow().record().step_count(), 1);
    assert!(!bus.borrow().has_already_failed());
}
