//! Unidad del tracker de profundidad: pila, parentesco y guard con pop
//! garantizado.

use std::rc::Rc;

use step_core::{CallDepthTracker, DepthGuard, ExecutedStepDescription};

fn d(name: &str) -> ExecutedStepDescription {
    ExecutedStepDescription::new("group", name)
}

#[test]
fn frames_record_depth_and_parent() {
    let mut tracker = CallDepthTracker::new();

    let root = tracker.enter(d("root"));
    let child = tracker.enter(d("child"));
    let grandchild = tracker.enter(d("grandchild"));

    assert_eq!(root.depth(), 0);
    assert_eq!(child.depth(), 1);
    assert_eq!(grandchild.depth(), 2);
    assert!(root.parent().is_none());
    assert!(Rc::ptr_eq(&child.parent().expect("child has parent"), &root));
    assert_eq!(grandchild.parent().expect("grandchild has parent").description().step_name(), "child");
    assert_eq!(tracker.current_depth(), 3);

    tracker.leave(&grandchild);
    tracker.leave(&child);
    assert_eq!(tracker.current_depth(), 1);
    assert!(Rc::ptr_eq(&tracker.current().expect("root still in flight"), &root));

    tracker.leave(&root);
    assert!(tracker.is_idle());
}

#[test]
fn leave_restores_the_state_before_enter() {
    let mut tracker = CallDepthTracker::new();
    let outer = tracker.enter(d("outer"));
    let _inner = tracker.enter(d("inner"));

    // sacar el marco externo devuelve la pila al estado previo a su enter,
    // aunque queden marcos internos por encima
    tracker.leave(&outer);
    assert!(tracker.is_idle());
}

#[test]
fn guard_pops_on_every_exit_path() {
    let tracker = CallDepthTracker::new_shared();

    {
        let _outer = DepthGuard::enter(&tracker, d("outer"));
        assert_eq!(tracker.borrow().current_depth(), 1);
        {
            let inner = DepthGuard::enter(&tracker, d("inner"));
            assert_eq!(inner.frame().depth(), 1);
            assert_eq!(tracker.borrow().current_depth(), 2);
        }
        assert_eq!(tracker.borrow().current_depth(), 1);
    }

    assert!(tracker.borrow().is_idle());
}

#[test]
fn guard_frame_exposes_its_description() {
    let tracker = CallDepthTracker::new_shared();
    let guard = DepthGuard::enter(&tracker, d("lonely"));
    assert_eq!(guard.frame().description().to_string(), "group.lonely");
    assert_eq!(guard.frame().depth(), 0);
}
