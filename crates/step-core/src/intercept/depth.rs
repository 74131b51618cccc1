//! Pila de marcos de llamada del hilo lógico que ejecuta steps.
//!
//! La profundidad se usa sólo para reporte/indentación en listeners; no
//! tiene efecto sobre la lógica de skip/cascada. Invariantes:
//! - La pila activa forma un único camino con raíz (sin hermanos abiertos
//!   a la vez dentro de un hilo lógico).
//! - Todo marco empujado se saca exactamente una vez, incluso cuando el
//!   cuerpo envuelto falla: `DepthGuard` garantiza el pop en cada camino
//!   de salida (retorno normal, fallo o skip preventivo).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::step::ExecutedStepDescription;

/// Handle compartido del tracker dentro de un escenario.
pub type SharedCallDepthTracker = Rc<RefCell<CallDepthTracker>>;

/// Un marco de llamada en el árbol de steps en vuelo.
#[derive(Debug)]
pub struct CallFrame {
    description: ExecutedStepDescription,
    depth: usize,
    parent: Option<Weak<CallFrame>>,
}

impl CallFrame {
    pub fn description(&self) -> &ExecutedStepDescription {
        &self.description
    }

    /// Profundidad del marco: padre + 1, raíz = 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Marco que encierra a éste, si sigue en vuelo.
    pub fn parent(&self) -> Option<Rc<CallFrame>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }
}

/// Mantiene la pila de invocaciones en vuelo de un hilo de ejecución.
#[derive(Debug, Default)]
pub struct CallDepthTracker {
    stack: Vec<Rc<CallFrame>>,
}

impl CallDepthTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_shared() -> SharedCallDepthTracker {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Empuja un marco hijo del tope actual (o raíz si la pila está vacía)
    /// y lo devuelve con su profundidad ya registrada.
    pub fn enter(&mut self, description: ExecutedStepDescription) -> Rc<CallFrame> {
        let parent = self.stack.last().map(Rc::downgrade);
        let frame = Rc::new(CallFrame { description,
                                        depth: self.stack.len(),
                                        parent });
        self.stack.push(frame.clone());
        frame
    }

    /// Saca la pila de vuelta al estado previo al `enter` de `frame`.
    /// Debe invocarse exactamente una vez por `enter`; `DepthGuard` se
    /// encarga de eso.
    pub fn leave(&mut self, frame: &Rc<CallFrame>) {
        while let Some(top) = self.stack.pop() {
            if Rc::ptr_eq(&top, frame) {
                break;
            }
        }
    }

    /// Profundidad que recibiría el próximo `enter`.
    pub fn current_depth(&self) -> usize {
        self.stack.len()
    }

    /// Marco en vuelo más interno, si lo hay.
    pub fn current(&self) -> Option<Rc<CallFrame>> {
        self.stack.last().cloned()
    }

    /// true si no queda ningún marco en vuelo.
    pub fn is_idle(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Adquisición con ámbito de un marco: el pop está garantizado al salir
/// del ámbito, sea cual sea el camino (retorno, fallo o skip).
pub struct DepthGuard {
    tracker: SharedCallDepthTracker,
    frame: Rc<CallFrame>,
}

impl DepthGuard {
    pub fn enter(tracker: &SharedCallDepthTracker, description: ExecutedStepDescription) -> Self {
        let frame = tracker.borrow_mut().enter(description);
        Self { tracker: tracker.clone(), frame }
    }

    pub fn frame(&self) -> &Rc<CallFrame> {
        &self.frame
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.tracker.borrow_mut().leave(&self.frame);
    }
}
