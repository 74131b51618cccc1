//! Contexto entregado al cuerpo de un step en ejecución.
//!
//! Da acceso a las librerías anidadas YA interceptadas, de modo que una
//! llamada anidada entra y sale por el mismo bus y el mismo tracker que la
//! llamada padre: los eventos del padre encierran a los de sus hijos y la
//! regla de skip-tras-fallo aplica uniformemente en todo el árbol.

use serde_json::Value;

use std::rc::Rc;

use crate::errors::InterceptError;
use crate::intercept::StepInterceptor;
use crate::step::StepOutcome;

pub struct StepContext<'a> {
    nested: &'a [Rc<StepInterceptor>],
}

impl<'a> StepContext<'a> {
    pub(crate) fn new(nested: &'a [Rc<StepInterceptor>]) -> Self {
        Self { nested }
    }

    /// Interceptor de una librería anidada, por identidad de grupo.
    pub fn nested(&self, group: &str) -> Option<&Rc<StepInterceptor>> {
        self.nested.iter().find(|i| i.group() == group)
    }

    /// Invoca un step de una librería anidada a través de la intercepción.
    ///
    /// El fallo de un step anidado llega aquí con su identidad original;
    /// el cuerpo del padre decide si lo re-propaga como fallo propio
    /// (`InterceptError::into_failure`) o lo absorbe.
    pub fn run_nested(&mut self, group: &str, step: &str, args: &[Value]) -> Result<StepOutcome, InterceptError> {
        match self.nested(group) {
            Some(interceptor) => interceptor.call(step, args),
            None => Err(InterceptError::UnknownGroup { group: group.to_string() }),
        }
    }
}
