//! Constantes del motor de trazado.
//!
//! Valores estáticos que participan en el renderizado de descripciones.
//! No afectan la lógica de skip/cascada, sólo la forma en que los
//! argumentos llegan a los listeners y a los reportes.

/// Longitud máxima (en caracteres) de un argumento renderizado dentro de
/// una `ExecutedStepDescription`. Argumentos más largos se truncan con un
/// sufijo `...` para que los reportes de consola sigan siendo legibles.
pub const MAX_ARGUMENT_LENGTH: usize = 120;
