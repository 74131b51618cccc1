//! Configuración central de la aplicación demo.
//! Carga variables de entorno (`.env` vía dotenvy en el binario) y expone
//! una estructura inmutable (`CONFIG`).

use once_cell::sync::Lazy;
use std::env;

/// Configuración global de la aplicación (extensible para más secciones).
pub struct AppConfig {
    /// Opciones del recorrido demo.
    pub demo: DemoConfig,
}

/// Opciones del binario de demostración.
pub struct DemoConfig {
    /// Imprimir la transcripción del listener de consola.
    pub console_trace: bool,
    /// Volcar la traza de eventos completa en JSON al final.
    pub dump_events: bool,
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    let console_trace = env::var("STEPTRACE_CONSOLE").map(|v| v != "0").unwrap_or(true);
    let dump_events = env::var("STEPTRACE_DUMP_EVENTS").map(|v| v == "1").unwrap_or(false);
    AppConfig { demo: DemoConfig { console_trace, dump_events } }
});
