//! Inicialización del logging de diagnóstico (independiente de la bitácora)

use std::path::Path;
use tracing_subscriber::EnvFilter;

pub const FILTRO_POR_DEFECTO: &str = "cai_notas=info";

/// Inicializa el logger. `RUST_LOG` tiene prioridad sobre `nivel`.
pub fn init_logger(nivel: Option<&str>, dir_logs: Option<&Path>) {
    let filtro = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(nivel.unwrap_or(FILTRO_POR_DEFECTO)));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filtro)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = dir_logs {
        if dir.is_dir() {
            let archivo = tracing_appender::rolling::daily(dir, "cai-notas.log");
            subscriber.with_ansi(false).with_writer(archivo).init();
            return;
        }
    }

    // stdout queda para la salida de los comandos
    subscriber.with_writer(std::io::stderr).init();
}
