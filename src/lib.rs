pub mod calculo;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod estado;
pub mod logging;
pub mod models;
pub mod pdf;
pub mod printing;
pub mod utils;

use std::path::{Path, PathBuf};
use tracing::info;

use config::Configuracion;
use db::Database;
use error::Resultado;
use estado::AppState;

/// Abre la base, carga la configuración y recupera la sesión guardada
pub fn abrir_estado(
    db_path: &Path,
    config_path: &Path,
    fuentes: Option<PathBuf>,
) -> Resultado<AppState> {
    let database = Database::abrir(db_path)?;
    let mut config = Configuracion::cargar(config_path)?;
    if fuentes.is_some() {
        config.directorio_fuentes = fuentes;
    }

    let state = AppState::new(database, config);
    if let Some(sesion) = commands::usuarios::restaurar_sesion(&state)? {
        info!(usuario = %sesion.nombre, "Sesión restaurada");
    }
    Ok(state)
}
