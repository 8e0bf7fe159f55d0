pub mod libro;
pub mod schema;

use crate::error::Resultado;
use crate::models::SesionActiva;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

pub struct Database {
    pub conn: Mutex<Connection>,
}

pub struct SesionState {
    pub sesion: Mutex<Option<SesionActiva>>,
}

impl SesionState {
    pub fn vacia() -> Self {
        SesionState {
            sesion: Mutex::new(None),
        }
    }
}

impl Database {
    pub fn abrir(db_path: &Path) -> Resultado<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -8000;
             PRAGMA busy_timeout = 5000;",
        )?;

        debug!(ruta = %db_path.display(), "Base de datos abierta");
        Self::con_conexion(conn)
    }

    /// Base en memoria, para pruebas y ejecuciones desechables
    pub fn en_memoria() -> Resultado<Self> {
        Self::con_conexion(Connection::open_in_memory()?)
    }

    fn con_conexion(conn: Connection) -> Resultado<Self> {
        schema::create_tables(&conn)?;
        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn conexion(&self) -> Resultado<MutexGuard<'_, Connection>> {
        Ok(self.conn.lock()?)
    }

    /// Ruta por omisión de la base: ~/.cai-notas/cai-notas.db
    pub fn ruta_por_defecto() -> PathBuf {
        directorio_datos().join("cai-notas.db")
    }
}

/// Retorna el directorio de datos de la aplicación
pub fn directorio_datos() -> PathBuf {
    #[cfg(target_os = "windows")]
    let base = std::env::var("LOCALAPPDATA")
        .ok()
        .map(|p| PathBuf::from(p).join("CaiNotas"));
    #[cfg(not(target_os = "windows"))]
    let base = std::env::var("HOME")
        .ok()
        .map(|p| PathBuf::from(p).join(".cai-notas"));

    base.unwrap_or_else(|| PathBuf::from("."))
}
