use tracing::debug;
use uuid::Uuid;

use crate::commands::usuarios;
use crate::db::libro;
use crate::error::Resultado;
use crate::estado::AppState;
use crate::models::{Accion, EntradaBitacora};

/// Agrega un movimiento a la bitácora del día a nombre del vendedor en
/// sesión. Sin sesión no se registra nada.
pub fn registrar_evento(state: &AppState, accion: Accion, detalles: &str) -> Resultado<()> {
    let Some(sesion) = usuarios::obtener_sesion_actual(state)? else {
        return Ok(());
    };

    let entrada = EntradaBitacora {
        id: Uuid::new_v4().to_string(),
        timestamp: state.timestamp_ms(),
        usuario: sesion.nombre,
        accion: accion.etiqueta().to_string(),
        detalles: detalles.to_string(),
    };
    debug!(accion = %entrada.accion, detalles, "Bitácora");

    let conn = state.db.conexion()?;
    libro::agregar_bitacora(&conn, &state.clave_hoy(), entrada)
}

/// Bitácora del día: completa para super administradores, propia para los demás
pub fn listar_bitacora(state: &AppState) -> Resultado<Vec<EntradaBitacora>> {
    let sesion = usuarios::verificar_sesion(state)?;
    let privilegiado = usuarios::es_privilegiado(state, &sesion);

    let conn = state.db.conexion()?;
    let entradas = libro::cargar_bitacora(&conn, &state.clave_hoy())?;
    Ok(filtrar_bitacora(entradas, &sesion.nombre, privilegiado))
}

pub fn filtrar_bitacora(
    entradas: Vec<EntradaBitacora>,
    usuario: &str,
    privilegiado: bool,
) -> Vec<EntradaBitacora> {
    if privilegiado {
        return entradas;
    }
    entradas.into_iter().filter(|e| e.usuario == usuario).collect()
}
