use tracing::{info, warn};

use crate::commands::{bitacora, borrador};
use crate::db::libro;
use crate::error::{Error, Resultado};
use crate::estado::AppState;
use crate::models::{Accion, SesionActiva};

/// Verifica nombre y clave contra el directorio.
/// Si coinciden, establece la sesión activa y reinicia la captura.
pub fn iniciar_sesion(state: &AppState, nombre: &str, clave: &str) -> Resultado<SesionActiva> {
    let nombre = nombre.trim();
    if nombre.is_empty() || clave.is_empty() {
        return Err(Error::CredencialesIncompletas);
    }

    let Some(nueva_sesion) = state.config.directorio.autenticar(nombre, clave) else {
        warn!(usuario = nombre, "Intento de acceso fallido");
        return Err(Error::CredencialesInvalidas);
    };

    {
        let mut sesion_guard = state.sesion.sesion.lock()?;
        *sesion_guard = Some(nueva_sesion.clone());
    }
    {
        let conn = state.db.conexion()?;
        libro::escribir_json(&conn, libro::CLAVE_SESION, &nueva_sesion)?;
    }

    borrador::reiniciar_borrador(state)?;
    bitacora::registrar_evento(
        state,
        Accion::InicioSesion,
        &format!("Usuario {} accedió", nueva_sesion.nombre),
    )?;

    info!(usuario = %nueva_sesion.nombre, "Sesión iniciada");
    Ok(nueva_sesion)
}

/// Cierra la sesión activa. Registra la salida antes de olvidar al vendedor.
pub fn cerrar_sesion(state: &AppState) -> Resultado<()> {
    let Some(sesion) = obtener_sesion_actual(state)? else {
        return Ok(());
    };

    bitacora::registrar_evento(state, Accion::CerrarSesion, "Salida del sistema")?;

    {
        let mut sesion_guard = state.sesion.sesion.lock()?;
        *sesion_guard = None;
    }
    {
        let conn = state.db.conexion()?;
        libro::borrar(&conn, libro::CLAVE_SESION)?;
    }
    borrador::reiniciar_borrador(state)?;

    info!(usuario = %sesion.nombre, "Sesión cerrada");
    Ok(())
}

/// Retorna la sesión activa (o None si no hay)
pub fn obtener_sesion_actual(state: &AppState) -> Resultado<Option<SesionActiva>> {
    let sesion_guard = state.sesion.sesion.lock()?;
    Ok(sesion_guard.clone())
}

/// Recupera la sesión guardada al arrancar. Una sesión ilegible o de un
/// vendedor que ya no está en el directorio se descarta.
pub fn restaurar_sesion(state: &AppState) -> Resultado<Option<SesionActiva>> {
    let guardada: Option<SesionActiva> = {
        let conn = state.db.conexion()?;
        let guardada: Option<SesionActiva> = libro::leer_json(&conn, libro::CLAVE_SESION)?;
        if let Some(s) = &guardada {
            if !state.config.directorio.nombres().contains(&s.nombre.as_str()) {
                warn!(usuario = %s.nombre, "Sesión guardada de un vendedor desconocido, se descarta");
                libro::borrar(&conn, libro::CLAVE_SESION)?;
                return Ok(None);
            }
        }
        guardada
    };

    let mut sesion_guard = state.sesion.sesion.lock()?;
    *sesion_guard = guardada.clone();
    Ok(guardada)
}

/// Sesión obligatoria para operar
pub fn verificar_sesion(state: &AppState) -> Resultado<SesionActiva> {
    obtener_sesion_actual(state)?.ok_or(Error::SinSesion)
}

/// El vendedor de la sesión ve las notas de todo el personal
pub fn es_privilegiado(state: &AppState, sesion: &SesionActiva) -> bool {
    state.config.directorio.es_super_admin(&sesion.nombre)
}

/// Sesión de super administrador obligatoria
pub fn verificar_admin(state: &AppState) -> Resultado<SesionActiva> {
    let sesion = verificar_sesion(state)?;
    if !es_privilegiado(state, &sesion) {
        return Err(Error::SinPermiso);
    }
    Ok(sesion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::pruebas::estado_prueba;
    use crate::models::Rol;

    #[test]
    fn test_iniciar_sesion() {
        let state = estado_prueba();
        assert!(matches!(
            iniciar_sesion(&state, "", "x"),
            Err(Error::CredencialesIncompletas)
        ));
        assert!(matches!(
            iniciar_sesion(&state, "Vendedora Uno", "mala"),
            Err(Error::CredencialesInvalidas)
        ));
        assert!(obtener_sesion_actual(&state).unwrap().is_none());

        let sesion = iniciar_sesion(&state, "Vendedora Uno", "uno123").unwrap();
        assert_eq!(sesion.rol, Rol::User);
        assert_eq!(verificar_sesion(&state).unwrap(), sesion);
        assert!(matches!(verificar_admin(&state), Err(Error::SinPermiso)));

        let bitacora = bitacora::listar_bitacora(&state).unwrap();
        assert_eq!(bitacora.len(), 1);
        assert_eq!(bitacora[0].accion, "Inicio de Sesión");
        assert_eq!(bitacora[0].detalles, "Usuario Vendedora Uno accedió");
    }

    #[test]
    fn test_cerrar_sesion_registra_antes_de_salir() {
        let state = estado_prueba();
        iniciar_sesion(&state, "Jefa", "jefa456").unwrap();
        cerrar_sesion(&state).unwrap();
        assert!(obtener_sesion_actual(&state).unwrap().is_none());

        let conn = state.db.conexion().unwrap();
        let entradas = libro::cargar_bitacora(&conn, &state.clave_hoy()).unwrap();
        assert_eq!(entradas[0].accion, "Cerrar Sesión");
        assert_eq!(entradas[0].usuario, "Jefa");
        assert!(libro::leer_json::<SesionActiva>(&conn, libro::CLAVE_SESION)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_restaurar_sesion() {
        let state = estado_prueba();
        iniciar_sesion(&state, "Jefa", "jefa456").unwrap();
        *state.sesion.sesion.lock().unwrap() = None;

        let restaurada = restaurar_sesion(&state).unwrap().unwrap();
        assert_eq!(restaurada.nombre, "Jefa");
        assert!(verificar_admin(&state).is_ok());
    }

    #[test]
    fn test_restaurar_sesion_corrupta() {
        let state = estado_prueba();
        {
            let conn = state.db.conexion().unwrap();
            conn.execute(
                "INSERT INTO almacen (clave, valor) VALUES (?1, 'no-json')",
                [libro::CLAVE_SESION],
            )
            .unwrap();
        }
        assert!(restaurar_sesion(&state).unwrap().is_none());

        let conn = state.db.conexion().unwrap();
        let quedan: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM almacen WHERE clave = ?1",
                [libro::CLAVE_SESION],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(quedan, 0);
    }

    #[test]
    fn test_restaurar_sesion_de_desconocido() {
        let state = estado_prueba();
        {
            let conn = state.db.conexion().unwrap();
            let fantasma = SesionActiva {
                nombre: "Fantasma".to_string(),
                rol: Rol::Admin,
            };
            libro::escribir_json(&conn, libro::CLAVE_SESION, &fantasma).unwrap();
        }
        assert!(restaurar_sesion(&state).unwrap().is_none());
        assert!(obtener_sesion_actual(&state).unwrap().is_none());
    }
}
