//! Captura de la nota en curso. El borrador vive en el almacén para que
//! cada invocación continúe donde quedó la anterior.

use tracing::{debug, info};

use crate::commands::usuarios;
use crate::db::libro;
use crate::error::{Error, Resultado};
use crate::estado::AppState;
use crate::models::{Borrador, CampoCliente, CampoFinanciero, CampoProducto};
use crate::utils;

pub fn cargar_borrador(state: &AppState) -> Resultado<Borrador> {
    let conn = state.db.conexion()?;
    let mut borrador: Borrador =
        libro::leer_json(&conn, libro::CLAVE_BORRADOR)?.unwrap_or_default();
    if borrador.productos.is_empty() {
        borrador.agregar_producto();
    }
    Ok(borrador)
}

fn guardar_borrador(state: &AppState, borrador: &Borrador) -> Resultado<()> {
    let conn = state.db.conexion()?;
    libro::escribir_json(&conn, libro::CLAVE_BORRADOR, borrador)
}

/// Deja una nota en blanco con una sola fila
pub fn reiniciar_borrador(state: &AppState) -> Resultado<Borrador> {
    let borrador = Borrador::nuevo();
    guardar_borrador(state, &borrador)?;
    debug!("Borrador reiniciado");
    Ok(borrador)
}

/// Aplica un cambio al borrador del vendedor en sesión y lo persiste
fn modificar<F>(state: &AppState, cambio: F) -> Resultado<Borrador>
where
    F: FnOnce(&mut Borrador) -> Resultado<()>,
{
    usuarios::verificar_sesion(state)?;
    let mut borrador = cargar_borrador(state)?;
    cambio(&mut borrador)?;
    guardar_borrador(state, &borrador)?;
    Ok(borrador)
}

/// Id de la fila por posición (1 = primera)
fn id_fila(borrador: &Borrador, fila: usize) -> Resultado<String> {
    fila.checked_sub(1)
        .and_then(|i| borrador.productos.get(i))
        .map(|f| f.id.clone())
        .ok_or_else(|| Error::Validacion(format!("No existe la fila {}", fila)))
}

pub fn editar_cliente(state: &AppState, campo: CampoCliente, valor: &str) -> Resultado<Borrador> {
    modificar(state, |b| {
        b.editar_cliente(campo, valor);
        Ok(())
    })
}

pub fn agregar_producto(state: &AppState) -> Resultado<Borrador> {
    modificar(state, |b| {
        b.agregar_producto();
        Ok(())
    })
}

pub fn editar_producto(
    state: &AppState,
    fila: usize,
    campo: CampoProducto,
    valor: &str,
) -> Resultado<Borrador> {
    modificar(state, |b| {
        let id = id_fila(b, fila)?;
        b.editar_producto(&id, campo, valor);
        Ok(())
    })
}

pub fn quitar_producto(state: &AppState, fila: usize) -> Resultado<Borrador> {
    modificar(state, |b| {
        let id = id_fila(b, fila)?;
        if !b.quitar_producto(&id) {
            return Err(Error::Validacion(
                "La nota debe conservar al menos una fila".to_string(),
            ));
        }
        Ok(())
    })
}

pub fn editar_financiero(
    state: &AppState,
    campo: CampoFinanciero,
    valor: &str,
) -> Resultado<Borrador> {
    modificar(state, |b| {
        b.editar_financiero(campo, valor);
        Ok(())
    })
}

/// Escribe el enlace de mapa en la dirección del cliente
pub fn fijar_ubicacion(state: &AppState, enlace: &str) -> Resultado<Borrador> {
    let borrador = modificar(state, |b| {
        b.editar_cliente(CampoCliente::Direccion, enlace);
        Ok(())
    })?;
    info!(enlace, "Ubicación del cliente capturada");
    Ok(borrador)
}

/// Número de control que recibirá la próxima nota guardada
pub fn siguiente_numero_control(state: &AppState) -> Resultado<String> {
    let conn = state.db.conexion()?;
    let secuencia = libro::cargar_secuencia(&conn, &state.clave_hoy())?;
    Ok(utils::numero_control(secuencia, state.hoy()))
}
