use tracing::info;
use uuid::Uuid;

use crate::commands::{bitacora, borrador, reportes, usuarios};
use crate::db::libro;
use crate::error::{Error, Resultado};
use crate::estado::AppState;
use crate::models::{Accion, EstadoNota, FiltroVendedor, NotaVenta};
use crate::printing;
use crate::utils;

/// Guarda el borrador como nota del día con el siguiente número de control.
/// El borrador no se limpia: puede seguir exportándose o compartiéndose.
pub fn guardar_nota(state: &AppState) -> Resultado<NotaVenta> {
    let sesion = usuarios::verificar_sesion(state)?;
    let borrador = borrador::cargar_borrador(state)?;
    let hoy = state.hoy();
    let fecha = utils::fecha_visible(hoy);
    let timestamp = state.timestamp_ms();

    let nota = {
        let conn = state.db.conexion()?;
        libro::registrar_nota(&conn, &utils::fecha_clave(hoy), |secuencial| NotaVenta {
            id: Uuid::new_v4().to_string(),
            numero_control: utils::numero_control(secuencial, hoy),
            secuencial,
            fecha,
            cliente: borrador.cliente,
            productos: borrador.productos,
            financieros: borrador.financieros,
            timestamp,
            creador: sesion.nombre,
            estado: EstadoNota::Activa,
            motivo_cancelacion: None,
        })?
    };

    bitacora::registrar_evento(
        state,
        Accion::CrearNota,
        &format!(
            "Nota {} para {}",
            nota.numero_control,
            nota.cliente.nombre_o_publico()
        ),
    )?;
    info!(
        control = %nota.numero_control,
        vendedor = %nota.creador,
        total = nota.financieros.subtotal,
        "Nota guardada"
    );
    Ok(nota)
}

/// Atajo "nueva nota": guarda sólo si hay algo capturado y deja la captura en blanco
pub fn nueva_nota(state: &AppState) -> Resultado<Option<NotaVenta>> {
    usuarios::verificar_sesion(state)?;
    let guardada = if borrador::cargar_borrador(state)?.tiene_datos() {
        Some(guardar_nota(state)?)
    } else {
        None
    };
    borrador::reiniciar_borrador(state)?;
    Ok(guardada)
}

/// Notas del día visibles para el vendedor en sesión, la más reciente primero
pub fn listar_notas_dia(state: &AppState, filtro: &FiltroVendedor) -> Resultado<Vec<NotaVenta>> {
    reportes::notas_del_dia(state, filtro)
}

/// Texto para mensajería con el número de control que tendrá la nota
pub fn compartir_nota(state: &AppState) -> Resultado<String> {
    let sesion = usuarios::verificar_sesion(state)?;
    let borrador = borrador::cargar_borrador(state)?;
    let control = borrador::siguiente_numero_control(state)?;

    let texto = printing::texto_compartir(&borrador, &control, &state.fecha_hoy(), &sesion.nombre);
    bitacora::registrar_evento(
        state,
        Accion::Compartir,
        &format!("Copiado texto de nota {}", control),
    )?;
    Ok(texto)
}

/// Cancela una nota del día. Reservado a super administradores.
pub fn cancelar_nota(state: &AppState, control: &str, motivo: &str) -> Resultado<NotaVenta> {
    usuarios::verificar_admin(state)?;
    let clave = state.clave_hoy();

    let cancelada = {
        let conn = state.db.conexion()?;
        let mut notas = libro::cargar_notas(&conn, &clave)?;
        let nota = notas
            .iter_mut()
            .find(|n| n.numero_control == control)
            .ok_or_else(|| Error::NotaNoEncontrada(control.to_string()))?;
        nota.cancelar(motivo)?;
        let cancelada = nota.clone();
        libro::guardar_notas(&conn, &clave, &notas)?;
        cancelada
    };

    bitacora::registrar_evento(
        state,
        Accion::CancelarNota,
        &format!("Nota {}: {}", control, motivo.trim()),
    )?;
    info!(control, "Nota cancelada");
    Ok(cancelada)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::pruebas::estado_prueba;
    use crate::models::{CampoCliente, CampoProducto};

    fn capturar(state: &AppState, cliente: &str, bruto: &str, precio: &str) {
        borrador::editar_cliente(state, CampoCliente::Nombre, cliente).unwrap();
        borrador::editar_producto(state, 1, CampoProducto::PesoBruto, bruto).unwrap();
        borrador::editar_producto(state, 1, CampoProducto::Precio, precio).unwrap();
    }

    #[test]
    fn test_guardar_sin_sesion_no_crea_nada() {
        let state = estado_prueba();
        assert!(matches!(guardar_nota(&state), Err(Error::SinSesion)));
        let conn = state.db.conexion().unwrap();
        assert_eq!(libro::cargar_secuencia(&conn, &state.clave_hoy()).unwrap(), 1);
        assert!(libro::cargar_notas(&conn, &state.clave_hoy()).unwrap().is_empty());
    }

    #[test]
    fn test_guardar_nota() {
        let state = estado_prueba();
        usuarios::iniciar_sesion(&state, "Vendedora Uno", "uno123").unwrap();
        capturar(&state, "Pollería Lupita", "22", "40");

        let nota = guardar_nota(&state).unwrap();
        assert_eq!(nota.numero_control, "CAI00125122024");
        assert_eq!(nota.fecha, "25/12/2024");
        assert_eq!(nota.creador, "Vendedora Uno");
        assert_eq!(nota.financieros.total_nota, 880.0);

        let conn = state.db.conexion().unwrap();
        assert_eq!(libro::cargar_secuencia(&conn, &state.clave_hoy()).unwrap(), 2);
        drop(conn);

        let bitacora = bitacora::listar_bitacora(&state).unwrap();
        assert_eq!(bitacora[0].accion, "Crear Nota");
        assert_eq!(bitacora[0].detalles, "Nota CAI00125122024 para Pollería Lupita");
    }

    #[test]
    fn test_nota_en_blanco_se_puede_guardar() {
        let state = estado_prueba();
        usuarios::iniciar_sesion(&state, "Vendedora Uno", "uno123").unwrap();
        let nota = guardar_nota(&state).unwrap();
        assert_eq!(nota.financieros.total_nota, 0.0);
        let bitacora = bitacora::listar_bitacora(&state).unwrap();
        assert!(bitacora[0].detalles.ends_with("para Público General"));
    }

    #[test]
    fn test_nueva_nota_omite_captura_vacia() {
        let state = estado_prueba();
        usuarios::iniciar_sesion(&state, "Vendedora Uno", "uno123").unwrap();
        assert!(nueva_nota(&state).unwrap().is_none());

        capturar(&state, "", "10", "45");
        let guardada = nueva_nota(&state).unwrap().unwrap();
        assert_eq!(guardada.financieros.total_nota, 450.0);
        assert!(!borrador::cargar_borrador(&state).unwrap().tiene_datos());
        assert_eq!(
            borrador::siguiente_numero_control(&state).unwrap(),
            "CAI00225122024"
        );
    }

    #[test]
    fn test_compartir_usa_siguiente_control() {
        let state = estado_prueba();
        usuarios::iniciar_sesion(&state, "Vendedora Uno", "uno123").unwrap();
        capturar(&state, "Rosa", "10", "40");

        let texto = compartir_nota(&state).unwrap();
        assert!(texto.contains("*Control:* CAI00125122024"));
        assert!(texto.contains("*Cliente:* Rosa"));
        assert!(texto.ends_with("_Le atendió: Vendedora Uno_"));

        let bitacora = bitacora::listar_bitacora(&state).unwrap();
        assert_eq!(bitacora[0].detalles, "Copiado texto de nota CAI00125122024");
    }

    #[test]
    fn test_cancelar_nota() {
        let state = estado_prueba();
        usuarios::iniciar_sesion(&state, "Vendedora Uno", "uno123").unwrap();
        capturar(&state, "Rosa", "10", "40");
        let nota = guardar_nota(&state).unwrap();

        assert!(matches!(
            cancelar_nota(&state, &nota.numero_control, "duplicada"),
            Err(Error::SinPermiso)
        ));

        usuarios::iniciar_sesion(&state, "Jefa", "jefa456").unwrap();
        assert!(matches!(
            cancelar_nota(&state, "CAI99925122024", "duplicada"),
            Err(Error::NotaNoEncontrada(_))
        ));
        let cancelada = cancelar_nota(&state, &nota.numero_control, "duplicada").unwrap();
        assert_eq!(cancelada.estado, EstadoNota::Cancelada);

        let notas = listar_notas_dia(&state, &FiltroVendedor::Todos).unwrap();
        assert_eq!(notas[0].motivo_cancelacion.as_deref(), Some("duplicada"));
        let resumen = reportes::resumen_diario(&state, &FiltroVendedor::Todos).unwrap();
        assert_eq!(resumen.notas, 0);
    }
}
