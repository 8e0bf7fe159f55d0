use tracing::info;

use crate::commands::usuarios;
use crate::db::libro;
use crate::error::Resultado;
use crate::estado::AppState;
use crate::models::{EstadisticasReporte, FiltroVendedor, NotaVenta, ResumenDiario, SesionActiva};

/// Notas que puede ver el vendedor: las propias, o las del filtro si es
/// super administrador.
pub fn notas_visibles(
    notas: Vec<NotaVenta>,
    sesion: &SesionActiva,
    privilegiado: bool,
    filtro: &FiltroVendedor,
) -> Vec<NotaVenta> {
    let vendedor = match (privilegiado, filtro) {
        (false, _) => Some(sesion.nombre.as_str()),
        (true, FiltroVendedor::Todos) => None,
        (true, FiltroVendedor::Vendedor(nombre)) => Some(nombre.as_str()),
    };
    match vendedor {
        Some(v) => notas.into_iter().filter(|n| n.creador == v).collect(),
        None => notas,
    }
}

/// Totales sobre las notas activas; las canceladas no cuentan
pub fn calcular_estadisticas(notas: &[NotaVenta]) -> EstadisticasReporte {
    let mut stats = EstadisticasReporte::default();
    for nota in notas.iter().filter(|n| n.esta_activa()) {
        stats.total_notas += 1;
        stats.total_pollos += nota.total_pollos();
        stats.total_kilos += nota.total_kilos();
        stats.total_facturado += nota.financieros.subtotal;
        stats.total_recaudado += nota.financieros.abono;
        *stats
            .notas_por_vendedor
            .entry(nota.creador.clone())
            .or_insert(0) += 1;
    }
    stats
}

/// Notas del día que ve el vendedor en sesión
pub(crate) fn notas_del_dia(state: &AppState, filtro: &FiltroVendedor) -> Resultado<Vec<NotaVenta>> {
    let sesion = usuarios::verificar_sesion(state)?;
    let privilegiado = usuarios::es_privilegiado(state, &sesion);
    let notas = {
        let conn = state.db.conexion()?;
        libro::cargar_notas(&conn, &state.clave_hoy())?
    };
    Ok(notas_visibles(notas, &sesion, privilegiado, filtro))
}

/// Nombre que aparece en el reporte como vendedor seleccionado
pub(crate) fn etiqueta_vendedor(state: &AppState, filtro: &FiltroVendedor) -> Resultado<String> {
    let sesion = usuarios::verificar_sesion(state)?;
    if !usuarios::es_privilegiado(state, &sesion) {
        return Ok(sesion.nombre);
    }
    Ok(match filtro {
        FiltroVendedor::Todos => "Todos".to_string(),
        FiltroVendedor::Vendedor(nombre) => nombre.clone(),
    })
}

/// Panel de resumen del día
pub fn resumen_diario(state: &AppState, filtro: &FiltroVendedor) -> Resultado<ResumenDiario> {
    let notas = notas_del_dia(state, filtro)?;
    let stats = calcular_estadisticas(&notas);
    let resumen = ResumenDiario {
        fecha: state.fecha_hoy(),
        notas: stats.total_notas,
        pollos: stats.total_pollos,
        facturado: stats.total_facturado,
        recaudado: stats.total_recaudado,
    };
    info!(notas = resumen.notas, facturado = resumen.facturado, "Resumen diario");
    Ok(resumen)
}
