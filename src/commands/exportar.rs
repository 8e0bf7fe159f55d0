use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

use crate::commands::{bitacora, notas, reportes};
use crate::error::{Error, Resultado};
use crate::estado::AppState;
use crate::models::{Accion, EstadoNota, FiltroVendedor};
use crate::pdf::DatosReporte;

/// BOM UTF-8 para que Excel abra correctamente caracteres especiales
const BOM: &[u8] = b"\xEF\xBB\xBF";
/// Separador de columnas (punto y coma para Excel en español)
const SEP: &str = ";";

/// Marca de exportación en curso. Se libera al salir del alcance, haya
/// terminado bien o con error.
pub struct GuardaExportacion<'a> {
    bandera: &'a AtomicBool,
}

impl<'a> GuardaExportacion<'a> {
    pub fn tomar(bandera: &'a AtomicBool) -> Resultado<Self> {
        bandera
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::ExportacionEnCurso)?;
        Ok(GuardaExportacion { bandera })
    }
}

impl Drop for GuardaExportacion<'_> {
    fn drop(&mut self) {
        self.bandera.store(false, Ordering::Release);
    }
}

/// Registra el fallo de una exportación antes de devolverlo
pub(crate) fn reportar<T>(que: &str, resultado: Resultado<T>) -> Resultado<T> {
    if let Err(e) = &resultado {
        error!(exportacion = que, error = %e, "Falló la exportación");
    }
    resultado
}

fn escribir(destino: &Path, nombre: &str, bytes: &[u8]) -> Resultado<PathBuf> {
    std::fs::create_dir_all(destino)?;
    let ruta = destino.join(nombre);
    std::fs::write(&ruta, bytes)?;
    Ok(ruta)
}

/// Guarda la nota en captura y genera su PDF `Nota_<control>.pdf`
pub fn exportar_nota_pdf(state: &AppState, destino: &Path) -> Resultado<PathBuf> {
    let _guarda = GuardaExportacion::tomar(&state.exportando)?;
    reportar("nota", generar_nota_pdf(state, destino))
}

fn generar_nota_pdf(state: &AppState, destino: &Path) -> Resultado<PathBuf> {
    let nota = notas::guardar_nota(state)?;
    let bytes = state.renderizador.nota(&nota, &state.config.empresa)?;
    let ruta = escribir(destino, &format!("Nota_{}.pdf", nota.numero_control), &bytes)?;

    bitacora::registrar_evento(
        state,
        Accion::Exportar,
        &format!("PDF Nota {}", nota.numero_control),
    )?;
    info!(ruta = %ruta.display(), "Nota exportada");
    Ok(ruta)
}

/// Reporte consolidado del día: resumen más una página por nota visible
pub fn exportar_reporte_pdf(
    state: &AppState,
    filtro: &FiltroVendedor,
    destino: &Path,
) -> Resultado<PathBuf> {
    let _guarda = GuardaExportacion::tomar(&state.exportando)?;
    reportar("reporte", generar_reporte_pdf(state, filtro, destino))
}

fn generar_reporte_pdf(
    state: &AppState,
    filtro: &FiltroVendedor,
    destino: &Path,
) -> Resultado<PathBuf> {
    let notas = reportes::notas_del_dia(state, filtro)?;
    let estadisticas = reportes::calcular_estadisticas(&notas);
    let vendedor = reportes::etiqueta_vendedor(state, filtro)?;
    let fecha = state.fecha_hoy();

    let bytes = state.renderizador.reporte(&DatosReporte {
        empresa: &state.config.empresa,
        fecha: &fecha,
        vendedor: &vendedor,
        estadisticas: &estadisticas,
        notas: &notas,
    })?;
    let ruta = escribir(destino, &format!("Reporte_{}.pdf", state.clave_hoy()), &bytes)?;

    bitacora::registrar_evento(state, Accion::Reporte, "Consolidado generado")?;
    info!(ruta = %ruta.display(), notas = notas.len(), "Reporte exportado");
    Ok(ruta)
}

fn escapar_csv(valor: &str) -> String {
    if valor.contains(';') || valor.contains('"') || valor.contains('\n') {
        format!("\"{}\"", valor.replace('"', "\"\""))
    } else {
        valor.to_string()
    }
}

/// Notas visibles del día en CSV (`Notas_<DDMMAAAA>.csv`)
pub fn exportar_notas_csv(
    state: &AppState,
    filtro: &FiltroVendedor,
    destino: &Path,
) -> Resultado<PathBuf> {
    let _guarda = GuardaExportacion::tomar(&state.exportando)?;
    reportar("csv", generar_notas_csv(state, filtro, destino))
}

fn generar_notas_csv(
    state: &AppState,
    filtro: &FiltroVendedor,
    destino: &Path,
) -> Resultado<PathBuf> {
    let notas = reportes::notas_del_dia(state, filtro)?;

    let mut contenido: Vec<u8> = Vec::new();
    contenido.write_all(BOM)?;
    let headers = [
        "Control", "Fecha", "Cliente", "Telefono", "Vendedor", "Pollos", "Kilos",
        "Total Nota", "Descuento", "Reposicion", "Devolucion", "Subtotal",
        "Saldo Anterior", "Abono", "Saldo Final", "Estado",
    ];
    writeln!(contenido, "{}", headers.join(SEP))?;

    for nota in &notas {
        let f = &nota.financieros;
        let estado = match nota.estado {
            EstadoNota::Activa => "ACTIVA",
            EstadoNota::Cancelada => "CANCELADA",
        };
        let fila = [
            nota.numero_control.clone(),
            nota.fecha.clone(),
            nota.cliente.nombre_o_publico().to_string(),
            nota.cliente.telefono.clone(),
            nota.creador.clone(),
            format!("{:.0}", nota.total_pollos()),
            format!("{:.2}", nota.total_kilos()),
            format!("{:.2}", f.total_nota),
            format!("{:.2}", f.descuento),
            format!("{:.2}", f.reposicion),
            format!("{:.2}", f.devolucion),
            format!("{:.2}", f.subtotal),
            format!("{:.2}", f.saldo_anterior),
            format!("{:.2}", f.abono),
            format!("{:.2}", f.saldo_final),
            estado.to_string(),
        ];
        let linea: Vec<String> = fila.iter().map(|v| escapar_csv(v)).collect();
        writeln!(contenido, "{}", linea.join(SEP))?;
    }

    let ruta = escribir(destino, &format!("Notas_{}.csv", state.clave_hoy()), &contenido)?;
    bitacora::registrar_evento(
        state,
        Accion::ExportarCsv,
        &format!("{} notas exportadas", notas.len()),
    )?;
    info!(ruta = %ruta.display(), notas = notas.len(), "CSV exportado");
    Ok(ruta)
}
