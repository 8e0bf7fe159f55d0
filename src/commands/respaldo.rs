//! Respaldo del día en ZIP: resumen más un PDF por nota

use std::collections::HashSet;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::commands::exportar::{reportar, GuardaExportacion};
use crate::commands::{bitacora, reportes};
use crate::error::Resultado;
use crate::estado::AppState;
use crate::models::{Accion, FiltroVendedor};
use crate::pdf::DatosReporte;

pub const NOMBRE_RESUMEN: &str = "Resumen_Ventas.pdf";

/// Arma el ZIP en memoria. Todo va dentro de `Ventas_<fecha>/`, sin
/// entradas de directorio. Un número de control repetido recibe sufijo
/// `_2`, `_3`... para que cada nota conserve su PDF.
pub fn empaquetar_respaldo(
    fecha_clave: &str,
    resumen: &[u8],
    notas: &[(String, Vec<u8>)],
) -> Resultado<Vec<u8>> {
    let carpeta = format!("Ventas_{}", fecha_clave);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    zip.start_file(format!("{}/{}", carpeta, NOMBRE_RESUMEN), options)?;
    zip.write_all(resumen)?;

    let mut usados = HashSet::new();
    for (control, bytes) in notas {
        let mut nombre = format!("{}/Nota_{}.pdf", carpeta, control);
        let mut copia = 1;
        while !usados.insert(nombre.clone()) {
            copia += 1;
            nombre = format!("{}/Nota_{}_{}.pdf", carpeta, control, copia);
        }
        zip.start_file(nombre, options)?;
        zip.write_all(bytes)?;
    }

    Ok(zip.finish()?.into_inner())
}

/// Genera `CAI_Backup_<DDMMAAAA>.zip` con las notas visibles del día
pub fn exportar_respaldo_zip(
    state: &AppState,
    filtro: &FiltroVendedor,
    destino: &Path,
) -> Resultado<PathBuf> {
    let _guarda = GuardaExportacion::tomar(&state.exportando)?;
    reportar("zip", generar_respaldo_zip(state, filtro, destino))
}

fn generar_respaldo_zip(
    state: &AppState,
    filtro: &FiltroVendedor,
    destino: &Path,
) -> Resultado<PathBuf> {
    let notas = reportes::notas_del_dia(state, filtro)?;
    let estadisticas = reportes::calcular_estadisticas(&notas);
    let vendedor = reportes::etiqueta_vendedor(state, filtro)?;
    let fecha = state.fecha_hoy();
    let clave = state.clave_hoy();

    let resumen = state.renderizador.resumen(&DatosReporte {
        empresa: &state.config.empresa,
        fecha: &fecha,
        vendedor: &vendedor,
        estadisticas: &estadisticas,
        notas: &notas,
    })?;

    let mut pdfs = Vec::with_capacity(notas.len());
    for nota in &notas {
        let bytes = state.renderizador.nota(nota, &state.config.empresa)?;
        pdfs.push((nota.numero_control.clone(), bytes));
    }

    let zip = empaquetar_respaldo(&clave, &resumen, &pdfs)?;
    std::fs::create_dir_all(destino)?;
    let ruta = destino.join(format!("CAI_Backup_{}.zip", clave));
    std::fs::write(&ruta, zip)?;

    bitacora::registrar_evento(state, Accion::Backup, "Archivo ZIP descargado")?;
    info!(ruta = %ruta.display(), notas = notas.len(), "Respaldo ZIP generado");
    Ok(ruta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::pruebas::estado_prueba;
    use crate::commands::{notas, usuarios};
    use std::io::Read;
    use zip::ZipArchive;

    fn nombres(bytes: Vec<u8>) -> Vec<String> {
        let archivo = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut nombres: Vec<String> = archivo.file_names().map(String::from).collect();
        nombres.sort();
        nombres
    }

    #[test]
    fn test_empaquetar_respaldo() {
        let bytes = empaquetar_respaldo(
            "25122024",
            b"resumen",
            &[
                ("CAI00125122024".to_string(), b"uno".to_vec()),
                ("CAI00225122024".to_string(), b"dos".to_vec()),
            ],
        )
        .unwrap();

        let mut archivo = ZipArchive::new(Cursor::new(bytes.clone())).unwrap();
        let mut contenido = String::new();
        archivo
            .by_name("Ventas_25122024/Nota_CAI00225122024.pdf")
            .unwrap()
            .read_to_string(&mut contenido)
            .unwrap();
        assert_eq!(contenido, "dos");

        assert_eq!(
            nombres(bytes),
            vec![
                "Ventas_25122024/Nota_CAI00125122024.pdf",
                "Ventas_25122024/Nota_CAI00225122024.pdf",
                "Ventas_25122024/Resumen_Ventas.pdf",
            ]
        );
    }

    #[test]
    fn test_respaldo_filtrado_por_vendedor() {
        let state = estado_prueba();
        let dir = tempfile::tempdir().unwrap();
        usuarios::iniciar_sesion(&state, "Vendedora Uno", "uno123").unwrap();
        notas::guardar_nota(&state).unwrap();
        notas::guardar_nota(&state).unwrap();
        usuarios::iniciar_sesion(&state, "Otro Vendedor", "otro789").unwrap();
        notas::guardar_nota(&state).unwrap();
        usuarios::iniciar_sesion(&state, "Jefa", "jefa456").unwrap();

        let filtro = FiltroVendedor::Vendedor("Vendedora Uno".to_string());
        let ruta = exportar_respaldo_zip(&state, &filtro, dir.path()).unwrap();
        assert_eq!(ruta.file_name().unwrap(), "CAI_Backup_25122024.zip");
        assert_eq!(
            nombres(std::fs::read(&ruta).unwrap()),
            vec![
                "Ventas_25122024/Nota_CAI00125122024.pdf",
                "Ventas_25122024/Nota_CAI00225122024.pdf",
                "Ventas_25122024/Resumen_Ventas.pdf",
            ]
        );

        let bitacora = bitacora::listar_bitacora(&state).unwrap();
        assert_eq!(bitacora[0].accion, "Backup");
        assert_eq!(bitacora[0].detalles, "Archivo ZIP descargado");
    }

    #[test]
    fn test_respaldo_con_control_repetido() {
        let bytes = empaquetar_respaldo(
            "25122024",
            b"resumen",
            &[
                ("CAI00125122024".to_string(), b"segunda".to_vec()),
                ("CAI00125122024".to_string(), b"primera".to_vec()),
            ],
        )
        .unwrap();

        let mut archivo = ZipArchive::new(Cursor::new(bytes.clone())).unwrap();
        let mut contenido = String::new();
        archivo
            .by_name("Ventas_25122024/Nota_CAI00125122024_2.pdf")
            .unwrap()
            .read_to_string(&mut contenido)
            .unwrap();
        assert_eq!(contenido, "primera");
        assert_eq!(nombres(bytes).len(), 3);
    }

    #[test]
    fn test_respaldo_tras_secuencial_corrupto() {
        let state = estado_prueba();
        let dir = tempfile::tempdir().unwrap();
        usuarios::iniciar_sesion(&state, "Vendedora Uno", "uno123").unwrap();
        notas::guardar_nota(&state).unwrap();
        {
            let conn = state.db.conexion().unwrap();
            conn.execute(
                "UPDATE almacen SET valor = 'roto' WHERE clave = 'cai_sequence'",
                [],
            )
            .unwrap();
        }
        let segunda = notas::guardar_nota(&state).unwrap();
        assert_eq!(segunda.numero_control, "CAI00225122024");

        let ruta =
            exportar_respaldo_zip(&state, &FiltroVendedor::Todos, dir.path()).unwrap();
        assert_eq!(
            nombres(std::fs::read(&ruta).unwrap()),
            vec![
                "Ventas_25122024/Nota_CAI00125122024.pdf",
                "Ventas_25122024/Nota_CAI00225122024.pdf",
                "Ventas_25122024/Resumen_Ventas.pdf",
            ]
        );
    }
}
