//! Libro diario: secuencial global, notas y bitácora particionadas por fecha.
//! Cada valor es un documento JSON guardado bajo su clave.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Resultado};
use crate::models::{EntradaBitacora, NotaVenta};

pub const CLAVE_SECUENCIA: &str = "cai_sequence";
pub const CLAVE_SESION: &str = "cai_user_obj";
pub const CLAVE_BORRADOR: &str = "cai_borrador";
const PREFIJO_NOTAS: &str = "cai_notes_";
const PREFIJO_BITACORA: &str = "cai_historial_";

pub fn clave_notas(fecha_clave: &str) -> String {
    format!("{}{}", PREFIJO_NOTAS, fecha_clave)
}

pub fn clave_bitacora(fecha_clave: &str) -> String {
    format!("{}{}", PREFIJO_BITACORA, fecha_clave)
}

/// Lee y deserializa una clave. Un valor corrupto se borra y se trata como ausente.
pub fn leer_json<T: DeserializeOwned>(conn: &Connection, clave: &str) -> Resultado<Option<T>> {
    let valor: Option<String> = conn
        .query_row(
            "SELECT valor FROM almacen WHERE clave = ?1",
            params![clave],
            |row| row.get(0),
        )
        .optional()?;

    let Some(valor) = valor else {
        return Ok(None);
    };

    match serde_json::from_str(&valor) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            warn!(clave, error = %e, "Valor corrupto en almacén, se descarta");
            borrar(conn, clave)?;
            Ok(None)
        }
    }
}

pub fn escribir_json<T: Serialize + ?Sized>(conn: &Connection, clave: &str, valor: &T) -> Resultado<()> {
    let json = serde_json::to_string(valor)?;
    conn.execute(
        "INSERT INTO almacen (clave, valor, actualizado)
         VALUES (?1, ?2, datetime('now', 'localtime'))
         ON CONFLICT(clave) DO UPDATE SET valor = excluded.valor, actualizado = excluded.actualizado",
        params![clave, json],
    )?;
    Ok(())
}

pub fn borrar(conn: &Connection, clave: &str) -> Resultado<()> {
    conn.execute("DELETE FROM almacen WHERE clave = ?1", params![clave])?;
    Ok(())
}

/// Notas del día, la más reciente primero. Un día sin actividad da lista vacía.
pub fn cargar_notas(conn: &Connection, fecha_clave: &str) -> Resultado<Vec<NotaVenta>> {
    Ok(leer_json(conn, &clave_notas(fecha_clave))?.unwrap_or_default())
}

pub fn guardar_notas(conn: &Connection, fecha_clave: &str, notas: &[NotaVenta]) -> Resultado<()> {
    escribir_json(conn, &clave_notas(fecha_clave), notas)
}

pub fn cargar_bitacora(conn: &Connection, fecha_clave: &str) -> Resultado<Vec<EntradaBitacora>> {
    Ok(leer_json(conn, &clave_bitacora(fecha_clave))?.unwrap_or_default())
}

/// Antepone la entrada a la bitácora del día
pub fn agregar_bitacora(conn: &Connection, fecha_clave: &str, entrada: EntradaBitacora) -> Resultado<()> {
    let mut bitacora = cargar_bitacora(conn, fecha_clave)?;
    bitacora.insert(0, entrada);
    escribir_json(conn, &clave_bitacora(fecha_clave), &bitacora)
}

/// Secuencial global; arranca en 1. Si falta o estaba corrupto se retoma
/// después del mayor secuencial emitido en el día.
pub fn cargar_secuencia(conn: &Connection, fecha_clave: &str) -> Resultado<u32> {
    if let Some(secuencia) = leer_json::<u32>(conn, CLAVE_SECUENCIA)? {
        return Ok(secuencia);
    }
    let notas = cargar_notas(conn, fecha_clave)?;
    let mayor = notas.iter().map(|n| n.secuencial).max().unwrap_or(0);
    mayor
        .checked_add(1)
        .ok_or_else(|| Error::Validacion("El secuencial llegó a su límite".to_string()))
}

pub fn guardar_secuencia(conn: &Connection, secuencia: u32) -> Resultado<()> {
    escribir_json(conn, CLAVE_SECUENCIA, &secuencia)
}

/// Emite la nota con el secuencial vigente, la antepone a las del día y
/// avanza el secuencial, todo en una sola transacción.
pub fn registrar_nota<F>(conn: &Connection, fecha_clave: &str, construir: F) -> Resultado<NotaVenta>
where
    F: FnOnce(u32) -> NotaVenta,
{
    let tx = conn.unchecked_transaction()?;

    let secuencia = cargar_secuencia(&tx, fecha_clave)?;
    let siguiente = secuencia
        .checked_add(1)
        .ok_or_else(|| Error::Validacion("El secuencial llegó a su límite".to_string()))?;
    let nota = construir(secuencia);

    let mut notas = cargar_notas(&tx, fecha_clave)?;
    notas.insert(0, nota.clone());
    guardar_notas(&tx, fecha_clave, &notas)?;
    guardar_secuencia(&tx, siguiente)?;

    tx.commit()?;
    debug!(control = %nota.numero_control, secuencia, "Nota registrada");
    Ok(nota)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{DatosCliente, EstadoNota, Financieros};

    fn nota(secuencial: u32) -> NotaVenta {
        NotaVenta {
            id: format!("id-{}", secuencial),
            numero_control: format!("CAI{:03}25122024", secuencial),
            secuencial,
            fecha: "25/12/2024".to_string(),
            cliente: DatosCliente::default(),
            productos: vec![],
            financieros: Financieros::default(),
            timestamp: 0,
            creador: "Vendedora Uno".to_string(),
            estado: EstadoNota::Activa,
            motivo_cancelacion: None,
        }
    }

    #[test]
    fn test_dia_sin_actividad() {
        let db = Database::en_memoria().unwrap();
        let conn = db.conexion().unwrap();
        assert!(cargar_notas(&conn, "25122024").unwrap().is_empty());
        assert!(cargar_bitacora(&conn, "25122024").unwrap().is_empty());
        assert_eq!(cargar_secuencia(&conn, "25122024").unwrap(), 1);
    }

    #[test]
    fn test_registrar_nota_avanza_y_antepone() {
        let db = Database::en_memoria().unwrap();
        let conn = db.conexion().unwrap();
        guardar_secuencia(&conn, 5).unwrap();

        let primera = registrar_nota(&conn, "25122024", nota).unwrap();
        assert_eq!(primera.numero_control, "CAI00525122024");
        let segunda = registrar_nota(&conn, "25122024", nota).unwrap();

        assert_eq!(cargar_secuencia(&conn, "25122024").unwrap(), 7);
        let notas = cargar_notas(&conn, "25122024").unwrap();
        assert_eq!(notas.len(), 2);
        assert_eq!(notas[0].id, segunda.id);
        assert_eq!(notas[1].id, primera.id);
    }

    #[test]
    fn test_secuencia_global_entre_dias() {
        let db = Database::en_memoria().unwrap();
        let conn = db.conexion().unwrap();
        registrar_nota(&conn, "24122024", nota).unwrap();
        let n = registrar_nota(&conn, "25122024", nota).unwrap();
        assert_eq!(n.secuencial, 2);
        assert_eq!(cargar_notas(&conn, "24122024").unwrap().len(), 1);
        assert_eq!(cargar_notas(&conn, "25122024").unwrap().len(), 1);
    }

    #[test]
    fn test_valor_corrupto_se_borra() {
        let db = Database::en_memoria().unwrap();
        let conn = db.conexion().unwrap();
        conn.execute(
            "INSERT INTO almacen (clave, valor) VALUES (?1, '{no es json')",
            params![clave_notas("25122024")],
        )
        .unwrap();

        assert!(cargar_notas(&conn, "25122024").unwrap().is_empty());
        let restantes: i64 = conn
            .query_row("SELECT COUNT(*) FROM almacen", [], |row| row.get(0))
            .unwrap();
        assert_eq!(restantes, 0);
    }

    #[test]
    fn test_bitacora_mas_reciente_primero() {
        let db = Database::en_memoria().unwrap();
        let conn = db.conexion().unwrap();
        for i in 0..3 {
            agregar_bitacora(
                &conn,
                "25122024",
                EntradaBitacora {
                    id: i.to_string(),
                    timestamp: i,
                    usuario: "Vendedora Uno".to_string(),
                    accion: "Crear Nota".to_string(),
                    detalles: String::new(),
                },
            )
            .unwrap();
        }
        let ids: Vec<String> = cargar_bitacora(&conn, "25122024")
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["2", "1", "0"]);
    }

    #[test]
    fn test_secuencia_corrupta_retoma_tras_el_dia() {
        let db = Database::en_memoria().unwrap();
        let conn = db.conexion().unwrap();
        guardar_secuencia(&conn, 4).unwrap();
        registrar_nota(&conn, "25122024", nota).unwrap();
        conn.execute(
            "UPDATE almacen SET valor = 'roto' WHERE clave = ?1",
            params![CLAVE_SECUENCIA],
        )
        .unwrap();

        let siguiente = registrar_nota(&conn, "25122024", nota).unwrap();
        assert_eq!(siguiente.numero_control, "CAI00525122024");
        assert_eq!(cargar_secuencia(&conn, "25122024").unwrap(), 6);
    }

    #[test]
    fn test_secuencia_en_el_limite() {
        let db = Database::en_memoria().unwrap();
        let conn = db.conexion().unwrap();
        guardar_secuencia(&conn, u32::MAX).unwrap();

        let resultado = registrar_nota(&conn, "25122024", nota);
        assert!(matches!(resultado, Err(Error::Validacion(_))));
        assert!(cargar_notas(&conn, "25122024").unwrap().is_empty());
        assert_eq!(cargar_secuencia(&conn, "25122024").unwrap(), u32::MAX);
    }
}
