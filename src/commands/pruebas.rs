//! Estado de prueba: base en memoria, reloj fijo, PDF falso y tres vendedores

use chrono::{Local, TimeZone};

use crate::commands::ubicacion::UbicacionFija;
use crate::config::{Configuracion, Empresa};
use crate::db::Database;
use crate::error::Resultado;
use crate::estado::{AppState, RelojFijo};
use crate::models::{DirectorioUsuarios, NotaVenta, Rol, UsuarioDirectorio};
use crate::pdf::{DatosReporte, RenderizadorPdf};
use crate::utils;

/// Devuelve bytes reconocibles en lugar de un PDF
pub struct PdfFalso;

impl RenderizadorPdf for PdfFalso {
    fn nota(&self, nota: &NotaVenta, _empresa: &Empresa) -> Resultado<Vec<u8>> {
        Ok(format!("%PDF nota {}", nota.numero_control).into_bytes())
    }

    fn reporte(&self, datos: &DatosReporte<'_>) -> Resultado<Vec<u8>> {
        Ok(format!("%PDF reporte {} notas", datos.notas.len()).into_bytes())
    }

    fn resumen(&self, datos: &DatosReporte<'_>) -> Resultado<Vec<u8>> {
        Ok(format!("%PDF resumen {}", datos.estadisticas.total_notas).into_bytes())
    }
}

fn usuario(nombre: &str, rol: Rol, clave: &str) -> UsuarioDirectorio {
    let sal = utils::generar_salt();
    UsuarioDirectorio {
        nombre: nombre.to_string(),
        rol,
        clave_hash: utils::hash_clave(&sal, clave),
        clave_sal: sal,
    }
}

pub fn config_prueba() -> Configuracion {
    Configuracion {
        directorio: DirectorioUsuarios {
            usuarios: vec![
                usuario("Vendedora Uno", Rol::User, "uno123"),
                usuario("Otro Vendedor", Rol::User, "otro789"),
                usuario("Jefa", Rol::Admin, "jefa456"),
            ],
            super_admins: vec!["Jefa".to_string()],
        },
        ..Configuracion::default()
    }
}

/// 25/12/2024 10:30 hora local
pub fn estado_prueba() -> AppState {
    let ahora = Local
        .with_ymd_and_hms(2024, 12, 25, 10, 30, 0)
        .single()
        .unwrap();
    AppState::new(Database::en_memoria().unwrap(), config_prueba())
        .con_reloj(RelojFijo(ahora))
        .con_renderizador(PdfFalso)
        .con_ubicacion(UbicacionFija::new(16.3247, -95.2401))
}
