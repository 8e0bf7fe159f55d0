use serde::{Deserialize, Serialize};

/// Movimiento de la bitácora de operaciones (sólo se agregan, el más reciente primero)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EntradaBitacora {
    pub id: String,
    pub timestamp: i64,
    #[serde(rename = "user")]
    pub usuario: String,
    #[serde(rename = "action")]
    pub accion: String,
    #[serde(rename = "details")]
    pub detalles: String,
}

/// Acciones que quedan registradas en la bitácora
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accion {
    InicioSesion,
    CerrarSesion,
    Ubicacion,
    CrearNota,
    CancelarNota,
    Compartir,
    Exportar,
    Reporte,
    Backup,
    ExportarCsv,
}

impl Accion {
    pub fn etiqueta(&self) -> &'static str {
        match self {
            Accion::InicioSesion => "Inicio de Sesión",
            Accion::CerrarSesion => "Cerrar Sesión",
            Accion::Ubicacion => "Ubicación",
            Accion::CrearNota => "Crear Nota",
            Accion::CancelarNota => "Cancelar Nota",
            Accion::Compartir => "Compartir",
            Accion::Exportar => "Exportar",
            Accion::Reporte => "Reporte",
            Accion::Backup => "Backup",
            Accion::ExportarCsv => "Exportar CSV",
        }
    }
}
