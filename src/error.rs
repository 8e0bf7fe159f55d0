//! Errores de la aplicación

use thiserror::Error;

/// Errores que puede devolver cualquier operación de notas
#[derive(Debug, Error)]
pub enum Error {
    /// No hay vendedor autenticado
    #[error("Debe iniciar sesión")]
    SinSesion,

    /// Usuario o contraseña no coinciden con el directorio
    #[error("Usuario o contraseña incorrectos.")]
    CredencialesInvalidas,

    /// Falta el usuario o la contraseña
    #[error("Ingrese usuario y contraseña")]
    CredencialesIncompletas,

    /// Operación reservada a super administradores
    #[error("Se requiere permisos de administrador")]
    SinPermiso,

    #[error("{0}")]
    Validacion(String),

    #[error("No se encontró la nota {0}")]
    NotaNoEncontrada(String),

    #[error("Ya hay una exportación en curso")]
    ExportacionEnCurso,

    /// Fallo al obtener la ubicación del dispositivo
    #[error("Error al obtener ubicación: {0}")]
    Ubicacion(#[from] ErrorUbicacion),

    #[error("Error generando PDF: {0}")]
    Pdf(String),

    #[error("Error generando ZIP: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Un hilo anterior dejó envenenado el candado del estado compartido
    #[error("Estado interno no disponible")]
    EstadoBloqueado,

    #[error("Error de configuración: {0}")]
    Configuracion(String),

    #[error("Error de base de datos: {0}")]
    BaseDatos(#[from] rusqlite::Error),

    #[error("Error de serialización: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error de archivo: {0}")]
    Io(#[from] std::io::Error),
}

/// Causas de fallo de la geolocalización
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErrorUbicacion {
    #[error("la geolocalización no es compatible")]
    NoCompatible,

    #[error("permiso denegado")]
    PermisoDenegado,

    #[error("tiempo de espera agotado")]
    TiempoAgotado,
}

impl From<genpdf::error::Error> for Error {
    fn from(e: genpdf::error::Error) -> Self {
        Error::Pdf(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Error::EstadoBloqueado
    }
}

pub type Resultado<T> = Result<T, Error>;
