//! Estado compartido que reciben todos los comandos

use chrono::{DateTime, Local, NaiveDate};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::commands::ubicacion::{ProveedorUbicacion, SinUbicacion};
use crate::config::Configuracion;
use crate::db::{Database, SesionState};
use crate::pdf::{PdfGenpdf, RenderizadorPdf};
use crate::utils;

/// Fuente de la fecha y hora actuales
pub trait Reloj: Send + Sync {
    fn ahora(&self) -> DateTime<Local>;
}

pub struct RelojSistema;

impl Reloj for RelojSistema {
    fn ahora(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Reloj detenido en un instante, para pruebas y reprocesos
pub struct RelojFijo(pub DateTime<Local>);

impl Reloj for RelojFijo {
    fn ahora(&self) -> DateTime<Local> {
        self.0
    }
}

pub struct AppState {
    pub db: Database,
    pub sesion: SesionState,
    pub config: Configuracion,
    pub reloj: Box<dyn Reloj>,
    pub renderizador: Box<dyn RenderizadorPdf>,
    pub ubicacion: Arc<dyn ProveedorUbicacion>,
    /// Hay una exportación en curso
    pub exportando: AtomicBool,
}

impl AppState {
    /// Estado con reloj del sistema, PDF con genpdf y sin proveedor de ubicación
    pub fn new(db: Database, config: Configuracion) -> Self {
        let renderizador = Box::new(PdfGenpdf::new(config.fuentes()));
        AppState {
            db,
            sesion: SesionState::vacia(),
            config,
            reloj: Box::new(RelojSistema),
            renderizador,
            ubicacion: Arc::new(SinUbicacion),
            exportando: AtomicBool::new(false),
        }
    }

    pub fn con_reloj(mut self, reloj: impl Reloj + 'static) -> Self {
        self.reloj = Box::new(reloj);
        self
    }

    pub fn con_renderizador(mut self, renderizador: impl RenderizadorPdf + 'static) -> Self {
        self.renderizador = Box::new(renderizador);
        self
    }

    pub fn con_ubicacion(mut self, proveedor: impl ProveedorUbicacion + 'static) -> Self {
        self.ubicacion = Arc::new(proveedor);
        self
    }

    pub fn hoy(&self) -> NaiveDate {
        self.reloj.ahora().date_naive()
    }

    /// DDMMAAAA de hoy: partición del libro diario
    pub fn clave_hoy(&self) -> String {
        utils::fecha_clave(self.hoy())
    }

    /// DD/MM/AAAA de hoy
    pub fn fecha_hoy(&self) -> String {
        utils::fecha_visible(self.hoy())
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.reloj.ahora().timestamp_millis()
    }
}
