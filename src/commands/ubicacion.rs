//! Captura de la ubicación del cliente con tiempo de espera

use std::sync::mpsc;
use std::time::Duration;
use tracing::warn;

use crate::commands::{bitacora, borrador};
use crate::error::{ErrorUbicacion, Resultado};
use crate::estado::AppState;
use crate::models::{Accion, Borrador};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordenadas {
    pub latitud: f64,
    pub longitud: f64,
}

/// Fuente de coordenadas del dispositivo. Puede bloquear; quien la llama
/// impone el tiempo de espera.
pub trait ProveedorUbicacion: Send + Sync {
    fn obtener(&self) -> Result<Coordenadas, ErrorUbicacion>;
}

/// Dispositivo sin geolocalización
pub struct SinUbicacion;

impl ProveedorUbicacion for SinUbicacion {
    fn obtener(&self) -> Result<Coordenadas, ErrorUbicacion> {
        Err(ErrorUbicacion::NoCompatible)
    }
}

/// Coordenadas conocidas de antemano (capturadas en otro equipo)
pub struct UbicacionFija(Coordenadas);

impl UbicacionFija {
    pub fn new(latitud: f64, longitud: f64) -> Self {
        UbicacionFija(Coordenadas { latitud, longitud })
    }
}

impl ProveedorUbicacion for UbicacionFija {
    fn obtener(&self) -> Result<Coordenadas, ErrorUbicacion> {
        Ok(self.0)
    }
}

pub fn enlace_mapa(c: &Coordenadas) -> String {
    format!("https://www.google.com/maps?q={},{}", c.latitud, c.longitud)
}

/// Pide coordenadas al proveedor sin esperar más de `espera`
pub fn obtener_con_espera(
    state: &AppState,
    espera: Duration,
) -> Result<Coordenadas, ErrorUbicacion> {
    let proveedor = state.ubicacion.clone();
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        // El receptor puede haberse rendido ya
        let _ = tx.send(proveedor.obtener());
    });

    match rx.recv_timeout(espera) {
        Ok(resultado) => resultado,
        Err(_) => Err(ErrorUbicacion::TiempoAgotado),
    }
}

/// Escribe en la dirección del cliente el enlace al mapa de la ubicación actual
pub fn capturar_ubicacion(state: &AppState) -> Resultado<Borrador> {
    crate::commands::usuarios::verificar_sesion(state)?;
    let espera = Duration::from_millis(state.config.tiempo_ubicacion_ms);

    let coordenadas = obtener_con_espera(state, espera).map_err(|e| {
        warn!(error = %e, "No se pudo obtener la ubicación");
        e
    })?;

    let borrador = borrador::fijar_ubicacion(state, &enlace_mapa(&coordenadas))?;
    bitacora::registrar_evento(
        state,
        Accion::Ubicacion,
        &format!("GPS: {},{}", coordenadas.latitud, coordenadas.longitud),
    )?;
    Ok(borrador)
}
