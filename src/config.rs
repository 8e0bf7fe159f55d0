//! Configuración del negocio: encabezado de la empresa, directorio de
//! vendedores y parámetros de captura.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::db::directorio_datos;
use crate::error::{Error, Resultado};
use crate::models::DirectorioUsuarios;

/// Datos de la empresa que aparecen en el encabezado de notas y reportes
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Empresa {
    pub nombre: String,
    pub rfc: String,
    pub direccion: String,
    pub telefonos: String,
}

impl Default for Empresa {
    fn default() -> Self {
        Empresa {
            nombre: "COMERCIALIZADORA AVÍCOLA DEL ISTMO".to_string(),
            rfc: "RUPA6312037P5".to_string(),
            direccion: "Dr. José Morín Torres No. 8, Manzana N, Fracc. Infonavit Sandunga, Tehuantepec, Oax."
                .to_string(),
            telefonos: "Tel: 971 71 5 0196 | Cel: 971 100 3874".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Configuracion {
    #[serde(default)]
    pub empresa: Empresa,
    #[serde(default)]
    pub directorio: DirectorioUsuarios,
    /// Espera máxima de la geolocalización
    #[serde(default = "tiempo_ubicacion_por_defecto")]
    pub tiempo_ubicacion_ms: u64,
    /// Carpeta con LiberationSans-*.ttf
    #[serde(default)]
    pub directorio_fuentes: Option<PathBuf>,
}

fn tiempo_ubicacion_por_defecto() -> u64 {
    5000
}

impl Default for Configuracion {
    fn default() -> Self {
        Configuracion {
            empresa: Empresa::default(),
            directorio: DirectorioUsuarios::default(),
            tiempo_ubicacion_ms: tiempo_ubicacion_por_defecto(),
            directorio_fuentes: None,
        }
    }
}

impl Configuracion {
    /// Carga la configuración desde JSON. Si el archivo no existe se usan
    /// los valores por omisión (sin vendedores registrados).
    pub fn cargar(ruta: &Path) -> Resultado<Self> {
        if !ruta.exists() {
            warn!(ruta = %ruta.display(), "No existe archivo de configuración, se usan valores por omisión");
            return Ok(Self::default());
        }
        let texto = std::fs::read_to_string(ruta)?;
        let config: Configuracion = serde_json::from_str(&texto)
            .map_err(|e| Error::Configuracion(format!("{}: {}", ruta.display(), e)))?;
        info!(
            vendedores = config.directorio.usuarios.len(),
            "Configuración cargada"
        );
        Ok(config)
    }

    pub fn ruta_por_defecto() -> PathBuf {
        directorio_datos().join("config.json")
    }

    /// Carpeta de fuentes: la configurada o `fuentes/` junto a los datos
    pub fn fuentes(&self) -> PathBuf {
        self.directorio_fuentes
            .clone()
            .unwrap_or_else(|| directorio_datos().join("fuentes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parcial_completa_por_omision() {
        let json = r#"{
            "directorio": {
                "usuarios": [
                    {"nombre": "Jefa", "rol": "admin", "clave_sal": "aa", "clave_hash": "bb"}
                ],
                "super_admins": ["Jefa"]
            }
        }"#;
        let config: Configuracion = serde_json::from_str(json).unwrap();
        assert_eq!(config.tiempo_ubicacion_ms, 5000);
        assert_eq!(config.empresa.rfc, "RUPA6312037P5");
        assert!(config.directorio.es_super_admin("Jefa"));
        assert!(config.directorio_fuentes.is_none());
    }

    #[test]
    fn test_cargar_archivo_inexistente() {
        let dir = tempfile::tempdir().unwrap();
        let config = Configuracion::cargar(&dir.path().join("no-existe.json")).unwrap();
        assert!(config.directorio.usuarios.is_empty());
    }

    #[test]
    fn test_config_de_ejemplo() {
        let ruta = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.ejemplo.json");
        let config = Configuracion::cargar(&ruta).unwrap();
        assert_eq!(config.directorio.usuarios.len(), 6);
        assert!(config
            .directorio
            .autenticar("Daniel Ruiz Barrera", "0000")
            .is_some());
        assert!(config.directorio.es_super_admin("Griselda Ruiz de la Cruz"));
        assert!(!config.directorio.es_super_admin("Daniel Ruiz Barrera"));
        assert_eq!(config.empresa, Empresa::default());
    }

    #[test]
    fn test_cargar_json_invalido() {
        let dir = tempfile::tempdir().unwrap();
        let ruta = dir.path().join("config.json");
        std::fs::write(&ruta, "{ roto").unwrap();
        assert!(matches!(
            Configuracion::cargar(&ruta),
            Err(Error::Configuracion(_))
        ));
    }
}
