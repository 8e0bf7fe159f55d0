use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct DatosCliente {
    #[serde(rename = "name", default)]
    pub nombre: String,
    /// Dirección libre; la captura de ubicación escribe aquí un enlace de mapa
    #[serde(rename = "fullAddress", default)]
    pub direccion: String,
    #[serde(rename = "phone", default)]
    pub telefono: String,
}

impl DatosCliente {
    /// Sin nombre capturado la nota es para público general. Un nombre de
    /// sólo espacios se respeta tal cual.
    pub fn nombre_o_publico(&self) -> &str {
        if self.nombre.is_empty() {
            "Público General"
        } else {
            &self.nombre
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoCliente {
    Nombre,
    Direccion,
    Telefono,
}
