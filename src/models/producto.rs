use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fila de producto de la nota (un lote pesado en báscula).
/// Los nombres serializados coinciden con los registros del navegador.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FilaProducto {
    pub id: String,
    #[serde(rename = "crates", default)]
    pub rejas: f64,
    #[serde(rename = "chickens", default)]
    pub pollos: f64,
    #[serde(rename = "grossWeight", default)]
    pub peso_bruto: f64,
    #[serde(rename = "tare", default)]
    pub tara: f64,
    /// Calculado: bruto - tara
    #[serde(rename = "netWeight", default)]
    pub peso_neto: f64,
    /// Calculado: neto / pollos
    #[serde(rename = "average", default)]
    pub promedio: f64,
    /// Precio por kg
    #[serde(rename = "price", default)]
    pub precio: f64,
    /// Calculado: neto * precio
    #[serde(rename = "amount", default)]
    pub importe: f64,
}

impl FilaProducto {
    pub fn nueva() -> Self {
        FilaProducto {
            id: Uuid::new_v4().to_string(),
            rejas: 0.0,
            pollos: 0.0,
            peso_bruto: 0.0,
            tara: 0.0,
            peso_neto: 0.0,
            promedio: 0.0,
            precio: 0.0,
            importe: 0.0,
        }
    }
}

/// Campos capturables de una fila
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoProducto {
    Rejas,
    Pollos,
    PesoBruto,
    Tara,
    Precio,
}
