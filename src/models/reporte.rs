use serde::Serialize;
use std::collections::BTreeMap;

/// Selección de vendedor para listados y exportaciones.
/// Sólo un super administrador puede elegir algo distinto de sus propias notas.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FiltroVendedor {
    #[default]
    Todos,
    Vendedor(String),
}

impl FiltroVendedor {
    /// "all" o vacío significa todos
    pub fn desde_texto(valor: &str) -> Self {
        match valor.trim() {
            "" | "all" | "todos" => FiltroVendedor::Todos,
            nombre => FiltroVendedor::Vendedor(nombre.to_string()),
        }
    }
}

/// Totales del día sobre las notas activas visibles
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct EstadisticasReporte {
    pub total_notas: usize,
    pub total_pollos: f64,
    pub total_kilos: f64,
    /// Σ subtotal
    pub total_facturado: f64,
    /// Σ abonos
    pub total_recaudado: f64,
    pub notas_por_vendedor: BTreeMap<String, usize>,
}

/// Panel de resumen diario
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct ResumenDiario {
    pub fecha: String,
    pub notas: usize,
    pub pollos: f64,
    pub facturado: f64,
    pub recaudado: f64,
}
