use serde::{Deserialize, Serialize};

use super::{DatosCliente, FilaProducto};
use crate::error::{Error, Resultado};

/// Saldo a partir del cual la nota se considera liquidada
pub const UMBRAL_PAGADA: f64 = 0.5;

/// Resumen de pago de la nota
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Financieros {
    /// Calculado: suma de importes
    #[serde(rename = "totalNote", default)]
    pub total_nota: f64,
    #[serde(rename = "discount", default)]
    pub descuento: f64,
    #[serde(rename = "reposition", default)]
    pub reposicion: f64,
    /// Devolución
    #[serde(rename = "returnAmount", default)]
    pub devolucion: f64,
    /// Calculado: total - descuento - reposición - devolución
    #[serde(rename = "subTotal", default)]
    pub subtotal: f64,
    #[serde(rename = "previousBalance", default)]
    pub saldo_anterior: f64,
    /// Pago o abono
    #[serde(rename = "payment", default)]
    pub abono: f64,
    /// Calculado: subtotal + saldo anterior - abono
    #[serde(rename = "finalBalance", default)]
    pub saldo_final: f64,
}

impl Financieros {
    pub fn esta_pagada(&self) -> bool {
        self.saldo_final <= UMBRAL_PAGADA
    }
}

/// Campos capturables del resumen de pago
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoFinanciero {
    Descuento,
    Reposicion,
    Devolucion,
    SaldoAnterior,
    Abono,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum EstadoNota {
    #[default]
    #[serde(rename = "active")]
    Activa,
    #[serde(rename = "cancelled")]
    Cancelada,
}

/// Nota de venta guardada. No se modifica después de creada salvo la
/// transición de estado a cancelada.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NotaVenta {
    pub id: String,
    /// CAI + secuencial de 3 dígitos + DDMMAAAA
    #[serde(rename = "controlNumber")]
    pub numero_control: String,
    #[serde(rename = "sequence")]
    pub secuencial: u32,
    /// DD/MM/AAAA
    #[serde(rename = "date")]
    pub fecha: String,
    #[serde(rename = "client", default)]
    pub cliente: DatosCliente,
    #[serde(rename = "products", default)]
    pub productos: Vec<FilaProducto>,
    #[serde(rename = "financials", default)]
    pub financieros: Financieros,
    /// Milisegundos desde epoch
    pub timestamp: i64,
    /// Vendedor que la creó (por nombre)
    #[serde(rename = "creator")]
    pub creador: String,
    #[serde(rename = "status", default)]
    pub estado: EstadoNota,
    #[serde(
        rename = "cancellationReason",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub motivo_cancelacion: Option<String>,
}

impl NotaVenta {
    pub fn esta_activa(&self) -> bool {
        self.estado == EstadoNota::Activa
    }

    /// Única transición permitida: activa -> cancelada, con motivo
    pub fn cancelar(&mut self, motivo: &str) -> Resultado<()> {
        let motivo = motivo.trim();
        if motivo.is_empty() {
            return Err(Error::Validacion(
                "Debe indicar el motivo de cancelación".to_string(),
            ));
        }
        if self.estado == EstadoNota::Cancelada {
            return Err(Error::Validacion(format!(
                "La nota {} ya está cancelada",
                self.numero_control
            )));
        }
        self.estado = EstadoNota::Cancelada;
        self.motivo_cancelacion = Some(motivo.to_string());
        Ok(())
    }

    pub fn total_pollos(&self) -> f64 {
        self.productos.iter().map(|p| p.pollos).sum()
    }

    pub fn total_kilos(&self) -> f64 {
        self.productos.iter().map(|p| p.peso_neto).sum()
    }
}
