use serde::{Deserialize, Serialize};

use super::{CampoCliente, CampoFinanciero, CampoProducto, DatosCliente, Financieros, FilaProducto};
use crate::calculo;
use crate::utils::a_numero;

/// Nota en captura. Los campos calculados se mantienen al día después de
/// cada edición.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Borrador {
    #[serde(rename = "client", default)]
    pub cliente: DatosCliente,
    #[serde(rename = "products", default)]
    pub productos: Vec<FilaProducto>,
    #[serde(rename = "financials", default)]
    pub financieros: Financieros,
}

impl Default for Borrador {
    fn default() -> Self {
        Borrador {
            cliente: DatosCliente::default(),
            productos: vec![FilaProducto::nueva()],
            financieros: Financieros::default(),
        }
    }
}

impl Borrador {
    pub fn nuevo() -> Self {
        Self::default()
    }

    pub fn editar_cliente(&mut self, campo: CampoCliente, valor: &str) {
        let destino = match campo {
            CampoCliente::Nombre => &mut self.cliente.nombre,
            CampoCliente::Direccion => &mut self.cliente.direccion,
            CampoCliente::Telefono => &mut self.cliente.telefono,
        };
        *destino = valor.to_string();
    }

    /// Cambia un campo capturable de la fila y recalcula. Devuelve false si
    /// el id no existe.
    pub fn editar_producto(&mut self, id: &str, campo: CampoProducto, valor: &str) -> bool {
        let Some(fila) = self.productos.iter_mut().find(|f| f.id == id) else {
            return false;
        };
        let n = a_numero(valor);
        match campo {
            CampoProducto::Rejas => fila.rejas = n,
            CampoProducto::Pollos => fila.pollos = n,
            CampoProducto::PesoBruto => fila.peso_bruto = n,
            CampoProducto::Tara => fila.tara = n,
            CampoProducto::Precio => fila.precio = n,
        }
        calculo::recalcular_fila(fila);
        self.recalcular();
        true
    }

    /// Agrega una fila vacía y devuelve su id
    pub fn agregar_producto(&mut self) -> String {
        let fila = FilaProducto::nueva();
        let id = fila.id.clone();
        self.productos.push(fila);
        self.recalcular();
        id
    }

    /// Quita la fila; nunca deja la nota sin filas
    pub fn quitar_producto(&mut self, id: &str) -> bool {
        if self.productos.len() <= 1 {
            return false;
        }
        let antes = self.productos.len();
        self.productos.retain(|f| f.id != id);
        let quitada = self.productos.len() != antes;
        if quitada {
            self.recalcular();
        }
        quitada
    }

    pub fn editar_financiero(&mut self, campo: CampoFinanciero, valor: &str) {
        let n = a_numero(valor);
        match campo {
            CampoFinanciero::Descuento => self.financieros.descuento = n,
            CampoFinanciero::Reposicion => self.financieros.reposicion = n,
            CampoFinanciero::Devolucion => self.financieros.devolucion = n,
            CampoFinanciero::SaldoAnterior => self.financieros.saldo_anterior = n,
            CampoFinanciero::Abono => self.financieros.abono = n,
        }
        self.recalcular();
    }

    pub fn recalcular(&mut self) {
        self.financieros = calculo::calcular_financieros(&self.productos, &self.financieros);
    }

    /// Hay algo que valga la pena guardar: algún importe o nombre de cliente
    pub fn tiene_datos(&self) -> bool {
        self.productos.iter().any(|f| f.importe > 0.0) || !self.cliente.nombre.trim().is_empty()
    }
}
