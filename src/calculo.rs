//! Aritmética de la nota: pesos de cada fila y resumen de pago

use crate::models::{Financieros, FilaProducto};

/// Recalcula neto, promedio e importe a partir de los campos capturados
pub fn recalcular_fila(fila: &mut FilaProducto) {
    fila.peso_neto = fila.peso_bruto - fila.tara;
    fila.promedio = if fila.pollos > 0.0 {
        fila.peso_neto / fila.pollos
    } else {
        0.0
    };
    fila.importe = fila.peso_neto * fila.precio;
}

/// Conserva los campos capturados de `actual` y recalcula total, subtotal
/// y saldo final
pub fn calcular_financieros(filas: &[FilaProducto], actual: &Financieros) -> Financieros {
    let total_nota: f64 = filas.iter().map(|f| f.importe).sum();
    let subtotal = total_nota - actual.descuento - actual.reposicion - actual.devolucion;
    let saldo_final = subtotal + actual.saldo_anterior - actual.abono;

    Financieros {
        total_nota,
        subtotal,
        saldo_final,
        ..actual.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fila(pollos: f64, bruto: f64, tara: f64, precio: f64) -> FilaProducto {
        let mut f = FilaProducto::nueva();
        f.pollos = pollos;
        f.peso_bruto = bruto;
        f.tara = tara;
        f.precio = precio;
        recalcular_fila(&mut f);
        f
    }

    #[test]
    fn test_recalcular_fila() {
        let f = fila(10.0, 25.0, 3.0, 40.0);
        assert_eq!(f.peso_neto, 22.0);
        assert!((f.promedio - 2.2).abs() < 1e-9);
        assert_eq!(f.importe, 880.0);
    }

    #[test]
    fn test_promedio_sin_pollos_es_cero() {
        let f = fila(0.0, 12.0, 2.0, 35.0);
        assert_eq!(f.peso_neto, 10.0);
        assert_eq!(f.promedio, 0.0);
        assert_eq!(f.importe, 350.0);
    }

    #[test]
    fn test_tara_mayor_que_bruto_da_negativos() {
        let f = fila(5.0, 2.0, 3.0, 40.0);
        assert_eq!(f.peso_neto, -1.0);
        assert_eq!(f.importe, -40.0);
    }

    #[test]
    fn test_calcular_financieros() {
        let mut a = FilaProducto::nueva();
        a.importe = 880.0;
        let mut b = FilaProducto::nueva();
        b.importe = 120.0;

        let capturados = Financieros {
            descuento: 50.0,
            saldo_anterior: 200.0,
            abono: 300.0,
            ..Default::default()
        };
        let f = calcular_financieros(&[a, b], &capturados);
        assert_eq!(f.total_nota, 1000.0);
        assert_eq!(f.subtotal, 950.0);
        assert_eq!(f.saldo_final, 850.0);
        assert_eq!(f.descuento, 50.0);
        assert!(!f.esta_pagada());
    }

    #[test]
    fn test_sobrepago_deja_saldo_negativo() {
        let mut a = FilaProducto::nueva();
        a.importe = 100.0;
        let capturados = Financieros {
            abono: 150.0,
            ..Default::default()
        };
        let f = calcular_financieros(&[a], &capturados);
        assert_eq!(f.saldo_final, -50.0);
        assert!(f.esta_pagada());
    }
}
