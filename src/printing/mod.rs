//! Documentos de texto plano

use crate::models::Borrador;
use crate::utils::formatear_moneda;

/// Resumen de la nota para mensajería (formato con *negritas* y _cursivas_)
pub fn texto_compartir(borrador: &Borrador, control: &str, fecha: &str, vendedor: &str) -> String {
    let f = &borrador.financieros;
    let detalle = borrador
        .productos
        .iter()
        .map(|p| {
            format!(
                "• {} pollos - {:.2}kg x ${} = ${:.2}",
                numero_simple(p.pollos),
                p.peso_neto,
                numero_simple(p.precio),
                p.importe
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut texto = String::new();
    texto.push_str("*CAI - NOTA DE VENTA*\n");
    texto.push_str(&format!("*Control:* {}\n", control));
    texto.push_str(&format!("*Fecha:* {}\n", fecha));
    texto.push_str(&format!(
        "*Cliente:* {}\n",
        borrador.cliente.nombre_o_publico()
    ));
    texto.push_str(&linea_separador(26, '-'));
    texto.push_str("*Detalle:*\n");
    texto.push_str(&detalle);
    texto.push('\n');
    texto.push_str(&linea_separador(26, '-'));
    texto.push_str(&format!("*Subtotal:* {}\n", formatear_moneda(f.subtotal)));
    texto.push_str(&format!("*Abono:* {}\n", formatear_moneda(f.abono)));
    texto.push_str(&format!("*Saldo:* {}\n\n", formatear_moneda(f.saldo_final)));
    texto.push_str(&format!("_Le atendió: {}_", vendedor));
    texto
}

fn linea_separador(ancho: usize, ch: char) -> String {
    let mut linea: String = std::iter::repeat(ch).take(ancho).collect();
    linea.push('\n');
    linea
}

/// Número sin ceros de relleno: 10 -> "10", 42.5 -> "42.5"
fn numero_simple(n: f64) -> String {
    if n == n.trunc() {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CampoFinanciero, CampoProducto};

    #[test]
    fn test_texto_compartir() {
        let mut b = Borrador::nuevo();
        let id = b.productos[0].id.clone();
        b.editar_producto(&id, CampoProducto::Pollos, "10");
        b.editar_producto(&id, CampoProducto::PesoBruto, "25");
        b.editar_producto(&id, CampoProducto::Tara, "3");
        b.editar_producto(&id, CampoProducto::Precio, "40");
        b.editar_financiero(CampoFinanciero::Abono, "500");

        let texto = texto_compartir(&b, "CAI00525122024", "25/12/2024", "Vendedora Uno");
        let esperado = "*CAI - NOTA DE VENTA*\n\
*Control:* CAI00525122024\n\
*Fecha:* 25/12/2024\n\
*Cliente:* Público General\n\
--------------------------\n\
*Detalle:*\n\
• 10 pollos - 22.00kg x $40 = $880.00\n\
--------------------------\n\
*Subtotal:* $880.00\n\
*Abono:* $500.00\n\
*Saldo:* $380.00\n\
\n\
_Le atendió: Vendedora Uno_";
        assert_eq!(texto, esperado);
    }

    #[test]
    fn test_numero_simple() {
        assert_eq!(numero_simple(40.0), "40");
        assert_eq!(numero_simple(42.5), "42.5");
    }
}
