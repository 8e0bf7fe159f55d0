use genpdf::elements::{Break, FrameCellDecorator, LinearLayout, TableLayout};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Element, Margins};

use super::{format_cantidad, format_kilos, p, p_aligned, pp, pp_right};
use crate::config::Empresa;
use crate::error::Resultado;
use crate::models::NotaVenta;
use crate::utils::formatear_moneda;

/// Página de una nota de venta: encabezado, cliente, productos y resumen de pago
pub(super) fn elementos_nota(nota: &NotaVenta, empresa: &Empresa) -> Resultado<LinearLayout> {
    let s_titulo = Style::new().with_font_size(14).bold();
    let s_normal = Style::new().with_font_size(9);
    let s_bold = Style::new().with_font_size(9).bold();
    let s_small = Style::new().with_font_size(8);
    let s_small_bold = Style::new().with_font_size(8).bold();
    let s_total = Style::new().with_font_size(11).bold();
    let s_alerta = Style::new()
        .with_font_size(11)
        .bold()
        .with_color(Color::Rgb(200, 30, 30));

    let mut pagina = LinearLayout::vertical();

    // --- Encabezado ---
    pagina.push(p_aligned(&empresa.nombre, s_titulo, Alignment::Center));
    pagina.push(p_aligned(&format!("RFC: {}", empresa.rfc), s_small, Alignment::Center));
    pagina.push(p_aligned(&empresa.direccion, s_small, Alignment::Center));
    pagina.push(p_aligned(&empresa.telefonos, s_small, Alignment::Center));
    pagina.push(Break::new(1.0));

    let mut encabezado = TableLayout::new(vec![1, 1]);
    encabezado
        .row()
        .element(pp(&format!("Le atiende: {}", nota.creador), s_bold))
        .element(pp_right(&format!("No. de Control: {}", nota.numero_control), s_bold))
        .push()?;
    encabezado
        .row()
        .element(pp("", s_normal))
        .element(pp_right(&format!("Fecha: {}", nota.fecha), s_normal))
        .push()?;
    pagina.push(encabezado);

    if let Some(motivo) = &nota.motivo_cancelacion {
        pagina.push(Break::new(0.5));
        pagina.push(p_aligned(
            &format!("NOTA CANCELADA: {}", motivo),
            s_alerta,
            Alignment::Center,
        ));
    }
    pagina.push(Break::new(1.0));

    // --- Cliente ---
    let mut cliente = LinearLayout::vertical();
    cliente.push(pp(
        &format!("Nombre del Cliente: {}", nota.cliente.nombre_o_publico()),
        s_normal,
    ));
    cliente.push(pp(&format!("No. de Teléfono: {}", nota.cliente.telefono), s_normal));
    cliente.push(pp(
        &format!("Dirección / Ubicación: {}", nota.cliente.direccion),
        s_normal,
    ));
    pagina.push(cliente.padded(Margins::trbl(2, 2, 2, 2)).framed());
    pagina.push(Break::new(1.0));

    // --- Productos ---
    pagina.push(p("Datos del Producto", s_bold));
    pagina.push(Break::new(0.3));
    let mut productos = TableLayout::new(vec![2, 2, 3, 3, 3, 3, 3, 4]);
    productos.set_cell_decorator(FrameCellDecorator::new(true, true, false));
    let mut cabecera = productos.row();
    for titulo in [
        "Rejas", "Pollos", "P. Bruto", "Tara", "P. Neto", "Promedio", "Precio", "Importe",
    ] {
        cabecera.push_element(pp(titulo, s_small_bold));
    }
    cabecera.push()?;

    for fila in &nota.productos {
        productos
            .row()
            .element(pp_right(&format_cantidad(fila.rejas), s_small))
            .element(pp_right(&format_cantidad(fila.pollos), s_small))
            .element(pp_right(&format_kilos(fila.peso_bruto), s_small))
            .element(pp_right(&format_kilos(fila.tara), s_small))
            .element(pp_right(&format_kilos(fila.peso_neto), s_small))
            .element(pp_right(&format!("{:.3}", fila.promedio), s_small))
            .element(pp_right(&format!("{:.2}", fila.precio), s_small))
            .element(pp_right(&formatear_moneda(fila.importe), s_small))
            .push()?;
    }
    pagina.push(productos);
    pagina.push(Break::new(1.0));

    // --- Resumen de pago ---
    let f = &nota.financieros;
    let mut pago = TableLayout::new(vec![3, 2]);
    pago.set_cell_decorator(FrameCellDecorator::new(true, true, false));
    let lineas = [
        ("Total Nota:", f.total_nota),
        ("(-) Descuento:", f.descuento),
        ("(-) Devolución:", f.devolucion),
        ("(-) Reposición:", f.reposicion),
        ("Sub Total:", f.subtotal),
        ("(+) Saldo Anterior:", f.saldo_anterior),
        ("(-) Pago o Abono:", f.abono),
    ];
    for (etiqueta, valor) in lineas {
        pago.row()
            .element(pp(etiqueta, s_normal))
            .element(pp_right(&formatear_moneda(valor), s_normal))
            .push()?;
    }
    pago.row()
        .element(pp("(=) Saldo Total:", s_total))
        .element(pp_right(&formatear_moneda(f.saldo_final), s_total))
        .push()?;

    let mut resumen = LinearLayout::vertical();
    resumen.push(p("Resumen de Pago", s_bold));
    resumen.push(Break::new(0.3));
    resumen.push(pago);
    resumen.push(Break::new(0.5));
    let insignia = if f.esta_pagada() {
        "Nota Pagada"
    } else {
        "Saldo Pendiente"
    };
    resumen.push(p_aligned(insignia, s_total, Alignment::Right));
    pagina.push(resumen);

    Ok(pagina)
}
