use genpdf::elements::{Break, LinearLayout};
use genpdf::style::Style;
use genpdf::{Alignment, Element, Margins};

use super::{format_cantidad, p, p_aligned, DatosReporte};
use crate::utils::formatear_moneda;

/// Página de resumen: totales del día y desglose por vendedor
pub(super) fn elementos_resumen(datos: &DatosReporte<'_>) -> LinearLayout {
    let s_titulo = Style::new().with_font_size(16).bold();
    let s_subtitulo = Style::new().with_font_size(12).bold();
    let s_normal = Style::new().with_font_size(10);
    let s_bold = Style::new().with_font_size(10).bold();

    let e = datos.estadisticas;
    let mut pagina = LinearLayout::vertical();

    pagina.push(p_aligned(&datos.empresa.nombre, s_titulo, Alignment::Center));
    pagina.push(p_aligned(
        &format!("REPORTE DE VENTAS - {}", datos.fecha),
        s_subtitulo,
        Alignment::Center,
    ));
    pagina.push(p_aligned(
        &format!("Vendedor: {}", datos.vendedor),
        s_normal,
        Alignment::Center,
    ));
    pagina.push(Break::new(2.0));

    let mut totales = LinearLayout::vertical();
    totales.push(p(&format!("Notas Activas: {}", e.total_notas), s_normal));
    totales.push(p(
        &format!("Total Pollos: {}", format_cantidad(e.total_pollos)),
        s_normal,
    ));
    totales.push(p(&format!("Total Kilos: {:.2} kg", e.total_kilos), s_normal));
    totales.push(p(
        &format!("Total Facturado: {}", formatear_moneda(e.total_facturado)),
        s_bold,
    ));
    totales.push(p(
        &format!("Total Recaudado: {}", formatear_moneda(e.total_recaudado)),
        s_bold,
    ));
    pagina.push(totales.padded(Margins::trbl(3, 3, 3, 3)).framed());
    pagina.push(Break::new(1.5));

    pagina.push(p("Desglose por Vendedor:", s_bold));
    pagina.push(Break::new(0.3));
    if e.notas_por_vendedor.is_empty() {
        pagina.push(p("Sin notas activas", s_normal));
    }
    for (vendedor, notas) in &e.notas_por_vendedor {
        pagina.push(p(&format!("• {}: {} notas", vendedor, notas), s_normal));
    }

    pagina
}
