//! Documentos PDF: nota individual, reporte consolidado y resumen del respaldo.
//! Los métodos devuelven el documento ya terminado; no hay espera de maquetado.

mod nota;
mod reporte;

use genpdf::elements::{PaddedElement, Paragraph, StyledElement};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, Margins, PaperSize, SimplePageDecorator};
use std::path::PathBuf;
use tracing::debug;

use crate::config::Empresa;
use crate::error::{Error, Resultado};
use crate::models::{EstadisticasReporte, NotaVenta};

/// Datos de entrada del reporte consolidado
pub struct DatosReporte<'a> {
    pub empresa: &'a Empresa,
    /// DD/MM/AAAA
    pub fecha: &'a str,
    /// Vendedor filtrado o "Todos"
    pub vendedor: &'a str,
    pub estadisticas: &'a EstadisticasReporte,
    pub notas: &'a [NotaVenta],
}

/// Colaborador que convierte notas en PDF
pub trait RenderizadorPdf: Send + Sync {
    fn nota(&self, nota: &NotaVenta, empresa: &Empresa) -> Resultado<Vec<u8>>;

    /// Página de resumen seguida de una página por nota
    fn reporte(&self, datos: &DatosReporte<'_>) -> Resultado<Vec<u8>>;

    /// Sólo la página de resumen
    fn resumen(&self, datos: &DatosReporte<'_>) -> Resultado<Vec<u8>>;
}

/// Renderizador con genpdf y fuentes LiberationSans
pub struct PdfGenpdf {
    fuentes: PathBuf,
}

impl PdfGenpdf {
    pub fn new(fuentes: PathBuf) -> Self {
        PdfGenpdf { fuentes }
    }

    fn documento(&self, titulo: &str) -> Resultado<Document> {
        let font_family = cargar_fuentes(&self.fuentes)?;
        let mut doc = Document::new(font_family);
        doc.set_title(titulo);
        doc.set_paper_size(PaperSize::Letter);

        let mut decorator = SimplePageDecorator::new();
        decorator.set_margins(Margins::trbl(15, 15, 15, 15));
        doc.set_page_decorator(decorator);
        Ok(doc)
    }
}

impl RenderizadorPdf for PdfGenpdf {
    fn nota(&self, nota: &NotaVenta, empresa: &Empresa) -> Resultado<Vec<u8>> {
        let mut doc = self.documento(&format!("Nota {}", nota.numero_control))?;
        doc.push(nota::elementos_nota(nota, empresa)?);
        renderizar(doc)
    }

    fn reporte(&self, datos: &DatosReporte<'_>) -> Resultado<Vec<u8>> {
        let mut doc = self.documento(&format!("Reporte de ventas {}", datos.fecha))?;
        doc.push(reporte::elementos_resumen(datos));
        for n in datos.notas {
            doc.push(genpdf::elements::PageBreak::new());
            doc.push(nota::elementos_nota(n, datos.empresa)?);
        }
        renderizar(doc)
    }

    fn resumen(&self, datos: &DatosReporte<'_>) -> Resultado<Vec<u8>> {
        let mut doc = self.documento(&format!("Resumen de ventas {}", datos.fecha))?;
        doc.push(reporte::elementos_resumen(datos));
        renderizar(doc)
    }
}

fn cargar_fuentes(dir: &std::path::Path) -> Resultado<FontFamily<FontData>> {
    genpdf::fonts::from_files(dir, "LiberationSans", None).map_err(|e| {
        Error::Pdf(format!(
            "Error cargando fuentes: {}. Asegúrese de que los archivos LiberationSans-*.ttf están en {}",
            e,
            dir.display()
        ))
    })
}

fn renderizar(doc: Document) -> Resultado<Vec<u8>> {
    let mut buffer = Vec::new();
    doc.render(&mut buffer)?;
    debug!(bytes = buffer.len(), "PDF generado");
    Ok(buffer)
}

// ============================================
// HELPERS
// ============================================

fn p(text: &str, style: Style) -> StyledElement<Paragraph> {
    Paragraph::new(text).styled(style)
}

fn p_aligned(text: &str, style: Style, align: Alignment) -> impl Element {
    Paragraph::new(text).aligned(align).styled(style)
}

/// Paragraph con padding (izquierdo 3mm) para celdas de tabla
fn pp(text: &str, style: Style) -> PaddedElement<StyledElement<Paragraph>> {
    Paragraph::new(text).styled(style).padded(Margins::trbl(1, 1, 1, 3))
}

/// Alineado a la derecha con padding (valores numéricos)
fn pp_right(text: &str, style: Style) -> impl Element {
    Paragraph::new(text)
        .aligned(Alignment::Right)
        .styled(style)
        .padded(Margins::trbl(1, 3, 1, 1))
}

fn format_cantidad(cant: f64) -> String {
    if cant == cant.floor() {
        format!("{:.0}", cant)
    } else {
        format!("{:.2}", cant)
    }
}

fn format_kilos(val: f64) -> String {
    format!("{:.2}", val)
}
