use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

use cai_notas::commands::ubicacion::UbicacionFija;
use cai_notas::commands::{
    bitacora, borrador, exportar, notas, reportes, respaldo, ubicacion, usuarios,
};
use cai_notas::config::Configuracion;
use cai_notas::db::Database;
use cai_notas::error::Resultado;
use cai_notas::estado::AppState;
use cai_notas::models::{
    Borrador, CampoCliente, CampoFinanciero, CampoProducto, EstadoNota, FiltroVendedor, NotaVenta,
};
use cai_notas::utils::{self, formatear_moneda};
use cai_notas::{abrir_estado, logging};

/// Notas de venta de Comercializadora Avícola del Istmo
#[derive(Parser, Debug)]
#[command(name = "cai-notas", version)]
#[command(about = "Captura, guarda y exporta notas de venta de pollo")]
struct Cli {
    /// Archivo de base de datos
    #[arg(long, env = "CAI_DB")]
    db: Option<PathBuf>,

    /// Archivo de configuración (empresa y vendedores)
    #[arg(long, env = "CAI_CONFIG")]
    config: Option<PathBuf>,

    /// Carpeta con las fuentes LiberationSans-*.ttf
    #[arg(long, env = "CAI_FUENTES")]
    fuentes: Option<PathBuf>,

    /// Carpeta para el log diario (por omisión se escribe en stderr)
    #[arg(long, env = "CAI_LOGS")]
    logs: Option<PathBuf>,

    #[command(subcommand)]
    comando: Comando,
}

#[derive(Subcommand, Debug)]
enum Comando {
    /// Inicia sesión
    Entrar {
        nombre: String,
        #[arg(long, env = "CAI_CLAVE", hide_env_values = true)]
        clave: String,
    },
    /// Cierra la sesión
    Salir,
    /// Muestra la sesión activa
    Sesion,
    /// Captura un dato del cliente
    Cliente { campo: CampoClienteArg, valor: String },
    /// Escribe la ubicación actual como enlace de mapa en la dirección
    Ubicacion {
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
    },
    /// Filas de producto
    Producto {
        #[command(subcommand)]
        accion: AccionProducto,
    },
    /// Descuento, reposición, devolución, saldo anterior o abono
    Ajuste { campo: CampoFinancieroArg, valor: String },
    /// Muestra la nota en captura
    Borrador,
    /// Guarda la nota en captura
    Guardar,
    /// Guarda la nota si tiene datos y empieza una en blanco
    Nueva,
    /// Texto de la nota para mensajería
    Compartir,
    /// Notas del día
    Notas {
        #[arg(long, default_value = "all")]
        vendedor: String,
    },
    /// Resumen del día
    Resumen {
        #[arg(long, default_value = "all")]
        vendedor: String,
    },
    /// Bitácora del día
    Bitacora,
    /// Genera PDF, ZIP o CSV
    Exportar {
        #[command(subcommand)]
        tipo: TipoExportacion,
    },
    /// Cancela una nota del día (super administradores)
    Cancelar { control: String, motivo: String },
    /// Genera sal y hash para una entrada del directorio
    HashClave { clave: String },
}

#[derive(Subcommand, Debug)]
enum AccionProducto {
    Agregar,
    /// Cambia un campo de la fila indicada (1 = primera)
    Editar {
        fila: usize,
        campo: CampoProductoArg,
        valor: String,
    },
    Quitar { fila: usize },
}

#[derive(Subcommand, Debug)]
enum TipoExportacion {
    /// Guarda la nota en captura y genera su PDF
    Nota {
        #[arg(long, default_value = ".")]
        destino: PathBuf,
    },
    /// Reporte consolidado del día
    Reporte {
        #[arg(long, default_value = "all")]
        vendedor: String,
        #[arg(long, default_value = ".")]
        destino: PathBuf,
    },
    /// ZIP con resumen y una nota por archivo
    Zip {
        #[arg(long, default_value = "all")]
        vendedor: String,
        #[arg(long, default_value = ".")]
        destino: PathBuf,
    },
    /// Notas del día en CSV
    Csv {
        #[arg(long, default_value = "all")]
        vendedor: String,
        #[arg(long, default_value = ".")]
        destino: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CampoClienteArg {
    Nombre,
    Direccion,
    Telefono,
}

impl From<CampoClienteArg> for CampoCliente {
    fn from(c: CampoClienteArg) -> Self {
        match c {
            CampoClienteArg::Nombre => CampoCliente::Nombre,
            CampoClienteArg::Direccion => CampoCliente::Direccion,
            CampoClienteArg::Telefono => CampoCliente::Telefono,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CampoProductoArg {
    Rejas,
    Pollos,
    Bruto,
    Tara,
    Precio,
}

impl From<CampoProductoArg> for CampoProducto {
    fn from(c: CampoProductoArg) -> Self {
        match c {
            CampoProductoArg::Rejas => CampoProducto::Rejas,
            CampoProductoArg::Pollos => CampoProducto::Pollos,
            CampoProductoArg::Bruto => CampoProducto::PesoBruto,
            CampoProductoArg::Tara => CampoProducto::Tara,
            CampoProductoArg::Precio => CampoProducto::Precio,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CampoFinancieroArg {
    Descuento,
    Reposicion,
    Devolucion,
    SaldoAnterior,
    Abono,
}

impl From<CampoFinancieroArg> for CampoFinanciero {
    fn from(c: CampoFinancieroArg) -> Self {
        match c {
            CampoFinancieroArg::Descuento => CampoFinanciero::Descuento,
            CampoFinancieroArg::Reposicion => CampoFinanciero::Reposicion,
            CampoFinancieroArg::Devolucion => CampoFinanciero::Devolucion,
            CampoFinancieroArg::SaldoAnterior => CampoFinanciero::SaldoAnterior,
            CampoFinancieroArg::Abono => CampoFinanciero::Abono,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logger(None, cli.logs.as_deref());

    match ejecutar(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Operación fallida");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn ejecutar(cli: Cli) -> Resultado<()> {
    if let Comando::HashClave { clave } = &cli.comando {
        let sal = utils::generar_salt();
        let hash = utils::hash_clave(&sal, clave);
        println!(
            "{}",
            serde_json::json!({ "clave_sal": sal, "clave_hash": hash })
        );
        return Ok(());
    }

    let db_path = cli.db.unwrap_or_else(Database::ruta_por_defecto);
    let config_path = cli.config.unwrap_or_else(Configuracion::ruta_por_defecto);
    let state = abrir_estado(&db_path, &config_path, cli.fuentes)?;

    match cli.comando {
        Comando::HashClave { .. } => {}
        Comando::Entrar { nombre, clave } => {
            let sesion = usuarios::iniciar_sesion(&state, &nombre, &clave)?;
            println!("Bienvenido(a), {}", sesion.nombre);
        }
        Comando::Salir => {
            usuarios::cerrar_sesion(&state)?;
            println!("Sesión cerrada");
        }
        Comando::Sesion => match usuarios::obtener_sesion_actual(&state)? {
            Some(s) => {
                let privilegios = if usuarios::es_privilegiado(&state, &s) {
                    " (ve todas las notas)"
                } else {
                    ""
                };
                println!("{}{}", s.nombre, privilegios);
            }
            None => println!("Sin sesión"),
        },
        Comando::Cliente { campo, valor } => {
            let b = borrador::editar_cliente(&state, campo.into(), &valor)?;
            mostrar_borrador(&state, &b)?;
        }
        Comando::Ubicacion { lat, lon } => {
            let state = match (lat, lon) {
                (Some(lat), Some(lon)) => state.con_ubicacion(UbicacionFija::new(lat, lon)),
                _ => state,
            };
            let b = ubicacion::capturar_ubicacion(&state)?;
            println!("{}", b.cliente.direccion);
        }
        Comando::Producto { accion } => {
            let b = match accion {
                AccionProducto::Agregar => borrador::agregar_producto(&state)?,
                AccionProducto::Editar { fila, campo, valor } => {
                    borrador::editar_producto(&state, fila, campo.into(), &valor)?
                }
                AccionProducto::Quitar { fila } => borrador::quitar_producto(&state, fila)?,
            };
            mostrar_borrador(&state, &b)?;
        }
        Comando::Ajuste { campo, valor } => {
            let b = borrador::editar_financiero(&state, campo.into(), &valor)?;
            mostrar_borrador(&state, &b)?;
        }
        Comando::Borrador => {
            usuarios::verificar_sesion(&state)?;
            let b = borrador::cargar_borrador(&state)?;
            mostrar_borrador(&state, &b)?;
        }
        Comando::Guardar => {
            let nota = notas::guardar_nota(&state)?;
            println!("Nota {} guardada", nota.numero_control);
        }
        Comando::Nueva => match notas::nueva_nota(&state)? {
            Some(nota) => println!("Nota {} guardada. Nueva nota en blanco.", nota.numero_control),
            None => println!("Nueva nota en blanco."),
        },
        Comando::Compartir => println!("{}", notas::compartir_nota(&state)?),
        Comando::Notas { vendedor } => {
            let lista = notas::listar_notas_dia(&state, &FiltroVendedor::desde_texto(&vendedor))?;
            if lista.is_empty() {
                println!("Sin notas para hoy");
            }
            for nota in &lista {
                println!("{}", linea_nota(nota));
            }
        }
        Comando::Resumen { vendedor } => {
            let r = reportes::resumen_diario(&state, &FiltroVendedor::desde_texto(&vendedor))?;
            println!("Resumen del {}", r.fecha);
            println!("  Notas:      {}", r.notas);
            println!("  Pollos:     {}", r.pollos);
            println!("  Facturado:  {}", formatear_moneda(r.facturado));
            println!("  Recaudado:  {}", formatear_moneda(r.recaudado));
        }
        Comando::Bitacora => {
            for e in bitacora::listar_bitacora(&state)? {
                let hora = chrono::DateTime::<chrono::Utc>::from_timestamp_millis(e.timestamp)
                    .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
                    .unwrap_or_default();
                println!("{}  {:<20} {:<18} {}", hora, e.usuario, e.accion, e.detalles);
            }
        }
        Comando::Exportar { tipo } => {
            let ruta = match tipo {
                TipoExportacion::Nota { destino } => exportar::exportar_nota_pdf(&state, &destino)?,
                TipoExportacion::Reporte { vendedor, destino } => exportar::exportar_reporte_pdf(
                    &state,
                    &FiltroVendedor::desde_texto(&vendedor),
                    &destino,
                )?,
                TipoExportacion::Zip { vendedor, destino } => respaldo::exportar_respaldo_zip(
                    &state,
                    &FiltroVendedor::desde_texto(&vendedor),
                    &destino,
                )?,
                TipoExportacion::Csv { vendedor, destino } => exportar::exportar_notas_csv(
                    &state,
                    &FiltroVendedor::desde_texto(&vendedor),
                    &destino,
                )?,
            };
            println!("{}", ruta.display());
        }
        Comando::Cancelar { control, motivo } => {
            let nota = notas::cancelar_nota(&state, &control, &motivo)?;
            println!("Nota {} cancelada", nota.numero_control);
        }
    }
    Ok(())
}

fn mostrar_borrador(state: &AppState, b: &Borrador) -> Resultado<()> {
    println!("No. de Control: {}", borrador::siguiente_numero_control(state)?);
    println!("Fecha: {}", state.fecha_hoy());
    println!("Cliente: {}", b.cliente.nombre_o_publico());
    if !b.cliente.telefono.is_empty() {
        println!("Teléfono: {}", b.cliente.telefono);
    }
    if !b.cliente.direccion.is_empty() {
        println!("Dirección: {}", b.cliente.direccion);
    }
    println!();
    println!(
        "{:>3} {:>6} {:>6} {:>9} {:>8} {:>9} {:>9} {:>8} {:>12}",
        "#", "Rejas", "Pollos", "Bruto", "Tara", "Neto", "Promedio", "Precio", "Importe"
    );
    for (i, f) in b.productos.iter().enumerate() {
        println!(
            "{:>3} {:>6} {:>6} {:>9.2} {:>8.2} {:>9.2} {:>9.3} {:>8.2} {:>12}",
            i + 1,
            f.rejas,
            f.pollos,
            f.peso_bruto,
            f.tara,
            f.peso_neto,
            f.promedio,
            f.precio,
            formatear_moneda(f.importe)
        );
    }
    let f = &b.financieros;
    println!();
    println!("Total Nota:          {:>12}", formatear_moneda(f.total_nota));
    println!("(-) Descuento:       {:>12}", formatear_moneda(f.descuento));
    println!("(-) Devolución:      {:>12}", formatear_moneda(f.devolucion));
    println!("(-) Reposición:      {:>12}", formatear_moneda(f.reposicion));
    println!("Sub Total:           {:>12}", formatear_moneda(f.subtotal));
    println!("(+) Saldo Anterior:  {:>12}", formatear_moneda(f.saldo_anterior));
    println!("(-) Pago o Abono:    {:>12}", formatear_moneda(f.abono));
    println!("(=) Saldo Total:     {:>12}", formatear_moneda(f.saldo_final));
    println!(
        "{}",
        if f.esta_pagada() {
            "Nota Pagada"
        } else {
            "Saldo Pendiente"
        }
    );
    Ok(())
}

fn linea_nota(nota: &NotaVenta) -> String {
    let estado = match nota.estado {
        EstadoNota::Activa if nota.financieros.esta_pagada() => "Pagada".to_string(),
        EstadoNota::Activa => "Pendiente".to_string(),
        EstadoNota::Cancelada => format!(
            "CANCELADA ({})",
            nota.motivo_cancelacion.as_deref().unwrap_or("")
        ),
    };
    format!(
        "{}  {:<24} {:<22} {:>12}  {}",
        nota.numero_control,
        nota.cliente.nombre_o_publico(),
        nota.creador,
        formatear_moneda(nota.financieros.subtotal),
        estado
    )
}
