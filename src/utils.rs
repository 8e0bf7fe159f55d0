use chrono::NaiveDate;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Genera un salt aleatorio de 16 caracteres hexadecimales
pub fn generar_salt() -> String {
    let mut rng = rand::thread_rng();
    let salt: u64 = rng.gen();
    format!("{:016x}", salt)
}

/// Hash de clave con salt usando SHA-256, en hexadecimal
pub fn hash_clave(salt: &str, clave: &str) -> String {
    let input = format!("{}{}", salt, clave);
    let hash = Sha256::digest(input.as_bytes());
    format!("{:x}", hash)
}

/// Convierte lo capturado a número tomando el prefijo numérico
/// (`"12kg"` vale 12); vacío o no numérico vale 0
pub fn a_numero(valor: &str) -> f64 {
    let texto = valor.trim_start();
    let prefijo = &texto[..largo_numerico(texto)];
    match prefijo.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Largo en bytes del número decimal al inicio del texto: signo, dígitos,
/// punto y exponente opcionales
fn largo_numerico(texto: &str) -> usize {
    let b = texto.as_bytes();
    let digitos = |desde: usize| b[desde..].iter().take_while(|c| c.is_ascii_digit()).count();

    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let enteros = digitos(i);
    i += enteros;
    let mut decimales = 0;
    if b.get(i) == Some(&b'.') {
        decimales = digitos(i + 1);
        if enteros > 0 || decimales > 0 {
            i += 1 + decimales;
        }
    }
    if enteros == 0 && decimales == 0 {
        return 0;
    }
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exponente = digitos(j);
        if exponente > 0 {
            i = j + exponente;
        }
    }
    i
}

/// Fecha compacta para claves de almacenamiento y números de control (DDMMAAAA)
pub fn fecha_clave(fecha: NaiveDate) -> String {
    fecha.format("%d%m%Y").to_string()
}

/// Fecha como se muestra en notas y reportes (DD/MM/AAAA)
pub fn fecha_visible(fecha: NaiveDate) -> String {
    fecha.format("%d/%m/%Y").to_string()
}

/// CAI + secuencial a 3 dígitos + DDMMAAAA
pub fn numero_control(secuencial: u32, fecha: NaiveDate) -> String {
    format!("CAI{:03}{}", secuencial, fecha_clave(fecha))
}

/// Formato de moneda es-MX: $1,234.56
pub fn formatear_moneda(monto: f64) -> String {
    let centavos = (monto.abs() * 100.0).round() as u64;
    let enteros = (centavos / 100).to_string();
    let mut agrupado = String::with_capacity(enteros.len() + enteros.len() / 3);
    for (i, c) in enteros.chars().enumerate() {
        if i > 0 && (enteros.len() - i) % 3 == 0 {
            agrupado.push(',');
        }
        agrupado.push(c);
    }
    let signo = if monto < 0.0 && centavos > 0 { "-" } else { "" };
    format!("{}${}.{:02}", signo, agrupado, centavos % 100)
}
