pub mod bitacora;
pub mod borrador;
pub mod exportar;
pub mod notas;
pub mod reportes;
pub mod respaldo;
pub mod ubicacion;
pub mod usuarios;

#[cfg(test)]
pub(crate) mod pruebas;
