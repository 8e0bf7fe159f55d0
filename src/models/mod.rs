pub mod producto;
pub mod cliente;
pub mod nota;
pub mod bitacora;
pub mod usuario;
pub mod borrador;
pub mod reporte;

pub use producto::*;
pub use cliente::*;
pub use nota::*;
pub use bitacora::*;
pub use usuario::*;
pub use borrador::*;
pub use reporte::*;
