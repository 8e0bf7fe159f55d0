use serde::{Deserialize, Serialize};

use crate::utils;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Admin,
    User,
}

/// Entrada del directorio de vendedores (con hash/salt, nunca la clave)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UsuarioDirectorio {
    pub nombre: String,
    pub rol: Rol,
    pub clave_sal: String,
    pub clave_hash: String,
}

/// Sesión activa. Se guarda con los nombres del registro del navegador.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SesionActiva {
    #[serde(rename = "name")]
    pub nombre: String,
    #[serde(rename = "role")]
    pub rol: Rol,
}

/// Directorio de vendedores y predicado de super administrador
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DirectorioUsuarios {
    #[serde(default)]
    pub usuarios: Vec<UsuarioDirectorio>,
    /// Nombres exactos con acceso a las notas de todo el personal
    #[serde(default)]
    pub super_admins: Vec<String>,
}

impl DirectorioUsuarios {
    /// Verifica nombre y clave contra el directorio
    pub fn autenticar(&self, nombre: &str, clave: &str) -> Option<SesionActiva> {
        self.usuarios
            .iter()
            .find(|u| u.nombre == nombre && utils::hash_clave(&u.clave_sal, clave) == u.clave_hash)
            .map(|u| SesionActiva {
                nombre: u.nombre.clone(),
                rol: u.rol,
            })
    }

    pub fn es_super_admin(&self, nombre: &str) -> bool {
        self.super_admins.iter().any(|s| s == nombre)
    }

    pub fn nombres(&self) -> Vec<&str> {
        self.usuarios.iter().map(|u| u.nombre.as_str()).collect()
    }
}
