//! Módulo para el cuerpo de un mensaje STARTUP.

use crate::{
    aliases::{
        results::Result,
        types::{Byte, StringMap},
    },
    utils::encode_string_map_to_bytes,
};

/// La clave obligatoria de las opciones de un STARTUP.
pub const CQL_VERSION: &str = "CQL_VERSION";

/// La versión de CQL que se pide por defecto.
pub const DEFAULT_CQL_VERSION: &str = "3.0.0";

/// Las opciones con las que se inicializa una conexión.
#[derive(Debug, Clone, PartialEq)]
pub struct Startup {
    options: StringMap,
}

impl Startup {
    /// Crea un STARTUP que sólo pide la versión de CQL dada.
    pub fn new(cql_version: &str) -> Self {
        Self {
            options: vec![(CQL_VERSION.to_string(), cql_version.to_string())],
        }
    }

    /// Agrega una opción. Las opciones se mandan en el orden en que se agregan.
    pub fn with_option(mut self, key: &str, value: &str) -> Self {
        self.options.push((key.to_string(), value.to_string()));
        self
    }

    /// Las opciones del mensaje.
    pub fn options(&self) -> &StringMap {
        &self.options
    }

    /// Codifica el cuerpo: un `[string map]` con las opciones.
    pub fn encode(&self) -> Result<Vec<Byte>> {
        encode_string_map_to_bytes(&self.options)
    }
}

impl Default for Startup {
    fn default() -> Self {
        Self::new(DEFAULT_CQL_VERSION)
    }
}
