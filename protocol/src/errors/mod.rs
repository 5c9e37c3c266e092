//! Módulo para errores del protocolo.

pub mod error;
pub mod error_code;
