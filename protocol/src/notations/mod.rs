//! Módulo para las notaciones del protocolo.

pub mod consistency;
pub mod value;
