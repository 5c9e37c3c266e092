//! Módulo para los cuerpos de las _responses_ del servidor.

pub mod result;
pub mod result_kinds;
