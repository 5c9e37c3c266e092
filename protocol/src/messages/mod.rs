//! Módulo para los cuerpos de los mensajes del protocolo.

pub mod requests;
pub mod responses;
