//! Módulo para los cuerpos de las _requests_ del cliente.

pub mod query;
pub mod startup;
