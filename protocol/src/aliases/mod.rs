//! Módulo para aliases de tipos.

pub mod results;
pub mod types;
