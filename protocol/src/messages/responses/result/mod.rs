//! Módulo para el cuerpo de una _response_ RESULT de filas.

pub mod col_spec;
pub mod col_type;
pub mod rows;
pub mod rows_flags;
