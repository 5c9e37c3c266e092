//! Módulo para los encabezados de un frame.

pub mod flags;
pub mod length;
pub mod msg_headers;
pub mod opcode;
pub mod stream;
pub mod version;
