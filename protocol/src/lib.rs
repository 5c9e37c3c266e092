//! Librería del protocolo binario nativo de Cassandra (versión 1), del lado del cliente.
#![warn(missing_docs)]

pub mod aliases;
pub mod data_stream;
pub mod errors;
pub mod frame;
pub mod headers;
pub mod messages;
pub mod notations;
pub mod traits;
pub mod utils;
