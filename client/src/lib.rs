//! Cliente sincrónico del protocolo binario nativo de Cassandra (versión 1).
#![warn(missing_docs)]

pub mod config;
pub mod connection;
pub mod query_result;
pub mod transport;

use logger::LoggerError;

/// Reporta por `stderr` una falla del logger. Loguear nunca corta un _request_.
pub(crate) fn report(res: Result<(), LoggerError>) {
    if let Err(err) = res {
        eprintln!("No se pudo escribir el log: {}", err);
    }
}
