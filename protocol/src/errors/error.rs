//! Módulo para los errores de la librería.

use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

use crate::aliases::types::Uint;

/// Todos los errores que pueden surgir al hablar con un nodo.
///
/// Ninguno se reintenta internamente: cada uno se devuelve directamente desde la operación
/// que lo detectó.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Se intentó leer más allá de los bytes disponibles en un [DataStream](crate::data_stream::DataStream).
    StreamUnderrun(String),

    /// El nodo mandó algo que no respeta el protocolo (opcode inesperado, frame malformado, etc).
    ProtocolError(String),

    /// Un frame de tipo [ERROR](crate::headers::opcode::Opcode::Error) decodificado.
    ///
    /// Tiene la forma `(código, mensaje)`, ver [ErrorCode](crate::errors::error_code::ErrorCode).
    ServerError(Uint, String),

    /// No se pudo establecer la conexión antes del _timeout_.
    ConnectTimeout(String),

    /// Expiró el _timeout_ de lectura del _socket_.
    ///
    /// La conexión queda inutilizable luego de esto.
    ReadTimeout(String),

    /// Falló la conexión con el nodo por algún motivo que no es un _timeout_.
    ConnectionError(String),

    /// Un dato dado por el usuario no es válido (_keyspace_ ilegal, puerto inválido, etc).
    InvalidArgument(String),

    /// El nodo pidió algo que no está implementado (por ejemplo, autenticación).
    UnsupportedFeature(String),

    /// Se pidió una fila fuera del rango `[0, count)`.
    IndexOutOfRange(String),
}

impl Error {
    /// El código de error del nodo, si es que el error vino en un frame [ERROR](crate::headers::opcode::Opcode::Error).
    pub fn server_code(&self) -> Option<Uint> {
        match self {
            Self::ServerError(code, _) => Some(*code),
            _ => None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::StreamUnderrun(msg) => write!(f, "StreamUnderrun: {}", msg),
            Self::ProtocolError(msg) => write!(f, "ProtocolError: {}", msg),
            Self::ServerError(code, msg) => write!(f, "ServerError [0x{:04X}]: {}", code, msg),
            Self::ConnectTimeout(msg) => write!(f, "ConnectTimeout: {}", msg),
            Self::ReadTimeout(msg) => write!(f, "ReadTimeout: {}", msg),
            Self::ConnectionError(msg) => write!(f, "ConnectionError: {}", msg),
            Self::InvalidArgument(msg) => write!(f, "InvalidArgument: {}", msg),
            Self::UnsupportedFeature(msg) => write!(f, "UnsupportedFeature: {}", msg),
            Self::IndexOutOfRange(msg) => write!(f, "IndexOutOfRange: {}", msg),
        }
    }
}

impl StdError for Error {}
