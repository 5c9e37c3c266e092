//! Módulo para el opcode del mensaje el protocolo.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    aliases::{results::Result, types::Byte},
    errors::error::Error,
    traits::Byteable,
};

/// Describe la operación a utilizar en el protocolo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    /// Indica una _Response_ en la que ocurrió algún tipo de error procesando una _Request_.
    ///
    /// El cuerpo empieza con un [código de error](crate::errors::error_code::ErrorCode).
    Error,

    /// Indica una _Request_ para pedir inicializar una conexión.
    ///
    /// En cuyo caso, el servidor responderá con [READY](Opcode::Ready)
    /// o [AUTHENTICATE](Opcode::Authenticate).
    Startup,

    /// Indica una _Response_ en la que el servidor enuncia que está listo para recibir _queries_.
    Ready,

    /// Indica una _Response_ en la que el servidor pide credenciales al cliente para autorizar
    /// la conexión. El cuerpo es un [String] con el nombre del autenticador.
    Authenticate,

    /// Indica una _Request_ con las credenciales pedidas por un [AUTHENTICATE](Opcode::Authenticate).
    Credentials,

    /// Indica una _Request_ en la que el cliente le pregunta al servidor qué tipo de opciones
    /// hay para un [STARTUP](Opcode::Startup).
    Options,

    /// Indica una _Response_ a un [OPTIONS](Opcode::Options), con las opciones disponibles
    /// en un [multimap](crate::aliases::types::SupportedMultiMap).
    Supported,

    /// Indica una _Request_ en la que el cliente hace una _query_ al servidor.
    ///
    /// El cuerpo tiene el formato `<query><consistency>` donde:
    /// * `<query>` es un _long string_ con la _query_ misma.
    /// * `<consistency>` es un dato de tipo [Consistency](crate::notations::consistency::Consistency).
    Query,

    /// Indica una _Response_ a una _query_.
    ///
    /// El contenido vendrá acompañado de un [Int](crate::aliases::types::Int) indicando el
    /// [tipo](crate::messages::responses::result_kinds::ResultKind) de resultado.
    Result,

    /// Indica una _Request_ en la que el cliente prepara una _query_ para su posterior ejecución.
    Prepare,

    /// Indica una _Request_ en la que el cliente pide ejecutar una _query_ preparada.
    Execute,

    /// Indica una _Request_ para registrar esta conexión para "escuchar" [eventos](Opcode::Event).
    Register,

    /// Indica una _Response_ en la que el server comunica un evento.
    Event,
}

impl Byteable for Opcode {
    fn as_bytes(&self) -> Vec<Byte> {
        let byte = match self {
            Self::Error => 0x0,
            Self::Startup => 0x1,
            Self::Ready => 0x2,
            Self::Authenticate => 0x3,
            Self::Credentials => 0x4,
            Self::Options => 0x5,
            Self::Supported => 0x6,
            Self::Query => 0x7,
            Self::Result => 0x8,
            Self::Prepare => 0x9,
            Self::Execute => 0xA,
            Self::Register => 0xB,
            Self::Event => 0xC,
        };
        vec![byte]
    }
}

impl TryFrom<Byte> for Opcode {
    type Error = Error;
    fn try_from(byte: Byte) -> Result<Self> {
        match byte {
            0x00 => Ok(Opcode::Error),
            0x01 => Ok(Opcode::Startup),
            0x02 => Ok(Opcode::Ready),
            0x03 => Ok(Opcode::Authenticate),
            0x04 => Ok(Opcode::Credentials),
            0x05 => Ok(Opcode::Options),
            0x06 => Ok(Opcode::Supported),
            0x07 => Ok(Opcode::Query),
            0x08 => Ok(Opcode::Result),
            0x09 => Ok(Opcode::Prepare),
            0x0A => Ok(Opcode::Execute),
            0x0B => Ok(Opcode::Register),
            0x0C => Ok(Opcode::Event),
            _ => Err(Error::ProtocolError(format!(
                "El opcode 0x{:02X} no es válido",
                byte
            ))),
        }
    }
}

impl Display for Opcode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Error => "ERROR",
            Self::Startup => "STARTUP",
            Self::Ready => "READY",
            Self::Authenticate => "AUTHENTICATE",
            Self::Credentials => "CREDENTIALS",
            Self::Options => "OPTIONS",
            Self::Supported => "SUPPORTED",
            Self::Query => "QUERY",
            Self::Result => "RESULT",
            Self::Prepare => "PREPARE",
            Self::Execute => "EXECUTE",
            Self::Register => "REGISTER",
            Self::Event => "EVENT",
        };
        write!(f, "{}", name)
    }
}
