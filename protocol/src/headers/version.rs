//! Módulo para la versión del protocolo.

use crate::{
    aliases::{results::Result, types::Byte},
    errors::error::Error,
    traits::Byteable,
};

/// La 'versión' indica tanto la versión del protocolo a usar,
/// así como si se trata con un _request_ o un _response_.
///
/// Sólo se habla la versión 1 del protocolo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    /// _Request_ del protocolo nativo de Cassandra (Versión 1).
    RequestV1,

    /// _Response_ del protocolo nativo de Cassandra (Versión 1).
    ResponseV1,
}

impl Byteable for Version {
    fn as_bytes(&self) -> Vec<Byte> {
        match self {
            Self::RequestV1 => vec![0x1],
            Self::ResponseV1 => vec![0x81],
        }
    }
}

impl TryFrom<Byte> for Version {
    type Error = Error;
    fn try_from(byte: Byte) -> Result<Self> {
        match byte {
            0x01 => Ok(Version::RequestV1),
            0x81 => Ok(Version::ResponseV1),
            _ => Err(Error::ProtocolError(format!(
                "La versión 0x{:02X} del protocolo no está soportada",
                byte
            ))),
        }
    }
}
