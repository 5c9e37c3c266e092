//! Módulo para estructura global de encabezados.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    aliases::{results::Result, types::Byte},
    errors::error::Error,
    headers::{flags::Flag, length::Length, opcode::Opcode, stream::Stream, version::Version},
    traits::{Byteable, Maskable},
};

/// La cantidad fija de bytes que ocupan los encabezados de un frame.
pub const HEADERS_LEN: usize = 8;

/// Estructura que engloba a todos los encabezados de cualquier mensaje en el protocolo.
///
/// Ocupa siempre [HEADERS_LEN] bytes: `version`, `flags`, `stream` (con signo), `opcode` y
/// el largo del cuerpo en 4 bytes _big-endian_.
#[derive(Debug, Clone, PartialEq)]
pub struct Headers {
    /// La [versión](Version) del mensaje.
    pub version: Version,

    /// Las diferentes flags del mensaje.
    pub flags: Vec<Flag>,

    /// El ID de este mensaje. El cliente siempre usa `0`.
    pub stream: Stream,

    /// El tipo de operación del mensaje. Influye en la estructura del contenido.
    pub opcode: Opcode,

    /// La longitud del **contenido** del mensaje en su totalidad.
    pub length: Length,
}

impl Headers {
    /// Crea una nueva instancia de encabezados.
    pub fn new(
        version: Version,
        flags: Vec<Flag>,
        stream: Stream,
        opcode: Opcode,
        length: Length,
    ) -> Self {
        Self {
            version,
            flags,
            stream,
            opcode,
            length,
        }
    }

    /// Los encabezados de un _request_ del cliente: sin flags y en el stream `0`.
    pub fn request(opcode: Opcode, body: &[Byte]) -> Result<Self> {
        Ok(Self::new(
            Version::RequestV1,
            Vec::new(),
            Stream::default(),
            opcode,
            Length::for_body(body)?,
        ))
    }
}

impl Byteable for Headers {
    fn as_bytes(&self) -> Vec<Byte> {
        let mut bytes_vec = Vec::<Byte>::with_capacity(HEADERS_LEN);
        bytes_vec.extend(self.version.as_bytes());

        let borrowed_flags: Vec<&Flag> = self.flags.iter().collect();
        bytes_vec.push(Flag::accumulate(&borrowed_flags[..]));

        bytes_vec.extend(self.stream.as_bytes());
        bytes_vec.extend(self.opcode.as_bytes());
        bytes_vec.extend(self.length.as_bytes());

        bytes_vec
    }
}

impl TryFrom<&[Byte]> for Headers {
    type Error = Error;
    fn try_from(bytes: &[Byte]) -> Result<Self> {
        if bytes.len() < HEADERS_LEN {
            return Err(Error::ProtocolError(format!(
                "Se necesitan al menos {} bytes para formar los encabezados.",
                HEADERS_LEN
            )));
        }

        let version = Version::try_from(bytes[0])?;
        let flags = Flag::decompose(&bytes[1]);
        let stream = Stream::from(bytes[2]);
        let opcode = Opcode::try_from(bytes[3])?;
        let length = Length::try_from(&bytes[4..HEADERS_LEN])?;
        Ok(Self::new(version, flags, stream, opcode, length))
    }
}

impl Display for Headers {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "version={:?} flags={:?} stream={} opcode={} length={}",
            self.version, self.flags, self.stream, self.opcode, self.length.len
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_1_serializar_request() {
        let headers = Headers::request(Opcode::Options, &[]);

        assert!(headers.is_ok());
        if let Ok(headers) = headers {
            assert_eq!(
                headers.as_bytes(),
                vec![0x01, 0x00, 0x00, 0x05, 0x00, 0x00, 0x00, 0x00]
            );
        }
    }

    #[test]
    fn test_2_deserializar_response() {
        let bytes = [0x81, 0x02, 0xFF, 0x08, 0x00, 0x00, 0x01, 0x00];
        let headers = Headers::try_from(&bytes[..]);

        assert!(headers.is_ok());
        if let Ok(headers) = headers {
            assert_eq!(headers.version, Version::ResponseV1);
            assert_eq!(headers.flags, vec![Flag::Tracing]);
            assert_eq!(headers.stream.id(), -1);
            assert_eq!(headers.opcode, Opcode::Result);
            assert_eq!(headers.length.len, 256);
        }
    }

    #[test]
    fn test_3_muy_pocos_bytes() {
        let bytes = [0x81, 0x00, 0x00, 0x08];

        assert!(matches!(
            Headers::try_from(&bytes[..]),
            Err(Error::ProtocolError(_))
        ));
    }

    #[test]
    fn test_4_version_y_opcode_invalidos() {
        let mala_version = [0x05, 0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00];
        let mal_opcode = [0x81, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00];

        assert!(Headers::try_from(&mala_version[..]).is_err());
        assert!(Headers::try_from(&mal_opcode[..]).is_err());
    }
}
