//! Módulo para el header Length.

use crate::{
    aliases::{
        results::Result,
        types::{Byte, Uint},
    },
    errors::error::Error,
    traits::Byteable,
};

/// El límite del cuerpo de un frame: 256 MB.
pub const BODY_LENGTH_LIMIT: Uint = 0x10000000;

/// Este header indica qué tan largo es el cuerpo del frame.
///
/// _(Actualmente está limitado a 256 MB)_
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    /// Largo de un cuerpo del frame
    pub len: Uint,
}

impl Length {
    /// Crea un nuevo header de Length.
    pub fn new(len: Uint) -> Self {
        Self { len }
    }

    /// Crea el header a partir del largo de un cuerpo a mandar, verificando el límite.
    pub fn for_body(body: &[Byte]) -> Result<Self> {
        match Uint::try_from(body.len()) {
            Ok(n) if n <= BODY_LENGTH_LIMIT => Ok(Self::new(n)),
            _ => Err(Error::InvalidArgument(format!(
                "El cuerpo a mandar tiene {} bytes, y supera los 256MB",
                body.len()
            ))),
        }
    }
}

impl Byteable for Length {
    fn as_bytes(&self) -> Vec<Byte> {
        self.len.to_be_bytes().to_vec()
    }
}

impl TryFrom<&[Byte]> for Length {
    type Error = Error;
    fn try_from(integer_in_bytes: &[Byte]) -> Result<Self> {
        let bytes_array: [Byte; 4] = match integer_in_bytes.try_into() {
            Ok(bytes_array) => bytes_array,
            Err(_) => {
                return Err(Error::ProtocolError(format!(
                    "Se esperaban 4 bytes para el largo del cuerpo, se recibieron {}",
                    integer_in_bytes.len()
                )))
            }
        };
        match Uint::from_be_bytes(bytes_array) {
            n if n <= BODY_LENGTH_LIMIT => Ok(Length::new(n)),
            _ => Err(Error::ProtocolError(
                "El body del mensaje es muy largo (supera los 256MB)".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_1_serializar() {
        for ind in 0..1000 {
            let length_bytes = Length::new(ind).as_bytes();

            assert_eq!(length_bytes.len(), 4);
            assert_eq!(length_bytes, ind.to_be_bytes());
        }
    }

    #[test]
    fn test_2_deserializar() {
        let length_res = Length::try_from(&[0x0, 0x0, 0x10, 0x1][..]);

        assert!(length_res.is_ok());
        if let Ok(length) = length_res {
            assert_eq!(length.len, 0x1001);
        }
    }

    #[test]
    fn test_3_bytes_de_longitud_incorrecta() {
        let corto_res = Length::try_from(&[0x0, 0x1, 0x2][..]);
        let largo_res = Length::try_from(&[0x0, 0x1, 0x2, 0x3, 0x5][..]);

        assert!(matches!(corto_res, Err(Error::ProtocolError(_))));
        assert!(matches!(largo_res, Err(Error::ProtocolError(_))));
    }

    #[test]
    fn test_4_longitud_de_mensaje_muy_grande() {
        let justo = Length::try_from(&[0x10, 0x0, 0x0, 0x0][..]);
        let grande_res = Length::try_from(&[0x10, 0x0, 0x0, 0x1][..]);

        assert!(matches!(justo, Ok(Length { len: BODY_LENGTH_LIMIT })));
        assert!(matches!(grande_res, Err(Error::ProtocolError(_))));
    }

    #[test]
    fn test_5_largo_de_un_cuerpo() {
        assert_eq!(Length::for_body(&[]), Ok(Length::new(0)));
        assert_eq!(Length::for_body(&[0x1, 0x2, 0x3]), Ok(Length::new(3)));
    }
}
