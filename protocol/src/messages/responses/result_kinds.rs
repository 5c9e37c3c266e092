//! Módulo para los tipos de _responses_ de tipo RESULT.

use crate::{
    aliases::{results::Result, types::Byte},
    data_stream::DataStream,
    errors::error::Error,
    traits::{Byteable, Readable},
};

/// Tipos de resultados de una _query_. Son los primeros 4 bytes del cuerpo de un RESULT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// El resultado no contiene información adicional en el cuerpo.
    Void,

    /// Resultado de SELECT, que devuelve las filas pedidas.
    Rows,

    /// El resultado de una _query_ `use`.
    SetKeyspace,

    /// El resultado de una _query_ de tipo PREPARE.
    Prepared,

    /// El resultado de una _query_ que altera un _schema_.
    SchemaChange,
}

impl Byteable for ResultKind {
    fn as_bytes(&self) -> Vec<Byte> {
        match self {
            Self::Void => vec![0x0, 0x0, 0x0, 0x1],
            Self::Rows => vec![0x0, 0x0, 0x0, 0x2],
            Self::SetKeyspace => vec![0x0, 0x0, 0x0, 0x3],
            Self::Prepared => vec![0x0, 0x0, 0x0, 0x4],
            Self::SchemaChange => vec![0x0, 0x0, 0x0, 0x5],
        }
    }
}

impl Readable for ResultKind {
    fn read_from(stream: &mut DataStream<'_>) -> Result<Self> {
        let res = match stream.read_int()? {
            0x01 => ResultKind::Void,
            0x02 => ResultKind::Rows,
            0x03 => ResultKind::SetKeyspace,
            0x04 => ResultKind::Prepared,
            0x05 => ResultKind::SchemaChange,
            other => {
                return Err(Error::ProtocolError(format!(
                    "El tipo de RESULT 0x{:04X} no existe",
                    other
                )))
            }
        };
        Ok(res)
    }
}
