//! Módulo para enumerar niveles de consistencia.

use {
    crate::{
        aliases::{
            results::Result,
            types::{Byte, UShort},
        },
        data_stream::DataStream,
        errors::error::Error,
        traits::{Byteable, Readable},
    },
    std::{fmt, str::FromStr},
};

/// Nivela los modos de consistencia de una _query_.
///
/// El cliente sólo los codifica; es el nodo el que los interpreta.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    /// Buscar cualquier nodo
    Any,

    /// Buscar un único nodo
    One,

    /// Buscar dos nodos
    Two,

    /// Buscar tres nodos
    Three,

    /// Decidir por mayoría, la mitad + 1 (51%)
    #[default]
    Quorum,

    /// Buscar TODOS los nodos disponibles
    All,

    /// Decidir por mayoría, en el data center local únicamente
    LocalQuorum,

    /// Decidir por mayoría, en cada data center
    EachQuorum,

    /// Buscar un único nodo, en el data center local únicamente
    LocalOne,
}

impl Consistency {
    /// El código numérico del nivel.
    pub fn code(&self) -> UShort {
        match self {
            Self::Any => 0x0000,
            Self::One => 0x0001,
            Self::Two => 0x0002,
            Self::Three => 0x0003,
            Self::Quorum => 0x0004,
            Self::All => 0x0005,
            Self::LocalQuorum => 0x0006,
            Self::EachQuorum => 0x0007,
            Self::LocalOne => 0x000A,
        }
    }
}

impl Byteable for Consistency {
    fn as_bytes(&self) -> Vec<Byte> {
        self.code().to_be_bytes().to_vec()
    }
}

impl Readable for Consistency {
    fn read_from(stream: &mut DataStream<'_>) -> Result<Self> {
        match stream.read_ushort()? {
            0x0000 => Ok(Consistency::Any),
            0x0001 => Ok(Consistency::One),
            0x0002 => Ok(Consistency::Two),
            0x0003 => Ok(Consistency::Three),
            0x0004 => Ok(Consistency::Quorum),
            0x0005 => Ok(Consistency::All),
            0x0006 => Ok(Consistency::LocalQuorum),
            0x0007 => Ok(Consistency::EachQuorum),
            0x000A => Ok(Consistency::LocalOne),
            other => Err(Error::ProtocolError(format!(
                "El nivel de consistencia 0x{:04X} no existe",
                other
            ))),
        }
    }
}

impl FromStr for Consistency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().replace('_', "").as_str() {
            "ANY" => Ok(Consistency::Any),
            "ONE" => Ok(Consistency::One),
            "TWO" => Ok(Consistency::Two),
            "THREE" => Ok(Consistency::Three),
            "QUORUM" => Ok(Consistency::Quorum),
            "ALL" => Ok(Consistency::All),
            "LOCALQUORUM" => Ok(Consistency::LocalQuorum),
            "EACHQUORUM" => Ok(Consistency::EachQuorum),
            "LOCALONE" => Ok(Consistency::LocalOne),
            _ => Err(Error::InvalidArgument(format!(
                "Consistency Level no reconocido: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let consistency = match self {
            Self::Any => "ANY",
            Self::One => "ONE",
            Self::Two => "TWO",
            Self::Three => "THREE",
            Self::Quorum => "QUORUM",
            Self::All => "ALL",
            Self::LocalQuorum => "LOCAL_QUORUM",
            Self::EachQuorum => "EACH_QUORUM",
            Self::LocalOne => "LOCAL_ONE",
        };

        write!(f, "{}", consistency)
    }
}
