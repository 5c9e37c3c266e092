//! Módulo para los tipos de columnas en una _response_ con filas.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    aliases::{
        results::Result,
        types::{Byte, UShort},
    },
    data_stream::DataStream,
    errors::error::Error,
    traits::Readable,
    utils::encode_string_to_bytes,
};

/// Tipo nativo de columna, tal como viene en los metadatos de una _response_ con filas.
///
/// Las colecciones anidan otros tipos, así que el tipo completo se lee recursivamente:
///
/// ```rust
/// # use protocol::data_stream::DataStream;
/// # use protocol::messages::responses::result::col_type::ColType;
/// # use protocol::traits::Readable;
/// let bytes = [0x0, 0x20, /* list */ 0x0, 0x21, /* map */ 0x0, 0x9, /* int */ 0x0, 0xA /* text */];
/// let col_type = ColType::read_from(&mut DataStream::new(&bytes));
///
/// assert!(matches!(&col_type, Ok(ColType::List(_))));
/// if let Ok(col_type) = col_type {
///     assert_eq!(col_type.to_string(), "list<map<int,text>>");
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ColType {
    /// Un tipo personalizado. El nombre de dicho tipo es el valor.
    Custom(String),

    /// Secuencia de bytes en rango ASCII [0, 127].
    Ascii,

    /// Un número de 8 bytes en complemento a dos.
    Bigint,

    /// Una secuencia de bytes "crudos".
    Blob,

    /// Un byte único que denota un valor booleano:
    ///
    /// * Un valor de `0` indica `false`.
    /// * Cualquier otro valor indica `true`.
    Boolean,

    /// Un contador, codificado como un [Bigint](ColType::Bigint).
    Counter,

    /// Número decimal de precisión arbitraria.
    ///
    /// Primero viene la escala ([Int](crate::aliases::types::Int)), y después el valor sin
    /// escalar en formato [Varint](ColType::Varint).
    Decimal,

    /// Un número de 8 bytes en formato IEEE 754 (Binary64) de precisión doble.
    Double,

    /// Un número de 4 bytes en formato IEEE 754 (Binary32) de precisión simple.
    Float,

    /// Un número de 4 bytes en complemento a dos.
    Int,

    /// Una secuencia de bytes en formato UTF-8.
    Text,

    /// Número de 8 bytes en complemento a dos indicando el tiempo en milisegundos desde la
    /// _unix epoch_ (1ro de Enero de 1970, 00:00:00).
    Timestamp,

    /// Número de 16 bytes representando cualquier versión de un UUID.
    Uuid,

    /// Un alias para el tipo [Text](ColType::Text).
    Varchar,

    /// Número de complemento a dos de longitud variable de un _integer_ con signo.
    ///
    /// Value | Encoding
    /// ------|---------
    ///   0 |     0x00
    ///   1 |     0x01
    /// 127 |     0x7F
    /// 128 |   0x0080
    ///  -1 |     0xFF
    /// -128 |     0x80
    /// -129 |   0xFF7F
    Varint,

    /// Número de 16 bytes representando un UUID (Versión 1) según RFC 4122.
    Timeuuid,

    /// Una dirección IPv4 (4 bytes) o IPv6 (16 bytes).
    Inet,

    /// Una lista de elementos del tipo anidado.
    List(Box<ColType>),

    /// Un mapa de claves del primer tipo anidado a valores del segundo.
    Map(Box<ColType>, Box<ColType>),

    /// Un conjunto de elementos del tipo anidado.
    Set(Box<ColType>),
}

impl ColType {
    /// El _tag_ de 2 bytes que identifica al tipo.
    pub fn tag(&self) -> UShort {
        match self {
            Self::Custom(_) => 0x0000,
            Self::Ascii => 0x0001,
            Self::Bigint => 0x0002,
            Self::Blob => 0x0003,
            Self::Boolean => 0x0004,
            Self::Counter => 0x0005,
            Self::Decimal => 0x0006,
            Self::Double => 0x0007,
            Self::Float => 0x0008,
            Self::Int => 0x0009,
            Self::Text => 0x000A,
            Self::Timestamp => 0x000B,
            Self::Uuid => 0x000C,
            Self::Varchar => 0x000D,
            Self::Varint => 0x000E,
            Self::Timeuuid => 0x000F,
            Self::Inet => 0x0010,
            Self::List(_) => 0x0020,
            Self::Map(_, _) => 0x0021,
            Self::Set(_) => 0x0022,
        }
    }

    /// Verifica si el tipo es una colección.
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Map(_, _) | Self::Set(_))
    }

    /// Codifica el tipo como `[option]`.
    ///
    /// Falla si el nombre de un tipo personalizado no entra en un `[string]`.
    pub fn encode(&self) -> Result<Vec<Byte>> {
        let mut bytes_vec = self.tag().to_be_bytes().to_vec();
        match self {
            Self::Custom(name) => bytes_vec.extend(encode_string_to_bytes(name)?),
            Self::List(inner) | Self::Set(inner) => bytes_vec.extend(inner.encode()?),
            Self::Map(key, value) => {
                bytes_vec.extend(key.encode()?);
                bytes_vec.extend(value.encode()?);
            }
            _ => {}
        }
        Ok(bytes_vec)
    }
}

impl Readable for ColType {
    fn read_from(stream: &mut DataStream<'_>) -> Result<Self> {
        let col_type = match stream.read_ushort()? {
            0x0000 => ColType::Custom(stream.read_string()?),
            0x0001 => ColType::Ascii,
            0x0002 => ColType::Bigint,
            0x0003 => ColType::Blob,
            0x0004 => ColType::Boolean,
            0x0005 => ColType::Counter,
            0x0006 => ColType::Decimal,
            0x0007 => ColType::Double,
            0x0008 => ColType::Float,
            0x0009 => ColType::Int,
            0x000A => ColType::Text,
            0x000B => ColType::Timestamp,
            0x000C => ColType::Uuid,
            0x000D => ColType::Varchar,
            0x000E => ColType::Varint,
            0x000F => ColType::Timeuuid,
            0x0010 => ColType::Inet,
            0x0020 => ColType::List(Box::new(ColType::read_from(stream)?)),
            0x0021 => {
                let key = ColType::read_from(stream)?;
                let value = ColType::read_from(stream)?;
                ColType::Map(Box::new(key), Box::new(value))
            }
            0x0022 => ColType::Set(Box::new(ColType::read_from(stream)?)),
            tag => {
                return Err(Error::ProtocolError(format!(
                    "El tipo de columna 0x{:04X} no existe",
                    tag
                )))
            }
        };
        Ok(col_type)
    }
}

impl Display for ColType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Custom(_) => write!(f, "custom"),
            Self::Ascii => write!(f, "ascii"),
            Self::Bigint => write!(f, "bigint"),
            Self::Blob => write!(f, "blob"),
            Self::Boolean => write!(f, "boolean"),
            Self::Counter => write!(f, "counter"),
            Self::Decimal => write!(f, "decimal"),
            Self::Double => write!(f, "double"),
            Self::Float => write!(f, "float"),
            Self::Int => write!(f, "int"),
            Self::Text => write!(f, "text"),
            Self::Timestamp => write!(f, "timestamp"),
            Self::Uuid => write!(f, "uuid"),
            Self::Varchar => write!(f, "varchar"),
            Self::Varint => write!(f, "varint"),
            Self::Timeuuid => write!(f, "timeuuid"),
            Self::Inet => write!(f, "inet"),
            Self::List(inner) => write!(f, "list<{}>", inner),
            Self::Map(key, value) => write!(f, "map<{},{}>", key, value),
            Self::Set(inner) => write!(f, "set<{}>", inner),
        }
    }
}
