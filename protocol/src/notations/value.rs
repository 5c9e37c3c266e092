//! Módulo para los valores decodificados de una celda.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::aliases::types::{Byte, Double, Float, Int, Long};

/// El valor de una celda, ya decodificado según el tipo de su columna.
///
/// Los enteros de precisión arbitraria (`bigint`, `counter`, `varint`) y los decimales se
/// guardan como texto en base 10, así no se pierde precisión.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Una celda vacía, o que no se pudo decodificar.
    Null,

    /// Texto (`ascii`, `text` o `varchar`).
    Text(String),

    /// Un entero de precisión arbitraria, en base 10.
    Varint(String),

    /// Bytes crudos.
    Blob(Vec<Byte>),

    /// Un booleano.
    Boolean(bool),

    /// Un decimal de precisión arbitraria, en base 10.
    Decimal(String),

    /// Un número de precisión doble.
    Double(Double),

    /// Un número de precisión simple.
    Float(Float),

    /// Un entero de 4 bytes.
    Int(Int),

    /// Segundos desde la _unix epoch_.
    Timestamp(Long),

    /// Un UUID en formato `8-4-4-4-12`.
    Uuid(String),

    /// Una dirección IP.
    Inet(String),

    /// Una lista.
    List(Vec<Value>),

    /// Un conjunto, en el orden en el que llegó.
    Set(Vec<Value>),

    /// Un mapa, en el orden en el que llegó.
    Map(Vec<(Value, Value)>),
}

impl Value {
    /// Verifica si el valor es nulo.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// El contenido como texto, si el valor es de alguno de los tipos que se guardan así.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Varint(s) | Self::Decimal(s) | Self::Uuid(s) | Self::Inet(s) => {
                Some(s)
            }
            _ => None,
        }
    }
}

fn join<T: Display>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Null => write!(f, "null"),
            Self::Text(s)
            | Self::Varint(s)
            | Self::Decimal(s)
            | Self::Uuid(s)
            | Self::Inet(s) => write!(f, "{}", s),
            Self::Blob(bytes) => {
                write!(f, "0x")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Double(n) => write!(f, "{}", n),
            Self::Float(n) => write!(f, "{}", n),
            Self::Int(n) => write!(f, "{}", n),
            Self::Timestamp(secs) => write!(f, "{}", secs),
            Self::List(items) => write!(f, "[{}]", join(items.iter())),
            Self::Set(items) => write!(f, "{{{}}}", join(items.iter())),
            Self::Map(pairs) => write!(
                f,
                "{{{}}}",
                join(pairs.iter().map(|(k, v)| format!("{}: {}", k, v)))
            ),
        }
    }
}
