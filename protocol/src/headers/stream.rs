//! Módulo para un header de stream.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{aliases::types::Byte, traits::Byteable};

/// Cada frame tiene un stream id para hacer coincidir los IDs entre las requests y responses.
///
/// En la versión 1 el ID es un único byte con signo. Como nunca hay más de un _request_ en
/// vuelo por conexión, el cliente siempre usa el [stream por defecto](Stream::default).
#[derive(Debug, Default, Eq, Clone, Copy, Hash, PartialEq)]
pub struct Stream {
    /// El ID del stream.
    id: i8,
}

impl Stream {
    /// Crea un nuevo header de Stream.
    pub fn new(id: i8) -> Self {
        Self { id }
    }

    /// Devuelve el ID del stream.
    pub fn id(&self) -> i8 {
        self.id
    }
}

impl Byteable for Stream {
    fn as_bytes(&self) -> Vec<Byte> {
        self.id.to_be_bytes().to_vec()
    }
}

impl From<Byte> for Stream {
    fn from(byte: Byte) -> Self {
        Self::new(i8::from_be_bytes([byte]))
    }
}

impl Display for Stream {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.id)
    }
}
