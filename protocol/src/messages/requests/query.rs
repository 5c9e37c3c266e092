//! Módulo para el cuerpo de un mensaje QUERY.

use crate::{
    aliases::{results::Result, types::Byte},
    data_stream::DataStream,
    notations::consistency::Consistency,
    traits::{Byteable, Readable},
    utils::encode_long_string_to_bytes,
};

/// Una _query_ y el nivel de consistencia con el que se ejecuta.
///
/// El texto no se valida: se manda tal cual.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// El texto de la _query_.
    pub cql: String,

    /// El nivel de consistencia.
    pub consistency: Consistency,
}

impl Query {
    /// Crea una nueva _query_.
    pub fn new(cql: &str, consistency: Consistency) -> Self {
        Self {
            cql: cql.to_string(),
            consistency,
        }
    }

    /// Codifica el cuerpo: la _query_ como `[long string]` y luego la consistencia.
    pub fn encode(&self) -> Result<Vec<Byte>> {
        let mut bytes_vec = encode_long_string_to_bytes(&self.cql)?;
        bytes_vec.extend(self.consistency.as_bytes());
        Ok(bytes_vec)
    }
}

impl Readable for Query {
    fn read_from(stream: &mut DataStream<'_>) -> Result<Self> {
        let cql = stream.read_long_string()?;
        let consistency = Consistency::read_from(stream)?;
        Ok(Self { cql, consistency })
    }
}
