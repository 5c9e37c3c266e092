//! Módulo para el resultado de una _query_.

use protocol::{
    aliases::{results::Result, types::Byte},
    data_stream::DataStream,
    messages::responses::{result::rows::Rows, result_kinds::ResultKind},
    traits::Readable,
};

/// Lo que devuelve el servidor en un RESULT, ya decodificado según su tipo.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// La _query_ no devuelve nada.
    Void,

    /// Las filas de un SELECT.
    Rows(Rows),

    /// El _keyspace_ que quedó en uso tras un `USE`.
    SetKeyspace(String),

    /// El ID de una _query_ preparada.
    Prepared(Vec<Byte>),

    /// Un cambio de _schema_.
    SchemaChange {
        /// El tipo de cambio: `CREATED`, `UPDATED` o `DROPPED`.
        change: String,

        /// El _keyspace_ afectado.
        keyspace: String,

        /// La tabla afectada. Vacía si el cambio es sobre el _keyspace_.
        table: String,
    },
}

impl QueryResult {
    /// Devuelve las filas, si las hay.
    pub fn rows(&self) -> Option<&Rows> {
        match self {
            Self::Rows(rows) => Some(rows),
            _ => None,
        }
    }

    /// Consume el resultado y devuelve las filas, si las hay.
    pub fn into_rows(self) -> Option<Rows> {
        match self {
            Self::Rows(rows) => Some(rows),
            _ => None,
        }
    }
}

impl Readable for QueryResult {
    fn read_from(stream: &mut DataStream<'_>) -> Result<Self> {
        let res = match ResultKind::read_from(stream)? {
            ResultKind::Void => Self::Void,
            ResultKind::Rows => Self::Rows(Rows::read_from(stream)?),
            ResultKind::SetKeyspace => Self::SetKeyspace(stream.read_string()?),
            ResultKind::Prepared => Self::Prepared(stream.read_short_bytes()?.to_vec()),
            ResultKind::SchemaChange => Self::SchemaChange {
                change: stream.read_string()?,
                keyspace: stream.read_string()?,
                table: stream.read_string()?,
            },
        };
        Ok(res)
    }
}
