//! Módulo para la especificación de una columna en una _response_ con filas.

use crate::{
    aliases::{results::Result, types::Byte},
    data_stream::DataStream,
    messages::responses::result::col_type::ColType,
    traits::Readable,
    utils::encode_string_to_bytes,
};

/// Un par `(keyspace, tabla)` compartido por todas las columnas de un resultado.
pub type TableSpec = (String, String);

/// Los metadatos de una columna de un resultado.
#[derive(Debug, Clone, PartialEq)]
pub struct ColSpec {
    /// El _keyspace_ de la tabla a la que pertenece la columna.
    pub keyspace: String,

    /// La tabla a la que pertenece la columna.
    pub table: String,

    /// El nombre de la columna.
    pub name: String,

    /// El tipo de los valores de la columna.
    pub col_type: ColType,
}

impl ColSpec {
    /// Crea una nueva especificación de columna.
    pub fn new(keyspace: &str, table: &str, name: &str, col_type: ColType) -> Self {
        Self {
            keyspace: keyspace.to_string(),
            table: table.to_string(),
            name: name.to_string(),
            col_type,
        }
    }

    /// Lee la especificación de una columna.
    ///
    /// Si hay un par `(keyspace, tabla)` global, la columna lo hereda. Si no, lo lee antes
    /// del nombre.
    pub fn read_with(stream: &mut DataStream<'_>, global: Option<&TableSpec>) -> Result<Self> {
        let (keyspace, table) = match global {
            Some((keyspace, table)) => (keyspace.clone(), table.clone()),
            None => (stream.read_string()?, stream.read_string()?),
        };
        let name = stream.read_string()?;
        let col_type = ColType::read_from(stream)?;
        Ok(Self {
            keyspace,
            table,
            name,
            col_type,
        })
    }

    /// Codifica la columna. Si `with_table` es falso, se omite el par `(keyspace, tabla)`.
    pub fn encode(&self, with_table: bool) -> Result<Vec<Byte>> {
        let mut bytes_vec = Vec::<Byte>::new();
        if with_table {
            bytes_vec.extend(encode_string_to_bytes(&self.keyspace)?);
            bytes_vec.extend(encode_string_to_bytes(&self.table)?);
        }
        bytes_vec.extend(encode_string_to_bytes(&self.name)?);
        bytes_vec.extend(self.col_type.encode()?);
        Ok(bytes_vec)
    }
}
