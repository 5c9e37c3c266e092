//! Módulo para el conjunto de filas de una _response_ RESULT.

use crate::{
    aliases::{
        results::Result,
        types::{Byte, Int},
    },
    data_stream::DataStream,
    errors::error::Error,
    messages::responses::result::{
        col_spec::{ColSpec, TableSpec},
        rows_flags::RowsFlag,
    },
    notations::value::Value,
    traits::{Maskable, Readable},
    utils::encode_string_to_bytes,
};

/// Los bytes crudos de una celda, o [None] si la celda es nula.
pub type RawCell = Option<Vec<Byte>>;

/// Una fila ya decodificada: pares de `(nombre de columna, valor)` en el orden de las columnas.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    /// El valor de la columna con el nombre dado.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(col_name, _)| col_name == name)
            .map(|(_, value)| value)
    }

    /// El valor en la columna `i`.
    pub fn get_at(&self, i: usize) -> Option<&Value> {
        self.cells.get(i).map(|(_, value)| value)
    }

    /// Itera los pares `(nombre, valor)`.
    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.cells.iter()
    }

    /// La cantidad de columnas de la fila.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Verifica si la fila no tiene columnas.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// El resultado de una _query_ que devuelve filas.
///
/// Al construirse sólo se separan los metadatos y los bytes de cada celda. Los valores se
/// decodifican cada vez que se visita una fila, y si una celda no se puede decodificar se
/// devuelve [Value::Null] en su lugar.
///
/// Se recorre con un cursor propio:
///
/// ```rust
/// # use protocol::messages::responses::result::rows::Rows;
/// # use protocol::traits::Readable;
/// # use protocol::data_stream::DataStream;
/// # use protocol::aliases::results::Result;
/// # fn main() -> Result<()> {
/// let body = [
///     0x0, 0x0, 0x0, 0x1, // flags: tabla global
///     0x0, 0x0, 0x0, 0x1, // 1 columna
///     0x0, 0x2, 0x6B, 0x73, 0x0, 0x1, 0x74, // "ks", "t"
///     0x0, 0x1, 0x6E, 0x0, 0x9, // "n": int
///     0x0, 0x0, 0x0, 0x2, // 2 filas
///     0x0, 0x0, 0x0, 0x4, 0x0, 0x0, 0x0, 0x7,
///     0xFF, 0xFF, 0xFF, 0xFF, // nula
/// ];
/// let mut rows = Rows::read_from(&mut DataStream::new(&body))?;
///
/// rows.rewind();
/// let mut vistas = 0;
/// while rows.valid() {
///     let _fila = rows.current()?;
///     vistas += 1;
///     rows.advance();
/// }
/// assert_eq!(vistas, rows.count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Rows {
    /// Los metadatos de las columnas, en orden.
    columns: Vec<ColSpec>,

    /// Las celdas crudas de cada fila. Cada fila tiene una celda por columna.
    ///
    /// Puede tener menos filas que las declaradas si el cuerpo vino cortado.
    rows: Vec<Vec<RawCell>>,

    /// La cantidad de filas declarada. Las que no tienen celdas guardadas son nulas.
    row_count: usize,

    /// La posición del cursor.
    position: usize,
}

impl Rows {
    /// Crea un conjunto de filas. Las filas con una cantidad de celdas distinta a la de
    /// columnas se rechazan.
    pub fn new(columns: Vec<ColSpec>, rows: Vec<Vec<RawCell>>) -> Result<Self> {
        if let Some(bad_row) = rows.iter().position(|row| row.len() != columns.len()) {
            return Err(Error::InvalidArgument(format!(
                "La fila {} no tiene {} celdas",
                bad_row,
                columns.len()
            )));
        }
        Ok(Self {
            columns,
            row_count: rows.len(),
            rows,
            position: 0,
        })
    }

    /// Los metadatos de las columnas.
    pub fn columns(&self) -> &[ColSpec] {
        &self.columns
    }

    /// La cantidad total de filas.
    pub fn count(&self) -> usize {
        self.row_count
    }

    /// La posición actual del cursor.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Vuelve el cursor a la primera fila.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Verifica si el cursor apunta a una fila existente.
    pub fn valid(&self) -> bool {
        self.position < self.count()
    }

    /// Avanza el cursor a la siguiente fila.
    pub fn advance(&mut self) {
        self.position += 1;
    }

    /// Decodifica la fila en la posición actual.
    pub fn current(&self) -> Result<Row> {
        self.row(self.position)
    }

    /// Decodifica la fila `i`.
    pub fn row(&self, i: usize) -> Result<Row> {
        match self.rows.get(i) {
            Some(raw_row) => Ok(self.materialize(raw_row)),
            None if i < self.row_count => Ok(self.null_row()),
            None => Err(Error::IndexOutOfRange(format!(
                "No existe la fila {}, hay {}",
                i,
                self.count()
            ))),
        }
    }

    /// Itera todas las filas decodificadas, sin tocar el cursor.
    pub fn iter(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.row_count).map(|i| match self.rows.get(i) {
            Some(raw_row) => self.materialize(raw_row),
            None => self.null_row(),
        })
    }

    fn null_row(&self) -> Row {
        let cells = self
            .columns
            .iter()
            .map(|col| (col.name.clone(), Value::Null))
            .collect();
        Row { cells }
    }

    fn materialize(&self, raw_row: &[RawCell]) -> Row {
        let cells = self
            .columns
            .iter()
            .zip(raw_row)
            .map(|(col, raw_cell)| {
                let value = match raw_cell {
                    Some(bytes) => DataStream::new(bytes)
                        .read_by_type(&col.col_type)
                        .unwrap_or(Value::Null),
                    None => Value::Null,
                };
                (col.name.clone(), value)
            })
            .collect();
        Row { cells }
    }

    /// Codifica las filas tal como vienen en el cuerpo de un RESULT (sin el tipo de resultado).
    ///
    /// Si todas las columnas son de la misma tabla, se usa una tabla global.
    pub fn encode(&self) -> Result<Vec<Byte>> {
        let global = match self.columns.first() {
            Some(first) => self
                .columns
                .iter()
                .all(|col| col.keyspace == first.keyspace && col.table == first.table),
            None => false,
        };

        let mut bytes_vec = Vec::<Byte>::new();
        let flags: Int = if global {
            RowsFlag::GlobalTablesSpec.collapse()
        } else {
            RowsFlag::base_mask()
        };
        bytes_vec.extend(flags.to_be_bytes());
        bytes_vec.extend(count_to_bytes(self.columns.len())?);

        if let Some(first) = self.columns.first().filter(|_| global) {
            bytes_vec.extend(encode_string_to_bytes(&first.keyspace)?);
            bytes_vec.extend(encode_string_to_bytes(&first.table)?);
        }
        for col in &self.columns {
            bytes_vec.extend(col.encode(!global)?);
        }

        bytes_vec.extend(count_to_bytes(self.row_count)?);
        for row in &self.rows {
            for cell in row {
                match cell {
                    Some(bytes) => {
                        bytes_vec.extend(count_to_bytes(bytes.len())?);
                        bytes_vec.extend_from_slice(bytes);
                    }
                    None => bytes_vec.extend((-1 as Int).to_be_bytes()),
                }
            }
        }
        let missing = (self.row_count - self.rows.len()) * self.columns.len();
        for _ in 0..missing {
            bytes_vec.extend((-1 as Int).to_be_bytes());
        }
        Ok(bytes_vec)
    }
}

fn count_to_bytes(count: usize) -> Result<[Byte; 4]> {
    match Int::try_from(count) {
        Ok(n) => Ok(n.to_be_bytes()),
        Err(_) => Err(Error::InvalidArgument(format!(
            "{} no entra en un entero de 4 bytes",
            count
        ))),
    }
}

impl Readable for Rows {
    fn read_from(stream: &mut DataStream<'_>) -> Result<Self> {
        let flags = stream.read_int()?;
        let columns_count = stream.read_int()?;
        if columns_count < 0 {
            return Err(Error::ProtocolError(format!(
                "Cantidad de columnas negativa: {}",
                columns_count
            )));
        }

        let global: Option<TableSpec> = if RowsFlag::has_mask(&flags, &RowsFlag::GlobalTablesSpec)
        {
            Some((stream.read_string()?, stream.read_string()?))
        } else {
            None
        };

        let mut columns = Vec::<ColSpec>::new();
        for _ in 0..columns_count {
            columns.push(ColSpec::read_with(stream, global.as_ref())?);
        }

        let row_count = stream.read_int()?.max(0) as usize;
        let mut rows = Vec::<Vec<RawCell>>::with_capacity(row_count.min(stream.remaining()));
        // sólo se guardan las filas que tienen bytes; el resto quedan nulas
        while rows.len() < row_count && !stream.is_empty() {
            let row: Vec<RawCell> = columns
                .iter()
                .map(|_| match stream.read_value() {
                    Ok(Some(bytes)) => Some(bytes.to_vec()),
                    _ => None,
                })
                .collect();
            rows.push(row);
        }

        Ok(Self {
            columns,
            rows,
            row_count,
            position: 0,
        })
    }
}
