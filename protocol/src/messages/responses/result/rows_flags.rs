//! Flags para una _response_ RESULT de filas.

use crate::{aliases::types::Int, traits::Maskable};

/// Las flags a ser incluidas en el mensaje de una _response_ RESULT de tipo [ROWS](crate::messages::responses::result_kinds::ResultKind::Rows).
/// ```rust
/// # use protocol::messages::responses::result::rows_flags::RowsFlag;
/// # use protocol::traits::Maskable;
/// assert!(RowsFlag::has_mask(&0b101, &RowsFlag::GlobalTablesSpec));
/// assert!(!RowsFlag::has_mask(&0b100, &RowsFlag::GlobalTablesSpec));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowsFlag {
    /// Sólo un par de _keyspace_ y tabla es provisto, y vale para todas las columnas.
    GlobalTablesSpec,
}

impl Maskable<Int> for RowsFlag {
    fn base_mask() -> Int {
        0
    }

    fn collapse(&self) -> Int {
        match self {
            Self::GlobalTablesSpec => 0x0001,
        }
    }
}
