//! Módulo para las flags de un mensaje.

use crate::{
    aliases::types::Byte,
    traits::{Byteable, Maskable},
};

/// Una flag afecta al frame del mensaje.
///
/// También se puede acumular las flags en un sólo byte:
/// ```rust
/// # use protocol::headers::flags::Flag;
/// # use protocol::traits::Maskable;
/// # use protocol::aliases::types::Byte;
/// let flags = [&Flag::Compression, &Flag::Tracing];
/// let expected: Byte = 0b00000011;
/// assert_eq!(Flag::accumulate(&flags[..]), expected);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// El body del frame es comprimido.
    Compression,

    /// Cuando el cliente pide un tracing del request.
    Tracing,
}

impl Flag {
    /// Descompone un valor en los tipos de máscaras. Los bits desconocidos se ignoran.
    pub fn decompose(base: &Byte) -> Vec<Self> {
        let mut masks_vec = Vec::<Self>::new();

        for flag_type in [Self::Compression, Self::Tracing] {
            if Self::has_mask(base, &flag_type) {
                masks_vec.push(flag_type);
            }
        }

        masks_vec
    }
}

impl Byteable for Flag {
    fn as_bytes(&self) -> Vec<Byte> {
        match self {
            Self::Compression => vec![0x1],
            Self::Tracing => vec![0x2],
        }
    }
}

impl Maskable<Byte> for Flag {
    fn base_mask() -> Byte {
        0
    }

    fn collapse(&self) -> Byte {
        match self {
            Self::Compression => 0x1,
            Self::Tracing => 0x2,
        }
    }
}
