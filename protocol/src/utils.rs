//! Módulo para funciones auxiliares de codificación del protocolo de Cassandra.

use crate::{
    aliases::{
        results::Result,
        types::{Byte, StringMap, SupportedMultiMap, UShort, Uint},
    },
    errors::error::Error,
};

fn short_len(len: usize, what: &str) -> Result<[Byte; 2]> {
    match UShort::try_from(len) {
        Ok(n) => Ok(n.to_be_bytes()),
        Err(_) => Err(Error::InvalidArgument(format!(
            "{} tiene {} elementos, y el máximo es {}",
            what,
            len,
            UShort::MAX
        ))),
    }
}

/// Transforma un [String] a una colección de [Byte]s tal cual como está especificado
/// en el protocolo de Cassandra.
///
/// Más específicamente, el protocolo pide que primero vaya un entero de
/// 2 bytes sin signo, seguido del contenido mismo del [String] en UTF-8.
///
/// ```rust
/// # use protocol::utils::encode_string_to_bytes;
/// let bytes = encode_string_to_bytes("Hello");
///
/// assert_eq!(bytes, Ok(vec![0x0, 0x5, /* <- longitud | contenido -> */ 0x48, 0x65, 0x6C, 0x6C, 0x6F]));
/// ```
pub fn encode_string_to_bytes(string: &str) -> Result<Vec<Byte>> {
    let string_bytes = string.as_bytes();
    let mut bytes_vec = short_len(string_bytes.len(), "El string")?.to_vec();
    bytes_vec.extend_from_slice(string_bytes);
    Ok(bytes_vec)
}

/// Igual que [encode_string_to_bytes], pero la longitud ocupa 4 bytes.
///
/// Es el formato del texto de una _query_.
pub fn encode_long_string_to_bytes(string: &str) -> Result<Vec<Byte>> {
    let string_bytes = string.as_bytes();
    let len = match Uint::try_from(string_bytes.len()) {
        Ok(n) => n,
        Err(_) => {
            return Err(Error::InvalidArgument(format!(
                "El string tiene {} bytes y no entra en un long string",
                string_bytes.len()
            )))
        }
    };
    let mut bytes_vec = len.to_be_bytes().to_vec();
    bytes_vec.extend_from_slice(string_bytes);
    Ok(bytes_vec)
}

/// Codifica un entero de 2 bytes sin signo, en _big-endian_.
pub fn encode_short_to_bytes(short: UShort) -> Vec<Byte> {
    short.to_be_bytes().to_vec()
}

/// Codifica una lista de strings: la cantidad en 2 bytes, y después cada [string](encode_string_to_bytes).
pub fn encode_string_list_to_bytes(list: &[String]) -> Result<Vec<Byte>> {
    let mut bytes_vec = short_len(list.len(), "La lista")?.to_vec();
    for string in list {
        bytes_vec.extend(encode_string_to_bytes(string)?);
    }
    Ok(bytes_vec)
}

/// Codifica un [StringMap]: la cantidad de pares en 2 bytes, y después la clave y el valor de
/// cada par.
///
/// Los pares se escriben **en el orden dado**.
///
/// ```rust
/// # use protocol::utils::encode_string_map_to_bytes;
/// let map = vec![("CQL_VERSION".to_string(), "3.0.0".to_string())];
/// let bytes = encode_string_map_to_bytes(&map);
///
/// assert!(matches!(bytes, Ok(b) if b[..4] == [0x0, 0x1, 0x0, 0xB]));
/// ```
pub fn encode_string_map_to_bytes(map: &StringMap) -> Result<Vec<Byte>> {
    let mut bytes_vec = short_len(map.len(), "El mapa")?.to_vec();
    for (key, value) in map {
        bytes_vec.extend(encode_string_to_bytes(key)?);
        bytes_vec.extend(encode_string_to_bytes(value)?);
    }
    Ok(bytes_vec)
}

/// Codifica un [SupportedMultiMap]. Las claves se ordenan, para que el resultado sea estable.
pub fn encode_string_multimap_to_bytes(multimap: &SupportedMultiMap) -> Result<Vec<Byte>> {
    let mut bytes_vec = short_len(multimap.len(), "El multimapa")?.to_vec();
    let mut keys: Vec<&String> = multimap.keys().collect();
    keys.sort();
    for key in keys {
        bytes_vec.extend(encode_string_to_bytes(key)?);
        let values = multimap.get(key).map(Vec::as_slice).unwrap_or_default();
        bytes_vec.extend(encode_string_list_to_bytes(values)?);
    }
    Ok(bytes_vec)
}

/// Muestra los bytes en un formato imprimible.
pub fn printable_bytes<'a>(bytes: impl IntoIterator<Item = &'a Byte>) -> String {
    let pretty_bytes = bytes
        .into_iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<String>>();

    format!("[ {} ]", pretty_bytes.join(" "))
}
