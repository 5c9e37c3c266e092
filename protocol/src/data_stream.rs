//! Módulo para el cursor de lectura sobre los bytes de un mensaje.

use std::collections::HashMap;

use crate::{
    aliases::{
        results::Result,
        types::{
            Byte, Double, Float, Int, Long, StringMap, SupportedMultiMap, UShort, Uint,
        },
    },
    errors::error::Error,
    messages::responses::result::col_type::ColType,
    notations::value::Value,
};

/// Cada cuántos dígitos decimales se parte un _varint_ al convertirlo a texto.
const VARINT_CHUNK: u64 = 1_000_000_000;

/// Un lector acotado y con estado sobre una porción inmutable de bytes.
///
/// Todas las lecturas consumen bytes desde la posición actual. Si no quedan suficientes bytes,
/// la lectura falla con [Error::StreamUnderrun] y la posición no cambia.
///
/// Algunos tipos (_varints_, decimales, textos, direcciones IP) no tienen un largo propio y
/// consumen **todo lo que resta** del _stream_. Por eso siempre se leen desde un _stream_
/// construido sobre exactamente los bytes del valor:
///
/// ```rust
/// # use protocol::data_stream::DataStream;
/// let celda = [0x0, 0x0, 0x0, 0x2, 0x01, 0x00, 0xFF];
/// let mut stream = DataStream::new(&celda);
///
/// let acotado = stream.read_value();
/// assert_eq!(acotado, Ok(Some(&[0x01, 0x00][..])));
/// if let Ok(Some(bytes)) = acotado {
///     assert_eq!(DataStream::new(bytes).read_varint(), Ok("256".to_string()));
/// }
/// assert_eq!(stream.remaining(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DataStream<'a> {
    /// Los bytes sobre los que se lee.
    bytes: &'a [Byte],

    /// La posición de la próxima lectura.
    pos: usize,
}

impl<'a> DataStream<'a> {
    /// Crea un nuevo _stream_ posicionado al principio de los bytes dados.
    pub fn new(bytes: &'a [Byte]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// La cantidad de bytes que todavía no fueron leídos.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// La posición actual, contada desde el principio.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Verifica si ya se leyó todo.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Lee los próximos `n` bytes.
    pub fn read(&mut self, n: usize) -> Result<&'a [Byte]> {
        if n > self.remaining() {
            return Err(Error::StreamUnderrun(format!(
                "Se pidieron {} bytes pero sólo quedan {}",
                n,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Lee todos los bytes restantes. Nunca falla.
    pub fn read_rest(&mut self) -> &'a [Byte] {
        let slice = &self.bytes[self.pos..];
        self.pos = self.bytes.len();
        slice
    }

    /// Lee exactamente `N` bytes en un _array_.
    fn read_array<const N: usize>(&mut self) -> Result<[Byte; N]> {
        let mut array = [0; N];
        array.copy_from_slice(self.read(N)?);
        Ok(array)
    }

    /// Ejecuta una lectura compuesta, y si falla deja la posición donde estaba.
    fn atomically<T>(&mut self, reader: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let start = self.pos;
        let res = reader(self);
        if res.is_err() {
            self.pos = start;
        }
        res
    }

    // Tipos numéricos

    /// Lee un [Byte] sin signo.
    pub fn read_byte(&mut self) -> Result<Byte> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Lee un entero de 2 bytes sin signo, _big-endian_.
    pub fn read_ushort(&mut self) -> Result<UShort> {
        Ok(UShort::from_be_bytes(self.read_array()?))
    }

    /// Lee un entero de 4 bytes sin signo, _big-endian_.
    pub fn read_uint(&mut self) -> Result<Uint> {
        Ok(Uint::from_be_bytes(self.read_array()?))
    }

    /// Lee un entero de 4 bytes con signo, _big-endian_.
    pub fn read_int(&mut self) -> Result<Int> {
        Ok(Int::from_be_bytes(self.read_array()?))
    }

    /// Lee un entero de 8 bytes con signo, _big-endian_.
    pub fn read_long(&mut self) -> Result<Long> {
        Ok(Long::from_be_bytes(self.read_array()?))
    }

    /// Lee un [Float] IEEE 754 _big-endian_.
    pub fn read_float(&mut self) -> Result<Float> {
        Ok(Float::from_be_bytes(self.read_array()?))
    }

    /// Lee un [Double] IEEE 754 _big-endian_.
    pub fn read_double(&mut self) -> Result<Double> {
        Ok(Double::from_be_bytes(self.read_array()?))
    }

    /// Lee un byte, y lo interpreta como `true` si no es cero.
    pub fn read_boolean(&mut self) -> Result<bool> {
        Ok(self.read_byte()? != 0)
    }

    // Notaciones con largo

    /// Lee un `[string]`: un largo de 2 bytes seguido de los bytes en UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        self.atomically(|stream| {
            let len = stream.read_ushort()? as usize;
            bytes_to_text(stream.read(len)?)
        })
    }

    /// Lee un `[long string]`: un largo de 4 bytes seguido de los bytes en UTF-8.
    pub fn read_long_string(&mut self) -> Result<String> {
        self.atomically(|stream| {
            let len = stream.read_uint()? as usize;
            bytes_to_text(stream.read(len)?)
        })
    }

    /// Lee un `[bytes]`: un largo de 4 bytes seguido de los bytes mismos.
    pub fn read_bytes(&mut self) -> Result<&'a [Byte]> {
        self.atomically(|stream| {
            let len = stream.read_uint()? as usize;
            stream.read(len)
        })
    }

    /// Lee un `[short bytes]`: un largo de 2 bytes seguido de los bytes mismos.
    pub fn read_short_bytes(&mut self) -> Result<&'a [Byte]> {
        self.atomically(|stream| {
            let len = stream.read_ushort()? as usize;
            stream.read(len)
        })
    }

    /// Lee un `[value]`: un largo de 4 bytes **con signo** seguido de los bytes.
    ///
    /// Un largo negativo indica un valor ausente, y se devuelve [None].
    pub fn read_value(&mut self) -> Result<Option<&'a [Byte]>> {
        self.atomically(|stream| {
            let len = stream.read_int()?;
            if len < 0 {
                return Ok(None);
            }
            Ok(Some(stream.read(len as usize)?))
        })
    }

    /// Lee un `[string list]`: un largo de 2 bytes seguido de esa cantidad de `[string]`.
    pub fn read_string_list(&mut self) -> Result<Vec<String>> {
        self.atomically(|stream| {
            let count = stream.read_ushort()?;
            let mut list = Vec::with_capacity(count as usize);
            for _ in 0..count {
                list.push(stream.read_string()?);
            }
            Ok(list)
        })
    }

    /// Lee un `[string map]`, respetando el orden en el que vienen los pares.
    pub fn read_string_map(&mut self) -> Result<StringMap> {
        self.atomically(|stream| {
            let count = stream.read_ushort()?;
            let mut map = StringMap::with_capacity(count as usize);
            for _ in 0..count {
                let key = stream.read_string()?;
                let value = stream.read_string()?;
                map.push((key, value));
            }
            Ok(map)
        })
    }

    /// Lee un `[string multimap]`, como el que viene en un mensaje SUPPORTED.
    pub fn read_string_multimap(&mut self) -> Result<SupportedMultiMap> {
        self.atomically(|stream| {
            let count = stream.read_ushort()?;
            let mut multimap: SupportedMultiMap = HashMap::with_capacity(count as usize);
            for _ in 0..count {
                let key = stream.read_string()?;
                let values = stream.read_string_list()?;
                multimap.insert(key, values);
            }
            Ok(multimap)
        })
    }

    // Valores de columnas

    /// Lee todos los bytes restantes como texto UTF-8.
    pub fn read_text(&mut self) -> Result<String> {
        let start = self.pos;
        bytes_to_text(self.read_rest()).inspect_err(|_| self.pos = start)
    }

    /// Lee un UUID de 16 bytes y lo devuelve en el formato `8-4-4-4-12` en hexadecimal.
    pub fn read_uuid(&mut self) -> Result<String> {
        let bytes: [Byte; 16] = self.read_array()?;
        let hex: String = bytes.iter().map(|byte| format!("{:02x}", byte)).collect();
        Ok(format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        ))
    }

    /// Lee un entero de precisión arbitraria en complemento a dos, usando **todos** los bytes
    /// restantes, y lo devuelve en base 10.
    ///
    /// Un _stream_ vacío se lee como `"0"`.
    pub fn read_varint(&mut self) -> Result<String> {
        let bytes = self.read_rest();
        let negative = matches!(bytes.first(), Some(first) if first & 0x80 != 0);

        let magnitude = if negative {
            negate_twos_complement(bytes)
        } else {
            bytes.to_vec()
        };

        let digits = magnitude_to_decimal(magnitude);
        if negative {
            Ok(format!("-{}", digits))
        } else {
            Ok(digits)
        }
    }

    /// Lee un decimal: una escala de 4 bytes con signo, seguida de un [varint](DataStream::read_varint)
    /// sin escalar que ocupa el resto de los bytes.
    ///
    /// El punto decimal se inserta `escala` dígitos desde la derecha. Con escala `0` no hay
    /// punto, y con una escala negativa se agregan ceros al final.
    pub fn read_decimal(&mut self) -> Result<String> {
        let scale = self.read_int()?;
        let unscaled = self.read_varint()?;
        Ok(render_decimal(&unscaled, scale))
    }

    /// Lee un _timestamp_ en milisegundos desde la _unix epoch_, y lo devuelve redondeado
    /// a segundos (las mitades se alejan del cero).
    pub fn read_timestamp(&mut self) -> Result<Long> {
        let millis = self.read_long()?;
        let (secs, rest) = (millis / 1000, millis % 1000);
        if rest.abs() >= 500 {
            Ok(secs + millis.signum())
        } else {
            Ok(secs)
        }
    }

    /// Lee una dirección IP usando todos los bytes restantes.
    ///
    /// Con 4 bytes es IPv4 (`a.b.c.d`). Con 16 es IPv6: 8 grupos en hexadecimal separados por
    /// `:`, donde sólo la **primera** racha de grupos en cero se reemplaza por un segmento vacío.
    pub fn read_inet(&mut self) -> Result<String> {
        match self.remaining() {
            4 => {
                let octets: [Byte; 4] = self.read_array()?;
                let parts: Vec<String> = octets.iter().map(|octet| octet.to_string()).collect();
                Ok(parts.join("."))
            }
            16 => {
                let mut parts = Vec::<String>::with_capacity(8);
                let mut zero_run = ZeroRun::NotSeen;
                for _ in 0..8 {
                    let group = self.read_ushort()?;
                    match (group, zero_run) {
                        (0, ZeroRun::NotSeen) => {
                            zero_run = ZeroRun::Inside;
                            parts.push(String::new());
                        }
                        (0, ZeroRun::Inside) => {}
                        _ => {
                            if zero_run == ZeroRun::Inside {
                                zero_run = ZeroRun::Done;
                            }
                            parts.push(format!("{:x}", group));
                        }
                    }
                }
                Ok(parts.join(":"))
            }
            len => Err(Error::ProtocolError(format!(
                "Una dirección IP ocupa 4 o 16 bytes, no {}",
                len
            ))),
        }
    }

    /// Lee un valor del tipo de columna dado.
    ///
    /// Los tipos sin largo propio consumen todo el _stream_. Los elementos de colecciones vienen
    /// como `[short bytes]`, y cada uno se decodifica sobre un _stream_ acotado a esos bytes.
    ///
    /// Esto es lo que manda un nodo con el protocolo v1. No se leen los elementos como
    /// valores tipados pegados uno detrás del otro sin largo propio: un elemento de largo
    /// variable (un `text`, por ejemplo) consumiría el resto de la colección.
    pub fn read_by_type(&mut self, col_type: &ColType) -> Result<Value> {
        let value = match col_type {
            ColType::Custom(name) => {
                return Err(Error::UnsupportedFeature(format!(
                    "No se pueden decodificar valores del tipo personalizado '{}'",
                    name
                )))
            }
            ColType::Ascii | ColType::Varchar | ColType::Text => Value::Text(self.read_text()?),
            ColType::Bigint | ColType::Counter | ColType::Varint => {
                Value::Varint(self.read_varint()?)
            }
            ColType::Blob => Value::Blob(self.read_rest().to_vec()),
            ColType::Boolean => Value::Boolean(self.read_boolean()?),
            ColType::Decimal => Value::Decimal(self.read_decimal()?),
            ColType::Double => Value::Double(self.read_double()?),
            ColType::Float => Value::Float(self.read_float()?),
            ColType::Int => Value::Int(self.read_int()?),
            ColType::Timestamp => Value::Timestamp(self.read_timestamp()?),
            ColType::Uuid | ColType::Timeuuid => Value::Uuid(self.read_uuid()?),
            ColType::Inet => Value::Inet(self.read_inet()?),
            ColType::List(inner) => Value::List(self.read_elements(inner)?),
            ColType::Set(inner) => Value::Set(self.read_elements(inner)?),
            ColType::Map(key_type, value_type) => {
                let count = self.read_ushort()?;
                let mut pairs = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let key = self.read_element(key_type)?;
                    let value = self.read_element(value_type)?;
                    pairs.push((key, value));
                }
                Value::Map(pairs)
            }
        };
        Ok(value)
    }

    /// Lee una cantidad de 2 bytes y luego esa cantidad de elementos del tipo dado.
    fn read_elements(&mut self, col_type: &ColType) -> Result<Vec<Value>> {
        let count = self.read_ushort()?;
        let mut elements = Vec::with_capacity(count as usize);
        for _ in 0..count {
            elements.push(self.read_element(col_type)?);
        }
        Ok(elements)
    }

    /// Lee un elemento de una colección sobre un _stream_ acotado a sus bytes.
    fn read_element(&mut self, col_type: &ColType) -> Result<Value> {
        let bytes = self.read_short_bytes()?;
        DataStream::new(bytes).read_by_type(col_type)
    }
}

/// El estado de la compresión de ceros de una IPv6.
#[derive(Clone, Copy, PartialEq)]
enum ZeroRun {
    NotSeen,
    Inside,
    Done,
}

fn bytes_to_text(bytes: &[Byte]) -> Result<String> {
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::ProtocolError(format!("El texto no es UTF-8 válido: {}", e)))
}

/// Niega un número en complemento a dos (invertir y sumar uno), devolviendo su magnitud.
fn negate_twos_complement(bytes: &[Byte]) -> Vec<Byte> {
    let mut magnitude: Vec<Byte> = bytes.iter().map(|byte| !byte).collect();
    for byte in magnitude.iter_mut().rev() {
        let (sum, overflow) = byte.overflowing_add(1);
        *byte = sum;
        if !overflow {
            break;
        }
    }
    magnitude
}

/// Pasa un entero sin signo _big-endian_ de largo arbitrario a base 10.
fn magnitude_to_decimal(mut magnitude: Vec<Byte>) -> String {
    // trozos de 9 dígitos, del menos significativo al más significativo
    let mut chunks = Vec::<u64>::new();
    while magnitude.iter().any(|byte| *byte != 0) {
        let mut remainder: u64 = 0;
        for byte in magnitude.iter_mut() {
            let current = (remainder << 8) | *byte as u64;
            *byte = (current / VARINT_CHUNK) as Byte;
            remainder = current % VARINT_CHUNK;
        }
        chunks.push(remainder);
    }

    let mut rendered = match chunks.pop() {
        Some(most_significant) => most_significant.to_string(),
        None => return "0".to_string(),
    };
    for chunk in chunks.iter().rev() {
        rendered.push_str(&format!("{:09}", chunk));
    }
    rendered
}

/// Inserta el punto decimal en un entero ya escrito en base 10.
fn render_decimal(unscaled: &str, scale: Int) -> String {
    let (sign, digits) = match unscaled.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", unscaled),
    };

    let body = if scale == 0 {
        digits.to_string()
    } else if scale < 0 {
        if digits == "0" {
            digits.to_string()
        } else {
            format!("{}{}", digits, "0".repeat(scale.unsigned_abs() as usize))
        }
    } else {
        let scale = scale as usize;
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            format!("{}.{}", int_part, frac_part)
        } else {
            format!("0.{}{}", "0".repeat(scale - digits.len()), digits)
        }
    };
    format!("{}{}", sign, body)
}
