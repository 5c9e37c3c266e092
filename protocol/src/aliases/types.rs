//! Módulo para aliases de tipos de datos explicados en el protocolo de Cassandra.

use std::collections::HashMap;

// Definiciones de notaciones

/// Un entero compuesto por 2 bytes *con signo*.
pub type Short = i16;

/// Un entero de 4 bytes *con signo*.
pub type Int = i32;

/// Un entero de 8 bytes *con signo*.
pub type Long = i64;

/// Un entero compuesto por un solo byte *sin signo*.
pub type Byte = u8;

/// Un entero de 2 bytes *sin signo*.
pub type UShort = u16;

/// Un entero de 4 bytes *sin signo*.
pub type Uint = u32;

/// Un número de punto flotante IEEE 754 (Binary32) de precisión simple.
pub type Float = f32;

/// Un número de punto flotante IEEE 754 (Binary64) de precisión doble.
pub type Double = f64;

// Abreviaciones auxiliares

/// Un mapa de _strings_ que **respeta el orden de inserción**.
///
/// El orden es parte de los bytes transmitidos, así que no usamos un [HashMap].
pub type StringMap = Vec<(String, String)>;

/// Un mapa de valores posibles para las opciones de un mensaje de tipo [STARTUP](crate::headers::opcode::Opcode::Startup),
/// tal como lo devuelve un [SUPPORTED](crate::headers::opcode::Opcode::Supported).
pub type SupportedMultiMap = HashMap<String, Vec<String>>;
