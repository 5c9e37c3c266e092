//! Módulo para la tabla de códigos de error que puede mandar un nodo.

use crate::{
    aliases::{results::Result, types::Uint},
    data_stream::DataStream,
    errors::error::Error,
};

/// Mensaje para cualquier código fuera de la tabla.
pub const UNKNOWN_ERROR_MSG: &str = "Unknown error";

/// Los códigos de error conocidos, tal como vienen en los primeros 4 bytes de un frame
/// [ERROR](crate::headers::opcode::Opcode::Error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// `0x0000`
    ServerError,

    /// `0x000A`
    ProtocolError,

    /// `0x0100`
    BadCredentials,

    /// `0x1000`. Trae su propio mensaje en el cuerpo.
    Unavailable,

    /// `0x1001`
    Overloaded,

    /// `0x1002`
    IsBootstrapping,

    /// `0x1003`
    TruncateError,

    /// `0x1100`
    WriteTimeout,

    /// `0x1200`
    ReadTimeout,

    /// `0x2000`. Trae su propio mensaje en el cuerpo.
    SyntaxError,

    /// `0x2100`
    Unauthorized,

    /// `0x2200`. Trae su propio mensaje en el cuerpo.
    Invalid,

    /// `0x2300`
    ConfigError,

    /// `0x2400`
    AlreadyExists,

    /// `0x2500`
    Unprepared,
}

impl ErrorCode {
    /// El valor numérico del código.
    pub fn code(&self) -> Uint {
        match self {
            Self::ServerError => 0x0000,
            Self::ProtocolError => 0x000A,
            Self::BadCredentials => 0x0100,
            Self::Unavailable => 0x1000,
            Self::Overloaded => 0x1001,
            Self::IsBootstrapping => 0x1002,
            Self::TruncateError => 0x1003,
            Self::WriteTimeout => 0x1100,
            Self::ReadTimeout => 0x1200,
            Self::SyntaxError => 0x2000,
            Self::Unauthorized => 0x2100,
            Self::Invalid => 0x2200,
            Self::ConfigError => 0x2300,
            Self::AlreadyExists => 0x2400,
            Self::Unprepared => 0x2500,
        }
    }

    /// El mensaje fijo asociado al código.
    ///
    /// Para los códigos que [traen su propio mensaje](ErrorCode::carries_message) es sólo
    /// un respaldo, por si el cuerpo no lo incluye.
    pub fn static_message(&self) -> &'static str {
        match self {
            Self::ServerError => "Server error",
            Self::ProtocolError => "Protocol error",
            Self::BadCredentials => "Bad credentials",
            Self::Unavailable => "Unavailable",
            Self::Overloaded => "Overloaded",
            Self::IsBootstrapping => "Is bootstrapping",
            Self::TruncateError => "Truncate error",
            Self::WriteTimeout => "Write timeout",
            Self::ReadTimeout => "Read timeout",
            Self::SyntaxError => "Syntax error",
            Self::Unauthorized => "Unauthorized",
            Self::Invalid => "Invalid",
            Self::ConfigError => "Config error",
            Self::AlreadyExists => "Already exists",
            Self::Unprepared => "Unprepared",
        }
    }

    /// Indica si el mensaje del error se lee como un `[string]` del cuerpo.
    pub fn carries_message(&self) -> bool {
        matches!(self, Self::Unavailable | Self::SyntaxError | Self::Invalid)
    }

    /// Decodifica el cuerpo de un frame [ERROR](crate::headers::opcode::Opcode::Error) a un
    /// [Error::ServerError].
    ///
    /// Sólo falla si el cuerpo no tiene siquiera los 4 bytes del código.
    pub fn decode_body(stream: &mut DataStream<'_>) -> Result<Error> {
        let code = stream.read_uint()?;
        let msg = match Self::try_from(code) {
            Ok(known) if known.carries_message() => match stream.read_string() {
                Ok(msg) => msg,
                Err(_) => known.static_message().to_string(),
            },
            Ok(known) => known.static_message().to_string(),
            Err(_) => UNKNOWN_ERROR_MSG.to_string(),
        };
        Ok(Error::ServerError(code, msg))
    }
}

impl TryFrom<Uint> for ErrorCode {
    type Error = Error;
    fn try_from(code: Uint) -> Result<Self> {
        let known = match code {
            0x0000 => Self::ServerError,
            0x000A => Self::ProtocolError,
            0x0100 => Self::BadCredentials,
            0x1000 => Self::Unavailable,
            0x1001 => Self::Overloaded,
            0x1002 => Self::IsBootstrapping,
            0x1003 => Self::TruncateError,
            0x1100 => Self::WriteTimeout,
            0x1200 => Self::ReadTimeout,
            0x2000 => Self::SyntaxError,
            0x2100 => Self::Unauthorized,
            0x2200 => Self::Invalid,
            0x2300 => Self::ConfigError,
            0x2400 => Self::AlreadyExists,
            0x2500 => Self::Unprepared,
            _ => {
                return Err(Error::ProtocolError(format!(
                    "El código de error 0x{:04X} no es conocido",
                    code
                )))
            }
        };
        Ok(known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_1_codigo_con_mensaje_propio() {
        let bytes = [
            0x0, 0x0, 0x10, 0x0, // código
            0x0, 0xB, // len msg
            0x75, 0x6E, 0x61, 0x76, 0x61, 0x69, 0x6C, 0x61, 0x62, 0x6C, 0x65, // "unavailable"
        ];
        let error = ErrorCode::decode_body(&mut DataStream::new(&bytes));

        assert_eq!(
            error,
            Ok(Error::ServerError(0x1000, "unavailable".to_string()))
        );
    }

    #[test]
    fn test_2_codigo_con_mensaje_fijo_ignora_el_cuerpo() {
        let bytes = [
            0x0, 0x0, 0x24, 0x0, // código
            0x0, 0x2, 0x6B, 0x73, // "ks"
        ];
        let error = ErrorCode::decode_body(&mut DataStream::new(&bytes));

        assert_eq!(
            error,
            Ok(Error::ServerError(0x2400, "Already exists".to_string()))
        );
    }

    #[test]
    fn test_3_codigo_desconocido() {
        let bytes = [0x0, 0x0, 0xFF, 0xFF];
        let error = ErrorCode::decode_body(&mut DataStream::new(&bytes));

        assert_eq!(
            error,
            Ok(Error::ServerError(0xFFFF, UNKNOWN_ERROR_MSG.to_string()))
        );
    }

    #[test]
    fn test_4_mensaje_faltante_usa_el_respaldo() {
        let bytes = [0x0, 0x0, 0x20, 0x0];
        let error = ErrorCode::decode_body(&mut DataStream::new(&bytes));

        assert_eq!(
            error,
            Ok(Error::ServerError(0x2000, "Syntax error".to_string()))
        );
    }

    #[test]
    fn test_5_cuerpo_sin_codigo() {
        let error = ErrorCode::decode_body(&mut DataStream::new(&[0x0, 0x1]));

        assert!(matches!(error, Err(Error::StreamUnderrun(_))));
    }

    #[test]
    fn test_6_ida_y_vuelta_de_codigos() {
        for code in [0x0000, 0x000A, 0x0100, 0x1000, 0x1100, 0x2200, 0x2500] {
            let known = ErrorCode::try_from(code);
            assert!(known.is_ok());
            if let Ok(known) = known {
                assert_eq!(known.code(), code);
            }
        }
    }
}
