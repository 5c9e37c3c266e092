//! Módulo para un frame completo del protocolo.

use crate::{
    aliases::{results::Result, types::Byte},
    data_stream::DataStream,
    errors::error::Error,
    headers::{
        msg_headers::{Headers, HEADERS_LEN},
        opcode::Opcode,
    },
    traits::Byteable,
};

/// Representa un frame del protocolo, tanto para requests como responses.
///
/// El largo declarado en los encabezados siempre coincide con el del cuerpo.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    headers: Headers,
    body: Vec<Byte>,
}

impl Frame {
    /// Arma un frame a partir de encabezados ya leídos y su cuerpo.
    pub fn new(headers: Headers, body: Vec<Byte>) -> Result<Self> {
        if headers.length.len as usize != body.len() {
            return Err(Error::ProtocolError(format!(
                "Los encabezados declaran {} bytes de cuerpo pero hay {}",
                headers.length.len,
                body.len()
            )));
        }
        Ok(Self { headers, body })
    }

    /// Crea el frame de un _request_ con el opcode y cuerpo dados.
    pub fn request(opcode: Opcode, body: Vec<Byte>) -> Result<Self> {
        let headers = Headers::request(opcode, &body)?;
        Ok(Self { headers, body })
    }

    /// Parsea un frame entero desde una tira de bytes.
    pub fn from_bytes(bytes: &[Byte]) -> Result<Self> {
        let headers = Headers::try_from(bytes)?;
        let end = HEADERS_LEN + headers.length.len as usize;
        if bytes.len() < end {
            return Err(Error::StreamUnderrun(format!(
                "El frame necesita {} bytes pero hay {}",
                end,
                bytes.len()
            )));
        }
        Self::new(headers, bytes[HEADERS_LEN..end].to_vec())
    }

    /// Los encabezados del frame.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// El opcode del frame.
    pub fn opcode(&self) -> Opcode {
        self.headers.opcode
    }

    /// El cuerpo crudo.
    pub fn body(&self) -> &[Byte] {
        &self.body
    }

    /// Un _stream_ de lectura sobre el cuerpo.
    pub fn data(&self) -> DataStream<'_> {
        DataStream::new(&self.body)
    }
}

impl Byteable for Frame {
    fn as_bytes(&self) -> Vec<Byte> {
        let mut bytes = self.headers.as_bytes();
        bytes.extend(&self.body);
        bytes
    }
}
