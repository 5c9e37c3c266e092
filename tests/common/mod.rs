//! Paquete para funciones públicas comunes entre tests de integración.
//!
//! Dichas funciones se definen directamente en este archivo, o sino corremos el riesgo
//! de que cargo crea que los archivos son archivos de tests en sí.

#![allow(dead_code)]

use std::{
    io::{Read, Result as IOResult, Write},
    net::{SocketAddr, TcpListener, TcpStream},
    thread::{spawn, JoinHandle},
};

use protocol::{
    aliases::types::Byte, headers::opcode::Opcode,
    messages::responses::result_kinds::ResultKind, traits::Byteable,
    utils::encode_string_to_bytes,
};

/// Un _request_ tal como lo recibió el nodo falso: `(opcode, cuerpo)`.
pub type Received = (Byte, Vec<Byte>);

/// Un nodo de mentira que escucha en un puerto libre de `127.0.0.1`.
///
/// Acepta una sola conexión y, por cada _request_ que recibe, responde con el próximo
/// frame del guión. Al terminar el guión se queda esperando a que el cliente cierre.
pub struct FakeNode {
    /// La dirección en la que escucha.
    pub addr: SocketAddr,
    handle: JoinHandle<IOResult<Vec<Received>>>,
}

impl FakeNode {
    /// Levanta el nodo con las respuestas dadas, en orden.
    pub fn start(script: Vec<Vec<Byte>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("no se pudo bindear el nodo falso");
        let addr = listener.local_addr().expect("el nodo falso no tiene dirección");
        let handle = spawn(move || serve(listener, script));
        Self { addr, handle }
    }

    /// Un nodo que acepta la conexión pero nunca responde.
    pub fn silent() -> Self {
        Self::start(Vec::new())
    }

    /// El `host:puerto` del nodo, como lo espera la configuración del cliente.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    /// Espera a que el nodo termine y devuelve los _requests_ recibidos.
    pub fn received(self) -> Vec<Received> {
        match self.handle.join() {
            Ok(Ok(received)) => received,
            _ => Vec::new(),
        }
    }
}

fn serve(listener: TcpListener, script: Vec<Vec<Byte>>) -> IOResult<Vec<Received>> {
    let (mut stream, _) = listener.accept()?;
    let mut received = Vec::new();
    for reply in script {
        match read_request(&mut stream) {
            Ok(request) => received.push(request),
            Err(_) => return Ok(received),
        }
        stream.write_all(&reply)?;
        stream.flush()?;
    }
    // hasta que el cliente corte
    let mut rest = Vec::new();
    let _ = stream.read_to_end(&mut rest);
    Ok(received)
}

fn read_request(stream: &mut TcpStream) -> IOResult<Received> {
    let mut header = [0; 8];
    stream.read_exact(&mut header)?;
    let len = u32::from_be_bytes([header[4], header[5], header[6], header[7]]) as usize;
    let mut body = vec![0; len];
    stream.read_exact(&mut body)?;
    Ok((header[3], body))
}

/// Una dirección en la que seguro no escucha nadie.
pub fn dead_host() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("no se pudo bindear");
    let addr = listener.local_addr().expect("sin dirección");
    drop(listener);
    addr.to_string()
}

/// Arma un frame de _response_ con el opcode y cuerpo dados.
pub fn response(opcode: Opcode, body: Vec<Byte>) -> Vec<Byte> {
    let mut bytes = vec![0x81, 0x0, 0x0];
    bytes.extend(opcode.as_bytes());
    bytes.extend((body.len() as u32).to_be_bytes());
    bytes.extend(body);
    bytes
}

/// Un READY, la respuesta esperada a un STARTUP.
pub fn ready() -> Vec<Byte> {
    response(Opcode::Ready, Vec::new())
}

/// Un RESULT con el tipo y el resto del cuerpo dados.
pub fn result(kind: ResultKind, rest: Vec<Byte>) -> Vec<Byte> {
    let mut body = kind.as_bytes();
    body.extend(rest);
    response(Opcode::Result, body)
}

/// Un frame de ERROR con el código dado y un mensaje.
pub fn error(code: u32, msg: &str) -> Vec<Byte> {
    let mut body = code.to_be_bytes().to_vec();
    body.extend(string(msg));
    response(Opcode::Error, body)
}

/// Un `[string]`.
pub fn string(s: &str) -> Vec<Byte> {
    encode_string_to_bytes(s).expect("string demasiado largo")
}
