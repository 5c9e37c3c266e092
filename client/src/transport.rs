//! Módulo para el transporte de frames sobre un _socket_.

use {
    crate::report,
    logger::{LogLevel, Logger},
    protocol::{
        aliases::{results::Result, types::Byte},
        errors::{error::Error, error_code::ErrorCode},
        frame::Frame,
        headers::{
            msg_headers::{Headers, HEADERS_LEN},
            opcode::Opcode,
            version::Version,
        },
        traits::Byteable,
        utils::printable_bytes,
    },
    std::{
        io::{ErrorKind, Read, Write},
        net::{SocketAddr, TcpStream, ToSocketAddrs},
        time::Duration,
    },
};

/// El puerto nativo por defecto.
pub const DEFAULT_PORT: u16 = 9042;

/// Separa un `host[:puerto]` en sus partes. Sin puerto se usa [DEFAULT_PORT].
///
/// Las direcciones IPv6 con puerto van entre corchetes (`[::1]:9042`).
///
/// ```rust
/// # use client::transport::parse_host;
/// assert_eq!(parse_host("db.local"), Ok(("db.local".to_string(), 9042)));
/// assert_eq!(parse_host("10.0.0.1:9043"), Ok(("10.0.0.1".to_string(), 9043)));
/// assert!(parse_host("10.0.0.1:0").is_err());
/// ```
pub fn parse_host(host: &str) -> Result<(String, u16)> {
    let host = host.trim();
    let (name, port) = if let Some(rest) = host.strip_prefix('[') {
        match rest.split_once(']') {
            Some((name, "")) => (name, None),
            Some((name, port)) => match port.strip_prefix(':') {
                Some(port) => (name, Some(port)),
                None => return Err(invalid_host(host)),
            },
            None => return Err(invalid_host(host)),
        }
    } else {
        match host.split_once(':') {
            // más de un ':' sin corchetes es una IPv6 sin puerto
            Some((_, rest)) if rest.contains(':') => (host, None),
            Some((name, port)) => (name, Some(port)),
            None => (host, None),
        }
    };

    if name.is_empty() {
        return Err(invalid_host(host));
    }
    let port = match port {
        None => DEFAULT_PORT,
        Some(port) => match port.parse::<u16>() {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "Número de puerto inválido en '{}'",
                    host
                )))
            }
        },
    };
    Ok((name.to_string(), port))
}

fn invalid_host(host: &str) -> Error {
    Error::InvalidArgument(format!("Host inválido: '{}'", host))
}

/// Manda y recibe frames sobre un _stream_ bloqueante.
///
/// Hay a lo sumo un _request_ en vuelo, siempre en el stream `0`. Si una lectura excede el
/// _timeout_, o el _stream_ queda a mitad de un frame, el transporte queda inutilizable y
/// toda operación posterior falla con [Error::ProtocolError].
#[derive(Debug)]
pub struct Transport<S: Read + Write> {
    stream: S,
    peer: String,
    logger: Logger,
    broken: bool,
}

impl Transport<TcpStream> {
    /// Se conecta a un nodo `host[:puerto]`.
    ///
    /// Se prueban todas las direcciones a las que resuelve el host, y se devuelve el error
    /// de la última.
    pub fn connect(
        host: &str,
        connect_timeout: Option<Duration>,
        read_timeout: Option<Duration>,
        logger: Logger,
    ) -> Result<Self> {
        let (name, port) = parse_host(host)?;
        let addrs: Vec<SocketAddr> = (name.as_str(), port)
            .to_socket_addrs()
            .map_err(|e| Error::ConnectionError(format!("No se pudo resolver '{}': {}", name, e)))?
            .collect();

        let mut last_error = Error::ConnectionError(format!("'{}' no resolvió a ninguna dirección", name));
        for addr in addrs {
            let attempt = match connect_timeout {
                Some(timeout) => TcpStream::connect_timeout(&addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(tcp_stream) => {
                    configure(&tcp_stream, read_timeout)?;
                    report(logger.info(&format!("Conectado a {}", addr)));
                    return Ok(Self::new(tcp_stream, host, logger));
                }
                Err(e) => {
                    last_error = match e.kind() {
                        ErrorKind::TimedOut | ErrorKind::WouldBlock => Error::ConnectTimeout(
                            format!("Se agotó el tiempo para conectar con {}", addr),
                        ),
                        _ => Error::ConnectionError(format!(
                            "No se pudo conectar con {}: {}",
                            addr, e
                        )),
                    };
                    report(logger.error(&last_error.to_string()));
                }
            }
        }
        Err(last_error)
    }
}

fn configure(tcp_stream: &TcpStream, read_timeout: Option<Duration>) -> Result<()> {
    tcp_stream
        .set_nodelay(true)
        .map_err(|e| Error::ConnectionError(format!("Error al configurar TCP_NODELAY: {}", e)))?;
    tcp_stream
        .set_read_timeout(read_timeout)
        .map_err(|e| Error::ConnectionError(format!("Error al configurar read timeout: {}", e)))
}

impl<S: Read + Write> Transport<S> {
    /// Envuelve un _stream_ ya conectado.
    pub fn new(stream: S, peer: &str, logger: Logger) -> Self {
        Self {
            stream,
            peer: peer.to_string(),
            logger,
            broken: false,
        }
    }

    /// El nodo del otro lado.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Una referencia al _stream_ subyacente.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// El logger de la conexión.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Verifica si todavía se puede usar el transporte.
    pub fn is_usable(&self) -> bool {
        !self.broken
    }

    fn check_usable(&self) -> Result<()> {
        if self.broken {
            return Err(Error::ProtocolError(format!(
                "La conexión con {} quedó inutilizable; hay que reconectar",
                self.peer
            )));
        }
        Ok(())
    }

    /// Manda un frame con el opcode y el cuerpo dados, en una sola escritura.
    pub fn send_frame(&mut self, opcode: Opcode, body: Vec<Byte>) -> Result<()> {
        self.check_usable()?;
        let frame = Frame::request(opcode, body)?;
        let bytes = frame.as_bytes();
        self.trace("->", frame.headers(), &bytes);

        let written = self
            .stream
            .write_all(&bytes)
            .and_then(|_| self.stream.flush());
        if let Err(e) = written {
            self.broken = true;
            let err = Error::ConnectionError(format!("Error al escribir a {}: {}", self.peer, e));
            report(self.logger.error(&err.to_string()));
            return Err(err);
        }
        Ok(())
    }

    /// Espera el próximo frame.
    ///
    /// Un frame ERROR se decodifica y se devuelve como [Error::ServerError].
    pub fn fetch_frame(&mut self) -> Result<Frame> {
        self.check_usable()?;

        let mut header_bytes = [0; HEADERS_LEN];
        self.read_exact(&mut header_bytes)?;
        let headers = match Headers::try_from(&header_bytes[..]) {
            Ok(headers) if headers.version == Version::ResponseV1 => headers,
            Ok(headers) => {
                return Err(self.desync(Error::ProtocolError(format!(
                    "Se esperaba una response y llegó la versión {:?}",
                    headers.version
                ))))
            }
            Err(e) => return Err(self.desync(e)),
        };

        let mut body = vec![0; headers.length.len as usize];
        self.read_exact(&mut body)?;

        if self.logger.enabled(LogLevel::Trace) {
            let mut bytes = header_bytes.to_vec();
            bytes.extend_from_slice(&body);
            self.trace("<-", &headers, &bytes);
        }

        let frame = Frame::new(headers, body)?;
        if frame.opcode() == Opcode::Error {
            let err = ErrorCode::decode_body(&mut frame.data())?;
            report(self.logger.warning(&format!("{} respondió {}", self.peer, err)));
            return Err(err);
        }
        Ok(frame)
    }

    /// Manda un frame y espera la respuesta.
    pub fn request(&mut self, opcode: Opcode, body: Vec<Byte>) -> Result<Frame> {
        self.send_frame(opcode, body)?;
        self.fetch_frame()
    }

    /// Llena el buffer entero, reintentando lecturas cortas e interrumpidas.
    fn read_exact(&mut self, buf: &mut [Byte]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.stream.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(self.desync(Error::ProtocolError(format!(
                        "{} cerró la conexión a mitad de un frame ({} de {} bytes)",
                        self.peer,
                        filled,
                        buf.len()
                    ))))
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                    return Err(self.desync(Error::ReadTimeout(format!(
                        "Se agotó el tiempo esperando a {}",
                        self.peer
                    ))))
                }
                Err(e) => {
                    return Err(self.desync(Error::ConnectionError(format!(
                        "Error de lectura desde {}: {}",
                        self.peer, e
                    ))))
                }
            }
        }
        Ok(())
    }

    /// Marca el transporte como inutilizable, y loguea el motivo.
    fn desync(&mut self, err: Error) -> Error {
        self.broken = true;
        report(self.logger.error(&err.to_string()));
        err
    }

    fn trace(&self, direction: &str, headers: &Headers, bytes: &[Byte]) {
        if self.logger.enabled(LogLevel::Trace) {
            report(self.logger.trace(&format!(
                "{} {} {} {}",
                direction,
                self.peer,
                headers,
                printable_bytes(bytes)
            )));
        }
    }
}
