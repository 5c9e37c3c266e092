//! Módulo para una sesión con un nodo.

use {
    crate::{config::ClientConfig, query_result::QueryResult, report, transport::Transport},
    protocol::{
        aliases::{
            results::Result,
            types::{Byte, SupportedMultiMap},
        },
        errors::error::Error,
        frame::Frame,
        headers::opcode::Opcode,
        messages::requests::{query::Query, startup::Startup},
        notations::consistency::Consistency,
        traits::Readable,
    },
    rand::{seq::SliceRandom, thread_rng},
    std::{
        io::{Read, Write},
        net::TcpStream,
    },
};

/// El nombre del archivo de log de las sesiones: `client_sesion.log`.
pub const SESSION_LOG_NAME: &str = "sesion";

/// Una sesión ya inicializada con un nodo.
///
/// Hay una sola _request_ en vuelo por vez, así que quien la comparta entre hilos
/// tiene que serializar el acceso.
#[derive(Debug)]
pub struct Connection<S: Read + Write = TcpStream> {
    transport: Transport<S>,
    keyspace: Option<String>,
    consistency: Consistency,
}

impl Connection<TcpStream> {
    /// Se conecta a alguno de los hosts de la configuración.
    ///
    /// Los hosts se prueban en orden aleatorio hasta que uno acepte la conexión. Si ninguno
    /// lo hace, se devuelve sólo el último error. Todos los intentos comparten el mismo logger.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        if config.hosts.is_empty() {
            return Err(Error::InvalidArgument(
                "La lista de hosts está vacía".to_string(),
            ));
        }
        let logger = config.logger(SESSION_LOG_NAME)?;

        let mut hosts = config.hosts.clone();
        hosts.shuffle(&mut thread_rng());

        let mut last_error: Option<Error> = None;
        for host in &hosts {
            match Transport::connect(
                host,
                config.connect_timeout(),
                config.stream_timeout(),
                logger.clone(),
            ) {
                Ok(transport) => return Self::with_transport(transport, config),
                Err(err) => last_error = Some(err),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            Error::ConnectionError("No se pudo conectar a ningún host".to_string())
        }))
    }
}

impl<S: Read + Write> Connection<S> {
    /// Inicializa una sesión sobre un transporte ya conectado: manda el STARTUP y, si la
    /// configuración lo pide, elige el _keyspace_.
    pub fn with_transport(transport: Transport<S>, config: &ClientConfig) -> Result<Self> {
        let mut connection = Self {
            transport,
            keyspace: None,
            consistency: config.consistency()?,
        };
        connection.startup(&config.cql_version, config.credentials.is_some())?;
        if let Some(keyspace) = &config.keyspace {
            connection.use_keyspace(keyspace)?;
        }
        Ok(connection)
    }

    fn startup(&mut self, cql_version: &str, has_credentials: bool) -> Result<()> {
        let body = Startup::new(cql_version).encode()?;
        let frame = self.transport.request(Opcode::Startup, body)?;
        match frame.opcode() {
            Opcode::Ready => {
                report(self.transport.logger().info(&format!(
                    "Sesión iniciada con {} (CQL {})",
                    self.transport.peer(),
                    cql_version
                )));
                Ok(())
            }
            Opcode::Authenticate => {
                let authenticator = frame.data().read_string().unwrap_or_default();
                if has_credentials {
                    Err(Error::UnsupportedFeature(format!(
                        "El nodo pide autenticación con '{}', que no está implementada",
                        authenticator
                    )))
                } else {
                    Err(Error::InvalidArgument(format!(
                        "El nodo pide autenticación con '{}' y no se configuraron credenciales",
                        authenticator
                    )))
                }
            }
            other => Err(unexpected(Opcode::Ready, other)),
        }
    }

    /// El _keyspace_ en uso, si es que se eligió uno.
    pub fn keyspace(&self) -> Option<&str> {
        self.keyspace.as_deref()
    }

    /// El nivel de consistencia que se usa cuando no se especifica uno.
    pub fn default_consistency(&self) -> Consistency {
        self.consistency
    }

    /// Verifica si la conexión todavía se puede usar.
    pub fn is_usable(&self) -> bool {
        self.transport.is_usable()
    }

    /// Cambia el _keyspace_ en uso con `USE <name>`.
    ///
    /// El nombre tiene que empezar con una letra, y seguir sólo con letras, dígitos o `_`.
    pub fn use_keyspace(&mut self, name: &str) -> Result<()> {
        if !is_valid_keyspace(name) {
            return Err(Error::InvalidArgument(format!(
                "'{}' no es un nombre de keyspace válido",
                name
            )));
        }
        match self.query(&format!("USE {}", name), None)? {
            QueryResult::SetKeyspace(_) => Ok(()),
            QueryResult::Void => {
                self.keyspace = Some(name.to_string());
                Ok(())
            }
            _ => Err(Error::ProtocolError(format!(
                "Respuesta inesperada a 'USE {}'",
                name
            ))),
        }
    }

    /// Ejecuta una _query_ CQL.
    ///
    /// Sin consistencia explícita se usa la de la configuración.
    pub fn query(&mut self, cql: &str, consistency: Option<Consistency>) -> Result<QueryResult> {
        let query = Query::new(cql, consistency.unwrap_or(self.consistency));
        let frame = self.transport.request(Opcode::Query, query.encode()?)?;
        expect(&frame, Opcode::Result)?;

        let res = QueryResult::read_from(&mut frame.data())?;
        if let QueryResult::SetKeyspace(keyspace) = &res {
            self.keyspace = Some(keyspace.to_string());
        }
        Ok(res)
    }

    /// Pregunta al nodo qué opciones acepta en un STARTUP.
    pub fn options(&mut self) -> Result<SupportedMultiMap> {
        let frame = self.transport.request(Opcode::Options, Vec::<Byte>::new())?;
        expect(&frame, Opcode::Supported)?;
        frame.data().read_string_multimap()
    }
}

fn expect(frame: &Frame, opcode: Opcode) -> Result<()> {
    if frame.opcode() != opcode {
        return Err(unexpected(opcode, frame.opcode()));
    }
    Ok(())
}

fn unexpected(expected: Opcode, got: Opcode) -> Error {
    Error::ProtocolError(format!(
        "Se esperaba un frame {} y llegó un {}",
        expected, got
    ))
}

/// Verifica que un nombre de _keyspace_ sea de la forma `[a-zA-Z][a-zA-Z0-9_]*`.
fn is_valid_keyspace(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
