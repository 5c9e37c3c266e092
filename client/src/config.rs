//! Módulo para la configuración del cliente.

use {
    logger::{LogLevel, Logger},
    protocol::{
        aliases::results::Result, errors::error::Error,
        messages::requests::startup::DEFAULT_CQL_VERSION, notations::consistency::Consistency,
    },
    serde::{Deserialize, Serialize},
    std::{fs, path::Path, str::FromStr, time::Duration},
};

/// Usuario y contraseña para los nodos que piden autenticación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// El nombre de usuario.
    pub username: String,

    /// La contraseña.
    pub password: String,
}

/// La configuración de una [conexión](crate::connection::Connection).
///
/// Todos los campos son opcionales en el JSON:
///
/// ```rust
/// # use client::config::ClientConfig;
/// let config: ClientConfig = serde_json::from_str(r#"{ "hosts": ["10.0.0.1:9043"] }"#).unwrap();
///
/// assert_eq!(config.hosts, vec!["10.0.0.1:9043".to_string()]);
/// assert_eq!(config.cql_version, "3.0.0");
/// assert_eq!(config.connect_timeout_secs, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Los nodos candidatos, como `host[:puerto]`. Se prueban en orden aleatorio.
    pub hosts: Vec<String>,

    /// El _keyspace_ a usar apenas se conecta, si hay alguno.
    pub keyspace: Option<String>,

    /// La versión de CQL que se pide en el STARTUP.
    pub cql_version: String,

    /// Segundos máximos para establecer la conexión. `0` no pone límite.
    pub connect_timeout_secs: u64,

    /// Segundos máximos de cada lectura del _socket_. `0` no pone límite.
    pub stream_timeout_secs: u64,

    /// El nivel de consistencia de las _queries_ que no piden uno.
    pub default_consistency: String,

    /// Credenciales, por si el nodo pide autenticación.
    pub credentials: Option<Credentials>,

    /// Directorio de logs. Sin directorio no se loguea.
    pub log_dir: Option<String>,

    /// El nivel mínimo de log.
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["127.0.0.1:9042".to_string()],
            keyspace: None,
            cql_version: DEFAULT_CQL_VERSION.to_string(),
            connect_timeout_secs: 3,
            stream_timeout_secs: 10,
            default_consistency: Consistency::Quorum.to_string(),
            credentials: None,
            log_dir: None,
            log_level: LogLevel::Info.to_string(),
        }
    }
}

impl ClientConfig {
    /// Crea una configuración por defecto para los hosts dados.
    pub fn with_hosts(hosts: &[&str]) -> Self {
        Self {
            hosts: hosts.iter().map(|host| host.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Carga la configuración desde un archivo JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::InvalidArgument(format!(
                "Error leyendo la configuración '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parsea la configuración desde un texto JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            Error::InvalidArgument(format!("Error deserializando la configuración: {}", e))
        })
    }

    /// El nivel de consistencia por defecto, ya parseado.
    pub fn consistency(&self) -> Result<Consistency> {
        Consistency::from_str(&self.default_consistency)
    }

    /// El _timeout_ de conexión, si hay alguno.
    pub fn connect_timeout(&self) -> Option<Duration> {
        Some(self.connect_timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// El _timeout_ de lectura, si hay alguno.
    pub fn stream_timeout(&self) -> Option<Duration> {
        Some(self.stream_timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Arma un logger que escribe en `client_{name}.log`, dentro del directorio de logs.
    pub fn logger(&self, name: &str) -> Result<Logger> {
        let dir = match &self.log_dir {
            Some(dir) => dir,
            None => return Ok(Logger::disabled()),
        };
        let level = LogLevel::from_str(&self.log_level)
            .map_err(|e| Error::InvalidArgument(e.to_string()))?;
        Logger::new(Path::new(dir), name, level, None, None)
            .map_err(|e| Error::InvalidArgument(format!("No se pudo crear el logger: {}", e)))
    }
}
