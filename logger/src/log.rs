//! Módulo para el logger en sí.

use {
    chrono::Utc,
    std::{
        fmt,
        fs::{self, OpenOptions},
        io::{self, Write},
        path::{Path, PathBuf},
        str::FromStr,
    },
};

/// Colores para el eco en consola.
#[derive(Debug, Clone, Copy)]
pub enum Color {
    /// Errores.
    Red,
    /// Información.
    Green,
    /// Advertencias.
    Yellow,
    /// Depuración.
    Blue,
    /// Trazas de bajo nivel.
    Gray,
}

impl Color {
    fn to_ansi(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Gray => "\x1b[90m",
        }
    }
}

/// Los niveles de severidad, de menor a mayor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Bytes crudos y encabezados de cada frame.
    Trace,
    /// Detalles del intercambio de mensajes.
    Debug,
    /// Eventos normales de la conexión.
    Info,
    /// Errores que mandó el servidor.
    Warning,
    /// Fallas de la conexión.
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARNING"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(LoggerError::InvalidLevel(s.to_string())),
        }
    }
}

/// Configuración para la rotación de archivos.
#[derive(Debug, Clone)]
pub struct RotationConfig {
    /// Tamaño máximo del archivo en bytes.
    pub max_size: u64,
    /// Número máximo de archivos de respaldo.
    pub max_files: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            max_size: 10 * 1024 * 1024, // 10MB por defecto
            max_files: 5,
        }
    }
}

/// Configuración para el formato de los mensajes.
///
/// La plantilla acepta `{level}`, `{timestamp}` y `{message}`.
#[derive(Debug, Clone)]
pub struct LogFormatter {
    /// Formato de `chrono` para la fecha.
    pub timestamp_format: String,
    /// Plantilla de cada línea.
    pub message_template: String,
}

impl Default for LogFormatter {
    fn default() -> Self {
        Self {
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            message_template: "[{level}] [{timestamp}]: {message}".to_string(),
        }
    }
}

/// Un logger que escribe a un archivo propio del cliente.
///
/// Un logger [deshabilitado](Logger::disabled) acepta todos los mensajes y no hace nada.
#[derive(Debug, Clone)]
pub struct Logger {
    log_file: Option<PathBuf>,
    min_level: LogLevel,
    rotation_config: RotationConfig,
    formatter: LogFormatter,
    echo: bool,
}

impl Logger {
    /// Crea una nueva instancia del logger con configuración personalizada.
    ///
    /// El archivo se llama `client_{name}.log`, dentro de `dir`.
    pub fn new(
        dir: &Path,
        name: &str,
        min_level: LogLevel,
        rotation_config: Option<RotationConfig>,
        formatter: Option<LogFormatter>,
    ) -> Result<Self, LoggerError> {
        if !dir.is_dir() {
            fs::create_dir_all(dir)?;
        }

        let log_file = dir.join(format!("client_{}.log", sanitize(name)));

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;

        let rotation_config = match rotation_config {
            Some(config) => {
                if config.max_files == 0 {
                    return Err(LoggerError::InvalidConfig(
                        "El número máximo de archivos debe ser mayor a cero".to_string(),
                    ));
                }
                config
            }
            None => RotationConfig::default(),
        };

        Ok(Self {
            log_file: Some(log_file),
            min_level,
            rotation_config,
            formatter: formatter.unwrap_or_default(),
            echo: false,
        })
    }

    /// Un logger que descarta todo.
    pub fn disabled() -> Self {
        Self {
            log_file: None,
            min_level: LogLevel::Error,
            rotation_config: RotationConfig::default(),
            formatter: LogFormatter::default(),
            echo: false,
        }
    }

    /// Activa o desactiva el eco con colores a la salida estándar.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// La ruta del archivo de log, si es que hay uno.
    pub fn path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Verifica si un mensaje de este nivel llegaría a registrarse.
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.log_file.is_some() && level >= self.min_level
    }

    /// Registra un mensaje si su nivel es igual o superior al nivel mínimo configurado.
    pub fn log(&self, level: LogLevel, msg: &str, color: Option<Color>) -> Result<(), LoggerError> {
        let log_file = match &self.log_file {
            Some(log_file) if level >= self.min_level => log_file,
            _ => return Ok(()),
        };

        self.rotate_if_needed(log_file)?;

        let timestamp = Utc::now()
            .format(&self.formatter.timestamp_format)
            .to_string();
        let log_msg = self
            .formatter
            .message_template
            .replace("{level}", &level.to_string())
            .replace("{timestamp}", &timestamp)
            .replace("{message}", msg);
        let log_msg = format!("{}\n", log_msg);

        if let Some(color) = color.filter(|_| self.echo) {
            print!("{}{}\x1b[0m", color.to_ansi(), log_msg);
            io::stdout().flush()?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        file.write_all(log_msg.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Rota los archivos cuando el actual supera el tamaño máximo.
    fn rotate_if_needed(&self, log_file: &Path) -> Result<(), LoggerError> {
        let metadata = fs::metadata(log_file)?;

        if metadata.len() > self.rotation_config.max_size {
            let max_files = self.rotation_config.max_files;
            let oldest = log_file.with_extension(format!("log.{}", max_files));
            if oldest.exists() {
                fs::remove_file(oldest)?;
            }
            for i in (1..max_files).rev() {
                let current = log_file.with_extension(format!("log.{}", i));
                if current.exists() {
                    fs::rename(current, log_file.with_extension(format!("log.{}", i + 1)))?;
                }
            }

            fs::rename(log_file, log_file.with_extension("log.1"))?;

            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(log_file)?;
        }

        Ok(())
    }

    /// Registra una traza.
    pub fn trace(&self, msg: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Trace, msg, Some(Color::Gray))
    }

    /// Registra un mensaje de depuración.
    pub fn debug(&self, msg: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Debug, msg, Some(Color::Blue))
    }

    /// Registra un mensaje informativo.
    pub fn info(&self, msg: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Info, msg, Some(Color::Green))
    }

    /// Registra una advertencia.
    pub fn warning(&self, msg: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Warning, msg, Some(Color::Yellow))
    }

    /// Registra un error.
    pub fn error(&self, msg: &str) -> Result<(), LoggerError> {
        self.log(LogLevel::Error, msg, Some(Color::Red))
    }
}

/// Reemplaza los caracteres que no conviene tener en un nombre de archivo.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

/// Errores del logger.
#[derive(Debug)]
pub enum LoggerError {
    /// Falló una operación sobre el archivo.
    IoError(std::io::Error),
    /// La configuración no es válida.
    InvalidConfig(String),
    /// El nombre del nivel no existe.
    InvalidLevel(String),
}

impl std::fmt::Display for LoggerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggerError::IoError(e) => write!(f, "Error de E/S: {}", e),
            LoggerError::InvalidConfig(msg) => write!(f, "Configuración inválida: {}", msg),
            LoggerError::InvalidLevel(level) => write!(f, "Nivel de log desconocido: {}", level),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(err: std::io::Error) -> Self {
        LoggerError::IoError(err)
    }
}
