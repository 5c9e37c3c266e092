//! Logger de archivos con niveles, rotación y eco opcional a consola.

pub mod log;

pub use log::{Color, LogFormatter, LogLevel, Logger, LoggerError, RotationConfig};
