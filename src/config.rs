use std::{fs, io::Write, time::Duration};

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use serialport::{DataBits, Parity, SerialPort, StopBits};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub serial_port: String,
    pub baud_rate: u32,
    #[serde(default = "default_data_bits")]
    #[serde(deserialize_with = "crate::serial_utils::deserialize_data_bits")]
    pub data_bits: DataBits,
    #[serde(default = "default_parity")]
    #[serde(deserialize_with = "crate::serial_utils::deserialize_parity")]
    pub parity: Parity,
    #[serde(default = "default_stop_bits")]
    #[serde(deserialize_with = "crate::serial_utils::deserialize_stop_bits")]
    pub stop_bits: StopBits,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_credenciales_json")]
    pub credenciales_json: String,
    #[serde(default = "default_coleccion")]
    pub coleccion: String,
}

fn default_data_bits() -> DataBits { DataBits::Eight }
fn default_parity() -> Parity { Parity::None }
fn default_stop_bits() -> StopBits { StopBits::One }
fn default_timeout_ms() -> u64 { 1000 }
fn default_credenciales_json() -> String { "credenciales.json".to_string() }
fn default_coleccion() -> String { "mediciones".to_string() }

impl Config {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Error leyendo archivo de configuración {}", path))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| "Error parseando archivo TOML con serde")?;
        Ok(config)
    }

    pub fn open_serial_port(&self) -> Result<Box<dyn SerialPort>> {
        serialport::new(&self.serial_port, self.baud_rate)
            .data_bits(self.data_bits)
            .parity(self.parity)
            .stop_bits(self.stop_bits)
            // El timeout acota cada read; el bucle aprovecha para revisar la interrupción.
            .timeout(Duration::from_millis(self.timeout_ms))
            .open()
            .with_context(|| format!("No se pudo abrir el puerto serial {}", self.serial_port))
    }

    pub fn log_config(&self) {
        info!("📦 Configuración cargada:");
        info!("  Serial port        : {}", self.serial_port);
        info!("  Baud rate          : {}", self.baud_rate);
        info!("  Data bits          : {:?}", self.data_bits);
        info!("  Parity             : {:?}", self.parity);
        info!("  Stop bits          : {:?}", self.stop_bits);
        info!("  Timeout (ms)       : {}", self.timeout_ms);
        info!("  Credenciales       : {}", self.credenciales_json);
        info!("  Colección destino  : {}", self.coleccion);
    }
}

pub fn init_logging() {
    use env_logger::Builder;
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, log::LevelFilter::Info)
        .init();
}
