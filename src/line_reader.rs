// === src/line_reader.rs ===
use std::collections::VecDeque;
use std::io::{self, Read};

use anyhow::{Context, Result};
use log::debug;
use serialport::SerialPort;

use crate::serial_utils::sanitize_log_data;

/// Lector de líneas sobre el puerto serial.
///
/// El puerto entrega los datos en trozos arbitrarios; aquí se ensamblan
/// líneas terminadas en `\n` y se decodifican de forma tolerante (los bytes
/// inválidos se reemplazan por U+FFFD en vez de abortar la lectura).
pub struct LectorLineas {
    serial: Box<dyn SerialPort>,
    buffer: [u8; 1024],
    partial_data: Vec<u8>,
    lineas_listas: VecDeque<Vec<u8>>,
}

impl LectorLineas {
    pub fn new(serial: Box<dyn SerialPort>) -> Self {
        Self {
            serial,
            buffer: [0u8; 1024],
            partial_data: Vec::new(),
            lineas_listas: VecDeque::new(),
        }
    }

    /// Devuelve la siguiente línea completa, o `None` si el puerto no
    /// entregó nada dentro del timeout configurado. Hace como mucho un
    /// `read` bloqueante por llamada.
    pub fn leer_linea(&mut self) -> Result<Option<String>> {
        if let Some(cruda) = self.lineas_listas.pop_front() {
            return Ok(Some(decodificar_linea(&cruda)));
        }

        match self.serial.read(&mut self.buffer) {
            Ok(bytes_read) if bytes_read > 0 => {
                let recibidos = &self.buffer[..bytes_read];
                debug!("📥 Bytes leídos (crudo): {}", sanitize_log_data(recibidos));

                for linea in extraer_lineas(recibidos, &mut self.partial_data) {
                    self.lineas_listas.push_back(linea);
                }
            }
            Ok(_) => {
                // No se leyó nada
            }
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => {
                // Timeout esperado, continuar
            }
            Err(e) => {
                return Err(e).context("Error al leer del puerto serial");
            }
        }

        Ok(self
            .lineas_listas
            .pop_front()
            .map(|cruda| decodificar_linea(&cruda)))
    }
}

/// Ensambla líneas terminadas en 0x0A (`'\n'`) a partir de un trozo nuevo.
/// Los bytes sin terminador quedan acumulados en `partial_data` para la
/// siguiente llamada.
pub fn extraer_lineas(buffer: &[u8], partial_data: &mut Vec<u8>) -> Vec<Vec<u8>> {
    partial_data.extend_from_slice(buffer);

    let mut lineas = Vec::new();
    while let Some(pos) = partial_data.iter().position(|&b| b == 0x0A) {
        let completa = partial_data.drain(..=pos).collect::<Vec<u8>>();
        lineas.push(completa);
    }
    lineas
}

/// Decodifica de forma tolerante y recorta espacios (incluido el `\r` final).
pub fn decodificar_linea(cruda: &[u8]) -> String {
    String::from_utf8_lossy(cruda).trim().to_string()
}
