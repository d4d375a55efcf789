// === src/main.rs ===
mod acumulador;
mod config;
mod firestore;
mod lectura;
mod line_reader;
mod serial_utils;

use anyhow::Result;
use log::{info, warn};

use crate::acumulador::Acumulador;
use crate::config::Config;
use crate::firestore::ClienteFirestore;
use crate::line_reader::LectorLineas;

fn main() -> Result<()> {
    config::init_logging();

    // Leer el argumento de línea de comandos (opcional)
    let args: Vec<String> = std::env::args().collect();
    let config_path = if args.len() > 1 {
        args[1].clone()
    } else {
        "config.toml".to_string()
    };

    log::info!("📄 Cargando configuración desde {}", config_path);
    let config =
        Config::load_from_file(&config_path).expect("No se pudo cargar el archivo de configuración");
    config.log_config();

    // Primero el sink: sin Firestore no tiene sentido abrir el sensor.
    let sink = match ClienteFirestore::conectar(&config.credenciales_json, &config.coleccion) {
        Ok(cliente) => {
            info!("✅ Conectado a Firebase Firestore");
            cliente
        }
        Err(e) => {
            log::error!("❌ Error al conectar con Firebase: {:?}", e);
            std::process::exit(1);
        }
    };

    let serial = match config.open_serial_port() {
        Ok(puerto) => {
            info!("✅ Puerto serial abierto: {}", config.serial_port);
            puerto
        }
        Err(e) => {
            log::error!("❌ Error al abrir el puerto serial: {:?}", e);
            std::process::exit(1);
        }
    };

    // Canal de interrupción: el handler de Ctrl-C solo manda una señal.
    let (tx_stop, rx_stop) = flume::bounded(1);
    ctrlc::set_handler(move || {
        let _ = tx_stop.try_send(());
    })
    .expect("No se pudo instalar el manejador de Ctrl-C");

    info!("🟡 Esperando datos del oxímetro...");
    ejecutar_bucle(LectorLineas::new(serial), sink, rx_stop);

    Ok(())
}

/// Bucle principal: leer línea, acumular, validar, subir. Ningún error por
/// línea o por escritura detiene el proceso; solo la interrupción externa.
fn ejecutar_bucle(
    mut lector: LectorLineas,
    mut sink: ClienteFirestore,
    rx_stop: flume::Receiver<()>,
) {
    let mut acumulador = Acumulador::new();

    loop {
        if rx_stop.try_recv().is_ok() {
            info!("👋 Finalizado por el usuario.");
            break;
        }

        let linea = match lector.leer_linea() {
            Ok(Some(linea)) => linea,
            Ok(None) => continue,
            Err(e) => {
                warn!("❌ {:?}", e);
                continue;
            }
        };

        info!("📥 Línea recibida: {}", linea);

        let medicion = match acumulador.procesar_linea(&linea) {
            Some(medicion) => medicion,
            None => continue,
        };

        info!(
            "🫀 Detectado HR: {}, SpO2: {}",
            medicion.heart_rate, medicion.spo2
        );

        if !medicion.en_rango() {
            warn!("⚠️ Valores fuera de rango, no se guardaron.");
            continue;
        }

        match sink.insertar_medicion(&medicion) {
            Ok(()) => info!(
                "💾 Datos guardados en Firestore: HR {}, SpO2 {}",
                medicion.heart_rate, medicion.spo2
            ),
            Err(e) => warn!("⚠️ Error al guardar en Firestore: {:?}", e),
        }
    }
}
