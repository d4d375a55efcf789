// === src/lectura.rs ===
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

// Expresiones tolerantes: aceptan letras con errores o acentos entre la
// etiqueta y los dos puntos ("Ritmo cardiaco:", "Ritmo card¡aco:", etc.).
static RE_RITMO: Lazy<Regex> = Lazy::new(|| Regex::new(r"Ritmo.*?:\s*([\d.]+)").unwrap());
static RE_SATURACION: Lazy<Regex> = Lazy::new(|| Regex::new(r"Satur.*?:\s*([\d.]+)").unwrap());

/// Busca el valor de ritmo cardíaco en la línea.
pub fn extraer_ritmo(linea: &str) -> Option<f64> {
    extraer_valor(&RE_RITMO, linea)
}

/// Busca el valor de saturación de oxígeno en la línea.
pub fn extraer_saturacion(linea: &str) -> Option<f64> {
    extraer_valor(&RE_SATURACION, linea)
}

fn extraer_valor(patron: &Regex, linea: &str) -> Option<f64> {
    let token = patron.captures(linea)?.get(1)?.as_str();
    match token.parse::<f64>() {
        Ok(valor) => Some(valor),
        Err(_) => {
            // El grupo solo captura dígitos y puntos, pero "1.2.3" o "." no
            // son números; se descarta sin tocar el acumulador.
            warn!("⚠️ Valor numérico ilegible en la línea: '{}'", token);
            None
        }
    }
}
