use crate::lectura::{extraer_ritmo, extraer_saturacion};

// Rangos fisiológicamente plausibles; fuera de ellos la lectura se descarta.
const RITMO_MIN: f64 = 30.0;
const RITMO_MAX: f64 = 200.0;
const SPO2_MIN: f64 = 60.0;
const SPO2_MAX: f64 = 100.0;

/// Medición completa lista para validar y persistir.
#[derive(Debug, Clone, PartialEq)]
pub struct Medicion {
    pub heart_rate: f64,
    pub spo2: f64,
}

impl Medicion {
    /// Ritmo con límites exclusivos; saturación admite exactamente 100.
    pub fn en_rango(&self) -> bool {
        RITMO_MIN < self.heart_rate
            && self.heart_rate < RITMO_MAX
            && SPO2_MIN < self.spo2
            && self.spo2 <= SPO2_MAX
    }
}

/// Acumulador del par pendiente de lecturas.
///
/// Cada valor se guarda por separado hasta que ambos estén presentes; el
/// sensor los emite en líneas distintas y sin orden garantizado. Un valor
/// repetido antes de completar el par sobreescribe al anterior.
pub struct Acumulador {
    ritmo: Option<f64>,
    saturacion: Option<f64>,
}

impl Acumulador {
    pub fn new() -> Self {
        Self {
            ritmo: None,
            saturacion: None,
        }
    }

    /// Procesa una línea ya normalizada. Devuelve `Some(Medicion)` cuando la
    /// línea completa el par; ambos slots quedan vacíos después, sea cual sea
    /// el resultado de la validación posterior.
    pub fn procesar_linea(&mut self, linea: &str) -> Option<Medicion> {
        if let Some(valor) = extraer_ritmo(linea) {
            self.ritmo = Some(valor);
        }
        if let Some(valor) = extraer_saturacion(linea) {
            self.saturacion = Some(valor);
        }

        match (self.ritmo, self.saturacion) {
            (Some(heart_rate), Some(spo2)) => {
                self.ritmo = None;
                self.saturacion = None;
                Some(Medicion { heart_rate, spo2 })
            }
            _ => None,
        }
    }
}

impl Default for Acumulador {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn par_completo_en_dos_lineas() {
        let mut acumulador = Acumulador::new();
        assert_eq!(acumulador.procesar_linea("Ritmo cardiaco: 75.0"), None);
        let medicion = acumulador.procesar_linea("Saturacion: 98.0").unwrap();
        assert_eq!(
            medicion,
            Medicion {
                heart_rate: 75.0,
                spo2: 98.0
            }
        );
        assert!(medicion.en_rango());
    }

    #[test]
    fn orden_de_llegada_indiferente() {
        let mut acumulador = Acumulador::new();
        assert_eq!(acumulador.procesar_linea("Saturacion: 96.0"), None);
        let medicion = acumulador.procesar_linea("Ritmo: 70").unwrap();
        assert_eq!(
            medicion,
            Medicion {
                heart_rate: 70.0,
                spo2: 96.0
            }
        );
    }

    #[test]
    fn ambos_valores_en_una_linea() {
        let mut acumulador = Acumulador::new();
        let medicion = acumulador.procesar_linea("Ritmo: 80 Saturacion: 97").unwrap();
        assert_eq!(
            medicion,
            Medicion {
                heart_rate: 80.0,
                spo2: 97.0
            }
        );
    }

    #[test]
    fn ultimo_valor_gana() {
        let mut acumulador = Acumulador::new();
        assert_eq!(acumulador.procesar_linea("Ritmo: 75"), None);
        assert_eq!(acumulador.procesar_linea("Ritmo: 82"), None);
        let medicion = acumulador.procesar_linea("Saturacion: 98").unwrap();
        assert_eq!(medicion.heart_rate, 82.0);
    }

    #[test]
    fn par_fuera_de_rango_tambien_vacia_los_slots() {
        let mut acumulador = Acumulador::new();
        assert_eq!(acumulador.procesar_linea("Ritmo: 15.0"), None);
        let medicion = acumulador.procesar_linea("Satur: 95.0").unwrap();
        assert!(!medicion.en_rango());

        // El siguiente par arranca de cero: una sola etiqueta no completa.
        assert_eq!(acumulador.procesar_linea("Saturacion: 97"), None);
        let medicion = acumulador.procesar_linea("Ritmo: 72").unwrap();
        assert_eq!(medicion.heart_rate, 72.0);
        assert_eq!(medicion.spo2, 97.0);
    }

    #[test]
    fn lineas_sin_datos_no_alteran_el_par() {
        let mut acumulador = Acumulador::new();
        assert_eq!(acumulador.procesar_linea("Ritmo: 75"), None);
        assert_eq!(acumulador.procesar_linea("Inicializando sensor..."), None);
        let medicion = acumulador.procesar_linea("Saturacion: 98").unwrap();
        assert_eq!(medicion.heart_rate, 75.0);
    }

    #[test]
    fn limites_del_ritmo_son_exclusivos() {
        let base = |heart_rate| Medicion { heart_rate, spo2: 98.0 };
        assert!(!base(30.0).en_rango());
        assert!(base(30.1).en_rango());
        assert!(base(199.9).en_rango());
        assert!(!base(200.0).en_rango());
    }

    #[test]
    fn limite_superior_de_saturacion_es_inclusivo() {
        let base = |spo2| Medicion { heart_rate: 75.0, spo2 };
        assert!(!base(60.0).en_rango());
        assert!(base(60.1).en_rango());
        assert!(base(100.0).en_rango());
        assert!(!base(100.1).en_rango());
    }
}
