use serde::Serialize;

use crate::weather::WeatherSnapshot;

/// Below this temperature the day counts as too cold for outdoor plans.
pub const COLD_BELOW_C: f64 = 8.0;
/// Above this temperature the day counts as too hot.
pub const HOT_ABOVE_C: f64 = 32.0;
/// Above this wind speed open areas stop being fun.
pub const WINDY_ABOVE_MPS: f64 = 10.0;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct WeatherFlags {
    pub too_cold: bool,
    pub too_hot: bool,
    pub too_windy: bool,
}

/// Qualitative reading of a snapshot shared by both generation strategies.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherAssessment {
    pub prefer_indoor: bool,
    pub flags: WeatherFlags,
    /// One human-readable entry per active flag, in a fixed order:
    /// rain, cold, hot, windy.
    pub notes: Vec<String>,
}

/// Pure function of the snapshot; total over any well-formed input.
pub fn assess(snapshot: &WeatherSnapshot) -> WeatherAssessment {
    let flags = WeatherFlags {
        too_cold: snapshot.temp_c < COLD_BELOW_C,
        too_hot: snapshot.temp_c > HOT_ABOVE_C,
        too_windy: snapshot.wind_mps > WINDY_ABOVE_MPS,
    };

    let mut notes = Vec::new();
    if snapshot.is_rainy {
        notes.push("rain is expected, covered options are safer".to_string());
    }
    if flags.too_cold {
        notes.push(format!(
            "temperature is below {COLD_BELOW_C}°C, too cold for long outdoor stays"
        ));
    }
    if flags.too_hot {
        notes.push(format!(
            "temperature is above {HOT_ABOVE_C}°C, heat makes outdoor exertion risky"
        ));
    }
    if flags.too_windy {
        notes.push(format!(
            "wind is above {WINDY_ABOVE_MPS} m/s, unpleasant in open areas"
        ));
    }

    let prefer_indoor = snapshot.is_rainy || flags.too_cold || flags.too_hot || flags.too_windy;

    WeatherAssessment {
        prefer_indoor,
        flags,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(temp_c: f64, wind_mps: f64, is_rainy: bool) -> WeatherSnapshot {
        WeatherSnapshot {
            provider: "openweather".to_string(),
            city: "Testville".to_string(),
            temp_c,
            wind_mps,
            condition: "test".to_string(),
            is_rainy,
        }
    }

    #[test]
    fn mild_weather_prefers_outdoor() {
        for temp in [8.0, 15.0, 22.0, 32.0] {
            let assessment = assess(&snapshot(temp, 5.0, false));
            assert!(!assessment.prefer_indoor, "temp {temp} should be fine");
            assert!(assessment.notes.is_empty());
        }
    }

    #[test]
    fn prefer_indoor_is_a_pure_disjunction() {
        // Walk every combination of (rainy, cold, hot, windy). Cold and hot
        // cannot both hold for a single temperature, so those combinations
        // are unconstructible and skipped.
        for mask in 0u8..16 {
            let rainy = mask & 1 != 0;
            let cold = mask & 2 != 0;
            let hot = mask & 4 != 0;
            let windy = mask & 8 != 0;
            if cold && hot {
                continue;
            }

            let temp = if cold {
                2.0
            } else if hot {
                35.0
            } else {
                20.0
            };
            let wind = if windy { 12.0 } else { 3.0 };

            let assessment = assess(&snapshot(temp, wind, rainy));
            assert_eq!(assessment.prefer_indoor, rainy || cold || hot || windy);
            assert_eq!(assessment.flags.too_cold, cold);
            assert_eq!(assessment.flags.too_hot, hot);
            assert_eq!(assessment.flags.too_windy, windy);
            assert_eq!(
                assessment.notes.len(),
                [rainy, cold, hot, windy].iter().filter(|f| **f).count()
            );
        }
    }

    #[test]
    fn thresholds_are_strict_comparisons() {
        assert!(!assess(&snapshot(8.0, 5.0, false)).flags.too_cold);
        assert!(assess(&snapshot(7.9, 5.0, false)).flags.too_cold);
        assert!(!assess(&snapshot(32.0, 5.0, false)).flags.too_hot);
        assert!(assess(&snapshot(32.1, 5.0, false)).flags.too_hot);
        assert!(!assess(&snapshot(20.0, 10.0, false)).flags.too_windy);
        assert!(assess(&snapshot(20.0, 10.1, false)).flags.too_windy);
    }

    #[test]
    fn notes_keep_a_stable_order() {
        let assessment = assess(&snapshot(2.0, 12.0, true));
        assert!(assessment.prefer_indoor);
        assert_eq!(assessment.notes.len(), 3);
        assert!(assessment.notes[0].contains("rain"));
        assert!(assessment.notes[1].contains("cold"));
        assert!(assessment.notes[2].contains("wind"));
    }

    #[test]
    fn assessment_is_deterministic() {
        let a = assess(&snapshot(5.0, 11.0, true));
        let b = assess(&snapshot(5.0, 11.0, true));
        assert_eq!(a.prefer_indoor, b.prefer_indoor);
        assert_eq!(a.notes, b.notes);
    }
}
