// ============================================================================
// FORMAT HELPERS - Formateo de duraciones, números y timestamps
// ============================================================================
// Lógica pura (sin DOM) para que las vistas solo hagan el update del elemento
// ============================================================================

use chrono::{DateTime, NaiveDateTime};

/// Placeholder para valores ausentes en la UI
pub const EM_DASH: &str = "—";

/// Convertir minutos a "Hh MMm" ("125" → "2h 05m", "-5" → "-0h 05m")
pub fn minutes_to_hrs_minutes(value: Option<f64>) -> String {
    let minutes = match value {
        Some(m) if m.is_finite() => m,
        _ => return EM_DASH.to_string(),
    };

    let is_negative = minutes < 0.0;
    let abs_minutes = minutes.abs().round() as u64;
    let hrs = abs_minutes / 60;
    let mins = abs_minutes % 60;
    let formatted = format!("{}h {:02}m", hrs, mins);

    if is_negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

/// Formatear número con separadores de miles ("12345" → "12,345")
pub fn format_number(value: Option<f64>) -> String {
    let num = match value {
        Some(n) if n.is_finite() => n,
        Some(n) => return n.to_string(),
        None => return EM_DASH.to_string(),
    };

    let rounded = num.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formatear timestamp del backend para la UI
/// Acepta RFC3339 o "YYYY-MM-DDTHH:MM:SS"; si no parsea, devuelve el valor crudo
pub fn format_timestamp(value: Option<&str>) -> String {
    let raw = match value {
        Some(v) if !v.trim().is_empty() => v.trim(),
        _ => return EM_DASH.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d %b %Y, %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d %b %Y, %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format("%d %b %Y, %H:%M").to_string();
    }

    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_formats_hours_and_padded_minutes() {
        assert_eq!(minutes_to_hrs_minutes(Some(125.0)), "2h 05m");
        assert_eq!(minutes_to_hrs_minutes(Some(60.0)), "1h 00m");
        assert_eq!(minutes_to_hrs_minutes(Some(0.0)), "0h 00m");
    }

    #[test]
    fn minutes_negative_keeps_sign_prefix() {
        assert_eq!(minutes_to_hrs_minutes(Some(-5.0)), "-0h 05m");
        assert_eq!(minutes_to_hrs_minutes(Some(-125.0)), "-2h 05m");
    }

    #[test]
    fn minutes_none_and_nan_render_placeholder() {
        assert_eq!(minutes_to_hrs_minutes(None), EM_DASH);
        assert_eq!(minutes_to_hrs_minutes(Some(f64::NAN)), EM_DASH);
    }

    #[test]
    fn numbers_grouped_by_thousands() {
        assert_eq!(format_number(Some(0.0)), "0");
        assert_eq!(format_number(Some(999.0)), "999");
        assert_eq!(format_number(Some(12345.0)), "12,345");
        assert_eq!(format_number(Some(-1234567.0)), "-1,234,567");
        assert_eq!(format_number(None), EM_DASH);
    }

    #[test]
    fn timestamps_parse_common_backend_shapes() {
        assert_eq!(
            format_timestamp(Some("2025-03-08T14:30:00Z")),
            "08 Mar 2025, 14:30"
        );
        assert_eq!(
            format_timestamp(Some("2025-03-08T14:30:00")),
            "08 Mar 2025, 14:30"
        );
        // Sin parsear, se devuelve crudo
        assert_eq!(format_timestamp(Some("next tuesday")), "next tuesday");
        assert_eq!(format_timestamp(None), EM_DASH);
        assert_eq!(format_timestamp(Some("   ")), EM_DASH);
    }
}
