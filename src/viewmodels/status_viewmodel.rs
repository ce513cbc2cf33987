// ============================================================================
// STATUS VIEWMODEL - Historial de barcode: categorías canónicas y acciones
// ============================================================================
// Regla de negocio: una fila `gpn` no puede borrarse mientras exista una fila
// `delivery note` en el mismo resultado (la delivery note dependiente debe
// eliminarse antes que su packing note padre).
// ============================================================================

use crate::models::StatusRecord;
use crate::utils::format::{format_timestamp, EM_DASH};

/// Categoría canónica de un evento de barcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Gpn,
    DeliveryNote,
    PackingSlip,
    Other,
}

pub fn normalize_category(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Mapear variantes del backend a la categoría canónica
pub fn canonical_category(raw: &str) -> StatusCategory {
    match normalize_category(raw).as_str() {
        "gpn" | "goods packing note" => StatusCategory::Gpn,
        "dn" | "delivery note" => StatusCategory::DeliveryNote,
        "packing slip" | "packing-slip" | "packingslip" => StatusCategory::PackingSlip,
        _ => StatusCategory::Other,
    }
}

impl StatusCategory {
    pub fn badge_class(&self) -> &'static str {
        match self {
            StatusCategory::Gpn => "status-badge-gpn",
            StatusCategory::DeliveryNote => "status-badge-delivery",
            StatusCategory::PackingSlip => "status-badge-packingslip",
            StatusCategory::Other => "status-badge-default",
        }
    }

    /// Solo gpn y delivery note ofrecen borrado
    pub fn deletable(&self) -> bool {
        matches!(self, StatusCategory::Gpn | StatusCategory::DeliveryNote)
    }

    pub fn confirm_message(&self, barcode: i64) -> String {
        match self {
            StatusCategory::DeliveryNote => {
                format!("Delete Delivery Note entry for barcode {}?", barcode)
            }
            _ => format!("Delete GPN entry for barcode {}?", barcode),
        }
    }
}

/// Acción de borrado de una fila
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAction {
    pub category: StatusCategory,
    pub enabled: bool,
    pub disabled_hint: Option<&'static str>,
}

/// Estado del botón Delete durante el ciclo de un borrado. Mientras el
/// request está en vuelo el botón queda deshabilitado: un borrado lento no
/// puede disparar borrados concurrentes a fuerza de clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTrigger {
    pub label: &'static str,
    pub disabled: bool,
}

pub fn delete_trigger(in_flight: bool) -> DeleteTrigger {
    if in_flight {
        DeleteTrigger {
            label: "Deleting...",
            disabled: true,
        }
    } else {
        DeleteTrigger {
            label: "Delete",
            disabled: false,
        }
    }
}

/// Fila del timeline lista para renderizar
#[derive(Debug, Clone, PartialEq)]
pub struct StatusRowView {
    pub category_label: String,
    pub badge_class: &'static str,
    pub event_date: String,
    pub job_booking_no: String,
    pub delete: Option<DeleteAction>,
}

/// Construir las filas del timeline a partir de los records del backend
pub fn build_status_rows(records: &[StatusRecord]) -> Vec<StatusRowView> {
    let has_delivery_note = records.iter().any(|r| {
        canonical_category(r.category.as_deref().unwrap_or("")) == StatusCategory::DeliveryNote
    });

    records
        .iter()
        .map(|record| {
            let raw_category = record.category.as_deref().unwrap_or(EM_DASH);
            let category = canonical_category(raw_category);

            let delete = if category.deletable() {
                let blocked = category == StatusCategory::Gpn && has_delivery_note;
                Some(DeleteAction {
                    category,
                    enabled: !blocked,
                    disabled_hint: blocked
                        .then_some("Delete the Delivery Note entry first to enable this action."),
                })
            } else {
                None
            };

            StatusRowView {
                category_label: raw_category.to_string(),
                badge_class: category.badge_class(),
                event_date: format_timestamp(record.event_date.as_deref()),
                job_booking_no: record
                    .job_booking_no
                    .clone()
                    .filter(|j| !j.trim().is_empty())
                    .unwrap_or_else(|| EM_DASH.to_string()),
                delete,
            }
        })
        .collect()
}

/// Línea de resumen bajo el título del timeline
pub fn summary_line(records: &[StatusRecord], barcode: Option<i64>) -> String {
    if records.is_empty() {
        return match barcode {
            Some(b) => format!("No history available for barcode {}.", b),
            None => "No history available for the provided barcode.".to_string(),
        };
    }

    let mut job_numbers: Vec<String> = Vec::new();
    for record in records {
        if let Some(job) = record.job_booking_no.as_deref() {
            let job = job.trim();
            if !job.is_empty() && !job_numbers.iter().any(|j| j == job) {
                job_numbers.push(job.to_string());
            }
        }
    }

    let count_text = format!(
        "{} record{}",
        records.len(),
        if records.len() == 1 { "" } else { "s" }
    );
    let job_text = if job_numbers.is_empty() {
        "Job Booking not available".to_string()
    } else {
        format!(
            "Job Booking{}: {}",
            if job_numbers.len() > 1 { "s" } else { "" },
            job_numbers.join(", ")
        )
    };

    match barcode {
        Some(b) => format!("{} found for barcode {} • {}", count_text, b, job_text),
        None => format!("{} found • {}", count_text, job_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, job: &str) -> StatusRecord {
        StatusRecord {
            category: Some(category.to_string()),
            event_date: Some("2025-03-08T10:00:00".to_string()),
            job_booking_no: Some(job.to_string()),
        }
    }

    #[test]
    fn category_variants_map_to_canonical() {
        assert_eq!(canonical_category("Goods Packing Note"), StatusCategory::Gpn);
        assert_eq!(canonical_category("GPN"), StatusCategory::Gpn);
        assert_eq!(canonical_category("DN"), StatusCategory::DeliveryNote);
        assert_eq!(canonical_category("Delivery Note"), StatusCategory::DeliveryNote);
        assert_eq!(canonical_category("packing-slip"), StatusCategory::PackingSlip);
        assert_eq!(canonical_category("dispatched"), StatusCategory::Other);
    }

    #[test]
    fn gpn_delete_blocked_while_delivery_note_present() {
        let rows = build_status_rows(&[record("GPN", "JB-1"), record("Delivery Note", "JB-1")]);

        let gpn_delete = rows[0].delete.as_ref().unwrap();
        assert!(!gpn_delete.enabled);
        assert!(gpn_delete.disabled_hint.is_some());

        let dn_delete = rows[1].delete.as_ref().unwrap();
        assert!(dn_delete.enabled);
    }

    #[test]
    fn gpn_delete_enabled_once_delivery_note_removed() {
        let rows = build_status_rows(&[record("GPN", "JB-1")]);
        assert!(rows[0].delete.as_ref().unwrap().enabled);
    }

    #[test]
    fn non_deletable_rows_have_no_action() {
        let rows = build_status_rows(&[record("Packing Slip", "JB-1"), record("Dispatched", "")]);
        assert!(rows[0].delete.is_none());
        assert!(rows[1].delete.is_none());
        assert_eq!(rows[1].job_booking_no, EM_DASH);
    }

    #[test]
    fn delete_trigger_disabled_while_request_in_flight() {
        let busy = delete_trigger(true);
        assert!(busy.disabled);
        assert_eq!(busy.label, "Deleting...");

        // Al terminar (éxito o error) el botón vuelve a su estado original
        let idle = delete_trigger(false);
        assert!(!idle.disabled);
        assert_eq!(idle.label, "Delete");
    }

    #[test]
    fn summary_counts_and_collects_job_numbers() {
        let records = vec![record("GPN", "JB-1"), record("Delivery Note", "JB-2")];
        assert_eq!(
            summary_line(&records, Some(42)),
            "2 records found for barcode 42 • Job Bookings: JB-1, JB-2"
        );
        assert_eq!(
            summary_line(&[], Some(42)),
            "No history available for barcode 42."
        );
    }
}
