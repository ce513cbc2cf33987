// ============================================================================
// DASHBOARD VIEWMODEL - Estado de máquina → modelo de vista (sin DOM)
// ============================================================================
// IsRunning decide el layout; el badge usa el hint de color del backend con
// fallback por estado: rojo en idle, verde/rojo en running según schedule.
// ============================================================================

use crate::models::MachineStatus;
use crate::utils::format::{format_number, format_timestamp, minutes_to_hrs_minutes, EM_DASH};

/// Bases de datos habilitadas para el selector del dashboard
pub const ALLOWED_DATABASES: [&str; 2] = ["KOL", "AHM"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Green,
    Red,
}

impl BadgeColor {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeColor::Green => "green",
            BadgeColor::Red => "red",
        }
    }
}

/// Resolver el color del badge: hint del backend si es reconocible,
/// si no el fallback del estado
pub fn badge_color(hint: Option<&str>, fallback: BadgeColor) -> BadgeColor {
    match hint.map(|h| h.trim().to_lowercase()).as_deref() {
        Some("green") => BadgeColor::Green,
        Some("red") => BadgeColor::Red,
        _ => fallback,
    }
}

/// Porcentaje de avance: clamp(produced/plan*100, 0, 100); 0 si plan es 0
pub fn progress_percent(produced: f64, plan: f64) -> f64 {
    if plan > 0.0 {
        (produced / plan * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Ancho CSS de la barra de progreso, un decimal
pub fn progress_width(percent: f64) -> String {
    format!("{:.1}%", percent)
}

#[derive(Debug, Clone, PartialEq)]
pub struct IdleView {
    pub badge_color: BadgeColor,
    pub status_text: &'static str,
    pub last_job_completed: String,
    /// Semilla del contador local de idle; None deja el placeholder
    pub idle_since_minutes: Option<f64>,
    pub backlog_machine: String,
    pub backlog_process: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunningView {
    pub badge_color: BadgeColor,
    pub is_behind_schedule: bool,
    pub status_text: &'static str,
    pub current_job: String,
    pub start_time: String,
    pub running_duration: String,
    pub target_finish_in: String,
    pub eta: String,
    pub progress_width: String,
    pub progress_text: String,
    pub remaining_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MachineBody {
    Idle(IdleView),
    Running(RunningView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaView {
    pub machine_speed: String,
    pub change_over: String,
    pub plan_qty: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub machine_name: String,
    pub machine_id_label: String,
    pub machine_id: Option<u32>,
    pub body: MachineBody,
    pub meta: MetaView,
}

/// Mapear el payload del backend al modelo de vista completo
pub fn dashboard_view(data: &MachineStatus) -> DashboardView {
    let body = if data.is_running {
        MachineBody::Running(running_view(data))
    } else {
        MachineBody::Idle(idle_view(data))
    };

    DashboardView {
        machine_name: data
            .machine_name
            .clone()
            .unwrap_or_else(|| "Unknown Machine".to_string()),
        machine_id_label: format!(
            "Machine ID: {}",
            data.machine_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| EM_DASH.to_string())
        ),
        machine_id: data.machine_id,
        body,
        meta: meta_view(data),
    }
}

fn idle_view(data: &MachineStatus) -> IdleView {
    let last_job_completed = match data.last_completed_at.as_deref() {
        Some(at) if !at.trim().is_empty() => format!(
            "{} ({})",
            format_timestamp(Some(at)),
            data.last_completed_job_number
                .as_deref()
                .unwrap_or("Unknown Job")
        ),
        _ => "No data".to_string(),
    };

    IdleView {
        badge_color: badge_color(data.status_color.as_deref(), BadgeColor::Red),
        status_text: "IDLE (Red)",
        last_job_completed,
        idle_since_minutes: data.idle_since_minutes.filter(|m| m.is_finite()),
        backlog_machine: format_number(data.backlog_jobs_on_machine),
        backlog_process: format_number(data.backlog_jobs_for_process),
    }
}

fn running_view(data: &MachineStatus) -> RunningView {
    let is_behind = data.is_behind_schedule;
    let fallback = if is_behind {
        BadgeColor::Red
    } else {
        BadgeColor::Green
    };

    let produced = data.produced_qty.unwrap_or(0.0);
    let plan = data.plan_qty.unwrap_or(0.0);
    let remaining = data.remaining_qty.unwrap_or(0.0);
    let percent = progress_percent(produced, plan);

    RunningView {
        badge_color: badge_color(data.status_color.as_deref(), fallback),
        is_behind_schedule: is_behind,
        status_text: if is_behind {
            "Running behind schedule"
        } else {
            "On track"
        },
        current_job: format!(
            "{} – {}",
            data.current_job_number.as_deref().unwrap_or("Unknown Job"),
            data.current_job_name.as_deref().unwrap_or("Unnamed")
        ),
        start_time: format_timestamp(data.current_job_started_at.as_deref()),
        running_duration: minutes_to_hrs_minutes(data.running_since_minutes),
        target_finish_in: minutes_to_hrs_minutes(data.target_minutes_to_finish),
        eta: format_timestamp(data.target_finish_at.as_deref()),
        progress_width: progress_width(percent),
        progress_text: format!(
            "Produced {} / {}",
            format_number(Some(produced)),
            format_number(Some(plan))
        ),
        remaining_text: format!("Remaining {}", format_number(Some(remaining))),
    }
}

fn meta_view(data: &MachineStatus) -> MetaView {
    MetaView {
        machine_speed: match data.machine_speed_upm {
            Some(speed) if speed.is_finite() => format!("{} UPM", format_number(Some(speed))),
            _ => EM_DASH.to_string(),
        },
        change_over: match data.change_over_minutes {
            Some(minutes) if minutes.is_finite() => minutes_to_hrs_minutes(Some(minutes)),
            _ => EM_DASH.to_string(),
        },
        plan_qty: format_number(data.plan_qty),
    }
}

/// Resolver la base de datos efectiva: parámetro de URL si está permitido,
/// si no el default de config (o KOL si tampoco está permitido)
pub fn resolve_database(param: Option<&str>, config_default: &str) -> String {
    if let Some(candidate) = param {
        let candidate = candidate.trim().to_uppercase();
        if ALLOWED_DATABASES.contains(&candidate.as_str()) {
            return candidate;
        }
    }
    let default = config_default.trim().to_uppercase();
    if ALLOWED_DATABASES.contains(&default.as_str()) {
        default
    } else {
        ALLOWED_DATABASES[0].to_string()
    }
}

/// Resolver machine id: parámetro de URL (entero positivo) o default de config
pub fn resolve_machine_id(param: Option<&str>, config_default: Option<u32>) -> Option<u32> {
    if let Some(raw) = param {
        if let Ok(id) = raw.trim().parse::<u32>() {
            if id > 0 {
                return Some(id);
            }
        }
    }
    config_default.filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_status(produced: f64, plan: f64) -> MachineStatus {
        MachineStatus {
            machine_id: Some(12),
            machine_name: Some("Folder 3".to_string()),
            is_running: true,
            produced_qty: Some(produced),
            plan_qty: Some(plan),
            remaining_qty: Some(plan - produced),
            ..Default::default()
        }
    }

    #[test]
    fn progress_clamps_and_formats_one_decimal() {
        assert_eq!(progress_percent(30.0, 40.0), 75.0);
        assert_eq!(progress_width(progress_percent(30.0, 40.0)), "75.0%");
        assert_eq!(progress_percent(500.0, 40.0), 100.0);
        assert_eq!(progress_percent(-5.0, 40.0), 0.0);
    }

    #[test]
    fn zero_plan_never_divides() {
        assert_eq!(progress_percent(30.0, 0.0), 0.0);
        let view = running_view(&running_status(30.0, 0.0));
        assert_eq!(view.progress_width, "0.0%");
    }

    #[test]
    fn behind_schedule_comes_only_from_server_flag() {
        let mut status = running_status(10.0, 40.0);
        status.is_behind_schedule = true;
        let view = running_view(&status);
        assert_eq!(view.status_text, "Running behind schedule");
        assert_eq!(view.badge_color, BadgeColor::Red);

        status.is_behind_schedule = false;
        let view = running_view(&status);
        assert_eq!(view.status_text, "On track");
        assert_eq!(view.badge_color, BadgeColor::Green);
    }

    #[test]
    fn badge_hint_wins_over_fallback() {
        assert_eq!(badge_color(Some("GREEN"), BadgeColor::Red), BadgeColor::Green);
        assert_eq!(badge_color(Some("purple"), BadgeColor::Red), BadgeColor::Red);
        assert_eq!(badge_color(None, BadgeColor::Green), BadgeColor::Green);
    }

    #[test]
    fn idle_view_uses_red_fallback_and_seed_minutes() {
        let status = MachineStatus {
            is_running: false,
            idle_since_minutes: Some(125.0),
            last_completed_at: Some("2025-03-08T06:00:00".to_string()),
            last_completed_job_number: Some("JOB-9".to_string()),
            ..Default::default()
        };
        let view = idle_view(&status);
        assert_eq!(view.badge_color, BadgeColor::Red);
        assert_eq!(view.idle_since_minutes, Some(125.0));
        assert!(view.last_job_completed.contains("JOB-9"));
    }

    #[test]
    fn database_restricted_to_allowed_list() {
        assert_eq!(resolve_database(Some("ahm"), "KOL"), "AHM");
        assert_eq!(resolve_database(Some("BOGUS"), "KOL"), "KOL");
        assert_eq!(resolve_database(None, "bogus"), "KOL");
    }

    #[test]
    fn machine_id_from_url_must_be_positive_integer() {
        assert_eq!(resolve_machine_id(Some("12"), None), Some(12));
        assert_eq!(resolve_machine_id(Some("0"), Some(3)), Some(3));
        assert_eq!(resolve_machine_id(Some("abc"), Some(3)), Some(3));
        assert_eq!(resolve_machine_id(None, None), None);
    }
}
