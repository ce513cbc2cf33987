// ============================================================================
// DASHBOARD VIEW - Panel de estado de máquina (render puro al DOM)
// ============================================================================

use crate::dom::{as_html_element, get_element_by_id, set_text_by_id};
use crate::utils::format::{minutes_to_hrs_minutes, EM_DASH};
use crate::viewmodels::dashboard_viewmodel::{DashboardView, IdleView, MachineBody, RunningView};

const BEHIND_COLOR: &str = "#b91c1c";
const ON_TRACK_COLOR: &str = "#047857";

/// Variante visual del mensaje de estado (clase CSS)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageVariant {
    Info,
    Error,
}

impl MessageVariant {
    fn css_class(&self) -> &'static str {
        match self {
            MessageVariant::Info => "info",
            MessageVariant::Error => "error",
        }
    }
}

pub fn show_status_message(message: &str, variant: MessageVariant) {
    if let Some(el) = get_element_by_id("statusMessage") {
        el.set_text_content(Some(message));
        el.set_class_name(&format!("status-message {}", variant.css_class()));
    }
}

pub fn hide_status_message() {
    if let Some(el) = get_element_by_id("statusMessage") {
        el.set_text_content(Some(""));
        el.set_class_name("status-message hidden");
    }
}

pub fn set_machine_id_display(machine_id: Option<u32>) {
    let text = machine_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| EM_DASH.to_string());
    set_text_by_id("machineIdDisplay", &text);
}

fn set_display(id: &str, visible: bool) {
    if let Some(el) = get_element_by_id(id) {
        if let Some(html) = as_html_element(&el) {
            let value = if visible { "" } else { "none" };
            let _ = html.style().set_property("display", value);
        }
    }
}

fn set_color(id: &str, color: &str) {
    if let Some(el) = get_element_by_id(id) {
        if let Some(html) = as_html_element(&el) {
            let _ = html.style().set_property("color", color);
        }
    }
}

fn set_badge(label: &str, color_class: &str) {
    if let Some(badge) = get_element_by_id("machineStatusBadge") {
        badge.set_text_content(Some(label));
        badge.set_class_name(&format!("status-badge {}", color_class));
    }
}

/// `idle_extra_minutes` es lo que sumó el contador local desde el último fetch
pub fn render(view: &DashboardView, idle_extra_minutes: f64) {
    set_text_by_id("machineName", &view.machine_name);
    set_text_by_id("machineIdLabel", &view.machine_id_label);

    match &view.body {
        MachineBody::Idle(idle) => render_idle(idle, idle_extra_minutes),
        MachineBody::Running(running) => render_running(running),
    }

    set_text_by_id("machineSpeed", &view.meta.machine_speed);
    set_text_by_id("changeOver", &view.meta.change_over);
    set_text_by_id("planQty", &view.meta.plan_qty);
}

fn render_idle(idle: &IdleView, extra_minutes: f64) {
    set_display("idleLayout", true);
    set_display("runningLayout", false);

    set_badge("Idle", idle.badge_color.css_class());
    set_text_by_id("idleStatusText", idle.status_text);
    set_color("idleStatusText", BEHIND_COLOR);
    set_text_by_id("lastJobCompleted", &idle.last_job_completed);
    render_idle_duration(idle.idle_since_minutes, extra_minutes);
    set_text_by_id("backlogMachine", &idle.backlog_machine);
    set_text_by_id("backlogProcess", &idle.backlog_process);
}

/// El contador de idle corre localmente entre refreshes del backend
pub fn render_idle_duration(seed_minutes: Option<f64>, extra_minutes: f64) {
    let text = match seed_minutes {
        Some(seed) => minutes_to_hrs_minutes(Some(seed + extra_minutes)),
        None => EM_DASH.to_string(),
    };
    set_text_by_id("idleDuration", &text);
}

fn render_running(running: &RunningView) {
    set_display("idleLayout", false);
    set_display("runningLayout", true);

    set_badge("Running", running.badge_color.css_class());
    set_text_by_id("currentJob", &running.current_job);
    set_text_by_id("startTime", &running.start_time);
    set_text_by_id("runningDuration", &running.running_duration);
    set_text_by_id("targetFinishIn", &running.target_finish_in);
    set_text_by_id("eta", &running.eta);
    set_text_by_id("runningStatusText", running.status_text);
    set_color(
        "runningStatusText",
        if running.is_behind_schedule {
            BEHIND_COLOR
        } else {
            ON_TRACK_COLOR
        },
    );

    if let Some(fill) = get_element_by_id("progressFill") {
        if let Some(html) = as_html_element(&fill) {
            let _ = html.style().set_property("width", &running.progress_width);
        }
    }
    set_text_by_id("progressText", &running.progress_text);
    set_text_by_id("remainingText", &running.remaining_text);
}
