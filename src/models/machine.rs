use serde::Deserialize;

// ============================================================================
// MACHINE FLOOR WIRE MODELS - machine-floor/{id}
// ============================================================================
// Payload PascalCase del backend; IsRunning decide el layout idle/running
// ============================================================================

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct MachineStatus {
    #[serde(rename = "MachineID", default)]
    pub machine_id: Option<u32>,
    #[serde(rename = "MachineName", default)]
    pub machine_name: Option<String>,
    #[serde(rename = "IsRunning", default)]
    pub is_running: bool,
    /// Hint de color del backend ("green" / "red"); las vistas aplican un
    /// fallback por estado cuando viene vacío u otro valor
    #[serde(rename = "StatusColor", default)]
    pub status_color: Option<String>,

    // --- Estado idle ---
    #[serde(rename = "LastCompletedAt", default)]
    pub last_completed_at: Option<String>,
    #[serde(rename = "LastCompletedJobNumber", default)]
    pub last_completed_job_number: Option<String>,
    #[serde(rename = "IdleSinceMinutes", default)]
    pub idle_since_minutes: Option<f64>,
    #[serde(rename = "BacklogJobsOnMachine", default)]
    pub backlog_jobs_on_machine: Option<f64>,
    #[serde(rename = "BacklogJobsForProcess", default)]
    pub backlog_jobs_for_process: Option<f64>,

    // --- Estado running ---
    #[serde(rename = "CurrentJobNumber", default)]
    pub current_job_number: Option<String>,
    #[serde(rename = "CurrentJobName", default)]
    pub current_job_name: Option<String>,
    #[serde(rename = "CurrentJobStartedAt", default)]
    pub current_job_started_at: Option<String>,
    #[serde(rename = "RunningSinceMinutes", default)]
    pub running_since_minutes: Option<f64>,
    #[serde(rename = "TargetMinutesToFinish", default)]
    pub target_minutes_to_finish: Option<f64>,
    #[serde(rename = "TargetFinishAt", default)]
    pub target_finish_at: Option<String>,
    #[serde(rename = "IsBehindSchedule", default)]
    pub is_behind_schedule: bool,
    #[serde(rename = "ProducedQty", default)]
    pub produced_qty: Option<f64>,
    #[serde(rename = "PlanQty", default)]
    pub plan_qty: Option<f64>,
    #[serde(rename = "RemainingQty", default)]
    pub remaining_qty: Option<f64>,

    // --- Metadatos comunes ---
    #[serde(rename = "MachineSpeedUPM", default)]
    pub machine_speed_upm: Option<f64>,
    #[serde(rename = "ChangeOverMinutes", default)]
    pub change_over_minutes: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MachineFloorResponse {
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<MachineStatus>,
}
