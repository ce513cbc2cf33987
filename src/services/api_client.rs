// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP (Stateless)
// ============================================================================
// NO tiene lógica de negocio, solo hace requests HTTP contra el backend GRN.
// Todas las requests viajan con credentials: include (cookie de sesión del
// backend). Los endpoints devuelven { status: bool, error?: string }: un
// status=false se convierte en Err con el mensaje del backend.
// ============================================================================

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

use crate::config::api_base;
use crate::models::gpn::{SaveFinishGoodsRequest, SaveFinishGoodsResponse};
use crate::models::grn::{
    AckResponse, DeleteRecordRequest, InitiateRequest, InitiateResponse, LoginResponse,
    SaveDeliveryNoteRequest, SaveDeliveryNoteResponse, TransportersResponse,
    UpdateDeliveryNoteRequest, UpdateDeliveryNoteResponse,
};
use crate::models::machine::MachineFloorResponse;
use crate::models::status::{BarcodeStatusRequest, BarcodeStatusResponse};

/// Cliente API - SOLO comunicación HTTP (stateless)
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            base_url: api_base(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET genérico con cookie de sesión
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, String> {
        let response = Request::get(&self.url(path))
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    /// POST JSON genérico con cookie de sesión
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, String> {
        let response = Request::post(&self.url(path))
            .credentials(RequestCredentials::Include)
            .json(body)
            .map_err(|e| format!("Serialization error: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(http_error(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| format!("Parse error: {}", e))
    }

    // ------------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------------

    /// Login por username + database. `_t` evita respuestas cacheadas.
    pub async fn login(&self, username: &str, database: &str) -> Result<LoginResponse, String> {
        log::info!("🔐 [API] Login de usuario: {} ({})", username, database);
        let path = format!(
            "auth/login?username={}&database={}&_t={}",
            urlencode(username),
            urlencode(database),
            js_sys::Date::now() as u64
        );
        let resp: LoginResponse = self.get_json(&path).await?;
        if !resp.status {
            return Err(resp.error.unwrap_or_else(|| "Login failed".to_string()));
        }
        Ok(resp)
    }

    /// Cerrar la sesión del backend. Best-effort: el caller decide si el
    /// fallo importa (en el pre-login no importa).
    pub async fn logout(&self) -> Result<(), String> {
        let response = Request::post(&self.url("auth/logout"))
            .credentials(RequestCredentials::Include)
            .send()
            .await
            .map_err(|e| format!("Network error: {}", e))?;
        if !response.ok() {
            return Err(format!(
                "HTTP {}: {}",
                response.status(),
                response.status_text()
            ));
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // GRN (delivery notes)
    // ------------------------------------------------------------------------

    pub async fn get_transporters(&self, database: &str) -> Result<TransportersResponse, String> {
        let path = format!("grn/transporters?database={}", urlencode(database));
        let resp: TransportersResponse = self.get_json(&path).await?;
        if !resp.status {
            return Err(resp
                .error
                .unwrap_or_else(|| "Failed to load transporters".to_string()));
        }
        Ok(resp)
    }

    pub async fn initiate_challan(
        &self,
        request: &InitiateRequest,
    ) -> Result<InitiateResponse, String> {
        log::info!("📦 [API] Iniciando challan, barcode: {}", request.barcode);
        let resp: InitiateResponse = self.post_json("grn/initiate", request).await?;
        if !resp.status {
            return Err(resp
                .error
                .unwrap_or_else(|| "Failed to initiate challan".to_string()));
        }
        Ok(resp)
    }

    pub async fn save_delivery_note(
        &self,
        request: &SaveDeliveryNoteRequest,
    ) -> Result<SaveDeliveryNoteResponse, String> {
        let resp: SaveDeliveryNoteResponse =
            self.post_json("grn/save-delivery-note", request).await?;
        if !resp.status {
            return Err(resp
                .error
                .unwrap_or_else(|| "Failed to save delivery note".to_string()));
        }
        Ok(resp)
    }

    pub async fn update_delivery_note(
        &self,
        request: &UpdateDeliveryNoteRequest,
    ) -> Result<UpdateDeliveryNoteResponse, String> {
        let resp: UpdateDeliveryNoteResponse =
            self.post_json("grn/update-delivery-note", request).await?;
        if !resp.status {
            return Err(resp
                .error
                .unwrap_or_else(|| "Failed to update delivery note".to_string()));
        }
        Ok(resp)
    }

    pub async fn barcode_status(
        &self,
        request: &BarcodeStatusRequest,
    ) -> Result<BarcodeStatusResponse, String> {
        let resp: BarcodeStatusResponse = self.post_json("grn/barcode-status", request).await?;
        if !resp.status {
            return Err(resp
                .error
                .unwrap_or_else(|| "Failed to look up barcode".to_string()));
        }
        Ok(resp)
    }

    pub async fn delete_delivery_note(
        &self,
        request: &DeleteRecordRequest,
    ) -> Result<AckResponse, String> {
        log::info!("🗑️ [API] Borrando delivery note, barcode: {}", request.barcode);
        let resp: AckResponse = self.post_json("grn/delete-delivery-note", request).await?;
        if !resp.status {
            return Err(resp
                .error
                .unwrap_or_else(|| "Failed to delete delivery note".to_string()));
        }
        Ok(resp)
    }

    // ------------------------------------------------------------------------
    // GPN (finish goods / packing)
    // ------------------------------------------------------------------------

    pub async fn save_finish_goods(
        &self,
        request: &SaveFinishGoodsRequest,
    ) -> Result<SaveFinishGoodsResponse, String> {
        let resp: SaveFinishGoodsResponse =
            self.post_json("gpn/save-finish-goods", request).await?;
        if !resp.status {
            return Err(resp
                .error
                .unwrap_or_else(|| "Failed to save finish goods".to_string()));
        }
        Ok(resp)
    }

    pub async fn delete_finish_goods(
        &self,
        request: &DeleteRecordRequest,
    ) -> Result<AckResponse, String> {
        log::info!("🗑️ [API] Borrando finish goods, barcode: {}", request.barcode);
        let resp: AckResponse = self.post_json("gpn/delete-finish-goods", request).await?;
        if !resp.status {
            return Err(resp
                .error
                .unwrap_or_else(|| "Failed to delete finish goods".to_string()));
        }
        Ok(resp)
    }

    // ------------------------------------------------------------------------
    // Admin
    // ------------------------------------------------------------------------

    pub async fn clear_db_cache(&self) -> Result<AckResponse, String> {
        let body = serde_json::json!({});
        let resp: AckResponse = self.post_json("admin/clear-db-cache", &body).await?;
        if !resp.status {
            return Err(resp
                .error
                .unwrap_or_else(|| "Failed to clear cache".to_string()));
        }
        Ok(resp)
    }

    // ------------------------------------------------------------------------
    // Machine floor dashboard
    // ------------------------------------------------------------------------

    pub async fn machine_floor(
        &self,
        machine_id: &str,
        database: &str,
    ) -> Result<MachineFloorResponse, String> {
        let path = format!(
            "machine-floor/{}?database={}",
            urlencode(machine_id),
            urlencode(database)
        );
        let resp: MachineFloorResponse = self.get_json(&path).await?;
        if !resp.status {
            return Err(resp
                .error
                .unwrap_or_else(|| "Failed to load machine status".to_string()));
        }
        Ok(resp)
    }
}

/// Mensaje de error para un HTTP !ok: si el body trae {"error": "..."} se usa
/// ese mensaje, si no el código de estado
fn http_error(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(|e| e.as_str()) {
            if !msg.trim().is_empty() {
                return msg.to_string();
            }
        }
    }
    format!("HTTP {}", status)
}

fn urlencode(value: &str) -> String {
    js_sys::encode_uri_component(value)
        .as_string()
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_prefers_backend_message() {
        assert_eq!(
            http_error(401, r#"{"status":false,"error":"Invalid username"}"#),
            "Invalid username"
        );
    }

    #[test]
    fn http_error_falls_back_to_status_code() {
        assert_eq!(http_error(500, "<html>boom</html>"), "HTTP 500");
        assert_eq!(http_error(502, r#"{"error":"  "}"#), "HTTP 502");
    }
}
