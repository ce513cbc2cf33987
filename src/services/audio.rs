// ============================================================================
// AUDIO - Sirena de alerta del dashboard (Web Audio API)
// ============================================================================
// Un solo AudioContext reutilizado entre disparos (los navegadores limitan
// cuántos se pueden crear). Todos los fallos se tragan: el audio es un extra,
// nunca puede romper el flujo de alertas.
// ============================================================================

use std::cell::RefCell;

use wasm_bindgen::JsValue;
use web_sys::{AudioContext, AudioContextState, OscillatorType};

use crate::dom::alert;

thread_local! {
    static AUDIO_CONTEXT: RefCell<Option<AudioContext>> = const { RefCell::new(None) };
}

/// Sonar la sirena. No-op silencioso si el navegador bloquea el audio.
pub fn play_siren() {
    if let Err(e) = try_play_siren() {
        log::warn!("⚠️ [AUDIO] Sirena no disponible: {:?}", e);
    }
}

/// Sirena + alert() nativo. El alert bloquea, así que la sirena arranca antes.
pub fn alert_with_siren(message: &str) {
    play_siren();
    alert(message);
}

fn try_play_siren() -> Result<(), JsValue> {
    AUDIO_CONTEXT.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            *slot = Some(AudioContext::new()?);
        }
        let ctx = slot.as_ref().ok_or_else(|| JsValue::from_str("no ctx"))?;

        // Un gesto de usuario previo puede haber dejado el contexto suspendido
        if ctx.state() == AudioContextState::Suspended {
            let _ = ctx.resume()?;
        }

        let oscillator = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        let now = ctx.current_time();
        oscillator.set_type(OscillatorType::Sawtooth);

        // Barrido de frecuencia: dos subidas y bajadas, efecto sirena
        let freq = oscillator.frequency();
        freq.set_value_at_time(600.0, now)?;
        freq.linear_ramp_to_value_at_time(1200.0, now + 0.3)?;
        freq.linear_ramp_to_value_at_time(700.0, now + 0.6)?;
        freq.linear_ramp_to_value_at_time(1100.0, now + 0.9)?;

        // Ataque y decaimiento exponencial para evitar clicks
        let volume = gain.gain();
        volume.set_value_at_time(0.0001, now)?;
        volume.exponential_ramp_to_value_at_time(0.2, now + 0.05)?;
        volume.exponential_ramp_to_value_at_time(0.0001, now + 1.1)?;

        oscillator.start()?;
        oscillator.stop_with_when(now + 1.2)?;
        Ok(())
    })
}
