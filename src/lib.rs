//! Gesture Web - Temporal Hand-Gesture Pipeline
//!
//! Entry point for WASM module. Only contains:
//! - Module declarations
//! - wasm_bindgen entry points that delegate to submodules
//!
//! JavaScript pushes one MediaPipe inference result per frame via the
//! bridge; the pipeline turns the noisy per-frame stream into debounced
//! point / swipe_left / swipe_right / click events.

mod bridge;
pub mod pipeline;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::push_hand_frame;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Mark the pipeline ready - call once the recognizer model has been
/// created on the JS side
#[wasm_bindgen]
pub fn init() -> Result<(), JsValue> {
    bridge::set_recognizer_ready();
    console_log!("✅ Gesture pipeline initialized");
    Ok(())
}
