//! Frame ingestion and service state
//!
//! Receives one inference result per processed video frame from
//! JavaScript and drives the pipeline. The service instance lives in
//! thread-local storage (WASM is single-threaded); JS never holds
//! pipeline state.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::pipeline::{
    GestureConfig, GestureService, Landmark, StaticGesture, HAND_LANDMARK_COUNT,
};

use super::subscriptions;

/// Host-facing service state
struct ServiceState {
    service: GestureService,
    /// Recognizer options the JS host reads back when (re)creating the model
    model_asset_path: String,
    num_hands: u32,
    ready: bool,
    on_ready: Option<js_sys::Function>,
}

impl Default for ServiceState {
    fn default() -> Self {
        Self {
            service: GestureService::default(),
            model_asset_path: String::new(),
            num_hands: 1,
            ready: false,
            on_ready: None,
        }
    }
}

thread_local! {
    static SERVICE: RefCell<ServiceState> = RefCell::new(ServiceState::default());
}

// ============================================================================
// FRAME INGESTION
// ============================================================================

/// Called from JavaScript once per processed video frame with the first
/// hand's flat landmark array (21 × 3 floats), the top static gesture for
/// that hand, and the frame timestamp. Pass an empty array and empty
/// label when nothing was detected. Frames repeating the previous
/// timestamp are skipped (unchanged video frame).
#[wasm_bindgen]
pub fn push_hand_frame(flat_data: &[f32], label: &str, confidence: f32, timestamp_ms: f64) {
    let hand = parse_landmarks(flat_data);
    let gesture = if label.is_empty() {
        None
    } else {
        Some(StaticGesture::new(label, confidence))
    };

    // Process while holding the borrow, dispatch after releasing it, so a
    // callback may call back into the bridge
    let output = SERVICE.with(|state_cell| {
        let mut state = state_cell.borrow_mut();
        state
            .service
            .process_frame(hand.as_deref(), gesture, timestamp_ms)
    });

    if let Some(output) = output {
        subscriptions::dispatch_frame(&output.frame);
        for event in &output.events {
            subscriptions::dispatch_gesture(event);
        }
    }
}

/// Parse the flat 21×3 array; anything malformed degrades to "no hand"
fn parse_landmarks(flat_data: &[f32]) -> Option<Vec<Landmark>> {
    if flat_data.is_empty() {
        return None;
    }
    if flat_data.len() < HAND_LANDMARK_COUNT * 3 {
        web_sys::console::warn_1(
            &format!(
                "Invalid landmark data length: {} (expected {})",
                flat_data.len(),
                HAND_LANDMARK_COUNT * 3
            )
            .into(),
        );
        return None;
    }

    let mut hand = Vec::with_capacity(HAND_LANDMARK_COUNT);
    for i in 0..HAND_LANDMARK_COUNT {
        hand.push(Landmark::with_z(
            flat_data[i * 3],
            flat_data[i * 3 + 1],
            flat_data[i * 3 + 2],
        ));
    }
    Some(hand)
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Update pipeline tuning; takes effect from the next processed frame.
/// `majority_window` must be 3 or 5 and `ema_alpha` in (0, 1]; invalid
/// values are rejected with a warning and the old config stays.
#[wasm_bindgen]
pub fn set_pipeline_params(
    buffer_size: usize,
    ema_alpha: f32,
    majority_window: usize,
    max_gap: usize,
    swipe_threshold: f32,
) {
    if majority_window != 3 && majority_window != 5 {
        web_sys::console::warn_1(
            &format!("Invalid majority window: {} (must be 3 or 5)", majority_window).into(),
        );
        return;
    }
    if !(ema_alpha > 0.0 && ema_alpha <= 1.0) {
        web_sys::console::warn_1(
            &format!("Invalid EMA alpha: {} (must be in (0, 1])", ema_alpha).into(),
        );
        return;
    }

    SERVICE.with(|state_cell| {
        state_cell.borrow_mut().service.set_config(GestureConfig {
            buffer_size,
            ema_alpha,
            majority_window,
            max_gap,
            swipe_threshold,
        });
    });
}

#[wasm_bindgen]
pub fn set_model_asset_path(path: &str) {
    SERVICE.with(|state_cell| {
        state_cell.borrow_mut().model_asset_path = path.to_owned();
    });
}

#[wasm_bindgen]
pub fn get_model_asset_path() -> String {
    SERVICE.with(|state_cell| state_cell.borrow().model_asset_path.clone())
}

#[wasm_bindgen]
pub fn set_num_hands(num_hands: u32) {
    SERVICE.with(|state_cell| {
        state_cell.borrow_mut().num_hands = num_hands.max(1);
    });
}

#[wasm_bindgen]
pub fn get_num_hands() -> u32 {
    SERVICE.with(|state_cell| state_cell.borrow().num_hands)
}

// ============================================================================
// READINESS & LIFECYCLE
// ============================================================================

/// Called when the recognizer model has finished loading on the JS side.
/// Fires the pending readiness callback exactly once; repeated calls are
/// no-ops.
#[wasm_bindgen]
pub fn set_recognizer_ready() {
    let callback = SERVICE.with(|state_cell| {
        let mut state = state_cell.borrow_mut();
        if state.ready {
            None
        } else {
            state.ready = true;
            state.on_ready.take()
        }
    });

    if let Some(callback) = callback {
        if let Err(err) = callback.call0(&JsValue::NULL) {
            web_sys::console::error_1(&err);
        }
    }
}

#[wasm_bindgen]
pub fn is_ready() -> bool {
    SERVICE.with(|state_cell| state_cell.borrow().ready)
}

/// Register a single-fire readiness callback. Invoked immediately if the
/// recognizer is already ready - no polling loops on the JS side.
#[wasm_bindgen]
pub fn on_ready(callback: js_sys::Function) {
    let fire_now = SERVICE.with(|state_cell| {
        let mut state = state_cell.borrow_mut();
        if state.ready {
            true
        } else {
            state.on_ready = Some(callback.clone());
            false
        }
    });

    if fire_now {
        if let Err(err) = callback.call0(&JsValue::NULL) {
            web_sys::console::error_1(&err);
        }
    }
}

/// Teardown: drop all accumulated pipeline state. Idempotent. The JS host
/// releases the capture stream and recognizer separately.
#[wasm_bindgen]
pub fn reset_pipeline() {
    SERVICE.with(|state_cell| {
        state_cell.borrow_mut().service.reset();
    });
}

// ============================================================================
// SNAPSHOT GETTERS
// ============================================================================

/// Latest smoothed snapshot as a flat array
/// `[wrist x,y, palm x,y, thumb x,y, index x,y]`, NaN for absent points.
/// None until the first frame has been processed.
#[wasm_bindgen]
pub fn get_current_frame_data() -> Option<Vec<f32>> {
    SERVICE.with(|state_cell| {
        let state = state_cell.borrow();
        state.service.current_frame().map(|frame| frame.to_flat())
    })
}

/// Static gesture label of the latest frame; empty when none
#[wasm_bindgen]
pub fn get_current_frame_label() -> String {
    SERVICE.with(|state_cell| {
        let state = state_cell.borrow();
        state
            .service
            .current_frame()
            .and_then(|frame| frame.gesture.as_ref())
            .map(|g| g.label.clone())
            .unwrap_or_default()
    })
}

/// Current sliding-buffer occupancy (debug)
#[wasm_bindgen]
pub fn get_buffer_len() -> usize {
    SERVICE.with(|state_cell| state_cell.borrow().service.buffer_len())
}
