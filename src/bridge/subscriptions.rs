//! Subscriber registries and event fan-out
//!
//! Two independent registries: raw per-frame snapshots (for rendering)
//! and temporal gesture events (for interaction). Callbacks run in
//! registration order; a throwing callback is logged and never blocks
//! later callbacks or the current frame.

use js_sys::{Float32Array, Function};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::pipeline::{FrameData, GestureEvent};

/// Ordered callback list with stable ids
struct Registry {
    next_id: u32,
    callbacks: Vec<(u32, Function)>,
}

impl Registry {
    fn subscribe(&mut self, callback: Function) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.callbacks.push((id, callback));
        id
    }

    fn unsubscribe(&mut self, id: u32) {
        self.callbacks.retain(|(cid, _)| *cid != id);
    }

    /// Snapshot for dispatch, so a callback that (un)subscribes mid-fan-out
    /// cannot invalidate the iteration
    fn snapshot(&self) -> Vec<Function> {
        self.callbacks.iter().map(|(_, cb)| cb.clone()).collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }
}

thread_local! {
    static FRAME_SUBS: RefCell<Registry> = RefCell::new(Registry::default());
    static GESTURE_SUBS: RefCell<Registry> = RefCell::new(Registry::default());
}

// ============================================================================
// WASM API
// ============================================================================

/// Subscribe to raw per-frame data. The callback receives
/// `(Float32Array [wrist x,y, palm x,y, thumb x,y, index x,y], label)`
/// once per processed frame. Returns an id for `unsubscribe_frames`.
#[wasm_bindgen]
pub fn subscribe_frames(callback: Function) -> u32 {
    FRAME_SUBS.with(|r| r.borrow_mut().subscribe(callback))
}

#[wasm_bindgen]
pub fn unsubscribe_frames(id: u32) {
    FRAME_SUBS.with(|r| r.borrow_mut().unsubscribe(id));
}

/// Subscribe to temporal gesture events. The callback receives
/// `(name, x, y)`; discrete events (swipe/click) carry NaN coordinates.
/// Returns an id for `unsubscribe_gestures`.
#[wasm_bindgen]
pub fn subscribe_gestures(callback: Function) -> u32 {
    GESTURE_SUBS.with(|r| r.borrow_mut().subscribe(callback))
}

#[wasm_bindgen]
pub fn unsubscribe_gestures(id: u32) {
    GESTURE_SUBS.with(|r| r.borrow_mut().unsubscribe(id));
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

/// Deliver one frame snapshot to every frame subscriber
pub fn dispatch_frame(frame: &FrameData) {
    let callbacks = FRAME_SUBS.with(|r| r.borrow().snapshot());
    if callbacks.is_empty() {
        return;
    }

    let flat = frame.to_flat();
    let array = Float32Array::from(flat.as_slice());
    let label = frame
        .gesture
        .as_ref()
        .map(|g| g.label.as_str())
        .unwrap_or("");

    for callback in callbacks {
        if let Err(err) = callback.call2(&JsValue::NULL, &array, &JsValue::from_str(label)) {
            web_sys::console::error_1(&err);
        }
    }
}

/// Deliver one gesture event to every gesture subscriber
pub fn dispatch_gesture(event: &GestureEvent) {
    let callbacks = GESTURE_SUBS.with(|r| r.borrow().snapshot());
    if callbacks.is_empty() {
        return;
    }

    let (x, y) = match event {
        GestureEvent::Point { x, y } => (*x, *y),
        _ => (f32::NAN, f32::NAN),
    };

    for callback in callbacks {
        if let Err(err) = callback.call3(
            &JsValue::NULL,
            &JsValue::from_str(event.name()),
            &JsValue::from_f64(x as f64),
            &JsValue::from_f64(y as f64),
        ) {
            web_sys::console::error_1(&err);
        }
    }
}
