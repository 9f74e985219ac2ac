//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod frame_input;
mod subscriptions;

pub use frame_input::{
    // WASM entry points
    push_hand_frame,
    set_pipeline_params,
    set_model_asset_path,
    set_num_hands,
    set_recognizer_ready,
    on_ready,
    is_ready,
    reset_pipeline,
    get_current_frame_data,
    get_current_frame_label,
    get_buffer_len,
    get_model_asset_path,
    get_num_hands,
};

pub use subscriptions::{
    subscribe_frames,
    unsubscribe_frames,
    subscribe_gestures,
    unsubscribe_gestures,
};
