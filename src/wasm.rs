//! Browser bindings. The page owns decoding, layout and toasts; this class
//! owns the pixels and the color list.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::buffer::PixelBuffer;
use crate::cluster::ClusterConfig;
use crate::collection::{AddOutcome, ColorEntry};
use crate::workspace::{Viewport, Workspace};

/// What a click on the image did.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickStatus {
    Added,
    Duplicate,
    /// Eyedropper off, no image loaded, or the click fell outside the image.
    Missed,
}

#[wasm_bindgen]
pub struct ColorPicker {
    workspace: Workspace,
}

#[wasm_bindgen]
impl ColorPicker {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ColorPicker {
        ColorPicker {
            workspace: Workspace::new(),
        }
    }

    /// Loads raw RGBA samples, e.g. `ctx.getImageData(..).data`.
    #[wasm_bindgen(js_name = loadRgba)]
    pub fn load_rgba(&mut self, width: u32, height: u32, data: Vec<u8>) -> Result<(), JsValue> {
        let buffer = PixelBuffer::new(width, height, data)
            .map_err(|e| JsValue::from_str(&format!("Invalid pixel buffer: {e}")))?;
        self.workspace.load(buffer);
        Ok(())
    }

    /// Decodes an encoded image (PNG, JPEG, ...) and loads it.
    #[wasm_bindgen(js_name = loadImage)]
    pub fn load_image(&mut self, input: Vec<u8>) -> Result<(), JsValue> {
        let buffer = PixelBuffer::decode(&input).map_err(|e| JsValue::from_str(&format!("{e}")))?;
        self.workspace.load(buffer);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.workspace.reset();
    }

    #[wasm_bindgen(js_name = toggleEyedropper)]
    pub fn toggle_eyedropper(&mut self) -> bool {
        self.workspace.toggle_eyedropper()
    }

    #[wasm_bindgen(getter, js_name = eyedropperActive)]
    pub fn eyedropper_active(&self) -> bool {
        self.workspace.eyedropper_active()
    }

    /// Hex of the pixel under the cursor, or `undefined`.
    pub fn hover(&self, x: f64, y: f64, display_width: f64, display_height: f64) -> Option<String> {
        self.workspace
            .hover(x, y, Viewport::new(display_width, display_height))
            .map(|c| c.to_hex())
    }

    pub fn commit(&mut self, x: f64, y: f64, display_width: f64, display_height: f64) -> PickStatus {
        match self
            .workspace
            .commit(x, y, Viewport::new(display_width, display_height))
        {
            Some(AddOutcome::Added(_)) => PickStatus::Added,
            Some(AddOutcome::Duplicate) => PickStatus::Duplicate,
            None => PickStatus::Missed,
        }
    }

    /// Replaces the color list with up to `k` (default 5) dominant colors.
    #[wasm_bindgen(js_name = autoDetect)]
    pub fn auto_detect(&mut self, k: Option<u32>) -> usize {
        let config = config_for_k(*self.workspace.cluster_config(), k);
        self.workspace.auto_detect_with(&config)
    }

    #[wasm_bindgen(js_name = clearColors)]
    pub fn clear_colors(&mut self) {
        self.workspace.clear_colors();
    }

    /// Collected colors as plain objects, in insertion order.
    pub fn colors(&self) -> Result<Array, JsValue> {
        let out = Array::new();
        for entry in self.workspace.colors() {
            out.push(&entry_to_js(entry)?.into());
        }
        Ok(out)
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.workspace.colors().len()
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies a caller-supplied `k`, capped at the sample count since extra
/// centroids could never receive distinct pixels.
fn config_for_k(base: ClusterConfig, k: Option<u32>) -> ClusterConfig {
    match k {
        Some(k) => base.with_k((k as usize).min(base.sample_size)),
        None => base,
    }
}

fn entry_to_js(entry: &ColorEntry) -> Result<Object, JsValue> {
    let obj = Object::new();
    Reflect::set(&obj, &JsValue::from_str("hex"), &JsValue::from_str(&entry.hex))?;
    Reflect::set(&obj, &JsValue::from_str("rgb"), &JsValue::from_str(&entry.rgb))?;
    Reflect::set(&obj, &JsValue::from_str("hsl"), &JsValue::from_str(&entry.hsl_string))?;
    for (key, value) in [
        ("r", entry.r as f64),
        ("g", entry.g as f64),
        ("b", entry.b as f64),
        ("h", entry.hsl.h as f64),
        ("s", entry.hsl.s as f64),
        ("l", entry.hsl.l as f64),
    ] {
        Reflect::set(&obj, &JsValue::from_str(key), &JsValue::from_f64(value))?;
    }
    Ok(obj)
}
