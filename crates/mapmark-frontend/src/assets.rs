//! Background image loading
//!
//! Each request returns a slot that is filled exactly once with the decoded
//! image or the error. The frame driver polls the slot; nothing blocks the UI
//! thread.

use std::sync::Arc;

use parking_lot::Mutex;

use mapmark_core::{AssetError, ImageData};

/// Result of one image request, `None` while still loading
pub type AssetSlot = Arc<Mutex<Option<Result<ImageData, AssetError>>>>;

/// Create an empty slot
pub fn create_slot() -> AssetSlot {
    Arc::new(Mutex::new(None))
}

/// Take the finished result out of a slot, if any.
pub fn take_ready(slot: &AssetSlot) -> Option<Result<ImageData, AssetError>> {
    slot.lock().take()
}

/// Read and decode `<resources_dir>/<name>` on a background thread.
#[cfg(not(target_arch = "wasm32"))]
pub fn request_image(resources_dir: &str, name: &str) -> AssetSlot {
    let slot = create_slot();
    let path = std::path::Path::new(resources_dir).join(name);
    let out = slot.clone();

    tracing::debug!("Loading {}", path.display());
    std::thread::spawn(move || {
        let result = ImageData::load(&path);
        match &result {
            Ok(image) => tracing::info!(
                width = image.width,
                height = image.height,
                "Decoded {}",
                path.display()
            ),
            Err(e) => tracing::warn!("Failed to load {}: {}", path.display(), e),
        }
        *out.lock() = Some(result);
    });

    slot
}

/// Fetch and decode `./<resources_dir>/<name>` relative to the page.
#[cfg(target_arch = "wasm32")]
pub fn request_image(resources_dir: &str, name: &str) -> AssetSlot {
    let slot = create_slot();
    let url = resource_url(resources_dir, name);
    let out = slot.clone();

    tracing::debug!("Fetching {}", url);
    wasm_bindgen_futures::spawn_local(async move {
        let result = match fetch_bytes(&url).await {
            Ok(bytes) => ImageData::decode(&bytes),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            tracing::warn!("Failed to load {}: {}", url, e);
        }
        *out.lock() = Some(result);
    });

    slot
}

/// Relative URL of a resource file
pub fn resource_url(resources_dir: &str, name: &str) -> String {
    let dir = resources_dir.trim_start_matches("./").trim_end_matches('/');
    if dir.is_empty() {
        format!("./{}", name)
    } else {
        format!("./{}/{}", dir, name)
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_bytes(url: &str) -> Result<Vec<u8>, AssetError> {
    use eframe::wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let fetch_error = |e: eframe::wasm_bindgen::JsValue| AssetError::Fetch(format!("{}: {:?}", url, e));

    let window = web_sys::window().ok_or_else(|| AssetError::Fetch("No window".to_string()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(fetch_error)?;
    let response: web_sys::Response = response.dyn_into().map_err(fetch_error)?;

    if !response.ok() {
        return Err(AssetError::Fetch(format!(
            "{}: HTTP {}",
            url,
            response.status()
        )));
    }

    let buffer = JsFuture::from(response.array_buffer().map_err(fetch_error)?)
        .await
        .map_err(fetch_error)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_url() {
        assert_eq!(resource_url("resources", "map.png"), "./resources/map.png");
        assert_eq!(resource_url("./resources/", "map.png"), "./resources/map.png");
        assert_eq!(resource_url("", "marker.png"), "./marker.png");
    }

    #[test]
    fn test_take_ready_empties_slot() {
        let slot = create_slot();
        assert!(take_ready(&slot).is_none());
        *slot.lock() = Some(Err(AssetError::EmptyImage));
        assert_eq!(take_ready(&slot), Some(Err(AssetError::EmptyImage)));
        assert!(take_ready(&slot).is_none());
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn wait(slot: &AssetSlot) -> Result<ImageData, AssetError> {
        for _ in 0..500 {
            if let Some(result) = take_ready(slot) {
                return result;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        panic!("asset request never completed");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let slot = request_image(dir.path().to_str().unwrap(), "map.png");
        assert!(matches!(wait(&slot), Err(AssetError::Io(_))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_garbage_file_reports_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.png"), b"not an image").unwrap();
        let slot = request_image(dir.path().to_str().unwrap(), "marker.png");
        assert!(matches!(wait(&slot), Err(AssetError::Decode(_))));
    }
}
