use anyhow::{anyhow, bail};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow!(format!("{:?}", e))
}

/// Fetch an image and decode it into an `ImageBitmap`.
pub async fn fetch_image_bitmap(url: &str) -> anyhow::Result<web::ImageBitmap> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        bail!("GET {} -> HTTP {}", url, resp.status());
    }
    let blob: web::Blob = JsFuture::from(resp.blob().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    let bitmap = JsFuture::from(window.create_image_bitmap_with_blob(&blob).map_err(js_err)?)
        .await
        .map_err(js_err)?;
    bitmap.dyn_into::<web::ImageBitmap>().map_err(js_err)
}

/// Start loading the ground texture in the background. The decoded bitmap is
/// parked in `slot` for the frame loop to upload; failures only log.
pub fn spawn_ground_texture_load(url: &'static str, slot: Rc<RefCell<Option<web::ImageBitmap>>>) {
    spawn_local(async move {
        match fetch_image_bitmap(url).await {
            Ok(bitmap) => {
                log::info!(
                    "[texture] loaded {} ({}x{})",
                    url,
                    bitmap.width(),
                    bitmap.height()
                );
                *slot.borrow_mut() = Some(bitmap);
            }
            Err(e) => log::warn!("[texture] {} unavailable, using flat ground: {:?}", url, e),
        }
    });
}
