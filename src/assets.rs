//! Fetches the font metadata and icon sheet the reveal waits on.

use crate::constants::{FONT_URL, ICON_SHEET_URL};
use crate::{dom, overlay};
use splash_core::{Asset, SplashEngine};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Decoded assets shared with the render backend.
#[derive(Default)]
pub struct LoadedAssets {
    pub font_family: Option<String>,
    pub icon_sheet: Option<web::ImageBitmap>,
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

async fn fetch_ok(url: &str) -> anyhow::Result<web::Response> {
    let win = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp: web::Response = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} {}", resp.status(), resp.status_text());
    }
    Ok(resp)
}

async fn fetch_font_family(url: &str) -> anyhow::Result<Option<String>> {
    let resp = fetch_ok(url).await?;
    let json = JsFuture::from(resp.json().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok(js_sys::Reflect::get(&json, &JsValue::from_str("familyName"))
        .ok()
        .and_then(|v| v.as_string()))
}

async fn fetch_image(url: &str) -> anyhow::Result<web::ImageBitmap> {
    let resp = fetch_ok(url).await?;
    let blob: web::Blob = JsFuture::from(resp.blob().map_err(js_err)?)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)?;
    let win = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let promise = win.create_image_bitmap_with_blob(&blob).map_err(js_err)?;
    JsFuture::from(promise)
        .await
        .map_err(js_err)?
        .dyn_into()
        .map_err(js_err)
}

fn fail(engine: &Rc<RefCell<SplashEngine>>, asset: Asset, e: anyhow::Error) {
    let err = engine.borrow_mut().asset_failed(asset, format!("{e:#}"));
    if let Some(doc) = dom::window_document() {
        overlay::show_error(&doc, &err.to_string());
    }
}

/// Load both assets and resolve the engine's gate for each.
pub async fn load_all(engine: Rc<RefCell<SplashEngine>>, loaded: Rc<RefCell<LoadedAssets>>) {
    match fetch_font_family(FONT_URL).await {
        Ok(family) => {
            loaded.borrow_mut().font_family = family;
            engine.borrow_mut().asset_ready(Asset::Font);
        }
        Err(e) => fail(&engine, Asset::Font, e),
    }
    match fetch_image(ICON_SHEET_URL).await {
        Ok(bitmap) => {
            log::info!("[assets] icon sheet {}x{}", bitmap.width(), bitmap.height());
            loaded.borrow_mut().icon_sheet = Some(bitmap);
            engine.borrow_mut().asset_ready(Asset::IconImage);
        }
        Err(e) => fail(&engine, Asset::IconImage, e),
    }
}
