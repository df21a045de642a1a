#![cfg(target_arch = "wasm32")]
use instant::Instant;
use splash_core::{SplashEngine, SplashParams};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("splash-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let params = SplashParams {
        seed: rand::random(),
        ..SplashParams::default()
    };
    log::info!("[engine] seed {}", params.seed);
    let engine = Rc::new(RefCell::new(SplashEngine::new(params)));

    events::pointer::wire_input_handlers(events::pointer::InputWiring {
        canvas: canvas.clone(),
        engine: engine.clone(),
    });

    let loaded = Rc::new(RefCell::new(assets::LoadedAssets::default()));
    spawn_local(assets::load_all(engine.clone(), loaded.clone()));

    let backend = render::CanvasBackend::new(document.clone(), canvas, loaded)?;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        engine,
        backend,
        document,
        started: Instant::now(),
        last_overlay: None,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
