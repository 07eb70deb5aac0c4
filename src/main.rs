#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

// When compiling natively:
#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = load_config();
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "eframe ink",
        native_options,
        Box::new(|cc| Ok(Box::new(eframe_ink::InkApp::new(cc, config)))),
    )
}

/// Read the capture config named by `EFRAME_INK_CONFIG`, if any
#[cfg(not(target_arch = "wasm32"))]
fn load_config() -> Option<eframe_ink::CaptureConfig> {
    let path = std::env::var_os("EFRAME_INK_CONFIG")?;
    match eframe_ink::CaptureConfig::load(&path) {
        Ok(config) => {
            log::info!("Loaded capture config from {}", path.to_string_lossy());
            Some(config)
        }
        Err(err) => {
            log::warn!("Ignoring capture config {}: {}", path.to_string_lossy(), err);
            None
        }
    }
}

// When compiling to web using trunk:
#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Failed to find the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(eframe_ink::InkApp::new(cc, None)))),
            )
            .await;

        if let Err(e) = start_result {
            panic!("Failed to start eframe: {e:?}");
        }
    });
}
