// src/main.rs
//
// Binaire de la calculatrice RPN : fenêtre egui sur le noyau de la lib.
// Natif : traces filtrées par CALC_RPN_LOG, puis run_native.
// wasm32 : WebRunner sur le canvas "the_canvas_id".

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

const TITRE_APP: &str = "Calculatrice RPN";

/// Filtre des traces, syntaxe EnvFilter (ex: "calculatrice_rpn=trace").
#[cfg(not(target_arch = "wasm32"))]
const VAR_LOG: &str = "CALC_RPN_LOG";

#[cfg(not(target_arch = "wasm32"))]
fn init_traces() {
    use tracing_subscriber::EnvFilter;

    let filtre = EnvFilter::try_from_env(VAR_LOG).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_target(false)
        .try_init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    init_traces();
    tracing::info!("démarrage de {TITRE_APP}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([520.0, 640.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppCalc>::default())),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // démarrage par `web::start`
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    const CANVAS_ID: &str = "the_canvas_id";

    /// Lancée au chargement de la page : titre de l’onglet, puis l’app sur le canvas.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
