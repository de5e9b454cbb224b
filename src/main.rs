// src/main.rs
//
// Calculatrice Aurore — point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native + NativeOptions
//                                 ou `--expr "…"` (évaluation sans fenêtre)
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;
mod noyau;

use app::config::AppConfig;
use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice Aurore";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "calculatrice_aurore", version, about = "Calculatrice sandboxée (egui)")]
struct Cli {
    /// Évalue l’expression, affiche le résultat et quitte
    #[arg(short, long, value_name = "EXPRESSION")]
    expr: Option<String>,

    /// Fichier de configuration TOML
    #[arg(short, long, value_name = "FICHIER")]
    config: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn installer_journal() {
    use tracing_subscriber::EnvFilter;

    let filtre = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("calculatrice_aurore=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_writer(std::io::stderr)
        .init();
}

/// Mode sans fenêtre : code de sortie 0 (résultat sur stdout) ou 1 (erreur sur stderr).
#[cfg(not(target_arch = "wasm32"))]
fn evaluer_une_fois(expr: &str, config: &AppConfig) -> i32 {
    let resultat = if config.politique == noyau::Politique::default() {
        noyau::evaluate(expr)
    } else {
        noyau::evaluate_avec(expr, &config.politique)
    };
    match resultat {
        Ok(v) => {
            println!("{}", noyau::format_resultat(v, config.affichage.decimales));
            0
        }
        Err(e) => {
            eprintln!("Erreur : {e}");
            if matches!(
                e,
                noyau::EvalError::UnknownIdentifier(_) | noyau::EvalError::FunctionNotAllowed(_)
            ) {
                let noms: Vec<_> = noyau::registre::noms().collect();
                eprintln!("Noms disponibles : {}", noms.join(", "));
            }
            1
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use clap::Parser;

    installer_journal();
    let cli = Cli::parse();
    let config = AppConfig::charger(cli.config.as_deref());

    if let Some(expr) = cli.expr {
        std::process::exit(evaluer_une_fois(&expr, &config));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([440.0, 660.0])
            .with_min_inner_size([420.0, 620.0]),
        ..Default::default()
    };

    tracing::info!("ouverture de la fenêtre");
    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |cc| {
            let app = AppCalc::avec_config(&config);
            // Contexte egui prêt => thème avant la première frame.
            app.appliquer_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}


/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, AppConfig, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// Pas de fichier de configuration côté web : défauts.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let canvas: HtmlCanvasElement = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| {
                    let app = AppCalc::avec_config(&AppConfig::default());
                    app.appliquer_theme(&cc.egui_ctx);
                    Ok(Box::new(app))
                }),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
