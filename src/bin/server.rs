use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use base64::Engine;
use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use geogrow::GrowPath;
use geogrow::config::Params;
use geogrow::error::{GrowError, GrowResult, GrowWarning};
use geogrow::io::GridDoc;
use geogrow::metric::Metric;
use geogrow::render;

#[derive(Deserialize)]
struct GrowRequest {
    #[serde(flatten)]
    grid: GridDoc,
    metric: Option<Metric>,
    max_rounds: Option<usize>,
    // depth slice rendered for 3D grids
    slice: Option<usize>,
}

#[derive(Serialize)]
struct GrowResponse {
    labels: GridDoc,
    distance: GridDoc,
    rounds: usize,
    converged: bool,
    path: GrowPath,
    warnings: Vec<GrowWarning>,
    layers: Vec<Layer>,
    timings: Vec<TimingEntry>,
}

#[derive(Serialize)]
struct Layer {
    name: String,
    data_url: String,
}

#[derive(Serialize)]
struct TimingEntry {
    name: String,
    ms: f64,
}

fn encode_png(rgba: &[u8], w: usize, h: usize) -> GrowResult<String> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new(&mut buf);
    encoder.write_image(rgba, w as u32, h as u32, image::ExtendedColorType::Rgba8)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&buf);
    Ok(format!("data:image/png;base64,{}", b64))
}

fn grow_blocking(req: GrowRequest) -> GrowResult<GrowResponse> {
    let input = req.grid.into_grid()?;
    let defaults = Params::default();
    let params = Params {
        metric: req.metric.unwrap_or(defaults.metric),
        max_rounds: req.max_rounds.or(defaults.max_rounds),
        ..defaults
    };
    let (regions, timings) = geogrow::grow(&input, &params)?;

    let shape = regions.labels.shape;
    let (w, h) = (shape.cols(), shape.rows());
    let z = req.slice.unwrap_or(shape.depth() / 2);
    let layers = vec![
        Layer {
            name: "labels".into(),
            data_url: encode_png(&render::render_labels(&regions.labels, z)?, w, h)?,
        },
        Layer {
            name: "distance".into(),
            data_url: encode_png(&render::render_distance(&regions.distance, z)?, w, h)?,
        },
    ];

    let timing_entries = timings
        .iter()
        .map(|t| TimingEntry {
            name: t.name.to_string(),
            ms: t.ms,
        })
        .collect();

    Ok(GrowResponse {
        labels: GridDoc::from_grid(&regions.labels),
        distance: GridDoc::from_grid(&regions.distance),
        rounds: regions.rounds,
        converged: regions.converged,
        path: regions.path,
        warnings: regions.warnings,
        layers,
        timings: timing_entries,
    })
}

async fn grow_handler(
    Json(req): Json<GrowRequest>,
) -> Result<Json<GrowResponse>, (StatusCode, String)> {
    let result = tokio::task::spawn_blocking(move || grow_blocking(req))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match result {
        Ok(response) => Ok(Json(response)),
        Err(e @ (GrowError::Io(_) | GrowError::Image(_))) => {
            log::error!("grow request failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
        Err(e) => {
            log::warn!("rejected grow request: {}", e);
            Err((StatusCode::BAD_REQUEST, e.to_string()))
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = Router::new()
        .route("/api/grow", post(grow_handler))
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    log::info!("geogrow server at http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("failed to bind {}: {}", addr, e);
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app).await {
        log::error!("server error: {}", e);
    }
}
