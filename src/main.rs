use std::path::PathBuf;
use std::process::ExitCode;

use geogrow::config::Params;
use geogrow::error::GrowResult;
use geogrow::metric::Metric;
use geogrow::{io, render, scene};

/// `geogrow [input.json|demo] [metric] [out_dir]`
fn run() -> GrowResult<()> {
    let args: Vec<String> = std::env::args().collect();

    let source = args.get(1).map(String::as_str).unwrap_or("demo");
    let metric: Metric = match args.get(2) {
        Some(s) => s.parse()?,
        None => Metric::default(),
    };
    let out_dir: PathBuf = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    std::fs::create_dir_all(&out_dir)?;

    let input = if source == "demo" {
        log::info!("no input file, generating 256x256 demo scene");
        scene::random_scene(&[256, 256], 12, 0.25, 42)?
    } else {
        io::load_grid(&PathBuf::from(source))?
    };

    let params = Params::with_metric(metric);
    let (regions, timings) = geogrow::grow(&input, &params)?;

    eprintln!("\nTimings:");
    for t in &timings {
        eprintln!("  {:20} {:8.1} ms", t.name, t.ms);
    }
    eprintln!(
        "path={:?} rounds={} converged={}",
        regions.path, regions.rounds, regions.converged
    );
    for w in &regions.warnings {
        eprintln!("warning: {}", w);
    }

    io::save_grid(&out_dir.join("labels.json"), &regions.labels)?;
    io::save_grid(&out_dir.join("distance.json"), &regions.distance)?;

    // PNGs show the middle depth slice of 3D inputs
    let shape = regions.labels.shape;
    let (w, h, z) = (shape.cols(), shape.rows(), shape.depth() / 2);
    let save = |name: &str, rgba: Vec<u8>| -> GrowResult<()> {
        let path = out_dir.join(name);
        render::save_png(&path, &rgba, w, h)?;
        eprintln!("Saved {}", path.display());
        Ok(())
    };
    save("labels.png", render::render_labels(&regions.labels, z)?)?;
    save("distance.png", render::render_distance(&regions.distance, z)?)?;

    eprintln!("\nDone.");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
