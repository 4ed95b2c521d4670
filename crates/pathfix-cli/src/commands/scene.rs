//! Scene export command

use anyhow::{Context, Result};
use pathfix_core::{LogSink, PathfixConfig, PolicyKind};
use pathfix_io::{CsvPointSource, LoadOptions, PointSource};
use pathfix_render::{ObjSurface, PointerButton, SurfaceEvent, ViewSession};
use pathfix_solver::{OrientationPolicy, OrientationSolver, Segmenter};
use std::fs;
use std::path::Path;

/// Pixels of drag per degree of orbit (the controller turns 0.01 rad per pixel)
const PIXELS_PER_DEGREE: f64 = std::f64::consts::PI / 180.0 / 0.01;

pub struct SceneArgs {
    pub input: String,
    pub output: String,
    pub policy: Option<PolicyKind>,
    pub orbit: Option<[f64; 2]>,
    pub zoom: i32,
}

pub fn run(args: SceneArgs, mut config: PathfixConfig) -> Result<()> {
    let source = CsvPointSource::new(LoadOptions::from(&config.load)).with_sink(LogSink);
    let sequence = source
        .load(Path::new(&args.input))
        .with_context(|| format!("Failed to load points from {}", args.input))?;

    let mut session = ViewSession::new(config.scene.clone()).with_sink(LogSink);
    session.load(sequence);

    if let Some(policy) = args.policy {
        config.solver.policy = policy;
        let segments = Segmenter::new(config.solver.marker.clone()).split(session.sequence());
        let correction = OrientationSolver::new(OrientationPolicy::from_config(&config.solver))
            .compute(session.sequence(), &segments);
        session.apply_correction(&correction);
    }

    for event in camera_events(args.orbit, args.zoom) {
        session.handle_event(event);
    }

    let mut surface = ObjSurface::new();
    session.present(&mut surface);
    fs::write(&args.output, surface.text())
        .with_context(|| format!("Failed to write {}", args.output))?;

    let scene = session.scene();
    println!(
        "Wrote {} primitive(s), {} triangle(s) to {}",
        scene.primitive_count(),
        scene.triangle_count(),
        args.output
    );

    Ok(())
}

/// Express the requested camera moves as the pointer input a viewer would send
fn camera_events(orbit: Option<[f64; 2]>, zoom: i32) -> Vec<SurfaceEvent> {
    let mut events = Vec::new();

    if let Some([azimuth, polar]) = orbit {
        events.push(SurfaceEvent::PointerDown {
            button: PointerButton::Primary,
            x: 0.0,
            y: 0.0,
        });
        let (x, y) = (azimuth * PIXELS_PER_DEGREE, polar * PIXELS_PER_DEGREE);
        events.push(SurfaceEvent::PointerMove { x, y });
        events.push(SurfaceEvent::PointerUp {
            button: PointerButton::Primary,
            x,
            y,
        });
    }

    let step = zoom.signum() as f64;
    for _ in 0..zoom.unsigned_abs() {
        events.push(SurfaceEvent::Wheel { delta: step });
    }

    events
}
