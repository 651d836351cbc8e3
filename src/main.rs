use anyhow::{Context, Result};
use chrono::Utc;
use futures::StreamExt;
use serde::Deserialize;

use vertex_estimator::ar::{self, scanner, ArSession, ReplayFrame, ReplaySession, SharedSession};
use vertex_estimator::config::Settings;
use vertex_estimator::domain::scan::{ArPlane, ArScanData, LightingCondition, PlaneType};
use vertex_estimator::domain::{
    ColorInfo, CoverageInfo, Paint, PaintFinish, PaintType, Room, RoomDimensions, Surface,
    SurfaceCondition, SurfaceDimensions, SurfaceMaterial, SurfaceTexture, SurfaceType,
};
use vertex_estimator::{logging, PaintCalculator};

/// Request file accepted on the command line.
#[derive(Debug, Deserialize)]
struct EstimateRequest {
    room: Room,
    paint: Paint,
    #[serde(default = "default_include_waste")]
    include_waste_factor: bool,
}

fn default_include_waste() -> bool {
    true
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;

    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        waste_factor = settings.estimator.waste_factor,
        "Starting Vertex estimator"
    );

    let request = match std::env::args().nth(1).as_deref() {
        Some("--scan") => scanned_request(&settings).await?,
        Some(path) => load_request(path)?,
        None => sample_request()?,
    };

    let calculator = PaintCalculator::new(settings.estimator);
    let estimate = calculator
        .calculate_paint_estimate(&request.room, &request.paint, request.include_waste_factor)
        .context("Failed to calculate paint estimate")?;

    tracing::info!(
        total_paint_gallons = estimate.total_estimate.total_paint_gallons,
        total_cost = estimate.total_estimate.total_cost,
        "Estimate ready"
    );

    println!("{}", serde_json::to_string_pretty(&estimate)?);

    Ok(())
}

fn load_request(path: &str) -> Result<EstimateRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read estimate request {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid estimate request {}", path))
}

fn white_latex() -> Result<Paint> {
    Ok(Paint {
        id: "paint_1".to_string(),
        brand: "Premium Paint Co".to_string(),
        name: "Classic White".to_string(),
        color: ColorInfo::from_hex("#FFFFFF")?,
        paint_type: PaintType::Latex,
        finish: PaintFinish::Eggshell,
        coverage: CoverageInfo::default(),
        price_per_gallon: 45.0,
    })
}

/// One smooth drywall wall in a 4 x 3 x 2.7 m living room.
fn sample_request() -> Result<EstimateRequest> {
    let wall = Surface {
        id: "wall_1".to_string(),
        surface_type: SurfaceType::Wall,
        dimensions: SurfaceDimensions::new(4.0, 2.7),
        texture: SurfaceTexture::Smooth,
        current_color: None,
        condition: SurfaceCondition::Good,
        material: SurfaceMaterial::Drywall,
    };
    let room = Room {
        id: "test_room".to_string(),
        name: "Living Room".to_string(),
        dimensions: RoomDimensions::new(4.0, 3.0, 2.7),
        surfaces: vec![wall],
        openings: Vec::new(),
        created_at: Utc::now(),
    };

    Ok(EstimateRequest {
        room,
        paint: white_latex()?,
        include_waste_factor: true,
    })
}

/// Scan a scripted living room and pair it with a stock white paint.
async fn scanned_request(settings: &Settings) -> Result<EstimateRequest> {
    let lighting = LightingCondition {
        ambient_intensity: 800.0,
        color_temperature: 5000.0,
        is_adequate_for_color_matching: true,
    };
    let walls = [
        ArPlane::new("north", PlaneType::Vertical, 4.0, 2.7),
        ArPlane::new("east", PlaneType::Vertical, 3.0, 2.7),
        ArPlane::new("south", PlaneType::Vertical, 4.0, 2.7),
        ArPlane::new("west", PlaneType::Vertical, 3.0, 2.7),
    ];
    let floor = ArPlane::new("floor", PlaneType::HorizontalUp, 4.0, 3.0);
    let ceiling = ArPlane::new("ceiling", PlaneType::HorizontalDown, 4.0, 3.0);

    let mut full = walls.to_vec();
    full.extend([floor, ceiling]);

    let session = SharedSession::new(ReplaySession::new([
        ReplayFrame::lost(),
        ReplayFrame::tracking(walls[..2].to_vec()).with_lighting(lighting),
        ReplayFrame::tracking(full).with_lighting(lighting),
    ]));

    let (mut stream, handle) = ar::scan_room(&session, settings.scan_interval)?;
    let mut confidence = 0.0;
    while let Some(result) = stream.next().await {
        tracing::info!(
            progress = result.scan_progress,
            planes = result.detected_planes.len(),
            tip = scanner::scanning_tip(result.scan_progress, result.detected_planes.len()),
            "Scan update"
        );
        confidence = result.scan_progress;
        if scanner::should_auto_complete(result.scan_progress) {
            break;
        }
    }
    handle.cancel();
    drop(stream);

    let planes = session.lock().planes();
    session.lock().close();

    let scan_data = ArScanData {
        room_dimensions: scanner::estimate_room_dimensions(&planes),
        planes,
        confidence,
    };

    Ok(EstimateRequest {
        room: ar::generate_room(&scan_data),
        paint: white_latex()?,
        include_waste_factor: true,
    })
}
