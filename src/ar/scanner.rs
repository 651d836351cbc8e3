//! Scan snapshots, the cancellable scan stream, and room generation.

use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::scan::{
    ArPlane, ArScanData, DetectedPlane, PlaneType, ScanResult, ScanWarning, ScanWarningType,
    TrackingState,
};
use crate::domain::{
    Room, RoomDimensions, Surface, SurfaceCondition, SurfaceDimensions, SurfaceMaterial,
    SurfaceTexture, SurfaceType,
};
use crate::error::{EstimateError, EstimateResult};

use super::session::{ArSession, SharedSession};

/// Walls needed before wall coverage counts as complete.
const EXPECTED_WALLS: f32 = 4.0;
const WALL_WEIGHT: f32 = 0.7;
const FLOOR_WEIGHT: f32 = 0.3;

/// Progress above which the user may finish the scan.
const FINISH_THRESHOLD: f32 = 0.7;
/// Progress at which the scan completes on its own.
const AUTO_COMPLETE_THRESHOLD: f32 = 0.95;

/// Fallbacks when no plane of a kind has been seen yet.
const DEFAULT_WIDTH: f64 = 3.0;
const DEFAULT_LENGTH: f64 = 4.0;
const DEFAULT_HEIGHT: f64 = 2.5;

pub type ScanStream = BoxStream<'static, ScanResult>;

/// Stops a running scan. Dropping the handle stops it too.
#[derive(Debug)]
pub struct ScanHandle {
    cancel: watch::Sender<bool>,
}

impl ScanHandle {
    pub fn cancel(&self) {
        // No receiver means the stream is already gone
        let _ = self.cancel.send(true);
    }
}

/// Resume `session` and poll it every `interval`.
///
/// The first snapshot is taken immediately. The stream ends once the
/// handle is cancelled or dropped, once the session reports it is closed,
/// or once a newer `scan_room` call takes over the session. The session is
/// paused when the stream ends or is dropped, unless a newer scan owns it.
#[instrument(skip(session))]
pub fn scan_room<S>(
    session: &SharedSession<S>,
    interval: Duration,
) -> EstimateResult<(ScanStream, ScanHandle)>
where
    S: ArSession + 'static,
{
    let epoch = {
        let mut slot = session.lock_slot();
        slot.session.resume()?;
        slot.epoch += 1;
        slot.epoch
    };
    info!(epoch, "Scan started");

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let state = ScanLoop {
        session: session.clone(),
        epoch,
        cancel: cancel_rx,
        interval,
        started: false,
    };

    let stream = stream::unfold(state, |mut state| async move {
        loop {
            if *state.cancel.borrow() {
                return None;
            }

            if state.started {
                tokio::select! {
                    biased;
                    // Ok on cancel, Err once the handle is dropped; both end the scan
                    _ = state.cancel.changed() => return None,
                    _ = tokio::time::sleep(state.interval) => {}
                }
            }
            state.started = true;

            match state.poll_once() {
                Step::Emit(result) => return Some((result, state)),
                Step::Skip => continue,
                Step::Stop => return None,
            }
        }
    });

    Ok((stream.boxed(), ScanHandle { cancel: cancel_tx }))
}

enum Step {
    Emit(ScanResult),
    Skip,
    Stop,
}

struct ScanLoop<S: ArSession> {
    session: SharedSession<S>,
    epoch: u64,
    cancel: watch::Receiver<bool>,
    interval: Duration,
    started: bool,
}

impl<S: ArSession> ScanLoop<S> {
    fn poll_once(&self) -> Step {
        let mut slot = self.session.lock_slot();
        if slot.epoch != self.epoch {
            debug!(epoch = self.epoch, "Scan superseded by a newer scan");
            return Step::Stop;
        }

        match slot.session.update() {
            Ok(()) => Step::Emit(snapshot(&slot.session)),
            Err(EstimateError::SessionClosed) => {
                warn!(epoch = self.epoch, "AR session closed, ending scan");
                Step::Stop
            }
            Err(e) => {
                warn!(error = %e, "Scan update failed, skipping frame");
                Step::Skip
            }
        }
    }
}

impl<S: ArSession> Drop for ScanLoop<S> {
    fn drop(&mut self) {
        let mut slot = self.session.lock_slot();
        if slot.epoch == self.epoch {
            slot.session.pause();
            debug!(epoch = self.epoch, "Scan stopped, session paused");
        }
    }
}

/// Snapshot of the session's current frame.
pub fn snapshot<S: ArSession + ?Sized>(session: &S) -> ScanResult {
    if !session.is_tracking() {
        return ScanResult {
            tracking_state: TrackingState::NotAvailable,
            warnings: vec![ScanWarning {
                warning_type: ScanWarningType::TrackingLost,
                message: "Tracking lost. Move slowly and ensure good lighting.".to_string(),
            }],
            ..ScanResult::default()
        };
    }

    let planes = session.detected_planes();
    let progress = scan_progress(&planes);
    let lighting_condition = session.light_estimate();

    let mut warnings = Vec::new();
    if matches!(lighting_condition, Some(l) if !l.is_adequate_for_color_matching) {
        warnings.push(ScanWarning {
            warning_type: ScanWarningType::InsufficientLight,
            message: "Lighting is too dim for reliable color matching.".to_string(),
        });
    }

    ScanResult {
        scan_progress: progress,
        room_area: room_floor_area(&planes) as f32,
        detected_planes: planes,
        lighting_condition,
        tracking_state: TrackingState::Normal,
        scan_quality: if progress > 0.5 { 0.8 } else { 0.5 },
        warnings,
    }
}

/// Wall coverage (up to four walls) weighs 0.7, seeing any floor 0.3.
pub fn scan_progress(planes: &[DetectedPlane]) -> f32 {
    let walls = planes
        .iter()
        .filter(|p| p.plane_type == PlaneType::Vertical)
        .count();
    let has_floor = planes.iter().any(|p| p.plane_type == PlaneType::HorizontalUp);

    let wall_progress = (walls as f32 / EXPECTED_WALLS).min(1.0) * WALL_WEIGHT;
    let floor_progress = if has_floor { FLOOR_WEIGHT } else { 0.0 };

    (wall_progress + floor_progress).min(1.0)
}

/// Summed floor plane area, square meters.
pub fn room_floor_area(planes: &[DetectedPlane]) -> f64 {
    planes
        .iter()
        .filter(|p| p.plane_type == PlaneType::HorizontalUp)
        .map(|p| f64::from(p.area))
        .sum()
}

pub fn can_finish(progress: f32) -> bool {
    progress > FINISH_THRESHOLD
}

pub fn should_auto_complete(progress: f32) -> bool {
    progress >= AUTO_COMPLETE_THRESHOLD
}

pub fn scanning_tip(progress: f32, detected_surfaces: usize) -> &'static str {
    if progress < 0.2 {
        "Point your device at the walls to start detecting surfaces"
    } else if progress < 0.4 && detected_surfaces < 2 {
        "Try to scan more walls - rotate slowly"
    } else if progress < 0.6 {
        "Good! Keep scanning to detect all surfaces"
    } else if progress < 0.8 {
        "Almost there! Make sure to scan the ceiling if needed"
    } else {
        "Excellent! You can finish scanning now"
    }
}

/// Rough room envelope from the largest wall and floor planes.
pub fn estimate_room_dimensions(planes: &[ArPlane]) -> RoomDimensions {
    RoomDimensions {
        width: max_extent(planes, PlaneType::Vertical, |p| p.width).unwrap_or(DEFAULT_WIDTH),
        length: max_extent(planes, PlaneType::HorizontalUp, |p| p.width).unwrap_or(DEFAULT_LENGTH),
        height: max_extent(planes, PlaneType::Vertical, |p| p.height).unwrap_or(DEFAULT_HEIGHT),
    }
}

fn max_extent(
    planes: &[ArPlane],
    plane_type: PlaneType,
    extent: impl Fn(&ArPlane) -> f32,
) -> Option<f64> {
    planes
        .iter()
        .filter(|p| p.plane_type == plane_type)
        .map(|p| f64::from(extent(p)))
        .reduce(f64::max)
}

/// Turn scanned planes into a paintable room.
///
/// Walls and ceilings become surfaces with default finish attributes;
/// floors are not painted and are skipped. Openings are not detected.
pub fn generate_room(scan_data: &ArScanData) -> Room {
    let surface_type = |plane_type: PlaneType| match plane_type {
        PlaneType::Vertical => Some(SurfaceType::Wall),
        PlaneType::HorizontalDown => Some(SurfaceType::Ceiling),
        PlaneType::HorizontalUp => None,
    };

    let mut walls = Vec::new();
    let mut ceilings = Vec::new();
    for plane in &scan_data.planes {
        let Some(kind) = surface_type(plane.plane_type) else {
            continue;
        };
        let surface = Surface {
            id: format!("surface_{}", plane.id),
            surface_type: kind,
            dimensions: SurfaceDimensions::new(f64::from(plane.width), f64::from(plane.height)),
            texture: SurfaceTexture::Smooth,
            current_color: None,
            condition: SurfaceCondition::Good,
            material: SurfaceMaterial::Drywall,
        };
        match kind {
            SurfaceType::Ceiling => ceilings.push(surface),
            _ => walls.push(surface),
        }
    }

    let room = Room {
        id: format!("ar_room_{}", Uuid::new_v4().simple()),
        name: "AR Scanned Room".to_string(),
        dimensions: scan_data.room_dimensions,
        surfaces: walls.into_iter().chain(ceilings).collect(),
        openings: Vec::new(),
        created_at: Utc::now(),
    };

    info!(
        room_id = %room.id,
        surfaces = room.surfaces.len(),
        confidence = scan_data.confidence,
        "Room generated from scan"
    );

    room
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ar::replay::{ReplayFrame, ReplaySession};
    use crate::domain::scan::LightingCondition;

    fn plane(id: &str, plane_type: PlaneType, width: f32, height: f32) -> ArPlane {
        ArPlane::new(id, plane_type, width, height)
    }

    fn detected(planes: &[ArPlane]) -> Vec<DetectedPlane> {
        planes.iter().map(DetectedPlane::from).collect()
    }

    #[test]
    fn progress_weights_walls_and_floor() {
        assert_eq!(scan_progress(&[]), 0.0);

        let two_walls = detected(&[
            plane("a", PlaneType::Vertical, 3.0, 2.5),
            plane("b", PlaneType::Vertical, 4.0, 2.5),
        ]);
        assert!((scan_progress(&two_walls) - 0.35).abs() < 1e-6);

        let mut full = detected(&[
            plane("a", PlaneType::Vertical, 3.0, 2.5),
            plane("b", PlaneType::Vertical, 4.0, 2.5),
            plane("c", PlaneType::Vertical, 3.0, 2.5),
            plane("d", PlaneType::Vertical, 4.0, 2.5),
            plane("e", PlaneType::Vertical, 1.0, 2.5),
            plane("f", PlaneType::HorizontalUp, 4.0, 3.0),
        ]);
        assert!((scan_progress(&full) - 1.0).abs() < 1e-6);
        assert!((room_floor_area(&full) - 12.0).abs() < 1e-6);

        full.push(DetectedPlane::from(&plane("g", PlaneType::HorizontalUp, 1.0, 1.0)));
        assert!((room_floor_area(&full) - 13.0).abs() < 1e-6);
    }

    #[test]
    fn finish_thresholds_and_tips() {
        assert!(!can_finish(0.7));
        assert!(can_finish(0.71));
        assert!(!should_auto_complete(0.94));
        assert!(should_auto_complete(0.95));

        assert!(scanning_tip(0.1, 0).starts_with("Point"));
        assert!(scanning_tip(0.3, 1).starts_with("Try"));
        assert!(scanning_tip(0.3, 3).starts_with("Good"));
        assert!(scanning_tip(0.7, 5).starts_with("Almost"));
        assert!(scanning_tip(0.9, 5).starts_with("Excellent"));
    }

    #[test]
    fn dimensions_fall_back_to_defaults() {
        let dims = estimate_room_dimensions(&[]);
        assert_eq!(dims, RoomDimensions::new(4.0, 3.0, 2.5));

        let dims = estimate_room_dimensions(&[
            plane("a", PlaneType::Vertical, 3.5, 2.4),
            plane("b", PlaneType::Vertical, 5.0, 2.6),
            plane("f", PlaneType::HorizontalUp, 6.0, 4.0),
        ]);
        assert_eq!(dims.width, 5.0);
        assert_eq!(dims.length, 6.0);
        assert!((dims.height - 2.6).abs() < 1e-6);
    }

    #[test]
    fn room_from_scan_skips_floors() {
        let scan = ArScanData {
            planes: vec![
                plane("c1", PlaneType::HorizontalDown, 4.0, 3.0),
                plane("w1", PlaneType::Vertical, 4.0, 2.5),
                plane("f1", PlaneType::HorizontalUp, 4.0, 3.0),
                plane("w2", PlaneType::Vertical, 3.0, 2.5),
            ],
            room_dimensions: RoomDimensions::new(4.0, 3.0, 2.5),
            confidence: 0.8,
        };
        let room = generate_room(&scan);

        assert!(room.id.starts_with("ar_room_"));
        assert_eq!(room.name, "AR Scanned Room");
        let ids: Vec<_> = room.surfaces.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["surface_w1", "surface_w2", "surface_c1"]);
        assert_eq!(room.surfaces[2].surface_type, SurfaceType::Ceiling);
        assert!(room.surfaces.iter().all(|s| s.condition == SurfaceCondition::Good));
        assert!(room.openings.is_empty());
        assert!((room.total_wall_area() - 17.5).abs() < 1e-9);
    }

    #[test]
    fn snapshot_reports_lost_tracking() {
        let mut session = ReplaySession::new([ReplayFrame::lost()]);
        session.resume().unwrap();
        session.update().unwrap();

        let result = snapshot(&session);
        assert_eq!(result.tracking_state, TrackingState::NotAvailable);
        assert_eq!(result.scan_progress, 0.0);
        assert_eq!(result.warnings[0].warning_type, ScanWarningType::TrackingLost);
    }

    #[test]
    fn snapshot_flags_dim_lighting() {
        let frame = ReplayFrame::tracking(vec![plane("a", PlaneType::Vertical, 3.0, 2.5)])
            .with_lighting(LightingCondition {
                ambient_intensity: 0.1,
                color_temperature: 6500.0,
                is_adequate_for_color_matching: false,
            });
        let mut session = ReplaySession::new([frame]);
        session.resume().unwrap();
        session.update().unwrap();

        let result = snapshot(&session);
        assert_eq!(result.tracking_state, TrackingState::Normal);
        assert_eq!(result.scan_quality, 0.5);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].warning_type, ScanWarningType::InsufficientLight);
    }

    fn shared(frames: Vec<ReplayFrame>) -> SharedSession<ReplaySession> {
        SharedSession::new(ReplaySession::new(frames))
    }

    fn floor_only() -> SharedSession<ReplaySession> {
        shared(vec![ReplayFrame::tracking(vec![plane(
            "f",
            PlaneType::HorizontalUp,
            4.0,
            3.0,
        )])])
    }

    #[tokio::test(start_paused = true)]
    async fn stream_emits_until_cancelled_then_pauses() {
        let walls: Vec<_> = (0..4)
            .map(|i| plane(&format!("w{i}"), PlaneType::Vertical, 3.0, 2.5))
            .collect();
        let session = shared(vec![
            ReplayFrame::lost(),
            ReplayFrame::tracking(walls[..2].to_vec()),
            ReplayFrame::tracking(walls.clone()),
        ]);

        let (mut stream, handle) = scan_room(&session, Duration::from_millis(100)).unwrap();

        let first = stream.next().await.unwrap();
        assert_eq!(first.tracking_state, TrackingState::NotAvailable);
        let second = stream.next().await.unwrap();
        assert!((second.scan_progress - 0.35).abs() < 1e-6);
        let third = stream.next().await.unwrap();
        assert!((third.scan_progress - 0.7).abs() < 1e-6);
        assert!(!session.lock().is_paused());

        handle.cancel();
        assert!(stream.next().await.is_none());
        assert!(session.lock().is_paused());
        assert_eq!(session.lock().pause_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_handle_ends_stream_and_restart_resumes() {
        let session = floor_only();

        let (mut stream, handle) = scan_room(&session, Duration::from_millis(50)).unwrap();
        assert!(stream.next().await.is_some());
        drop(handle);
        assert!(stream.next().await.is_none());
        assert!(session.lock().is_paused());

        let (mut stream, _handle) = scan_room(&session, Duration::from_millis(50)).unwrap();
        let snapshot = stream.next().await.unwrap();
        assert!((snapshot.room_area - 12.0).abs() < 1e-6);
        drop(stream);
        assert!(session.lock().is_paused());
        assert_eq!(session.lock().pause_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_survives_dropping_the_previous_stream() {
        let session = floor_only();

        let (mut old, old_handle) = scan_room(&session, Duration::from_millis(50)).unwrap();
        assert!(old.next().await.is_some());
        old_handle.cancel();

        let (mut new, _handle) = scan_room(&session, Duration::from_millis(50)).unwrap();
        assert!(new.next().await.is_some());

        drop(old);
        assert!(!session.lock().is_paused());
        assert_eq!(session.lock().pause_count(), 0);

        let next = tokio::time::timeout(Duration::from_secs(5), new.next()).await;
        assert!(matches!(next, Ok(Some(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_stream_ends_without_pausing() {
        let session = floor_only();

        let (mut old, _old_handle) = scan_room(&session, Duration::from_millis(50)).unwrap();
        assert!(old.next().await.is_some());

        let (mut new, _handle) = scan_room(&session, Duration::from_millis(50)).unwrap();
        assert!(old.next().await.is_none());
        assert!(!session.lock().is_paused());
        assert!(new.next().await.is_some());
        assert!(new.next().await.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn closing_session_mid_scan_ends_stream() {
        let session = floor_only();

        let (mut stream, _handle) = scan_room(&session, Duration::from_millis(100)).unwrap();
        assert!(stream.next().await.is_some());

        session.lock().close();
        let next = tokio::time::timeout(Duration::from_secs(60), stream.next()).await;
        assert!(matches!(next, Ok(None)));
    }

    #[test]
    fn closed_session_cannot_scan() {
        let session = shared(Vec::new());
        session.lock().close();
        assert_eq!(
            scan_room(&session, Duration::from_millis(10)).err(),
            Some(EstimateError::SessionClosed)
        );
    }
}
