//! Platform-independent side of AR room scanning.
//!
//! Platform adapters (ARCore, ARKit) implement [`ArSession`]; everything
//! else here works on that trait and the snapshot types in
//! `crate::domain::scan`.

pub mod replay;
pub mod scanner;
pub mod session;

pub use replay::{ReplayFrame, ReplaySession};
pub use scanner::{generate_room, scan_room, snapshot, ScanHandle, ScanStream};
pub use session::{ArSession, SharedSession};
