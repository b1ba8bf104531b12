//! Cosmetic APK scan: validates a file name, waits, then reveals a
//! randomized threat report through a timer-driven state machine.

pub mod classify;
pub mod clock;
pub mod driver;
pub mod machine;
pub mod report;
pub mod scheduler;
pub mod submission;

pub use classify::{RiskDescription, StatusBanner, ThreatColor, ThreatStatus};
pub use clock::{Clock, ManualClock, SystemClock};
pub use machine::{CategoryBar, Dashboard, ScanEvent, ScanSession, ScanSimulator, ScanState};
pub use report::{Category, ThreatReport};
pub use submission::Submission;
