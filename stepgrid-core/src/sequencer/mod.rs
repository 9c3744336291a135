//! Step clock and the transport/engine seams it is written against.

mod clock;
pub mod offline;
pub mod transport;

pub use clock::{PlaybackState, StepClock};
pub use offline::OfflineTransport;
pub use transport::{AudioContext, EngineError, ScheduleId, Tick, TransportClock, Triggerable};
