use serde::{Deserialize, Serialize};

/// Notable occurrences of the current tick. The buffer is cleared at
/// the start of every tick; consumers (effects, telemetry) read it
/// between ticks, the simulation itself never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// A predator removed prey at these coordinates.
    Kill { x: u32, y: u32 },
}
