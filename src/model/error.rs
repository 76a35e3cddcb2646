use thiserror::Error;

/// Programmer-error class failures surfaced at construction time.
/// Steady-state absences (no prey, no free neighbor, failed roll) are
/// ordinary no-op outcomes, never errors.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
