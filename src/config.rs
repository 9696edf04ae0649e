/// Lattice dimensions (600x400 cells, each drawn as a 2x2 pixel block)
pub const GRID_WIDTH: u32 = 600;
pub const GRID_HEIGHT: u32 = 400;

/// On-screen size of one lattice cell in pixels
pub const CELL_SIZE: u32 = 2;

// ============================================
// Wave Equation Parameters
// ============================================

/// Wave speed constant `c`. Stability of the explicit scheme needs c^2 <= 1.
pub const WAVE_SPEED: f64 = 0.5;

/// Per-step multiplicative energy loss on velocity (1.0 = lossless)
pub const DAMPING: f64 = 0.995;

// ============================================
// Excitation
// ============================================

/// Peak impulse added at the centre of a click
pub const EXCITE_STRENGTH: f64 = 20.0;

/// Radius (in cells) of the smooth falloff around a click
pub const EXCITE_RADIUS: f64 = 8.0;

/// Probability per frame of a random drop while drizzle mode is on
pub const DRIZZLE_PROBABILITY: f64 = 0.08;

/// Drops are gentler and tighter than clicks
pub const DRIZZLE_STRENGTH: f64 = 8.0;
pub const DRIZZLE_RADIUS: f64 = 4.0;

// ============================================
// Membrane Geometry
// ============================================

/// Radius of the default circular membrane, centred on the lattice
pub const MEMBRANE_RADIUS: f64 = 150.0;

/// Inner island radius for the annulus preset
pub const ANNULUS_INNER_RADIUS: f64 = 50.0;

// ============================================
// Rendering
// ============================================

/// Height mapped to full colour saturation. Only the colour is clamped,
/// the physical field never is.
pub const DISPLAY_AMPLITUDE: f32 = 50.0;
