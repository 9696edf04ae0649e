use crate::simulation::error::{FieldError, FieldResult};
use crate::simulation::params::{Impulse, WaveParams};
use crate::simulation::shape::Shape;

/// Height of every cell that is not part of the propagating medium.
pub const REFERENCE_HEIGHT: f64 = 0.0;

/// Scalar wave field over a fixed lattice, confined by a static boundary mask.
///
/// Storage is flat and row-major (`y * width + x`). Velocities are
/// double-buffered: each step writes into `scratch` from a fully settled
/// height field, then the two buffers are swapped.
pub struct WaveField {
    width: usize,
    height: usize,
    params: WaveParams,
    heights: Vec<f64>,
    velocities: Vec<f64>,
    scratch: Vec<f64>,
    mask: Vec<bool>,
    steps: u64,
}

impl WaveField {
    /// Build a field whose mask is `inside(x, y)` evaluated at every cell.
    pub fn new<F>(width: usize, height: usize, inside: F, params: WaveParams) -> FieldResult<Self>
    where
        F: Fn(f64, f64) -> bool,
    {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions { width, height });
        }
        let cell_count = width
            .checked_mul(height)
            .ok_or(FieldError::InvalidDimensions { width, height })?;
        params.validate()?;

        let mut mask = Vec::with_capacity(cell_count);
        for y in 0..height {
            for x in 0..width {
                mask.push(inside(x as f64, y as f64));
            }
        }

        let field = Self {
            width,
            height,
            params,
            heights: vec![REFERENCE_HEIGHT; cell_count],
            velocities: vec![0.0; cell_count],
            scratch: vec![0.0; cell_count],
            mask,
            steps: 0,
        };

        log::debug!(
            "Wave field {}x{}: {} medium cells, c={}, damping={}",
            width,
            height,
            field.medium_cell_count(),
            params.wave_speed,
            params.damping
        );

        Ok(field)
    }

    /// Build a field masked by one of the preset shapes.
    pub fn from_shape(width: usize, height: usize, shape: Shape, params: WaveParams) -> FieldResult<Self> {
        Self::new(width, height, |x, y| shape.contains(x, y), params)
    }

    #[inline(always)]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    #[inline]
    fn on_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Resolve signed coordinates to a flat index, or None when off-lattice.
    fn checked_idx(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.idx(x, y))
    }

    /// Inject an impulse centred at `(cx, cy)` with a quadratic falloff:
    /// `strength * (1 - d/radius)^2` for every medium cell within `radius`.
    ///
    /// Repeated calls add up. The lattice border and cells outside the
    /// mask are never touched; the part of the disc that falls off the
    /// lattice is ignored.
    pub fn excite(&mut self, cx: f64, cy: f64, strength: f64, radius: f64) {
        if strength == 0.0 || !strength.is_finite() || !cx.is_finite() || !cy.is_finite() {
            return;
        }
        if !(radius > 0.0) || !radius.is_finite() {
            return;
        }

        let max_x = self.width as f64 - 2.0;
        let max_y = self.height as f64 - 2.0;
        let x_lo = (cx - radius).ceil().max(1.0);
        let x_hi = (cx + radius).floor().min(max_x);
        let y_lo = (cy - radius).ceil().max(1.0);
        let y_hi = (cy + radius).floor().min(max_y);
        if x_lo > x_hi || y_lo > y_hi {
            return;
        }

        let target = match self.params.impulse {
            Impulse::Height => &mut self.heights,
            Impulse::Velocity => &mut self.velocities,
        };

        for y in y_lo as usize..=y_hi as usize {
            for x in x_lo as usize..=x_hi as usize {
                let i = y * self.width + x;
                if !self.mask[i] {
                    continue;
                }
                let d = (x as f64 - cx).hypot(y as f64 - cy);
                if d > radius {
                    continue;
                }
                let falloff = 1.0 - d / radius;
                target[i] += strength * falloff * falloff;
            }
        }
    }

    /// Advance the field by one fixed time step.
    pub fn step(&mut self) {
        let w = self.width;
        let h = self.height;

        if w >= 3 && h >= 3 {
            self.integrate_heights();
            self.update_velocities();
            std::mem::swap(&mut self.velocities, &mut self.scratch);
        }

        self.enforce_border();
        self.steps += 1;
    }

    /// height += velocity over every interior medium cell.
    fn integrate_heights(&mut self) {
        let w = self.width;
        for y in 1..self.height - 1 {
            let row = y * w;
            for x in 1..w - 1 {
                let i = row + x;
                if self.mask[i] {
                    self.heights[i] += self.velocities[i];
                }
            }
        }
    }

    /// Mean 4-neighbour Laplacian into the scratch buffer.
    ///
    /// Walls and the border read as the mirror `-h` of the current cell.
    /// Nothing is written to `heights` or `velocities` here.
    fn update_velocities(&mut self) {
        let w = self.width;
        let c2 = self.params.c2();
        let damping = self.params.damping;

        let heights = &self.heights;
        let velocities = &self.velocities;
        let mask = &self.mask;
        let next = &mut self.scratch;

        next.fill(0.0);

        for y in 1..self.height - 1 {
            let row = y * w;
            for x in 1..w - 1 {
                let i = row + x;
                if !mask[i] {
                    continue;
                }

                let here = heights[i];
                let mut laplacian = 0.0;
                for n in [i - 1, i + 1, i - w, i + w] {
                    laplacian += if mask[n] { heights[n] - here } else { -here };
                }
                laplacian /= 4.0;

                let acceleration = laplacian * c2;
                next[i] = (velocities[i] + acceleration) * damping;
            }
        }
    }

    /// Pin the outermost rows and columns to the reference value.
    fn enforce_border(&mut self) {
        let w = self.width;
        let h = self.height;
        let bottom = (h - 1) * w;

        for x in 0..w {
            self.heights[x] = REFERENCE_HEIGHT;
            self.velocities[x] = 0.0;
            self.heights[bottom + x] = REFERENCE_HEIGHT;
            self.velocities[bottom + x] = 0.0;
        }
        for y in 0..h {
            let left = y * w;
            let right = left + w - 1;
            self.heights[left] = REFERENCE_HEIGHT;
            self.velocities[left] = 0.0;
            self.heights[right] = REFERENCE_HEIGHT;
            self.velocities[right] = 0.0;
        }
    }

    /// Current height at `(x, y)`; the reference value when off-lattice.
    pub fn height_at(&self, x: isize, y: isize) -> f64 {
        self.checked_idx(x, y)
            .map_or(REFERENCE_HEIGHT, |i| self.heights[i])
    }

    /// Mask value at `(x, y)`; false when off-lattice.
    pub fn is_inside(&self, x: isize, y: isize) -> bool {
        self.checked_idx(x, y).is_some_and(|i| self.mask[i])
    }

    /// Choose what later excitations push on. The dynamics are unaffected.
    pub fn set_impulse(&mut self, impulse: Impulse) {
        self.params.impulse = impulse;
    }

    /// Zero the field and the step counter. The mask is kept.
    pub fn reset(&mut self) {
        self.heights.fill(REFERENCE_HEIGHT);
        self.velocities.fill(0.0);
        self.scratch.fill(0.0);
        self.steps = 0;
    }

    /// Sum of squared heights over masked cells
    pub fn energy(&self) -> f64 {
        self.heights
            .iter()
            .zip(&self.mask)
            .filter(|(_, inside)| **inside)
            .map(|(h, _)| h * h)
            .sum()
    }

    pub fn max_abs_height(&self) -> f64 {
        self.heights.iter().fold(0.0_f64, |acc, h| acc.max(h.abs()))
    }

    /// Cells that carry propagating state (masked and off the border)
    pub fn medium_cell_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.mask[self.idx(x, y)] && !self.on_border(x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn params(&self) -> &WaveParams {
        &self.params
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Row-major heights, for upload to the renderer
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Row-major mask, for upload to the renderer
    pub fn mask(&self) -> &[bool] {
        &self.mask
    }
}
