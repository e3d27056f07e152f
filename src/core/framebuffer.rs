use crate::core::color::ColorRgb;
use atomic_float::AtomicF32;
use rayon::prelude::*;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Number of striped locks guarding color writes.
const LOCK_COUNT: usize = 1024;

/// Represents a 2D buffer containing packed color and depth information.
///
/// Thread-safe for parallel rasterization: depth uses atomic `fetch_min`, and
/// color writes are serialised per pixel stripe so the stored color always
/// belongs to the fragment holding the stored depth.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,

    /// Packed `0xFFRRGGBB` pixels.
    color_buffer: Vec<AtomicU32>,

    /// One depth value per pixel, reset to +infinity every frame.
    depth_buffer: Vec<AtomicF32>,

    /// Striped locks to protect color writes.
    /// Pixel indices map onto a lock to reduce contention.
    locks: Vec<Mutex<()>>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        let black = ColorRgb::BLACK.to_packed();

        Self {
            width,
            height,
            color_buffer: (0..size).map(|_| AtomicU32::new(black)).collect(),
            depth_buffer: (0..size).map(|_| AtomicF32::new(f32::INFINITY)).collect(),
            locks: (0..LOCK_COUNT).map(|_| Mutex::new(())).collect(),
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Fills the color buffer with `color` and resets every depth to +infinity.
    pub fn clear(&self, color: ColorRgb) {
        let packed = color.to_packed();
        self.color_buffer
            .par_iter()
            .for_each(|pixel| pixel.store(packed, Ordering::Relaxed));
        self.depth_buffer
            .par_iter()
            .for_each(|depth| depth.store(f32::INFINITY, Ordering::Relaxed));
    }

    /// Thread-safe depth test and update.
    ///
    /// Returns true if `depth` is strictly closer than the stored value, in
    /// which case the buffer now holds `depth`. Non-finite depths never pass.
    #[inline]
    pub fn depth_test_and_update(&self, x: usize, y: usize, depth: f32) -> bool {
        if !self.in_bounds(x, y) || !depth.is_finite() {
            return false;
        }
        let previous = self.depth_buffer[self.index(x, y)].fetch_min(depth, Ordering::AcqRel);
        depth < previous
    }

    /// Writes `color` if `depth` is still the nearest value stored at the pixel.
    ///
    /// Call after a successful [`FrameBuffer::depth_test_and_update`]; a nearer
    /// fragment that won the depth test in the meantime keeps its color.
    #[inline]
    pub fn resolve_fragment(&self, x: usize, y: usize, depth: f32, color: ColorRgb) {
        if !self.in_bounds(x, y) {
            return;
        }
        let idx = self.index(x, y);
        let _guard = self.lock_for(idx);
        if self.depth_buffer[idx].load(Ordering::Acquire) == depth {
            self.color_buffer[idx].store(color.to_packed(), Ordering::Relaxed);
        }
    }

    /// Unconditional color write, used by the bounding-box visualization.
    #[inline]
    pub fn set_pixel(&self, x: usize, y: usize, color: ColorRgb) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            let _guard = self.lock_for(idx);
            self.color_buffer[idx].store(color.to_packed(), Ordering::Relaxed);
        }
    }

    fn lock_for(&self, idx: usize) -> std::sync::MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.locks[idx % self.locks.len()]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.color_buffer[self.index(x, y)].load(Ordering::Relaxed))
    }

    pub fn depth(&self, x: usize, y: usize) -> Option<f32> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.depth_buffer[self.index(x, y)].load(Ordering::Relaxed))
    }

    /// Snapshot of the packed color buffer, row-major.
    pub fn pixels(&self) -> Vec<u32> {
        self.color_buffer
            .iter()
            .map(|p| p.load(Ordering::Relaxed))
            .collect()
    }

    /// Snapshot of the depth buffer, row-major.
    pub fn depths(&self) -> Vec<f32> {
        self.depth_buffer
            .iter()
            .map(|d| d.load(Ordering::Relaxed))
            .collect()
    }
}
