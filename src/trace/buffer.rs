//! Fixed-capacity circular storage for trajectory history.
//!
//! Points are stored as a flat `f32` array (`x0 y0 z0 x1 y1 z1 ...`) so a
//! renderer can upload the whole buffer, or any [`VisibleWindow`] of it,
//! without conversion. The allocation is made once in [`TraceBuffer::new`]
//! and never changes size afterwards.

use serde::{Deserialize, Serialize};

use crate::dynamics::State;
use crate::error::{TraceError, TraceResult};

/// Points retained per trajectory unless configured otherwise.
pub const DEFAULT_TRACE_CAPACITY: usize = 100_000;

/// Scalars per stored point.
pub const COMPONENTS: usize = 3;

/// A contiguous range of points in a buffer's physical layout.
///
/// `start` and `count` are in points, not scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VisibleWindow {
    /// First point of the range.
    pub start: usize,
    /// Number of points in the range.
    pub count: usize,
}

impl VisibleWindow {
    /// One past the last point of the range.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.count
    }

    /// True if the window covers no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Range in scalar units, for indexing flat storage.
    #[must_use]
    pub const fn scalar_range(&self) -> std::ops::Range<usize> {
        self.start * COMPONENTS..self.end() * COMPONENTS
    }
}

/// Circular buffer of 3D points with a wrapping write cursor.
///
/// Invariants:
/// - `head == total_appended % capacity`
/// - `written == min(total_appended, capacity)`
/// - the backing storage always holds exactly `capacity` points
#[derive(Debug, Clone)]
pub struct TraceBuffer {
    data: Box<[f32]>,
    capacity: usize,
    head: usize,
    written: usize,
    total_appended: u64,
}

impl TraceBuffer {
    /// Allocate a zeroed buffer holding `capacity` points.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> TraceResult<Self> {
        if capacity == 0 {
            return Err(TraceError::InvalidCapacity { capacity });
        }
        Ok(Self {
            data: vec![0.0; capacity * COMPONENTS].into_boxed_slice(),
            capacity,
            head: 0,
            written: 0,
            total_appended: 0,
        })
    }

    /// Maximum number of points the buffer holds.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Slot the next append writes to.
    #[must_use]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Number of valid points, saturating at capacity.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Appends since creation or the last clear, without saturation.
    #[must_use]
    pub const fn total_appended(&self) -> u64 {
        self.total_appended
    }

    /// True once every slot has been written at least once.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.written == self.capacity
    }

    /// True if nothing has been written since creation or the last clear.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Write `point` at the head and advance it, overwriting the oldest
    /// point once the buffer is full.
    pub fn append(&mut self, point: &State) {
        let offset = self.head * COMPONENTS;
        self.data[offset..offset + COMPONENTS].copy_from_slice(&point.to_f32_array());

        self.head = (self.head + 1) % self.capacity;
        self.written = (self.written + 1).min(self.capacity);
        self.total_appended += 1;
    }

    /// The `max_visible` most recent points that sit physically before the
    /// head: `[max(0, head - max_visible), head)`.
    ///
    /// Once the head has wrapped, points stored after it (the older part of
    /// the ring) are not included, so the window shrinks to zero right
    /// after each wrap and grows again from slot 0. Renderers drawing this
    /// range see a short gap in the trail at every wraparound. Use
    /// [`Self::iter_chronological`] for a true rolling window.
    #[must_use]
    pub fn visible_window(&self, max_visible: usize) -> VisibleWindow {
        let start = self.head.saturating_sub(max_visible);
        VisibleWindow {
            start,
            count: self.head - start,
        }
    }

    /// Flat coordinates covered by `window`, clamped to the buffer.
    #[must_use]
    pub fn window_slice(&self, window: &VisibleWindow) -> &[f32] {
        let start = window.start.min(self.capacity);
        let end = window.end().min(self.capacity);
        &self.data[start * COMPONENTS..end * COMPONENTS]
    }

    /// The whole backing store in physical order.
    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        &self.data
    }

    /// Point stored at physical slot `index`, if in range.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<[f32; 3]> {
        if index >= self.capacity {
            return None;
        }
        let offset = index * COMPONENTS;
        Some([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
        ])
    }

    /// Most recently appended point.
    #[must_use]
    pub fn latest(&self) -> Option<[f32; 3]> {
        if self.is_empty() {
            return None;
        }
        self.point((self.head + self.capacity - 1) % self.capacity)
    }

    /// Retained points, oldest first, following the ring across the wrap.
    pub fn iter_chronological(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        let oldest = if self.is_full() { self.head } else { 0 };
        (0..self.written).filter_map(move |i| self.point((oldest + i) % self.capacity))
    }

    /// Zero every slot and rewind the cursor. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.data.fill(0.0);
        self.head = 0;
        self.written = 0;
        self.total_appended = 0;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn p(i: usize) -> State {
        let v = i as f64;
        State::new(v, v + 0.5, -v)
    }

    fn filled(capacity: usize, appends: usize) -> TraceBuffer {
        let mut buf = TraceBuffer::new(capacity).unwrap();
        for i in 0..appends {
            buf.append(&p(i));
        }
        buf
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        let err = TraceBuffer::new(0).unwrap_err();
        assert!(matches!(err, TraceError::InvalidCapacity { capacity: 0 }));
    }

    #[test]
    fn test_new_is_zeroed_and_empty() {
        let buf = TraceBuffer::new(4).unwrap();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.head(), 0);
        assert_eq!(buf.written(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.as_flat().len(), 12);
        assert!(buf.as_flat().iter().all(|&v| v == 0.0));
        assert!(buf.latest().is_none());
    }

    #[test]
    fn test_append_advances_head() {
        let buf = filled(4, 3);
        assert_eq!(buf.head(), 3);
        assert_eq!(buf.written(), 3);
        assert_eq!(buf.point(2), Some([2.0, 2.5, -2.0]));
        assert_eq!(buf.latest(), Some([2.0, 2.5, -2.0]));
    }

    #[test]
    fn test_exactly_capacity_fills_without_wrap() {
        let buf = filled(5, 5);
        assert_eq!(buf.written(), 5);
        assert_eq!(buf.head(), 0);
        assert!(buf.is_full());

        let points: Vec<_> = buf.iter_chronological().collect();
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], [0.0, 0.5, 0.0]);
        assert_eq!(points[4], [4.0, 4.5, -4.0]);
    }

    #[test]
    fn test_overflow_keeps_most_recent_points() {
        let capacity = 5;
        let k = 3;
        let buf = filled(capacity, capacity + k);

        assert_eq!(buf.written(), capacity);
        assert_eq!(buf.head(), k);
        assert_eq!(buf.total_appended(), (capacity + k) as u64);

        let points: Vec<_> = buf.iter_chronological().collect();
        let expected: Vec<_> = (k..capacity + k).map(|i| p(i).to_f32_array()).collect();
        assert_eq!(points, expected);

        // The oldest k points are gone.
        for i in 0..k {
            assert!(!points.contains(&p(i).to_f32_array()));
        }
    }

    #[test]
    fn test_latest_after_wrap() {
        let buf = filled(3, 4);
        assert_eq!(buf.head(), 1);
        assert_eq!(buf.latest(), Some(p(3).to_f32_array()));

        let buf = filled(3, 3);
        assert_eq!(buf.latest(), Some(p(2).to_f32_array()));
    }

    #[test]
    fn test_visible_window_before_wrap() {
        let buf = filled(10, 6);
        assert_eq!(buf.visible_window(100), VisibleWindow { start: 0, count: 6 });
        assert_eq!(buf.visible_window(4), VisibleWindow { start: 2, count: 4 });
        assert_eq!(buf.visible_window(0), VisibleWindow { start: 6, count: 0 });
    }

    #[test]
    fn test_visible_window_after_wrap_is_physical() {
        // Head wrapped to slot 2: only slots 0 and 1 are drawn even though
        // the ring holds 10 valid points.
        let buf = filled(10, 12);
        assert_eq!(buf.head(), 2);
        assert_eq!(buf.visible_window(10), VisibleWindow { start: 0, count: 2 });

        // Right at the wrap the window is empty.
        let buf = filled(10, 10);
        assert!(buf.visible_window(10).is_empty());
    }

    #[test]
    fn test_window_slice_matches_points() {
        let buf = filled(10, 6);
        let window = buf.visible_window(2);
        let slice = buf.window_slice(&window);
        assert_eq!(slice.len(), 6);
        assert_eq!(&slice[..3], &p(4).to_f32_array());
        assert_eq!(&slice[3..], &p(5).to_f32_array());
        assert_eq!(window.scalar_range(), 12..18);
    }

    #[test]
    fn test_window_slice_clamps_out_of_range() {
        let buf = filled(4, 2);
        let slice = buf.window_slice(&VisibleWindow { start: 3, count: 10 });
        assert_eq!(slice.len(), 3);
    }

    #[test]
    fn test_clear_resets_without_reallocating() {
        let mut buf = filled(4, 6);
        let ptr = buf.as_flat().as_ptr();

        buf.clear();

        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.head(), 0);
        assert_eq!(buf.written(), 0);
        assert_eq!(buf.total_appended(), 0);
        assert!(buf.as_flat().iter().all(|&v| v == 0.0));
        assert_eq!(buf.as_flat().as_ptr(), ptr);
        assert_eq!(buf.iter_chronological().count(), 0);
    }

    #[test]
    fn test_point_out_of_range() {
        let buf = filled(2, 1);
        assert!(buf.point(2).is_none());
    }

    #[test]
    fn test_capacity_one() {
        let buf = filled(1, 3);
        assert_eq!(buf.head(), 0);
        assert_eq!(buf.written(), 1);
        assert_eq!(buf.latest(), Some(p(2).to_f32_array()));
    }
}
