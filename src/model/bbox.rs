//! Integer bounding boxes as read from VOC `<bndbox>` elements.

use serde::Serialize;

/// An axis-aligned box in corner form (xmin, ymin, xmax, ymax).
///
/// Ordering is not enforced: a box with `xmax < xmin` is carried through
/// and produces a negative width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BBoxXYXY {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl BBoxXYXY {
    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is malformed (xmax < xmin).
    #[inline]
    pub fn width(&self) -> i64 {
        self.xmax - self.xmin
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is malformed (ymax < ymin).
    #[inline]
    pub fn height(&self) -> i64 {
        self.ymax - self.ymin
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.xmin <= self.xmax && self.ymin <= self.ymax
    }

    /// Converts to `[x, y, width, height]`, the layout written to `annotations.json`.
    ///
    /// Callers must ensure [`checked_xywh`](Self::checked_xywh) succeeds; the
    /// VOC parser rejects boxes for which it does not.
    #[inline]
    pub fn to_xywh(&self) -> [i64; 4] {
        [self.xmin, self.ymin, self.width(), self.height()]
    }

    /// Like [`to_xywh`](Self::to_xywh), but `None` if width or height overflows.
    pub fn checked_xywh(&self) -> Option<[i64; 4]> {
        let width = self.xmax.checked_sub(self.xmin)?;
        let height = self.ymax.checked_sub(self.ymin)?;
        Some([self.xmin, self.ymin, width, height])
    }
}
