//! Box, Boxa - Rectangle regions
//!
//! Line rectangles and character cell rectangles are both `Box`es.
//! The right and bottom edges are exclusive, so a box with `w == 0` or
//! `h == 0` covers no pixels.

use crate::error::{Error, Result};
use std::fmt;

/// A rectangle region
///
/// A small `Copy` type; each stage produces fresh boxes and never edits
/// the ones it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Box {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is valid (non-negative dimensions)
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.w >= 0 && self.h >= 0
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if this box contains another box
    pub fn contains_box(&self, other: &Box) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Compute the intersection of two boxes
    pub fn intersect(&self, other: &Box) -> Option<Box> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Box {
                x,
                y,
                w: right - x,
                h: bottom - y,
            })
        } else {
            None
        }
    }

    /// Clip the box to fit within `(0, 0)-(width, height)`
    pub fn clip(&self, width: i32, height: i32) -> Option<Box> {
        self.intersect(&Box::new_unchecked(0, 0, width, height))
    }
}

/// Formats as `(x0,y0)-(x1,y1)` with exclusive max corner.
impl fmt::Display for Box {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.x,
            self.y,
            self.right(),
            self.bottom()
        )
    }
}

/// Array of boxes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boxa {
    boxes: Vec<Box>,
}

impl Boxa {
    /// Create a new empty Boxa
    pub fn new() -> Self {
        Self { boxes: Vec::new() }
    }

    /// Create a Boxa with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of boxes
    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Get a box by index
    pub fn get(&self, index: usize) -> Option<&Box> {
        self.boxes.get(index)
    }

    /// Add a box
    pub fn push(&mut self, b: Box) {
        self.boxes.push(b);
    }

    /// Get all boxes as a slice
    pub fn boxes(&self) -> &[Box] {
        &self.boxes
    }

    /// Create an iterator over boxes
    pub fn iter(&self) -> impl Iterator<Item = &Box> {
        self.boxes.iter()
    }
}

impl FromIterator<Box> for Boxa {
    fn from_iter<T: IntoIterator<Item = Box>>(iter: T) -> Self {
        Self {
            boxes: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Boxa {
    type Item = Box;
    type IntoIter = std::vec::IntoIter<Box>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.into_iter()
    }
}

impl<'a> IntoIterator for &'a Boxa {
    type Item = &'a Box;
    type IntoIter = std::slice::Iter<'a, Box>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_creation() {
        let b = Box::new(10, 20, 100, 50).unwrap();
        assert_eq!(b.right(), 110);
        assert_eq!(b.bottom(), 70);
        assert_eq!(b.area(), 5000);

        assert!(Box::new(0, 0, -1, 10).is_err());
    }

    #[test]
    fn test_box_empty() {
        assert!(Box::new(3, 3, 0, 5).unwrap().is_empty());
        assert!(Box::new(3, 3, 5, 0).unwrap().is_empty());
        assert!(!Box::new(3, 3, 1, 1).unwrap().is_empty());
    }

    #[test]
    fn test_box_contains() {
        let b = Box::new(10, 10, 100, 100).unwrap();
        assert!(b.contains_point(50, 50));
        assert!(b.contains_point(10, 10));
        assert!(!b.contains_point(110, 110)); // Exclusive boundary
        assert!(b.contains_box(&Box::new_unchecked(100, 100, 10, 10)));
        assert!(!b.contains_box(&Box::new_unchecked(100, 100, 11, 10)));
    }

    #[test]
    fn test_box_intersect_and_clip() {
        let b1 = Box::new(0, 0, 100, 100).unwrap();
        let b2 = Box::new(50, 50, 100, 100).unwrap();
        assert_eq!(b1.intersect(&b2), Some(Box::new_unchecked(50, 50, 50, 50)));

        let b3 = Box::new(100, 0, 10, 10).unwrap();
        assert!(b1.intersect(&b3).is_none());

        assert_eq!(b2.clip(120, 80), Some(Box::new_unchecked(50, 50, 70, 30)));
    }

    #[test]
    fn test_box_display() {
        let b = Box::new_unchecked(0, 10, 200, 8);
        assert_eq!(b.to_string(), "(0,10)-(200,18)");
    }

    #[test]
    fn test_boxa() {
        let boxa: Boxa = [Box::new_unchecked(0, 0, 10, 10), Box::new_unchecked(20, 20, 10, 10)]
            .into_iter()
            .collect();
        assert_eq!(boxa.len(), 2);
        assert_eq!(boxa.get(1), Some(&Box::new_unchecked(20, 20, 10, 10)));
        assert!(Boxa::new().is_empty());
    }
}
