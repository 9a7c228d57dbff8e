//! Rasterized image tiles.
//!
//! A sixel or iTerm2 image is rasterized once into a `RasterizedImage` and
//! shared; every covered cell holds an `ImageFragment` naming its tile
//! within the image. Reassembly and pixel interpretation are renderer
//! concerns; this module only models sharing and identity.

use std::sync::Arc;

use crate::index::{ColumnCount, LineCount};

/// A rasterized image spanning a rectangle of grid cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterizedImage {
    lines: LineCount,
    columns: ColumnCount,
    data: Vec<u8>,
}

impl RasterizedImage {
    /// Create an image spanning `lines x columns` cells with the given
    /// pixel data (opaque to this crate).
    pub fn new(lines: LineCount, columns: ColumnCount, data: Vec<u8>) -> Self {
        Self { lines, columns, data }
    }

    /// Number of cell rows the image covers.
    pub fn lines(&self) -> LineCount {
        self.lines
    }

    /// Number of cell columns the image covers.
    pub fn columns(&self) -> ColumnCount {
        self.columns
    }

    /// Raw pixel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// One cell-sized tile of a shared rasterized image.
///
/// Equality is image identity (same allocation) plus tile offset, so two
/// cells showing the same tile of the same image compare equal.
#[derive(Debug, Clone)]
pub struct ImageFragment {
    image: Arc<RasterizedImage>,
    line: usize,
    column: usize,
}

impl ImageFragment {
    /// Create a fragment for the tile at `(line, column)` within the image.
    pub fn new(image: Arc<RasterizedImage>, line: usize, column: usize) -> Self {
        Self { image, line, column }
    }

    /// The shared image this tile belongs to.
    pub fn image(&self) -> &Arc<RasterizedImage> {
        &self.image
    }

    /// Tile offset within the image, in cells.
    pub fn offset(&self) -> (usize, usize) {
        (self.line, self.column)
    }
}

impl PartialEq for ImageFragment {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
            && self.line == other.line
            && self.column == other.column
    }
}

impl Eq for ImageFragment {}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{ImageFragment, RasterizedImage};
    use crate::index::{ColumnCount, LineCount};

    fn image() -> Arc<RasterizedImage> {
        Arc::new(RasterizedImage::new(LineCount(2), ColumnCount(3), vec![1, 2, 3]))
    }

    #[test]
    fn fragments_of_same_image_and_offset_are_equal() {
        let img = image();
        let a = ImageFragment::new(Arc::clone(&img), 1, 2);
        let b = ImageFragment::new(Arc::clone(&img), 1, 2);
        assert_eq!(a, b);
    }

    #[test]
    fn fragments_differ_by_offset() {
        let img = image();
        let a = ImageFragment::new(Arc::clone(&img), 0, 0);
        let b = ImageFragment::new(img, 0, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn fragments_differ_by_image_identity() {
        let a = ImageFragment::new(image(), 0, 0);
        let b = ImageFragment::new(image(), 0, 0);
        // Equal contents, different allocations.
        assert_ne!(a, b);
    }

    #[test]
    fn image_is_shared_not_copied() {
        let img = image();
        let fragment = ImageFragment::new(Arc::clone(&img), 0, 0);
        assert_eq!(Arc::strong_count(&img), 2);
        drop(fragment);
        assert_eq!(Arc::strong_count(&img), 1);
    }

    #[test]
    fn accessors() {
        let img = image();
        assert_eq!(img.lines(), LineCount(2));
        assert_eq!(img.columns(), ColumnCount(3));
        assert_eq!(img.data(), &[1, 2, 3]);

        let fragment = ImageFragment::new(img, 1, 2);
        assert_eq!(fragment.offset(), (1, 2));
    }
}
