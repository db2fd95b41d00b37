// Spritesheet slicing and animation naming
//
// A spritesheet is a grid of equally sized sub-images. Slicing walks the
// grid in row-major order and extracts every full cell; naming folds the
// flat frame list back into rows and hands each row to an animation name.

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use std::collections::HashMap;

/// Spritesheet layout validation errors
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SheetError {
    #[error("row width must be positive")]
    ZeroRowWidth,

    #[error("too many names for the available rows: {names} names, {rows} rows")]
    TooManyNames { names: usize, rows: usize },

    #[error("sprite count {count} exceeds row width {row_width}")]
    CountExceedsRow { count: usize, row_width: usize },

    #[error("fewer sprite counts than names: {counts} counts, {names} names")]
    TooFewCounts { counts: usize, names: usize },
}

/// Parameters for slicing a spritesheet grid
#[derive(Debug, Clone, Copy)]
pub struct SliceOptions {
    /// Size of one cell in pixels
    pub frame_size: (u32, u32),

    /// Scale every extracted cell to this size
    pub resize_to: Option<(u32, u32)>,

    /// Pixel position of the first cell's top-left corner
    pub offset: (u32, u32),

    /// Pixels between adjacent cells on both axes
    pub padding: u32,
}

impl SliceOptions {
    /// Options for a tight grid of `frame_size` cells starting at the origin
    pub fn new(frame_size: (u32, u32)) -> Self {
        Self {
            frame_size,
            resize_to: None,
            offset: (0, 0),
            padding: 0,
        }
    }
}

/// Slice a spritesheet into sub-images in row-major order.
///
/// Scanning starts at `offset` and steps by `frame_size + padding` on each
/// axis. A row or column is only visited if a full cell fits, so partial
/// trailing cells are never emitted. An empty result is legal; rejecting it
/// is the caller's job.
pub fn slice(image: &DynamicImage, options: &SliceOptions) -> Vec<RgbaImage> {
    let (frame_w, frame_h) = options.frame_size;
    let (start_x, start_y) = options.offset;
    let step_x = (frame_w + options.padding) as u64;
    let step_y = (frame_h + options.padding) as u64;

    let mut frames = Vec::new();
    if frame_w == 0 || frame_h == 0 {
        return frames;
    }

    let mut y = start_y as u64;
    while y + frame_h as u64 <= image.height() as u64 {
        let mut x = start_x as u64;
        while x + frame_w as u64 <= image.width() as u64 {
            let cell = image.crop_imm(x as u32, y as u32, frame_w, frame_h);
            let cell = match options.resize_to {
                Some((w, h)) => cell.resize_exact(w, h, FilterType::Nearest),
                None => cell,
            };
            frames.push(cell.to_rgba8());
            x += step_x;
        }
        y += step_y;
    }

    frames
}

/// Fold a flat, row-major frame list into named animation sequences.
///
/// The list is interpreted as `names.len()` rows of `frames_per_row` slots.
/// `frames_per_animation`, when given, holds a per-row count of how many of
/// that row's slots are real frames; trailing slots are padding. Row `i`
/// becomes the sequence for `names[i]`.
///
/// All validation happens before anything is built. A resulting sequence may
/// be empty when its count is zero; `AnimationSet` construction rejects that
/// downstream.
pub fn name_frames<T: Clone, S: AsRef<str>>(
    frames: &[T],
    names: &[S],
    frames_per_row: usize,
    frames_per_animation: Option<&[usize]>,
) -> Result<HashMap<String, Vec<T>>, SheetError> {
    if frames_per_row == 0 {
        return Err(SheetError::ZeroRowWidth);
    }

    let rows = frames.len() / frames_per_row;
    if names.len() > rows {
        return Err(SheetError::TooManyNames {
            names: names.len(),
            rows,
        });
    }

    if let Some(counts) = frames_per_animation {
        if let Some(&count) = counts.iter().find(|&&c| c > frames_per_row) {
            return Err(SheetError::CountExceedsRow {
                count,
                row_width: frames_per_row,
            });
        }
        if counts.len() < names.len() {
            return Err(SheetError::TooFewCounts {
                counts: counts.len(),
                names: names.len(),
            });
        }
    }

    let mut sequences = HashMap::with_capacity(names.len());
    for (row, name) in names.iter().enumerate() {
        let count = frames_per_animation.map_or(frames_per_row, |counts| counts[row]);
        let start = row * frames_per_row;
        sequences.insert(name.as_ref().to_string(), frames[start..start + count].to_vec());
    }

    Ok(sequences)
}

/// Everything needed to turn one spritesheet file into an animation set:
/// source file, grid geometry, and the per-row animation names.
#[derive(Debug, Clone)]
pub struct SheetSpec {
    /// Spritesheet file name, resolved against the spritesheet root
    pub file: String,

    /// Size of one cell in pixels
    pub frame_size: (u32, u32),

    /// Scale every cell to this size after extraction
    pub resize_to: Option<(u32, u32)>,

    /// Pixel position of the first cell
    pub offset: (u32, u32),

    /// Pixels between adjacent cells
    pub padding: u32,

    /// Animation names, one per sheet row, top to bottom
    pub names: Vec<String>,

    /// Number of cell slots per row
    pub frames_per_row: usize,

    /// Real frame count per row; trailing slots are unused padding
    pub frames_per_animation: Option<Vec<usize>>,
}

impl SheetSpec {
    /// Create a spec for a tight single-column sheet
    pub fn new(file: &str, frame_size: (u32, u32)) -> Self {
        Self {
            file: file.to_string(),
            frame_size,
            resize_to: None,
            offset: (0, 0),
            padding: 0,
            names: Vec::new(),
            frames_per_row: 1,
            frames_per_animation: None,
        }
    }

    /// Scale extracted frames to this size
    pub fn with_resize_to(mut self, size: (u32, u32)) -> Self {
        self.resize_to = Some(size);
        self
    }

    /// Start the grid scan at this pixel offset
    pub fn with_offset(mut self, offset: (u32, u32)) -> Self {
        self.offset = offset;
        self
    }

    /// Leave this many pixels between adjacent cells
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Append an animation name for the next sheet row
    pub fn with_animation(mut self, name: &str) -> Self {
        self.names.push(name.to_string());
        self
    }

    /// Set the number of cell slots per row
    pub fn with_frames_per_row(mut self, frames_per_row: usize) -> Self {
        self.frames_per_row = frames_per_row;
        self
    }

    /// Set the per-row real frame counts
    pub fn with_frame_counts(mut self, counts: Vec<usize>) -> Self {
        self.frames_per_animation = Some(counts);
        self
    }

    /// The slicing parameters carried by this spec
    pub fn slice_options(&self) -> SliceOptions {
        SliceOptions {
            frame_size: self.frame_size,
            resize_to: self.resize_to,
            offset: self.offset,
            padding: self.padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Sheet where every pixel of cell (row, col) carries the cell's
    /// row-major index in its red channel, on a 32 px grid
    fn indexed_sheet(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            let index = (y / 32) * (width / 32) + (x / 32);
            Rgba([index as u8, 0, 0, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn test_slice_clean_grid() {
        let sheet = indexed_sheet(128, 64);
        let frames = slice(&sheet, &SliceOptions::new((32, 32)));

        // (64/32) rows of (128/32) columns
        assert_eq!(frames.len(), 8);
        for frame in &frames {
            assert_eq!(frame.dimensions(), (32, 32));
        }
        // Row-major order: cell index shows up in the red channel
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.get_pixel(0, 0)[0], i as u8);
        }
    }

    #[test]
    fn test_slice_with_padding() {
        let sheet = indexed_sheet(96, 64);
        let options = SliceOptions {
            padding: 5,
            ..SliceOptions::new((30, 30))
        };
        let frames = slice(&sheet, &options);

        // Columns at x = 0, 35, 70 hold a full 30 px cell (96 wide);
        // rows at y = 0, 35 do too (64 tall): 3 * 2 cells
        assert_eq!(frames.len(), 6);
    }

    #[test]
    fn test_slice_with_offset() {
        let sheet = indexed_sheet(128, 64);
        let options = SliceOptions {
            offset: (32, 32),
            ..SliceOptions::new((32, 32))
        };
        let frames = slice(&sheet, &options);

        // One row remains below the offset, three columns right of it
        assert_eq!(frames.len(), 3);
        // First extracted cell is grid cell (1, 1), index 5 on a 4-wide sheet
        assert_eq!(frames[0].get_pixel(0, 0)[0], 5);
    }

    #[test]
    fn test_slice_partial_trailing_cells_skipped() {
        // 100 px does not fit a fourth 32 px column or a second 48 px row
        let sheet = indexed_sheet(100, 50);
        let frames = slice(&sheet, &SliceOptions::new((32, 48)));
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn test_slice_resizes_frames() {
        let sheet = indexed_sheet(64, 64);
        let options = SliceOptions {
            resize_to: Some((64, 64)),
            ..SliceOptions::new((32, 32))
        };
        let frames = slice(&sheet, &options);

        assert_eq!(frames.len(), 4);
        for frame in &frames {
            assert_eq!(frame.dimensions(), (64, 64));
        }
    }

    #[test]
    fn test_slice_empty_result_is_legal() {
        let sheet = indexed_sheet(32, 32);
        let frames = slice(&sheet, &SliceOptions::new((64, 64)));
        assert!(frames.is_empty());
    }

    #[test]
    fn test_name_frames_rows_and_counts() {
        let frames: Vec<u32> = (0..6).collect();
        let named =
            name_frames(&frames, &["a", "b"], 3, Some(&[2, 3])).unwrap();

        assert_eq!(named.len(), 2);
        assert_eq!(named["a"], vec![0, 1]);
        assert_eq!(named["b"], vec![3, 4, 5]);
    }

    #[test]
    fn test_name_frames_full_rows_without_counts() {
        let frames: Vec<u32> = (0..8).collect();
        let named = name_frames(&frames, &["a", "b"], 4, None).unwrap();

        assert_eq!(named["a"], vec![0, 1, 2, 3]);
        assert_eq!(named["b"], vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_name_frames_rejects_too_many_names() {
        let frames: Vec<u32> = (0..6).collect();
        let err = name_frames(&frames, &["a", "b", "c"], 3, None).unwrap_err();
        assert_eq!(err, SheetError::TooManyNames { names: 3, rows: 2 });
    }

    #[test]
    fn test_name_frames_rejects_any_oversized_count() {
        // A single oversized count is enough to reject
        let frames: Vec<u32> = (0..6).collect();
        let err = name_frames(&frames, &["a", "b"], 3, Some(&[2, 4])).unwrap_err();
        assert_eq!(
            err,
            SheetError::CountExceedsRow {
                count: 4,
                row_width: 3
            }
        );
    }

    #[test]
    fn test_name_frames_rejects_too_few_counts() {
        let frames: Vec<u32> = (0..6).collect();
        let err = name_frames(&frames, &["a", "b"], 3, Some(&[2])).unwrap_err();
        assert_eq!(err, SheetError::TooFewCounts { counts: 1, names: 2 });
    }

    #[test]
    fn test_name_frames_rejects_zero_row_width() {
        let frames: Vec<u32> = (0..6).collect();
        let err = name_frames(&frames, &["a"], 0, None).unwrap_err();
        assert_eq!(err, SheetError::ZeroRowWidth);
    }

    #[test]
    fn test_name_frames_allows_zero_count_sequence() {
        // Empty sequences pass naming; AnimationSet construction rejects them
        let frames: Vec<u32> = (0..6).collect();
        let named = name_frames(&frames, &["a", "b"], 3, Some(&[0, 3])).unwrap();
        assert!(named["a"].is_empty());
        assert_eq!(named["b"], vec![3, 4, 5]);
    }

    #[test]
    fn test_sheet_spec_builder() {
        let spec = SheetSpec::new("player.png", (64, 64))
            .with_frames_per_row(5)
            .with_padding(1)
            .with_offset((2, 2))
            .with_resize_to((64, 64))
            .with_animation("walk_east")
            .with_animation("walk_north")
            .with_frame_counts(vec![5, 3]);

        assert_eq!(spec.names, vec!["walk_east", "walk_north"]);
        assert_eq!(spec.frames_per_row, 5);

        let options = spec.slice_options();
        assert_eq!(options.frame_size, (64, 64));
        assert_eq!(options.padding, 1);
        assert_eq!(options.offset, (2, 2));
        assert_eq!(options.resize_to, Some((64, 64)));
    }
}
