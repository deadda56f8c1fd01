use crate::errors::{Error, Result};

/// Near-square grid holding `count` items, filled row by row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub columns: u32,
    pub rows: u32,
}

impl GridShape {
    /// `ceil(sqrt(count))` columns and as many rows as needed
    #[must_use]
    pub fn for_count(count: u32) -> Self {
        if count == 0 {
            return Self {
                columns: 0,
                rows: 0,
            };
        }

        let mut columns = 1_u32;
        while u64::from(columns) * u64::from(columns) < u64::from(count) {
            columns += 1;
        }

        Self {
            columns,
            rows: count.div_ceil(columns),
        }
    }

    /// Row and column of the item at `index`
    #[must_use]
    pub fn cell(&self, index: u32) -> (u32, u32) {
        (index / self.columns, index % self.columns)
    }
}

/// Pixel geometry of a poster: each column is as wide as its widest thumbnail,
/// all rows share the thumbnails height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: GridShape,
    row_height: u32,
    padding: u32,
    column_widths: Vec<u32>,
    column_offsets: Vec<u32>,
    canvas_width: u32,
    canvas_height: u32,
}

impl Layout {
    /// `widths` are the thumbnails widths, in placement order
    ///
    /// ## Errors
    ///
    /// Fails if there are more than `u32::MAX` thumbnails,
    /// or if the canvas dimensions don't fit a `u32`
    pub fn new(widths: &[u32], row_height: u32, padding: u32) -> Result<Self> {
        let count =
            u32::try_from(widths.len()).map_err(|_| Error::TooManyCovers(widths.len()))?;
        let shape = GridShape::for_count(count);

        let mut column_widths = vec![0; shape.columns as usize];
        for (index, width) in (0..count).zip(widths) {
            let (_, column) = shape.cell(index);
            let column_width = &mut column_widths[column as usize];
            *column_width = (*column_width).max(*width);
        }

        let mut column_offsets = Vec::with_capacity(column_widths.len());
        let mut offset = 0_u32;
        for (index, width) in column_widths.iter().enumerate() {
            if index > 0 {
                offset = offset.checked_add(padding).ok_or(Error::CanvasTooLarge)?;
            }
            column_offsets.push(offset);
            offset = offset.checked_add(*width).ok_or(Error::CanvasTooLarge)?;
        }

        let canvas_height = shape
            .rows
            .checked_mul(row_height)
            .zip(padding.checked_mul(shape.rows.saturating_sub(1)))
            .and_then(|(rows, paddings)| rows.checked_add(paddings))
            .ok_or(Error::CanvasTooLarge)?;

        Ok(Self {
            shape,
            row_height,
            padding,
            column_widths,
            column_offsets,
            canvas_width: offset,
            canvas_height,
        })
    }

    #[must_use]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    #[must_use]
    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    #[must_use]
    pub fn column_offsets(&self) -> &[u32] {
        &self.column_offsets
    }

    #[must_use]
    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    #[must_use]
    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    /// Top left corner of the thumbnail at `index`
    #[must_use]
    pub fn position(&self, index: u32) -> (u32, u32) {
        let (row, column) = self.shape.cell(index);

        // Bounded by the canvas height for any index of the grid
        (
            self.column_offsets[column as usize],
            row * self.row_height + row * self.padding,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_shapes() {
        let shapes = [1, 2, 3, 4, 5, 9, 10]
            .into_iter()
            .map(|count| {
                let shape = GridShape::for_count(count);
                (shape.columns, shape.rows)
            })
            .collect::<Vec<_>>();

        assert_eq!(
            shapes,
            vec![(1, 1), (2, 1), (2, 2), (2, 2), (3, 2), (3, 3), (4, 3)]
        );
    }

    #[test]
    fn empty_grid() {
        assert_eq!(
            GridShape::for_count(0),
            GridShape {
                columns: 0,
                rows: 0
            }
        );

        let layout = Layout::new(&[], 600, 10).unwrap();
        assert_eq!((layout.canvas_width(), layout.canvas_height()), (0, 0));
    }

    #[test]
    fn cells_are_filled_row_by_row() {
        let shape = GridShape::for_count(5);

        assert_eq!(shape.cell(0), (0, 0));
        assert_eq!(shape.cell(2), (0, 2));
        assert_eq!(shape.cell(3), (1, 0));
        assert_eq!(shape.cell(4), (1, 1));
    }

    #[test]
    fn two_columns_of_different_widths() {
        let layout = Layout::new(&[400, 350], 600, 0).unwrap();

        assert_eq!(layout.column_widths(), &[400, 350]);
        assert_eq!((layout.canvas_width(), layout.canvas_height()), (750, 600));
        assert_eq!(layout.position(0), (0, 0));
        assert_eq!(layout.position(1), (400, 0));
    }

    #[test]
    fn columns_are_as_wide_as_their_widest_thumbnail() {
        // 2x2 grid: column 0 holds items 0 and 2, column 1 holds items 1 and 3
        let layout = Layout::new(&[300, 420, 380, 400], 600, 0).unwrap();

        assert_eq!(layout.column_widths(), &[380, 420]);
        assert_eq!(layout.column_offsets(), &[0, 380]);
        assert_eq!((layout.canvas_width(), layout.canvas_height()), (800, 1200));
        assert_eq!(layout.position(3), (380, 600));
    }

    #[test]
    fn padding_goes_between_cells_only() {
        // 3 columns, 2 rows, last row only partially filled
        let layout = Layout::new(&[100, 200, 150, 120, 90], 300, 10).unwrap();

        assert_eq!(layout.column_widths(), &[120, 200, 150]);
        assert_eq!(layout.column_offsets(), &[0, 130, 340]);
        assert_eq!(layout.canvas_width(), 120 + 200 + 150 + 2 * 10);
        assert_eq!(layout.canvas_height(), 2 * 300 + 10);
        assert_eq!(layout.position(2), (340, 0));
        assert_eq!(layout.position(3), (0, 310));
    }

    #[test]
    fn single_thumbnail() {
        let layout = Layout::new(&[412], 600, 25).unwrap();

        assert_eq!((layout.canvas_width(), layout.canvas_height()), (412, 600));
        assert_eq!(layout.position(0), (0, 0));

        // No padding is ever applied around a lone thumbnail
        let layout = Layout::new(&[412], 600, u32::MAX).unwrap();
        assert_eq!((layout.canvas_width(), layout.canvas_height()), (412, 600));
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        assert!(matches!(
            Layout::new(&[100, 100], 600, u32::MAX),
            Err(Error::CanvasTooLarge)
        ));
        assert!(matches!(
            Layout::new(&[u32::MAX, 1], 600, 0),
            Err(Error::CanvasTooLarge)
        ));
        // 2 columns and 2 rows
        assert!(matches!(
            Layout::new(&[1, 1, 1], u32::MAX / 2 + 1, 0),
            Err(Error::CanvasTooLarge)
        ));
        assert!(matches!(
            Layout::new(&[1, 1, 1], 1000, u32::MAX - 1500),
            Err(Error::CanvasTooLarge)
        ));
    }

    #[test]
    fn largest_canvas_fits() {
        let layout = Layout::new(&[1, 1, 1], u32::MAX / 2, 1).unwrap();

        assert_eq!(layout.canvas_height(), u32::MAX);
        assert_eq!(layout.position(2), (0, u32::MAX / 2 + 1));
    }
}
