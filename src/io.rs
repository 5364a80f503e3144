//! JSON grid documents: `{ "shape": [rows, cols(, depth)], "data": [...] }`.
//!
//! `data` is row-major. JSON has no NaN or infinity, so `null` stands for a
//! non-finite cell: blocked on input, blocked or unreachable on output.
//! Infinite seed labels are valid in memory but cannot survive this format:
//! they are written as `null` and read back as blocked.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GrowResult;
use crate::grid::Grid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridDoc {
    pub shape: Vec<usize>,
    pub data: Vec<Option<f64>>,
}

impl GridDoc {
    /// Decode into a grid. `null` becomes NaN.
    pub fn into_grid(self) -> GrowResult<Grid<f64>> {
        let data = self.data.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        Grid::from_shape_vec(&self.shape, data)
    }

    /// Encode a grid. NaN and +-inf become `null`, including infinite seed labels.
    pub fn from_grid(grid: &Grid<f64>) -> Self {
        Self {
            shape: grid.shape.extents(),
            data: grid
                .data
                .iter()
                .map(|&v| v.is_finite().then_some(v))
                .collect(),
        }
    }
}

pub fn load_grid(path: &Path) -> GrowResult<Grid<f64>> {
    let reader = BufReader::new(File::open(path)?);
    let doc: GridDoc = serde_json::from_reader(reader)?;
    doc.into_grid()
}

pub fn save_grid(path: &Path, grid: &Grid<f64>) -> GrowResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, &GridDoc::from_grid(grid))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrowError;

    #[test]
    fn null_is_blocked() {
        let doc: GridDoc = serde_json::from_str(r#"{"shape":[1,3],"data":[1,null,0]}"#).unwrap();
        let g = doc.into_grid().unwrap();
        assert_eq!(g.data[0], 1.0);
        assert!(g.data[1].is_nan());
        assert_eq!(g.data[2], 0.0);
    }

    #[test]
    fn non_finite_cells_encode_as_null() {
        let g = Grid::from_shape_vec(&[1, 3], vec![0.5, f64::INFINITY, f64::NAN]).unwrap();
        let json = serde_json::to_string(&GridDoc::from_grid(&g)).unwrap();
        assert_eq!(json, r#"{"shape":[1,3],"data":[0.5,null,null]}"#);
    }

    #[test]
    fn infinite_seed_label_reads_back_as_blocked() {
        let g = Grid::from_shape_vec(&[1, 2], vec![f64::NEG_INFINITY, 0.0]).unwrap();
        let back = GridDoc::from_grid(&g).into_grid().unwrap();
        assert!(back.data[0].is_nan());
        assert_eq!(back.data[1], 0.0);
    }

    #[test]
    fn overflowing_shape_is_rejected() {
        let doc = GridDoc {
            shape: vec![usize::MAX, 2],
            data: vec![Some(1.0), Some(0.0)],
        };
        assert!(matches!(doc.into_grid(), Err(GrowError::ShapeTooLarge { .. })));
    }

    #[test]
    fn bad_rank_is_rejected() {
        let doc = GridDoc {
            shape: vec![1, 1, 1, 1],
            data: vec![Some(1.0)],
        };
        assert!(matches!(
            doc.into_grid(),
            Err(GrowError::InvalidDimensionality { rank: 4 })
        ));
    }

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir().join(format!("geogrow-io-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("grid.json");

        let g = Grid::from_shape_vec(&[2, 2, 1], vec![1.0, 0.0, f64::NAN, 2.0]).unwrap();
        save_grid(&path, &g).unwrap();
        let back = load_grid(&path).unwrap();
        assert_eq!(back.shape, g.shape);
        assert_eq!(back.data[0], 1.0);
        assert!(back.data[2].is_nan());

        std::fs::remove_dir_all(&dir).ok();
    }
}
