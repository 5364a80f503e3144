use crate::error::{GrowError, GrowResult};

/// Extents of a rank-2 or rank-3 grid. Rank-2 grids carry `depth == 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    rank: usize,
    dims: [usize; 3],
}

impl Shape {
    /// Build a shape from caller-supplied extents. Only rank 2 and 3 are accepted,
    /// and the cell count must fit in an `i64` so neighbour stepping cannot wrap.
    pub fn new(extents: &[usize]) -> GrowResult<Self> {
        let shape = match *extents {
            [rows, cols] => Self::d2(rows, cols),
            [rows, cols, depth] => Self::d3(rows, cols, depth),
            _ => {
                return Err(GrowError::InvalidDimensionality {
                    rank: extents.len(),
                });
            }
        };
        let too_large = || GrowError::ShapeTooLarge {
            extents: extents.to_vec(),
        };
        let cells = shape
            .dims
            .iter()
            .try_fold(1usize, |acc, &d| acc.checked_mul(d))
            .ok_or_else(too_large)?;
        if i64::try_from(cells).is_err() {
            return Err(too_large());
        }
        Ok(shape)
    }

    /// Unchecked constructors for extents known to be small.
    pub fn d2(rows: usize, cols: usize) -> Self {
        Self {
            rank: 2,
            dims: [rows, cols, 1],
        }
    }

    pub fn d3(rows: usize, cols: usize, depth: usize) -> Self {
        Self {
            rank: 3,
            dims: [rows, cols, depth],
        }
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.dims[0]
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.dims[1]
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.dims[2]
    }

    /// Extents as the caller sees them (two entries for rank 2).
    pub fn extents(&self) -> Vec<usize> {
        self.dims[..self.rank].to_vec()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dims[0] * self.dims[1] * self.dims[2]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major linear index.
    #[inline]
    pub fn idx(&self, r: usize, c: usize, z: usize) -> usize {
        debug_assert!(r < self.dims[0] && c < self.dims[1] && z < self.dims[2]);
        (r * self.dims[1] + c) * self.dims[2] + z
    }

    /// Inverse of [`Shape::idx`].
    #[inline]
    pub fn coord(&self, i: usize) -> [usize; 3] {
        let z = i % self.dims[2];
        let rc = i / self.dims[2];
        [rc / self.dims[1], rc % self.dims[1], z]
    }

    /// Step from linear index `i` by `offset`. Returns None when the step leaves the grid.
    #[inline]
    pub fn step(&self, i: usize, offset: [i32; 3]) -> Option<usize> {
        let at = self.coord(i);
        let mut out = [0usize; 3];
        for axis in 0..3 {
            let v = at[axis] as i64 + offset[axis] as i64;
            if v < 0 || v >= self.dims[axis] as i64 {
                return None;
            }
            out[axis] = v as usize;
        }
        Some(self.idx(out[0], out[1], out[2]))
    }
}

/// Row-major flat grid over a [`Shape`]. No per-cell objects.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub shape: Shape,
}

impl<T: Copy> Grid<T> {
    pub fn filled(shape: Shape, v: T) -> Self {
        Self {
            data: vec![v; shape.len()],
            shape,
        }
    }

    /// Wrap row-major `data` with caller-supplied extents.
    pub fn from_shape_vec(extents: &[usize], data: Vec<T>) -> GrowResult<Self> {
        let shape = Shape::new(extents)?;
        if shape.len() != data.len() {
            return Err(GrowError::ShapeMismatch {
                expected: shape.len(),
                actual: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, r: usize, c: usize, z: usize) -> T {
        self.data[self.shape.idx(r, c, z)]
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, z: usize, v: T) {
        let i = self.shape.idx(r, c, z);
        self.data[i] = v;
    }

    /// Same-shape grid with `f` applied to every cell.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Grid<U> {
        Grid {
            data: self.data.iter().map(|&v| f(v)).collect(),
            shape: self.shape,
        }
    }
}
