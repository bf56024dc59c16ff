use rand::Rng;
use serde::{Serialize, Deserialize};

/// Highest rank the engine tracks. The network only exercises ranks 1 and 2,
/// but the metadata arrays leave room for four axes.
pub const MAX_RANK: usize = 4;

/// Row-major strides for a densely packed tensor: the last axis steps by 1,
/// each axis before it by the extent of everything after it.
fn canonical_strides(rank: usize, shape: &[usize; MAX_RANK]) -> [usize; MAX_RANK] {
    let mut stride = [0; MAX_RANK];
    let mut step = 1;
    for i in (0..rank).rev() {
        stride[i] = step;
        step *= shape[i];
    }
    stride
}

/// Read access to a strided float buffer. All element addressing goes through
/// `offset1`/`offset2`, so the stride arithmetic is defined exactly once and
/// shared by every operation, whether the storage is owned or borrowed.
pub trait TensorRead {
    fn rank(&self) -> usize;
    fn shape(&self) -> &[usize];
    fn stride(&self) -> &[usize];
    fn size(&self) -> usize;
    fn data(&self) -> &[f32];

    /// Buffer offset of element `i` of a rank-1 tensor.
    fn offset1(&self, i: usize) -> usize {
        assert_eq!(self.rank(), 1, "offset1: rank-1 access on a rank-{} tensor", self.rank());
        assert!(i < self.shape()[0], "offset1: index {} out of range {}", i, self.shape()[0]);
        i * self.stride()[0]
    }

    /// Buffer offset of element `(i, j)` of a rank-2 tensor.
    fn offset2(&self, i: usize, j: usize) -> usize {
        assert_eq!(self.rank(), 2, "offset2: rank-2 access on a rank-{} tensor", self.rank());
        assert!(
            i < self.shape()[0] && j < self.shape()[1],
            "offset2: index ({}, {}) out of range ({}, {})",
            i, j, self.shape()[0], self.shape()[1]
        );
        i * self.stride()[0] + j * self.stride()[1]
    }

    fn at1(&self, i: usize) -> f32 {
        self.data()[self.offset1(i)]
    }

    fn at2(&self, i: usize, j: usize) -> f32 {
        self.data()[self.offset2(i, j)]
    }

    fn rows(&self) -> usize {
        assert_eq!(self.rank(), 2, "rows: rank-{} tensor has no row count", self.rank());
        self.shape()[0]
    }

    fn cols(&self) -> usize {
        assert_eq!(self.rank(), 2, "cols: rank-{} tensor has no column count", self.rank());
        self.shape()[1]
    }

    /// Rank-1 view aliasing row `index` of a rank-2 tensor. The view starts
    /// at the row's first element and steps by the source's column stride,
    /// so it reads correctly through both dense matrices and strided dataset
    /// windows.
    fn row(&self, index: usize) -> TensorView<'_> {
        assert_eq!(self.rank(), 2, "row: rank-{} tensor has no rows", self.rank());
        assert!(index < self.rows(), "row: index {} out of range {}", index, self.rows());
        let start = index * self.stride()[0];
        TensorView {
            rank: 1,
            shape: [self.cols(), 0, 0, 0],
            stride: [self.stride()[1], 0, 0, 0],
            size: self.cols(),
            data: &self.data()[start..],
        }
    }

    /// Rank-1 sub-view of a rank-1 tensor: `len` elements starting at
    /// `offset`, inheriting the stride. Splits a concatenated
    /// `[features…, labels…]` row without copying.
    fn slice(&self, offset: usize, len: usize) -> TensorView<'_> {
        assert_eq!(self.rank(), 1, "slice: rank-{} tensor cannot be sliced as a row", self.rank());
        assert!(
            offset + len <= self.shape()[0],
            "slice: {}..{} out of range {}",
            offset, offset + len, self.shape()[0]
        );
        let start = offset * self.stride()[0];
        TensorView {
            rank: 1,
            shape: [len, 0, 0, 0],
            stride: [self.stride()[0], 0, 0, 0],
            size: len,
            data: &self.data()[start..],
        }
    }
}

/// Write access on top of [`TensorRead`], again routed through the shared
/// offset functions.
pub trait TensorWrite: TensorRead {
    fn data_mut(&mut self) -> &mut [f32];

    fn at1_mut(&mut self, i: usize) -> &mut f32 {
        let offset = self.offset1(i);
        &mut self.data_mut()[offset]
    }

    fn at2_mut(&mut self, i: usize, j: usize) -> &mut f32 {
        let offset = self.offset2(i, j);
        &mut self.data_mut()[offset]
    }
}

/// An owning tensor: flat `Vec<f32>` storage with canonical row-major
/// strides. Always densely packed; releasing the buffer is `Drop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tensor {
    rank: usize,
    shape: [usize; MAX_RANK],
    stride: [usize; MAX_RANK],
    size: usize,
    data: Vec<f32>,
}

impl Tensor {
    /// Allocates a zero-initialized tensor of the given shape.
    pub fn zeros(shape: &[usize]) -> Tensor {
        assert!(
            !shape.is_empty() && shape.len() <= MAX_RANK,
            "tensor alloc: rank {} outside supported range 1..={}",
            shape.len(), MAX_RANK
        );
        let rank = shape.len();
        let mut sh = [0; MAX_RANK];
        sh[..rank].copy_from_slice(shape);
        let size = shape.iter().product();
        Tensor {
            rank,
            shape: sh,
            stride: canonical_strides(rank, &sh),
            size,
            data: vec![0.0; size],
        }
    }

    /// Rank-2 convenience constructor.
    pub fn matrix(rows: usize, cols: usize) -> Tensor {
        Tensor::zeros(&[rows, cols])
    }

    /// Overwrites every element in linear buffer order. Owning tensors are
    /// always densely packed, so this equals a strided traversal.
    pub fn fill(&mut self, value: f32) {
        for x in &mut self.data {
            *x = value;
        }
    }

    /// Independent uniform draws in `[low, high)` from a caller-seeded
    /// generator, in linear buffer order.
    pub fn randomize(&mut self, rng: &mut impl Rng, low: f32, high: f32) {
        for x in &mut self.data {
            *x = rng.gen::<f32>() * (high - low) + low;
        }
    }

    /// Non-owning view of the whole tensor.
    pub fn view(&self) -> TensorView<'_> {
        TensorView {
            rank: self.rank,
            shape: self.shape,
            stride: self.stride,
            size: self.size,
            data: &self.data,
        }
    }
}

impl TensorRead for Tensor {
    fn rank(&self) -> usize {
        self.rank
    }

    fn shape(&self) -> &[usize] {
        &self.shape[..self.rank]
    }

    fn stride(&self) -> &[usize] {
        &self.stride[..self.rank]
    }

    fn size(&self) -> usize {
        self.size
    }

    fn data(&self) -> &[f32] {
        &self.data
    }
}

impl TensorWrite for Tensor {
    fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}

/// A non-owning tensor: borrowed storage with arbitrary strides. Expresses
/// zero-copy sub-windows of foreign memory, e.g. a dataset laid out as
/// `[feature, feature, label]` per row with a row stride equal to the row
/// width. The lifetime ties the view to the buffer it aliases.
#[derive(Debug, Clone, Copy)]
pub struct TensorView<'a> {
    rank: usize,
    shape: [usize; MAX_RANK],
    stride: [usize; MAX_RANK],
    size: usize,
    data: &'a [f32],
}

impl<'a> TensorView<'a> {
    /// View over an external buffer with caller-chosen strides. The furthest
    /// strided offset must fall inside `data`.
    pub fn strided(data: &'a [f32], shape: &[usize], stride: &[usize]) -> TensorView<'a> {
        assert!(
            !shape.is_empty() && shape.len() <= MAX_RANK,
            "tensor view: rank {} outside supported range 1..={}",
            shape.len(), MAX_RANK
        );
        assert_eq!(
            shape.len(), stride.len(),
            "tensor view: {} shape axes but {} strides",
            shape.len(), stride.len()
        );
        let rank = shape.len();
        let size: usize = shape.iter().product();
        assert!(size > 0, "tensor view: empty shape {:?}", shape);
        let furthest: usize = shape.iter().zip(stride).map(|(&n, &s)| (n - 1) * s).sum();
        assert!(
            furthest < data.len(),
            "tensor view: shape {:?} with stride {:?} overruns a buffer of {} elements",
            shape, stride, data.len()
        );
        let mut sh = [0; MAX_RANK];
        let mut st = [0; MAX_RANK];
        sh[..rank].copy_from_slice(shape);
        st[..rank].copy_from_slice(stride);
        TensorView { rank, shape: sh, stride: st, size, data }
    }

    /// Rank-2 window over a flat buffer, e.g.
    /// `TensorView::matrix(&table, rows, cols, row_stride, 1)`.
    pub fn matrix(
        data: &'a [f32],
        rows: usize,
        cols: usize,
        row_stride: usize,
        col_stride: usize,
    ) -> TensorView<'a> {
        TensorView::strided(data, &[rows, cols], &[row_stride, col_stride])
    }
}

impl TensorRead for TensorView<'_> {
    fn rank(&self) -> usize {
        self.rank
    }

    fn shape(&self) -> &[usize] {
        &self.shape[..self.rank]
    }

    fn stride(&self) -> &[usize] {
        &self.stride[..self.rank]
    }

    fn size(&self) -> usize {
        self.size
    }

    fn data(&self) -> &[f32] {
        self.data
    }
}
