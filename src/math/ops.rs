//! Strided tensor operations shared by the network: shape-polymorphic copy,
//! dense matrix product, elementwise accumulate, and in-place activation.
//! Every precondition violation is a caller bug and panics with the
//! mismatched dimensions; nothing here is recoverable.

use crate::math::tensor::{TensorRead, TensorWrite};

/// Element-wise copy honoring both tensors' strides. Exactly three shape
/// combinations are supported:
///
/// 1. rank-2 destination with a single row ← rank-1 source (embedding a row
///    vector into a 1×N matrix slot),
/// 2. rank-1 destination ← single-row rank-2 source (the mirror case),
/// 3. rank-2 ← rank-2 with matching shapes.
///
/// Anything else panics rather than silently producing wrong data.
pub fn copy(dst: &mut impl TensorWrite, src: &impl TensorRead) {
    assert_eq!(
        dst.size(), src.size(),
        "copy: size mismatch, {} vs {}",
        dst.size(), src.size()
    );
    match (dst.rank(), src.rank()) {
        (2, 1) if dst.rows() == 1 => {
            for i in 0..src.shape()[0] {
                *dst.at2_mut(0, i) = src.at1(i);
            }
        }
        (1, 2) if src.rows() == 1 => {
            for i in 0..dst.shape()[0] {
                *dst.at1_mut(i) = src.at2(0, i);
            }
        }
        (2, 2) => {
            assert_eq!(
                dst.shape(), src.shape(),
                "copy: shape mismatch, {:?} vs {:?}",
                dst.shape(), src.shape()
            );
            for i in 0..dst.rows() {
                for j in 0..dst.cols() {
                    *dst.at2_mut(i, j) = src.at2(i, j);
                }
            }
        }
        (d, s) => panic!("copy: unhandled rank combination {d} <- {s}"),
    }
}

/// Dense matrix product `dst = a · b`. Each output cell accumulates over `k`
/// in increasing order into a scalar, which keeps the floating-point
/// summation order fixed and finite-difference/backprop comparisons
/// reproducible.
pub fn mat_mul(dst: &mut impl TensorWrite, a: &impl TensorRead, b: &impl TensorRead) {
    assert_eq!(
        a.cols(), b.rows(),
        "mat_mul: inner dimension mismatch, {} vs {}",
        a.cols(), b.rows()
    );
    assert_eq!(
        dst.rows(), a.rows(),
        "mat_mul: destination has {} rows, expected {}",
        dst.rows(), a.rows()
    );
    assert_eq!(
        dst.cols(), b.cols(),
        "mat_mul: destination has {} columns, expected {}",
        dst.cols(), b.cols()
    );
    for i in 0..dst.rows() {
        for j in 0..dst.cols() {
            let mut sum = 0.0;
            for k in 0..a.cols() {
                sum += a.at2(i, k) * b.at2(k, j);
            }
            *dst.at2_mut(i, j) = sum;
        }
    }
}

/// Elementwise accumulate `dst[i, j] += a[i, j]` over identically-shaped
/// rank-2 tensors.
pub fn add_assign(dst: &mut impl TensorWrite, a: &impl TensorRead) {
    assert_eq!(dst.rank(), 2, "add_assign: rank-{} destination", dst.rank());
    assert_eq!(
        dst.shape(), a.shape(),
        "add_assign: shape mismatch, {:?} vs {:?}",
        dst.shape(), a.shape()
    );
    for i in 0..dst.rows() {
        for j in 0..dst.cols() {
            *dst.at2_mut(i, j) += a.at2(i, j);
        }
    }
}

/// Applies `f` to every cell in place, through the strided accessor, so it
/// behaves the same on owning tensors and on views.
pub fn activate(dst: &mut impl TensorWrite, f: impl Fn(f32) -> f32) {
    match dst.rank() {
        1 => {
            for i in 0..dst.shape()[0] {
                let v = dst.at1(i);
                *dst.at1_mut(i) = f(v);
            }
        }
        2 => {
            for i in 0..dst.rows() {
                for j in 0..dst.cols() {
                    let v = dst.at2(i, j);
                    *dst.at2_mut(i, j) = f(v);
                }
            }
        }
        r => panic!("activate: unhandled rank {r}"),
    }
}
