//! Clipping of material laws and shoelace moments of the clipped polygons.
//!
//! Clipping a law at a cut strain keeps every vertex below the cut, then
//! appends the cut point on the curve, its projection onto the strain axis,
//! and the curve's first vertex to close the loop. The enclosed area is the
//! zeroth moment (a force per unit Jacobian) and its first moment about the
//! stress axis feeds the lever arms.
//!
//! Batches of cuts share a single `(batch, n + 2, 2)` buffer. Rows past an
//! entry's own vertex count repeat its closing vertex, so every padding edge
//! has zero length and adds exactly nothing to either sum.

use ndarray::{Array1, Array2, Array3, ArrayView2, ArrayView3, Axis, s};

use crate::{MaterialLaw, error::DomainError};

/// The clipped polygon of a single cut.
#[derive(Debug, Clone, PartialEq)]
pub struct ClippedPolygon {
    vertices: Array2<f64>,
}

impl ClippedPolygon {
    /// Closed polyline as `(strain, stress)` rows; the last row repeats the first.
    #[must_use]
    pub fn vertices(&self) -> ArrayView2<'_, f64> {
        self.vertices.view()
    }

    /// Zeroth moment (enclosed area).
    #[must_use]
    pub fn area(&self) -> f64 {
        let (m0, _) = shoelace(self.vertices.view());
        m0
    }

    /// First moment about the stress axis.
    #[must_use]
    pub fn first_moment(&self) -> f64 {
        let (_, m1) = shoelace(self.vertices.view());
        m1
    }
}

/// Clipped polygons for a batch of cuts, padded to a common vertex count.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedPolygons {
    buffer: Array3<f64>,
    counts: Vec<usize>,
}

impl PaddedPolygons {
    /// The `(batch, n + 2, 2)` vertex buffer.
    #[must_use]
    pub fn buffer(&self) -> ArrayView3<'_, f64> {
        self.buffer.view()
    }

    /// True vertex count of each entry, closing vertex included.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Zeroth moments, one per entry.
    #[must_use]
    pub fn m0(&self) -> Array1<f64> {
        let (cross, _) = self.edge_terms();
        cross.sum_axis(Axis(1)).mapv(|sum| 0.5 * sum.abs())
    }

    /// First moments, one per entry.
    #[must_use]
    pub fn m1(&self) -> Array1<f64> {
        let (cross, x_sum) = self.edge_terms();
        (&x_sum * &cross)
            .sum_axis(Axis(1))
            .mapv(|sum| sum.abs() / 6.0)
    }

    /// Per-edge cross products and strain sums, shape `(batch, n + 1)`.
    fn edge_terms(&self) -> (Array2<f64>, Array2<f64>) {
        let x0 = self.buffer.slice(s![.., ..-1, 0]);
        let x1 = self.buffer.slice(s![.., 1.., 0]);
        let y0 = self.buffer.slice(s![.., ..-1, 1]);
        let y1 = self.buffer.slice(s![.., 1.., 1]);

        let cross = &x0 * &y1 - &x1 * &y0;
        let x_sum = &x0 + &x1;
        (cross, x_sum)
    }
}

impl MaterialLaw {
    /// Clips the law at a single cut strain.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if `cut` lies outside the law's domain.
    pub fn clip(&self, cut: f64) -> Result<ClippedPolygon, DomainError> {
        self.check_domain(cut)?;
        let index = self.insertion_index(cut);
        let stress = self.stress_at_cut(index, cut)?;

        let mut vertices = Array2::zeros((index + 3, 2));
        self.write_polygon(&mut vertices, index, cut, stress);
        Ok(ClippedPolygon { vertices })
    }

    /// Clips the law independently at every cut of a batch.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError`] among the cuts.
    pub fn clip_batch(&self, cuts: &Array1<f64>) -> Result<PaddedPolygons, DomainError> {
        let width = self.len() + 2;
        let mut buffer = Array3::zeros((cuts.len(), width, 2));
        let mut counts = Vec::with_capacity(cuts.len());

        for (mut polygon, &cut) in buffer.outer_iter_mut().zip(cuts) {
            self.check_domain(cut)?;
            let index = self.insertion_index(cut);
            let stress = self.stress_at_cut(index, cut)?;

            let count = index + 3;
            self.write_polygon(&mut polygon.slice_mut(s![..count, ..]), index, cut, stress);

            polygon
                .slice_mut(s![count.., ..])
                .assign(&self.vertices().row(0));
            counts.push(count);
        }

        Ok(PaddedPolygons { buffer, counts })
    }

    /// Area under the whole curve, the strain energy density at `max_strain`.
    #[must_use]
    pub fn full_area(&self) -> f64 {
        let index = self.len() - 1;
        let stress = self.vertices()[[index, 1]];

        let mut vertices = Array2::zeros((index + 3, 2));
        self.write_polygon(&mut vertices, index, self.max_strain(), stress);
        let (m0, _) = shoelace(vertices.view());
        m0
    }

    /// Fills `index + 3` rows: kept vertices, cut point, projection, closure.
    fn write_polygon<S>(
        &self,
        out: &mut ndarray::ArrayBase<S, ndarray::Ix2>,
        index: usize,
        cut: f64,
        stress: f64,
    ) where
        S: ndarray::DataMut<Elem = f64>,
    {
        let vertices = self.vertices();
        out.slice_mut(s![..index, ..])
            .assign(&vertices.slice(s![..index, ..]));
        out[[index, 0]] = cut;
        out[[index, 1]] = stress;
        out[[index + 1, 0]] = cut;
        out[[index + 1, 1]] = 0.0;
        out.row_mut(index + 2).assign(&vertices.row(0));
    }
}

/// Shoelace area and first moment of a closed polyline.
fn shoelace(vertices: ArrayView2<'_, f64>) -> (f64, f64) {
    let (mut cross_sum, mut moment_sum) = (0.0, 0.0);
    for k in 0..vertices.nrows().saturating_sub(1) {
        let (x0, y0) = (vertices[[k, 0]], vertices[[k, 1]]);
        let (x1, y1) = (vertices[[k + 1, 0]], vertices[[k + 1, 1]]);
        let cross = x0 * y1 - x1 * y0;
        cross_sum += cross;
        moment_sum += (x0 + x1) * cross;
    }
    (0.5 * cross_sum.abs(), moment_sum.abs() / 6.0)
}
