//! Redirect arena and nearest-pair collapse.

use nalgebra::Point3;

use crate::centerline::{BoundaryIndices, EdgeList};
use crate::error::{GraphError, Result};

use super::{COLLAPSED_LENGTH, TIE_TOLERANCE};

/// Records point deletions as redirections to surviving points.
///
/// `redirect[i] == i` marks a live point. A deleted point points at the
/// survivor it was merged into, which may itself be deleted later, so lookups
/// follow chains. Chains are only flattened once, by [`compress`](Self::compress).
#[derive(Debug, Clone)]
pub(super) struct RedirectArena {
    redirect: Vec<usize>,
    alive: usize,
}

impl RedirectArena {
    pub(super) fn new(n: usize) -> Self {
        Self {
            redirect: (0..n).collect(),
            alive: n,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.redirect.len()
    }

    pub(super) fn num_alive(&self) -> usize {
        self.alive
    }

    pub(super) fn is_alive(&self, i: usize) -> bool {
        self.redirect[i] == i
    }

    /// The live point `i` has been merged into.
    pub(super) fn resolve(&self, mut i: usize) -> usize {
        while self.redirect[i] != i {
            i = self.redirect[i];
        }
        i
    }

    /// Delete the live point `point`, merging it into `survivor`.
    pub(super) fn delete(&mut self, point: usize, survivor: usize) {
        let survivor = self.resolve(survivor);
        debug_assert!(self.is_alive(point));
        debug_assert_ne!(point, survivor);
        self.redirect[point] = survivor;
        self.alive -= 1;
    }

    fn delete_cap(&mut self, point: usize, survivor: usize) -> Result<()> {
        if !self.is_alive(point) || !self.is_alive(survivor) {
            return Err(GraphError::degenerate(format!(
                "cap trimming overlaps itself at point {}",
                point
            )));
        }
        self.delete(point, survivor);
        Ok(())
    }

    /// Trim `k` points at the inlet and at each outlet.
    ///
    /// Points `inlet..inlet + k` merge into `inlet + k`, points
    /// `outlet - k + 1..=outlet` merge into `outlet - k`. Returns the shifted
    /// boundary.
    pub(super) fn trim_caps(&mut self, boundary: &BoundaryIndices, k: usize) -> Result<BoundaryIndices> {
        if k == 0 {
            return Ok(boundary.clone());
        }

        let n = self.len();
        let inlet = boundary.inlet + k;
        if inlet >= n {
            return Err(GraphError::degenerate(format!(
                "cannot trim {} cap points after inlet {} with {} points",
                k, boundary.inlet, n
            )));
        }
        if let Some(&outlet) = boundary.outlets.iter().find(|&&o| o < k) {
            return Err(GraphError::degenerate(format!(
                "cannot trim {} cap points before outlet {}",
                k, outlet
            )));
        }

        for ip in 0..k {
            self.delete_cap(boundary.inlet + ip, inlet)?;
            for &outlet in &boundary.outlets {
                self.delete_cap(outlet - ip, outlet - k)?;
            }
        }

        Ok(BoundaryIndices::new(
            inlet,
            boundary.outlets.iter().map(|&o| o - k).collect(),
        ))
    }

    /// Collapse the shortest edge `collapses` times.
    ///
    /// The target of the chosen edge is deleted into its source, unless the
    /// target is a boundary point, in which case the source goes. Edges
    /// between two boundary points are never collapsed.
    pub(super) fn collapse(
        &mut self,
        points: &[Point3<f64>],
        edges: &EdgeList,
        boundary: &BoundaryIndices,
        collapses: usize,
    ) -> Result<()> {
        let mut protected = vec![false; self.len()];
        for b in boundary.iter() {
            protected[b] = true;
        }

        let mut lengths = Vec::with_capacity(edges.len());
        for step in 0..collapses {
            lengths.clear();
            lengths.extend(edges.iter().map(|(s, t)| {
                let (s, t) = (self.resolve(s), self.resolve(t));
                let length = (points[t] - points[s]).norm();
                if length < COLLAPSED_LENGTH || (protected[s] && protected[t]) {
                    f64::INFINITY
                } else {
                    length
                }
            }));

            let min = lengths.iter().copied().fold(f64::INFINITY, f64::min);
            let chosen = lengths
                .iter()
                .position(|&l| l - min < TIE_TOLERANCE)
                .ok_or_else(|| {
                    GraphError::degenerate(format!(
                        "no collapsible edge left after {} of {} collapses",
                        step, collapses
                    ))
                })?;

            let (s, t) = edges.get(chosen);
            let (s, t) = (self.resolve(s), self.resolve(t));
            let (remove, keep) = if protected[t] { (s, t) } else { (t, s) };

            log::trace!("collapse {}: point {} into {} (length {:.3e})", step, remove, keep, min);
            self.delete(remove, keep);
        }

        Ok(())
    }

    /// Flatten every chain and return the final redirect map.
    ///
    /// In the result, `map[i] == i` for survivors and `map[i]` is a survivor
    /// for deleted points.
    pub(super) fn compress(mut self) -> Vec<usize> {
        for i in 0..self.redirect.len() {
            let root = self.resolve(i);
            let mut j = i;
            while self.redirect[j] != root {
                let next = self.redirect[j];
                self.redirect[j] = root;
                j = next;
            }
        }
        self.redirect
    }
}
