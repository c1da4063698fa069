//! Edge lists over point indices.

/// A list of edges stored as two parallel index arrays.
///
/// Edges are interpreted as undirected, but the stored orientation is kept:
/// for an input centerline it runs downstream (source upstream of target),
/// and in a bidirected list each direction carries its own features.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    sources: Vec<usize>,
    targets: Vec<usize>,
}

impl EdgeList {
    /// Create an empty edge list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty edge list with room for `capacity` edges.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sources: Vec::with_capacity(capacity),
            targets: Vec::with_capacity(capacity),
        }
    }

    /// Build an edge list from parallel source/target arrays.
    ///
    /// Returns `None` if the arrays differ in length.
    pub fn from_parts(sources: Vec<usize>, targets: Vec<usize>) -> Option<Self> {
        (sources.len() == targets.len()).then_some(Self { sources, targets })
    }

    /// Append an edge.
    #[inline]
    pub fn push(&mut self, source: usize, target: usize) {
        self.sources.push(source);
        self.targets.push(target);
    }

    /// Number of edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source endpoints.
    #[inline]
    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    /// Target endpoints.
    #[inline]
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Endpoints of edge `i`.
    #[inline]
    pub fn get(&self, i: usize) -> (usize, usize) {
        (self.sources[i], self.targets[i])
    }

    /// Iterate over `(source, target)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.sources.iter().copied().zip(self.targets.iter().copied())
    }

    /// The largest index referenced by any edge.
    pub fn max_index(&self) -> Option<usize> {
        self.sources.iter().chain(&self.targets).copied().max()
    }

    /// Return the list followed by its endpoint-swapped copy.
    ///
    /// Edge `i` and edge `i + len()` of the result are the two directions of
    /// the same undirected edge.
    pub fn bidirected(&self) -> Self {
        let mut sources = Vec::with_capacity(2 * self.len());
        sources.extend_from_slice(&self.sources);
        sources.extend_from_slice(&self.targets);

        let mut targets = Vec::with_capacity(2 * self.len());
        targets.extend_from_slice(&self.targets);
        targets.extend_from_slice(&self.sources);

        Self { sources, targets }
    }

    /// Append all edges of `other`.
    pub fn extend_from(&mut self, other: &EdgeList) {
        self.sources.extend_from_slice(&other.sources);
        self.targets.extend_from_slice(&other.targets);
    }

    /// Points that are the target of some edge but never a source.
    ///
    /// On a downstream-oriented centerline these are the outlets. The order
    /// is that of first appearance as a target, without duplicates.
    pub fn terminal_targets(&self) -> Vec<usize> {
        let n = self.max_index().map_or(0, |m| m + 1);
        let mut is_source = vec![false; n];
        for &s in &self.sources {
            is_source[s] = true;
        }

        let mut seen = vec![false; n];
        let mut terminals = Vec::new();
        for &t in &self.targets {
            if !is_source[t] && !seen[t] {
                seen[t] = true;
                terminals.push(t);
            }
        }
        terminals
    }
}

impl FromIterator<(usize, usize)> for EdgeList {
    fn from_iter<T: IntoIterator<Item = (usize, usize)>>(iter: T) -> Self {
        let (sources, targets) = iter.into_iter().unzip();
        Self { sources, targets }
    }
}
