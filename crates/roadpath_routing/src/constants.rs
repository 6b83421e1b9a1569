use crate::types::{EdgeId, NodeIndex, Weight};

pub(crate) const INVALID_NODE: NodeIndex = usize::MAX;
pub(crate) const INVALID_EDGE: EdgeId = usize::MAX;
pub(crate) const MAX_WEIGHT: Weight = f64::INFINITY;

/// Weight of an arc whose length is absent from the input.
pub const DEFAULT_EDGE_WEIGHT: Weight = 1.0;
