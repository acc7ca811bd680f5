use std::{fmt, result};

use crate::rel::Depth;

/// Statistic type, for [Relation][crate::Relation] instances.
///
/// `n_nodes` and `depths` involve a full tree walk and are filled only
/// by [validate][crate::Relation::validate] calls.
pub struct Stats {
    pub n_count: usize,
    pub node_size: usize,
    pub n_nodes: Option<usize>,
    pub depths: Option<Depth>,
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        let none = "none".to_string();
        let n = self.n_nodes.as_ref().map_or(none.clone(), |x| x.to_string());
        let d = self.depths.as_ref().map_or(none, |x| x.to_string());
        writeln!(
            f,
            "rel = {{ n_count={}, node_size={}, n_nodes={} }}",
            self.n_count, self.node_size, n,
        )?;
        writeln!(f, "rel.depths = {}", d)
    }
}
