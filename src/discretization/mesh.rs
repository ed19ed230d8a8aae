/// Material region a mesh node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Oxide,
    Semiconductor,
}

/// A single grid node.
pub struct Node {
    pub position: f64,
    pub region: Region,
    /// Absolute permittivity at this node [F/m]. Piecewise constant per region.
    pub permittivity: f64,
}

/// The complete computational grid: uniformly spaced nodes over [0, L].
pub struct Mesh {
    pub nodes: Vec<Node>,
    pub spacing: f64,
}

impl Mesh {
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Total stack length [m].
    pub fn length(&self) -> f64 {
        self.nodes.last().map_or(0.0, |n| n.position)
    }

    /// Index of the first semiconductor node. The region boundary is a single
    /// crossing, so `first..` is the whole semiconductor slice.
    pub fn first_semiconductor_node(&self) -> usize {
        self.nodes
            .iter()
            .position(|n| n.region == Region::Semiconductor)
            .unwrap_or(self.nodes.len())
    }

    pub fn positions(&self) -> Vec<f64> {
        self.nodes.iter().map(|n| n.position).collect()
    }
}
