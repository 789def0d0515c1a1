use crate::model::EdgeRecord;

/// The diagram-wide edge collection and selection, owned outside this crate.
pub trait DiagramStore {
    fn edges(&self) -> &[EdgeRecord];
    fn set_edges(&mut self, edges: Vec<EdgeRecord>);
    fn active_edge_id(&self) -> Option<&str>;
    fn set_active_edge(&mut self, id: &str);

    fn find_edge(&self, id: &str) -> Option<&EdgeRecord> {
        self.edges().iter().find(|e| e.id == id)
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    edges: Vec<EdgeRecord>,
    active: Option<String>,
    writes: u64,
}

impl MemoryStore {
    pub fn new(edges: Vec<EdgeRecord>) -> MemoryStore {
        MemoryStore { edges, active: None, writes: 0 }
    }

    /// Number of `set_edges` calls so far.
    pub fn write_count(&self) -> u64 {
        self.writes
    }

    /// Replaces the mirrored collection without counting it as a write.
    pub fn load(&mut self, edges: Vec<EdgeRecord>) {
        self.edges = edges;
    }

    pub fn clear_active(&mut self) {
        self.active = None;
    }
}

impl DiagramStore for MemoryStore {
    fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    fn set_edges(&mut self, edges: Vec<EdgeRecord>) {
        self.writes += 1;
        self.edges = edges;
    }

    fn active_edge_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn set_active_edge(&mut self, id: &str) {
        self.active = Some(id.to_string());
    }
}

/// Copy of `edges` with `positionY` of the record `id` replaced; `None`
/// when no record matches.
pub fn with_offset(edges: &[EdgeRecord], id: &str, offset: f64) -> Option<Vec<EdgeRecord>> {
    if !edges.iter().any(|e| e.id == id) {
        return None;
    }
    Some(
        edges
            .iter()
            .map(|e| {
                if e.id == id {
                    EdgeRecord { position_y: offset, ..e.clone() }
                } else {
                    e.clone()
                }
            })
            .collect(),
    )
}
