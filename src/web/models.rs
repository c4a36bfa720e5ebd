use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::algorithm::stepwise::{
    RelaxedEdge, RunStatus, ShortestPath, Snapshot, StepReport, StepwiseDijkstra,
};
use crate::graph::{Edge, EdgeMode, Graph, GraphStore};

/// Weight type used by the web layer
pub type Weight = OrderedFloat<f64>;

/// Store shared between a session and its active run
pub type SharedStore = Arc<GraphStore<Weight>>;

/// Engine type held by a session
pub type Run = StepwiseDijkstra<Weight, SharedStore>;

/// Parameters for creating a graph
#[derive(Debug, Deserialize)]
pub struct CreateGraphRequest {
    pub vertex_count: usize,
    #[serde(default = "default_mode")]
    pub mode: EdgeMode,
}

fn default_mode() -> EdgeMode {
    EdgeMode::Undirected
}

/// Parameters for adding an edge
#[derive(Debug, Deserialize)]
pub struct AddEdgeRequest {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// Parameters for starting a run
#[derive(Debug, Deserialize)]
pub struct StartRunRequest {
    pub source: usize,
}

/// An edge for visualization
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeView {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

impl From<&Edge<Weight>> for EdgeView {
    fn from(edge: &Edge<Weight>) -> Self {
        EdgeView { from: edge.from, to: edge.to, weight: edge.weight.into_inner() }
    }
}

impl From<&RelaxedEdge<Weight>> for EdgeView {
    fn from(edge: &RelaxedEdge<Weight>) -> Self {
        EdgeView { from: edge.from, to: edge.to, weight: edge.weight.into_inner() }
    }
}

/// Graph as seen by a renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphView {
    pub id: Uuid,
    pub vertex_count: usize,
    pub mode: EdgeMode,
    pub edges: Vec<EdgeView>,
    pub run_status: Option<RunStatus>,
    pub created_at: DateTime<Utc>,
}

/// Result of one step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepView {
    pub settled_vertex: Option<usize>,
    pub relaxed_edges: Vec<EdgeView>,
    pub status: RunStatus,
}

impl From<&StepReport<Weight>> for StepView {
    fn from(report: &StepReport<Weight>) -> Self {
        StepView {
            settled_vertex: report.settled_vertex,
            relaxed_edges: report.relaxed_edges.iter().map(EdgeView::from).collect(),
            status: report.status,
        }
    }
}

/// Run state after a step; `null` distances are infinite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotView {
    pub source: usize,
    pub distances: Vec<Option<f64>>,
    pub predecessors: Vec<Option<usize>>,
    pub settled: Vec<usize>,
    pub last_relaxed: Vec<EdgeView>,
    pub tree_edges: Vec<EdgeView>,
    pub frontier_empty: bool,
    pub status: RunStatus,
    pub steps: usize,
    pub relaxations: usize,
}

impl From<&Snapshot<Weight>> for SnapshotView {
    fn from(snapshot: &Snapshot<Weight>) -> Self {
        SnapshotView {
            source: snapshot.source,
            distances: snapshot.distances.iter().map(|d| d.map(OrderedFloat::into_inner)).collect(),
            predecessors: snapshot.predecessors.clone(),
            settled: snapshot.settle_order.clone(),
            last_relaxed: snapshot.last_relaxed.iter().map(EdgeView::from).collect(),
            tree_edges: snapshot.tree_edges.iter().map(EdgeView::from).collect(),
            frontier_empty: snapshot.frontier_empty,
            status: snapshot.status,
            steps: snapshot.steps,
            relaxations: snapshot.relaxations,
        }
    }
}

/// Reconstructed path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathView {
    pub target: usize,
    pub vertices: Vec<usize>,
    pub total_distance: f64,
}

impl PathView {
    pub fn new(path: ShortestPath<Weight>) -> Self {
        PathView {
            target: path.vertices.last().copied().unwrap_or_default(),
            vertices: path.vertices,
            total_distance: path.total_distance.into_inner(),
        }
    }
}

/// Entry of the session listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub vertex_count: usize,
    pub run_status: Option<RunStatus>,
    pub created_at: DateTime<Utc>,
}

/// Error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Session holding one graph and at most one run over it
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub graph: SharedStore,
    pub run: Option<Run>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: GraphStore<Weight>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            graph: Arc::new(graph),
            run: None,
            created_at: now,
            last_active: now,
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    pub fn view(&self) -> GraphView {
        GraphView {
            id: self.id,
            vertex_count: self.graph.vertex_count(),
            mode: self.graph.mode(),
            edges: self.graph.edges().iter().map(EdgeView::from).collect(),
            run_status: self.run.as_ref().map(Run::status),
            created_at: self.created_at,
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            vertex_count: self.graph.vertex_count(),
            run_status: self.run.as_ref().map(Run::status),
            created_at: self.created_at,
        }
    }
}
