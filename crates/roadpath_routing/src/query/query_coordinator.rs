use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::{Condvar, Mutex, RwLock};
use tracing::{debug, warn};

use crate::error::{QueryError, RoutingError};
use crate::location_index::LocationIndex;
use crate::point::Point;
use crate::road_graph::RoadGraph;
use crate::routing::dijkstra::shortest_path;
use crate::routing::routing_path::RoutingPath;
use crate::snap::Snap;
use crate::timer_debug;
use crate::types::NodeId;

use super::selection::{QueryState, Selection};

pub type PathSearch =
    dyn Fn(&RoadGraph, NodeId, NodeId) -> Result<RoutingPath, RoutingError> + Send + Sync;

/// Search result for one selection pair, tagged with the generation it was requested under.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedPath {
    generation: u64,
    start: NodeId,
    end: NodeId,
    result: Result<RoutingPath, RoutingError>,
}

impl PublishedPath {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn start(&self) -> NodeId {
        self.start
    }

    pub fn end(&self) -> NodeId {
        self.end
    }

    /// `Err(RoutingError::NoPathFound)` when the end cannot be reached, nothing to draw then.
    pub fn result(&self) -> &Result<RoutingPath, RoutingError> {
        &self.result
    }

    pub fn path(&self) -> Option<&RoutingPath> {
        self.result.as_ref().ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathJob {
    generation: u64,
    start: NodeId,
    end: NodeId,
}

#[derive(Default)]
struct CoordinatorState {
    selection: Selection,
    state: QueryState,
    generation: u64,
}

/// Latest-wins mailbox of the worker. A job replaced before it starts never runs.
#[derive(Default)]
struct JobSlot {
    pending: Option<PathJob>,
    shutdown: bool,
}

struct Shared {
    graph: Arc<RoadGraph>,
    search: Box<PathSearch>,

    state: Mutex<CoordinatorState>,
    state_changed: Condvar,

    // Only written while `state` is locked
    published: RwLock<Option<Arc<PublishedPath>>>,

    jobs: Mutex<JobSlot>,
    job_available: Condvar,
}

impl Shared {
    fn is_live(&self, generation: u64) -> bool {
        let state = self.state.lock();
        state.generation == generation && state.state == QueryState::Computing
    }

    fn publish(&self, job: PathJob, result: Result<RoutingPath, RoutingError>) {
        let mut state = self.state.lock();

        if state.generation != job.generation || state.state != QueryState::Computing {
            debug!(
                "Discarding result for {} -> {} (generation {}, live generation {})",
                job.start, job.end, job.generation, state.generation
            );
            return;
        }

        *self.published.write() = Some(Arc::new(PublishedPath {
            generation: job.generation,
            start: job.start,
            end: job.end,
            result,
        }));
        state.state = QueryState::Ready;

        debug!(
            "Published path {} -> {} for generation {}",
            job.start, job.end, job.generation
        );

        self.state_changed.notify_all();
    }

    fn dispatch(&self, job: PathJob) {
        let mut slot = self.jobs.lock();
        if let Some(replaced) = slot.pending.replace(job) {
            debug!(
                "Dropping queued search {} -> {} (generation {})",
                replaced.start, replaced.end, replaced.generation
            );
        }
        self.job_available.notify_one();
    }

    fn next_job(&self) -> Option<PathJob> {
        let mut slot = self.jobs.lock();
        loop {
            if slot.shutdown {
                return None;
            }
            if let Some(job) = slot.pending.take() {
                return Some(job);
            }
            self.job_available.wait(&mut slot);
        }
    }

    fn run_worker(&self) {
        while let Some(job) = self.next_job() {
            if !self.is_live(job.generation) {
                continue;
            }

            let result = timer_debug!(
                "Path search",
                (self.search)(self.graph.as_ref(), job.start, job.end)
            );

            self.publish(job, result);
        }

        debug!("Path search worker stopped");
    }
}

/// Turns node picks into path searches running on a background worker.
///
/// Picking never blocks on a search. Every change of the selection bumps the generation,
/// and a search result is only published when its generation is still the live one, so the
/// published path always belongs to the pair currently selected.
pub struct QueryCoordinator {
    shared: Arc<Shared>,
    index: LocationIndex,
    worker: Option<JoinHandle<()>>,
}

impl QueryCoordinator {
    pub fn new(graph: Arc<RoadGraph>) -> Result<QueryCoordinator, QueryError> {
        Self::with_search(graph, |graph, start, end| shortest_path(graph, start, end))
    }

    pub fn with_search<F>(graph: Arc<RoadGraph>, search: F) -> Result<QueryCoordinator, QueryError>
    where
        F: Fn(&RoadGraph, NodeId, NodeId) -> Result<RoutingPath, RoutingError>
            + Send
            + Sync
            + 'static,
    {
        let index = LocationIndex::build_from_graph(graph.as_ref());

        let shared = Arc::new(Shared {
            graph,
            search: Box::new(search),
            state: Mutex::new(CoordinatorState::default()),
            state_changed: Condvar::new(),
            published: RwLock::new(None),
            jobs: Mutex::new(JobSlot::default()),
            job_available: Condvar::new(),
        });

        let worker_shared = Arc::clone(&shared);
        let worker = thread::Builder::new()
            .name("path-search".to_string())
            .spawn(move || worker_shared.run_worker())?;

        Ok(QueryCoordinator {
            shared,
            index,
            worker: Some(worker),
        })
    }

    pub fn graph(&self) -> &Arc<RoadGraph> {
        &self.shared.graph
    }

    pub fn location_index(&self) -> &LocationIndex {
        &self.index
    }

    /// Adds a node to the selection and returns the resulting state.
    ///
    /// - `Idle` becomes `AwaitingSecond`.
    /// - `AwaitingSecond` becomes `Computing` and dispatches a search for the pair.
    /// - `Computing` keeps the previous end as the new start, the in-flight result is dropped.
    /// - `Ready` starts a new selection with this node.
    pub fn select_node(&self, node_id: NodeId) -> Result<QueryState, RoutingError> {
        if !self.shared.graph.contains(node_id) {
            return Err(RoutingError::UnknownNode(node_id));
        }

        let mut state = self.shared.state.lock();

        let (selection, next_state) = match (state.selection, state.state) {
            (Selection::One(start), _) => (Selection::Two(start, node_id), QueryState::Computing),
            (Selection::Two(_, end), QueryState::Computing) => {
                (Selection::Two(end, node_id), QueryState::Computing)
            }
            _ => (Selection::One(node_id), QueryState::AwaitingSecond),
        };

        state.generation += 1;
        state.selection = selection;
        state.state = next_state;
        *self.shared.published.write() = None;

        debug!(
            "Selection {:?} is {:?} (generation {})",
            selection, next_state, state.generation
        );

        if let Selection::Two(start, end) = selection {
            self.shared.dispatch(PathJob {
                generation: state.generation,
                start,
                end,
            });
        }

        Ok(next_state)
    }

    /// Snaps `point` to the closest node and selects it. `None` when the graph is empty.
    pub fn select_point(&self, point: &Point) -> Option<Snap> {
        let snap = self.index.snap(point)?;

        match self.select_node(snap.node_id()) {
            Ok(_) => Some(snap),
            Err(error) => {
                warn!("Snapped to a node missing from the graph: {}", error);
                None
            }
        }
    }

    /// Clears the selection. A search still running is ignored when it completes.
    pub fn reset(&self) {
        let mut state = self.shared.state.lock();
        state.generation += 1;
        state.selection = Selection::Empty;
        state.state = QueryState::Idle;
        *self.shared.published.write() = None;
        self.shared.state_changed.notify_all();

        debug!("Selection reset (generation {})", state.generation);
    }

    pub fn state(&self) -> QueryState {
        self.shared.state.lock().state
    }

    pub fn selection(&self) -> Selection {
        self.shared.state.lock().selection
    }

    pub fn generation(&self) -> u64 {
        self.shared.state.lock().generation
    }

    /// Result of the live pair once it is `Ready`. Never blocks on a running search.
    pub fn latest_path(&self) -> Option<Arc<PublishedPath>> {
        self.shared.published.read().clone()
    }

    /// Blocks until the live pair leaves `Computing` or `timeout` elapses.
    pub fn wait_for_ready(&self, timeout: Duration) -> Option<Arc<PublishedPath>> {
        let mut state = self.shared.state.lock();
        self.shared.state_changed.wait_while_for(
            &mut state,
            |state| state.state == QueryState::Computing,
            timeout,
        );

        if state.state == QueryState::Ready {
            self.shared.published.read().clone()
        } else {
            None
        }
    }
}

impl Drop for QueryCoordinator {
    fn drop(&mut self) {
        {
            let mut slot = self.shared.jobs.lock();
            slot.shutdown = true;
            self.shared.job_available.notify_all();
        }

        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Path search worker panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_graph_utils::test_graph::{grid_graph, id, line_graph, romania_graph};

    const TIMEOUT: Duration = Duration::from_secs(10);

    /// Holds back searches for one pair until opened.
    #[derive(Default)]
    struct Gate {
        state: Mutex<(bool, bool)>, // (entered, open)
        changed: Condvar,
    }

    impl Gate {
        fn pass(&self) {
            let mut state = self.state.lock();
            state.0 = true;
            self.changed.notify_all();
            self.changed.wait_while(&mut state, |(_, open)| !*open);
        }

        fn wait_entered(&self) {
            let mut state = self.state.lock();
            self.changed
                .wait_while_for(&mut state, |(entered, _)| !*entered, TIMEOUT);
            assert!(state.0, "search never started");
        }

        fn open(&self) {
            let mut state = self.state.lock();
            state.1 = true;
            self.changed.notify_all();
        }
    }

    type Calls = Arc<Mutex<Vec<(NodeId, NodeId)>>>;

    fn gated_coordinator(
        graph: RoadGraph,
        gated_pair: (NodeId, NodeId),
    ) -> (QueryCoordinator, Arc<Gate>, Calls) {
        let gate = Arc::new(Gate::default());
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));

        let search_gate = Arc::clone(&gate);
        let search_calls = Arc::clone(&calls);
        let coordinator =
            QueryCoordinator::with_search(Arc::new(graph), move |graph, start, end| {
                search_calls.lock().push((start, end));
                if (start, end) == gated_pair {
                    search_gate.pass();
                }
                shortest_path(graph, start, end)
            })
            .unwrap();

        (coordinator, gate, calls)
    }

    #[test]
    fn test_two_picks_compute_one_path() {
        let (coordinator, gate, calls) = gated_coordinator(line_graph(), (id(1), id(3)));

        assert_eq!(coordinator.state(), QueryState::Idle);
        assert_eq!(coordinator.select_node(id(1)), Ok(QueryState::AwaitingSecond));
        assert_eq!(coordinator.selection(), Selection::One(id(1)));
        assert!(coordinator.latest_path().is_none());

        assert_eq!(coordinator.select_node(id(3)), Ok(QueryState::Computing));
        gate.wait_entered();
        assert_eq!(coordinator.state(), QueryState::Computing);
        assert!(coordinator.latest_path().is_none());

        gate.open();
        let published = coordinator.wait_for_ready(TIMEOUT).unwrap();

        assert_eq!(coordinator.state(), QueryState::Ready);
        assert_eq!((published.start(), published.end()), (id(1), id(3)));
        assert_eq!(published.generation(), coordinator.generation());
        let path = published.path().unwrap();
        assert_eq!(path.nodes(), &[id(1), id(2), id(3)]);
        assert_eq!(path.distance(), 2.0);

        assert_eq!(*calls.lock(), vec![(id(1), id(3))]);
        assert_eq!(coordinator.latest_path(), Some(published));
    }

    #[test]
    fn test_stale_result_is_not_published() {
        let (coordinator, gate, calls) = gated_coordinator(line_graph(), (id(1), id(2)));

        coordinator.select_node(id(1)).unwrap();
        coordinator.select_node(id(2)).unwrap();
        gate.wait_entered();
        let stale_generation = coordinator.generation();

        // Third pick while (1, 2) is still running
        assert_eq!(coordinator.select_node(id(3)), Ok(QueryState::Computing));
        assert_eq!(coordinator.selection(), Selection::Two(id(2), id(3)));
        assert!(coordinator.generation() > stale_generation);

        gate.open();
        let published = coordinator.wait_for_ready(TIMEOUT).unwrap();

        assert_eq!((published.start(), published.end()), (id(2), id(3)));
        assert_ne!(published.generation(), stale_generation);
        assert_eq!(published.path().unwrap().nodes(), &[id(2), id(3)]);
        assert_eq!(*calls.lock(), vec![(id(1), id(2)), (id(2), id(3))]);

        // The discarded search finished before the fresh one, nothing else shows up
        assert_eq!(coordinator.latest_path(), Some(published));
    }

    #[test]
    fn test_queued_search_is_replaced() {
        let graph = grid_graph(4, 4);
        let (coordinator, gate, calls) = gated_coordinator(graph, (id(1), id(2)));

        coordinator.select_node(id(1)).unwrap();
        coordinator.select_node(id(2)).unwrap();
        gate.wait_entered();

        // (2, 3) is queued behind the running search and replaced by (3, 16) before it starts
        coordinator.select_node(id(3)).unwrap();
        coordinator.select_node(id(16)).unwrap();

        gate.open();
        let published = coordinator.wait_for_ready(TIMEOUT).unwrap();

        assert_eq!((published.start(), published.end()), (id(3), id(16)));
        assert_eq!(published.path().unwrap().distance(), 4.0);
        assert_eq!(*calls.lock(), vec![(id(1), id(2)), (id(3), id(16))]);
    }

    #[test]
    fn test_reset_discards_running_search() {
        let (coordinator, gate, calls) = gated_coordinator(line_graph(), (id(1), id(3)));

        coordinator.select_node(id(1)).unwrap();
        coordinator.select_node(id(3)).unwrap();
        gate.wait_entered();

        coordinator.reset();
        assert_eq!(coordinator.state(), QueryState::Idle);
        assert_eq!(coordinator.selection(), Selection::Empty);

        gate.open();
        assert!(coordinator.wait_for_ready(Duration::from_millis(50)).is_none());

        // A fresh pair still works after the discarded one
        coordinator.select_node(id(2)).unwrap();
        coordinator.select_node(id(3)).unwrap();
        let published = coordinator.wait_for_ready(TIMEOUT).unwrap();

        assert_eq!((published.start(), published.end()), (id(2), id(3)));
        assert_eq!(calls.lock().len(), 2);
    }

    #[test]
    fn test_pick_after_ready_starts_new_selection() {
        let coordinator = QueryCoordinator::new(Arc::new(line_graph())).unwrap();

        coordinator.select_node(id(1)).unwrap();
        coordinator.select_node(id(2)).unwrap();
        assert!(coordinator.wait_for_ready(TIMEOUT).is_some());

        assert_eq!(coordinator.select_node(id(3)), Ok(QueryState::AwaitingSecond));
        assert_eq!(coordinator.selection(), Selection::One(id(3)));
        assert!(coordinator.latest_path().is_none());
    }

    #[test]
    fn test_unreachable_pair_is_published() {
        let coordinator = QueryCoordinator::new(Arc::new(line_graph())).unwrap();

        coordinator.select_node(id(3)).unwrap();
        coordinator.select_node(id(1)).unwrap();
        let published = coordinator.wait_for_ready(TIMEOUT).unwrap();

        assert_eq!(coordinator.state(), QueryState::Ready);
        assert!(published.path().is_none());
        assert_eq!(
            published.result(),
            &Err(RoutingError::NoPathFound {
                start: id(3),
                end: id(1)
            })
        );
    }

    #[test]
    fn test_same_node_twice() {
        let coordinator = QueryCoordinator::new(Arc::new(line_graph())).unwrap();

        coordinator.select_node(id(2)).unwrap();
        coordinator.select_node(id(2)).unwrap();
        let published = coordinator.wait_for_ready(TIMEOUT).unwrap();

        let path = published.path().unwrap();
        assert_eq!(path.nodes(), &[id(2)]);
        assert_eq!(path.distance(), 0.0);
    }

    #[test]
    fn test_unknown_node_is_rejected() {
        let coordinator = QueryCoordinator::new(Arc::new(line_graph())).unwrap();

        assert_eq!(
            coordinator.select_node(id(77)),
            Err(RoutingError::UnknownNode(id(77)))
        );
        assert_eq!(coordinator.state(), QueryState::Idle);
        assert_eq!(coordinator.generation(), 0);
    }

    #[test]
    fn test_select_point() {
        let coordinator = QueryCoordinator::new(Arc::new(romania_graph())).unwrap();

        // Near Arad, then near Bucharest
        let start = coordinator.select_point(&Point::new(21.3, 46.2)).unwrap();
        let end = coordinator.select_point(&Point::new(26.1, 44.4)).unwrap();
        assert_eq!(start.node_id(), id(1));
        assert_eq!(end.node_id(), id(2));

        let published = coordinator.wait_for_ready(TIMEOUT).unwrap();
        assert_eq!(published.path().unwrap().distance(), 418.0);
    }

    #[test]
    fn test_select_point_on_empty_graph() {
        let coordinator = QueryCoordinator::new(Arc::new(RoadGraph::default())).unwrap();

        assert!(coordinator.select_point(&Point::new(0.0, 0.0)).is_none());
        assert_eq!(coordinator.state(), QueryState::Idle);
    }

    #[test]
    fn test_picks_while_computing_slide_the_pair() {
        let (coordinator, gate, calls) = gated_coordinator(grid_graph(20, 20), (id(1), id(400)));

        coordinator.select_node(id(1)).unwrap();
        coordinator.select_node(id(400)).unwrap();
        gate.wait_entered();

        for pick in [20, 381, 190, 211, 5, 395] {
            assert_eq!(coordinator.select_node(id(pick)), Ok(QueryState::Computing));
        }
        assert_eq!(coordinator.selection(), Selection::Two(id(5), id(395)));

        gate.open();
        let published = coordinator.wait_for_ready(TIMEOUT).unwrap();

        assert_eq!((published.start(), published.end()), (id(5), id(395)));
        assert_eq!(published.generation(), coordinator.generation());
        // (4, 0) -> (14, 19)
        assert_eq!(published.path().unwrap().distance(), 29.0);

        let calls = calls.lock();
        assert_eq!(calls.first(), Some(&(id(1), id(400))));
        assert_eq!(calls.last(), Some(&(id(5), id(395))));
    }
}
