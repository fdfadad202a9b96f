// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::QueueError;

/// Error conditions which may occur during [shortest_paths](crate::shortest_paths),
/// [shortest_paths_until](crate::shortest_paths_until) or [find_route](crate::find_route).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DijkstraError {
    /// The start node doesn't exist in the graph.
    #[error("unknown source node: {0}")]
    UnknownSource(i64),

    /// The end node doesn't exist in the graph.
    #[error("unknown target node: {0}")]
    UnknownTarget(i64),

    /// The priority queue was used incorrectly, meaning the search state got corrupted.
    #[error("corrupted search state: {0}")]
    Queue(#[from] QueueError),
}
