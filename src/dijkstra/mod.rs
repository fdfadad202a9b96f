// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

mod error;
mod paths;
mod search;

pub use error::DijkstraError;
pub use paths::ShortestPaths;
pub use search::{find_route, shortest_paths, shortest_paths_until};
