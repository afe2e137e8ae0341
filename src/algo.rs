pub mod shortest_paths;

pub use shortest_paths::{shortest_path, shortest_path_to_all, Hop, Path, ShortestPaths};
