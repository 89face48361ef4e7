pub mod scenario_graph;
