// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sample graph shown on startup.

use mindweaver_graph::{Graph, Node, NodeCategory, PinType};

/// Build the sample session: an event node and a data processing node
pub fn sample_graph() -> Graph {
    let mut graph = Graph::new("MainGraph");

    let mut start = Node::new("Start Event", NodeCategory::ExecutionFlow).with_position(100.0, 100.0);
    start.add_output_pin("Exec Out", PinType::Exec);
    start.add_input_pin("Condition", PinType::Bool);
    graph.add_node(start);

    let mut process = Node::new("Process Data", NodeCategory::Function).with_position(350.0, 150.0);
    process.add_input_pin("Exec In", PinType::Exec);
    process.add_input_pin("Input Value", PinType::Int);
    process.add_output_pin("Next Exec", PinType::Exec);
    process.add_output_pin("Result", PinType::Float);
    graph.add_node(process);

    graph
}
