// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node editor panel: keeps a [`Graph`] and the widget layer in sync.
//!
//! Each call to [`NodeEditorPanel::render`] runs one frame:
//! 1. draw every node (with its pins) and link of the bound graph
//! 2. turn a drawn link into a graph link, output pin first
//! 3. remove a link the user destroyed
//! 4. copy positions of selected nodes back into the graph
//! 5. remove nodes the user deleted, cascading their links
//!
//! Steps 2-5 are best effort: a report that cannot be resolved is logged
//! and skipped, and the frame carries on.

use crate::error::{EditorError, Result};
use crate::id_map::{WidgetIdMap, WidgetRole};
use crate::widget::NodeWidgets;
use mindweaver_graph::{Graph, Link, LinkId, Position};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Message drawn while no graph is bound
const NO_GRAPH_TEXT: &str = "No graph loaded.";

/// Editor panel bound to at most one graph.
///
/// The panel never owns the graph: it holds a weak reference, so the host
/// controls the graph's lifetime. A dropped graph renders as unbound.
pub struct NodeEditorPanel<W: NodeWidgets> {
    name: String,
    graph: Option<Weak<RefCell<Graph>>>,
    ids: WidgetIdMap,
    widgets: W,
}

impl<W: NodeWidgets> NodeEditorPanel<W> {
    /// Create a panel and its widget context
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let widgets = W::create_context()?;
        Ok(Self {
            name: name.into(),
            graph: None,
            ids: WidgetIdMap::new(),
            widgets,
        })
    }

    /// Panel name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind a graph. Binding the graph that is already bound changes nothing.
    pub fn set_graph(&mut self, graph: &Rc<RefCell<Graph>>) {
        let weak = Rc::downgrade(graph);
        if self.graph.as_ref().is_some_and(|current| current.ptr_eq(&weak)) {
            return;
        }
        self.ids.clear();
        self.graph = Some(weak);
        match graph.try_borrow() {
            Ok(graph) => tracing::info!("{}: bound graph '{}'", self.name, graph.name()),
            Err(_) => tracing::info!("{}: bound graph", self.name),
        }
    }

    /// Unbind the current graph
    pub fn clear_graph(&mut self) {
        if self.graph.take().is_some() {
            self.ids.clear();
            tracing::info!("{}: graph unbound", self.name);
        }
    }

    /// Whether a live graph is bound
    pub fn is_bound(&self) -> bool {
        self.bound_graph().is_some()
    }

    fn bound_graph(&self) -> Option<Rc<RefCell<Graph>>> {
        self.graph.as_ref()?.upgrade()
    }

    /// The widget layer
    pub fn widgets(&self) -> &W {
        &self.widgets
    }

    /// The widget layer, mutably
    pub fn widgets_mut(&mut self) -> &mut W {
        &mut self.widgets
    }

    /// Widget ids assigned by the last draw phase
    pub fn id_map(&self) -> &WidgetIdMap {
        &self.ids
    }

    /// Run one frame of the draw/interact cycle
    pub fn render(&mut self, surface: &mut W::Surface) {
        let Some(graph) = self.bound_graph() else {
            self.widgets.placeholder(surface, NO_GRAPH_TEXT);
            return;
        };

        self.widgets.begin_frame(surface);
        match graph.try_borrow() {
            Ok(graph) => self.draw(&graph),
            Err(_) => tracing::warn!("{}: {}", self.name, EditorError::GraphBusy),
        }
        self.widgets.end_frame(surface);

        let Ok(mut graph) = graph.try_borrow_mut() else {
            tracing::warn!("{}: {}, skipping interactions", self.name, EditorError::GraphBusy);
            return;
        };
        if let Err(e) = self.handle_link_creation(&mut graph) {
            tracing::warn!("Could not create link: {e}");
        }
        if let Err(e) = self.handle_link_deletion(&mut graph) {
            tracing::warn!("Could not destroy link: {e}");
        }
        self.handle_node_movement(&mut graph);
        self.handle_node_deletion(&mut graph);
    }

    fn draw(&mut self, graph: &Graph) {
        self.ids.begin_frame();

        for node in graph.nodes() {
            let node_widget = self.ids.register(WidgetRole::Node(node.id()));
            self.widgets
                .place_node(node_widget, node.position.x, node.position.y);
            self.widgets.begin_node(node_widget);
            self.widgets.node_title(&node.name);

            for pin in node.input_pins() {
                let attr = self.ids.register(WidgetRole::InputPin {
                    pin: pin.id(),
                    node: node.id(),
                });
                self.widgets.begin_input_attr(attr);
                self.widgets.attr_label(pin.name());
                self.widgets.end_input_attr();
            }

            for pin in node.output_pins() {
                let attr = self.ids.register(WidgetRole::OutputPin {
                    pin: pin.id(),
                    node: node.id(),
                });
                self.widgets.begin_output_attr(attr);
                self.widgets.attr_label(pin.name());
                self.widgets.end_output_attr();
            }

            self.widgets.end_node();
        }

        for link in graph.links() {
            let from = self.ids.widget_id(link.start.identifier());
            let to = self.ids.widget_id(link.end.identifier());
            // A link to a pin no node owns has no attribute to attach to
            let (Some(from), Some(to)) = (from, to) else {
                tracing::warn!(
                    "Not drawing link {} ({} -> {}): endpoint pin is not on any node",
                    link.id,
                    link.start,
                    link.end
                );
                continue;
            };
            let link_widget = self.ids.register(WidgetRole::Link(link.id));
            self.widgets.draw_link(link_widget, from, to);
        }

        self.ids.sweep();
    }

    fn handle_link_creation(&mut self, graph: &mut Graph) -> Result<Option<LinkId>> {
        let Some((start, end)) = self.widgets.link_created() else {
            return Ok(None);
        };
        let (output, input) = self.ids.link_endpoints(start, end)?;
        let id = graph.add_link(Link::new(output, input));
        tracing::debug!("Link created: {id} ({output} -> {input})");
        Ok(Some(id))
    }

    fn handle_link_deletion(&mut self, graph: &mut Graph) -> Result<Option<LinkId>> {
        let Some(widget) = self.widgets.link_destroyed() else {
            return Ok(None);
        };
        let link = self
            .ids
            .link(widget)
            .and_then(|id| graph.remove_link(id))
            .ok_or(EditorError::UnknownLink(widget))?;
        tracing::debug!("Link destroyed: {}", link.id);
        Ok(Some(link.id))
    }

    fn handle_node_movement(&mut self, graph: &mut Graph) {
        for widget in self.widgets.selected_nodes() {
            let Some(node) = self.ids.node(widget).and_then(|id| graph.node_mut(id)) else {
                tracing::warn!("Ignoring selection: {}", EditorError::UnknownNode(widget));
                continue;
            };
            let Some(position) = self.widgets.node_position(widget).map(Position::from) else {
                continue;
            };
            if node.position != position {
                node.set_position(position);
                tracing::trace!("Node '{}' moved to ({}, {})", node.name, position.x, position.y);
            }
        }
    }

    fn handle_node_deletion(&mut self, graph: &mut Graph) {
        for widget in self.widgets.nodes_deleted() {
            match self.ids.node(widget).and_then(|id| graph.remove_node(id)) {
                Some(node) => tracing::debug!("Node deleted: '{}' ({})", node.name, node.id()),
                None => tracing::warn!("Could not delete node: {}", EditorError::UnknownNode(widget)),
            }
        }
    }
}
