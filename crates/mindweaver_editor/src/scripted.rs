// SPDX-License-Identifier: MIT OR Apache-2.0
//! In-memory widget layer for tests.
//!
//! Records what the panel draws and hands back interaction reports that a
//! test arms before calling `render`.

use crate::error::Result;
use crate::widget::{ContextToken, NodeWidgets, WidgetId};
use std::collections::HashMap;

/// A node as drawn in the last frame
#[derive(Debug, Clone, Default)]
pub struct DrawnNode {
    pub id: WidgetId,
    pub title: String,
    pub position: [f32; 2],
    pub inputs: Vec<(WidgetId, String)>,
    pub outputs: Vec<(WidgetId, String)>,
}

/// Everything drawn in the last frame
#[derive(Debug, Clone, Default)]
pub struct DrawnFrame {
    pub nodes: Vec<DrawnNode>,
    pub links: Vec<(WidgetId, WidgetId, WidgetId)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attr {
    Input,
    Output,
}

#[derive(Debug)]
pub struct ScriptedWidgets {
    _context: ContextToken,
    pub frames: usize,
    pub placeholders: Vec<String>,
    pub frame: DrawnFrame,
    building: Option<DrawnFrame>,
    current_node: Option<DrawnNode>,
    current_attr: Option<Attr>,
    placed: HashMap<WidgetId, [f32; 2]>,
    pub created: Option<(WidgetId, WidgetId)>,
    pub destroyed: Option<WidgetId>,
    pub selected: Vec<WidgetId>,
    pub moved: HashMap<WidgetId, [f32; 2]>,
    pub deleted: Vec<WidgetId>,
}

impl NodeWidgets for ScriptedWidgets {
    type Surface = ();

    fn create_context() -> Result<Self> {
        Ok(Self {
            _context: ContextToken::acquire()?,
            frames: 0,
            placeholders: Vec::new(),
            frame: DrawnFrame::default(),
            building: None,
            current_node: None,
            current_attr: None,
            placed: HashMap::new(),
            created: None,
            destroyed: None,
            selected: Vec::new(),
            moved: HashMap::new(),
            deleted: Vec::new(),
        })
    }

    fn placeholder(&mut self, _surface: &mut (), text: &str) {
        self.placeholders.push(text.to_string());
    }

    fn begin_frame(&mut self, _surface: &mut ()) {
        assert!(self.building.is_none(), "frame already open");
        self.frames += 1;
        self.building = Some(DrawnFrame::default());
    }

    fn place_node(&mut self, node: WidgetId, x: f32, y: f32) {
        assert!(self.current_node.is_none(), "place_node inside a node");
        self.placed.insert(node, [x, y]);
    }

    fn begin_node(&mut self, node: WidgetId) {
        assert!(self.building.is_some() && self.current_node.is_none());
        self.current_node = Some(DrawnNode {
            id: node,
            position: self.placed.get(&node).copied().unwrap_or_default(),
            ..DrawnNode::default()
        });
    }

    fn node_title(&mut self, title: &str) {
        if let Some(node) = self.current_node.as_mut() {
            node.title = title.to_string();
        }
    }

    fn end_node(&mut self) {
        let node = self.current_node.take().expect("end_node without begin_node");
        self.building.as_mut().expect("no frame").nodes.push(node);
    }

    fn begin_input_attr(&mut self, attr: WidgetId) {
        assert!(self.current_attr.is_none());
        self.current_attr = Some(Attr::Input);
        let node = self.current_node.as_mut().expect("attribute outside a node");
        node.inputs.push((attr, String::new()));
    }

    fn end_input_attr(&mut self) {
        assert_eq!(self.current_attr.take(), Some(Attr::Input));
    }

    fn begin_output_attr(&mut self, attr: WidgetId) {
        assert!(self.current_attr.is_none());
        self.current_attr = Some(Attr::Output);
        let node = self.current_node.as_mut().expect("attribute outside a node");
        node.outputs.push((attr, String::new()));
    }

    fn end_output_attr(&mut self) {
        assert_eq!(self.current_attr.take(), Some(Attr::Output));
    }

    fn attr_label(&mut self, label: &str) {
        let node = self.current_node.as_mut().expect("label outside a node");
        let attrs = match self.current_attr {
            Some(Attr::Input) => &mut node.inputs,
            Some(Attr::Output) => &mut node.outputs,
            None => panic!("label outside an attribute"),
        };
        if let Some((_, text)) = attrs.last_mut() {
            *text = label.to_string();
        }
    }

    fn draw_link(&mut self, link: WidgetId, from: WidgetId, to: WidgetId) {
        assert!(self.current_node.is_none(), "link inside a node");
        self.building.as_mut().expect("no frame").links.push((link, from, to));
    }

    fn end_frame(&mut self, _surface: &mut ()) {
        self.frame = self.building.take().expect("end_frame without begin_frame");
    }

    fn link_created(&mut self) -> Option<(WidgetId, WidgetId)> {
        self.created.take()
    }

    fn link_destroyed(&mut self) -> Option<WidgetId> {
        self.destroyed.take()
    }

    fn selected_nodes(&self) -> Vec<WidgetId> {
        self.selected.clone()
    }

    fn node_position(&self, node: WidgetId) -> Option<[f32; 2]> {
        self.moved.get(&node).or_else(|| self.placed.get(&node)).copied()
    }

    fn nodes_deleted(&mut self) -> Vec<WidgetId> {
        std::mem::take(&mut self.deleted)
    }
}
