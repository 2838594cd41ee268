// SPDX-License-Identifier: MIT OR Apache-2.0
//! egui implementation of the node widget layer.
//!
//! Draw calls only record the frame. `end_frame` lays the recorded nodes
//! out, handles input and paints:
//! - drag a node to move the selection (shift adds to the selection)
//! - drag from a pin and release over another pin to draw a link
//! - click a link to select it
//! - Delete/Backspace removes the selected link, or the selected nodes
//! - drag empty space (or middle-drag anywhere) to pan

use crate::config::CanvasConfig;
use crate::error::Result;
use crate::widget::{ContextToken, NodeWidgets, WidgetId};
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// Node visual dimensions
const NODE_WIDTH: f32 = 180.0;
const NODE_HEADER_HEIGHT: f32 = 24.0;
const PORT_HEIGHT: f32 = 22.0;
const PORT_RADIUS: f32 = 6.0;
const PORT_PADDING: f32 = 12.0;
const NODE_ROUNDING: f32 = 6.0;
const NODE_SHADOW_OFFSET: f32 = 3.0;

/// Link visual parameters
const BEZIER_CURVATURE: f32 = 50.0;
const BEZIER_SEGMENTS: usize = 32;
const LINK_THICKNESS: f32 = 2.5;
const LINK_HIT_DISTANCE: f32 = 6.0;

const INPUT_COLOR: Color32 = Color32::from_rgb(80, 200, 80);
const OUTPUT_COLOR: Color32 = Color32::from_rgb(200, 150, 80);
const SELECTION_COLOR: Color32 = Color32::from_rgb(100, 150, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrKind {
    Input,
    Output,
}

#[derive(Debug, Clone)]
struct AttrRecord {
    id: WidgetId,
    kind: AttrKind,
    label: String,
}

#[derive(Debug, Clone)]
struct NodeRecord {
    id: WidgetId,
    title: String,
    attrs: Vec<AttrRecord>,
}

/// Draw calls recorded between `begin_frame` and `end_frame`
#[derive(Debug, Default)]
struct FrameRecord {
    nodes: Vec<NodeRecord>,
    links: Vec<(WidgetId, WidgetId, WidgetId)>,
}

/// Screen-space layout of the recorded frame, in draw order
#[derive(Debug, Default)]
struct Layout {
    nodes: Vec<(WidgetId, Rect)>,
    pins: IndexMap<WidgetId, (Pos2, AttrKind)>,
}

impl Layout {
    fn node_at(&self, pos: Pos2) -> Option<WidgetId> {
        // Later nodes paint on top
        self.nodes.iter().rev().find(|(_, rect)| rect.contains(pos)).map(|(id, _)| *id)
    }

    fn pin_at(&self, pos: Pos2) -> Option<(WidgetId, AttrKind)> {
        self.pins
            .iter()
            .rev()
            .find(|(_, (anchor, _))| anchor.distance(pos) < PORT_RADIUS * 1.5)
            .map(|(id, (_, kind))| (*id, *kind))
    }
}

/// Editor interaction mode
#[derive(Debug, Clone, Copy, Default)]
enum InteractionMode {
    /// Selecting
    #[default]
    Normal,
    /// Panning the view
    Panning,
    /// Dragging selected nodes
    DraggingNodes,
    /// Dragging a new link out of a pin
    CreatingLink {
        from: WidgetId,
        kind: AttrKind,
        current: Pos2,
    },
}

/// Node widget layer drawn with egui
pub struct EguiNodes {
    _context: ContextToken,
    canvas: CanvasConfig,
    pan: Vec2,
    positions: HashMap<WidgetId, Pos2>,
    selected_nodes: IndexSet<WidgetId>,
    selected_link: Option<WidgetId>,
    mode: InteractionMode,
    frame: FrameRecord,
    current_node: Option<NodeRecord>,
    created: Option<(WidgetId, WidgetId)>,
    destroyed: Option<WidgetId>,
    deleted: Vec<WidgetId>,
}

impl EguiNodes {
    /// Apply canvas settings
    pub fn set_canvas(&mut self, canvas: CanvasConfig) {
        self.canvas = canvas;
    }

    fn layout(&self, rect: Rect) -> Layout {
        let origin = rect.min.to_vec2() + self.pan;
        let mut layout = Layout::default();
        for node in &self.frame.nodes {
            let min = self.positions.get(&node.id).copied().unwrap_or(Pos2::ZERO) + origin;
            let height = NODE_HEADER_HEIGHT + node.attrs.len() as f32 * PORT_HEIGHT + 8.0;
            let node_rect = Rect::from_min_size(min, Vec2::new(NODE_WIDTH, height));
            for (i, attr) in node.attrs.iter().enumerate() {
                let y = node_rect.top() + NODE_HEADER_HEIGHT + i as f32 * PORT_HEIGHT + PORT_HEIGHT / 2.0;
                let x = match attr.kind {
                    AttrKind::Input => node_rect.left(),
                    AttrKind::Output => node_rect.right(),
                };
                layout.pins.insert(attr.id, (Pos2::new(x, y), attr.kind));
            }
            layout.nodes.push((node.id, node_rect));
        }
        layout
    }

    fn link_at(&self, pos: Pos2, layout: &Layout) -> Option<WidgetId> {
        self.frame.links.iter().find_map(|&(id, from, to)| {
            let (from, _) = layout.pins.get(&from)?;
            let (to, _) = layout.pins.get(&to)?;
            let points = link_curve(*from, *to);
            points
                .windows(2)
                .any(|segment| distance_to_segment(pos, segment[0], segment[1]) < LINK_HIT_DISTANCE)
                .then_some(id)
        })
    }

    fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response, layout: &Layout) {
        let pointer = response
            .interact_pointer_pos()
            .or_else(|| ui.input(|i| i.pointer.hover_pos()));
        let shift_held = ui.input(|i| i.modifiers.shift);

        if response.drag_started_by(egui::PointerButton::Middle) {
            self.mode = InteractionMode::Panning;
        } else if response.drag_started_by(egui::PointerButton::Primary) {
            // Hit-test where the button went down, not where the drag was recognized
            let origin = ui.input(|i| i.pointer.press_origin()).or(pointer);
            if let Some(pos) = origin {
                self.mode = if let Some((from, kind)) = layout.pin_at(pos) {
                    InteractionMode::CreatingLink {
                        from,
                        kind,
                        current: pointer.unwrap_or(pos),
                    }
                } else if let Some(node) = layout.node_at(pos) {
                    if !self.selected_nodes.contains(&node) {
                        if !shift_held {
                            self.selected_nodes.clear();
                        }
                        self.selected_nodes.insert(node);
                    }
                    self.selected_link = None;
                    InteractionMode::DraggingNodes
                } else {
                    InteractionMode::Panning
                };
            }
        }

        if response.dragged() {
            let delta = response.drag_delta();
            match &mut self.mode {
                InteractionMode::Panning => self.pan += delta,
                InteractionMode::DraggingNodes => {
                    for node in &self.selected_nodes {
                        if let Some(position) = self.positions.get_mut(node) {
                            *position += delta;
                        }
                    }
                }
                InteractionMode::CreatingLink { current, .. } => {
                    if let Some(pos) = pointer {
                        *current = pos;
                    }
                }
                InteractionMode::Normal => {}
            }
        }

        if response.drag_stopped() {
            if let InteractionMode::CreatingLink { from, .. } = self.mode {
                let target = pointer.and_then(|pos| layout.pin_at(pos));
                if let Some((to, _)) = target.filter(|(to, _)| *to != from) {
                    self.created = Some((from, to));
                }
            }
            self.mode = InteractionMode::Normal;
        }

        if response.clicked() {
            if let Some(pos) = pointer {
                if let Some(node) = layout.node_at(pos) {
                    if !shift_held {
                        self.selected_nodes.clear();
                    }
                    self.selected_nodes.insert(node);
                    self.selected_link = None;
                } else if let Some(link) = self.link_at(pos, layout) {
                    self.selected_nodes.clear();
                    self.selected_link = Some(link);
                } else if !shift_held {
                    self.selected_nodes.clear();
                    self.selected_link = None;
                }
            }
        }

        let delete = response.hovered()
            && ui.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace));
        if delete {
            if let Some(link) = self.selected_link.take() {
                self.destroyed = Some(link);
            } else if !self.selected_nodes.is_empty() {
                self.deleted = self.selected_nodes.drain(..).collect();
            }
        }
    }

    fn draw_grid(&self, painter: &egui::Painter, rect: Rect) {
        let spacing = self.canvas.grid_spacing.max(4.0);
        let color = Color32::from_rgba_unmultiplied(60, 60, 60, 100);

        let mut x = rect.left() + self.pan.x.rem_euclid(spacing);
        while x < rect.right() {
            painter.line_segment(
                [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
                Stroke::new(1.0, color),
            );
            x += spacing;
        }

        let mut y = rect.top() + self.pan.y.rem_euclid(spacing);
        while y < rect.bottom() {
            painter.line_segment(
                [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
                Stroke::new(1.0, color),
            );
            y += spacing;
        }
    }

    fn draw_links(&self, painter: &egui::Painter, layout: &Layout) {
        for &(id, from, to) in &self.frame.links {
            let (Some((from, _)), Some((to, _))) = (layout.pins.get(&from), layout.pins.get(&to)) else {
                continue;
            };
            let color = if self.selected_link == Some(id) {
                Color32::WHITE
            } else {
                Color32::from_gray(170)
            };
            draw_curve(painter, *from, *to, color);
        }

        if let InteractionMode::CreatingLink { from, kind, current } = self.mode {
            if let Some((anchor, _)) = layout.pins.get(&from) {
                match kind {
                    AttrKind::Output => draw_curve(painter, *anchor, current, OUTPUT_COLOR),
                    AttrKind::Input => draw_curve(painter, current, *anchor, INPUT_COLOR),
                }
            }
        }
    }

    fn draw_nodes(&self, painter: &egui::Painter, layout: &Layout, hover: Option<Pos2>) {
        for (node, (_, screen_rect)) in self.frame.nodes.iter().zip(&layout.nodes) {
            let is_selected = self.selected_nodes.contains(&node.id);

            let shadow_rect = screen_rect.translate(Vec2::splat(NODE_SHADOW_OFFSET));
            painter.rect_filled(shadow_rect, NODE_ROUNDING, Color32::from_rgba_unmultiplied(0, 0, 0, 60));

            let bg_color = if is_selected {
                Color32::from_rgb(60, 70, 90)
            } else {
                Color32::from_rgb(45, 45, 48)
            };
            painter.rect_filled(*screen_rect, NODE_ROUNDING, bg_color);

            let header_rect = Rect::from_min_size(
                screen_rect.min,
                Vec2::new(screen_rect.width(), NODE_HEADER_HEIGHT),
            );
            painter.rect_filled(
                header_rect,
                egui::Rounding {
                    nw: NODE_ROUNDING,
                    ne: NODE_ROUNDING,
                    sw: 0.0,
                    se: 0.0,
                },
                Color32::from_rgb(70, 100, 130),
            );
            painter.text(
                header_rect.center(),
                egui::Align2::CENTER_CENTER,
                &node.title,
                egui::FontId::proportional(12.0),
                Color32::WHITE,
            );

            if is_selected {
                painter.rect_stroke(*screen_rect, NODE_ROUNDING, Stroke::new(2.0, SELECTION_COLOR));
            }

            for attr in &node.attrs {
                let Some((anchor, _)) = layout.pins.get(&attr.id) else {
                    continue;
                };
                let (color, label_pos, align) = match attr.kind {
                    AttrKind::Input => (
                        INPUT_COLOR,
                        Pos2::new(anchor.x + PORT_PADDING, anchor.y),
                        egui::Align2::LEFT_CENTER,
                    ),
                    AttrKind::Output => (
                        OUTPUT_COLOR,
                        Pos2::new(anchor.x - PORT_PADDING, anchor.y),
                        egui::Align2::RIGHT_CENTER,
                    ),
                };
                let hovered = hover.is_some_and(|pos| anchor.distance(pos) < PORT_RADIUS * 1.5);
                let radius = if hovered { PORT_RADIUS * 1.3 } else { PORT_RADIUS };
                painter.circle_filled(*anchor, radius, color);
                painter.circle_stroke(*anchor, PORT_RADIUS, Stroke::new(1.0, Color32::from_gray(30)));
                painter.text(
                    label_pos,
                    align,
                    &attr.label,
                    egui::FontId::proportional(10.0),
                    Color32::from_gray(200),
                );
            }
        }
    }

    fn draw_status_bar(&self, painter: &egui::Painter, rect: Rect) {
        painter.text(
            Pos2::new(rect.left() + 5.0, rect.bottom() - 11.0),
            egui::Align2::LEFT_CENTER,
            format!(
                "Nodes: {} | Links: {} | Selected: {}",
                self.frame.nodes.len(),
                self.frame.links.len(),
                self.selected_nodes.len(),
            ),
            egui::FontId::proportional(11.0),
            Color32::from_gray(150),
        );
    }
}

impl NodeWidgets for EguiNodes {
    type Surface = egui::Ui;

    fn create_context() -> Result<Self> {
        Ok(Self {
            _context: ContextToken::acquire()?,
            canvas: CanvasConfig::default(),
            pan: Vec2::ZERO,
            positions: HashMap::new(),
            selected_nodes: IndexSet::new(),
            selected_link: None,
            mode: InteractionMode::Normal,
            frame: FrameRecord::default(),
            current_node: None,
            created: None,
            destroyed: None,
            deleted: Vec::new(),
        })
    }

    fn placeholder(&mut self, ui: &mut egui::Ui, text: &str) {
        ui.centered_and_justified(|ui| {
            ui.label(text);
        });
    }

    fn begin_frame(&mut self, _ui: &mut egui::Ui) {
        self.frame = FrameRecord::default();
        self.current_node = None;
        self.created = None;
        self.destroyed = None;
        self.deleted.clear();
    }

    fn place_node(&mut self, node: WidgetId, x: f32, y: f32) {
        self.positions.insert(node, Pos2::new(x, y));
    }

    fn begin_node(&mut self, node: WidgetId) {
        self.current_node = Some(NodeRecord {
            id: node,
            title: String::new(),
            attrs: Vec::new(),
        });
    }

    fn node_title(&mut self, title: &str) {
        if let Some(node) = self.current_node.as_mut() {
            node.title = title.to_string();
        }
    }

    fn end_node(&mut self) {
        if let Some(node) = self.current_node.take() {
            self.frame.nodes.push(node);
        }
    }

    fn begin_input_attr(&mut self, attr: WidgetId) {
        if let Some(node) = self.current_node.as_mut() {
            node.attrs.push(AttrRecord {
                id: attr,
                kind: AttrKind::Input,
                label: String::new(),
            });
        }
    }

    fn end_input_attr(&mut self) {}

    fn begin_output_attr(&mut self, attr: WidgetId) {
        if let Some(node) = self.current_node.as_mut() {
            node.attrs.push(AttrRecord {
                id: attr,
                kind: AttrKind::Output,
                label: String::new(),
            });
        }
    }

    fn end_output_attr(&mut self) {}

    fn attr_label(&mut self, label: &str) {
        if let Some(attr) = self.current_node.as_mut().and_then(|n| n.attrs.last_mut()) {
            attr.label = label.to_string();
        }
    }

    fn draw_link(&mut self, link: WidgetId, from: WidgetId, to: WidgetId) {
        self.frame.links.push((link, from, to));
    }

    fn end_frame(&mut self, ui: &mut egui::Ui) {
        // Forget nodes that were not drawn this frame
        let drawn: std::collections::HashSet<WidgetId> = self.frame.nodes.iter().map(|n| n.id).collect();
        self.positions.retain(|id, _| drawn.contains(id));
        self.selected_nodes.retain(|id| drawn.contains(id));
        if self
            .selected_link
            .is_some_and(|link| !self.frame.links.iter().any(|(id, _, _)| *id == link))
        {
            self.selected_link = None;
        }

        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let layout = self.layout(rect);
        self.handle_input(ui, &response, &layout);
        let layout = self.layout(rect);

        if self.canvas.show_grid {
            self.draw_grid(&painter, rect);
        }
        let hover = ui.input(|i| i.pointer.hover_pos());
        self.draw_links(&painter, &layout);
        self.draw_nodes(&painter, &layout, hover);
        self.draw_status_bar(&painter, rect);
    }

    fn link_created(&mut self) -> Option<(WidgetId, WidgetId)> {
        self.created.take()
    }

    fn link_destroyed(&mut self) -> Option<WidgetId> {
        self.destroyed.take()
    }

    fn selected_nodes(&self) -> Vec<WidgetId> {
        self.selected_nodes.iter().copied().collect()
    }

    fn node_position(&self, node: WidgetId) -> Option<[f32; 2]> {
        self.positions.get(&node).map(|p| [p.x, p.y])
    }

    fn nodes_deleted(&mut self) -> Vec<WidgetId> {
        std::mem::take(&mut self.deleted)
    }
}

fn draw_curve(painter: &egui::Painter, from: Pos2, to: Pos2, color: Color32) {
    let points = link_curve(from, to);
    for segment in points.windows(2) {
        painter.line_segment([segment[0], segment[1]], Stroke::new(LINK_THICKNESS, color));
    }
}

/// Points along the bezier drawn from an output anchor to an input anchor
fn link_curve(from: Pos2, to: Pos2) -> Vec<Pos2> {
    let distance = (to.x - from.x).abs();
    let curvature = BEZIER_CURVATURE.min(distance * 0.5).max(BEZIER_CURVATURE * 0.5);
    let ctrl1 = Pos2::new(from.x + curvature, from.y);
    let ctrl2 = Pos2::new(to.x - curvature, to.y);
    bezier_points(from, ctrl1, ctrl2, to, BEZIER_SEGMENTS)
}

/// Generate points along a cubic bezier curve
fn bezier_points(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, segments: usize) -> Vec<Pos2> {
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let mt = 1.0 - t;
            let a = mt * mt * mt;
            let b = 3.0 * mt * mt * t;
            let c = 3.0 * mt * t * t;
            let d = t * t * t;
            Pos2::new(
                a * p0.x + b * p1.x + c * p2.x + d * p3.x,
                a * p0.y + b * p1.y + c * p2.y + d * p3.y,
            )
        })
        .collect()
}

/// Minimum distance from a point to a line segment
fn distance_to_segment(point: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bezier_endpoints() {
        let from = Pos2::new(0.0, 0.0);
        let to = Pos2::new(200.0, 50.0);
        let points = link_curve(from, to);
        assert_eq!(points.len(), BEZIER_SEGMENTS + 1);
        assert_eq!(points[0], from);
        assert!(points[BEZIER_SEGMENTS].distance(to) < 1e-3);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Pos2::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Pos2::new(-4.0, 3.0), a, b), 5.0);
        assert_eq!(distance_to_segment(Pos2::new(1.0, 1.0), a, a), 2.0_f32.sqrt());
    }

    #[test]
    fn test_layout_places_pins_on_node_edges() {
        let mut nodes = EguiNodes::create_context().unwrap();
        nodes.place_node(1, 10.0, 20.0);
        nodes.begin_node(1);
        nodes.node_title("Add");
        nodes.begin_input_attr(2);
        nodes.attr_label("A");
        nodes.end_input_attr();
        nodes.begin_output_attr(3);
        nodes.attr_label("Sum");
        nodes.end_output_attr();
        nodes.end_node();

        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let layout = nodes.layout(rect);
        let (_, node_rect) = layout.nodes[0];
        assert_eq!(node_rect.min, Pos2::new(10.0, 20.0));

        let (input, kind) = layout.pins[&2];
        assert_eq!(kind, AttrKind::Input);
        assert_eq!(input.x, node_rect.left());
        let (output, kind) = layout.pins[&3];
        assert_eq!(kind, AttrKind::Output);
        assert_eq!(output.x, node_rect.right());
        assert!(output.y > input.y);

        assert_eq!(layout.node_at(Pos2::new(50.0, 30.0)), Some(1));
        assert_eq!(layout.pin_at(input), Some((2, AttrKind::Input)));
        assert!(layout.node_at(Pos2::new(500.0, 500.0)).is_none());
    }

    #[test]
    fn test_overlapping_pins_pick_topmost() {
        let mut nodes = EguiNodes::create_context().unwrap();
        for (node, pin) in [(1, 10), (2, 20)] {
            nodes.place_node(node, 0.0, 0.0);
            nodes.begin_node(node);
            nodes.begin_input_attr(pin);
            nodes.end_input_attr();
            nodes.end_node();
        }

        let layout = nodes.layout(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0)));
        let (anchor, _) = layout.pins[&20];
        assert_eq!(layout.pins[&10].0, anchor);
        for _ in 0..10 {
            assert_eq!(layout.pin_at(anchor), Some((20, AttrKind::Input)));
        }
        assert_eq!(layout.node_at(anchor + Vec2::new(20.0, 0.0)), Some(2));
    }

    const SOURCE: WidgetId = 1;
    const SOURCE_OUT: WidgetId = 11;
    const TARGET: WidgetId = 2;
    const TARGET_IN: WidgetId = 21;
    const LINK: WidgetId = 30;

    // Pin anchors and link midpoint for the canvas below
    const OUT_ANCHOR: Pos2 = Pos2::new(280.0, 135.0);
    const IN_ANCHOR: Pos2 = Pos2::new(400.0, 135.0);
    const LINK_MIDPOINT: Pos2 = Pos2::new(340.0, 135.0);
    const SOURCE_HEADER: Pos2 = Pos2::new(190.0, 112.0);

    /// Two nodes driven through a real egui context, replaying each frame
    /// the way the editor panel does.
    struct Canvas {
        ctx: egui::Context,
        nodes: EguiNodes,
        positions: Vec<(WidgetId, [f32; 2])>,
        linked: bool,
    }

    impl Canvas {
        fn new(linked: bool) -> Self {
            let mut canvas = Self {
                ctx: egui::Context::default(),
                nodes: EguiNodes::create_context().unwrap(),
                positions: vec![(SOURCE, [100.0, 100.0]), (TARGET, [400.0, 100.0])],
                linked,
            };
            canvas.frame(Vec::new());
            canvas
        }

        fn frame(&mut self, events: Vec<egui::Event>) {
            let input = egui::RawInput {
                screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
                events,
                ..Default::default()
            };
            let Self {
                ctx,
                nodes,
                positions,
                linked,
            } = self;
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default()
                    .frame(egui::Frame::none())
                    .show(ctx, |ui| {
                        nodes.begin_frame(ui);
                        for &(node, [x, y]) in positions.iter() {
                            nodes.place_node(node, x, y);
                            nodes.begin_node(node);
                            if node == SOURCE {
                                nodes.begin_output_attr(SOURCE_OUT);
                                nodes.attr_label("Out");
                                nodes.end_output_attr();
                            } else {
                                nodes.begin_input_attr(TARGET_IN);
                                nodes.attr_label("In");
                                nodes.end_input_attr();
                            }
                            nodes.end_node();
                        }
                        if *linked {
                            nodes.draw_link(LINK, SOURCE_OUT, TARGET_IN);
                        }
                        nodes.end_frame(ui);
                    });
            });
            for (node, position) in &mut self.positions {
                if let Some(moved) = self.nodes.node_position(*node) {
                    *position = moved;
                }
            }
        }

        fn press(&mut self, pos: Pos2) {
            self.frame(vec![egui::Event::PointerMoved(pos), button(pos, true)]);
        }

        fn move_to(&mut self, pos: Pos2) {
            self.frame(vec![egui::Event::PointerMoved(pos)]);
        }

        fn release(&mut self, pos: Pos2) {
            self.frame(vec![egui::Event::PointerMoved(pos), button(pos, false)]);
        }

        fn click(&mut self, pos: Pos2) {
            self.press(pos);
            self.release(pos);
        }

        fn press_delete(&mut self) {
            self.frame(vec![egui::Event::Key {
                key: egui::Key::Delete,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }]);
        }
    }

    fn button(pos: Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_drag_between_pins_reports_link() {
        let mut canvas = Canvas::new(false);
        canvas.press(OUT_ANCHOR);
        canvas.move_to(Pos2::new(330.0, 150.0));
        canvas.move_to(IN_ANCHOR);
        canvas.release(IN_ANCHOR);

        assert_eq!(canvas.nodes.link_created(), Some((SOURCE_OUT, TARGET_IN)));
        assert_eq!(canvas.nodes.link_created(), None);
    }

    #[test]
    fn test_drop_on_starting_pin_reports_nothing() {
        let mut canvas = Canvas::new(false);
        canvas.press(OUT_ANCHOR);
        canvas.move_to(Pos2::new(330.0, 160.0));
        canvas.move_to(OUT_ANCHOR);
        canvas.release(OUT_ANCHOR);
        assert_eq!(canvas.nodes.link_created(), None);

        // Released over empty canvas
        canvas.press(OUT_ANCHOR);
        canvas.move_to(Pos2::new(330.0, 300.0));
        canvas.release(Pos2::new(330.0, 300.0));
        assert_eq!(canvas.nodes.link_created(), None);
    }

    #[test]
    fn test_dragging_node_moves_it() {
        let mut canvas = Canvas::new(false);
        canvas.press(SOURCE_HEADER);
        canvas.move_to(SOURCE_HEADER + Vec2::new(30.0, 0.0));
        canvas.move_to(SOURCE_HEADER + Vec2::new(60.0, 30.0));
        canvas.release(SOURCE_HEADER + Vec2::new(60.0, 30.0));

        assert_eq!(canvas.nodes.selected_nodes(), vec![SOURCE]);
        let [x, y] = canvas.nodes.node_position(SOURCE).unwrap();
        assert!((x - 160.0).abs() < 0.5, "x = {x}");
        assert!((y - 130.0).abs() < 0.5, "y = {y}");
        assert_eq!(canvas.nodes.node_position(TARGET), Some([400.0, 100.0]));
        assert_eq!(canvas.nodes.link_created(), None);
    }

    #[test]
    fn test_delete_with_selected_link_reports_link() {
        let mut canvas = Canvas::new(true);
        canvas.click(LINK_MIDPOINT);
        canvas.press_delete();

        assert_eq!(canvas.nodes.link_destroyed(), Some(LINK));
        assert!(canvas.nodes.nodes_deleted().is_empty());
    }

    #[test]
    fn test_delete_with_selected_node_reports_node() {
        let mut canvas = Canvas::new(true);
        canvas.click(SOURCE_HEADER);
        assert_eq!(canvas.nodes.selected_nodes(), vec![SOURCE]);
        canvas.press_delete();

        assert_eq!(canvas.nodes.nodes_deleted(), vec![SOURCE]);
        assert_eq!(canvas.nodes.link_destroyed(), None);
        assert!(canvas.nodes.selected_nodes().is_empty());
    }

    #[test]
    fn test_delete_without_selection_reports_nothing() {
        let mut canvas = Canvas::new(true);
        canvas.click(Pos2::new(600.0, 400.0));
        canvas.press_delete();

        assert_eq!(canvas.nodes.link_destroyed(), None);
        assert!(canvas.nodes.nodes_deleted().is_empty());
    }
}
