use egui::{Color32, FontFamily, Pos2, Vec2};
use log::{debug, info};

use crate::document::{Document, LabelId};
use crate::error::OverlayError;
use crate::label::{FontSpec, TextLabel};
use crate::segment::Segment;
use crate::surface::Surface;

/// Which drawing tool is active. Tools are mutually exclusive; with no
/// tool selected, pointer input is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActiveTool {
    Brush,
    Eraser,
    Text,
}

/// Session-wide tool configuration.
///
/// Held by the overlay rather than read from ambient state so the core
/// stays testable without any UI attached. Reset only by explicit user
/// action and never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolSettings {
    pub brush_color: Color32,
    pub brush_width: f32,
    pub font_size: f32,
    pub font_family: FontFamily,
    pub bold: bool,
    pub italic: bool,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            brush_color: Color32::BLACK,
            brush_width: 2.0,
            font_size: 14.0,
            font_family: FontFamily::Proportional,
            bold: false,
            italic: false,
        }
    }
}

impl ToolSettings {
    /// The font a label placed right now would use.
    pub fn font_spec(&self) -> FontSpec {
        FontSpec {
            size: self.font_size,
            family: self.font_family.clone(),
            bold: self.bold,
            italic: self.italic,
        }
    }
}

/// The Selected/Dragging session for one label.
///
/// The snapshot is the surface as it looked just before the label was
/// first drawn; restoring it erases the label's previous rendering without
/// disturbing anything older. It stays valid for the whole session because
/// dragging and drawing are mutually exclusive tool modes.
struct Selection<S: Surface> {
    label: LabelId,
    snapshot: S::Snapshot,
    /// Pointer offset of the drag gesture in progress, if any.
    drag: Option<Vec2>,
}

/// Event-driven overlay core.
///
/// Records brush and eraser strokes as segments, places and drags text
/// labels, and replays both after the surface pixels have been repainted
/// from under them. All operations run synchronously inside pointer
/// callbacks; the tool mode alone enforces mutual exclusion between
/// drawing and dragging.
pub struct PaintOverlay<S: Surface> {
    document: Document,
    settings: ToolSettings,
    tool: Option<ActiveTool>,
    /// Previous point of the stroke in progress.
    last_point: Option<Pos2>,
    /// Text waiting for a canvas press to be placed.
    pending_text: Option<String>,
    selection: Option<Selection<S>>,
}

impl<S: Surface> Default for PaintOverlay<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Surface> PaintOverlay<S> {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            settings: ToolSettings::default(),
            tool: None,
            last_point: None,
            pending_text: None,
            selection: None,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    pub fn tool(&self) -> Option<ActiveTool> {
        self.tool
    }

    /// Switch tools. Any stroke, armed placement or selection ends here;
    /// only one interaction mode can be live at a time.
    pub fn set_tool(&mut self, tool: Option<ActiveTool>) {
        if self.tool != tool {
            info!("switching tool {:?} -> {:?}", self.tool, tool);
        }
        self.tool = tool;
        self.last_point = None;
        self.pending_text = None;
        self.selection = None;
    }

    /// Validate and arm text placement: the next canvas press places
    /// `text`. Empty or whitespace-only content is rejected and nothing is
    /// armed. Arming is only meaningful while the text tool is active.
    pub fn begin_placement(&mut self, text: &str) -> Result<(), OverlayError> {
        if text.trim().is_empty() {
            return Err(OverlayError::EmptyLabelText);
        }
        if self.tool == Some(ActiveTool::Text) {
            self.pending_text = Some(text.to_owned());
        }
        Ok(())
    }

    pub fn placement_armed(&self) -> bool {
        self.pending_text.is_some()
    }

    /// Label currently selected for dragging, if any.
    pub fn selected_label(&self) -> Option<LabelId> {
        self.selection.as_ref().map(|selection| selection.label)
    }

    pub fn is_dragging(&self) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.drag.is_some())
    }

    pub fn is_painting(&self) -> bool {
        self.last_point.is_some()
    }

    pub fn pointer_down(&mut self, pos: Pos2, surface: &mut S) {
        match self.tool {
            None => {}
            Some(ActiveTool::Brush) | Some(ActiveTool::Eraser) => self.begin_stroke(pos, surface),
            Some(ActiveTool::Text) => {
                if let Some(text) = self.pending_text.take() {
                    // Validated when armed; nothing mutates it in between.
                    let _ = self.place_label(&text, pos, surface);
                } else {
                    self.begin_drag(pos, surface);
                }
            }
        }
    }

    pub fn pointer_moved(&mut self, pos: Pos2, surface: &mut S) {
        match self.tool {
            None => {}
            Some(ActiveTool::Brush) | Some(ActiveTool::Eraser) => self.extend_stroke(pos, surface),
            Some(ActiveTool::Text) => self.drag_to(pos, surface),
        }
    }

    /// Ends whatever gesture is in progress. The selection survives a
    /// release; only the drag offset is dropped.
    pub fn pointer_up(&mut self) {
        self.last_point = None;
        if let Some(selection) = &mut self.selection {
            selection.drag = None;
        }
    }

    fn stroke_color(&self, surface: &S) -> Color32 {
        match self.tool {
            // The eraser is the brush painting in the background color;
            // erased pixels are indistinguishable from background strokes.
            Some(ActiveTool::Eraser) => surface.background(),
            _ => self.settings.brush_color,
        }
    }

    /// First point of a freehand path: draw and record a dot.
    fn begin_stroke(&mut self, pos: Pos2, surface: &mut S) {
        let segment = Segment::dot(pos, self.stroke_color(surface), self.settings.brush_width);
        segment.draw(surface);
        self.document.add_segment(segment);
        self.last_point = Some(pos);
    }

    /// Connect the previous point to `pos` while the pointer stays down.
    fn extend_stroke(&mut self, pos: Pos2, surface: &mut S) {
        let Some(last) = self.last_point else {
            return;
        };
        let segment = Segment::line(last, pos, self.stroke_color(surface), self.settings.brush_width);
        segment.draw(surface);
        self.document.add_segment(segment);
        self.last_point = Some(pos);
    }

    /// Place a new label at `pos` and select it for immediate dragging.
    ///
    /// The surface is snapshotted before the label is drawn; that snapshot
    /// backs every later drag of this selection.
    pub fn place_label(
        &mut self,
        text: &str,
        pos: Pos2,
        surface: &mut S,
    ) -> Result<LabelId, OverlayError> {
        if text.trim().is_empty() {
            return Err(OverlayError::EmptyLabelText);
        }
        let snapshot = surface.snapshot();
        let label = TextLabel::new(text, pos, self.settings.font_spec(), self.settings.brush_color);
        label.draw(surface);
        let id = self.document.add_label(label);
        info!("placed label at ({:.1}, {:.1})", pos.x, pos.y);
        self.selection = Some(Selection {
            label: id,
            snapshot,
            drag: None,
        });
        Ok(id)
    }

    fn begin_drag(&mut self, pos: Pos2, surface: &S) {
        let Some(selection) = &mut self.selection else {
            return;
        };
        // Only the selected label is draggable; pressing another label does
        // not steal the selection.
        if self.document.hit_test(pos, surface) != Some(selection.label) {
            return;
        }
        let Some(label) = self.document.label(selection.label) else {
            return;
        };
        selection.drag = Some(label.pos - pos);
        debug!("drag started at ({:.1}, {:.1})", pos.x, pos.y);
    }

    fn drag_to(&mut self, pos: Pos2, surface: &mut S) {
        let Some(selection) = &mut self.selection else {
            return;
        };
        let Some(offset) = selection.drag else {
            return;
        };
        let Some(label) = self.document.label_mut(selection.label) else {
            return;
        };
        label.pos = pos + offset;
        // Erase the previous rendering, then repaint at the new position.
        surface.restore(&selection.snapshot);
        label.draw(surface);
    }

    /// Repaint every recorded segment and label. Call after anything that
    /// overwrote the surface pixels wholesale.
    pub fn replay(&self, surface: &mut S) {
        self.document.replay(surface);
    }

    /// Run a destructive full-surface transform, then replay the overlay
    /// on top of whatever it produced.
    ///
    /// The selection is dropped first: its snapshot predates the transform
    /// and no longer matches the surface.
    pub fn apply_transform(&mut self, surface: &mut S, transform: impl FnOnce(&mut S)) {
        self.selection = None;
        transform(surface);
        self.replay(surface);
    }

    /// Clear the surface and forget every recorded annotation.
    pub fn clear_all(&mut self, surface: &mut S) {
        surface.clear();
        self.reset();
    }

    /// Drop both logs and every transient interaction state.
    pub fn reset(&mut self) {
        self.document.clear();
        self.selection = None;
        self.last_point = None;
        self.pending_text = None;
        info!("overlay reset");
    }
}
