use egui::Pos2;
use log::debug;

use crate::label::TextLabel;
use crate::segment::Segment;
use crate::surface::Surface;

/// Identifies a label by its slot in the document, so a stale selection can
/// never keep a removed or cleared label alive by accident.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LabelId(usize);

/// The retained overlay state: an ordered segment log plus the set of
/// placed labels.
///
/// Replaying both, in order, reconstructs every annotation after the
/// surface pixels have been overwritten wholesale (a dithering pass, a
/// reloaded background image). The segment log is a faithful redo log;
/// nothing else is needed to reproduce the drawing.
#[derive(Debug, Default)]
pub struct Document {
    segments: Vec<Segment>,
    labels: Vec<TextLabel>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_segment(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append a label and return its id. Labels keep insertion order; the
    /// latest one paints on top.
    pub fn add_label(&mut self, label: TextLabel) -> LabelId {
        self.labels.push(label);
        LabelId(self.labels.len() - 1)
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn label(&self, id: LabelId) -> Option<&TextLabel> {
        self.labels.get(id.0)
    }

    pub fn label_mut(&mut self, id: LabelId) -> Option<&mut TextLabel> {
        self.labels.get_mut(id.0)
    }

    /// Topmost label whose hit box contains `pos`.
    ///
    /// Later labels paint over earlier ones, so the set is searched in
    /// reverse insertion order and the first match wins.
    pub fn hit_test<S: Surface>(&self, pos: Pos2, surface: &S) -> Option<LabelId> {
        self.labels
            .iter()
            .enumerate()
            .rev()
            .find(|(_, label)| label.hit_box(surface).contains(pos))
            .map(|(index, _)| LabelId(index))
    }

    /// Redraw every segment in original order, then every label in
    /// insertion order, on top of whatever the surface currently holds.
    pub fn replay<S: Surface>(&self, surface: &mut S) {
        debug!(
            "replaying {} segments and {} labels",
            self.segments.len(),
            self.labels.len()
        );
        for segment in &self.segments {
            segment.draw(surface);
        }
        for label in &self.labels {
            label.draw(surface);
        }
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.labels.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.labels.is_empty()
    }
}
