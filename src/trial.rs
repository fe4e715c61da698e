use marking_core::{ItemLabel, Layout, MenuItems, Point, SelectionObserver};
use std::time::{Duration, Instant};

/// One finished selection, kept only while experiment mode is on.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    pub layout: Layout,
    pub start: Point,
    pub end: Point,
    pub index: Option<usize>,
    pub label: Option<ItemLabel>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy)]
struct OpenTrial {
    start: Point,
    started_at: Instant,
}

/// Host half of the menu. Tracks visibility and the highlight a renderer
/// would paint, reports each selection, and records trials.
pub struct TrialRecorder {
    layout: Layout,
    items: MenuItems,
    experiment: bool,
    visible: bool,
    highlight: Option<usize>,
    redraws: usize,
    open: Option<OpenTrial>,
    records: Vec<TrialRecord>,
    last_message: Option<String>,
}

impl TrialRecorder {
    pub fn new(layout: Layout, items: MenuItems, experiment: bool) -> Self {
        Self {
            layout,
            items,
            experiment,
            visible: false,
            highlight: None,
            redraws: 0,
            open: None,
            records: Vec::new(),
            last_message: None,
        }
    }

    pub fn items(&self) -> &MenuItems {
        &self.items
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn take_records(&mut self) -> Vec<TrialRecord> {
        std::mem::take(&mut self.records)
    }

    /// What the user was told after the last selection.
    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }

    fn label(&self, index: Option<usize>) -> Option<ItemLabel> {
        index.and_then(|i| self.items.get(i)).cloned()
    }
}

impl SelectionObserver for TrialRecorder {
    fn on_selection_start(&mut self, anchor: Point) {
        self.visible = true;
        if self.experiment {
            self.open = Some(OpenTrial {
                start: anchor,
                started_at: Instant::now(),
            });
        }
        log::debug!(
            "{} menu opened at ({:.1}, {:.1})",
            self.layout,
            anchor.x,
            anchor.y
        );
    }

    fn on_highlight_changed(&mut self, index: Option<usize>) {
        self.highlight = index;
        self.redraws += 1;
        log::trace!("Redraw with highlight {:?}", index);
    }

    fn on_selection_end(&mut self, index: Option<usize>, point: Point) {
        self.visible = false;
        self.highlight = None;

        let label = self.label(index);
        let message = match &label {
            Some(l) => format!("Selected {}", l),
            None => "Nothing selected".to_string(),
        };
        log::info!("{}", message);
        self.last_message = Some(message);

        if let Some(open) = self.open.take() {
            let record = TrialRecord {
                layout: self.layout,
                start: open.start,
                end: point,
                index,
                label,
                elapsed: open.started_at.elapsed(),
            };
            log::info!(
                "Trial {} finished: {:?} in {} ms",
                self.records.len() + 1,
                record.index,
                record.elapsed.as_millis()
            );
            self.records.push(record);
        }
        log::debug!("{} menu closed", self.layout);
    }
}
