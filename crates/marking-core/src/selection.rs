use crate::geometry::Geometry;
use crate::point::Point;
use rand::Rng;
use rand::rngs::SmallRng;
use strum::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, StrumDisplay)]
pub enum SelectionState {
    #[default]
    Idle,
    Tracking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum PointerKind {
    #[strum(to_string = "press", serialize = "down")]
    Press,
    Move,
    #[strum(to_string = "release", serialize = "up")]
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, point: Point) -> Self {
        Self { kind, point }
    }

    pub fn press(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Press, Point::new(x, y))
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, Point::new(x, y))
    }

    pub fn release(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Release, Point::new(x, y))
    }
}

/// Host side of a menu: shows and hides it, repaints the highlight, and
/// records trials.
pub trait SelectionObserver {
    fn on_selection_start(&mut self, _anchor: Point) {}

    /// The highlighted item changed and the menu should be redrawn.
    fn on_highlight_changed(&mut self, _index: Option<usize>) {}

    fn on_selection_end(&mut self, _index: Option<usize>, _point: Point) {}
}

impl SelectionObserver for () {}

impl<O: SelectionObserver + ?Sized> SelectionObserver for &mut O {
    fn on_selection_start(&mut self, anchor: Point) {
        (**self).on_selection_start(anchor);
    }

    fn on_highlight_changed(&mut self, index: Option<usize>) {
        (**self).on_highlight_changed(index);
    }

    fn on_selection_end(&mut self, index: Option<usize>, point: Point) {
        (**self).on_selection_end(index, point);
    }
}

/// Press, drag, release. One machine drives one menu instance; the
/// geometry decides what is under the pointer.
pub struct SelectionMachine<O, R = SmallRng> {
    geometry: Geometry,
    state: SelectionState,
    anchor: Option<Point>,
    current: Option<usize>,
    observer: O,
    rng: R,
}

impl<O: SelectionObserver, R: Rng> SelectionMachine<O, R> {
    pub fn new(geometry: Geometry, observer: O, rng: R) -> Self {
        Self {
            geometry,
            state: SelectionState::Idle,
            anchor: None,
            current: None,
            observer,
            rng,
        }
    }

    /// Feeds one pointer event. Returns `false` when the event does not fit
    /// the current state, in which case nothing changes.
    pub fn on_pointer_event(&mut self, event: PointerEvent) -> bool {
        match (self.state, event.kind) {
            (SelectionState::Idle, PointerKind::Press) => {
                self.start_selection(event.point);
                true
            }
            (SelectionState::Tracking, PointerKind::Move) => {
                let index = self.resolve_at(event.point);
                self.update_model(index);
                true
            }
            (SelectionState::Tracking, PointerKind::Release) => {
                let index = self.resolve_at(event.point);
                self.update_model(index);
                self.end_selection(index, event.point);
                true
            }
            _ => false,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    pub fn is_visible(&self) -> bool {
        self.state == SelectionState::Tracking
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    fn resolve_at(&self, point: Point) -> Option<usize> {
        self.anchor
            .and_then(|anchor| self.geometry.resolve(point - anchor))
    }

    fn start_selection(&mut self, point: Point) {
        self.anchor = Some(point);
        self.geometry.begin_session(&mut self.rng);
        self.state = SelectionState::Tracking;
        self.observer.on_selection_start(point);
    }

    fn update_model(&mut self, index: Option<usize>) {
        if index != self.current {
            self.current = index;
            self.observer.on_highlight_changed(index);
        }
    }

    fn end_selection(&mut self, index: Option<usize>, point: Point) {
        self.observer.on_selection_end(index, point);
        self.current = None;
        self.anchor = None;
        self.geometry.end_session();
        self.state = SelectionState::Idle;
    }
}
