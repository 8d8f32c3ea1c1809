use parking_lot::Mutex;

use crate::{
    decor::{ConfettiPiece, FloatingHeart},
    escape::{Displacement, Relocation},
    view::PageView,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    YesEnabled(bool),
    ShowConfirmation,
    HideConfirmation,
    Place(Relocation),
    Shift(Displacement),
    ResetNo,
    Alert(String),
    Reload,
    AddHeart(u64),
    RemoveHeart(u64),
    AddConfetti(u64),
    RemoveConfetti(u64),
}

#[derive(Default)]
pub struct RecordingView {
    events: Mutex<Vec<Event>>,
}

impl RecordingView {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    pub fn count(&self, wanted: &Event) -> usize {
        self.events.lock().iter().filter(|e| *e == wanted).count()
    }

    fn push(&self, event: Event) {
        self.events.lock().push(event);
    }
}

impl PageView for RecordingView {
    fn set_yes_enabled(&self, enabled: bool) {
        self.push(Event::YesEnabled(enabled));
    }

    fn show_confirmation(&self) {
        self.push(Event::ShowConfirmation);
    }

    fn hide_confirmation(&self) {
        self.push(Event::HideConfirmation);
    }

    fn place_no_button(&self, relocation: &Relocation) {
        self.push(Event::Place(*relocation));
    }

    fn shift_no_button(&self, displacement: &Displacement) {
        self.push(Event::Shift(*displacement));
    }

    fn reset_no_button(&self) {
        self.push(Event::ResetNo);
    }

    fn alert(&self, message: &str) {
        self.push(Event::Alert(message.to_string()));
    }

    fn reload(&self) {
        self.push(Event::Reload);
    }

    fn add_heart(&self, heart: &FloatingHeart) {
        self.push(Event::AddHeart(heart.id));
    }

    fn remove_heart(&self, id: u64) {
        self.push(Event::RemoveHeart(id));
    }

    fn add_confetti(&self, piece: &ConfettiPiece) {
        self.push(Event::AddConfetti(piece.id));
    }

    fn remove_confetti(&self, id: u64) {
        self.push(Event::RemoveConfetti(id));
    }
}
