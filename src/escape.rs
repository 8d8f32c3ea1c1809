//! # Negative Control
//!
//! How the "no" button avoids being pressed. The page inspects the pointer
//! capability once at load and picks one strategy:
//!
//! - **Coarse pointer** (touch first): every press teleports the button somewhere
//!   at least [`MIN_ESCAPE_DISTANCE`] away from the finger. Clicks are swallowed
//!   and treated as presses, so the relocation always wins.
//! - **Fine pointer** (mouse first): hovering nudges the button inside its
//!   container. A click that still lands counts as a refusal.
//!
//! Strategies only decide; the [`PageController`](crate::controller::PageController)
//! applies the resulting [`Reaction`] to the view.
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    config::{
        HOVER_MAX_MOVE, MAX_RELOCATION_ATTEMPTS, MAX_TILT_DEGREES, MIN_ESCAPE_DISTANCE,
        VIEWPORT_PADDING,
    },
    geometry::{Layout, Point},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PointerCapability {
    Coarse,
    Fine,
}

/// Fixed-position placement of the button after an escape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relocation {
    /// Top-left corner in viewport pixels.
    pub origin: Point,
    pub rotation: f64,
    /// Candidates drawn, including the accepted one.
    pub attempts: u32,
    /// `false` when the attempt budget ran out and the last candidate was kept.
    pub escaped: bool,
}

/// Transient translate/rotate applied on hover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reaction {
    Relocate(Relocation),
    Displace(Displacement),
    /// A click landed; the attempt counts.
    Refuse,
    Ignore,
}

pub trait EscapeStrategy: Send {
    fn capability(&self) -> PointerCapability;

    /// Touch-start or pointer-down on the control.
    fn on_press(&mut self, at: Point, layout: &Layout) -> Reaction;

    /// Pointer entering the control.
    fn on_hover(&mut self, layout: &Layout) -> Reaction;

    /// A completed click on the control.
    fn on_click(&mut self, at: Point, layout: &Layout) -> Reaction;

    /// Whether the host should cancel the click's default action.
    fn suppresses_default_click(&self) -> bool;

    fn suppresses_context_menu(&self) -> bool {
        true
    }
}

pub fn for_capability(capability: PointerCapability) -> Box<dyn EscapeStrategy> {
    let rng = StdRng::from_entropy();

    match capability {
        PointerCapability::Coarse => Box::new(CoarsePointerEscape::new(rng)),
        PointerCapability::Fine => Box::new(FinePointerEscape::new(rng)),
    }
}

fn tilt(rng: &mut StdRng) -> f64 {
    rng.gen_range(-MAX_TILT_DEGREES..MAX_TILT_DEGREES)
}

pub struct CoarsePointerEscape {
    rng: StdRng,
}

impl CoarsePointerEscape {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Draws random origins inside the padded viewport until the button's
    /// center is far enough from `from`, giving up after
    /// [`MAX_RELOCATION_ATTEMPTS`] candidates.
    pub fn relocate(&mut self, from: Point, layout: &Layout) -> Relocation {
        let max_x = layout.viewport.width - layout.button.width - VIEWPORT_PADDING;
        let max_y = layout.viewport.height - layout.button.height - VIEWPORT_PADDING;
        let span_x = (max_x - VIEWPORT_PADDING).max(0.0);
        let span_y = (max_y - VIEWPORT_PADDING).max(0.0);

        let mut origin = Point::default();
        let mut attempts = 0;
        let mut escaped = false;

        while attempts < MAX_RELOCATION_ATTEMPTS {
            origin = Point::new(
                VIEWPORT_PADDING + self.rng.gen_range(0.0..1.0) * span_x,
                VIEWPORT_PADDING + self.rng.gen_range(0.0..1.0) * span_y,
            );
            attempts += 1;

            if from.distance(layout.button_center(origin)) >= MIN_ESCAPE_DISTANCE {
                escaped = true;
                break;
            }
        }

        Relocation {
            origin,
            rotation: tilt(&mut self.rng),
            attempts,
            escaped,
        }
    }
}

impl EscapeStrategy for CoarsePointerEscape {
    fn capability(&self) -> PointerCapability {
        PointerCapability::Coarse
    }

    fn on_press(&mut self, at: Point, layout: &Layout) -> Reaction {
        Reaction::Relocate(self.relocate(at, layout))
    }

    fn on_hover(&mut self, _layout: &Layout) -> Reaction {
        Reaction::Ignore
    }

    fn on_click(&mut self, at: Point, layout: &Layout) -> Reaction {
        Reaction::Relocate(self.relocate(at, layout))
    }

    fn suppresses_default_click(&self) -> bool {
        true
    }
}

pub struct FinePointerEscape {
    rng: StdRng,
}

impl FinePointerEscape {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn displace(&mut self) -> Displacement {
        Displacement {
            dx: self.rng.gen_range(-HOVER_MAX_MOVE..HOVER_MAX_MOVE),
            dy: self.rng.gen_range(-HOVER_MAX_MOVE / 2.0..HOVER_MAX_MOVE / 2.0),
            rotation: tilt(&mut self.rng),
        }
    }
}

impl EscapeStrategy for FinePointerEscape {
    fn capability(&self) -> PointerCapability {
        PointerCapability::Fine
    }

    fn on_press(&mut self, _at: Point, _layout: &Layout) -> Reaction {
        Reaction::Ignore
    }

    fn on_hover(&mut self, _layout: &Layout) -> Reaction {
        Reaction::Displace(self.displace())
    }

    fn on_click(&mut self, _at: Point, _layout: &Layout) -> Reaction {
        Reaction::Refuse
    }

    fn suppresses_default_click(&self) -> bool {
        true
    }
}
