//! # Decor
//!
//! Purely cosmetic particles: the floating hearts behind the page and the
//! confetti burst after a YES.
//!
//! Every particle's removal is scheduled the moment it is added, so a page left
//! open for hours holds at most a few dozen nodes. Both effects run as tokio
//! tasks owned by a handle; dropping or stopping the handle cancels the task
//! together with its pending removals.
use std::{cmp::Reverse, collections::BinaryHeap, sync::Arc, time::Duration};

use rand::{Rng, rngs::StdRng};
use tokio::{
    task::JoinHandle,
    time::{self, Instant},
};

use crate::{
    config::{CONFETTI_LIFETIME, CONFETTI_PIECES, CONFETTI_STAGGER, HEART_PERIOD, INITIAL_HEARTS},
    view::PageView,
};

pub const HEART_SYMBOLS: [&str; 8] = ["💕", "💖", "💗", "💓", "💝", "❤️", "💘", "💞"];
pub const CONFETTI_COLORS: [&str; 6] = [
    "#ff6b9d", "#ff4785", "#ffc2d1", "#ffe4ec", "#ff85a1", "#ffd700",
];

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingHeart {
    pub id: u64,
    pub symbol: &'static str,
    /// Horizontal position, percent of the container width.
    pub left_pct: f64,
    /// Only set for the hearts scattered at mount; later ones rise from the bottom.
    pub top_pct: Option<f64>,
    pub size_rem: f64,
    pub duration: Duration,
    pub delay: Duration,
}

impl FloatingHeart {
    pub fn random(id: u64, rng: &mut StdRng, scattered: bool) -> Self {
        Self {
            id,
            symbol: HEART_SYMBOLS[rng.gen_range(0..HEART_SYMBOLS.len())],
            left_pct: rng.gen_range(0.0..100.0),
            top_pct: scattered.then(|| rng.gen_range(0.0..100.0)),
            size_rem: rng.gen_range(1.0..2.5),
            duration: Duration::from_secs_f64(rng.gen_range(4.0..10.0)),
            delay: if scattered {
                Duration::from_secs_f64(rng.gen_range(0.0..5.0))
            } else {
                Duration::ZERO
            },
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.duration + self.delay
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfettiPiece {
    pub id: u64,
    pub left_pct: f64,
    pub color: &'static str,
    pub duration: Duration,
    pub round: bool,
}

impl ConfettiPiece {
    pub fn random(id: u64, rng: &mut StdRng) -> Self {
        Self {
            id,
            left_pct: rng.gen_range(0.0..100.0),
            color: CONFETTI_COLORS[rng.gen_range(0..CONFETTI_COLORS.len())],
            duration: Duration::from_secs_f64(rng.gen_range(2.0..5.0)),
            round: rng.gen_bool(0.5),
        }
    }
}

/// Removal deadlines, earliest first.
#[derive(Default)]
struct Expiries {
    queue: BinaryHeap<Reverse<(Instant, u64)>>,
}

impl Expiries {
    fn schedule(&mut self, after: Duration, id: u64) {
        self.queue.push(Reverse((Instant::now() + after, id)));
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Resolves with the next expired id. Pending forever while empty.
    /// Nothing is popped before the deadline, so dropping it early is harmless.
    async fn next_due(&mut self) -> u64 {
        let Some(Reverse((at, id))) = self.queue.peek().copied() else {
            return std::future::pending().await;
        };

        time::sleep_until(at).await;
        self.queue.pop();
        id
    }
}

/// Background hearts, running until stopped or dropped.
pub struct AmbientHearts {
    handle: JoinHandle<()>,
}

impl AmbientHearts {
    pub fn start(view: Arc<dyn PageView>, rng: StdRng) -> Self {
        Self {
            handle: tokio::spawn(run_hearts(view, rng)),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(self) {}
}

impl Drop for AmbientHearts {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

struct HeartField {
    view: Arc<dyn PageView>,
    rng: StdRng,
    expiries: Expiries,
    next_id: u64,
}

impl HeartField {
    fn spawn(&mut self, scattered: bool) {
        let heart = FloatingHeart::random(self.next_id, &mut self.rng, scattered);
        self.next_id += 1;

        self.view.add_heart(&heart);
        self.expiries.schedule(heart.lifetime(), heart.id);
    }
}

async fn run_hearts(view: Arc<dyn PageView>, rng: StdRng) {
    let mut field = HeartField {
        view,
        rng,
        expiries: Expiries::default(),
        next_id: 0,
    };

    for _ in 0..INITIAL_HEARTS {
        field.spawn(true);
    }

    let mut interval = time::interval_at(Instant::now() + HEART_PERIOD, HEART_PERIOD);

    loop {
        let expired = tokio::select! {
            _ = interval.tick() => None,
            id = field.expiries.next_due() => Some(id),
        };

        match expired {
            Some(id) => field.view.remove_heart(id),
            None => field.spawn(false),
        }
    }
}

/// One-shot confetti. Finishes on its own once the last piece is removed.
pub struct ConfettiBurst {
    handle: JoinHandle<()>,
}

impl ConfettiBurst {
    pub fn launch(view: Arc<dyn PageView>, rng: StdRng) -> Self {
        Self {
            handle: tokio::spawn(run_confetti(view, rng)),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ConfettiBurst {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run_confetti(view: Arc<dyn PageView>, mut rng: StdRng) {
    let mut expiries = Expiries::default();

    for id in 0..CONFETTI_PIECES as u64 {
        if id > 0 {
            time::sleep(CONFETTI_STAGGER).await;
        }

        let piece = ConfettiPiece::random(id, &mut rng);
        view.add_confetti(&piece);
        expiries.schedule(CONFETTI_LIFETIME, id);
    }

    while !expiries.is_empty() {
        let id = expiries.next_due().await;
        view.remove_confetti(id);
    }
}
