use crate::{
    decor::{ConfettiPiece, FloatingHeart},
    escape::{Displacement, Relocation},
};

/// The page surface the controller drives. Implementations wrap the real DOM;
/// every call is a fire-and-forget mutation.
pub trait PageView: Send + Sync {
    fn set_yes_enabled(&self, enabled: bool);

    fn show_confirmation(&self);

    fn hide_confirmation(&self);

    /// Switches the negative control to fixed positioning at `relocation`.
    fn place_no_button(&self, relocation: &Relocation);

    fn shift_no_button(&self, displacement: &Displacement);

    /// Drops any placement or shift, back to the stylesheet layout.
    fn reset_no_button(&self);

    fn alert(&self, message: &str);

    fn reload(&self);

    fn add_heart(&self, heart: &FloatingHeart);

    fn remove_heart(&self, id: u64);

    fn add_confetti(&self, piece: &ConfettiPiece);

    fn remove_confetti(&self, id: u64);
}
