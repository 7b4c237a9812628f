use crate::shared::photo::Photo;

use super::overlay_instruction::OverlayInstruction;

/// Domain interface for drawing overlay instructions onto a photo.
///
/// The photo must already be at display size; instructions are in display pixels.
pub trait OverlayPainter: Send {
    fn paint(
        &self,
        photo: &mut Photo,
        instructions: &[OverlayInstruction],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
