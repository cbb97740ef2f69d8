use crate::core::error::LightboxError;
use crate::core::lightbox::{Direction, LightboxController, Renderer};

/// Entrada semántica del usuario sobre el lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxCommand {
    Open(usize),
    Close,
    Previous,
    Next,
    BackdropClicked,
}

/// Cada comando se traduce en exactamente una llamada al controlador.
pub fn dispatch<R: Renderer>(
    controller: &mut LightboxController<R>,
    command: LightboxCommand,
) -> Result<(), LightboxError> {
    match command {
        LightboxCommand::Open(index) => controller.open(index)?,
        LightboxCommand::Close | LightboxCommand::BackdropClicked => controller.close(),
        LightboxCommand::Previous => {
            controller.navigate(Direction::Previous);
        }
        LightboxCommand::Next => {
            controller.navigate(Direction::Next);
        }
    }
    Ok(())
}
