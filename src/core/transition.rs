//! Secuencia de fundidos del lightbox.
//!
//! Vive del lado del renderer: el controlador cambia de estado al instante y
//! esto sólo decide qué se pinta y con qué opacidad. El cambio de imagen se
//! difiere hasta que termina el fundido de salida; si entretanto la
//! generación viva cambió (cierre o navegación posterior) el cambio se
//! descarta.

use crate::config::config::{IMAGE_FADE_IN, IMAGE_FADE_OUT, LIGHTBOX_FADE, LIGHTBOX_SHOW_DELAY};
use crate::core::lightbox::Generation;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSwap {
    pub index: usize,
    pub generation: Generation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    Hidden,
    Opening { started: Instant },
    Shown,
    Closing { started: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageFade {
    Steady,
    FadingOut { started: Instant, pending: PendingSwap },
    FadingIn { started: Instant },
}

#[derive(Debug, Clone)]
pub struct FadeSequence {
    overlay: Overlay,
    image: ImageFade,
    displayed: Option<usize>,
}

impl Default for FadeSequence {
    fn default() -> Self {
        Self {
            overlay: Overlay::Hidden,
            image: ImageFade::Steady,
            displayed: None,
        }
    }
}

impl FadeSequence {
    pub fn open(&mut self, now: Instant, index: usize) {
        self.overlay = Overlay::Opening { started: now };
        self.image = ImageFade::Steady;
        self.displayed = Some(index);
    }

    /// Si ya hay un fundido de salida en curso, gana el destino más reciente.
    pub fn navigate(&mut self, now: Instant, index: usize, generation: Generation) {
        let pending = PendingSwap { index, generation };
        self.image = match self.image {
            ImageFade::FadingOut { started, .. } => ImageFade::FadingOut { started, pending },
            _ => ImageFade::FadingOut { started: now, pending },
        };
    }

    pub fn close(&mut self, now: Instant) {
        if self.overlay == Overlay::Hidden {
            return;
        }
        self.overlay = Overlay::Closing { started: now };
        self.image = ImageFade::Steady;
    }

    /// Avanza las fases. Devuelve el índice recién mostrado si hubo cambio.
    pub fn advance(&mut self, now: Instant, live: Generation) -> Option<usize> {
        match self.overlay {
            Overlay::Opening { started }
                if elapsed(now, started) >= LIGHTBOX_SHOW_DELAY + LIGHTBOX_FADE =>
            {
                self.overlay = Overlay::Shown;
            }
            Overlay::Closing { started } if elapsed(now, started) >= LIGHTBOX_FADE => {
                self.overlay = Overlay::Hidden;
                self.displayed = None;
            }
            _ => {}
        }

        match self.image {
            ImageFade::FadingOut { started, pending }
                if elapsed(now, started) >= IMAGE_FADE_OUT =>
            {
                if pending.generation == live && self.accepts_swaps() {
                    self.displayed = Some(pending.index);
                    self.image = ImageFade::FadingIn { started: now };
                    return Some(pending.index);
                }
                tracing::trace!(index = pending.index, "stale image swap dropped");
                self.image = ImageFade::Steady;
            }
            ImageFade::FadingIn { started } if elapsed(now, started) >= IMAGE_FADE_IN => {
                self.image = ImageFade::Steady;
            }
            _ => {}
        }
        None
    }

    pub fn overlay_opacity(&self, now: Instant) -> f32 {
        match self.overlay {
            Overlay::Hidden => 0.0,
            Overlay::Shown => 1.0,
            Overlay::Opening { started } => {
                let t = elapsed(now, started).saturating_sub(LIGHTBOX_SHOW_DELAY);
                progress(t, LIGHTBOX_FADE)
            }
            Overlay::Closing { started } => 1.0 - progress(elapsed(now, started), LIGHTBOX_FADE),
        }
    }

    pub fn image_opacity(&self, now: Instant) -> f32 {
        match self.image {
            ImageFade::Steady => 1.0,
            ImageFade::FadingOut { started, .. } => {
                1.0 - progress(elapsed(now, started), IMAGE_FADE_OUT)
            }
            ImageFade::FadingIn { started } => progress(elapsed(now, started), IMAGE_FADE_IN),
        }
    }

    pub fn displayed_index(&self) -> Option<usize> {
        self.displayed
    }

    #[cfg(test)]
    pub fn pending_swap(&self) -> Option<PendingSwap> {
        match self.image {
            ImageFade::FadingOut { pending, .. } => Some(pending),
            _ => None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.overlay != Overlay::Hidden
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.overlay, Overlay::Closing { .. })
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.overlay, Overlay::Opening { .. } | Overlay::Closing { .. })
            || self.image != ImageFade::Steady
    }

    fn accepts_swaps(&self) -> bool {
        matches!(self.overlay, Overlay::Opening { .. } | Overlay::Shown)
    }
}

fn elapsed(now: Instant, since: Instant) -> Duration {
    now.saturating_duration_since(since)
}

fn progress(t: Duration, total: Duration) -> f32 {
    if total.is_zero() {
        return 1.0;
    }
    (t.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}
