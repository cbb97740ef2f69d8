//! Efectos ligados al scroll de la página.

use crate::config::config::{
    HERO_ENTRANCE, HERO_ENTRANCE_STEP, NAV_ALPHA_SCROLLED, NAV_ALPHA_TOP, NAV_SOLID_THRESHOLD,
    PAGE_COVER_FADE, PARALLAX_RATE,
};
use std::collections::HashSet;
use std::hash::Hash;
use std::time::Duration;

pub fn nav_background_alpha(scroll_y: f32) -> f32 {
    if scroll_y > NAV_SOLID_THRESHOLD {
        NAV_ALPHA_SCROLLED
    } else {
        NAV_ALPHA_TOP
    }
}

/// `None` una vez que la portada salió de la vista: se conserva el último valor.
pub fn parallax_offset(scroll_y: f32, hero_height: f32) -> Option<f32> {
    (scroll_y < hero_height).then(|| scroll_y * PARALLAX_RATE)
}

/// Entrada escalonada de la portada: el elemento `step` sube y aparece
/// `step * HERO_ENTRANCE_STEP` después de arrancar. Devuelve 0..=1 ya suavizado.
pub fn hero_entrance(since_start: Duration, step: u32) -> f32 {
    let t = since_start.saturating_sub(HERO_ENTRANCE_STEP * step);
    let linear = (t.as_secs_f32() / HERO_ENTRANCE.as_secs_f32()).clamp(0.0, 1.0);
    1.0 - (1.0 - linear).powi(3)
}

pub fn hero_entrance_finished(since_start: Duration, steps: u32) -> bool {
    since_start >= HERO_ENTRANCE_STEP * steps.saturating_sub(1) + HERO_ENTRANCE
        && since_start >= PAGE_COVER_FADE
}

/// Opacidad de la cortina que tapa la página al cargar.
pub fn page_cover_opacity(since_start: Duration) -> f32 {
    1.0 - (since_start.as_secs_f32() / PAGE_COVER_FADE.as_secs_f32()).clamp(0.0, 1.0)
}

/// Elementos que ya aparecieron; una vez revelado, un elemento no se oculta.
#[derive(Debug)]
pub struct RevealTracker<K> {
    revealed: HashSet<K>,
}

impl<K> Default for RevealTracker<K> {
    fn default() -> Self {
        Self {
            revealed: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash> RevealTracker<K> {
    pub fn observe(&mut self, key: K, visible: bool) -> bool {
        if visible {
            self.revealed.insert(key);
            return true;
        }
        self.revealed.contains(&key)
    }

    pub fn clear(&mut self) {
        self.revealed.clear();
    }
}
