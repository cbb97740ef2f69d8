//! Máquina de estados del lightbox.
//!
//! El controlador es la única fuente de verdad sobre qué obra se está viendo.
//! Todo lo visual (imágenes, fundidos, bloqueo del scroll de la página) lo
//! hace el [`Renderer`], que recibe una señal por cada cambio de estado.

use crate::core::error::LightboxError;
use crate::core::gallery::{GalleryCollection, GalleryItem};

/// Contador monótono de cambios de estado.
///
/// El renderer etiqueta sus efectos diferidos con la generación que los
/// originó y los descarta si ya no coincide con la viva.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn bump(&mut self) {
        self.0 += 1;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LightboxState {
    #[default]
    Closed,
    Open {
        index: usize,
    },
}

impl LightboxState {
    pub fn is_open(&self) -> bool {
        matches!(self, LightboxState::Open { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match self {
            LightboxState::Open { index } => Some(*index),
            LightboxState::Closed => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    pub fn delta(self) -> isize {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

/// Señales del controlador hacia la capa visual.
pub trait Renderer {
    fn on_open(&mut self, item: &GalleryItem, index: usize, total: usize, generation: Generation);
    fn on_close(&mut self);
    fn on_navigate(
        &mut self,
        item: &GalleryItem,
        index: usize,
        total: usize,
        generation: Generation,
    );
    fn on_boundary_state(&mut self, can_prev: bool, can_next: bool);
}

pub struct LightboxController<R: Renderer> {
    gallery: GalleryCollection,
    state: LightboxState,
    generation: Generation,
    renderer: R,
}

impl<R: Renderer> LightboxController<R> {
    pub fn new(gallery: GalleryCollection, renderer: R) -> Self {
        Self {
            gallery,
            state: LightboxState::Closed,
            generation: Generation::default(),
            renderer,
        }
    }

    /// Abre (o reemplaza, si ya está abierto) la obra en `index`.
    pub fn open(&mut self, index: usize) -> Result<(), LightboxError> {
        let total = self.gallery.len();
        let Some(item) = self.gallery.get(index) else {
            return Err(LightboxError::OutOfRange { index, len: total });
        };

        self.state = LightboxState::Open { index };
        self.generation.bump();
        tracing::debug!(index, total, "lightbox opened");

        self.renderer.on_open(item, index, total, self.generation);
        self.emit_boundary_state();
        Ok(())
    }

    /// Cerrar un lightbox ya cerrado no hace nada.
    pub fn close(&mut self) {
        if !self.state.is_open() {
            return;
        }

        self.state = LightboxState::Closed;
        self.generation.bump();
        tracing::debug!("lightbox closed");
        self.renderer.on_close();
    }

    /// Mueve el cursor un paso. En los extremos no hace nada (sin wraparound).
    ///
    /// Devuelve `true` si el estado cambió.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        let Some(target) = self.target_index(direction) else {
            return false;
        };
        let total = self.gallery.len();
        let Some(item) = self.gallery.get(target) else {
            return false;
        };

        self.state = LightboxState::Open { index: target };
        self.generation.bump();
        tracing::trace!(index = target, ?direction, "lightbox navigated");

        self.renderer.on_navigate(item, target, total, self.generation);
        self.emit_boundary_state();
        true
    }

    pub fn can_navigate(&self, direction: Direction) -> bool {
        self.target_index(direction).is_some()
    }

    pub fn current_item(&self) -> Option<&GalleryItem> {
        self.state
            .current_index()
            .and_then(|index| self.gallery.get(index))
    }

    pub fn state(&self) -> LightboxState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn gallery(&self) -> &GalleryCollection {
        &self.gallery
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn target_index(&self, direction: Direction) -> Option<usize> {
        let current = self.state.current_index()?;
        current
            .checked_add_signed(direction.delta())
            .filter(|&target| target < self.gallery.len())
    }

    fn emit_boundary_state(&mut self) {
        let can_prev = self.can_navigate(Direction::Previous);
        let can_next = self.can_navigate(Direction::Next);
        self.renderer.on_boundary_state(can_prev, can_next);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Signal {
        Open { index: usize, total: usize },
        Close,
        Navigate { index: usize, total: usize },
        Boundary { can_prev: bool, can_next: bool },
    }

    #[derive(Default)]
    pub(crate) struct RecordingRenderer {
        pub signals: Vec<Signal>,
    }

    impl Renderer for RecordingRenderer {
        fn on_open(
            &mut self,
            _item: &GalleryItem,
            index: usize,
            total: usize,
            _generation: Generation,
        ) {
            self.signals.push(Signal::Open { index, total });
        }

        fn on_close(&mut self) {
            self.signals.push(Signal::Close);
        }

        fn on_navigate(
            &mut self,
            _item: &GalleryItem,
            index: usize,
            total: usize,
            _generation: Generation,
        ) {
            self.signals.push(Signal::Navigate { index, total });
        }

        fn on_boundary_state(&mut self, can_prev: bool, can_next: bool) {
            self.signals.push(Signal::Boundary { can_prev, can_next });
        }
    }

    pub(crate) fn gallery(n: usize) -> GalleryCollection {
        GalleryCollection::new(
            (0..n)
                .map(|i| {
                    GalleryItem::new(format!("work_{i}.jpg"), format!("Work {i}"), "Bronze", "2020")
                })
                .collect(),
        )
    }

    fn controller(n: usize) -> LightboxController<RecordingRenderer> {
        LightboxController::new(gallery(n), RecordingRenderer::default())
    }

    #[test]
    fn starts_closed() {
        let lightbox = controller(3);
        assert_eq!(lightbox.state(), LightboxState::Closed);
        assert!(lightbox.current_item().is_none());
        assert!(!lightbox.can_navigate(Direction::Next));
        assert!(!lightbox.can_navigate(Direction::Previous));
    }

    #[test]
    fn open_out_of_range_is_rejected() {
        let mut lightbox = controller(3);
        assert_eq!(
            lightbox.open(3),
            Err(LightboxError::OutOfRange { index: 3, len: 3 })
        );
        assert!(!lightbox.is_open());
        assert!(lightbox.renderer().signals.is_empty());
    }

    #[test]
    fn open_on_empty_gallery_is_rejected() {
        let mut lightbox = controller(0);
        assert_eq!(
            lightbox.open(0),
            Err(LightboxError::OutOfRange { index: 0, len: 0 })
        );
        assert_eq!(lightbox.generation(), Generation::default());
    }

    #[test]
    fn open_signals_item_and_boundaries() {
        let mut lightbox = controller(3);
        lightbox.open(0).unwrap();
        assert_eq!(
            lightbox.renderer().signals,
            vec![
                Signal::Open { index: 0, total: 3 },
                Signal::Boundary { can_prev: false, can_next: true },
            ]
        );
    }

    #[test]
    fn five_item_walkthrough() {
        let mut lightbox = controller(5);
        lightbox.open(2).unwrap();
        assert_eq!(lightbox.state().current_index(), Some(2));

        assert!(lightbox.navigate(Direction::Next));
        assert_eq!(lightbox.state().current_index(), Some(3));
        assert!(lightbox
            .renderer()
            .signals
            .contains(&Signal::Navigate { index: 3, total: 5 }));

        assert!(lightbox.navigate(Direction::Next));
        assert_eq!(lightbox.state().current_index(), Some(4));

        let before = lightbox.renderer().signals.len();
        let generation = lightbox.generation();
        assert!(!lightbox.navigate(Direction::Next));
        assert_eq!(lightbox.state().current_index(), Some(4));
        assert_eq!(lightbox.renderer().signals.len(), before);
        assert_eq!(lightbox.generation(), generation);

        assert!(lightbox.navigate(Direction::Previous));
        assert_eq!(lightbox.state().current_index(), Some(3));

        lightbox.close();
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.renderer().signals.last(), Some(&Signal::Close));
    }

    #[test]
    fn close_twice_equals_close_once() {
        let mut lightbox = controller(2);
        lightbox.open(1).unwrap();
        lightbox.close();
        let signals = lightbox.renderer().signals.clone();
        let generation = lightbox.generation();

        lightbox.close();
        assert_eq!(lightbox.renderer().signals, signals);
        assert_eq!(lightbox.generation(), generation);
        assert_eq!(lightbox.state(), LightboxState::Closed);
    }

    #[test]
    fn navigate_while_closed_does_nothing() {
        let mut lightbox = controller(3);
        assert!(!lightbox.navigate(Direction::Next));
        assert!(lightbox.renderer().signals.is_empty());
    }

    #[test]
    fn reopen_replaces_current_item() {
        let mut lightbox = controller(4);
        lightbox.open(0).unwrap();
        lightbox.open(3).unwrap();
        assert_eq!(lightbox.current_item().unwrap().title(), "Work 3");
        assert!(!lightbox.can_navigate(Direction::Next));
    }

    #[test]
    fn single_item_gallery_has_no_navigation() {
        let mut lightbox = controller(1);
        lightbox.open(0).unwrap();
        assert!(!lightbox.can_navigate(Direction::Previous));
        assert!(!lightbox.can_navigate(Direction::Next));
        assert_eq!(
            lightbox.renderer().signals.last(),
            Some(&Signal::Boundary { can_prev: false, can_next: false })
        );
    }

    #[test]
    fn every_state_change_bumps_generation() {
        let mut lightbox = controller(3);
        let g0 = lightbox.generation();
        lightbox.open(1).unwrap();
        let g1 = lightbox.generation();
        lightbox.navigate(Direction::Next);
        let g2 = lightbox.generation();
        lightbox.close();
        let g3 = lightbox.generation();
        assert!(g0 < g1 && g1 < g2 && g2 < g3);
    }

    proptest! {
        #[test]
        fn open_then_current_item_matches(n in 1usize..20, pick in 0usize..20) {
            let index = pick % n;
            let mut lightbox = controller(n);
            lightbox.open(index).unwrap();
            prop_assert_eq!(lightbox.current_item(), lightbox.gallery().get(index));
        }

        #[test]
        fn open_beyond_len_fails(n in 0usize..20, extra in 0usize..5) {
            let mut lightbox = controller(n);
            prop_assert!(lightbox.open(n + extra).is_err());
            prop_assert!(!lightbox.is_open());
        }

        #[test]
        fn open_close_open_round_trips(n in 1usize..20, pick in 0usize..20) {
            let index = pick % n;
            let mut lightbox = controller(n);
            lightbox.open(index).unwrap();
            let first = lightbox.current_item().cloned();
            lightbox.close();
            lightbox.open(index).unwrap();
            prop_assert_eq!(lightbox.current_item().cloned(), first);
        }

        #[test]
        fn index_stays_in_bounds(
            n in 1usize..10,
            start in 0usize..10,
            steps in proptest::collection::vec(any::<bool>(), 0..40),
        ) {
            let mut lightbox = controller(n);
            lightbox.open(start % n).unwrap();
            for forward in steps {
                let direction = if forward { Direction::Next } else { Direction::Previous };
                let expected = lightbox.can_navigate(direction);
                prop_assert_eq!(lightbox.navigate(direction), expected);
                let index = lightbox.state().current_index().unwrap();
                prop_assert!(index < n);
            }
        }

        #[test]
        fn edges_clamp(n in 1usize..10) {
            let mut lightbox = controller(n);
            lightbox.open(n - 1).unwrap();
            prop_assert!(!lightbox.can_navigate(Direction::Next));
            prop_assert!(!lightbox.navigate(Direction::Next));
            prop_assert_eq!(lightbox.state().current_index(), Some(n - 1));

            lightbox.open(0).unwrap();
            prop_assert!(!lightbox.can_navigate(Direction::Previous));
            prop_assert!(!lightbox.navigate(Direction::Previous));
            prop_assert_eq!(lightbox.state().current_index(), Some(0));
        }
    }
}
