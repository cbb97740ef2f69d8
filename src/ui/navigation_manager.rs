use crate::config::config::SECTION_ACTIVATION_OFFSET;
use crate::i18n::en::{NAV_ABOUT, NAV_CONTACT, NAV_HOME, NAV_WORK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    About,
    Work,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Home, Section::About, Section::Work, Section::Contact];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => NAV_HOME,
            Section::About => NAV_ABOUT,
            Section::Work => NAV_WORK,
            Section::Contact => NAV_CONTACT,
        }
    }
}

/// Barra de navegación de la página: menú, enlace activo y scroll pendiente.
pub struct NavigationManager {
    menu_open: bool,
    active: Option<Section>,
    scroll_target: Option<Section>,
    section_tops: Vec<(Section, f32)>,
}

impl NavigationManager {
    pub fn new() -> Self {
        Self {
            menu_open: false,
            active: None,
            scroll_target: None,
            section_tops: Vec::new(),
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Pulsar un enlace cierra el menú y programa el desplazamiento.
    pub fn select(&mut self, section: Section) {
        self.menu_open = false;
        self.scroll_target = Some(section);
    }

    /// Consumido por la sección al pintarse, que hace `scroll_to_me`.
    pub fn take_scroll_target(&mut self, section: Section) -> bool {
        if self.scroll_target == Some(section) {
            self.scroll_target = None;
            true
        } else {
            false
        }
    }

    pub fn begin_frame(&mut self) {
        self.section_tops.clear();
    }

    /// `top` en coordenadas del contenido desplazable.
    pub fn record_section_top(&mut self, section: Section, top: f32) {
        self.section_tops.push((section, top));
    }

    pub fn update_active(&mut self, scroll_y: f32) {
        self.active = active_section(&self.section_tops, scroll_y);
    }

    pub fn active(&self) -> Option<Section> {
        self.active
    }
}

/// Última sección (en orden de página) cuyo borde superior ya se alcanzó.
pub fn active_section(section_tops: &[(Section, f32)], scroll_y: f32) -> Option<Section> {
    section_tops
        .iter()
        .filter(|(_, top)| scroll_y >= top - SECTION_ACTIVATION_OFFSET)
        .last()
        .map(|(section, _)| *section)
}
