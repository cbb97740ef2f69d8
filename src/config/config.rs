use std::time::Duration;

pub const APP_NAME: &str = "Portfolio Gallery";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_AUTHOR: &str = env!("CARGO_PKG_AUTHORS");

pub const SETTINGS_DIR: &str = "PortfolioGallery";
pub const SETTINGS_FILE: &str = "settings.toml";
pub const MANIFEST_FILE: &str = "gallery.toml";

// Lightbox
pub const LIGHTBOX_SHOW_DELAY: Duration = Duration::from_millis(10);
pub const LIGHTBOX_FADE: Duration = Duration::from_millis(300);
pub const IMAGE_FADE_OUT: Duration = Duration::from_millis(200);
pub const IMAGE_FADE_IN: Duration = Duration::from_millis(300);

// Imágenes
pub const FULL_IMAGE_MAX: (u32, u32) = (1920, 1080);
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 480;
pub const DEFAULT_PRELOAD_RANGE: usize = 1;
pub const MAX_PRELOAD_RANGE: usize = 8;
pub const FULL_IMAGE_CACHE_SIZE: usize = 5;

// Página
pub const NAV_SOLID_THRESHOLD: f32 = 100.0;
pub const NAV_ALPHA_TOP: f32 = 0.95;
pub const NAV_ALPHA_SCROLLED: f32 = 0.98;
pub const SECTION_ACTIVATION_OFFSET: f32 = 200.0;
pub const PARALLAX_RATE: f32 = -0.5;
pub const REVEAL_DURATION: f32 = 0.6;
pub const NARROW_LAYOUT_WIDTH: f32 = 768.0;
pub const PAGE_COVER_FADE: Duration = Duration::from_millis(500);
pub const HERO_ENTRANCE: Duration = Duration::from_millis(800);
pub const HERO_ENTRANCE_STEP: Duration = Duration::from_millis(200);
pub const HERO_ENTRANCE_RISE: f32 = 30.0;

// Formulario y notificaciones
pub const FORM_SEND_DELAY: Duration = Duration::from_secs(2);
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn about_dialog_credits_the_package_authors() {
        assert_eq!(APP_AUTHOR, "Portfolio Gallery developers");
        assert!(HERO_ENTRANCE_STEP < HERO_ENTRANCE);
    }
}
