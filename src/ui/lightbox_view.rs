use crate::core::gallery::GalleryItem;
use crate::core::input::LightboxCommand;
use crate::core::lightbox::{Generation, Renderer};
use crate::core::transition::FadeSequence;
use crate::i18n::en::{TEXT_IMAGE_FAILED, TEXT_LOADINGIMG};
use crate::ui::textures::{GalleryTextures, TextureSlot};
use egui::{pos2, vec2, Align2, Color32, FontId, Rect, RichText, Sense, Vec2};
use std::time::Instant;

const INFO_HEIGHT: f32 = 120.0;
const ACCENT: Color32 = Color32::from_rgb(212, 175, 55);

/// Renderer egui del lightbox: fundidos, bloqueo de scroll y pintado.
#[derive(Default)]
pub struct LightboxView {
    fade: FadeSequence,
    shown: Option<GalleryItem>,
    incoming: Option<(usize, GalleryItem)>,
    total: usize,
    can_prev: bool,
    can_next: bool,
    preload_request: Option<usize>,
}

impl Renderer for LightboxView {
    fn on_open(&mut self, item: &GalleryItem, index: usize, total: usize, _generation: Generation) {
        self.fade.open(Instant::now(), index);
        self.shown = Some(item.clone());
        self.incoming = None;
        self.total = total;
        self.preload_request = Some(index);
    }

    fn on_close(&mut self) {
        self.fade.close(Instant::now());
        self.incoming = None;
    }

    fn on_navigate(
        &mut self,
        item: &GalleryItem,
        index: usize,
        total: usize,
        generation: Generation,
    ) {
        self.fade.navigate(Instant::now(), index, generation);
        self.incoming = Some((index, item.clone()));
        self.total = total;
        self.preload_request = Some(index);
    }

    fn on_boundary_state(&mut self, can_prev: bool, can_next: bool) {
        self.can_prev = can_prev;
        self.can_next = can_next;
    }
}

impl LightboxView {
    /// El scroll de la página vuelve en cuanto empieza el cierre.
    pub fn suppresses_page_scroll(&self) -> bool {
        self.fade.is_visible() && !self.fade.is_closing()
    }

    pub fn is_animating(&self) -> bool {
        self.fade.is_animating()
    }

    pub fn take_preload_request(&mut self) -> Option<usize> {
        self.preload_request.take()
    }

    pub fn shown_item(&self) -> Option<&GalleryItem> {
        self.shown.as_ref()
    }

    pub fn tick(&mut self, now: Instant, live: Generation) {
        if let Some(index) = self.fade.advance(now, live) {
            if let Some((incoming_index, item)) = self.incoming.take() {
                if incoming_index == index {
                    self.shown = Some(item);
                }
            }
        }
        if !self.fade.is_visible() {
            self.shown = None;
            self.incoming = None;
        }
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        textures: &mut GalleryTextures,
        now: Instant,
    ) -> Vec<LightboxCommand> {
        let mut commands = Vec::new();
        let Some(index) = self.fade.displayed_index() else {
            return commands;
        };

        let overlay = self.fade.overlay_opacity(now);
        let image_alpha = self.fade.image_opacity(now) * overlay;
        let text_color = Color32::from_white_alpha(alpha_u8(overlay));
        let screen = ctx.screen_rect();

        egui::Area::new(egui::Id::new("lightbox"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let backdrop = ui.allocate_rect(screen, Sense::click());
                let painter = ui.painter().clone();
                let backdrop_fill = Color32::from_black_alpha(alpha_u8(0.95 * overlay));
                painter.rect_filled(screen, 0.0, backdrop_fill);

                let content = screen.shrink(32.0);
                // Clicks sobre la imagen o la ficha no cierran.
                let _ = ui.allocate_rect(content.shrink2(vec2(80.0, 0.0)), Sense::click());

                let image_area = Rect::from_min_max(
                    content.min,
                    pos2(content.max.x, content.max.y - INFO_HEIGHT),
                )
                .shrink2(vec2(80.0, 0.0));

                let placeholder = match textures.best_for_lightbox(index) {
                    Some(TextureSlot::Ready(texture)) => {
                        let size = fit_within(texture.size_vec2(), image_area.size());
                        let rect = Rect::from_center_size(image_area.center(), size);
                        egui::Image::from_texture(&texture)
                            .tint(Color32::from_white_alpha(alpha_u8(image_alpha)))
                            .paint_at(ui, rect);
                        None
                    }
                    Some(TextureSlot::Failed) => Some(TEXT_IMAGE_FAILED),
                    None => Some(TEXT_LOADINGIMG),
                };
                if let Some(text) = placeholder {
                    painter.text(
                        image_area.center(),
                        Align2::CENTER_CENTER,
                        text,
                        FontId::proportional(16.0),
                        text_color,
                    );
                }

                if let Some(item) = self.shown_item() {
                    let info_alpha = Color32::from_white_alpha(alpha_u8(image_alpha));
                    let x = content.center().x;
                    let y = image_area.max.y + 24.0;
                    let center = Align2::CENTER_CENTER;
                    painter.text(
                        pos2(x, y),
                        center,
                        item.title(),
                        FontId::proportional(22.0),
                        info_alpha,
                    );
                    painter.text(
                        pos2(x, y + 28.0),
                        center,
                        item.material(),
                        FontId::proportional(15.0),
                        info_alpha.gamma_multiply(0.8),
                    );
                    painter.text(
                        pos2(x, y + 50.0),
                        center,
                        item.year(),
                        FontId::proportional(13.0),
                        ACCENT.gamma_multiply(overlay),
                    );
                }

                painter.text(
                    pos2(screen.center().x, screen.max.y - 28.0),
                    Align2::CENTER_CENTER,
                    format!("{} / {}", index + 1, self.total),
                    FontId::proportional(14.0),
                    text_color,
                );

                let close_center = pos2(screen.max.x - 40.0, screen.min.y + 40.0);
                let close_rect = Rect::from_center_size(close_center, vec2(40.0, 40.0));
                if ui.put(close_rect, egui::Button::new(RichText::new("×").size(26.0))).clicked() {
                    commands.push(LightboxCommand::Close);
                }

                let prev_center = pos2(screen.min.x + 56.0, screen.center().y);
                let prev_rect = Rect::from_center_size(prev_center, vec2(50.0, 50.0));
                let prev = ui.add_enabled_ui(self.can_prev, |ui| {
                    ui.put(prev_rect, egui::Button::new(RichText::new("‹").size(28.0)))
                });
                if prev.inner.clicked() {
                    commands.push(LightboxCommand::Previous);
                }

                let next_center = pos2(screen.max.x - 56.0, screen.center().y);
                let next_rect = Rect::from_center_size(next_center, vec2(50.0, 50.0));
                let next = ui.add_enabled_ui(self.can_next, |ui| {
                    ui.put(next_rect, egui::Button::new(RichText::new("›").size(28.0)))
                });
                if next.inner.clicked() {
                    commands.push(LightboxCommand::Next);
                }

                if backdrop.clicked() {
                    commands.push(LightboxCommand::BackdropClicked);
                }
            });

        commands
    }
}

pub fn command_for_key(key: egui::Key) -> Option<LightboxCommand> {
    match key {
        egui::Key::ArrowLeft => Some(LightboxCommand::Previous),
        egui::Key::ArrowRight | egui::Key::Space => Some(LightboxCommand::Next),
        egui::Key::Escape => Some(LightboxCommand::Close),
        _ => None,
    }
}

/// Escala `image` para caber en `bounds` sin ampliarla.
pub fn fit_within(image: Vec2, bounds: Vec2) -> Vec2 {
    if image.x <= 0.0 || image.y <= 0.0 {
        return Vec2::ZERO;
    }
    let scale = (bounds.x / image.x).min(bounds.y / image.y).min(1.0);
    image * scale
}

fn alpha_u8(opacity: f32) -> u8 {
    (opacity.clamp(0.0, 1.0) * 255.0).round() as u8
}
