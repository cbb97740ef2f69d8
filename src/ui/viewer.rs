use crate::config::config::*;
use crate::config::settings::{self, Settings};
use crate::core::contact_form::ContactForm;
use crate::core::gallery::GalleryCollection;
use crate::core::input::{dispatch, LightboxCommand};
use crate::core::lightbox::LightboxController;
use crate::core::notification::{NotificationCenter, NotificationKind};
use crate::core::page_effects::{
    hero_entrance, hero_entrance_finished, nav_background_alpha, page_cover_opacity,
    parallax_offset, RevealTracker,
};
use crate::core::preload_manager::PreloadManager;
use crate::i18n::en::*;
use crate::ui::lightbox_view::{command_for_key, fit_within, LightboxView};
use crate::ui::navigation_manager::{NavigationManager, Section};
use crate::ui::textures::{GalleryTextures, TextureSlot};
use eframe::egui;
use egui::{pos2, vec2, Align2, Color32, FontId, Rect, RichText, Sense};
use rfd::FileDialog;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

const TILE_SIZE: f32 = 220.0;
const TILE_CAPTION: f32 = 64.0;
const HERO_HEIGHT: f32 = 420.0;
const BACKGROUND: Color32 = Color32::from_rgb(10, 10, 10);
const ACCENT: Color32 = Color32::from_rgb(212, 175, 55);
const LIGHTBOX_KEYS: [egui::Key; 4] = [
    egui::Key::ArrowLeft,
    egui::Key::ArrowRight,
    egui::Key::Space,
    egui::Key::Escape,
];

pub struct PortfolioApp {
    settings: Settings,
    lightbox: LightboxController<LightboxView>,
    preload_manager: PreloadManager,
    textures: GalleryTextures,
    navigation: NavigationManager,
    reveal: RevealTracker<egui::Id>,
    contact: ContactForm,
    notifications: NotificationCenter,
    nav_alpha: f32,
    parallax: f32,
    hero_height: f32,
    started: Instant,
    show_about: bool,
}

impl PortfolioApp {
    pub fn new(settings: Settings) -> Self {
        let gallery = Self::load_gallery(&settings);
        let preload_manager = PreloadManager::new(settings.preload_range);
        let textures = GalleryTextures::new(preload_manager.cache_capacity());

        Self {
            settings,
            lightbox: LightboxController::new(gallery, LightboxView::default()),
            preload_manager,
            textures,
            navigation: NavigationManager::new(),
            reveal: RevealTracker::default(),
            contact: ContactForm::default(),
            notifications: NotificationCenter::default(),
            nav_alpha: NAV_ALPHA_TOP,
            parallax: 0.0,
            hero_height: HERO_HEIGHT,
            started: Instant::now(),
            show_about: false,
        }
    }

    pub fn init(&mut self, ctx: &egui::Context) {
        ctx.set_visuals(egui::Visuals::dark());
        self.started = Instant::now();
        self.preload_manager
            .request_thumbnails(self.lightbox.gallery(), self.settings.thumbnail_size);
    }

    fn load_gallery(settings: &Settings) -> GalleryCollection {
        let Some(dir) = &settings.gallery_dir else {
            return GalleryCollection::default();
        };
        GalleryCollection::load(dir).unwrap_or_else(|e| {
            tracing::error!(dir = %dir.display(), "could not load gallery: {e}");
            GalleryCollection::default()
        })
    }

    fn open_gallery_folder(&mut self, dir: PathBuf) {
        self.settings.gallery_dir = Some(dir);
        if let Err(e) = settings::save(&self.settings) {
            tracing::warn!("could not save settings: {e}");
        }

        let gallery = Self::load_gallery(&self.settings);
        self.lightbox = LightboxController::new(gallery, LightboxView::default());
        self.preload_manager.reset();
        self.textures.clear();
        self.reveal.clear();
        self.preload_manager
            .request_thumbnails(self.lightbox.gallery(), self.settings.thumbnail_size);

        let message = format!("{}{}", MSG_GALLERY_LOADED, self.lightbox.gallery().len());
        self.notifications
            .show(message, NotificationKind::Info, Instant::now());
    }

    fn handle_command(&mut self, command: LightboxCommand) {
        if let Err(e) = dispatch(&mut self.lightbox, command) {
            let state = self.lightbox.state();
            tracing::warn!(?command, ?state, "lightbox command rejected: {e}");
        }
    }

    fn handle_keyboard_input(&mut self, ctx: &egui::Context) {
        if !self.lightbox.is_open() {
            return;
        }
        let commands: Vec<LightboxCommand> = ctx.input(|i| {
            LIGHTBOX_KEYS
                .iter()
                .filter(|key| i.key_pressed(**key))
                .filter_map(|key| command_for_key(*key))
                .collect()
        });
        for command in commands {
            self.handle_command(command);
        }
    }

    fn process_loaded_images(&mut self, ctx: &egui::Context) {
        for loaded in self.preload_manager.process_loaded_images() {
            self.textures.ingest(ctx, loaded);
        }
    }

    fn service_preload_requests(&mut self) {
        if let Some(index) = self.lightbox.renderer_mut().take_preload_request() {
            let textures = &self.textures;
            self.preload_manager
                .preload_around(self.lightbox.gallery(), index, |i| textures.has_full(i));
        }
    }

    /// Opacidad de aparición: se revela la primera vez que entra en pantalla.
    fn reveal(&mut self, ui: &egui::Ui, id: egui::Id) -> f32 {
        let top = Rect::from_min_size(ui.cursor().min, vec2(ui.available_width().max(1.0), 1.0));
        let mut viewport = ui.clip_rect();
        viewport.max.y -= 50.0;
        let revealed = self.reveal.observe(id, viewport.intersects(top));
        ui.ctx().animate_bool_with_time(id, revealed, REVEAL_DURATION)
    }

    fn show_nav_bar(&mut self, ctx: &egui::Context) {
        let narrow = ctx.screen_rect().width() < NARROW_LAYOUT_WIDTH;
        let fill = Color32::from_rgba_unmultiplied(10, 10, 10, (self.nav_alpha * 255.0) as u8);

        egui::TopBottomPanel::top("nav")
            .frame(egui::Frame::default().fill(fill).inner_margin(vec2(24.0, 12.0)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(APP_NAME).size(18.0).color(ACCENT));
                    ui.separator();

                    if narrow {
                        if ui.button("☰").clicked() {
                            self.navigation.toggle_menu();
                        }
                    } else {
                        self.show_nav_links(ui);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(BTN_ABOUT).clicked() {
                            self.show_about = true;
                        }
                        if ui.button(format!("📂 {}", BTN_OPEN_GALLERY)).clicked() {
                            if let Some(dir) = FileDialog::new().pick_folder() {
                                self.open_gallery_folder(dir);
                            }
                        }
                    });
                });

                if narrow && self.navigation.is_menu_open() {
                    ui.vertical(|ui| self.show_nav_links(ui));
                }
            });
    }

    fn show_nav_links(&mut self, ui: &mut egui::Ui) {
        for section in Section::ALL {
            let active = self.navigation.active() == Some(section);
            if ui.selectable_label(active, section.label()).clicked() {
                self.navigation.select(section);
            }
        }
    }

    fn show_page(&mut self, ctx: &egui::Context) {
        let scroll_locked = self.lightbox.renderer().suppresses_page_scroll();
        let mut commands = Vec::new();

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(BACKGROUND))
            .show(ctx, |ui| {
                let output = egui::ScrollArea::vertical()
                    .id_salt("page")
                    .auto_shrink([false, false])
                    .enable_scrolling(!scroll_locked)
                    .show(ui, |ui| {
                        let origin_y = ui.min_rect().top();
                        self.navigation.begin_frame();

                        self.show_section(ui, Section::Home, origin_y, |app, ui| {
                            app.show_hero(ui);
                        });
                        self.show_section(ui, Section::About, origin_y, |app, ui| {
                            app.show_about_section(ui);
                        });
                        self.show_section(ui, Section::Work, origin_y, |app, ui| {
                            commands.extend(app.show_gallery_section(ui));
                        });
                        self.show_section(ui, Section::Contact, origin_y, |app, ui| {
                            app.show_contact_section(ui);
                        });
                    });

                let scroll_y = output.state.offset.y;
                self.navigation.update_active(scroll_y);
                self.nav_alpha = nav_background_alpha(scroll_y);
                if let Some(offset) = parallax_offset(scroll_y, self.hero_height) {
                    self.parallax = offset;
                }
            });

        for command in commands {
            self.handle_command(command);
        }
    }

    fn show_section(
        &mut self,
        ui: &mut egui::Ui,
        section: Section,
        origin_y: f32,
        add_contents: impl FnOnce(&mut Self, &mut egui::Ui),
    ) {
        let response = ui.scope(|ui| add_contents(self, ui)).response;
        self.navigation.record_section_top(section, response.rect.top() - origin_y);
        if section == Section::Home {
            self.hero_height = response.rect.height();
        }
        if self.navigation.take_scroll_target(section) {
            response.scroll_to_me(Some(egui::Align::TOP));
        }
        ui.add_space(64.0);
    }

    /// Títulos, subtítulo y botón entran escalonados al arrancar.
    fn show_hero(&mut self, ui: &mut egui::Ui) {
        let (rect, _) =
            ui.allocate_exact_size(vec2(ui.available_width(), HERO_HEIGHT), Sense::hover());
        let painter = ui.painter_at(rect);
        let since_start = self.started.elapsed();
        let x = rect.center().x;

        if let Some(TextureSlot::Ready(texture)) = self.textures.thumbnail(0) {
            let size = texture.size_vec2() * (rect.width() / texture.size_vec2().x.max(1.0));
            let image_rect =
                Rect::from_min_size(rect.min, size).translate(vec2(0.0, self.parallax));
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture.id(), image_rect, uv, Color32::from_white_alpha(70));
        }

        let mut step = 0;
        let mut y = rect.center().y - 60.0;
        for line in HERO_TITLE {
            let t = hero_entrance(since_start, step);
            painter.text(
                pos2(x, y + (1.0 - t) * HERO_ENTRANCE_RISE),
                Align2::CENTER_CENTER,
                *line,
                FontId::proportional(48.0),
                Color32::WHITE.gamma_multiply(t),
            );
            step += 1;
            y += 56.0;
        }

        let t = hero_entrance(since_start, step);
        painter.text(
            pos2(x, y + (1.0 - t) * HERO_ENTRANCE_RISE),
            Align2::CENTER_CENTER,
            HERO_SUBTITLE,
            FontId::proportional(18.0),
            Color32::GRAY.gamma_multiply(t),
        );
        step += 1;

        let t = hero_entrance(since_start, step);
        let cta_center = pos2(x, y + 56.0 + (1.0 - t) * HERO_ENTRANCE_RISE);
        let cta_rect = Rect::from_center_size(cta_center, vec2(180.0, 40.0));
        let cta = ui.scope(|ui| {
            ui.set_opacity(t);
            ui.put(cta_rect, egui::Button::new(RichText::new(HERO_CTA).color(ACCENT)))
        });
        if cta.inner.clicked() {
            self.navigation.select(Section::Work);
        }
    }

    fn hero_steps() -> u32 {
        HERO_TITLE.len() as u32 + 2
    }

    /// Cortina del color de fondo que se desvanece al cargar la página.
    fn show_page_cover(&self, ctx: &egui::Context) {
        let opacity = page_cover_opacity(self.started.elapsed());
        if opacity <= 0.0 {
            return;
        }
        let layer = egui::LayerId::new(egui::Order::Foreground, egui::Id::new("page_cover"));
        ctx.layer_painter(layer)
            .rect_filled(ctx.screen_rect(), 0.0, BACKGROUND.gamma_multiply(opacity));
    }

    fn show_about_section(&mut self, ui: &mut egui::Ui) {
        let alpha = self.reveal(ui, egui::Id::new("about_header"));
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(ABOUT_HEADER).color(Color32::WHITE.gamma_multiply(alpha)));
            ui.add_space(12.0);
            let text = RichText::new(ABOUT_TEXT).size(16.0);
            ui.label(text.color(Color32::LIGHT_GRAY.gamma_multiply(alpha)));
        });
        ui.add_space(24.0);

        let gallery = self.lightbox.gallery().clone();
        let materials: BTreeSet<&str> = gallery
            .iter()
            .map(|item| item.material())
            .filter(|m| !m.is_empty())
            .collect();
        let stats = [
            (gallery.len().to_string(), "Works"),
            (materials.len().to_string(), "Materials"),
        ];

        let alpha = self.reveal(ui, egui::Id::new("about_stats"));
        ui.columns(stats.len(), |columns| {
            for (column, (value, label)) in columns.iter_mut().zip(stats.iter()) {
                column.vertical_centered(|ui| {
                    let value = RichText::new(value).size(32.0);
                    ui.label(value.color(ACCENT.gamma_multiply(alpha)));
                    ui.label(RichText::new(*label).color(Color32::GRAY.gamma_multiply(alpha)));
                });
            }
        });
    }

    fn show_gallery_section(&mut self, ui: &mut egui::Ui) -> Option<LightboxCommand> {
        let alpha = self.reveal(ui, egui::Id::new("work_header"));
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(WORK_HEADER).color(Color32::WHITE.gamma_multiply(alpha)));
        });
        ui.add_space(16.0);

        let gallery = self.lightbox.gallery().clone();
        if gallery.is_empty() {
            ui.vertical_centered(|ui| ui.label(TEXT_EMPTY_GALLERY));
            return None;
        }

        let mut command = None;
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = vec2(24.0, 24.0);
            for (index, item) in gallery.iter().enumerate() {
                let id = egui::Id::new(("gallery_item", index));
                let alpha = self.reveal(ui, id);

                let tile = vec2(TILE_SIZE, TILE_SIZE + TILE_CAPTION);
                let (rect, response) = ui.allocate_exact_size(tile, Sense::click());
                let lift = ui
                    .ctx()
                    .animate_bool_with_time(id.with("hover"), response.hovered(), 0.3)
                    * 5.0;
                let rect = rect.translate(vec2(0.0, -lift));
                let image_rect = Rect::from_min_size(rect.min, vec2(TILE_SIZE, TILE_SIZE));
                let painter = ui.painter();

                painter.rect_filled(image_rect, 4.0, Color32::from_gray(24).gamma_multiply(alpha));
                let placeholder = match self.textures.thumbnail(index) {
                    Some(TextureSlot::Ready(texture)) => {
                        let size = fit_within(texture.size_vec2(), image_rect.size());
                        egui::Image::from_texture(texture)
                            .tint(Color32::from_white_alpha((alpha * 255.0) as u8))
                            .paint_at(ui, Rect::from_center_size(image_rect.center(), size));
                        None
                    }
                    Some(TextureSlot::Failed) => Some(TEXT_IMAGE_FAILED),
                    None => Some(TEXT_LOADINGIMG),
                };
                if let Some(text) = placeholder {
                    painter.text(
                        image_rect.center(),
                        Align2::CENTER_CENTER,
                        text,
                        FontId::proportional(13.0),
                        Color32::GRAY,
                    );
                }

                let caption = FontId::proportional(13.0);
                let text_x = rect.min.x + 4.0;
                let mut text_y = image_rect.max.y + 8.0;
                painter.text(
                    pos2(text_x, text_y),
                    Align2::LEFT_TOP,
                    item.title(),
                    FontId::proportional(16.0),
                    Color32::WHITE.gamma_multiply(alpha),
                );
                text_y += 22.0;
                painter.text(
                    pos2(text_x, text_y),
                    Align2::LEFT_TOP,
                    item.material(),
                    caption.clone(),
                    Color32::GRAY.gamma_multiply(alpha),
                );
                painter.text(
                    pos2(rect.max.x - 4.0, text_y),
                    Align2::RIGHT_TOP,
                    item.year(),
                    caption,
                    ACCENT.gamma_multiply(alpha),
                );

                if response.clicked() {
                    command = Some(LightboxCommand::Open(index));
                }
            }
        });
        command
    }

    fn show_contact_section(&mut self, ui: &mut egui::Ui) {
        let alpha = self.reveal(ui, egui::Id::new("contact_header"));
        ui.vertical_centered(|ui| {
            ui.heading(RichText::new(CONTACT_HEADER).color(Color32::WHITE.gamma_multiply(alpha)));
        });
        ui.add_space(16.0);

        let sending = self.contact.is_sending();
        ui.vertical_centered(|ui| {
            ui.set_max_width(480.0);
            egui::Grid::new("contact_form")
                .num_columns(2)
                .spacing([16.0, 12.0])
                .show(ui, |ui| {
                    ui.label(LABEL_NAME);
                    ui.add_enabled(!sending, egui::TextEdit::singleline(&mut self.contact.name));
                    ui.end_row();

                    ui.label(LABEL_EMAIL);
                    ui.add_enabled(!sending, egui::TextEdit::singleline(&mut self.contact.email));
                    ui.end_row();

                    ui.label(LABEL_INQUIRY);
                    let selected = if self.contact.inquiry.is_empty() {
                        INQUIRY_PLACEHOLDER.to_owned()
                    } else {
                        self.contact.inquiry.clone()
                    };
                    let inquiry = &mut self.contact.inquiry;
                    ui.add_enabled_ui(!sending, |ui| {
                        egui::ComboBox::from_id_salt("inquiry")
                            .selected_text(selected)
                            .show_ui(ui, |ui| {
                                for option in INQUIRY_OPTIONS {
                                    ui.selectable_value(inquiry, (*option).to_owned(), *option);
                                }
                            });
                    });
                    ui.end_row();

                    ui.label(LABEL_MESSAGE);
                    let message =
                        egui::TextEdit::multiline(&mut self.contact.message).desired_rows(5);
                    ui.add_enabled(!sending, message);
                    ui.end_row();
                });

            ui.add_space(12.0);
            let label = if sending { BTN_SENDING } else { BTN_SEND };
            if ui.add_enabled(!sending, egui::Button::new(label)).clicked() {
                let now = Instant::now();
                if let Err(e) = self.contact.submit(now) {
                    self.notifications.show(e.to_string(), NotificationKind::Error, now);
                }
            }
        });
    }

    fn show_notification(&mut self, ctx: &egui::Context) {
        let Some(notification) = self.notifications.current() else {
            return;
        };
        let (fill, border) = match notification.kind {
            NotificationKind::Success => (Color32::from_rgb(0x1a, 0x5d, 0x1a), ACCENT),
            NotificationKind::Error => {
                (Color32::from_rgb(0x5d, 0x1a, 0x1a), Color32::from_rgb(0xff, 0x44, 0x44))
            }
            NotificationKind::Info => (Color32::from_rgb(0x1a, 0x1a, 0x5d), ACCENT),
        };
        let message = notification.message.clone();

        let mut dismissed = false;
        egui::Area::new(egui::Id::new("notification"))
            .order(egui::Order::Tooltip)
            .anchor(Align2::RIGHT_TOP, vec2(-20.0, 100.0))
            .show(ctx, |ui| {
                egui::Frame::default()
                    .fill(fill)
                    .stroke(egui::Stroke::new(2.0, border))
                    .inner_margin(vec2(24.0, 16.0))
                    .show(ui, |ui| {
                        ui.set_max_width(400.0);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(message).color(Color32::WHITE));
                            if ui.button("×").clicked() {
                                dismissed = true;
                            }
                        });
                    });
            });

        if dismissed {
            self.notifications.dismiss();
        }
    }

    fn show_about_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_about {
            return;
        }

        egui::Window::new(BTN_ABOUT)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .min_width(300.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(APP_NAME).size(20.0).color(ACCENT));
                    ui.label(format!("v{}", APP_VERSION));
                    ui.label(format!("{}{}", TEXT_AUTHOR, APP_AUTHOR));
                    ui.label(TEXT_LICENSE);
                    ui.label(TEXT_INFOAPP);
                });

                ui.with_layout(egui::Layout::bottom_up(egui::Align::RIGHT), |ui| {
                    if ui.button(BTN_CLOSE).clicked() {
                        self.show_about = false;
                    }
                });
            });
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let entering = !hero_entrance_finished(self.started.elapsed(), Self::hero_steps());
        if entering || self.lightbox.renderer().is_animating() || self.contact.is_sending() {
            ctx.request_repaint();
        } else if self.preload_manager.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else if let Some(remaining) = self.notifications.remaining(now) {
            ctx.request_repaint_after(remaining);
        }
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.process_loaded_images(ctx);
        self.handle_keyboard_input(ctx);

        let live = self.lightbox.generation();
        self.lightbox.renderer_mut().tick(now, live);
        self.service_preload_requests();

        if self.contact.poll(now) {
            self.notifications.show(MSG_SENT, NotificationKind::Success, now);
        }
        self.notifications.expire(now);

        self.show_nav_bar(ctx);
        self.show_page(ctx);
        self.show_notification(ctx);
        self.show_about_dialog(ctx);
        self.show_page_cover(ctx);

        let commands = self.lightbox.renderer_mut().show(ctx, &mut self.textures, now);
        for command in commands {
            self.handle_command(command);
        }
        self.service_preload_requests();

        self.schedule_repaint(ctx, now);
    }
}
