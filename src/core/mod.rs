pub mod contact_form;
pub mod error;
pub mod file_manager;
pub mod gallery;
pub mod image_cache;
pub mod image_format;
pub mod image_loader_factory;
pub mod input;
pub mod lightbox;
pub mod notification;
pub mod page_effects;
pub mod preload_manager;
pub mod transition;
