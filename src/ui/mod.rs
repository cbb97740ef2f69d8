pub mod lightbox_view;
pub mod navigation_manager;
pub mod textures;
pub mod viewer;
