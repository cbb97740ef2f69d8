pub const BTN_OPEN_GALLERY: &str = "Open gallery folder";
pub const BTN_ABOUT: &str = "About";
pub const BTN_CLOSE: &str = "Close";
pub const BTN_SEND: &str = "Send Message";
pub const BTN_SENDING: &str = "Sending...";

pub const NAV_HOME: &str = "Home";
pub const NAV_ABOUT: &str = "About";
pub const NAV_WORK: &str = "Work";
pub const NAV_CONTACT: &str = "Contact";

pub const HERO_TITLE: &[&str] = &["Sculpture", "& Form"];
pub const HERO_SUBTITLE: &str = "Works in stone, bronze and wood";
pub const HERO_CTA: &str = "View the work";

pub const ABOUT_HEADER: &str = "About the studio";
pub const ABOUT_TEXT: &str =
    "Each piece starts as a sketch and ends as a dialogue between material and hand.";
pub const WORK_HEADER: &str = "Selected work";
pub const CONTACT_HEADER: &str = "Get in touch";

pub const LABEL_NAME: &str = "Name";
pub const LABEL_EMAIL: &str = "Email";
pub const LABEL_INQUIRY: &str = "Inquiry";
pub const LABEL_MESSAGE: &str = "Message";
pub const INQUIRY_PLACEHOLDER: &str = "Select an inquiry type";
pub const INQUIRY_OPTIONS: &[&str] = &["Commission", "Exhibition", "Purchase", "Other"];

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_INVALID_EMAIL: &str = "Please enter a valid email address";
pub const MSG_GALLERY_LOADED: &str = "Works in this gallery: ";
pub const MSG_SENT: &str = "Message sent successfully! I will get back to you soon.";

pub const TEXT_UNTITLED: &str = "Untitled";
pub const TEXT_EMPTY_GALLERY: &str = "No works to show yet. Open a gallery folder to begin.";
pub const TEXT_LOADINGIMG: &str = "Loading image...";
pub const TEXT_IMAGE_FAILED: &str = "Image unavailable";
pub const TEXT_LICENSE: &str = "License: MIT";
pub const TEXT_AUTHOR: &str = "Author: ";
pub const TEXT_INFOAPP: &str = "Arrow keys or space to browse, Esc to close";
