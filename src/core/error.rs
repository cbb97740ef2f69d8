use thiserror::Error;

/// Errores de la aplicación (galería, configuración).
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid gallery manifest: {0}")]
    ManifestParse(#[from] toml::de::Error),

    #[error("Could not serialize settings: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Rechazo de una llamada al lightbox con un índice inválido.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxError {
    #[error("index {index} is out of range for a gallery of {len} items")]
    OutOfRange { index: usize, len: usize },
}
