#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("could not reserve a heap region of {capacity} bytes: {source}")]
  Reserve {
    capacity: usize,
    #[source]
    source: std::io::Error,
  },

  #[error("heap capacity must be non-zero")]
  InvalidCapacity,
}

pub type Result<T> = std::result::Result<T, Error>;
