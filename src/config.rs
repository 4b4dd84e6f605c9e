use crate::error::{Error, Result};

const KB: usize = 1024;
const MB: usize = KB * 1024;
const GB: usize = MB * 1024;

/// Address space reserved for the heap unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 2 * GB;

/// Settings for a [`PointerBump`](crate::PointerBump).
///
/// Every constructor is `const` so a configured allocator can live in a
/// `static`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  /// Size in bytes of the region reserved on first use.
  pub capacity: usize,
  /// Emit `log` diagnostics from the allocation path. Leave this off for a
  /// process-wide allocator whose logger allocates.
  pub trace: bool,
}

impl Config {
  pub const fn new() -> Self {
    Self {
      capacity: DEFAULT_CAPACITY,
      trace: false,
    }
  }

  pub const fn with_capacity(
    mut self,
    capacity: usize,
  ) -> Self {
    self.capacity = capacity;
    self
  }

  pub const fn with_trace(
    mut self,
    trace: bool,
  ) -> Self {
    self.trace = trace;
    self
  }

  pub fn validate(&self) -> Result<()> {
    if self.capacity == 0 {
      return Err(Error::InvalidCapacity);
    }
    Ok(())
  }
}

impl Default for Config {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();

    assert_eq!(config.capacity, 2 * 1024 * 1024 * 1024);
    assert!(!config.trace);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_builder() {
    const CONFIG: Config = Config::new().with_capacity(4096).with_trace(true);

    assert_eq!(CONFIG.capacity, 4096);
    assert!(CONFIG.trace);
  }

  #[test]
  fn test_zero_capacity_rejected() {
    let config = Config::new().with_capacity(0);

    assert!(matches!(config.validate(), Err(Error::InvalidCapacity)));
  }
}
