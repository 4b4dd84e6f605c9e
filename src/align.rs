/// Alignment guaranteed for every payload handed out by the allocator.
pub const ALIGNMENT: usize = 16;

/// Rounds `value` up to the next multiple of `align`, which must be a power
/// of two.
///
/// # Examples
///
/// ```rust
/// use pballoc::align_to;
///
/// assert_eq!(align_to!(13, 16), 16);
/// assert_eq!(align_to!(32, 16), 32);
/// assert_eq!(align_to!(0, 8), 0);
/// ```
#[macro_export]
macro_rules! align_to {
  ($value:expr, $align:expr) => {
    ($value + $align - 1) & !($align - 1)
  };
}

/// Number of bytes to skip past `addr` so that a header of `header_size`
/// bytes placed there is immediately followed by an `align`-aligned payload.
///
/// `align` must be a power of two.
///
/// ```text
///   addr      addr + padding
///    │             │
///    ▼             ▼
///    ┌─────────────┬──────────┬──────────────
///    │   padding   │  header  │  payload ...
///    └─────────────┴──────────┴──────────────
///                             ▲
///                             └── multiple of align
/// ```
pub const fn header_padding(
  addr: usize,
  header_size: usize,
  align: usize,
) -> usize {
  let header_end = addr + header_size;
  align_to!(header_end, align) - header_end
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_align_to() {
    for align in [8usize, 16, 4096] {
      for i in 0..10 {
        let sizes = (align * i + 1)..=(align * (i + 1));
        for size in sizes {
          assert_eq!(align * (i + 1), align_to!(size, align));
        }
      }
    }
  }

  #[test]
  fn test_header_padding_aligns_payload() {
    for header_size in [8usize, 16, 24] {
      for addr in 0..64usize {
        let padding = header_padding(addr, header_size, ALIGNMENT);

        assert!(padding < ALIGNMENT);
        assert_eq!((addr + padding + header_size) % ALIGNMENT, 0);
      }
    }
  }

  #[test]
  fn test_header_padding_over_aligned() {
    for align in [32usize, 64, 128, 4096] {
      for addr in (0..512usize).step_by(8) {
        let padding = header_padding(addr, 8, align);

        assert!(padding < align);
        assert_eq!((addr + padding + 8) % align, 0);
      }
    }
  }

  #[test]
  fn test_header_padding_already_aligned() {
    assert_eq!(header_padding(8, 8, ALIGNMENT), 0);
    assert_eq!(header_padding(0, 16, ALIGNMENT), 0);
    assert_eq!(header_padding(0, 8, ALIGNMENT), 8);
    assert_eq!(header_padding(0, 8, 64), 56);
  }
}
