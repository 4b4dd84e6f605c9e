use std::{io, ptr::NonNull};

use crate::{
  align::{ALIGNMENT, header_padding},
  block::{BlockHeader, HEADER_SIZE},
  error::{Error, Result},
};

/// A single contiguous reservation of anonymous memory and the cursor that
/// carves blocks out of it.
///
/// ```text
///   start                      cursor                               end
///     │                           │                                  │
///     ▼                           ▼                                  ▼
///     ┌─────┬──────┬──────────┬───┬──────────────────────────────────┐
///     │ pad │ hdr  │ payload  │...│           never touched          │
///     └─────┴──────┴──────────┴───┴──────────────────────────────────┘
/// ```
///
/// Invariants: `start <= cursor <= end`, and `cursor` never moves backwards.
/// The mapping stays in place until the region is dropped.
pub struct Region {
  base: NonNull<u8>,
  capacity: usize,
  /// Offset of the next free byte from `base`.
  cursor: usize,
}

unsafe impl Send for Region {}

impl Region {
  /// Maps `capacity` bytes of private, zero-filled, read-write address space.
  ///
  /// Pages are committed lazily by the kernel on first touch.
  pub fn reserve(capacity: usize) -> Result<Self> {
    let addr = unsafe {
      libc::mmap(
        std::ptr::null_mut(),
        capacity,
        libc::PROT_READ | libc::PROT_WRITE,
        libc::MAP_PRIVATE | libc::MAP_ANONYMOUS | libc::MAP_NORESERVE,
        -1,
        0,
      )
    };

    if addr == libc::MAP_FAILED {
      return Err(Error::Reserve {
        capacity,
        source: io::Error::last_os_error(),
      });
    }

    let base = NonNull::new(addr as *mut u8).ok_or_else(|| Error::Reserve {
      capacity,
      source: io::Error::from(io::ErrorKind::AddrNotAvailable),
    })?;

    Ok(Self {
      base,
      capacity,
      cursor: 0,
    })
  }

  /// Carves a header-prefixed block with room for `size` payload bytes and
  /// returns the payload, aligned to `align` and never to less than 16.
  ///
  /// Returns `None` without moving the cursor when the block does not fit.
  /// `align` must be a power of two.
  pub fn carve(
    &mut self,
    size: usize,
    align: usize,
  ) -> Option<NonNull<u8>> {
    debug_assert!(align.is_power_of_two());
    if align > self.capacity {
      return None;
    }

    let padding = header_padding(self.cursor(), HEADER_SIZE, align.max(ALIGNMENT));
    let total = padding.checked_add(HEADER_SIZE)?.checked_add(size)?;
    let new_cursor = self.cursor.checked_add(total)?;

    if new_cursor > self.capacity {
      return None;
    }

    let offset = self.cursor + padding + HEADER_SIZE;
    self.cursor = new_cursor;

    unsafe {
      let payload = NonNull::new_unchecked(self.base.as_ptr().add(offset));
      BlockHeader::write(payload, size);
      Some(payload)
    }
  }

  pub fn start(&self) -> usize {
    self.base.as_ptr() as usize
  }

  pub fn end(&self) -> usize {
    self.start() + self.capacity
  }

  /// Address of the next byte that has never been handed out.
  pub fn cursor(&self) -> usize {
    self.start() + self.cursor
  }

  pub fn capacity(&self) -> usize {
    self.capacity
  }

  pub fn used(&self) -> usize {
    self.cursor
  }

  pub fn remaining(&self) -> usize {
    self.capacity - self.cursor
  }

  /// Whether `addr` lies inside the carved part of the region.
  pub fn contains(
    &self,
    addr: *const u8,
  ) -> bool {
    let addr = addr as usize;
    addr >= self.start() && addr < self.cursor()
  }
}

impl Drop for Region {
  fn drop(&mut self) {
    unsafe {
      libc::munmap(self.base.as_ptr().cast(), self.capacity);
    }
  }
}
