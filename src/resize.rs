use std::ptr::{self, NonNull};

use crate::{align::ALIGNMENT, block::BlockHeader, bump::PointerBump};

impl PointerBump {
  /// Changes the size of the block at `address` to `size` bytes.
  ///
  /// - A null `address` behaves like [`allocate`](Self::allocate).
  /// - A zero `size` deallocates the block and returns `None`.
  /// - A size that fits within the block's recorded size returns `address`
  ///   unchanged. The header keeps the original size, so a later grow from
  ///   the same address copies that many bytes.
  /// - A larger size carves a new block, copies the recorded size over and
  ///   deallocates the old one. If carving fails the old block is left
  ///   untouched and `None` is returned.
  ///
  /// # Safety
  ///
  /// `address` must be null or a pointer returned by this allocator.
  pub unsafe fn resize(
    &mut self,
    address: *mut u8,
    size: usize,
  ) -> Option<NonNull<u8>> {
    unsafe { self.resize_aligned(address, size, ALIGNMENT) }
  }

  /// Like [`resize`](Self::resize), placing a relocated block on an `align`
  /// boundary.
  ///
  /// # Safety
  ///
  /// `address` must be null or a pointer returned by this allocator with at
  /// least `align` alignment.
  pub unsafe fn resize_aligned(
    &mut self,
    address: *mut u8,
    size: usize,
    align: usize,
  ) -> Option<NonNull<u8>> {
    let Some(old) = NonNull::new(address) else {
      return self.allocate_aligned(size, align);
    };

    if size == 0 {
      unsafe { self.deallocate(address) };
      return None;
    }

    debug_assert!(self.owns(old.as_ptr()));
    let old_size = unsafe { BlockHeader::read(old.as_ptr()) };
    if size <= old_size {
      return Some(old);
    }

    let new = self.allocate_aligned(size, align)?;

    unsafe {
      ptr::copy_nonoverlapping(old.as_ptr(), new.as_ptr(), old_size);
      self.deallocate(old.as_ptr());
    }

    Some(new)
  }
}
