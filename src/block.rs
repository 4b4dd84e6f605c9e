use std::{mem, ptr::NonNull};

/// Metadata stored immediately before every payload.
///
/// The header records the size originally requested for the block. It is
/// written once, when the block is carved, and never touched again: a shrink
/// through [`PointerBump::resize`](crate::PointerBump::resize) keeps the
/// original size.
#[repr(C)]
pub struct BlockHeader {
  pub size: usize,
}

pub const HEADER_SIZE: usize = mem::size_of::<BlockHeader>();

impl BlockHeader {
  /// Writes a header for `size` bytes just before `payload`.
  ///
  /// # Safety
  ///
  /// `payload - HEADER_SIZE .. payload` must be writable memory owned by the
  /// caller, aligned for `usize`.
  pub unsafe fn write(
    payload: NonNull<u8>,
    size: usize,
  ) {
    unsafe { Self::locate(payload.as_ptr()).write(BlockHeader { size }) }
  }

  /// Reads the size recorded for the block at `payload`.
  ///
  /// # Safety
  ///
  /// `payload` must be a pointer previously returned by a `PointerBump` whose
  /// region is still reserved.
  pub unsafe fn read(payload: *const u8) -> usize {
    unsafe { (*Self::locate(payload)).size }
  }

  unsafe fn locate(payload: *const u8) -> *mut BlockHeader {
    unsafe { payload.sub(HEADER_SIZE) as *mut BlockHeader }
  }
}
