use std::ptr::{self, NonNull};

use crate::{
  align::ALIGNMENT,
  block::BlockHeader,
  config::Config,
  error::{Error, Result},
  fatal,
  region::Region,
};

/// A pointer-bumping allocator over one lazily reserved [`Region`].
///
/// Blocks are carved by advancing a cursor and are never reused; freeing a
/// block is a no-op. The region is reserved by the first allocation and
/// released only when the allocator itself is dropped, so pointers handed out
/// must not outlive it.
pub struct PointerBump {
  config: Config,
  region: Option<Region>,
}

impl PointerBump {
  pub const fn new(config: Config) -> Self {
    Self { config, region: None }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn region(&self) -> Option<&Region> {
    self.region.as_ref()
  }

  pub fn is_initialized(&self) -> bool {
    self.region.is_some()
  }

  pub fn capacity(&self) -> usize {
    self.config.capacity
  }

  /// Bytes consumed so far, padding and headers included.
  pub fn used(&self) -> usize {
    self.region.as_ref().map_or(0, Region::used)
  }

  pub fn remaining(&self) -> usize {
    self.region.as_ref().map_or(self.config.capacity, Region::remaining)
  }

  /// Reserves the region if it does not exist yet.
  pub fn try_init(&mut self) -> Result<()> {
    if self.region.is_some() {
      return Ok(());
    }

    self.config.validate()?;

    let region = Region::reserve(self.config.capacity).inspect_err(|e| {
      if self.config.trace {
        log::error!("{}", e);
      }
    })?;

    if self.config.trace {
      log::debug!(
        "pointer-bump region initialized: {:#x}..{:#x}",
        region.start(),
        region.end()
      );
    }

    self.region = Some(region);
    Ok(())
  }

  /// Reserves the region if it does not exist yet, aborting the process when
  /// the reservation fails.
  pub fn init(&mut self) -> &mut Region {
    match self.try_init() {
      Ok(()) => {}
      Err(Error::Reserve { .. }) => fatal::abort_with("could not mmap() heap region"),
      Err(Error::InvalidCapacity) => fatal::abort_with("heap capacity must be non-zero"),
    }

    match self.region.as_mut() {
      Some(region) => region,
      None => fatal::abort_with("heap region missing after initialization"),
    }
  }

  /// Returns a 16-byte aligned block with room for `size` bytes.
  ///
  /// Returns `None` for a zero `size` or when the region has no room left;
  /// in both cases the cursor does not move.
  pub fn allocate(
    &mut self,
    size: usize,
  ) -> Option<NonNull<u8>> {
    self.allocate_aligned(size, ALIGNMENT)
  }

  /// Like [`allocate`](Self::allocate), with the payload aligned to `align`
  /// when that is stricter than 16 bytes. `align` must be a power of two.
  pub fn allocate_aligned(
    &mut self,
    size: usize,
    align: usize,
  ) -> Option<NonNull<u8>> {
    if size == 0 || !align.is_power_of_two() {
      return None;
    }

    let trace = self.config.trace;
    let region = self.init();
    let block = region.carve(size, align);

    if block.is_none() && trace {
      log::warn!(
        "heap exhausted: requested {} bytes, {} remaining",
        size,
        region.remaining()
      );
    }

    block
  }

  /// Allocates `count * size` bytes and zeroes them.
  ///
  /// An overflowing product is treated as an unsatisfiable request.
  pub fn allocate_zeroed(
    &mut self,
    count: usize,
    size: usize,
  ) -> Option<NonNull<u8>> {
    let total = count.checked_mul(size)?;
    self.allocate_zeroed_aligned(total, ALIGNMENT)
  }

  /// Allocates `size` zeroed bytes aligned to `align`.
  pub fn allocate_zeroed_aligned(
    &mut self,
    size: usize,
    align: usize,
  ) -> Option<NonNull<u8>> {
    let block = self.allocate_aligned(size, align)?;

    unsafe { ptr::write_bytes(block.as_ptr(), 0, size) };

    Some(block)
  }

  /// Accepts a block back from the caller. Memory is never reclaimed.
  ///
  /// # Safety
  ///
  /// `address` must be null or a pointer returned by this allocator.
  pub unsafe fn deallocate(
    &mut self,
    address: *mut u8,
  ) {
    if address.is_null() {
      return;
    }

    if self.config.trace {
      log::trace!("deallocate(): {:?}", address);
    }
  }

  /// Size recorded in the header of the block at `address`.
  ///
  /// This is the size the block was allocated with; shrinking through
  /// [`resize`](Self::resize) does not change it.
  ///
  /// # Safety
  ///
  /// `address` must be a non-null pointer returned by this allocator.
  pub unsafe fn usable_size(
    &self,
    address: *const u8,
  ) -> usize {
    debug_assert!(self.owns(address));
    unsafe { BlockHeader::read(address) }
  }

  /// Whether `address` points into a block carved by this allocator.
  pub fn owns(
    &self,
    address: *const u8,
  ) -> bool {
    self.region.as_ref().is_some_and(|region| region.contains(address))
  }
}

impl Default for PointerBump {
  fn default() -> Self {
    Self::new(Config::default())
  }
}
