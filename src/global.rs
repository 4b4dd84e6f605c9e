use std::{
  alloc::{GlobalAlloc, Layout},
  ptr::{self, NonNull},
};

use spin::Mutex;

use crate::{bump::PointerBump, config::Config};

/// A [`PointerBump`] usable as the process allocator.
///
/// ```rust,ignore
/// use pballoc::{Config, GlobalBump};
///
/// #[global_allocator]
/// static HEAP: GlobalBump = GlobalBump::new(Config::new());
/// ```
///
/// Calls are serialized with a spin lock, which never allocates.
pub struct GlobalBump {
  inner: Mutex<PointerBump>,
}

impl GlobalBump {
  pub const fn new(config: Config) -> Self {
    Self {
      inner: Mutex::new(PointerBump::new(config)),
    }
  }

  /// Runs `f` with exclusive access to the underlying allocator.
  pub fn with<R>(
    &self,
    f: impl FnOnce(&mut PointerBump) -> R,
  ) -> R {
    f(&mut *self.inner.lock())
  }
}

fn into_raw(block: Option<NonNull<u8>>) -> *mut u8 {
  block.map_or(ptr::null_mut(), NonNull::as_ptr)
}

unsafe impl GlobalAlloc for GlobalBump {
  unsafe fn alloc(
    &self,
    layout: Layout,
  ) -> *mut u8 {
    into_raw(self.with(|bump| bump.allocate_aligned(layout.size(), layout.align())))
  }

  unsafe fn alloc_zeroed(
    &self,
    layout: Layout,
  ) -> *mut u8 {
    into_raw(self.with(|bump| bump.allocate_zeroed_aligned(layout.size(), layout.align())))
  }

  unsafe fn dealloc(
    &self,
    address: *mut u8,
    _layout: Layout,
  ) {
    self.with(|bump| unsafe { bump.deallocate(address) })
  }

  unsafe fn realloc(
    &self,
    address: *mut u8,
    layout: Layout,
    new_size: usize,
  ) -> *mut u8 {
    into_raw(self.with(|bump| unsafe { bump.resize_aligned(address, new_size, layout.align()) }))
  }
}

#[cfg(test)]
mod tests {
  use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
    thread,
  };

  use super::*;
  use crate::align::ALIGNMENT;

  static HEAP: GlobalBump = GlobalBump::new(Config::new().with_capacity(1024 * 1024));

  #[test]
  fn test_global_alloc() {
    unsafe {
      let layout = Layout::array::<u32>(10).unwrap();
      let block = HEAP.alloc(layout) as *mut u32;
      assert!(!block.is_null());
      assert_eq!(block as usize % ALIGNMENT, 0);

      for i in 0..10 {
        block.add(i).write(i as u32 * 3);
      }

      let grown = HEAP.realloc(block as *mut u8, layout, 80) as *mut u32;
      assert!(!grown.is_null());
      for i in 0..10 {
        assert_eq!(grown.add(i).read(), i as u32 * 3);
      }

      HEAP.dealloc(grown as *mut u8, Layout::array::<u32>(20).unwrap());
    }
  }

  #[test]
  fn test_global_alloc_zeroed() {
    unsafe {
      let layout = Layout::from_size_align(64, 16).unwrap();
      let block = HEAP.alloc_zeroed(layout);
      assert!(!block.is_null());
      assert!(std::slice::from_raw_parts(block, 64).iter().all(|&b| b == 0));
    }
  }

  #[test]
  fn test_global_over_aligned() {
    unsafe {
      for align in [32usize, 64, 128, 4096] {
        let layout = Layout::from_size_align(64, align).unwrap();

        let block = HEAP.alloc(layout);
        assert!(!block.is_null());
        assert_eq!(block as usize % align, 0);

        let zeroed = HEAP.alloc_zeroed(layout);
        assert!(!zeroed.is_null());
        assert_eq!(zeroed as usize % align, 0);

        let grown = HEAP.realloc(block, layout, 256);
        assert!(!grown.is_null());
        assert_eq!(grown as usize % align, 0);
      }
    }
  }

  #[test]
  fn test_lock_released_after_panic() {
    let heap = Arc::new(GlobalBump::new(Config::new().with_capacity(64 * 1024)));

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
      heap.with(|bump| {
        if bump.used() == 0 {
          panic!("allocator user panicked");
        }
      });
    }));
    assert!(result.is_err());

    let other = heap.clone();
    let used = thread::spawn(move || {
      other.with(|bump| bump.allocate(8));
      other.with(|bump| bump.used())
    })
    .join()
    .unwrap();

    assert!(used > 0);
  }

  #[test]
  fn test_global_serializes_threads() {
    let heap = Arc::new(GlobalBump::new(Config::new().with_capacity(1024 * 1024)));

    let handles: Vec<_> = (0..4)
      .map(|t| {
        let heap = heap.clone();
        thread::spawn(move || {
          let layout = Layout::from_size_align(24, 8).unwrap();
          (0..100)
            .map(|_| {
              let block = unsafe { heap.alloc(layout) };
              unsafe { ptr::write_bytes(block, t as u8, 24) };
              block as usize
            })
            .collect::<Vec<_>>()
        })
      })
      .collect();

    let mut blocks: Vec<usize> = handles
      .into_iter()
      .flat_map(|h| h.join().unwrap())
      .collect();
    blocks.sort_unstable();

    for pair in blocks.windows(2) {
      assert!(pair[0] + 24 <= pair[1]);
    }
    assert_eq!(heap.with(|bump| bump.remaining() + bump.used()), 1024 * 1024);
  }
}
