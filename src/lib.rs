//! # pballoc - A Pointer-Bumping Heap Allocator
//!
//! This crate provides a **pointer-bumping** allocator that serves every
//! request from a single fixed-size region reserved with `mmap(2)`. Freed
//! blocks are never reused: allocation is a single cursor bump.
//!
//! ## Overview
//!
//! ```text
//!   Region (reserved once, never resized):
//!
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                                                                      │
//!   │   ┌─────┬─────┬─────┬─────┬───────────────────────────────────────┐  │
//!   │   │ B1  │ B2  │ B3  │ B4  │         Untouched address space       │  │
//!   │   └─────┴─────┴─────┴─────┴───────────────────────────────────────┘  │
//!   │   ▲                       ▲                                       ▲  │
//!   │   │                       │                                       │  │
//!   │ start                  cursor                                   end  │
//!   │                                                                      │
//!   └──────────────────────────────────────────────────────────────────────┘
//!
//!   Each allocation moves the cursor forward. Deallocation does nothing.
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//!   pballoc
//!   ├── align      - Alignment arithmetic (align_to!, header_padding)
//!   ├── block      - Block header (internal)
//!   ├── bump       - PointerBump: allocate, allocate_zeroed, deallocate
//!   ├── resize     - PointerBump::resize
//!   ├── region     - mmap-backed region and cursor
//!   ├── global     - GlobalBump, a GlobalAlloc adapter
//!   ├── config     - Config
//!   └── error      - Error, Result
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pballoc::{Config, PointerBump};
//!
//! fn main() {
//!     let mut allocator = PointerBump::new(Config::new());
//!
//!     let block = allocator.allocate(64).unwrap();
//!     assert_eq!(block.as_ptr() as usize % 16, 0);
//!
//!     unsafe {
//!         let grown = allocator.resize(block.as_ptr(), 128).unwrap();
//!         allocator.deallocate(grown.as_ptr());
//!     }
//! }
//! ```
//!
//! ## Block Layout
//!
//! ```text
//!   ┌─────────┬──────────────┬────────────────────────────────┐
//!   │ padding │ BlockHeader  │         Payload                │
//!   │ 0..15 B │  size: N     │      N bytes usable            │
//!   └─────────┴──────────────┴────────────────────────────────┘
//!                            ▲
//!                            └── Pointer returned, 16-byte aligned
//! ```
//!
//! ## Limitations
//!
//! - **No reuse**: memory is only returned to the OS when the allocator is dropped
//! - **Fixed capacity**: requests beyond the region fail with `None`
//! - **Single-threaded core**: `PointerBump` needs `&mut self`; `GlobalBump` locks a spin mutex
//! - **Unix-only**: requires `libc` and `mmap`

pub mod align;
mod block;
mod bump;
mod config;
mod error;
mod fatal;
mod global;
mod region;
mod resize;

pub use block::HEADER_SIZE;
pub use bump::PointerBump;
pub use config::{Config, DEFAULT_CAPACITY};
pub use error::{Error, Result};
pub use global::GlobalBump;
pub use region::Region;
