//! Last-resort reporting for failures the allocator cannot recover from.
//!
//! Nothing here allocates: the allocator may be the process allocator, and
//! formatting a message would re-enter it.

/// Writes `message` to stderr and aborts the process.
pub fn abort_with(message: &str) -> ! {
  write_stderr(b"pballoc: fatal: ");
  write_stderr(message.as_bytes());
  write_stderr(b"\n");
  std::process::abort()
}

fn write_stderr(mut bytes: &[u8]) {
  while !bytes.is_empty() {
    let written = unsafe { libc::write(libc::STDERR_FILENO, bytes.as_ptr().cast(), bytes.len()) };
    if written <= 0 {
      return;
    }
    bytes = &bytes[written as usize..];
  }
}
