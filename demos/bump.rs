use std::io::Read;

use pballoc::{Config, PointerBump};

/// Waits until the user presses ENTER, so the mapping can be inspected with
/// `pmap` or `/proc/<pid>/maps` between steps.
fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn print_cursor(
  label: &str,
  allocator: &PointerBump,
) {
  match allocator.region() {
    Some(region) => println!(
      "[{}] PID = {}, cursor = {:#x}, used = {} bytes, remaining = {} bytes",
      label,
      std::process::id(),
      region.cursor(),
      region.used(),
      region.remaining(),
    ),
    None => println!("[{}] PID = {}, region not reserved yet", label, std::process::id()),
  }
}

fn main() {
  pretty_env_logger::init();

  // Small enough that step 6 can exhaust it.
  let mut allocator = PointerBump::new(Config::new().with_capacity(1024 * 1024).with_trace(true));

  print_cursor("start", &allocator);
  block_until_enter_pressed();

  // 1) Three blocks of odd sizes; every payload lands on a 16-byte boundary.
  let x = allocator.allocate(24).unwrap();
  let y = allocator.allocate(19).unwrap();
  let z = allocator.allocate(32).unwrap();
  println!("\n[1] x = {:?}, y = {:?}, z = {:?}", x, y, z);
  for (name, block) in [("x", x), ("y", y), ("z", z)] {
    println!("[1] {} % 16 = {}", name, block.as_ptr() as usize % 16);
  }
  print_cursor("1", &allocator);
  block_until_enter_pressed();

  unsafe {
    // 2) Shrinking or keeping the size returns the same block.
    let x_same = allocator.resize(x.as_ptr(), 24).unwrap();
    let x_small = allocator.resize(x.as_ptr(), 22).unwrap();
    println!("\n[2] resize(x, 24) == x? {}", x_same == x);
    println!("[2] resize(x, 22) == x? {}", x_small == x);
    println!("[2] recorded size of x is still {}", allocator.usable_size(x.as_ptr()));

    // 3) Growing copies into a fresh block further along the region.
    for i in 0..19u8 {
      y.as_ptr().add(i as usize).write(i);
    }
    let y_new = allocator.resize(y.as_ptr(), 23).unwrap();
    let copied = std::slice::from_raw_parts(y_new.as_ptr(), 19);
    println!("\n[3] resize(y, 23) = {:?} (moved: {})", y_new, y_new != y);
    println!("[3] contents preserved: {}", copied.iter().enumerate().all(|(i, &b)| b == i as u8));
    print_cursor("3", &allocator);
    block_until_enter_pressed();

    // 4) Freeing does not give anything back.
    allocator.deallocate(z.as_ptr());
    let after_free = allocator.allocate(8).unwrap();
    println!("\n[4] block after free = {:?} (reused z: {})", after_free, after_free == z);
  }

  // 5) Zeroed allocation.
  let zeroed = allocator.allocate_zeroed(16, 8).unwrap();
  let bytes = unsafe { std::slice::from_raw_parts(zeroed.as_ptr(), 128) };
  println!("\n[5] zeroed block of 128 bytes, all zero: {}", bytes.iter().all(|&b| b == 0));
  print_cursor("5", &allocator);
  block_until_enter_pressed();

  // 6) A request larger than what is left fails without moving the cursor.
  let before = allocator.used();
  let too_big = allocator.allocate(2 * 1024 * 1024);
  println!("\n[6] 2 MiB request: {:?}, cursor moved: {}", too_big, allocator.used() != before);
  let small = allocator.allocate(64);
  println!("[6] 64 byte request afterwards: {:?}", small);
  print_cursor("6", &allocator);

  println!("\n[7] End of example. The region is unmapped when the allocator is dropped.");
}
