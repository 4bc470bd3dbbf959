//! trophycalc-file - Filesystem-backed credential slot.

mod slot;

pub use slot::{CREDENTIALS_FILE, FileSlot};
