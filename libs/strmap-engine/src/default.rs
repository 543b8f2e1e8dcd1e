//! Per-thread default mapper.
//!
//! Each thread lazily builds its own [`Mapper`] on first use; nothing is shared
//! between threads. Callers needing one mapper across threads should own it and
//! wrap it in their own lock.

use std::cell::RefCell;

use crate::mapper::Mapper;

thread_local! {
    static DEFAULT_MAPPER: RefCell<Mapper> = RefCell::new(Mapper::new());
}

/// Run `f` with this thread's default mapper.
///
/// # Panics
///
/// If called from inside [`with_default_mut`] on the same thread.
pub fn with_default<R>(f: impl FnOnce(&Mapper) -> R) -> R {
    DEFAULT_MAPPER.with(|mapper| f(&mapper.borrow()))
}

/// Run `f` with mutable access to this thread's default mapper.
///
/// # Panics
///
/// If called from inside [`with_default`] or [`with_default_mut`] on the same
/// thread, e.g. from a converter while the default mapper is mapping.
pub fn with_default_mut<R>(f: impl FnOnce(&mut Mapper) -> R) -> R {
    DEFAULT_MAPPER.with(|mapper| f(&mut mapper.borrow_mut()))
}
