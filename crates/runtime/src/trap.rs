//! The error trap
//!
//! `raise` is the runtime's only way to report a fatal condition. It never
//! returns: control goes to the currently installed hook, which must leave
//! the current execution path for good.
//!
//! # Hooks
//!
//! The hook slot holds one `fn() -> !`. It starts out as [`exit_hook`]
//! (write `err` to stdout, exit with status 1). Hosts swap it in two ways:
//!
//! - [`replace_hook`]: flat, single-slot replacement. The caller owns
//!   putting the old hook back.
//! - [`install`]: scoped replacement. The returned [`HookGuard`] restores the
//!   previous hook when dropped, including while unwinding, so nested
//!   installs pop in reverse order.
//!
//! [`catch`] builds on `install` to turn a raise into `Err(Raised)` for the
//! extent of a closure. This is how the driver observes a raise without
//! tearing down the process, and how a host implements a restartable trap.
//!
//! # Threads
//!
//! The slot is thread-local. The runtime runs a program on a single thread
//! of control, so no locking is involved.
//!
//! # Panic strategy
//!
//! [`catch`] unwinds. Under `panic = "abort"` a raise inside `catch` aborts
//! the process instead.

use crate::error::set_runtime_error;
use std::cell::Cell;
use std::fmt;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

/// A trap hook: takes nothing, never returns
pub type Hook = fn() -> !;

/// Bytes written when a program raises under the default trap
pub const ERR_TEXT: &[u8] = b"err\n";

/// Process exit status after a raise under the default trap
pub const TRAP_EXIT_CODE: u8 = 1;

thread_local! {
    static HOOK: Cell<Hook> = const { Cell::new(exit_hook as Hook) };
}

/// Marker for a raise observed by [`catch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raised;

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("program raised an error")
    }
}

impl std::error::Error for Raised {}

/// Default hook: write `err` to stdout and exit with status 1
pub fn exit_hook() -> ! {
    let mut out = io::stdout().lock();
    let _ = out.write_all(ERR_TEXT);
    let _ = out.flush();
    std::process::exit(i32::from(TRAP_EXIT_CODE))
}

/// Hook used by [`catch`]: unwinds to the nearest `catch` with a [`Raised`] payload.
///
/// `resume_unwind` skips the panic hook, so nothing is printed on the way.
fn unwind_hook() -> ! {
    panic::resume_unwind(Box::new(Raised))
}

/// Raise the fatal error: transfer control to the installed hook
pub fn raise() -> ! {
    let hook = HOOK.with(Cell::get);
    debug!("trap: raise");
    hook()
}

/// Stash `msg` for the driver's log and report, then [`raise`]
pub fn raise_with(msg: impl Into<String>) -> ! {
    set_runtime_error(msg);
    raise()
}

/// The hook `raise` would call right now
pub fn current_hook() -> Hook {
    HOOK.with(Cell::get)
}

/// Replace the hook, returning the one it displaced
pub fn replace_hook(hook: Hook) -> Hook {
    debug!("trap: hook replaced");
    HOOK.with(|slot| slot.replace(hook))
}

/// Restores the previous hook on drop
///
/// Not `Send`: it refers to this thread's slot.
#[must_use = "the hook is restored as soon as the guard is dropped"]
pub struct HookGuard {
    previous: Hook,
    _thread: PhantomData<*const ()>,
}

impl Drop for HookGuard {
    fn drop(&mut self) {
        // The slot may already be gone during thread teardown
        let _ = HOOK.try_with(|slot| slot.set(self.previous));
    }
}

/// Install `hook` until the returned guard is dropped
pub fn install(hook: Hook) -> HookGuard {
    HookGuard {
        previous: replace_hook(hook),
        _thread: PhantomData,
    }
}

/// Run `f`, turning a [`raise`] inside it into `Err(Raised)`
///
/// The hook in place before the call is restored on every exit path.
/// Panics that are not raises keep unwinding past this frame.
pub fn catch<T>(f: impl FnOnce() -> T) -> Result<T, Raised> {
    let _guard = install(unwind_hook);
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(payload) if payload.is::<Raised>() => Err(Raised),
        Err(payload) => panic::resume_unwind(payload),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{clear_runtime_error, take_runtime_error};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn same_hook(a: Hook, b: Hook) -> bool {
        a as usize == b as usize
    }

    fn other_hook() -> ! {
        panic!("other_hook called")
    }

    #[test]
    fn test_default_hook_is_exit_hook() {
        // Each test runs on its own thread, so the slot starts fresh
        assert!(same_hook(current_hook(), exit_hook));
    }

    #[test]
    fn test_catch_returns_value_when_no_raise() {
        assert_eq!(catch(|| 7), Ok(7));
    }

    #[test]
    fn test_catch_turns_raise_into_err() {
        let result: Result<i32, Raised> = catch(|| raise());
        assert_eq!(result, Err(Raised));
    }

    #[test]
    fn test_catch_restores_previous_hook() {
        let before = current_hook();
        let _: Result<(), Raised> = catch(|| raise());
        assert!(same_hook(current_hook(), before));
        let _ = catch(|| 1);
        assert!(same_hook(current_hook(), before));
    }

    #[test]
    #[allow(unreachable_code)]
    fn test_code_after_raise_does_not_run() {
        static REACHED: AtomicUsize = AtomicUsize::new(0);
        let result = catch(|| {
            raise();
            REACHED.fetch_add(1, Ordering::SeqCst)
        });
        assert_eq!(result, Err(Raised));
        assert_eq!(REACHED.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_nested_catch_is_innermost_first() {
        let outer = catch(|| {
            let inner: Result<(), Raised> = catch(|| raise());
            assert_eq!(inner, Err(Raised));
            "outer completed"
        });
        assert_eq!(outer, Ok("outer completed"));
    }

    #[test]
    fn test_raise_after_inner_catch_reaches_outer() {
        let outer: Result<(), Raised> = catch(|| {
            let _ = catch(|| 1);
            raise()
        });
        assert_eq!(outer, Err(Raised));
    }

    #[test]
    fn test_foreign_panic_propagates() {
        let before = current_hook();
        let result = panic::catch_unwind(|| {
            let _: Result<(), Raised> = catch(|| panic!("not a raise"));
        });
        let payload = result.expect_err("panic should escape catch");
        assert_eq!(
            crate::error::format_panic_payload(payload.as_ref()),
            "not a raise"
        );
        assert!(same_hook(current_hook(), before));
    }

    #[test]
    fn test_install_guard_restores_on_drop() {
        let before = current_hook();
        {
            let _guard = install(other_hook);
            assert!(same_hook(current_hook(), other_hook));
        }
        assert!(same_hook(current_hook(), before));
    }

    #[test]
    fn test_guards_pop_in_reverse_order() {
        let base = current_hook();
        let outer = install(other_hook);
        let inner = install(unwind_hook);
        assert!(same_hook(current_hook(), unwind_hook));
        drop(inner);
        assert!(same_hook(current_hook(), other_hook));
        drop(outer);
        assert!(same_hook(current_hook(), base));
    }

    #[test]
    fn test_replace_hook_is_flat() {
        let before = replace_hook(other_hook);
        assert!(same_hook(before, exit_hook));
        let displaced = replace_hook(before);
        assert!(same_hook(displaced, other_hook));
        assert!(same_hook(current_hook(), exit_hook));
    }

    #[test]
    fn test_raise_with_stashes_message() {
        clear_runtime_error();
        let result: Result<(), Raised> = catch(|| raise_with("car: expected pair"));
        assert_eq!(result, Err(Raised));
        assert_eq!(take_runtime_error().as_deref(), Some("car: expected pair"));
    }
}
