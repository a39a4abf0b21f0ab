//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::config::ContainerConfig;
use crate::error::{DiError, DiResult};
use crate::key::Key;

// Thread-local resolution state for circular dependency detection
thread_local! {
    static RESOLUTION_TLS: RefCell<ResolutionTls> = RefCell::new(ResolutionTls::default());
}

/// Keys currently being resolved, tagged with the container that owns the
/// request. The same key requested from two different containers is not a
/// cycle: a child may legitimately ask its parent for a key it shadows.
#[derive(Default)]
struct ResolutionTls {
    stack: Vec<(usize, Key)>,
}

/// Guard for managing the thread-local resolution stack
pub(crate) struct StackGuard {
    pushed: bool,
}

impl StackGuard {
    /// Pushes `key` for the container identified by `owner`, failing if the
    /// pair is already in progress or the depth limit is reached.
    pub(crate) fn enter(owner: usize, key: &Key, config: &ContainerConfig) -> DiResult<Self> {
        RESOLUTION_TLS.with(|tls| {
            let mut tls = tls.borrow_mut();

            // Circular detection BEFORE pushing the new key
            if config.detect_cycles {
                if let Some(start) = tls.stack.iter().position(|(o, k)| *o == owner && k == key) {
                    let mut path: Vec<String> = tls.stack[start..]
                        .iter()
                        .map(|(_, k)| k.display_name().to_string())
                        .collect();
                    path.push(key.display_name().to_string());
                    return Err(DiError::Circular(path));
                }
            }

            // Depth guard
            if tls.stack.len() >= config.max_depth {
                return Err(DiError::DepthExceeded(tls.stack.len()));
            }

            tls.stack.push((owner, key.clone()));
            Ok(Self { pushed: true })
        })
    }
}

impl Drop for StackGuard {
    fn drop(&mut self) {
        if self.pushed {
            RESOLUTION_TLS.with(|tls| {
                tls.borrow_mut().stack.pop();
            });
        }
    }
}
