use crate::types::{Identifier, Namespace};

/// Hands out `starting<N>` and `result<N>` identifiers.
///
/// Each namespace has its own counter starting at 1. A new allocator (or a
/// `reset`) is used for every generated file so names are reproducible.
#[derive(Debug, Default, Clone)]
pub struct NameAllocator {
    starting: u64,
    result: u64,
}

impl NameAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, namespace: Namespace) -> Identifier {
        let counter = match namespace {
            Namespace::Starting => &mut self.starting,
            Namespace::Result => &mut self.result,
        };
        *counter += 1;
        Identifier { namespace, seq: *counter }
    }

    pub fn reset(&mut self) {
        self.starting = 0;
        self.result = 0;
    }

    /// Number of identifiers issued in `namespace` since the last reset.
    #[must_use]
    pub fn issued(&self, namespace: Namespace) -> u64 {
        match namespace {
            Namespace::Starting => self.starting,
            Namespace::Result => self.result,
        }
    }
}
