//! Batch creation options.

/// Options applied when a batch is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchOptions {
    /// Minimum number of bytes to allocate for tile data, even if the
    /// initial dimensions need fewer. Lets later resizes grow in place.
    pub min_reserved_size: usize,
    /// Sparse batches only: keep one record per tile coordinate, overwriting
    /// on repeated writes. When disabled, every write appends a record.
    pub use_stencil: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            min_reserved_size: 0,
            use_stencil: true,
        }
    }
}

impl BatchOptions {
    #[must_use]
    pub const fn with_min_reserved_size(mut self, bytes: usize) -> Self {
        self.min_reserved_size = bytes;
        self
    }

    #[must_use]
    pub const fn with_stencil(mut self, use_stencil: bool) -> Self {
        self.use_stencil = use_stencil;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BatchOptions::default();
        assert_eq!(options.min_reserved_size, 0);
        assert!(options.use_stencil);
    }

    #[test]
    fn test_builders() {
        let options = BatchOptions::default()
            .with_min_reserved_size(4096)
            .with_stencil(false);
        assert_eq!(options.min_reserved_size, 4096);
        assert!(!options.use_stencil);
    }
}
