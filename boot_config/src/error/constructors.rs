//! Constructors and classification helpers for `BootError`.

use super::BootError;

impl BootError {
    /// Construct a user-configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use boot_config::BootError;
    /// let err = BootError::user("preconfig", "PYTHONMALLOC: unknown allocator");
    /// assert!(err.is_user_error());
    /// assert_eq!(err.to_string(), "preconfig: PYTHONMALLOC: unknown allocator");
    /// ```
    #[must_use]
    pub fn user(prefix: impl Into<String>, message: impl Into<String>) -> Self {
        Self::User {
            prefix: prefix.into(),
            message: message.into(),
        }
    }

    /// Construct an internal error for a violated engine invariant.
    #[must_use]
    pub fn internal(prefix: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Internal {
            prefix: prefix.into(),
            message: message.into(),
        }
    }

    /// Construct an allocation-failure error.
    #[must_use]
    pub const fn no_memory() -> Self {
        Self::NoMemory
    }

    /// Construct an exit request.
    #[must_use]
    pub const fn exit(status: i32) -> Self {
        Self::Exit { status }
    }

    /// Returns `true` when the error was caused by host-supplied input.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    /// Returns `true` for a deliberate exit request.
    #[must_use]
    pub const fn is_exit(&self) -> bool {
        matches!(self, Self::Exit { .. })
    }
}
