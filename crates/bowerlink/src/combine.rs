use std::path::PathBuf;

/// Merge two configuration layers.
pub trait Combine {
    /// Combine two values, preferring the values in `self`.
    ///
    /// Layers are folded from the highest precedence down: the CLI combines
    /// with the `--config` file, that result with the environment, and so on
    /// down to the system config file.
    #[must_use]
    fn combine(self, other: Self) -> Self;
}

macro_rules! impl_combine_or {
    ($name:ty) => {
        impl Combine for Option<$name> {
            fn combine(self, other: Option<$name>) -> Option<$name> {
                self.or(other)
            }
        }
    };
}

impl_combine_or!(String);
impl_combine_or!(bool);
impl_combine_or!(PathBuf);
