/// Converts errors from their error type (of the submodule) to that of
/// a corridor::Error variant.
///
/// ```rust,ignore
/// use corridor::config::ConfigError;
/// corridor::impl_err!(ConfigError, Config);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
    }
}
