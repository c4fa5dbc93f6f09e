/// Converts errors from their error type (of the submodule) into
/// a variant of another error, by default the crate-level [`crate::Error`].
///
/// ```rust,ignore
/// use trellis::routing::LabelError;
/// trellis::impl_err!(LabelError, Label);
///
/// // Or, into an error other than `trellis::Error`
/// trellis::impl_err!(serde_json::Error, ConfigError, Parse);
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
        ($from:ty, $to:ty, $variant:ident) => {
            impl From<$from> for $to {
                fn from(value: $from) -> Self {
                    <$to>::$variant(value)
                }
            }
        };
    }

    pub use impl_err;
}
