//! String definitions for the log targets used with the [`tracing`] crate,
//! as in `tracing::trace!(target: SCATTER, ...)`
//!
//! Every target is prefixed with the name of the crate that declares it, so
//! `EnvFilter` directives such as `kcorr_engine::sampler=trace` work as expected.

#[macro_export]
macro_rules! tracing_targets {
    {$( $name:ident $(=$val:expr)? ),* $(,)?} => {
        $( $crate::tracing_targets!(@value $name $(=$val)? ); )*

        /// All the targets declared in this module
        #[allow(dead_code)]
        pub const ALL: &[&'static str] = &[$( $name ),*];
    };

    (@value $name:ident = $val:expr) => {pub const $name: &'static str = concat!(env!("CARGO_PKG_NAME"), "::", $val);};
    (@value $name:ident)             => {$crate::tracing_targets!(@value $name = stringify!($name));};
}
