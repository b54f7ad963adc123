//! Logging front-end.
//!
//! `defmt` on the target, `tracing` on the host, nothing when neither
//! feature is on. Invoke through the module path (`log::warn!`) so the
//! names never clash with the built-in lint attributes.
//!
//! Format strings must stay within the subset both back-ends accept:
//! `{}` for integers and `&str`, `{:?}` for everything else.

macro_rules! emit {
    ($level:ident, $($arg:tt)+) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($($arg)+);
        #[cfg(feature = "tracing")]
        ::tracing::$level!($($arg)+);
        #[cfg(not(any(feature = "defmt", feature = "tracing")))]
        {
            if false {
                let _ = ::core::format_args!($($arg)+);
            }
        }
    }};
}

macro_rules! debug_ {
    ($($arg:tt)+) => { $crate::log::emit!(debug, $($arg)+) };
}

macro_rules! info_ {
    ($($arg:tt)+) => { $crate::log::emit!(info, $($arg)+) };
}

macro_rules! warn_ {
    ($($arg:tt)+) => { $crate::log::emit!(warn, $($arg)+) };
}

macro_rules! error_ {
    ($($arg:tt)+) => { $crate::log::emit!(error, $($arg)+) };
}

pub(crate) use debug_ as debug;
pub(crate) use emit;
pub(crate) use error_ as error;
pub(crate) use info_ as info;
pub(crate) use warn_ as warn;
