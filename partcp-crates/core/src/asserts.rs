//! Leveled assertions. The level is raised to [`PARTCP_ASSERT_MODERATE`] when compiling tests or
//! when the `debug-checks` feature is enabled.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const PARTCP_ASSERT_LEVEL_DEFINITION: u8 = PARTCP_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const PARTCP_ASSERT_LEVEL_DEFINITION: u8 = PARTCP_ASSERT_MODERATE;

pub const PARTCP_ASSERT_SIMPLE: u8 = 1;
pub const PARTCP_ASSERT_MODERATE: u8 = 2;

#[macro_export]
#[doc(hidden)]
macro_rules! partcp_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::PARTCP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PARTCP_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! partcp_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::PARTCP_ASSERT_LEVEL_DEFINITION >= $crate::asserts::PARTCP_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}
