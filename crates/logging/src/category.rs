//! crates/logging/src/category.rs
//! The closed set of log categories and their display names.
//!
//! The enum and its name table are generated from the single list passed to
//! `declare_categories!`, so adding a category is a one-line change that
//! cannot leave the two out of step.

use std::fmt;

/// Display name reported for raw category values outside the declared set.
pub const UNKNOWN_CATEGORY_NAME: &str = "UnknownType";

/// Upper bound on the number of categories; one bit each in the filter mask.
pub const MAX_CATEGORIES: usize = 64;

macro_rules! declare_categories {
    ($($(#[$meta:meta])* $variant:ident),+ $(,)?) => {
        /// Subsystem tag attached to every log statement.
        ///
        /// Discriminants are dense and follow declaration order, starting with
        /// [`Category::Always`] at index 0.
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[allow(clippy::upper_case_acronyms)]
        #[repr(u8)]
        pub enum Category {
            $($(#[$meta])* $variant,)+
        }

        impl Category {
            /// Every category in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            const NAMES: &'static [&'static str] = &[$(stringify!($variant),)+];
        }
    };
}

declare_categories! {
    /// Default category; never removed by category filtering.
    Always,
    /// Test harness output.
    Test,
    /// Timing and profiling.
    Timer,
    /// Device discovery and lifetime.
    Device,
    /// Low-level runtime.
    LLRuntime,
    /// Program loading.
    Loader,
    /// Kernel builds.
    BuildKernels,
    /// Verification.
    Verif,
    /// Operation execution.
    Op,
    /// Command dispatch.
    Dispatch,
    /// Interconnect fabric.
    Fabric,
    /// Metal layer.
    Metal,
    /// Neural network library.
    TTNN,
    /// Metal trace capture and replay.
    MetalTrace,
    /// Silicon driver.
    SiliconDriver,
    /// Emulation driver.
    EmulationDriver,
}

const _: () = assert!(Category::ALL.len() <= MAX_CATEGORIES);
const _: () = assert!(Category::ALL.len() == Category::NAMES.len());
const _: () = assert!(Category::Always as usize == 0);

impl Category {
    /// Number of declared categories.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the display name used in output and configuration matching.
    #[must_use]
    pub const fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    /// Returns the dense 0-based index of the category.
    #[inline(always)]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the category's bit in a filter mask.
    #[inline(always)]
    #[must_use]
    pub const fn bit(self) -> u64 {
        1 << (self as u32)
    }

    /// Looks a category up by index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Looks a category up by exact display name.
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Category;
    ///
    /// assert_eq!(Category::from_name("Device"), Some(Category::Device));
    /// assert_eq!(Category::from_name("device"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .and_then(Self::from_index)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self::Always
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Category> for usize {
    fn from(category: Category) -> Self {
        category.index()
    }
}

/// Returns the display name of `category`.
#[must_use]
pub const fn name_of(category: Category) -> &'static str {
    category.name()
}

/// Returns the display name for a raw category value.
///
/// Values outside the declared set map to [`UNKNOWN_CATEGORY_NAME`] instead of
/// failing, since raw values may come from less-trusted call sites.
///
/// # Examples
///
/// ```
/// use logging::{name_of_index, UNKNOWN_CATEGORY_NAME};
///
/// assert_eq!(name_of_index(3), "Device");
/// assert_eq!(name_of_index(4096), UNKNOWN_CATEGORY_NAME);
/// ```
#[must_use]
pub fn name_of_index(index: usize) -> &'static str {
    Category::NAMES
        .get(index)
        .copied()
        .unwrap_or(UNKNOWN_CATEGORY_NAME)
}

/// Returns the underlying integer of `category`.
#[must_use]
pub const fn index_of(category: Category) -> usize {
    category.index()
}

/// Returns the number of declared categories.
#[must_use]
pub const fn count() -> usize {
    Category::COUNT
}
