//! crates/logging/src/filter.rs
//! Lock-free category mask and severity threshold consulted on every call.

use std::fmt;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use logging_sink::Severity;

use crate::category::Category;
use crate::config::{CategorySelection, LoggerConfig};
use crate::levels::LevelFilter;

/// Bits belonging to declared categories.
const DECLARED_MASK: u64 = if Category::COUNT == 64 {
    u64::MAX
} else {
    (1_u64 << Category::COUNT) - 1
};

/// Bits past the declared categories; all set only in "all categories" mode.
const UNDECLARED_MASK: u64 = !DECLARED_MASK;

/// Decides whether a statement with a given category and severity is emitted.
///
/// Both halves are atomics so a shared logger can be queried from any thread
/// without locking and adjusted at runtime. Loads are relaxed: a change made
/// on one thread becomes visible to others eventually, which is all a log
/// filter needs.
pub struct FilterState {
    mask: AtomicU64,
    threshold: AtomicU8,
}

impl FilterState {
    /// Creates a filter for `selection` at `threshold`.
    #[must_use]
    pub fn new(selection: &CategorySelection, threshold: LevelFilter) -> Self {
        Self::from_parts(selection.mask(), threshold)
    }

    /// Creates the filter described by `config`.
    #[must_use]
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new(&config.category_selection(), config.min_severity())
    }

    /// Accepts every category at every severity.
    #[must_use]
    pub fn accept_all() -> Self {
        Self::from_parts(u64::MAX, LevelFilter::Trace)
    }

    fn from_parts(mask: u64, threshold: LevelFilter) -> Self {
        Self {
            mask: AtomicU64::new(mask | Category::Always.bit()),
            threshold: AtomicU8::new(threshold.as_u8()),
        }
    }

    /// Reports whether a statement would be emitted.
    ///
    /// The severity check runs first since it is the cheaper rejection for
    /// the common case of disabled debug output.
    #[inline(always)]
    #[must_use]
    pub fn is_enabled(&self, category: Category, severity: Severity) -> bool {
        severity.as_u8() >= self.threshold.load(Ordering::Relaxed)
            && self.mask.load(Ordering::Relaxed) & category.bit() != 0
    }

    /// Same as [`is_enabled`](Self::is_enabled) for a raw category value.
    ///
    /// Values outside the declared set pass the category check only when
    /// every category is enabled.
    #[must_use]
    pub fn is_enabled_index(&self, index: usize, severity: Severity) -> bool {
        if severity.as_u8() < self.threshold.load(Ordering::Relaxed) {
            return false;
        }
        match Category::from_index(index) {
            Some(category) => self.is_category_enabled(category),
            None => self.accepts_all_categories(),
        }
    }

    /// Returns the current threshold.
    #[must_use]
    pub fn min_severity(&self) -> LevelFilter {
        LevelFilter::from_u8(self.threshold.load(Ordering::Relaxed))
    }

    /// Replaces the threshold.
    ///
    /// Accepts a [`Severity`] as well as a [`LevelFilter`], so
    /// `set_min_severity(LevelFilter::Off)` silences everything.
    pub fn set_min_severity(&self, threshold: impl Into<LevelFilter>) {
        self.threshold
            .store(threshold.into().as_u8(), Ordering::Relaxed);
    }

    /// Reports whether `category` passes the category check.
    #[must_use]
    pub fn is_category_enabled(&self, category: Category) -> bool {
        self.mask.load(Ordering::Relaxed) & category.bit() != 0
    }

    /// Turns a single category on or off.
    ///
    /// [`Category::Always`] cannot be disabled; such requests are ignored.
    /// Disabling any category also ends "all categories" mode for raw values
    /// outside the declared set.
    pub fn set_category_enabled(&self, category: Category, enabled: bool) {
        if enabled {
            self.mask.fetch_or(category.bit(), Ordering::Relaxed);
        } else if category != Category::Always {
            self.mask
                .fetch_and(!(category.bit() | UNDECLARED_MASK), Ordering::Relaxed);
        }
    }

    /// Reports whether every category, declared or not, is enabled.
    #[must_use]
    pub fn accepts_all_categories(&self) -> bool {
        self.mask.load(Ordering::Relaxed) == u64::MAX
    }

    /// Lists the enabled declared categories in declaration order.
    #[must_use]
    pub fn enabled_categories(&self) -> Vec<Category> {
        let mask = self.mask.load(Ordering::Relaxed);
        Category::ALL
            .iter()
            .copied()
            .filter(|category| mask & category.bit() != 0)
            .collect()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(&CategorySelection::All, LevelFilter::default())
    }
}

impl fmt::Debug for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterState")
            .field("mask", &format_args!("{:#018x}", self.mask.load(Ordering::Relaxed)))
            .field("min_severity", &self.min_severity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matching(list: &str) -> CategorySelection {
        CategorySelection::from_allow_list(Some(list))
    }

    #[test]
    fn declared_and_undeclared_masks_partition_bits() {
        assert_eq!(DECLARED_MASK & UNDECLARED_MASK, 0);
        assert_eq!(DECLARED_MASK | UNDECLARED_MASK, u64::MAX);
        assert_eq!(DECLARED_MASK.count_ones() as usize, Category::COUNT);
    }

    #[test]
    fn default_is_all_categories_at_info() {
        let filter = FilterState::default();
        assert!(filter.accepts_all_categories());
        assert_eq!(filter.min_severity(), LevelFilter::Info);
        assert!(filter.is_enabled(Category::Op, Severity::Info));
        assert!(!filter.is_enabled(Category::Op, Severity::Debug));
    }

    #[test]
    fn category_outside_list_is_rejected_at_any_severity() {
        let filter = FilterState::new(&matching("Device"), LevelFilter::Trace);
        for severity in Severity::ALL {
            assert!(!filter.is_enabled(Category::Op, severity));
            assert!(filter.is_enabled(Category::Device, severity));
        }
    }

    #[test]
    fn always_survives_any_list() {
        let filter = FilterState::new(&matching("Loader"), LevelFilter::Info);
        assert!(filter.is_enabled(Category::Always, Severity::Info));
        assert!(filter.is_category_enabled(Category::Always));
    }

    #[test]
    fn threshold_is_monotonic() {
        let filter = FilterState::new(&CategorySelection::All, LevelFilter::Warn);
        let enabled: Vec<bool> = Severity::ALL
            .iter()
            .map(|severity| filter.is_enabled(Category::Timer, *severity))
            .collect();
        assert_eq!(enabled, [false, false, false, true, true, true]);
    }

    #[test]
    fn off_rejects_everything() {
        let filter = FilterState::accept_all();
        filter.set_min_severity(LevelFilter::Off);
        for severity in Severity::ALL {
            assert!(!filter.is_enabled(Category::Always, severity));
        }
    }

    #[test]
    fn set_min_severity_accepts_severity() {
        let filter = FilterState::default();
        filter.set_min_severity(Severity::Error);
        assert_eq!(filter.min_severity(), LevelFilter::Error);
        assert!(!filter.is_enabled(Category::Op, Severity::Warn));
        assert!(filter.is_enabled(Category::Op, Severity::Critical));
    }

    #[test]
    fn raw_indices_pass_only_in_all_mode() {
        let all = FilterState::accept_all();
        assert!(all.is_enabled_index(Category::COUNT, Severity::Info));
        assert!(all.is_enabled_index(usize::MAX, Severity::Trace));

        let some = FilterState::new(&matching("Op"), LevelFilter::Trace);
        assert!(!some.is_enabled_index(Category::COUNT + 3, Severity::Critical));
        assert!(some.is_enabled_index(Category::Op.index(), Severity::Info));
        assert!(!some.is_enabled_index(Category::Device.index(), Severity::Info));
    }

    #[test]
    fn matching_list_naming_all_enables_every_category() {
        let selection = CategorySelection::Matching("Device,All".to_owned());
        let filter = FilterState::new(&selection, LevelFilter::Trace);
        assert!(filter.accepts_all_categories());
        assert!(filter.is_enabled(Category::Fabric, Severity::Info));
        assert!(filter.is_enabled_index(Category::COUNT, Severity::Info));
        assert_eq!(filter.enabled_categories(), Category::ALL);
    }

    #[test]
    fn raw_indices_respect_threshold() {
        let filter = FilterState::new(&CategorySelection::All, LevelFilter::Error);
        assert!(!filter.is_enabled_index(999, Severity::Warn));
        assert!(filter.is_enabled_index(999, Severity::Error));
    }

    #[test]
    fn toggling_categories_at_runtime() {
        let filter = FilterState::new(&matching("Device"), LevelFilter::Trace);
        filter.set_category_enabled(Category::Op, true);
        assert!(filter.is_enabled(Category::Op, Severity::Info));

        filter.set_category_enabled(Category::Device, false);
        assert!(!filter.is_enabled(Category::Device, Severity::Critical));

        filter.set_category_enabled(Category::Always, false);
        assert!(filter.is_enabled(Category::Always, Severity::Info));

        assert_eq!(
            filter.enabled_categories(),
            vec![Category::Always, Category::Op]
        );
    }

    #[test]
    fn disabling_a_category_leaves_all_mode() {
        let filter = FilterState::accept_all();
        filter.set_category_enabled(Category::Fabric, false);
        assert!(!filter.accepts_all_categories());
        assert!(!filter.is_enabled_index(Category::COUNT, Severity::Info));
        assert!(filter.is_enabled(Category::Op, Severity::Info));
    }

    #[test]
    fn from_config_reads_level_and_types() {
        let config = LoggerConfig::default()
            .with_level("debug")
            .with_categories("Verif");
        let filter = FilterState::from_config(&config);
        assert_eq!(filter.min_severity(), LevelFilter::Debug);
        assert_eq!(
            filter.enabled_categories(),
            vec![Category::Always, Category::Verif]
        );
    }

    #[test]
    fn filter_is_shareable_across_threads() {
        let filter = std::sync::Arc::new(FilterState::default());
        let worker = {
            let filter = std::sync::Arc::clone(&filter);
            std::thread::spawn(move || filter.set_min_severity(LevelFilter::Critical))
        };
        worker.join().expect("worker thread");
        assert_eq!(filter.min_severity(), LevelFilter::Critical);
    }
}
