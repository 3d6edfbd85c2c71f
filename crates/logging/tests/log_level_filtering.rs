//! Integration tests for category and severity filtering.
//!
//! Each test builds its own `Logger` around a `MemoryBackend`, so nothing
//! here touches the process-wide logger.

use std::sync::Arc;

use logging::{
    Category, CategorySelection, FilterState, LevelFilter, Logger, LoggerConfig, MemoryBackend,
    Severity, log_to,
};

fn capture(allow_list: Option<&str>, level: LevelFilter) -> (Logger, Arc<MemoryBackend>) {
    let memory = Arc::new(MemoryBackend::new());
    let selection = CategorySelection::from_allow_list(allow_list);
    let logger = Logger::new(FilterState::new(&selection, level), Arc::clone(&memory));
    (logger, memory)
}

// ============================================================================
// Reference Scenarios
// ============================================================================

/// Verifies an allow-list admits named categories and drops the rest.
#[test]
fn allow_list_admits_named_categories() {
    let (logger, memory) = capture(Some("Device,Op"), LevelFilter::Info);

    logger.info(Category::Device, format_args!("x"));
    logger.info(Category::Fabric, format_args!("y"));

    assert_eq!(memory.messages(), vec!["[Device] x".to_owned()]);
}

/// Verifies the severity threshold applies when no allow-list is given.
#[test]
fn absent_allow_list_filters_by_severity_only() {
    let (logger, memory) = capture(None, LevelFilter::Warn);

    logger.info(Category::Op, format_args!("skip"));
    logger.error(Category::Op, format_args!("boom"));

    assert_eq!(memory.messages(), vec!["[Op] boom".to_owned()]);
}

/// Verifies "All" at trace delivers every declared category.
#[test]
fn all_at_trace_delivers_every_category() {
    let (logger, memory) = capture(Some("All"), LevelFilter::Trace);

    for category in Category::ALL {
        logger.trace(*category, format_args!("t"));
    }

    let expected: Vec<String> = Category::ALL
        .iter()
        .map(|category| format!("[{}] t", category.name()))
        .collect();
    assert_eq!(memory.messages(), expected);
}

/// Verifies a bare category call renders only the bracketed name.
#[test]
fn bare_category_has_no_trailing_space() {
    let (logger, memory) = capture(None, LevelFilter::Info);

    log_to!(&logger, Info, Metal);

    assert_eq!(memory.messages(), vec!["[Metal]".to_owned()]);
}

/// Verifies the category can be a bare variant, a path or a variable.
#[test]
fn category_accepts_any_expression() {
    let (logger, memory) = capture(None, LevelFilter::Info);
    let held = Category::Loader;
    let lookup = |index: usize| Category::from_index(index).unwrap_or_default();

    log_to!(&logger, Info, Device, "bare {}", 1);
    log_to!(&logger, Info, Category::Op, "qualified {}", 2);
    log_to!(&logger, Info, held, "variable {}", 3);
    log_to!(&logger, Info, lookup(10), "call {}", 4);
    log_to!(&logger, Warn, held);

    assert_eq!(
        memory.messages(),
        vec![
            "[Device] bare 1".to_owned(),
            "[Op] qualified 2".to_owned(),
            "[Loader] variable 3".to_owned(),
            "[Fabric] call 4".to_owned(),
            "[Loader]".to_owned(),
        ]
    );
}

/// Verifies the category expression is evaluated once and before the filter check.
#[test]
fn category_expression_evaluated_once() {
    let (logger, memory) = capture(Some("Op"), LevelFilter::Info);
    let mut lookups = 0;
    let mut next = || {
        lookups += 1;
        Category::Device
    };

    log_to!(&logger, Info, next(), "filtered");

    assert_eq!(lookups, 1);
    assert!(memory.is_empty());
}

/// Verifies a template with too few arguments fails loudly.
#[test]
fn short_template_panics_without_emitting() {
    let (logger, memory) = capture(None, LevelFilter::Info);

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        logger.log_template(Category::Op, Severity::Info, "{} {}", &[&1]);
    }));

    assert!(outcome.is_err());
    assert!(memory.is_empty());
}

// ============================================================================
// Filter Properties
// ============================================================================

/// Verifies excluded categories never reach the backend at any severity.
#[test]
fn excluded_categories_never_delivered() {
    let (logger, memory) = capture(Some("Loader"), LevelFilter::Trace);

    for category in Category::ALL {
        if *category == Category::Loader || *category == Category::Always {
            continue;
        }
        for severity in Severity::ALL {
            logger.log(*category, severity, format_args!("nope"));
        }
    }

    assert!(memory.is_empty());
}

/// Verifies Always passes an allow-list that names only other categories.
#[test]
fn always_passes_any_allow_list() {
    for list in ["Device", "Op,Verif", "nonsense"] {
        let (logger, memory) = capture(Some(list), LevelFilter::Info);
        logger.info(Category::Always, format_args!("hello"));
        logger.debug(Category::Always, format_args!("below threshold"));
        assert_eq!(memory.messages(), vec!["[Always] hello".to_owned()], "{list}");
    }
}

/// Verifies lowering the threshold never disables a pair that was enabled.
#[test]
fn threshold_is_monotonic() {
    let filter = FilterState::new(&CategorySelection::from_allow_list(Some("Timer")), LevelFilter::Off);
    let mut previous = Vec::new();

    for threshold in LevelFilter::ALL.iter().rev() {
        filter.set_min_severity(*threshold);
        let current: Vec<(Category, Severity)> = Category::ALL
            .iter()
            .flat_map(|category| Severity::ALL.map(|severity| (*category, severity)))
            .filter(|(category, severity)| filter.is_enabled(*category, *severity))
            .collect();
        for pair in &previous {
            assert!(current.contains(pair), "{pair:?} lost at {threshold}");
        }
        previous = current;
    }

    assert_eq!(previous.len(), 2 * Severity::ALL.len());
}

/// Verifies "All" wins even when specific categories are named.
#[test]
fn all_token_wins_over_named_categories() {
    let (logger, memory) = capture(Some("Device,All"), LevelFilter::Info);

    logger.info(Category::SiliconDriver, format_args!("on"));

    assert_eq!(memory.messages(), vec!["[SiliconDriver] on".to_owned()]);
}

/// Verifies the threshold can be changed while other threads log.
#[test]
fn threshold_changes_are_visible_across_threads() {
    let (logger, memory) = capture(None, LevelFilter::Info);
    let logger = Arc::new(logger);

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let logger = Arc::clone(&logger);
            scope.spawn(move || {
                for n in 0..25 {
                    logger.info(Category::Dispatch, format_args!("worker {worker} step {n}"));
                }
            });
        }
    });
    assert_eq!(memory.len(), 100);

    logger.set_min_severity(LevelFilter::Error);
    std::thread::scope(|scope| {
        scope.spawn(|| logger.info(Category::Dispatch, format_args!("late")));
    });
    assert_eq!(memory.len(), 100);
}

// ============================================================================
// Configuration
// ============================================================================

/// Verifies a logger built from configuration honours level and types.
#[test]
fn logger_from_config_filters() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("filtered.log");
    let config = LoggerConfig::default()
        .with_level("warning")
        .with_categories("Verif")
        .with_destination(&path)
        .with_pattern("%v");

    let logger = Logger::from_config(&config).expect("logger");
    logger.warn(Category::Verif, format_args!("mismatch at {:#x}", 0x40));
    logger.warn(Category::Op, format_args!("hidden"));
    logger.info(Category::Verif, format_args!("hidden"));
    logger.critical(Category::Always, format_args!("shown"));
    logger.flush();

    let contents = std::fs::read_to_string(&path).expect("read log");
    assert_eq!(contents, "[Verif] mismatch at 0x40\n[Always] shown\n");
}
