use creatmy::setup_logging;

#[test]
fn test_logging_setup() {
    // Logging is best-effort; installing it must never panic
    let result = std::panic::catch_unwind(|| {
        setup_logging();
    });

    assert!(result.is_ok(), "setup_logging function should not panic");
}

#[test]
fn test_logging_setup_is_repeatable() {
    // A second install (warm Lambda container, other tests) is a no-op
    let result = std::panic::catch_unwind(|| {
        setup_logging();
        setup_logging();
    });

    assert!(result.is_ok(), "repeated setup_logging calls should not panic");
}
