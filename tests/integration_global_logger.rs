use parking_lot::Mutex;
use std::sync::Arc;
use structured_logger::{
    default_logger, init, init_from_env, init_with_writer, set_default, Attr, Config, Format,
    Level, Logger, MemoryWriter, MockHandler,
};

/// Every test here mutates the process-wide default logger.
static SERIAL: Mutex<()> = parking_lot::const_mutex(());

/// Verify the free functions route through an installed test double.
///
/// One call per level must produce exactly four entries, in call order.
#[test]
fn global_functions_use_installed_default() {
    let _guard = SERIAL.lock();

    let (logger, mock) = MockHandler::logger();
    set_default(logger);

    structured_logger::debug("debug message", &[]);
    structured_logger::info("info message", &[]);
    structured_logger::warn("warn message", &[]);
    structured_logger::error("error message", &[]);

    let logs = mock.entries();
    assert_eq!(logs.len(), 4);
    assert_eq!(logs[0].level, Level::Debug);
    assert_eq!(logs[1].level, Level::Info);
    assert_eq!(logs[2].level, Level::Warn);
    assert_eq!(logs[3].level, Level::Error);
    assert_eq!(logs[3].message, "error message");
}

/// `with` derives from the current default and leaves it unchanged.
#[test]
fn global_with_adds_context() {
    let _guard = SERIAL.lock();

    let (logger, mock) = MockHandler::logger();
    set_default(logger);

    let scoped = structured_logger::with("user_id", "123");
    scoped.info("scoped", &[Attr::new("ip", "192.168.1.1")]);
    structured_logger::info("unscoped", &[]);

    let logs = mock.entries();
    assert_eq!(
        logs[0].attrs,
        vec![Attr::new("user_id", "123"), Attr::new("ip", "192.168.1.1")]
    );
    assert!(logs[1].attrs.is_empty());
}

/// A later `set_default` fully replaces the earlier logger.
#[test]
fn set_default_replaces_logger() {
    let _guard = SERIAL.lock();

    let (first, first_mock) = MockHandler::logger();
    let (second, second_mock) = MockHandler::logger();

    set_default(first);
    structured_logger::info("to first", &[]);
    set_default(second);
    structured_logger::info("to second", &[]);

    assert_eq!(first_mock.entries().len(), 1);
    assert_eq!(second_mock.entries().len(), 1);
    assert_eq!(second_mock.entries()[0].message, "to second");
}

/// Readers racing a writer always observe a complete logger.
#[test]
fn concurrent_readers_and_writer() {
    let _guard = SERIAL.lock();

    let mock = Arc::new(MockHandler::new());
    set_default(Logger::new(mock.clone()));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let mock = mock.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    if i == 0 {
                        set_default(Logger::new(mock.clone()));
                    } else {
                        structured_logger::info("from thread", &[Attr::new("thread", i)]);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(mock.entries().len(), 7 * 50);
}

/// `init` installs the configured logger and rejects unknown levels.
#[test]
fn init_installs_configured_logger() {
    let _guard = SERIAL.lock();

    let config = Config {
        level: "warn".to_string(),
        ..Default::default()
    };
    init(&config).unwrap();
    assert!(!default_logger().enabled(Level::Info));
    assert!(default_logger().enabled(Level::Warn));

    let (logger, mock) = MockHandler::logger();
    set_default(logger);

    let bad = Config {
        level: "invalid".to_string(),
        ..Default::default()
    };
    let err = init(&bad).unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to create logger: invalid log level: unknown log level: invalid"
    );

    // The previous default survives a failed init
    structured_logger::info("still here", &[]);
    assert_eq!(mock.entries().len(), 1);
}

/// `init_from_env` always configures an info threshold.
#[test]
fn init_from_env_uses_info_level() {
    let _guard = SERIAL.lock();

    init_from_env("production").unwrap();
    assert!(!default_logger().enabled(Level::Debug));
    assert!(default_logger().enabled(Level::Info));

    init_from_env("development").unwrap();
    assert!(!default_logger().enabled(Level::Debug));
    assert!(default_logger().enabled(Level::Info));
}

/// `init` announces the effective settings with one info record through the
/// newly installed logger.
#[test]
fn init_logs_effective_settings() {
    let _guard = SERIAL.lock();

    let memory = MemoryWriter::new();
    let config = Config {
        level: "debug".to_string(),
        format: Format::Console,
        enable_caller: false,
        enable_stacktrace: true,
        enable_colors: false,
        environment: "staging".to_string(),
    };
    init_with_writer(&config, memory.log_writer()).unwrap();

    let output = memory.contents();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(" level=INFO "));
    assert!(lines[0].ends_with(
        r#" msg="Logger initialized" level=debug format=console enableCaller=false enableStacktrace=true environment=staging enableColors=false"#
    ));

    // Later records go through the same installed logger
    structured_logger::debug("after init", &[]);
    assert_eq!(memory.contents().lines().count(), 2);
}
