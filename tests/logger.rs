//! Tests for the facade entry points.

use std::path::PathBuf;
use std::time::Duration;

use sitelog::extension::LogValue;
use sitelog::{Logger, Platform, Severity};

fn platform() -> Platform {
    Platform {
        version: sitelog::path::SCOPED_STORAGE_VERSION,
        internal_dir: PathBuf::from("/data/internal"),
        app_external_dir: Some(PathBuf::from("/storage/app")),
        public_documents_dir: Some(PathBuf::from("/storage/documents")),
        legacy_external_root: Some(PathBuf::from("/storage/shared")),
        storage_write_granted: true,
    }
}

fn quiet_logger() -> Logger {
    let logger = Logger::builder().platform(platform()).build();
    logger.set_logging(false);
    logger
}

#[test]
fn entry_points_never_panic() {
    let logger = quiet_logger();

    logger.v("payload");
    logger.vt("TAG", "payload");
    logger.v_here();
    logger.d("payload");
    logger.dt("TAG", "payload");
    logger.d_here();
    logger.i("payload");
    logger.it("TAG", "payload");
    logger.i_here();
    logger.w("payload");
    logger.wt("TAG", "payload");
    logger.w_here();
    logger.e("payload");
    logger.et("TAG", "payload");
    logger.e_here();
    logger.p("payload");
    logger.pt("TAG", "payload");
    logger.p_here();
    logger.t("payload");
    logger.tt("TAG", "payload");
    logger.t_here();
    logger.j(r#"{"k": 1}"#);
    logger.jt("TAG", "not even json");
}

#[test]
fn invalid_tags_are_tolerated() {
    let logger = quiet_logger();
    logger.it("", "blank tag");
    logger.it("   ", "whitespace tag");
    logger.it(&"X".repeat(60), "oversized tag");
    logger.it("bad\ntag", "control character tag");
}

#[test]
fn runtime_reconfiguration_applies_to_snapshot() {
    let logger = Logger::builder().platform(platform()).build();
    logger.set_app_name("renamed");
    logger.set_severities([Severity::Error, Severity::Warn]);
    logger.set_tag_block_list_enabled(true);
    logger.set_tag_block_list(["SPAM".to_string()]);
    logger.add_skip_prefixes(["my_wrapper::".to_string()]);

    let snapshot = logger.snapshot();
    assert_eq!(snapshot.app_name, "renamed");
    assert_eq!(snapshot.allowed.len(), 2);
    assert!(snapshot.tag_block_list_enabled);
    assert!(snapshot.skip_prefixes.contains("my_wrapper::"));
}

#[test]
fn noop_sink_flushes_instantly() {
    let logger = Logger::builder().platform(platform()).build();
    assert!(logger.flush(Duration::from_millis(1)));
    logger.request_close();
}

#[test]
fn tilde_is_expanded_in_save_directory() {
    let logger = Logger::builder().platform(platform()).build();
    logger.set_save_directory("~/logs");
    let expected = PathBuf::from(shellexpand::tilde("~/logs").as_ref());
    assert_eq!(logger.snapshot().save_directory, expected);
}

#[test]
fn display_values_log_through_the_extension_trait() {
    let logger = quiet_logger();
    "plain text".log_d(&logger);
    42.log_i(&logger);
    3.5.log_w(&logger);
    "tagged".log_dt(&logger, "EXT");
    "parent".log_p(&logger);
    r#"{"ext": true}"#.log_j(&logger);
}
