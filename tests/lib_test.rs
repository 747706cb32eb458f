//! Library integration tests.

use doctor::{CheckError, DoctorError};

#[test]
fn error_types_are_public() {
    let err = DoctorError::ConfigParseError {
        path: "/x/.doctor.yml".into(),
        message: "bad indent".into(),
    };
    assert!(err.to_string().contains("bad indent"));
}

#[test]
fn check_errors_wrap_into_doctor_errors() {
    let err = DoctorError::Check {
        description: "Slow".into(),
        check_type: "output-contains".into(),
        source: CheckError::Timeout {
            after: std::time::Duration::from_secs(1),
        },
    };
    let msg = err.to_string();
    assert!(msg.contains("Slow"));
    assert!(msg.contains("Command timed out after 1s"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> doctor::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use doctor::cli::{Cli, Commands, ListFormat};
    use clap::Parser;

    let cli = Cli::parse_from(["doctor", "list", "--format", "json"]);

    if let Some(Commands::List(args)) = cli.command {
        assert_eq!(args.format, ListFormat::Json);
    } else {
        panic!("Expected List command");
    }
}

#[test]
fn sinks_are_object_safe() {
    use doctor::ui::{ConsoleSink, DoctorTheme, MemorySink, OutputSink};
    use std::sync::Arc;

    let sinks: Vec<Arc<dyn OutputSink>> = vec![
        Arc::new(MemorySink::new()),
        Arc::new(ConsoleSink::new(
            Box::new(std::io::sink()),
            DoctorTheme::plain(),
            false,
        )),
    ];
    assert_eq!(sinks.len(), 2);
}
