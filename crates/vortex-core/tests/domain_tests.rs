use vortex_core::{
    Application, BranchPair, ConfigValue, Environment, ExtensionFirst, LabelSpec, MergePolicy,
    Profile, PropertySource, Result, VortexError,
};

#[test]
fn test_validation_workflow() {
    fn validate_and_process(app_name: &str) -> Result<String> {
        if app_name.is_empty() {
            return Err(VortexError::invalid_application(
                app_name,
                "Application name cannot be empty",
            ));
        }
        let app = Application::new(app_name);
        Ok(format!("Processed: {app}"))
    }

    assert!(validate_and_process("myapp").is_ok());

    let result = validate_and_process("");
    if let Err(VortexError::InvalidApplication { name, reason }) = result {
        assert!(name.is_empty());
        assert!(reason.contains("empty"));
    } else {
        panic!("Expected InvalidApplication error");
    }
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn query() -> Result<Environment> {
        Err(VortexError::source_error("git", "connection timeout"))
    }

    fn composite() -> Result<Environment> {
        query().map_err(|e| VortexError::composite_failed("extension", "feat-a", e))
    }

    fn resolve() -> Result<String> {
        let env = composite()?;
        Ok(env.application().to_string())
    }

    let err = resolve().unwrap_err();
    assert!(err.is_source_error());
    assert_eq!(err.kind(), "composite_failed");
}

#[test]
fn test_complete_config_workflow() {
    // Extension repository: profile-specific file ahead of the shared one
    let extension = Environment::builder()
        .application("phoenix-web")
        .profile("prod")
        .label("feat-a")
        .property_source(
            PropertySource::builder("game/services/phoenix-web/application-prod.yml")
                .property("test-properties.game", "Game properties")
                .build(),
        )
        .property_source(
            PropertySource::builder("game/shared/application.yml")
                .property("test-properties.shared", "Shared properties")
                .build(),
        )
        .build()
        .unwrap();

    let core = Environment::builder()
        .application("phoenix-web")
        .profile("prod")
        .label("rel-2")
        .property_source(
            PropertySource::builder("core/shared/application.yml")
                .property("test-properties.service", "Core service properties")
                .property("test-properties.shared", "Core shared properties")
                .property("test-properties.game", "Core game properties")
                .build(),
        )
        .build()
        .unwrap();

    let LabelSpec::BranchPair(pair) = LabelSpec::parse(Some("feat-a:rel-2")).unwrap() else {
        panic!("expected branch pair");
    };
    assert_eq!(pair, BranchPair::new("feat-a", "rel-2"));

    let merged = ExtensionFirst.merge(
        extension,
        core,
        &Application::new("phoenix-web"),
        &Profile::new("prod"),
    );

    // Extension overrides core
    assert_eq!(
        merged.get_property("test-properties.game"),
        Some(&ConfigValue::from("Game properties"))
    );
    assert_eq!(
        merged.get_property("test-properties.shared"),
        Some(&ConfigValue::from("Shared properties"))
    );
    // Core-only keys remain visible
    assert_eq!(
        merged.get_property("test-properties.service"),
        Some(&ConfigValue::from("Core service properties"))
    );
    assert_eq!(merged.label().map(|l| l.as_str()), Some("feat-a"));
}
