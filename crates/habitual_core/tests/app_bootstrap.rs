use habitual_core::{
    AppContext, AuthConfig, HabitId, Identity, LocalKeyStore, SignedOutProvider, StartupSeed,
    StaticIdentityProvider,
};

#[test]
fn demo_bootstrap_seeds_sample_habits_anonymously() {
    let context =
        AppContext::bootstrap(AuthConfig::unconfigured(), &SignedOutProvider, StartupSeed::Demo);

    assert_eq!(context.habits.len(), 3);
    assert!(!context.auth_configured());
    assert!(!context.auth.is_authenticated());
    let reading = context.habits.get(&HabitId::from("2")).unwrap();
    assert_eq!(reading.name, "Read 10 Pages");
    assert!(reading.completed_today);
}

#[test]
fn configured_bootstrap_exposes_identity_and_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = AuthConfig::resolve(
        Some("pk_live_abc"),
        &LocalKeyStore::new(dir.path().join("auth.json")),
    );
    let provider = StaticIdentityProvider::new(Identity {
        user_id: "user_1".to_string(),
        display_name: None,
        email: Some("sam@example.com".to_string()),
    });

    let mut context = AppContext::bootstrap(config, &provider, StartupSeed::Empty);

    assert!(context.auth_configured());
    assert_eq!(context.auth.identity().map(|id| id.user_id.as_str()), Some("user_1"));
    assert!(context.habits.is_empty());

    let created = context.habits.create("Drink Water", Some("#2196F3".to_string()));
    assert_eq!(context.habits.get(&created.id), Some(created));
}
