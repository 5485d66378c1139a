use super::*;

#[test]
fn defaults_use_base_root_controller() {
    let settings = Settings::default();
    assert_eq!(settings.root_controller_type, "controller.base");
    assert_eq!(settings.server_bind, "127.0.0.1:8480");
}

#[test]
fn file_config_overrides_defaults() {
    let mut settings = Settings::default();
    apply_file_config(
        &mut settings,
        r#"
bind_addr = "0.0.0.0:9000"
root_controller_type = "app.shell"
"#,
    );

    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.root_controller_type, "app.shell");
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn malformed_file_config_is_ignored() {
    let mut settings = Settings::default();
    apply_file_config(&mut settings, "bind_addr = [1, 2");
    assert_eq!(settings, Settings::default());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = Settings::default();
    let env: HashMap<&str, &str> = [
        ("SERVER_BIND", "127.0.0.1:1"),
        ("APP__BIND_ADDR", "127.0.0.1:2"),
        ("APP__LOG_FILTER", "debug"),
    ]
    .into_iter()
    .collect();

    apply_env_overrides(&mut settings, |key| env.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.log_filter, "debug");
    assert_eq!(settings.root_controller_type, "controller.base");
}

#[test]
fn env_overrides_file_config() {
    let mut settings = Settings::default();
    apply_file_config(&mut settings, r#"root_controller_type = "from.file""#);
    apply_env_overrides(&mut settings, |key| {
        (key == "APP__ROOT_CONTROLLER_TYPE").then(|| "from.env".to_owned())
    });
    assert_eq!(settings.root_controller_type, "from.env");
}
