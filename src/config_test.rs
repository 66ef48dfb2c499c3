use std::sync::{Mutex, MutexGuard};

use super::*;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// # Safety
/// Callers must hold [`env_lock`].
unsafe fn clear_host_env() {
    unsafe {
        std::env::remove_var("HOST");
        std::env::remove_var("PORT");
    }
}

#[test]
fn from_env_defaults() {
    let _guard = env_lock();
    unsafe { clear_host_env() };

    let cfg = HostConfig::from_env().unwrap();
    assert_eq!(cfg, HostConfig::default());
    assert_eq!(cfg.addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn from_env_parses_overrides() {
    let _guard = env_lock();
    unsafe {
        clear_host_env();
        std::env::set_var("HOST", "127.0.0.1");
        std::env::set_var("PORT", " 8081 ");
    }

    let cfg = HostConfig::from_env().unwrap();
    assert_eq!(cfg.addr().to_string(), "127.0.0.1:8081");

    unsafe { clear_host_env() };
}

#[test]
fn from_env_blank_port_uses_default() {
    let _guard = env_lock();
    unsafe {
        clear_host_env();
        std::env::set_var("PORT", "  ");
    }

    assert_eq!(HostConfig::from_env().unwrap().port, DEFAULT_PORT);

    unsafe { clear_host_env() };
}

#[test]
fn from_env_rejects_bad_port() {
    let _guard = env_lock();
    unsafe {
        clear_host_env();
        std::env::set_var("PORT", "99999");
    }

    let err = HostConfig::from_env().unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "99999".to_owned() });
    assert_eq!(err.to_string(), "invalid PORT: \"99999\"");

    unsafe { clear_host_env() };
}

#[test]
fn from_env_rejects_bad_host() {
    let _guard = env_lock();
    unsafe {
        clear_host_env();
        std::env::set_var("HOST", "not-an-ip");
    }

    assert!(matches!(HostConfig::from_env(), Err(ConfigError::Invalid { var: "HOST", .. })));

    unsafe { clear_host_env() };
}
