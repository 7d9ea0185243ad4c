use super::Notifier;
use crate::config::NotifierConfig;
use crate::errors::Result;
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedNotifierFuture = Pin<Box<dyn Future<Output = Result<Box<dyn Notifier>>> + Send>>;
pub type NotifierConstructor = Arc<dyn Fn(&NotifierConfig) -> BoxedNotifierFuture + Send + Sync>;

static NOTIFIER_REGISTRY: Lazy<RwLock<HashMap<String, NotifierConstructor>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

pub fn register_notifier_plugin<S: Into<String>>(name: S, constructor: NotifierConstructor) {
    let name = name.into();
    // 注册发生在 main 之前，锁中毒时直接沿用内部数据
    let mut registry = NOTIFIER_REGISTRY
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    registry.insert(name, constructor);
}

pub fn get_notifier_plugin(name: &str) -> Option<NotifierConstructor> {
    NOTIFIER_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .get(name)
        .cloned()
}

pub fn debug_notifier_registry() {
    let registry = NOTIFIER_REGISTRY
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if registry.is_empty() {
        tracing::debug!("No notifier plugins registered.");
    } else {
        tracing::debug!("Registered notifier plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}
