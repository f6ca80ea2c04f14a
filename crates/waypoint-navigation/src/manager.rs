//! Navigation Manager
//!
//! Shared state and subscriber notification for every navigation backend.
//! The manager is a cheap cloneable handle; clones observe the same state.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use url::Url;

use crate::error::NavigationError;
use crate::event::{LocationChangedEvent, Subscription};
use crate::uri::{relative_to_base, resolve};
use crate::Result;

type Handler = Arc<dyn Fn(&LocationChangedEvent) + Send + Sync>;

/// Base and current URI reported by a backend on first access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialLocation {
    pub base_uri: String,
    pub uri: String,
}

/// What a navigation backend provides to the [`NavigationManager`].
pub trait NavigationBackend {
    /// Produce the initial base and current URI. Called at most once per
    /// successful initialization.
    fn ensure_initialized(&self) -> Result<InitialLocation>;

    /// Carry out an outbound navigation. `None` is an absent target URI.
    /// Must not assume the manager's current URI changes as a result; the
    /// host reports that separately.
    fn navigate_to_core(&self, uri: Option<&str>, force_load: bool) -> Result<()>;
}

#[derive(Debug, Default)]
struct NavigationState {
    base_uri: Option<String>,
    uri: Option<String>,
    initialized: bool,
}

struct Inner<B> {
    backend: B,
    state: RwLock<NavigationState>,
    /// Serializes lazy initialization so the backend is asked once
    init_lock: Mutex<()>,
    handlers: RwLock<Vec<(Subscription, Handler)>>,
}

pub struct NavigationManager<B> {
    inner: Arc<Inner<B>>,
}

impl<B: NavigationBackend> NavigationManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            inner: Arc::new(Inner {
                backend,
                state: RwLock::new(NavigationState::default()),
                init_lock: Mutex::new(()),
                handlers: RwLock::new(Vec::new()),
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    pub fn is_initialized(&self) -> bool {
        self.inner.state.read().initialized
    }

    /// Record the base and current URI. Allowed exactly once.
    pub fn initialize(&self, base_uri: String, uri: String) -> Result<()> {
        let mut state = self.inner.state.write();
        if state.initialized {
            return Err(NavigationError::AlreadyInitialized);
        }

        tracing::debug!(base_uri = %base_uri, uri = %uri, "Initialized navigation manager");

        state.base_uri = Some(base_uri);
        state.uri = Some(uri);
        state.initialized = true;
        Ok(())
    }

    /// Initialize from the backend unless already done.
    ///
    /// A backend failure leaves the manager uninitialized, so the next
    /// access asks the backend again.
    fn assert_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            return Ok(());
        }

        let _guard = self.inner.init_lock.lock();
        if self.is_initialized() {
            return Ok(());
        }

        let initial = self.inner.backend.ensure_initialized().map_err(|e| {
            tracing::warn!(error = %e, "Navigation backend failed to initialize");
            e
        })?;
        self.initialize(initial.base_uri, initial.uri)
    }

    /// The application's root URI, as the backend reported it.
    pub fn base_uri(&self) -> Result<String> {
        self.assert_initialized()?;
        self.inner
            .state
            .read()
            .base_uri
            .clone()
            .ok_or(NavigationError::NotInitialized)
    }

    /// The absolute URI the application is currently displaying.
    pub fn uri(&self) -> Result<String> {
        self.assert_initialized()?;
        self.inner
            .state
            .read()
            .uri
            .clone()
            .ok_or(NavigationError::NotInitialized)
    }

    /// Ask the backend to navigate. The current URI is left untouched;
    /// the change arrives later through [`set_location`](Self::set_location)
    /// or a full reload.
    ///
    /// Any present string, including the empty one, is handed to the
    /// backend as is.
    pub fn navigate_to(&self, uri: Option<&str>, force_load: bool) -> Result<()> {
        tracing::info!(uri = ?uri, force_load, "Navigation requested");
        self.inner.backend.navigate_to_core(uri, force_load)
    }

    /// Host callback: the browser location changed.
    ///
    /// The URI is stored as given, then subscribers are notified.
    pub fn set_location(&self, uri: &str, is_intercepted_link: bool) {
        self.inner.state.write().uri = Some(uri.to_string());
        self.dispatch(LocationChangedEvent::new(uri.to_string(), is_intercepted_link));
    }

    /// Notify subscribers that the current URI changed.
    pub fn notify_location_changed(&self, is_intercepted_link: bool) -> Result<()> {
        let location = self
            .inner
            .state
            .read()
            .uri
            .clone()
            .ok_or(NavigationError::NotInitialized)?;
        self.dispatch(LocationChangedEvent::new(location, is_intercepted_link));
        Ok(())
    }

    /// Resolve a possibly relative URI against the base URI.
    pub fn to_absolute_uri(&self, relative: &str) -> Result<Url> {
        let base_uri = self.base_uri()?;
        resolve(&base_uri, relative)
    }

    /// The path of `uri` relative to the base URI.
    pub fn to_base_relative_path(&self, uri: &str) -> Result<String> {
        let base_uri = self.base_uri()?;
        relative_to_base(&base_uri, uri).ok_or_else(|| NavigationError::NotWithinBase {
            uri: uri.to_string(),
            base_uri,
        })
    }
}

impl<B> NavigationManager<B> {
    /// Register a handler for location changes.
    pub fn on_location_changed<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&LocationChangedEvent) + Send + Sync + 'static,
    {
        let subscription = Subscription::new();
        let handler: Handler = Arc::new(handler);
        self.inner.handlers.write().push((subscription, handler));
        subscription
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, subscription: &Subscription) -> bool {
        let mut handlers = self.inner.handlers.write();
        let before = handlers.len();
        handlers.retain(|(s, _)| s != subscription);
        handlers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.read().len()
    }

    fn dispatch(&self, event: LocationChangedEvent) {
        // Snapshot so handlers may subscribe, unsubscribe or read the manager.
        let handlers: Vec<Handler> = self
            .inner
            .handlers
            .read()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();

        tracing::debug!(
            location = %event.location,
            intercepted = event.is_navigation_intercepted,
            subscribers = handlers.len(),
            "Location changed"
        );

        for handler in handlers {
            handler(&event);
        }
    }
}

impl<B> Clone for NavigationManager<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeBackend {
        init_calls: AtomicUsize,
        fail_first_init: bool,
        navigations: Mutex<Vec<(String, bool)>>,
    }

    impl NavigationBackend for FakeBackend {
        fn ensure_initialized(&self) -> Result<InitialLocation> {
            let call = self.init_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first_init && call == 0 {
                return Err(NavigationError::NotInitialized);
            }
            Ok(InitialLocation {
                base_uri: "https://app.example/".to_string(),
                uri: "https://app.example/items/5".to_string(),
            })
        }

        fn navigate_to_core(&self, uri: Option<&str>, force_load: bool) -> Result<()> {
            let uri = uri.ok_or(NavigationError::MissingUri)?;
            self.navigations.lock().push((uri.to_string(), force_load));
            Ok(())
        }
    }

    #[test]
    fn test_lazy_initialization_happens_once() {
        let manager = NavigationManager::new(FakeBackend::default());
        assert!(!manager.is_initialized());

        assert_eq!(manager.uri().unwrap(), "https://app.example/items/5");
        assert_eq!(manager.base_uri().unwrap(), "https://app.example/");
        assert_eq!(manager.uri().unwrap(), "https://app.example/items/5");

        assert!(manager.is_initialized());
        assert_eq!(manager.backend().init_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_initialize_twice_is_rejected() {
        let manager = NavigationManager::new(FakeBackend::default());
        manager
            .initialize("https://a/".to_string(), "https://a/x".to_string())
            .unwrap();

        let err = manager
            .initialize("https://b/".to_string(), "https://b/y".to_string())
            .unwrap_err();
        assert!(matches!(err, NavigationError::AlreadyInitialized));

        // Explicit initialization means the backend is never asked.
        assert_eq!(manager.uri().unwrap(), "https://a/x");
        assert_eq!(manager.backend().init_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_failed_initialization_is_retried() {
        let manager = NavigationManager::new(FakeBackend {
            fail_first_init: true,
            ..Default::default()
        });

        assert!(manager.uri().is_err());
        assert!(!manager.is_initialized());

        assert_eq!(manager.uri().unwrap(), "https://app.example/items/5");
        assert_eq!(manager.backend().init_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_set_location_notifies_subscribers() {
        let manager = NavigationManager::new(FakeBackend::default());
        manager.uri().unwrap();

        let seen: Arc<Mutex<Vec<LocationChangedEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        manager.on_location_changed(move |e| sink.lock().push(e.clone()));

        manager.set_location("https://app.example/items/6", true);
        manager.set_location("https://app.example/items/7", false);

        assert_eq!(manager.uri().unwrap(), "https://app.example/items/7");

        let seen = seen.lock();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].location, "https://app.example/items/6");
        assert!(seen[0].is_navigation_intercepted);
        assert_eq!(seen[1].location, "https://app.example/items/7");
        assert!(!seen[1].is_navigation_intercepted);
    }

    #[test]
    fn test_set_location_accepts_any_string() {
        let manager = NavigationManager::new(FakeBackend::default());
        manager.uri().unwrap();

        manager.set_location("not even a uri", false);
        assert_eq!(manager.uri().unwrap(), "not even a uri");
    }

    #[test]
    fn test_navigate_to_does_not_change_uri() {
        let manager = NavigationManager::new(FakeBackend::default());
        manager.uri().unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        manager.on_location_changed(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        manager.navigate_to(Some("items/9"), true).unwrap();

        assert_eq!(manager.uri().unwrap(), "https://app.example/items/5");
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert_eq!(
            *manager.backend().navigations.lock(),
            vec![("items/9".to_string(), true)]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let manager = NavigationManager::new(FakeBackend::default());
        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        let subscription = manager.on_location_changed(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(manager.subscriber_count(), 1);

        manager.set_location("https://app.example/a", false);
        assert!(manager.unsubscribe(&subscription));
        assert!(!manager.unsubscribe(&subscription));
        manager.set_location("https://app.example/b", false);

        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(manager.subscriber_count(), 0);
    }

    #[test]
    fn test_handler_can_read_manager() {
        let manager = NavigationManager::new(FakeBackend::default());
        manager.uri().unwrap();

        let observed = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&observed);
        let reader = manager.clone();
        manager.on_location_changed(move |_| {
            *sink.lock() = reader.uri().ok();
        });

        manager.set_location("https://app.example/items/6", true);
        assert_eq!(
            observed.lock().as_deref(),
            Some("https://app.example/items/6")
        );
    }

    #[test]
    fn test_notify_requires_a_location() {
        let manager = NavigationManager::new(FakeBackend::default());
        assert!(matches!(
            manager.notify_location_changed(false),
            Err(NavigationError::NotInitialized)
        ));

        manager.uri().unwrap();
        manager.notify_location_changed(false).unwrap();
    }

    #[test]
    fn test_uri_helpers() {
        let manager = NavigationManager::new(FakeBackend::default());

        assert_eq!(
            manager.to_absolute_uri("items/6").unwrap().as_str(),
            "https://app.example/items/6"
        );
        assert_eq!(
            manager
                .to_base_relative_path("https://app.example/items/6")
                .unwrap(),
            "items/6"
        );
        assert!(matches!(
            manager.to_base_relative_path("https://elsewhere.example/"),
            Err(NavigationError::NotWithinBase { .. })
        ));
    }
}
