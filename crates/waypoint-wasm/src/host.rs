//! Target-independent pieces of the host surface

use std::collections::{BTreeMap, HashMap};

use waypoint_core::{Config, LocationChangedEvent, NavigationManager, Result, Subscription};

/// Configuration handed over by the host, if any.
///
/// `None` or a blank string means defaults.
pub fn config_from_option(json: Option<&str>) -> Result<Config> {
    match json.map(str::trim) {
        None | Some("") => Ok(Config::default()),
        Some(json) => Config::from_json(json),
    }
}

/// Host-side listeners keyed by small integer ids that survive the trip
/// through JavaScript.
#[derive(Debug)]
pub struct ListenerRegistry<T> {
    next_id: u32,
    entries: BTreeMap<u32, T>,
}

impl<T> ListenerRegistry<T> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: BTreeMap::new(),
        }
    }

    /// Store `listener` under a fresh id. Ids still in use are skipped
    /// after the counter wraps around.
    pub fn insert(&mut self, listener: T) -> u32 {
        let mut id = self.next_id;
        while self.entries.contains_key(&id) {
            id = Self::following(id);
        }
        self.next_id = Self::following(id);
        self.entries.insert(id, listener);
        id
    }

    fn following(id: u32) -> u32 {
        id.wrapping_add(1).max(1)
    }

    pub fn get(&self, id: u32) -> Option<&T> {
        self.entries.get(&id)
    }

    pub fn remove(&mut self, id: u32) -> Option<T> {
        self.entries.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for ListenerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Which manager subscription belongs to which host listener id.
#[derive(Debug, Default)]
pub struct ListenerSubscriptions {
    subscriptions: HashMap<u32, Subscription>,
}

impl ListenerSubscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<B, F>(
        &mut self,
        navigation: &NavigationManager<B>,
        listener_id: u32,
        handler: F,
    ) -> Subscription
    where
        F: Fn(&LocationChangedEvent) + Send + Sync + 'static,
    {
        let subscription = navigation.on_location_changed(handler);
        if let Some(previous) = self.subscriptions.insert(listener_id, subscription) {
            navigation.unsubscribe(&previous);
        }
        subscription
    }

    /// Drop the subscription of `listener_id`. False if it had none.
    pub fn unsubscribe<B>(&mut self, navigation: &NavigationManager<B>, listener_id: u32) -> bool {
        match self.subscriptions.remove(&listener_id) {
            Some(subscription) => navigation.unsubscribe(&subscription),
            None => false,
        }
    }

    /// Drop every subscription and return the listener ids released.
    pub fn release_all<B>(&mut self, navigation: &NavigationManager<B>) -> Vec<u32> {
        let mut released: Vec<u32> = Vec::with_capacity(self.subscriptions.len());
        for (listener_id, subscription) in self.subscriptions.drain() {
            navigation.unsubscribe(&subscription);
            released.push(listener_id);
        }
        released.sort_unstable();
        released
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
