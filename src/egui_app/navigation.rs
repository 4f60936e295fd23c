//! Navigation Gate
//!
//! Decides which screens are reachable from the latest session signal and
//! keeps the screen stack for the current group.
//!
//! The gate owns its `AuthSubscription` for its whole lifetime: the
//! subscription is injected at construction and released on `teardown` or
//! drop. State changes are a pure function of the latest notification; there
//! is no debouncing and nothing the user can cancel.

use thiserror::Error;

use crate::egui_app::backend::AuthSubscription;
use crate::egui_app::types::{GateState, Screen, ScreenKind};
use crate::shared::{Session, User};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavigationError {
    #[error("{screen} is not reachable from the current screen while {state}")]
    Unreachable { screen: ScreenKind, state: GateState },
}

#[derive(Debug)]
pub struct NavigationGate {
    state: GateState,
    stack: Vec<Screen>,
    user: Option<User>,
    subscription: Option<AuthSubscription>,
}

impl NavigationGate {
    pub fn new(subscription: AuthSubscription) -> Self {
        tracing::debug!("[GATE] created with subscription {}", subscription.id());
        Self {
            state: GateState::Loading,
            stack: Vec::new(),
            user: None,
            subscription: Some(subscription),
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Top of the stack; `None` while loading
    pub fn current_screen(&self) -> Option<&Screen> {
        self.stack.last()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn reachable(&self) -> &'static [ScreenKind] {
        self.state.reachable()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(AuthSubscription::is_active)
    }

    /// Apply the startup session lookup.
    ///
    /// Ignored once a notification has moved the gate out of `Loading`.
    pub fn resolve_initial(&mut self, session: Option<&Session>) -> bool {
        if self.state != GateState::Loading {
            tracing::debug!("[GATE] startup session ignored, already {}", self.state);
            return false;
        }
        self.apply(session)
    }

    /// Apply a session signal. Returns whether the screen group changed.
    pub fn apply(&mut self, session: Option<&Session>) -> bool {
        let next = if session.is_some() {
            GateState::Authenticated
        } else {
            GateState::Unauthenticated
        };
        self.user = session.map(|s| s.user.clone());

        if next == self.state {
            return false;
        }

        tracing::info!("[GATE] {} -> {}", self.state, next);
        self.state = next;
        self.stack = next.default_screen().into_iter().collect();
        true
    }

    /// Apply every pending notification in order. Returns whether the group changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        loop {
            let change = match self.subscription.as_mut().and_then(AuthSubscription::try_next) {
                Some(change) => change,
                None => break,
            };
            tracing::debug!("[GATE] notification {}", change.event);
            changed |= self.apply(change.session.as_ref());
        }
        changed
    }

    /// Wait for the next notification and apply it
    pub async fn next_change(&mut self) -> Option<GateState> {
        let change = self.subscription.as_mut()?.next().await?;
        self.apply(change.session.as_ref());
        Some(self.state)
    }

    /// Push a screen of the current group
    pub fn navigate(&mut self, screen: Screen) -> Result<(), NavigationError> {
        let kind = screen.kind();
        let unreachable = NavigationError::Unreachable {
            screen: kind,
            state: self.state,
        };

        if !self.reachable().contains(&kind) {
            return Err(unreachable);
        }
        let from = self.current_screen().map(Screen::kind);
        if screen.parent().is_none() || screen.parent() != from {
            return Err(unreachable);
        }

        tracing::debug!("[GATE] push {}", kind);
        self.stack.push(screen);
        Ok(())
    }

    /// Pop back to the previous screen. The group's default screen stays.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    /// Release the session subscription
    pub fn teardown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
            tracing::debug!("[GATE] torn down");
        }
    }
}

impl Drop for NavigationGate {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::backend::AuthEventHub;
    use crate::shared::{AuthChangeEvent, Product, ProductId};
    use assert_matches::assert_matches;

    fn session(user_id: &str) -> Session {
        Session {
            access_token: "a".to_string(),
            token_type: "bearer".to_string(),
            expires_in: None,
            expires_at: None,
            refresh_token: "r".to_string(),
            user: User {
                id: user_id.to_string(),
                email: None,
            },
        }
    }

    fn product() -> Product {
        Product {
            id: ProductId::new("1"),
            description: "Smart TV".to_string(),
            price: 2900.0,
            image: "https://img".to_string(),
            user_id: "u1".to_string(),
        }
    }

    #[test]
    fn test_starts_loading_without_screens() {
        let hub = AuthEventHub::new();
        let gate = NavigationGate::new(hub.subscribe());
        assert_eq!(gate.state(), GateState::Loading);
        assert!(gate.current_screen().is_none());
        assert!(gate.reachable().is_empty());
    }

    #[test]
    fn test_initial_resolution() {
        let hub = AuthEventHub::new();
        let mut gate = NavigationGate::new(hub.subscribe());
        assert!(gate.resolve_initial(None));
        assert_eq!(gate.state(), GateState::Unauthenticated);
        assert_eq!(gate.current_screen(), Some(&Screen::Login));

        let mut gate = NavigationGate::new(hub.subscribe());
        gate.resolve_initial(Some(&session("u1")));
        assert_eq!(gate.state(), GateState::Authenticated);
        assert_eq!(gate.current_screen(), Some(&Screen::ProductList));
        assert_eq!(gate.user().unwrap().id, "u1");
    }

    #[test]
    fn test_stale_initial_resolution_ignored() {
        let hub = AuthEventHub::new();
        let mut gate = NavigationGate::new(hub.subscribe());
        hub.emit(AuthChangeEvent::SignedIn, Some(session("u1")));
        gate.poll();

        assert!(!gate.resolve_initial(None));
        assert_eq!(gate.state(), GateState::Authenticated);
    }

    #[test]
    fn test_last_notification_wins() {
        let hub = AuthEventHub::new();
        let mut gate = NavigationGate::new(hub.subscribe());
        gate.resolve_initial(None);

        hub.emit(AuthChangeEvent::SignedIn, Some(session("u1")));
        hub.emit(AuthChangeEvent::SignedOut, None);
        hub.emit(AuthChangeEvent::SignedIn, Some(session("u2")));
        gate.poll();

        assert_eq!(gate.state(), GateState::Authenticated);
        assert_eq!(gate.user().unwrap().id, "u2");
    }

    #[test]
    fn test_token_refresh_keeps_stack() {
        let hub = AuthEventHub::new();
        let mut gate = NavigationGate::new(hub.subscribe());
        gate.resolve_initial(Some(&session("u1")));
        gate.navigate(Screen::ProductForm { editing: Some(product()) }).unwrap();

        hub.emit(AuthChangeEvent::TokenRefreshed, Some(session("u1")));
        assert!(!gate.poll());
        assert_eq!(gate.stack_depth(), 2);
    }

    #[test]
    fn test_sign_out_resets_stack() {
        let hub = AuthEventHub::new();
        let mut gate = NavigationGate::new(hub.subscribe());
        gate.resolve_initial(Some(&session("u1")));
        gate.navigate(Screen::ProductForm { editing: None }).unwrap();

        hub.emit(AuthChangeEvent::SignedOut, None);
        assert!(gate.poll());
        assert_eq!(gate.state(), GateState::Unauthenticated);
        assert_eq!(gate.stack_depth(), 1);
        assert_eq!(gate.current_screen(), Some(&Screen::Login));
        assert!(gate.user().is_none());
    }

    #[test]
    fn test_navigation_rules() {
        let hub = AuthEventHub::new();
        let mut gate = NavigationGate::new(hub.subscribe());

        assert_matches!(gate.navigate(Screen::SignUp), Err(NavigationError::Unreachable { .. }));

        gate.resolve_initial(None);
        assert_matches!(
            gate.navigate(Screen::ProductForm { editing: None }),
            Err(NavigationError::Unreachable { screen: ScreenKind::ProductForm, .. })
        );
        assert_matches!(gate.navigate(Screen::Login), Err(NavigationError::Unreachable { .. }));

        gate.navigate(Screen::SignUp).unwrap();
        assert_matches!(gate.navigate(Screen::SignUp), Err(NavigationError::Unreachable { .. }));
        assert!(gate.go_back());
        assert_eq!(gate.current_screen(), Some(&Screen::Login));
        assert!(!gate.go_back());
    }

    #[test]
    fn test_teardown_releases_subscription() {
        let hub = AuthEventHub::new();
        let mut gate = NavigationGate::new(hub.subscribe());
        assert!(gate.is_subscribed());
        assert_eq!(hub.subscriber_count(), 1);

        gate.teardown();
        assert!(!gate.is_subscribed());
        assert_eq!(hub.subscriber_count(), 0);

        let gate = NavigationGate::new(hub.subscribe());
        drop(gate);
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_next_change() {
        let hub = AuthEventHub::new();
        let mut gate = NavigationGate::new(hub.subscribe());
        gate.resolve_initial(None);

        hub.emit(AuthChangeEvent::SignedIn, Some(session("u1")));
        assert_eq!(gate.next_change().await, Some(GateState::Authenticated));
    }
}
