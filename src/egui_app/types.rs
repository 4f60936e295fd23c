/**
 * Shared Types Module
 *
 * Gate states and the screens each state exposes.
 */

use std::fmt;

use crate::shared::Product;

/// Session-derived navigation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Startup session lookup still pending
    Loading,
    Unauthenticated,
    Authenticated,
}

impl GateState {
    /// Screens reachable in this state, default first
    pub fn reachable(self) -> &'static [ScreenKind] {
        match self {
            GateState::Loading => &[],
            GateState::Unauthenticated => &[ScreenKind::Login, ScreenKind::SignUp],
            GateState::Authenticated => &[ScreenKind::ProductList, ScreenKind::ProductForm],
        }
    }

    /// Screen shown on entering this state
    pub fn default_screen(self) -> Option<Screen> {
        match self {
            GateState::Loading => None,
            GateState::Unauthenticated => Some(Screen::Login),
            GateState::Authenticated => Some(Screen::ProductList),
        }
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateState::Loading => write!(f, "loading"),
            GateState::Unauthenticated => write!(f, "unauthenticated"),
            GateState::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Screen identity without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Login,
    SignUp,
    ProductList,
    ProductForm,
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenKind::Login => write!(f, "Login"),
            ScreenKind::SignUp => write!(f, "SignUp"),
            ScreenKind::ProductList => write!(f, "ProductList"),
            ScreenKind::ProductForm => write!(f, "ProductForm"),
        }
    }
}

/// A screen on the navigation stack
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Login,
    SignUp,
    ProductList,
    /// `editing` is the product being edited; `None` creates a new one
    ProductForm { editing: Option<Product> },
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Screen::Login => ScreenKind::Login,
            Screen::SignUp => ScreenKind::SignUp,
            Screen::ProductList => ScreenKind::ProductList,
            Screen::ProductForm { .. } => ScreenKind::ProductForm,
        }
    }

    /// Screen this one may be pushed from
    pub fn parent(&self) -> Option<ScreenKind> {
        match self {
            Screen::Login | Screen::ProductList => None,
            Screen::SignUp => Some(ScreenKind::Login),
            Screen::ProductForm { .. } => Some(ScreenKind::ProductList),
        }
    }
}
