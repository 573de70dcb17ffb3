//! Application state and screen management
//!
//! Fixed set of screens driven from the main loop. Login and setup keep
//! their form state alive; the designer is created once the house
//! configuration is known.

use crate::designer::DesignerState;
use crate::screens::{LoginState, SetupState};

/// The available screens, in the order the user walks through them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Setup,
    Designer,
}

/// Who is logged in
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub role: String,
}

/// House parameters collected by the setup screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HouseConfig {
    pub width: i32,
    pub height: i32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub kitchens: u32,
    pub garden: bool,
}

/// Main application state containing all screen states
pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    pub setup: SetupState,
    /// Present once the user signed in
    pub session: Option<Session>,
    /// Present once the user finished the setup screen
    pub designer: Option<DesignerState>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Login,
            login: LoginState::new(),
            setup: SetupState::new(),
            session: None,
            designer: None,
        }
    }

    /// Enter the designer with a fresh scene for the given configuration
    pub fn start_designing(&mut self, config: HouseConfig, session: Session) {
        self.designer = Some(DesignerState::new(config, session));
        self.screen = Screen::Designer;
    }
}
