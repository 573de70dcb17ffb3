//! Login screen
//!
//! Credential stub: any non-empty username/password pair signs in.

use macroquad::prelude::*;

use crate::app::Session;
use crate::auth;
use crate::ui::{self, Rect, UiContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Username,
    Password,
}

pub struct LoginState {
    username: String,
    password: String,
    error: Option<String>,
    focus: Option<LoginField>,
}

impl LoginState {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            error: None,
            focus: Some(LoginField::Username),
        }
    }

    fn submit(&mut self) -> Option<Session> {
        let username = self.username.trim().to_string();
        let password = self.password.trim().to_string();

        if username.is_empty() || password.is_empty() {
            self.error = Some("Please enter both username and password".to_string());
            return None;
        }

        if auth::validate_user(&username, &password) {
            let role = auth::user_role(&username).to_string();
            auth::log_usage(&username, &role, "Logged in");
            Some(Session { username, role })
        } else {
            self.error = Some("Invalid username or password".to_string());
            None
        }
    }
}

/// Draw the login screen. Returns the session once the user signed in.
pub fn draw_login(ctx: &mut UiContext, area: Rect, state: &mut LoginState) -> Option<Session> {
    let panel_w = 340.0;
    let panel_h = 270.0;
    let panel = Rect::new(
        area.x + (area.w - panel_w) * 0.5,
        area.y + (area.h - panel_h) * 0.5,
        panel_w,
        panel_h,
    );

    draw_rectangle(panel.x, panel.y, panel.w, panel.h, Color::from_rgba(240, 248, 255, 255));
    draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 1.0, Color::from_rgba(160, 160, 160, 255));

    let title = "SnapPlan Login";
    let title_dims = measure_text(title, None, 24, 1.0);
    draw_text(
        title,
        panel.center_x() - title_dims.width * 0.5,
        panel.y + 44.0,
        24.0,
        ui::TEXT_COLOR,
    );

    let field_w = panel_w - 60.0;
    let field_x = panel.x + 30.0;
    let user_rect = Rect::new(field_x, panel.y + 70.0, field_w, 32.0);
    let pass_rect = Rect::new(field_x, panel.y + 114.0, field_w, 32.0);

    if ui::text_field(
        ctx,
        user_rect,
        &mut state.username,
        "Username",
        false,
        state.focus == Some(LoginField::Username),
    ) {
        state.focus = Some(LoginField::Username);
    }
    if ui::text_field(
        ctx,
        pass_rect,
        &mut state.password,
        "Password",
        true,
        state.focus == Some(LoginField::Password),
    ) {
        state.focus = Some(LoginField::Password);
    }

    // Tab cycles fields, Enter submits
    if is_key_pressed(KeyCode::Tab) {
        state.focus = match state.focus {
            Some(LoginField::Username) => Some(LoginField::Password),
            _ => Some(LoginField::Username),
        };
    }

    if let Some(error) = &state.error {
        let dims = measure_text(error, None, 14, 1.0);
        draw_text(
            error,
            panel.center_x() - dims.width * 0.5,
            panel.y + 168.0,
            14.0,
            ui::ERROR_COLOR,
        );
    }

    let button_rect = Rect::new(panel.center_x() - 60.0, panel.y + 190.0, 120.0, 36.0);
    let submitted = ui::button(ctx, button_rect, "Login") || is_key_pressed(KeyCode::Enter);

    if submitted {
        return state.submit();
    }
    None
}
