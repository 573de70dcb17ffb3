//! SnapPlan: house layout designer
//!
//! Three screens in one window:
//! - Login (credential stub)
//! - House setup (dimensions, room counts, garden flag)
//! - Designer: 2D blueprint canvas with drag-and-drop items, palettes,
//!   export/report actions, and a stylized 3D preview

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod auth;
mod designer;
mod scene;
mod screens;
mod ui;
mod view3d;

use macroquad::prelude::*;

use app::{AppState, Screen, Session};
use ui::{MouseState, Rect, UiContext};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("SnapPlan v{}", VERSION),
        window_width: 1100,
        window_height: 750,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut ui_ctx = UiContext::new();
    let mut app = AppState::new();

    // Mouse state tracking
    let mut last_left_down = false;

    println!("=== SnapPlan v{} ===", VERSION);

    loop {
        let mouse_pos = mouse_position();
        let left_down = is_mouse_button_down(MouseButton::Left);
        let mouse_state = MouseState {
            x: mouse_pos.0,
            y: mouse_pos.1,
            left_down,
            left_pressed: left_down && !last_left_down,
            left_released: !left_down && last_left_down,
            scroll: mouse_wheel().1,
        };
        last_left_down = left_down;
        ui_ctx.begin_frame(mouse_state);

        clear_background(Color::from_rgba(224, 224, 224, 255));
        let area = Rect::new(0.0, 0.0, screen_width(), screen_height());

        match app.screen {
            Screen::Login => {
                if let Some(session) = screens::draw_login(&mut ui_ctx, area, &mut app.login) {
                    app.session = Some(session);
                    app.screen = Screen::Setup;
                }
            }
            Screen::Setup => {
                if let Some(config) = screens::draw_setup(&mut ui_ctx, area, &mut app.setup) {
                    let session = app.session.clone().unwrap_or_else(|| Session {
                        username: "User".to_string(),
                        role: "Designer".to_string(),
                    });
                    app.start_designing(config, session);
                }
            }
            Screen::Designer => {
                if let Some(designer) = app.designer.as_mut() {
                    designer::draw_designer(&mut ui_ctx, area, designer);
                }
            }
        }

        // Tooltips draw last, over everything
        ui_ctx.draw_tooltip();

        next_frame().await;
    }
}
