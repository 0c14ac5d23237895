use bevy::{log::Level, prelude::*};

/// Knobs for the board window. Insert a custom value through
/// `ChessUiPlugin { config }` to override the defaults.
#[derive(Resource, Clone, Debug)]
pub struct ChessUiConfig {
    pub window_title: String,
    pub window_width: f32,
    pub window_height: f32,
    /// Root folder the piece textures are loaded from.
    pub asset_dir: String,
    pub log_level: Level,
    pub log_filter: String,
    pub light_square: Color,
    pub dark_square: Color,
    pub highlight: Color,
    pub white_fallback: Color,
    pub black_fallback: Color,
    pub selected_alpha: f32,
    /// Piece animation speed in squares per second.
    pub move_speed: f32,
}

impl Default for ChessUiConfig {
    fn default() -> Self {
        Self {
            window_title: "PokeChess".into(),
            window_width: 800.0,
            window_height: 800.0,
            asset_dir: "assets".into(),
            log_level: Level::INFO,
            log_filter: "wgpu=error,naga=warn,chess_core=debug".into(),
            light_square: Color::rgb(0.93, 0.93, 0.82),
            dark_square: Color::rgb(0.46, 0.59, 0.34),
            highlight: Color::rgba(0.95, 0.8, 0.2, 0.8),
            white_fallback: Color::rgb(0.95, 0.95, 0.95),
            black_fallback: Color::rgb(0.15, 0.15, 0.15),
            selected_alpha: 0.7,
            move_speed: 6.0,
        }
    }
}
