use bevy::{
    asset::LoadState,
    log::LogPlugin,
    prelude::*,
    sprite::Anchor,
    window::{PresentMode, WindowResolution},
};
use chess_core::{
    standard_layout, BoardClick, ClickOutcome, GameSession, LayoutEntry, PieceId, Position,
    SessionSnapshot, Team,
};
use std::collections::HashMap;

pub mod config;

pub use config::ChessUiConfig;

const SQUARE_Z: f32 = 1.0;
const HIGHLIGHT_Z: f32 = 1.5;
const PIECE_Z: f32 = 2.0;

#[derive(Default)]
pub struct ChessUiPlugin {
    pub config: ChessUiConfig,
}

/// A piece waiting for its texture before it is placed on the board.
struct PendingPiece {
    entry: LayoutEntry,
    texture: Handle<Image>,
}

#[derive(Resource, Default)]
struct GameState {
    session: GameSession,
    pending: Vec<PendingPiece>,
    sprites: HashMap<PieceId, Entity>,
}

/// Square size in world units, derived from the window each frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
struct BoardMetrics {
    square_size: f32,
}

impl BoardMetrics {
    fn for_window(width: f32, height: f32) -> Self {
        Self {
            square_size: width.min(height) / 10.0,
        }
    }

    fn cell_to_world(&self, pos: Position, z: f32) -> Vec3 {
        Vec3::new(
            (pos.x as f32 - 3.5) * self.square_size,
            (pos.z as f32 - 3.5) * self.square_size,
            z,
        )
    }

    fn world_to_cell(&self, world: Vec2) -> Option<Position> {
        let x = (world.x / self.square_size + 4.0).floor();
        let z = (world.y / self.square_size + 4.0).floor();
        if x < 0.0 || z < 0.0 || x >= 8.0 || z >= 8.0 {
            return None;
        }
        Position::new(x as u8, z as u8)
    }

    fn piece_size(&self) -> Vec2 {
        Vec2::splat(self.square_size * 0.8)
    }
}

#[derive(Component, Copy, Clone)]
struct Square {
    position: Position,
}

/// Links a sprite to the piece it draws.
#[derive(Component, Copy, Clone)]
struct PieceSprite {
    id: PieceId,
    team: Team,
}

#[derive(Component)]
struct MoveIndicator;

#[derive(Component)]
struct TurnText;

#[derive(Component)]
struct MovingPiece {
    cell: Position,
}

impl Plugin for ChessUiPlugin {
    fn build(&self, app: &mut App) {
        let config = self.config.clone();

        app.add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.window_title.clone(),
                        resolution: WindowResolution::new(config.window_width, config.window_height),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: config.asset_dir.clone(),
                    ..default()
                })
                .set(LogPlugin {
                    level: config.log_level,
                    filter: config.log_filter.clone(),
                }),
        )
        .insert_resource(BoardMetrics::for_window(config.window_width, config.window_height))
        .insert_resource(config)
        .init_resource::<GameState>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                handle_resize,
                place_loaded_pieces,
                handle_input,
                handle_reset,
                update_selected_pieces,
                show_valid_moves,
                update_turn_text,
                update_piece_movement,
            )
                .chain(),
        );
    }
}

fn setup(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ChessUiConfig>,
    metrics: Res<BoardMetrics>,
    mut game_state: ResMut<GameState>,
) {
    commands.spawn(Camera2dBundle::default());

    // Squares, a1 dark
    for x in 0..8 {
        for z in 0..8 {
            let position = Position { x, z };
            let color = if (x + z) % 2 == 0 {
                config.dark_square
            } else {
                config.light_square
            };

            commands.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color,
                        custom_size: Some(Vec2::splat(metrics.square_size)),
                        ..default()
                    },
                    transform: Transform::from_translation(metrics.cell_to_world(position, SQUARE_Z)),
                    ..default()
                },
                Square { position },
            ));
        }
    }

    // Pieces land one by one as their textures finish loading
    queue_layout(&mut game_state, &asset_server);
    info!("loading {} piece textures", game_state.pending.len());

    // Turn indicator
    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 30.0,
                color: Color::WHITE,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            right: Val::Px(10.0),
            ..default()
        }),
        TurnText,
    ));
}

fn queue_layout(game_state: &mut GameState, asset_server: &AssetServer) {
    game_state.pending = standard_layout()
        .into_iter()
        .map(|entry| PendingPiece {
            texture: asset_server.load(entry.kind.asset_name(entry.team)),
            entry,
        })
        .collect();
}

/// Places every piece whose texture has finished loading since last frame.
/// A texture that fails to load still places the piece, drawn flat.
fn place_loaded_pieces(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ChessUiConfig>,
    metrics: Res<BoardMetrics>,
    mut game_state: ResMut<GameState>,
) {
    if game_state.pending.is_empty() {
        return;
    }

    let GameState {
        session,
        pending,
        sprites,
    } = &mut *game_state;

    pending.retain(|piece| {
        let texture = match asset_server.get_load_state(piece.texture.id()) {
            Some(LoadState::Loaded) => Some(piece.texture.clone()),
            Some(LoadState::Failed) => {
                warn!(
                    "texture {} failed to load, drawing a plain {} {}",
                    piece.entry.kind.asset_name(piece.entry.team),
                    piece.entry.team,
                    piece.entry.kind.name()
                );
                None
            }
            _ => return true,
        };

        match session.place(piece.entry) {
            Ok(id) => {
                let entity = spawn_piece(&mut commands, id, piece.entry, texture, &metrics, &config);
                sprites.insert(id, entity);
            }
            Err(err) => error!("could not place {:?}: {err}", piece.entry),
        }
        false
    });
}

fn spawn_piece(
    commands: &mut Commands,
    id: PieceId,
    entry: LayoutEntry,
    texture: Option<Handle<Image>>,
    metrics: &BoardMetrics,
    config: &ChessUiConfig,
) -> Entity {
    let color = match (&texture, entry.team) {
        (Some(_), _) => Color::WHITE,
        (None, Team::White) => config.white_fallback,
        (None, Team::Black) => config.black_fallback,
    };

    commands
        .spawn((
            SpriteBundle {
                texture: texture.unwrap_or_default(),
                transform: Transform::from_translation(metrics.cell_to_world(entry.position, PIECE_Z)),
                sprite: Sprite {
                    color,
                    custom_size: Some(metrics.piece_size()),
                    anchor: Anchor::Center,
                    ..default()
                },
                ..default()
            },
            PieceSprite {
                id,
                team: entry.team,
            },
        ))
        .id()
}

fn handle_resize(
    windows: Query<&Window>,
    mut metrics: ResMut<BoardMetrics>,
    game_state: Res<GameState>,
    mut square_query: Query<(&mut Transform, &mut Sprite, &Square), Without<PieceSprite>>,
    mut piece_query: Query<(&mut Transform, &mut Sprite, &PieceSprite, Option<&MovingPiece>), Without<Square>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let resized = BoardMetrics::for_window(window.width(), window.height());
    if resized == *metrics {
        return;
    }
    *metrics = resized;

    // Update squares
    for (mut transform, mut sprite, square) in square_query.iter_mut() {
        sprite.custom_size = Some(Vec2::splat(metrics.square_size));
        transform.translation = metrics.cell_to_world(square.position, SQUARE_Z);
    }

    for (mut transform, mut sprite, piece, moving) in piece_query.iter_mut() {
        sprite.custom_size = Some(metrics.piece_size());
        // Sliding pieces pick up the new size from their target cell
        if moving.is_some() {
            continue;
        }
        if let Some(board_piece) = game_state.session.board().piece(piece.id) {
            transform.translation = metrics.cell_to_world(board_piece.position, PIECE_Z);
        }
    }
}

fn handle_input(
    mut commands: Commands,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mouse_button: Res<Input<MouseButton>>,
    metrics: Res<BoardMetrics>,
    pieces: Query<(&PieceSprite, &Transform, Option<&MovingPiece>)>,
    mut game_state: ResMut<GameState>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    let (Ok(window), Ok((camera, camera_transform))) = (windows.get_single(), camera_q.get_single()) else {
        return;
    };

    let Some(world_position) = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world(camera_transform, cursor))
        .map(|ray| ray.origin.truncate())
    else {
        return;
    };

    let snapshot = match metrics.world_to_cell(world_position) {
        Some(target) => {
            let hit = piece_under_cursor(pieces.iter(), world_position, &metrics);
            let click = match hit {
                Some(id) => BoardClick::piece(target, id),
                None => BoardClick::cell(target),
            };
            game_state.session.handle_click(click)
        }
        // Off the board: drop whatever was selected
        None => game_state.session.clear_selection(),
    };

    apply_snapshot(&mut commands, &mut game_state.sprites, &snapshot);
}

/// Finds the resting sprite under the cursor. Sprites still sliding to their
/// cell are skipped, their transform no longer matches the board.
fn piece_under_cursor<'a>(
    sprites: impl IntoIterator<Item = (&'a PieceSprite, &'a Transform, Option<&'a MovingPiece>)>,
    cursor: Vec2,
    metrics: &BoardMetrics,
) -> Option<PieceId> {
    let reach = metrics.piece_size().x / 2.0;
    sprites
        .into_iter()
        .filter(|(_, _, moving)| moving.is_none())
        .find(|(_, transform, _)| {
            (transform.translation.truncate() - cursor).abs().max_element() <= reach
        })
        .map(|(piece, _, _)| piece.id)
}

/// Mirrors a completed move onto the sprites: the mover slides to its new
/// cell and a captured piece's sprite is released.
fn apply_snapshot(
    commands: &mut Commands,
    sprites: &mut HashMap<PieceId, Entity>,
    snapshot: &SessionSnapshot,
) {
    let ClickOutcome::Moved(record) = snapshot.outcome else {
        return;
    };

    if let Some(&entity) = sprites.get(&record.piece) {
        commands.entity(entity).insert(MovingPiece { cell: record.to });
    }

    // Release the captured piece's sprite
    if let Some(victim) = record.captured {
        if let Some(entity) = sprites.remove(&victim.id) {
            commands.entity(entity).despawn();
        }
    }

    info!("{} to move", snapshot.current_turn);
}

fn handle_reset(
    mut commands: Commands,
    keys: Res<Input<KeyCode>>,
    asset_server: Res<AssetServer>,
    mut game_state: ResMut<GameState>,
) {
    if !keys.just_pressed(KeyCode::R) {
        return;
    }

    // Clear the old pieces, then queue the layout again
    for (_, entity) in game_state.sprites.drain() {
        commands.entity(entity).despawn();
    }
    game_state.session.reset();
    queue_layout(&mut game_state, &asset_server);
    info!("new game");
}

fn update_selected_pieces(
    config: Res<ChessUiConfig>,
    game_state: Res<GameState>,
    mut pieces: Query<(&mut Sprite, &PieceSprite)>,
) {
    let selected = game_state.session.selected().map(|p| p.id);
    for (mut sprite, piece) in pieces.iter_mut() {
        let alpha = if Some(piece.id) == selected {
            config.selected_alpha
        } else {
            1.0
        };
        sprite.color = sprite.color.with_a(alpha);
    }
}

fn show_valid_moves(
    mut commands: Commands,
    config: Res<ChessUiConfig>,
    metrics: Res<BoardMetrics>,
    game_state: Res<GameState>,
    indicators: Query<Entity, With<MoveIndicator>>,
) {
    // Drop last frame's markers
    for entity in indicators.iter() {
        commands.entity(entity).despawn();
    }

    for target in game_state.session.highlighted() {
        commands.spawn((
            SpriteBundle {
                sprite: Sprite {
                    color: config.highlight,
                    custom_size: Some(Vec2::splat(metrics.square_size * 0.3)),
                    anchor: Anchor::Center,
                    ..default()
                },
                transform: Transform::from_translation(metrics.cell_to_world(target, HIGHLIGHT_Z)),
                ..default()
            },
            MoveIndicator,
        ));
    }
}

fn update_turn_text(
    game_state: Res<GameState>,
    pieces: Query<&PieceSprite>,
    mut text_query: Query<&mut Text, With<TurnText>>,
) {
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    let value = if !game_state.pending.is_empty() {
        format!("Loading {} pieces...", game_state.pending.len())
    } else {
        let turn = game_state.session.current_turn();
        let remaining = pieces.iter().filter(|p| p.team == turn).count();
        format!("{turn} to move ({remaining} pieces)")
    };

    if text.sections[0].value != value {
        text.sections[0].value = value;
    }
}

fn update_piece_movement(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<ChessUiConfig>,
    metrics: Res<BoardMetrics>,
    mut query: Query<(Entity, &mut Transform, &MovingPiece)>,
) {
    let step = config.move_speed * metrics.square_size * time.delta_seconds();

    for (entity, mut transform, moving) in query.iter_mut() {
        let target = metrics.cell_to_world(moving.cell, PIECE_Z);
        let offset = target - transform.translation;

        if offset.length() <= step.max(1.0) {
            transform.translation = target;
            commands.entity(entity).remove::<MovingPiece>();
        } else {
            transform.translation += offset.normalize() * step;
        }
    }
}
