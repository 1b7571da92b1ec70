use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};
use macroquad::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::time::{SystemTime, UNIX_EPOCH};

use snake_turns::{
    Cell, Command, Contents, Difficulty, Direction, Event, Game, Layer, Obstacle, Part, Phase,
    Settings,
};

const SCREEN_WIDTH: i32 = 1024;
const SCREEN_HEIGHT: i32 = 576;
const SETTINGS_PATH: &str = "snake_settings.json";
const LOG_PATH: &str = "snake.log";

const BOARD_LIGHT: Color = LIGHTGRAY;
const BOARD_DARK: Color = Color::new(0.71, 0.71, 0.71, 1.0);
const SNAKE_HEAD: Color = Color::new(0.18, 0.55, 0.2, 1.0);
const SNAKE_BODY: Color = Color::new(0.25, 0.7, 0.25, 1.0);
const SNAKE_TAIL: Color = Color::new(0.45, 0.8, 0.4, 1.0);
const FOOD: Color = Color::new(0.85, 0.15, 0.15, 1.0);
const BACKGROUND: Color = Color::new(0.96, 0.96, 0.96, 1.0);
const SELECTED: Color = Color::new(0.86, 0.86, 0.86, 1.0);
const PAUSE_SHADE: Color = Color::new(0.0, 0.0, 0.0, 0.2);

// Simple WAV (PCM16 mono) generator for tones
fn generate_wav_sine(frequency_hz: f32, duration_seconds: f32, volume: f32) -> Vec<u8> {
    let sample_rate: u32 = 44100;
    let num_samples: u32 = (duration_seconds * sample_rate as f32) as u32;
    let mut data: Vec<u8> = Vec::with_capacity((num_samples as usize) * 2 + 44);

    let block_align: u16 = 2;
    let byte_rate: u32 = sample_rate * block_align as u32;
    let data_size: u32 = num_samples * 2;

    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&(36 + data_size).to_le_bytes());
    data.extend_from_slice(b"WAVE");
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM
    data.extend_from_slice(&1u16.to_le_bytes()); // mono
    data.extend_from_slice(&sample_rate.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes());
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    let amplitude = volume.clamp(0.0, 1.0) * 0.7;
    for n in 0..num_samples {
        let t = n as f32 / sample_rate as f32;
        let wave = (std::f32::consts::TAU * frequency_hz * t).sin();
        let sample = (amplitude * wave * i16::MAX as f32) as i16;
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}

async fn tone(frequency_hz: f32, duration_seconds: f32) -> Option<Sound> {
    let bytes = generate_wav_sine(frequency_hz, duration_seconds, 0.6);
    match load_sound_from_bytes(&bytes).await {
        Ok(sound) => Some(sound),
        Err(err) => {
            log::warn!("could not load {frequency_hz}Hz tone: {err:?}");
            None
        }
    }
}

struct Sounds {
    start: Option<Sound>,
    switch_screen: Option<Sound>,
    button_click: Option<Sound>,
    eat: Option<Sound>,
    death: Option<Sound>,
    win: Option<Sound>,
    volume: f32,
}

impl Sounds {
    async fn load(volume: f32) -> Self {
        Self {
            start: tone(660.0, 0.15).await,
            switch_screen: tone(440.0, 0.06).await,
            button_click: tone(1200.0, 0.03).await,
            eat: tone(880.0, 0.08).await,
            death: tone(110.0, 0.25).await,
            win: tone(990.0, 0.4).await,
            volume,
        }
    }

    fn play(&self, event: Event) {
        let sound = match event {
            Event::Start => &self.start,
            Event::SwitchScreen => &self.switch_screen,
            Event::ButtonClick => &self.button_click,
            Event::Eat => &self.eat,
            Event::Death(_) => &self.death,
            Event::Win => &self.win,
        };
        if let Some(sound) = sound {
            audio::play_sound(sound, PlaySoundParams {
                looped: false,
                volume: self.volume,
            });
        }
    }
}

struct Button {
    shape: Rect,
    difficulty: Difficulty,
}

fn difficulty_buttons() -> Vec<Button> {
    let y = SCREEN_HEIGHT as f32 / 2.0;
    Difficulty::ALL
        .iter()
        .enumerate()
        .map(|(i, difficulty)| Button {
            shape: Rect::new(250.0 + 130.0 * i as f32, y, 120.0, 70.0),
            difficulty: *difficulty,
        })
        .collect()
}

fn draw_centered_text(text: &str, y: f32, font_size: u16, color: Color) {
    let m = measure_text(text, None, font_size, 1.0);
    draw_text(text, (screen_width() - m.width) * 0.5, y, font_size as f32, color);
}

fn draw_button(button: &Button, selected: bool) {
    let hovered = button.shape.contains(mouse_position().into());
    let grow = if hovered { 3.0 } else { 0.0 };
    let Rect { x, y, w, h } = button.shape;
    let (x, y, w, h) = (x - grow, y - grow, w + grow * 2.0, h + grow * 2.0);

    draw_rectangle(x, y, w, h, DARKGRAY);
    let text_color = if selected {
        draw_rectangle(x + 6.0, y + 6.0, w - 12.0, h - 12.0, SELECTED);
        DARKGRAY
    } else {
        WHITE
    };
    let text = button.difficulty.label();
    let font_size = if hovered { 27 } else { 25 };
    let m = measure_text(text, None, font_size, 1.0);
    let text_x = x + (w - m.width) * 0.5;
    let text_y = y + (h + m.height) * 0.5;
    draw_text(text, text_x, text_y, font_size as f32, text_color);
}

/// Where the board sits on screen: top-left corner and cell size.
fn board_layout(side: usize) -> (f32, f32, f32) {
    let cell = (SCREEN_HEIGHT as f32 / side as f32).floor();
    let x = (screen_width() - cell * side as f32) * 0.5;
    let y = (screen_height() - cell * side as f32) * 0.5;
    (x, y, cell)
}

fn part_color(part: Part) -> Option<Color> {
    match part {
        Part::Empty => None,
        Part::Head | Part::MouthOpen | Part::MouthEat | Part::MouthClose => Some(SNAKE_HEAD),
        Part::Body => Some(SNAKE_BODY),
        Part::Tail | Part::TailGrow => Some(SNAKE_TAIL),
        Part::DeathWall => Some(RED),
    }
}

// Bar from the cell centre to the middle of the edge facing `side`.
fn draw_half(cx: f32, cy: f32, cell: f32, side: Direction, reach: f32, color: Color) {
    let (dx, dy) = side.offset();
    let len = cell * 0.5 * reach;
    let ex = cx + dx as f32 * len;
    let ey = cy + dy as f32 * len;
    draw_line(cx, cy, ex, ey, cell * 0.6, color);
    draw_circle(cx, cy, cell * 0.3, color);
}

fn draw_snake_cell(cell: &Cell, cx: f32, cy: f32, size: f32, progress: f32) {
    if let (Some(color), Some(dir)) = (part_color(cell.entering.part), cell.entering_dir) {
        let from = cell.entering.turn.previous(dir).opposite();
        let reach = if cell.entering.part == Part::TailGrow { 1.0 } else { progress.max(0.2) };
        draw_half(cx, cy, size, from, reach, color);
    }
    if let (Some(color), Some(dir)) = (part_color(cell.leaving.part), cell.leaving_dir) {
        let reach = if cell.leaving.part == Part::Tail { 1.0 - progress } else { 1.0 };
        draw_half(cx, cy, size, dir, reach.max(0.2), color);
    }

    // draw_poly points right at 0 degrees; headings assume a left-facing sprite.
    if let Some(dir) = cell.entering_dir {
        let rotation = 180.0 + dir.rotation_degrees();
        match cell.entering.part {
            Part::MouthOpen | Part::MouthEat => draw_poly(cx, cy, 3, size * 0.14, rotation, BLACK),
            Part::MouthClose => draw_poly(cx, cy, 3, size * 0.07, rotation, BLACK),
            _ => {}
        }
    }
    if let Some(layers) = cell.layers {
        if layers.contains(&Layer::Food) {
            draw_circle(cx, cy, size * 0.15 * (1.0 - progress), FOOD);
        }
        if layers.contains(&Layer::MouthTop) {
            draw_circle(cx, cy, size * 0.08, BLACK);
        }
    }
}

fn draw_board(game: &Game, progress: f32) {
    let grid = game.grid();
    let (ox, oy, size) = board_layout(grid.side());

    for cell in grid.cells() {
        let x = ox + cell.position.x as f32 * size;
        let y = oy + cell.position.y as f32 * size;
        if cell.contents == Contents::Wall {
            draw_rectangle(x, y, size, size, DARKGRAY);
            continue;
        }
        let shade = if (cell.position.x + cell.position.y) % 2 == 0 {
            BOARD_LIGHT
        } else {
            BOARD_DARK
        };
        draw_rectangle(x, y, size, size, shade);

        let (cx, cy) = (x + size * 0.5, y + size * 0.5);
        match cell.contents {
            Contents::Body => draw_snake_cell(cell, cx, cy, size, progress),
            Contents::Food => draw_circle(cx, cy, size * 0.3, FOOD),
            Contents::Empty | Contents::Wall => {}
        }
    }

    // Cross out the last square the snake reached.
    if game.death() == Some(Obstacle::Body) {
        if let Some(neck) = game.snake().segment(2) {
            let pos = grid.cell(neck).position;
            let (x, y) = (ox + pos.x as f32 * size, oy + pos.y as f32 * size);
            draw_line(x, y, x + size, y + size, 4.0, RED);
            draw_line(x + size, y, x, y + size, 4.0, RED);
        }
    }
}

fn draw_hud(game: &Game) {
    let help = [
        "[P] to pause.",
        "[R] to restart.",
        "",
        "[W], [A], [S], [D] /",
        "[ARROW KEYS]",
        "to move.",
    ];
    for (i, line) in help.iter().enumerate() {
        draw_text(line, 10.0, 30.0 + 25.0 * i as f32, 23.0, BLACK);
    }

    let score = format!("SCORE: {}", game.score());
    let m = measure_text(&score, None, 35, 1.0);
    draw_text(&score, screen_width() - m.width - 20.0, 45.0, 35.0, BLACK);
    let difficulty = format!("DIFFICULTY: {}", game.difficulty().label());
    let m = measure_text(&difficulty, None, 18, 1.0);
    draw_text(&difficulty, screen_width() - m.width - 20.0, 70.0, 18.0, BLACK);
}

fn read_commands(game: &Game, buttons: &[Button]) -> Vec<Command> {
    let mut commands = Vec::new();
    if is_key_pressed(KeyCode::Enter) {
        commands.push(Command::Confirm);
    }
    if is_key_pressed(KeyCode::P) {
        commands.push(Command::TogglePause);
    }
    if is_key_pressed(KeyCode::R) {
        commands.push(Command::Restart);
    }

    let keys = [
        (KeyCode::Up, KeyCode::W, Direction::Up),
        (KeyCode::Down, KeyCode::S, Direction::Down),
        (KeyCode::Left, KeyCode::A, Direction::Left),
        (KeyCode::Right, KeyCode::D, Direction::Right),
    ];
    for (arrow, letter, dir) in keys {
        if is_key_pressed(arrow) || is_key_pressed(letter) {
            commands.push(Command::Steer(dir));
        }
    }

    if game.phase() == Phase::StartMenu {
        if is_mouse_button_pressed(MouseButton::Left) {
            let mouse: Vec2 = mouse_position().into();
            if let Some(button) = buttons.iter().find(|b| b.shape.contains(mouse)) {
                commands.push(Command::SelectDifficulty(button.difficulty));
            }
        }
        let digits = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4];
        for (level, key) in digits.iter().enumerate() {
            if is_key_pressed(*key) {
                if let Ok(difficulty) = Difficulty::try_from(level as u8) {
                    commands.push(Command::SelectDifficulty(difficulty));
                }
            }
        }
    }
    commands
}

fn load_settings() -> Settings {
    if !std::path::Path::new(SETTINGS_PATH).exists() {
        return Settings::default();
    }
    match Settings::load(SETTINGS_PATH) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("using default settings: {err}");
            Settings::default()
        }
    }
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_PATH)?)?;
    Ok(())
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake".to_owned(),
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    if let Err(err) = init_logging() {
        eprintln!("logging disabled: {err}");
    }

    let settings = load_settings();
    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or_default()
    });
    log::info!("starting on {} with seed {seed}", settings.difficulty.label());

    let sounds = Sounds::load(settings.volume).await;
    let buttons = difficulty_buttons();
    let mut game = Game::new(settings, seed);

    loop {
        if is_key_pressed(KeyCode::Q) {
            break;
        }

        let now = get_time();
        for command in read_commands(&game, &buttons) {
            game.handle(command, now);
        }
        game.update(now);
        for event in game.drain_events() {
            sounds.play(event);
        }

        clear_background(BACKGROUND);
        match game.phase() {
            Phase::Playing | Phase::DeathAnimation => {
                let frames = game.settings().frame_count as f32;
                let progress = (game.sprite_frame(now) as f32 / frames).min(1.0);
                draw_hud(&game);
                draw_board(&game, progress);
                if game.is_paused() {
                    draw_rectangle(0.0, 0.0, screen_width(), screen_height(), PAUSE_SHADE);
                    draw_centered_text("PAUSED!", screen_height() * 0.5, 23, WHITE);
                }
            }
            Phase::StartMenu => {
                draw_centered_text("SNAKE", 110.0, 90, BLACK);
                for button in &buttons {
                    draw_button(button, button.difficulty == game.difficulty());
                }
                draw_centered_text("PRESS [ENTER] TO START!", 480.0, 23, BLACK);
            }
            Phase::WinScreen => {
                draw_centered_text("YOU COMPLETED SNAKE!", 200.0, 70, BLACK);
                let on = format!("ON {} DIFFICULTY", game.difficulty().label());
                draw_centered_text(&on, 320.0, 35, BLACK);
                draw_centered_text("PRESS [ENTER] TO RE-START!", 440.0, 23, BLACK);
            }
            Phase::DeathScreen => {
                draw_centered_text("YOU DIED!", 250.0, 130, BLACK);
                let score = format!("YOUR SCORE WAS: {}", game.final_score());
                draw_centered_text(&score, 310.0, 35, BLACK);
                let on = format!("ON {} DIFFICULTY", game.difficulty().label());
                draw_centered_text(&on, 345.0, 35, BLACK);
                draw_centered_text("PRESS [ENTER] TO RE-START!", 440.0, 23, BLACK);
            }
        }

        next_frame().await;
    }
}
