use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use cross_xdg::BaseDirs;
use nu_ansi_term::Color;

use crate::theme::catppuccin::Mocha;

/// Highlighter colors for the eight operator classes plus comment text.
#[derive(Debug, Clone)]
pub struct Colors {
    pub op_right: Color,   // '>'
    pub op_left: Color,    // '<'
    pub op_inc: Color,     // '+'
    pub op_dec: Color,     // '-'
    pub op_output: Color,  // '.'
    pub op_input: Color,   // ','
    pub op_bracket: Color, // '[' and ']'
    pub comment: Color,
}

impl Default for Colors {
    fn default() -> Self {
        // Pointer movement in the blue range, arithmetic green/red, I/O
        // warm, flow control mauve, comments dimmed.
        Self {
            op_right: Mocha::SKY,
            op_left: Mocha::TEAL,
            op_inc: Mocha::GREEN,
            op_dec: Mocha::RED,
            op_output: Mocha::YELLOW,
            op_input: Mocha::PEACH,
            op_bracket: Mocha::MAUVE,
            comment: Mocha::SURFACE2,
        }
    }
}

static COLORS: OnceLock<Colors> = OnceLock::new();

pub fn colors() -> &'static Colors {
    COLORS.get_or_init(|| load_from_toml().unwrap_or_default())
}

/// Path for the REPL's persisted history, alongside `bfvm.toml`.
///
/// Resolves under the XDG config home (`~/.config` on Linux and macOS,
/// `C:\Users\<user>\.config` on Windows).
pub fn history_file() -> PathBuf {
    let base_dirs = BaseDirs::new().unwrap();
    PathBuf::from(base_dirs.config_home()).join("bfvm_history")
}

fn parse_color(value: &str) -> Option<Color> {
    let s = value.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Some(Color::Rgb(r, g, b));
            }
        }
        return None;
    }

    // Named colors matching nu_ansi_term::Color variants.
    Some(match s.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "purple" | "magenta" => Color::Purple,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" | "lightgray" | "light_gray" => Color::LightGray,
        "darkgray" | "dark_gray" | "darkgrey" | "dark_grey" => Color::DarkGray,
        "lightred" | "light_red" => Color::LightRed,
        "lightgreen" | "light_green" => Color::LightGreen,
        "lightblue" | "light_blue" => Color::LightBlue,
        "lightcyan" | "light_cyan" => Color::LightCyan,
        _ => return None,
    })
}

/// Read `[colors]` overrides from `<config_home>/bfvm.toml`.
///
/// The file is a flat section of `key = value` lines; values are `#RRGGBB`
/// or named colors, quoted or not. A missing file or key falls back to the
/// defaults.
fn load_from_toml() -> Option<Colors> {
    let base_dirs = BaseDirs::new().unwrap();
    let path = PathBuf::from(base_dirs.config_home()).join("bfvm.toml");

    let content = fs::read_to_string(path).ok()?;

    let mut in_colors = false;
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_colors = &line[1..line.len() - 1] == "colors";
            continue;
        }
        if !in_colors {
            continue;
        }
        if let Some(eq) = line.find('=') {
            let key = line[..eq].trim().to_string();
            let val_raw = line[eq + 1..].trim();
            let val = val_raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(val_raw);
            map.insert(key, val.to_string());
        }
    }

    let mut cfg = Colors::default();

    macro_rules! set {
        ($field:ident, $key:literal) => {
            if let Some(v) = map.get($key).and_then(|s| parse_color(s)) {
                cfg.$field = v;
            }
        };
    }

    set!(op_right, "op_right");
    set!(op_left, "op_left");
    set!(op_inc, "op_inc");
    set!(op_dec, "op_dec");
    set!(op_output, "op_output");
    set!(op_input, "op_input");
    set!(op_bracket, "op_bracket");
    set!(comment, "comment");

    Some(cfg)
}
