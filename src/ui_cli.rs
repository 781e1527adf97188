use std::io::{self, Write};

use thiserror::Error;

use crate::app::AppError;
use crate::conversion::{self, ConversionError};
use crate::i18n::{keys, Translator};
use crate::panel::AmplitudeSpecsPanel;
use crate::store::SpecStore;
use crate::units::{AmpUnit, FilterType};

/// 명령 줄 하나를 해석한 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Unit(AmpUnit),
    FilterType(FilterType),
    Fields(Vec<String>),
    Focus(usize),
    Type(usize, String),
    Enter,
    Esc,
    Blur,
    /// focus → type → enter 를 한 번에
    Set(usize, String),
    Digits(usize),
    Convert {
        value: f64,
        name: String,
        from: AmpUnit,
        to: AmpUnit,
    },
    Lang(String),
    Help,
    Quit,
}

/// 명령 해석 오류.
#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("알 수 없는 명령: {0}")]
    Unknown(String),
    #[error("사용법: {0}")]
    Usage(&'static str),
    #[error("숫자가 아님: {0}")]
    InvalidNumber(String),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// 명령 줄을 해석한다. 명령어는 대소문자를 구분하지 않는다.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    match head.to_lowercase().as_str() {
        "" | "show" | "ls" => Ok(Command::Show),
        "unit" => match args.as_slice() {
            [u] => Ok(Command::Unit(conversion::parse_amp_unit(u)?)),
            _ => Err(CommandError::Usage("unit <dB|V|W>")),
        },
        "ft" => match args.as_slice() {
            [ft] => Ok(Command::FilterType(conversion::parse_filter_type(ft)?)),
            _ => Err(CommandError::Usage("ft <IIR|FIR>")),
        },
        "fields" => Ok(Command::Fields(args.iter().map(|s| s.to_string()).collect())),
        "focus" => match args.as_slice() {
            [i] => Ok(Command::Focus(parse_index(i)?)),
            _ => Err(CommandError::Usage("focus <i>")),
        },
        "type" | "set" => {
            // 텍스트는 공백을 포함할 수 있으므로 첫 인자 뒤 나머지 전체를 쓴다.
            let (idx, text) = rest
                .split_once(char::is_whitespace)
                .map(|(i, t)| (i, t.trim()))
                .unwrap_or((rest, ""));
            if idx.is_empty() {
                return Err(CommandError::Usage(if head.eq_ignore_ascii_case("set") {
                    "set <i> <expr>"
                } else {
                    "type <i> <text>"
                }));
            }
            let index = parse_index(idx)?;
            if head.eq_ignore_ascii_case("set") {
                Ok(Command::Set(index, text.to_string()))
            } else {
                Ok(Command::Type(index, text.to_string()))
            }
        }
        "enter" | "commit" => Ok(Command::Enter),
        "esc" | "revert" => Ok(Command::Esc),
        "blur" => Ok(Command::Blur),
        "digits" => match args.as_slice() {
            [n] => Ok(Command::Digits(parse_index(n)?)),
            _ => Err(CommandError::Usage("digits <n>")),
        },
        "convert" => match args.as_slice() {
            [v, name, from, to] => Ok(Command::Convert {
                value: v
                    .parse::<f64>()
                    .map_err(|_| CommandError::InvalidNumber(v.to_string()))?,
                name: name.to_string(),
                from: conversion::parse_amp_unit(from)?,
                to: conversion::parse_amp_unit(to)?,
            }),
            _ => Err(CommandError::Usage("convert <value> <name> <from> <to>")),
        },
        "lang" => match args.as_slice() {
            [code] => Ok(Command::Lang(code.to_string())),
            _ => Err(CommandError::Usage("lang <ko|en>")),
        },
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_index(s: &str) -> Result<usize, CommandError> {
    s.parse::<usize>()
        .map_err(|_| CommandError::InvalidNumber(s.to_string()))
}

/// 패널 상태를 표 형태로 출력한다. `*`는 포커스, `~`는 미저장 편집.
pub fn print_panel<S: SpecStore>(tr: &Translator, panel: &AmplitudeSpecsPanel<S>) {
    println!(
        "\n=== {} ===  {} {}  ({})",
        tr.t(keys::PANEL_TITLE),
        tr.t(keys::PANEL_UNIT),
        panel.unit(),
        panel.store().filter_type()
    );
    let fields = panel.visible_fields();
    if fields.is_empty() {
        println!("  {}", tr.t(keys::CLI_NO_FIELDS));
    }
    for (i, field) in fields.iter().enumerate() {
        let marker = if field.session().is_dirty() {
            '~'
        } else if field.session().has_focus() {
            '*'
        } else {
            ' '
        };
        println!("{marker} [{i}] {:<8} {}", field.label().to_string(), field.text());
    }
}

pub fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    if n == 0 {
        // EOF 는 종료 명령으로 취급한다.
        return Ok("quit".to_string());
    }
    Ok(buf)
}
