pub mod brain;
pub mod color;
pub mod config;
pub mod fzf;
pub mod note;

use crate::brain::{Brain, COLOR_SCHEME_KEY};
use crate::color::{DisplayState, SCHEMES, SchemeSelector, scheme_name};
use crate::config::Config;
use crate::fzf::FzfPicker;
use crate::note::{NoteEntry, list_notes, note_id, note_path};
use chrono::{Local, TimeZone};
use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use yansi::Paint;

pub fn entry() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_help();
        return Ok(());
    }

    let cmd = args.remove(0);
    match cmd.as_str() {
        "list" => list(args)?,
        "new" => new_note(args)?,
        "color" => change_color(args)?,
        "path" => {
            let cfg = Config::load()?;
            println!("{}", cfg.root.display());
        }
        "help" => print_help(),
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\
Sticky Notes
Usage:
  sn list                         List notes, most recently modified first
  sn new <title>                  Create <root>/<title>.note with a title heading
  sn color <note> [scheme]        Set a note's color scheme (picker when omitted)
  sn path                         Show the configured notes root
  sn help                         Show this message

Schemes:
  Orange Yellow Green GreenLight Blue BlueLight Purple Pink Gray White

Configuration:
  ~/.config/sticky_notes.toml     `root` (required) and `note_file_extensions`
  STICKY_NOTES_ROOT               Override the notes root
  STICKY_NOTES_CONFIG             Override the settings file location
"
    );
}

fn list(_args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let cfg = Config::load()?;
    fs::create_dir_all(&cfg.root)?;
    let brain = Brain::load(&cfg.root);

    let notes = list_notes(&cfg.root, &cfg.note_file_extensions);
    if notes.is_empty() {
        println!("No notes yet. Try `sn new <title>`.");
        return Ok(());
    }

    let use_color = env::var("NO_COLOR").is_err();
    for n in &notes {
        let id = match note_id(&cfg.root, &n.path) {
            Some(id) => id,
            None => continue,
        };
        let scheme = brain
            .get(&id)
            .and_then(|record| record.get(COLOR_SCHEME_KEY))
            .and_then(|path| scheme_name(path));
        println!(
            "{}  {}  {}",
            format_timestamp(&mtime_text(n), use_color),
            format_id(&id, use_color),
            scheme.unwrap_or("")
        );
    }
    Ok(())
}

fn new_note(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        return Err("Usage: sn new <title>".into());
    }
    let title = args.join(" ");
    let cfg = Config::load()?;
    let existed = note_path(&cfg.root, &title).exists();
    let path = note::create_note(&cfg.root, &title)?;
    if existed {
        println!("Note already exists: {}", path.display());
    } else {
        println!("Created {}", path.display());
    }
    Ok(())
}

fn change_color(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let mut args = args.into_iter();
    let target = args.next().ok_or("Usage: sn color <note> [scheme]")?;
    let scheme_arg = args.next();

    let cfg = Config::load()?;
    let path = resolve_note_path(&cfg.root, &target);
    if !path.exists() {
        return Err(format!("Note {target} not found").into());
    }
    let id = note_id(&cfg.root, &path).ok_or_else(|| {
        format!("Note {target} is not under the configured root")
    })?;

    let mut brain = Brain::load(&cfg.root);
    let current = brain
        .get(&id)
        .and_then(|record| record.get(COLOR_SCHEME_KEY))
        .cloned();
    let mut state = DisplayState { color_scheme: current.clone() };
    let selector = SchemeSelector::open(&state);

    let choice = match scheme_arg {
        Some(name) => {
            if !SCHEMES.contains(&name.as_str()) {
                return Err(format!(
                    "Unknown color scheme: {name} (expected one of {})",
                    SCHEMES.join(", ")
                )
                .into());
            }
            Some(name)
        }
        None => pick_scheme(current.as_deref())?,
    };

    selector.finish(&mut brain, &id, choice.as_deref(), &mut state)?;
    match choice {
        Some(name) => println!("Set {id} to {name}"),
        None => println!("No scheme selected; {id} left unchanged."),
    }
    Ok(())
}

/// Offer the closed scheme set through fzf, marking the stored choice.
fn pick_scheme(
    current: Option<&str>,
) -> Result<Option<String>, Box<dyn Error>> {
    let current_name = current.and_then(scheme_name);
    let lines: Vec<String> = SCHEMES
        .iter()
        .map(|name| {
            if Some(*name) == current_name {
                format!("{name} (current)")
            } else {
                name.to_string()
            }
        })
        .collect();

    let picked = FzfPicker::new().pick_one(&lines)?;
    Ok(picked.map(|line| {
        line.trim_end_matches(" (current)").to_string()
    }))
}

/// Accept an absolute path, a root-relative id, or a bare title.
fn resolve_note_path(root: &Path, target: &str) -> PathBuf {
    let given = Path::new(target);
    if given.is_absolute() {
        return given.to_path_buf();
    }
    let joined = root.join(given);
    if joined.exists() {
        return joined;
    }
    note_path(root, target)
}

fn mtime_text(entry: &NoteEntry) -> String {
    match Local.timestamp_opt(entry.modified, 0).single() {
        Some(dt) => dt.format("%d%b%y %H:%M").to_string(),
        None => "unknown".to_string(),
    }
}

fn format_id(id: &str, use_color: bool) -> String {
    if use_color {
        Paint::rgb(id, 108, 112, 134).to_string()
    } else {
        id.to_string()
    }
}

fn format_timestamp(ts: &str, use_color: bool) -> String {
    if use_color {
        Paint::rgb(ts, 137, 180, 250).to_string()
    } else {
        ts.to_string()
    }
}
