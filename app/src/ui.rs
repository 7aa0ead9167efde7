//! Line-oriented front end: command parsing and list rendering.

use std::fmt::Write as _;

use todo_core::{Filter, StoreSnapshot, TodoItem};

pub const HELP: &str = "\
commands:
  add <title>        add a todo
  toggle <id>        flip completed
  toggle-all         complete all, or reopen all when every todo is done
  rm <id>            delete a todo
  clear              delete every completed todo
  edit <id>          start editing a title
  title <text>       replace the title being edited
  save | cancel      finish the edit
  filter <all|active|completed>
  dismiss            hide the error
  list | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(i64),
    ToggleAll,
    Remove(i64),
    ClearCompleted,
    Edit(i64),
    Title(String),
    Save,
    Cancel,
    Filter(Filter),
    Dismiss,
    List,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();
        let command = match word {
            "add" | "a" => Command::Add(rest.to_string()),
            "toggle" | "t" => Command::Toggle(parse_id(rest)?),
            "toggle-all" | "ta" => Command::ToggleAll,
            "rm" | "delete" => Command::Remove(parse_id(rest)?),
            "clear" => Command::ClearCompleted,
            "edit" | "e" => Command::Edit(parse_id(rest)?),
            "title" => Command::Title(rest.to_string()),
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "filter" | "f" => Command::Filter(rest.parse()?),
            "dismiss" => Command::Dismiss,
            "list" | "ls" | "" => Command::List,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command: {other} (try `help`)")),
        };
        Ok(command)
    }
}

fn parse_id(s: &str) -> Result<i64, String> {
    s.trim().parse().map_err(|_| format!("expected a todo id, got `{s}`"))
}

/// Draw the whole screen for `snapshot`.
pub fn render(snapshot: &StoreSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "---- todos ----");

    let Some(todos) = &snapshot.todos else {
        let _ = writeln!(out, "(not loaded)");
        render_error(&mut out, snapshot);
        return out;
    };

    if !todos.is_empty() {
        let marker = if snapshot.all_completed { "[x]" } else { "[ ]" };
        let _ = writeln!(out, "{marker} toggle all");
    }
    let prompt = if snapshot.input_disabled { "(saving)" } else { ">" };
    let _ = writeln!(out, "{prompt} {}", snapshot.draft);

    for item in &snapshot.visible {
        render_item(&mut out, item);
    }
    if let Some(temp) = &snapshot.temp_todo {
        render_item(&mut out, temp);
    }

    if !todos.is_empty() {
        let noun = if snapshot.active_count == 1 { "item" } else { "items" };
        let _ = write!(out, "{} {noun} left | filter: {}", snapshot.active_count, snapshot.filter);
        if snapshot.completed_count > 0 {
            let _ = write!(out, " | clear completed ({})", snapshot.completed_count);
        }
        out.push('\n');
    }
    render_error(&mut out, snapshot);
    out
}

fn render_item(out: &mut String, item: &TodoItem) {
    let check = if item.completed { "[x]" } else { "[ ]" };
    let id = if item.is_placeholder() {
        "-".to_string()
    } else {
        item.id.to_string()
    };
    let mut flags = String::new();
    if item.is_editing {
        flags.push_str(" (editing)");
    }
    if item.is_pending {
        flags.push_str(" …");
    }
    let _ = writeln!(out, "  {check} {id:>3} {}{flags}", item.title);
}

fn render_error(out: &mut String, snapshot: &StoreSnapshot) {
    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "! {error}  (dismiss)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, title: &str, completed: bool) -> TodoItem {
        TodoItem {
            id,
            user_id: 1,
            title: title.to_string(),
            completed,
            is_editing: false,
            is_pending: false,
        }
    }

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(Command::parse("add  Buy milk "), Ok(Command::Add("Buy milk".to_string())));
        assert_eq!(Command::parse("toggle 3"), Ok(Command::Toggle(3)));
        assert_eq!(Command::parse("rm 12"), Ok(Command::Remove(12)));
        assert_eq!(Command::parse("filter active"), Ok(Command::Filter(Filter::Active)));
        assert_eq!(Command::parse("title  new name"), Ok(Command::Title("new name".to_string())));
        assert_eq!(Command::parse(""), Ok(Command::List));
    }

    #[test]
    fn bare_add_is_passed_through_for_validation() {
        assert_eq!(Command::parse("add"), Ok(Command::Add(String::new())));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse("toggle x").is_err());
        assert!(Command::parse("filter someday").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }

    #[test]
    fn renders_unloaded_state_with_error() {
        let snapshot = StoreSnapshot {
            error: Some("Unable to load todos".to_string()),
            ..StoreSnapshot::default()
        };
        let screen = render(&snapshot);
        assert!(screen.contains("(not loaded)"));
        assert!(screen.contains("! Unable to load todos"));
    }

    #[test]
    fn renders_list_footer_and_placeholder() {
        let todos = vec![item(1, "A", true), item(2, "B", false)];
        let snapshot = StoreSnapshot {
            visible: todos.clone(),
            todos: Some(todos),
            temp_todo: Some(TodoItem::placeholder(1, "C".to_string())),
            active_count: 1,
            completed_count: 1,
            ..StoreSnapshot::default()
        };
        let screen = render(&snapshot);
        assert!(screen.contains("[x]   1 A"));
        assert!(screen.contains("[ ]   2 B"));
        assert!(screen.contains("[ ]   - C …"));
        assert!(screen.contains("1 item left | filter: all | clear completed (1)"));
    }
}
