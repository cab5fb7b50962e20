use std::path::PathBuf;

use super::viewer_command::{CommandInterpreter, ViewerCommand};

// Interpreter for the line based viewer commands
pub struct ViewerInterpreter;

impl ViewerInterpreter {
    fn determine_index<'a>(mut args: impl Iterator<Item=&'a str>) -> Option<usize> {
        args.next()?.parse::<usize>().ok()
    }

    fn determine_path(line: &str) -> Option<PathBuf> {
        let path = line.trim().splitn(2, char::is_whitespace).nth(1)?.trim();

        match path.is_empty() {
            true => None,
            false => Some(PathBuf::from(path)),
        }
    }
}

impl CommandInterpreter for ViewerInterpreter {
    fn line_to_command(line: &str) -> Option<ViewerCommand> {
        let mut split = line.split_whitespace();

        let command_word = split.next()?;

        if let Ok(position) = command_word.parse::<usize>() {
            return Some(ViewerCommand::Child(position));
        }

        match command_word {
            "open" => Some(ViewerCommand::Open(ViewerInterpreter::determine_path(line))),
            "searches" => Some(ViewerCommand::ListSearches),
            "search" => Some(ViewerCommand::SelectSearch(ViewerInterpreter::determine_index(split)?)),
            "trees" => Some(ViewerCommand::ListTrees),
            "tree" => Some(ViewerCommand::SelectTree(ViewerInterpreter::determine_index(split)?)),
            "child" => Some(ViewerCommand::Child(ViewerInterpreter::determine_index(split)?)),
            "back" | "b" => Some(ViewerCommand::Back),
            "show" => Some(ViewerCommand::Show),
            "json" => Some(ViewerCommand::Json),
            "help" | "?" => Some(ViewerCommand::Help),
            "quit" | "exit" => Some(ViewerCommand::Quit),
            _ => None,
        }
    }
}

#[test]
fn check_bare_number_is_child() {
    assert_eq!(ViewerInterpreter::line_to_command("3\n"), Some(ViewerCommand::Child(3)));
}

#[test]
fn check_select_commands() {
    assert_eq!(ViewerInterpreter::line_to_command("search 2"), Some(ViewerCommand::SelectSearch(2)));
    assert_eq!(ViewerInterpreter::line_to_command("tree 0"), Some(ViewerCommand::SelectTree(0)));
    assert_eq!(ViewerInterpreter::line_to_command("child 11"), Some(ViewerCommand::Child(11)));
}

#[test]
fn check_missing_index() {
    assert_eq!(ViewerInterpreter::line_to_command("tree"), None);
    assert_eq!(ViewerInterpreter::line_to_command("tree -1"), None);
}

#[test]
fn check_open_with_spaces() {
    let expected = Some(ViewerCommand::Open(Some(PathBuf::from("my traces/run 1.db"))));

    assert_eq!(ViewerInterpreter::line_to_command("open my traces/run 1.db\n"), expected);
}

#[test]
fn check_cancelled_open() {
    assert_eq!(ViewerInterpreter::line_to_command("open"), Some(ViewerCommand::Open(None)));
}

#[test]
fn check_unknown_command() {
    assert_eq!(ViewerInterpreter::line_to_command("go infinite"), None);
    assert_eq!(ViewerInterpreter::line_to_command(""), None);
}
