use std::io;
use std::io::BufRead;
use clap::Parser;
use itertools::Itertools;
use tracing_subscriber::EnvFilter;

use tree_viewer::core::navigation::Navigator;
use tree_viewer::input::command_line::Args;
use tree_viewer::input::viewer_command::{CommandInterpreter, ViewerCommand, HELP};
use tree_viewer::input::viewer_interpreter::ViewerInterpreter;
use tree_viewer::output::render_children;
use tree_viewer::output::terminal::TerminalBoard;

/// Interactive viewer for recorded search trees.
/// Reads one command per line from stdin, diagnostics go to stderr.

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // Everything happens on this thread: the runtime only drives the sqlx futures.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut navigator = Navigator::new(TerminalBoard::default());

    if let Some(path) = args.db_path.as_deref() {
        match runtime.block_on(navigator.open_database(Some(path))) {
            Ok(()) => print_node(&navigator, args.columns),
            Err(error) => println!("Can't open {}: {error}", path.display()),
        }
    } else {
        println!("No database loaded, use `open <path>` (`help` lists all commands)");
    }

    for line in io::stdin().lock().lines() {
        let line = line?;

        let command = match ViewerInterpreter::line_to_command(&line) {
            Some(command) => command,
            None => {
                if !line.trim().is_empty() {
                    println!("Unknown command `{}`, try `help`", line.trim());
                }
                continue;
            },
        };

        let result = match command {
            ViewerCommand::Quit => break,
            ViewerCommand::Help => {
                println!("{HELP}");
                continue;
            },
            ViewerCommand::ListSearches => {
                print_listing(navigator.searches().iter().map(|x| x.to_string()), "searches");
                continue;
            },
            ViewerCommand::ListTrees => {
                print_listing(navigator.trees().iter().map(|x| x.to_string()), "trees");
                continue;
            },
            ViewerCommand::Json => {
                match navigator.view() {
                    Some(view) => println!("{}", serde_json::to_string_pretty(&serde_json::json!({
                        "fen": view.line.fen(),
                        "details": view.details,
                        "children": view.children,
                    }))?),
                    None => println!("No node selected"),
                }
                continue;
            },
            ViewerCommand::Show => {
                navigator.redraw();
                Ok(())
            },
            ViewerCommand::Open(path) => runtime.block_on(navigator.open_database(path.as_deref())),
            ViewerCommand::SelectSearch(position) => runtime.block_on(navigator.select_search(position)),
            ViewerCommand::SelectTree(position) => runtime.block_on(navigator.select_tree(position)),
            ViewerCommand::Child(position) => runtime.block_on(navigator.descend_to_listed(position)),
            ViewerCommand::Back => runtime.block_on(navigator.ascend()),
        };

        match result {
            Ok(()) => print_node(&navigator, args.columns),
            Err(error) => println!("Error: {error}"),
        }
    }

    Ok(())
}

fn print_listing(items: impl Iterator<Item = String>, name: &str) {
    let listing = items.enumerate().map(|(position, item)| format!("{position:>3}: {item}")).join("\n");

    match listing.is_empty() {
        true => println!("No {name}"),
        false => println!("{listing}"),
    }
}

fn print_node(navigator: &Navigator<TerminalBoard>, columns: usize) {
    let (search, tree) = match (navigator.selected_search(), navigator.selected_tree()) {
        (Some(search), Some(tree)) => (search, tree),
        (Some(search), None) => {
            println!("Search {} has no trees", search);
            return;
        },
        _ => {
            println!("No search selected");
            return;
        },
    };

    let (cursor, view) = match (navigator.cursor(), navigator.view()) {
        (Some(cursor), Some(view)) => (cursor, view),
        _ => return,
    };

    println!("Search: {search}");
    println!("Tree: {tree}");
    println!("Node {} via [{}]{}", cursor.node_index, cursor.move_path.join(" "), match navigator.can_ascend() {
        true => "",
        false => " (root)",
    });
    println!("{}", render_children(&view.children, columns));

    if view.details.is_empty() {
        println!("(node not in trace)");
    } else {
        println!("{}", view.details);
    }
}
